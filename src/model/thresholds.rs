#[derive(Debug, Clone)]
pub struct MasteryThresholds {
    pub exceeds_min: f64,
    pub meets_min: f64,
    pub approaching_min: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullScorePolicy {
    /// Null scores are left out of the student's mean.
    Exclude,
    /// Null scores count as 0.0.
    CoerceZero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingMode {
    Outcomes,
    Groups,
}

impl MasteryThresholds {
    pub fn default_v1() -> Self {
        Self {
            exceeds_min: 0.90,
            meets_min: 0.60,
            approaching_min: 0.40,
        }
    }
}

impl Default for MasteryThresholds {
    fn default() -> Self {
        Self::default_v1()
    }
}

impl NullScorePolicy {
    pub fn name(self) -> &'static str {
        match self {
            NullScorePolicy::Exclude => "exclude",
            NullScorePolicy::CoerceZero => "zero",
        }
    }
}

impl GroupingMode {
    pub fn name(self) -> &'static str {
        match self {
            GroupingMode::Outcomes => "outcomes",
            GroupingMode::Groups => "groups",
        }
    }
}
