use crate::model::category::Category;
use crate::model::ids::EntityId;
use crate::model::thresholds::MasteryThresholds;
use crate::pipeline::stage2_aggregate::StudentScores;

#[derive(Debug, Clone, PartialEq)]
pub struct StudentClassification {
    pub student_id: EntityId,
    pub mean: f64,
    pub n_scores: usize,
    pub category: Category,
}

pub fn classify(mean: f64) -> Category {
    classify_with(mean, &MasteryThresholds::default_v1())
}

/// Lower bounds are inclusive; NaN lands in the lowest band.
pub fn classify_with(mean: f64, thresholds: &MasteryThresholds) -> Category {
    if mean >= thresholds.exceeds_min {
        Category::Exceeds
    } else if mean >= thresholds.meets_min {
        Category::Meets
    } else if mean >= thresholds.approaching_min {
        Category::Approaching
    } else {
        Category::WellBelow
    }
}

/// Arithmetic mean; 0.0 for a student with no scores.
pub fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

pub fn run_stage4(scores: &StudentScores) -> Vec<StudentClassification> {
    scores
        .iter()
        .map(|(student, values)| {
            let m = mean(values);
            StudentClassification {
                student_id: student.clone(),
                mean: m,
                n_scores: values.len(),
                category: classify(m),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_classify.rs"]
mod tests;
