#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Exceeds,
    Meets,
    Approaching,
    WellBelow,
}

pub fn category_order() -> &'static [Category] {
    &[
        Category::Exceeds,
        Category::Meets,
        Category::Approaching,
        Category::WellBelow,
    ]
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Exceeds => "Exceeds domain",
            Category::Meets => "Meets domain",
            Category::Approaching => "Approaching domain",
            Category::WellBelow => "Well below domain",
        }
    }

    /// Stable machine key used in TSV and JSON output.
    pub fn key(self) -> &'static str {
        match self {
            Category::Exceeds => "exceeds",
            Category::Meets => "meets",
            Category::Approaching => "approaching",
            Category::WellBelow => "well_below",
        }
    }

    pub fn background_color(self) -> &'static str {
        match self {
            Category::Exceeds => "#4CAF50",
            Category::Meets => "#FFC107",
            Category::Approaching => "#FF9800",
            Category::WellBelow => "#F44336",
        }
    }

    pub fn text_color(self) -> &'static str {
        match self {
            Category::Exceeds | Category::WellBelow => "white",
            Category::Meets | Category::Approaching => "black",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/category.rs"]
mod tests;
