use crate::model::category::{Category, category_order};
use crate::pipeline::stage2_aggregate::StudentScores;
use crate::pipeline::stage4_classify::{StudentClassification, run_stage4};

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionRow {
    pub category: Category,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub total_students: usize,
    /// Always four rows in category order.
    pub rows: Vec<DistributionRow>,
}

impl Distribution {
    pub fn row(&self, category: Category) -> Option<&DistributionRow> {
        self.rows.iter().find(|r| r.category == category)
    }
}

pub fn distribute(scores: &StudentScores) -> Distribution {
    let classified = run_stage4(scores);
    distribute_classified(&classified)
}

pub fn distribute_classified(classified: &[StudentClassification]) -> Distribution {
    let total = classified.len();
    let rows = category_order()
        .iter()
        .map(|&category| {
            let count = classified.iter().filter(|c| c.category == category).count();
            let percentage = if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            DistributionRow {
                category,
                count,
                percentage,
            }
        })
        .collect();
    Distribution {
        total_students: total,
        rows,
    }
}

pub fn format_percentage(p: f64) -> String {
    format!("{p:.1}%")
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_distribute.rs"]
mod tests;
