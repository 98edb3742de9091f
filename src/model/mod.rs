pub mod category;
pub mod ids;
pub mod records;
pub mod thresholds;
