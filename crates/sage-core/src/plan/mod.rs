//! Learning-path domain module.
//!
//! # Module Structure
//!
//! - `request`: The validated learning-path request (`LearningPathRequest`)
//! - `model`: The derived plan structures (`LearningPath`, `WeekPlan`,
//!   `Activity`)

mod model;
mod request;

// Re-export public API
pub use model::{Activity, LearningPath, WeekPlan, weekly_activities};
pub use request::{
    LearningPathRequest, MAX_DURATION_WEEKS, MAX_HOURS_PER_WEEK, MIN_DURATION_WEEKS,
    MIN_HOURS_PER_WEEK,
};
