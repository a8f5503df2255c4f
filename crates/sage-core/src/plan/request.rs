//! Learning-path request type and validation.

use crate::error::{Result, SageError};
use serde::{Deserialize, Serialize};

/// Minimum plan length in weeks.
pub const MIN_DURATION_WEEKS: u32 = 1;
/// Maximum plan length in weeks.
pub const MAX_DURATION_WEEKS: u32 = 52;
/// Minimum weekly study commitment in hours.
pub const MIN_HOURS_PER_WEEK: u32 = 1;
/// Maximum weekly study commitment in hours.
pub const MAX_HOURS_PER_WEEK: u32 = 40;

/// A typed request for a learning path.
///
/// The request is validated with [`LearningPathRequest::validate`] before any
/// prompt is built from it; no provider call is attempted for an invalid
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPathRequest {
    /// The topic to learn (e.g. "Python Programming").
    pub topic: String,
    /// An optional specific aspect to focus on (e.g. "Web Development").
    pub focus: String,
    /// Plan length in weeks (1-52).
    pub duration_weeks: u32,
    /// Weekly study commitment in hours (1-40).
    pub hours_per_week: u32,
}

impl LearningPathRequest {
    /// Checks the request against the documented bounds.
    ///
    /// # Errors
    ///
    /// Returns `SageError::Validation` if the topic is empty or a numeric
    /// field is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.topic.trim().is_empty() {
            return Err(SageError::validation("topic must not be empty"));
        }

        if !(MIN_DURATION_WEEKS..=MAX_DURATION_WEEKS).contains(&self.duration_weeks) {
            return Err(SageError::validation(format!(
                "duration must be between {} and {} weeks, got {}",
                MIN_DURATION_WEEKS, MAX_DURATION_WEEKS, self.duration_weeks
            )));
        }

        if !(MIN_HOURS_PER_WEEK..=MAX_HOURS_PER_WEEK).contains(&self.hours_per_week) {
            return Err(SageError::validation(format!(
                "hours per week must be between {} and {}, got {}",
                MIN_HOURS_PER_WEEK, MAX_HOURS_PER_WEEK, self.hours_per_week
            )));
        }

        Ok(())
    }
}
