//! Derived learning-path structures.
//!
//! A `LearningPath` is fully recomputed on every generation run and never
//! mutated in place. The per-week focus lines come from the completion
//! provider; everything else is computed deterministically from the request.

use super::request::LearningPathRequest;
use serde::{Deserialize, Serialize};

/// Fixed activity buckets as shares of the weekly hour budget.
const ACTIVITY_BUCKETS: [(&str, f64); 3] = [
    ("Theory and Concepts", 0.3),
    ("Practical Exercises", 0.4),
    ("Projects and Applications", 0.3),
];

/// Number of study blocks the weekly commitment is split into for the
/// recommendation section.
const STUDY_BLOCKS_PER_WEEK: f64 = 5.0;

/// A single scheduled activity within a week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Activity label (e.g. "Practical Exercises").
    pub label: String,
    /// Scheduled hours, rounded to a tenth of an hour.
    pub hours: f64,
}

/// One week of the generated plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    /// 1-based week number.
    pub week: u32,
    /// Model-generated focus line for the week.
    pub focus: String,
    /// Total hours scheduled for this week.
    pub hours: u32,
    /// Fixed-ratio activity buckets summing to `hours`.
    pub activities: Vec<Activity>,
}

/// The structured multi-week output of the learning-path generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPath {
    /// The requested topic.
    pub topic: String,
    /// The requested specific focus (may be empty).
    pub focus: String,
    /// Plan length in weeks.
    pub total_weeks: u32,
    /// Weekly study commitment in hours.
    pub hours_per_week: u32,
    /// Total committed hours: `total_weeks * hours_per_week`.
    pub total_hours: u32,
    /// Ordered per-week schedule.
    pub weeks: Vec<WeekPlan>,
}

impl LearningPath {
    /// Assembles a plan from a validated request and one focus line per week.
    ///
    /// The caller is responsible for providing exactly
    /// `request.duration_weeks` focus lines, in week order.
    pub fn assemble(request: &LearningPathRequest, focuses: Vec<String>) -> Self {
        debug_assert_eq!(focuses.len(), request.duration_weeks as usize);

        let weeks = focuses
            .into_iter()
            .enumerate()
            .map(|(index, focus)| WeekPlan {
                week: index as u32 + 1,
                focus,
                hours: request.hours_per_week,
                activities: weekly_activities(request.hours_per_week),
            })
            .collect();

        Self {
            topic: request.topic.clone(),
            focus: request.focus.clone(),
            total_weeks: request.duration_weeks,
            hours_per_week: request.hours_per_week,
            total_hours: request.duration_weeks * request.hours_per_week,
            weeks,
        }
    }

    /// Recommended length of a single study block in hours.
    pub fn study_block_hours(&self) -> f64 {
        round_to_tenth(f64::from(self.hours_per_week) / STUDY_BLOCKS_PER_WEEK)
    }
}

/// Computes the fixed 30/40/30 activity split for a weekly hour budget.
pub fn weekly_activities(hours_per_week: u32) -> Vec<Activity> {
    ACTIVITY_BUCKETS
        .iter()
        .map(|(label, share)| Activity {
            label: (*label).to_string(),
            hours: round_to_tenth(f64::from(hours_per_week) * share),
        })
        .collect()
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(duration_weeks: u32, hours_per_week: u32) -> LearningPathRequest {
        LearningPathRequest {
            topic: "Data Science".to_string(),
            focus: "Machine Learning".to_string(),
            duration_weeks,
            hours_per_week,
        }
    }

    fn focuses(count: u32) -> Vec<String> {
        (1..=count).map(|week| format!("Week {} focus", week)).collect()
    }

    #[test]
    fn test_total_hours_is_exact_product() {
        for (duration, hours) in [(1, 1), (4, 5), (12, 8), (52, 40)] {
            let plan = LearningPath::assemble(&request(duration, hours), focuses(duration));
            assert_eq!(plan.total_hours, duration * hours);
        }
    }

    #[test]
    fn test_reference_example() {
        // duration=4, hours_per_week=5 -> total 20h, activities [1.5, 2.0, 1.5]
        let plan = LearningPath::assemble(&request(4, 5), focuses(4));
        assert_eq!(plan.total_hours, 20);

        let hours: Vec<f64> = plan.weeks[0].activities.iter().map(|a| a.hours).collect();
        assert_eq!(hours, vec![1.5, 2.0, 1.5]);
    }

    #[test]
    fn test_activities_sum_to_weekly_hours() {
        for hours_per_week in 1..=40 {
            let activities = weekly_activities(hours_per_week);
            let total: f64 = activities.iter().map(|a| a.hours).sum();
            assert!(
                (total - f64::from(hours_per_week)).abs() < 0.1,
                "hours_per_week={}: activities summed to {}",
                hours_per_week,
                total
            );
        }
    }

    #[test]
    fn test_weeks_are_ordered_and_carry_focus() {
        let plan = LearningPath::assemble(&request(3, 6), focuses(3));
        assert_eq!(plan.weeks.len(), 3);
        for (index, week) in plan.weeks.iter().enumerate() {
            assert_eq!(week.week, index as u32 + 1);
            assert_eq!(week.focus, format!("Week {} focus", week.week));
            assert_eq!(week.hours, 6);
        }
    }

    #[test]
    fn test_study_block_recommendation() {
        let plan = LearningPath::assemble(&request(4, 5), focuses(4));
        assert_eq!(plan.study_block_hours(), 1.0);

        let plan = LearningPath::assemble(&request(2, 12), focuses(2));
        assert_eq!(plan.study_block_hours(), 2.4);
    }
}
