//! Placement rules and limits.
//!
//! Every field has a default matching the classic timetable rules: lunch at
//! hour index 4, at most two periods of a subject per day, never three in a
//! row, and at most three taught hours per teacher per day.

use serde::{Deserialize, Serialize};

/// How subject placement picks the teacher that is charged for an hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TeacherSelection {
    /// Only teachers the load balancer assigned the class to are eligible.
    #[default]
    Balanced,
    /// Any teacher of the subject with budget left; the first one is charged.
    FirstAvailable,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlacementConfig {
    /// Hour index reserved for lunch. `None` disables the break.
    pub lunch_hour: Option<u32>,
    /// Maximum periods of one subject in a single day for a class.
    pub subject_daily_cap: u32,
    /// Maximum run of back-to-back periods of one subject.
    pub max_consecutive: u32,
    /// Maximum hours a teacher teaches in a single day.
    pub teacher_daily_cap: u32,
    /// Check teacher availability, daily cap and double-booking per slot.
    pub enforce_teacher_limits: bool,
    pub teacher_selection: TeacherSelection,
    /// Random draws per slot before the pair is reported as failed.
    pub max_attempts: u32,
    /// Fixed seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            lunch_hour: Some(4),
            subject_daily_cap: 2,
            max_consecutive: 2,
            teacher_daily_cap: 3,
            enforce_teacher_limits: true,
            teacher_selection: TeacherSelection::Balanced,
            max_attempts: 10_000,
            seed: None,
        }
    }
}

impl PlacementConfig {
    pub fn is_lunch(&self, hour: u32) -> bool {
        self.lunch_hour == Some(hour)
    }

    /// Whether a block `[start, start + len)` stays clear of the lunch hour.
    pub fn block_avoids_lunch(&self, start: u32, len: u32) -> bool {
        match self.lunch_hour {
            Some(lunch) => start + len <= lunch || start > lunch,
            None => true,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
