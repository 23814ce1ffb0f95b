use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::PlacementConfig;

// Type aliases for clarity
pub type Day = u32;
pub type Hour = u32;

/// The six school days a teacher can declare unavailability for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Zero-based day index into a timetable grid.
    pub fn index(self) -> Day {
        match self {
            Weekday::Monday => 0,
            Weekday::Tuesday => 1,
            Weekday::Wednesday => 2,
            Weekday::Thursday => 3,
            Weekday::Friday => 4,
            Weekday::Saturday => 5,
        }
    }
}

/// Weekly hours a class needs for one subject.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubjectHours {
    pub subject: String,
    pub hours: u32,
}

/// A class with its subject requirements, in processing order.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassRequirements {
    pub name: String,
    #[serde(default)]
    pub subjects: Vec<SubjectHours>,
}

/// A teacher entry of the roster.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherInput {
    pub name: String,
    pub subject: String,
    pub teaching_hours: u32,
    #[serde(default)]
    pub unavailable: BTreeMap<Weekday, Vec<Hour>>,
}

/// The complete input for the timetabling problem.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableInput {
    pub classes: Vec<ClassRequirements>,
    #[serde(default)]
    pub labs: Vec<String>,
    #[serde(default = "default_lab_block_length")]
    pub lab_block_length: u32,
    pub teachers: Vec<TeacherInput>,
    pub hours_per_day: u32,
    pub days_per_week: u32,
    #[serde(default)]
    pub config: PlacementConfig,
}

fn default_lab_block_length() -> u32 {
    1
}

/// The finished grid of one class; `None` marks a free period.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassTimetable {
    pub class_name: String,
    pub grid: Vec<Vec<Option<String>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LogKind {
    TeacherAssigned,
    LabPlaced,
    SubjectPlaced,
    SubjectUnassignable,
    PlacementFailed,
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LogKind::TeacherAssigned => "Teacher Assigned",
            LogKind::LabPlaced => "Lab Placed",
            LogKind::SubjectPlaced => "Subject Placed",
            LogKind::SubjectUnassignable => "Subject Unassignable",
            LogKind::PlacementFailed => "Placement Failed",
        };
        f.write_str(label)
    }
}

/// One human-readable line of the assignment log.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub kind: LogKind,
    pub message: String,
}

impl LogEntry {
    pub fn new(kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// What a placement failure was trying to place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlacementTarget {
    Lab { lab: String },
    Subject { subject: String },
}

/// A (lab, class) or (class, subject) pair that could not be completed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementFailure {
    pub class_name: String,
    pub target: PlacementTarget,
    /// Hours of the pair still unplaced when it was abandoned.
    pub unplaced_hours: u32,
    pub reason: String,
}

/// How far a (class, subject) pair got.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectOutcome {
    pub class_name: String,
    pub subject: String,
    pub required: u32,
    pub placed: u32,
}

/// End-of-run state of one teacher.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherReport {
    pub name: String,
    pub subject: String,
    pub remaining_hours: u32,
    pub daily_hours: Vec<u32>,
    pub assigned_classes: Vec<String>,
}

/// The final output of the generator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableOutput {
    pub timetables: Vec<ClassTimetable>,
    pub log: Vec<LogEntry>,
    pub subjects: Vec<SubjectOutcome>,
    pub teachers: Vec<TeacherReport>,
    pub failures: Vec<PlacementFailure>,
}

impl TimetableOutput {
    pub fn timetable(&self, class_name: &str) -> Option<&ClassTimetable> {
        self.timetables.iter().find(|t| t.class_name == class_name)
    }
}
