//! Teacher roster and subject-wise load balancing.
//!
//! The pool owns every `Teacher` for the whole run. Weekly budgets and daily
//! counters are global per teacher, so placement for any class goes through
//! the pool rather than holding teachers itself.

use itertools::Itertools;
use log::info;

use crate::data::{Day, Hour, LogEntry, LogKind, TeacherInput, TeacherReport};
use crate::teacher::{Teacher, TeacherError};

pub type TeacherId = usize;

#[derive(Debug, Clone, Default)]
pub struct TeacherPool {
    teachers: Vec<Teacher>,
}

impl TeacherPool {
    pub fn new(teachers: Vec<Teacher>) -> Self {
        Self { teachers }
    }

    pub fn from_inputs(inputs: &[TeacherInput], days: u32, hours: u32, daily_cap: u32) -> Self {
        Self::new(
            inputs
                .iter()
                .map(|t| Teacher::from_input(t, days, hours, daily_cap))
                .collect(),
        )
    }

    pub fn get(&self, id: TeacherId) -> &Teacher {
        &self.teachers[id]
    }

    /// Subjects in order of first appearance, each with its teachers in roster order.
    pub fn group_by_subject(&self) -> Vec<(String, Vec<TeacherId>)> {
        let mut groups = self
            .teachers
            .iter()
            .enumerate()
            .map(|(id, t)| (t.subject().to_string(), id))
            .into_group_map();
        self.teachers
            .iter()
            .map(|t| t.subject())
            .unique()
            .filter_map(|subject| groups.remove_entry(subject))
            .collect()
    }

    /// Splits `classes` among every subject's teachers and logs each share.
    pub fn balance(&mut self, classes: &[String]) -> Vec<LogEntry> {
        let mut log = Vec::new();
        for (subject, ids) in self.group_by_subject() {
            let chunks = distribute_classes(classes, ids.len());
            for (id, chunk) in ids.into_iter().zip(chunks) {
                let teacher = &mut self.teachers[id];
                let message = format!(
                    "Teacher {} (subject: {}) assigned to classes: {:?}",
                    teacher.name(),
                    subject,
                    chunk
                );
                info!("{}", message);
                teacher.assign_classes(chunk);
                log.push(LogEntry::new(LogKind::TeacherAssigned, message));
            }
        }
        log
    }

    /// Teachers of `subject` with budget left, in roster order.
    pub fn with_budget<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = TeacherId> + 'a {
        self.teachers
            .iter()
            .enumerate()
            .filter(move |(_, t)| t.teaches(subject) && t.has_budget())
            .map(|(id, _)| id)
    }

    pub fn remaining_budget(&self, id: TeacherId) -> u32 {
        self.teachers[id].remaining_budget()
    }

    pub fn taught_today(&self, id: TeacherId, day: Day) -> u32 {
        self.teachers[id].taught_today(day)
    }

    /// Whether the teacher is free at the slot and under the daily cap.
    pub fn can_take(&self, id: TeacherId, day: Day, hour: Hour) -> bool {
        let teacher = &self.teachers[id];
        teacher.is_available(day, hour) && teacher.can_teach_today(day)
    }

    pub fn consume_hour(
        &mut self,
        id: TeacherId,
        day: Day,
        hour: Hour,
    ) -> Result<(), TeacherError> {
        self.teachers[id].consume_hour(day, hour)
    }

    pub fn reports(&self) -> Vec<TeacherReport> {
        self.teachers.iter().map(Teacher::report).collect()
    }
}

/// Contiguous near-equal chunks of `classes`, one per teacher. The first
/// `len % teachers` chunks hold one extra class.
pub fn distribute_classes(classes: &[String], teachers: usize) -> Vec<Vec<String>> {
    if teachers == 0 {
        return Vec::new();
    }
    let base = classes.len() / teachers;
    let extra = classes.len() % teachers;
    let mut start = 0;
    (0..teachers)
        .map(|i| {
            let size = base + usize::from(i < extra);
            let chunk = classes[start..start + size].to_vec();
            start += size;
            chunk
        })
        .collect()
}
