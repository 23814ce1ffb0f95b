use log::trace;
use thiserror::Error;

use crate::data::{Day, Hour, TeacherInput, TeacherReport};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TeacherError {
    #[error("teacher {name} has no teaching hours left")]
    BudgetExhausted { name: String },
    #[error("teacher {name} has no slot (day {day}, hour {hour})")]
    SlotOutOfRange { name: String, day: Day, hour: Hour },
}

/// A teacher's weekly state: availability, remaining budget and daily load.
#[derive(Debug, Clone)]
pub struct Teacher {
    name: String,
    subject: String,
    hours: u32,
    availability: Vec<bool>,
    remaining: u32,
    daily_hours: Vec<u32>,
    daily_cap: u32,
    assigned_classes: Vec<String>,
}

impl Teacher {
    pub fn new(
        name: impl Into<String>,
        subject: impl Into<String>,
        days: u32,
        hours: u32,
        budget: u32,
        daily_cap: u32,
    ) -> Self {
        Self {
            name: name.into(),
            subject: subject.into(),
            hours,
            availability: vec![true; (days * hours) as usize],
            remaining: budget,
            daily_hours: vec![0; days as usize],
            daily_cap,
            assigned_classes: Vec::new(),
        }
    }

    /// Builds a teacher from a roster entry with its unavailability applied.
    /// Hours outside the day are ignored.
    pub fn from_input(input: &TeacherInput, days: u32, hours: u32, daily_cap: u32) -> Self {
        let mut teacher = Self::new(
            &input.name,
            &input.subject,
            days,
            hours,
            input.teaching_hours,
            daily_cap,
        );
        for (weekday, unavailable) in &input.unavailable {
            let day = weekday.index();
            if day >= days {
                continue;
            }
            for &hour in unavailable.iter().filter(|&&h| h < hours) {
                teacher.mark_unavailable(day, hour);
            }
        }
        teacher
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn teaches(&self, subject: &str) -> bool {
        self.subject == subject
    }

    fn slot(&self, day: Day, hour: Hour) -> Option<usize> {
        (hour < self.hours && (day as usize) < self.daily_hours.len())
            .then(|| (day * self.hours + hour) as usize)
    }

    pub fn mark_unavailable(&mut self, day: Day, hour: Hour) {
        if let Some(i) = self.slot(day, hour) {
            self.availability[i] = false;
        }
    }

    pub fn is_available(&self, day: Day, hour: Hour) -> bool {
        self.slot(day, hour)
            .map(|i| self.availability[i])
            .unwrap_or(false)
    }

    pub fn can_teach_today(&self, day: Day) -> bool {
        self.taught_today(day) < self.daily_cap
    }

    pub fn taught_today(&self, day: Day) -> u32 {
        self.daily_hours.get(day as usize).copied().unwrap_or(0)
    }

    pub fn remaining_budget(&self) -> u32 {
        self.remaining
    }

    pub fn has_budget(&self) -> bool {
        self.remaining > 0
    }

    /// Charges one hour at (day, hour). The slot becomes unavailable so the
    /// teacher cannot be booked twice at the same time.
    pub fn consume_hour(&mut self, day: Day, hour: Hour) -> Result<(), TeacherError> {
        if self.remaining == 0 {
            return Err(TeacherError::BudgetExhausted {
                name: self.name.clone(),
            });
        }
        let i = self.slot(day, hour).ok_or_else(|| TeacherError::SlotOutOfRange {
            name: self.name.clone(),
            day,
            hour,
        })?;
        self.remaining -= 1;
        self.daily_hours[day as usize] += 1;
        self.availability[i] = false;
        trace!(
            "Teacher {} charged for day {} hour {}, {} hours left",
            self.name, day, hour, self.remaining
        );
        Ok(())
    }

    pub fn assigned_classes(&self) -> &[String] {
        &self.assigned_classes
    }

    pub fn is_assigned_to(&self, class_name: &str) -> bool {
        self.assigned_classes.iter().any(|c| c == class_name)
    }

    pub fn assign_classes(&mut self, classes: Vec<String>) {
        self.assigned_classes = classes;
    }

    pub fn report(&self) -> TeacherReport {
        TeacherReport {
            name: self.name.clone(),
            subject: self.subject.clone(),
            remaining_hours: self.remaining,
            daily_hours: self.daily_hours.clone(),
            assigned_classes: self.assigned_classes.clone(),
        }
    }
}
