//! Input checks run before any placement.
//!
//! Every problem is collected so a caller sees the full list at once.

use std::collections::HashSet;
use thiserror::Error;

use crate::data::TimetableInput;

/// Upper bound on `days_per_week * hours_per_day` for one grid.
pub const MAX_GRID_CELLS: u32 = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("hours per day and days per week must be positive")]
    EmptyGrid,
    #[error("class #{index} has an empty name")]
    EmptyClassName { index: usize },
    #[error("class {0} is listed more than once")]
    DuplicateClass(String),
    #[error("class {class} has a subject with an empty name")]
    EmptySubjectName { class: String },
    #[error("class {class} lists subject {subject} more than once")]
    DuplicateSubject { class: String, subject: String },
    #[error("class {class} needs zero hours of {subject}")]
    ZeroSubjectHours { class: String, subject: String },
    #[error("lab #{index} has an empty name")]
    EmptyLabName { index: usize },
    #[error("lab block length must be between 1 and {hours_per_day}, got {length}")]
    InvalidLabBlock { length: u32, hours_per_day: u32 },
    #[error("teacher #{index} has an empty name")]
    EmptyTeacherName { index: usize },
    #[error("teacher {teacher} has no subject")]
    EmptyTeacherSubject { teacher: String },
    #[error("teacher {teacher} has zero teaching hours")]
    ZeroTeachingHours { teacher: String },
    #[error("teacher {teacher} is unavailable at hour {hour} on {day}, outside a {hours_per_day}-hour day")]
    UnavailableHourOutOfRange {
        teacher: String,
        day: String,
        hour: u32,
        hours_per_day: u32,
    },
    #[error("a {days}x{hours} week exceeds the limit of {max} periods")]
    GridTooLarge { days: u32, hours: u32, max: u32 },
    #[error("lunch hour {hour} is outside a {hours_per_day}-hour day")]
    LunchHourOutOfRange { hour: u32, hours_per_day: u32 },
    #[error("max attempts must be positive")]
    ZeroAttempts,
}

/// Validates the input of one timetable run.
pub fn validate_input(input: &TimetableInput) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if input.hours_per_day == 0 || input.days_per_week == 0 {
        errors.push(ValidationError::EmptyGrid);
    }
    let cells = input.days_per_week.checked_mul(input.hours_per_day);
    if cells.is_none_or(|cells| cells > MAX_GRID_CELLS) {
        errors.push(ValidationError::GridTooLarge {
            days: input.days_per_week,
            hours: input.hours_per_day,
            max: MAX_GRID_CELLS,
        });
    }

    let mut class_names = HashSet::new();
    for (index, class) in input.classes.iter().enumerate() {
        let name = class.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::EmptyClassName { index });
        } else if !class_names.insert(name) {
            errors.push(ValidationError::DuplicateClass(name.to_string()));
        }

        let mut subjects = HashSet::new();
        for requirement in &class.subjects {
            let subject = requirement.subject.trim();
            if subject.is_empty() {
                errors.push(ValidationError::EmptySubjectName {
                    class: class.name.clone(),
                });
                continue;
            }
            if !subjects.insert(subject) {
                errors.push(ValidationError::DuplicateSubject {
                    class: class.name.clone(),
                    subject: subject.to_string(),
                });
            }
            if requirement.hours == 0 {
                errors.push(ValidationError::ZeroSubjectHours {
                    class: class.name.clone(),
                    subject: subject.to_string(),
                });
            }
        }
    }

    for (index, lab) in input.labs.iter().enumerate() {
        if lab.trim().is_empty() {
            errors.push(ValidationError::EmptyLabName { index });
        }
    }
    if !input.labs.is_empty()
        && (input.lab_block_length == 0 || input.lab_block_length > input.hours_per_day)
    {
        errors.push(ValidationError::InvalidLabBlock {
            length: input.lab_block_length,
            hours_per_day: input.hours_per_day,
        });
    }

    for (index, teacher) in input.teachers.iter().enumerate() {
        if teacher.name.trim().is_empty() {
            errors.push(ValidationError::EmptyTeacherName { index });
        }
        if teacher.subject.trim().is_empty() {
            errors.push(ValidationError::EmptyTeacherSubject {
                teacher: teacher.name.clone(),
            });
        }
        if teacher.teaching_hours == 0 {
            errors.push(ValidationError::ZeroTeachingHours {
                teacher: teacher.name.clone(),
            });
        }
        for (day, hours) in &teacher.unavailable {
            for &hour in hours.iter().filter(|&&h| h >= input.hours_per_day) {
                errors.push(ValidationError::UnavailableHourOutOfRange {
                    teacher: teacher.name.clone(),
                    day: format!("{:?}", day),
                    hour,
                    hours_per_day: input.hours_per_day,
                });
            }
        }
    }

    if let Some(hour) = input.config.lunch_hour {
        if input.hours_per_day > 0 && hour >= input.hours_per_day {
            errors.push(ValidationError::LunchHourOutOfRange {
                hour,
                hours_per_day: input.hours_per_day,
            });
        }
    }

    if input.config.max_attempts == 0 {
        errors.push(ValidationError::ZeroAttempts);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlacementConfig;
    use crate::data::{ClassRequirements, SubjectHours, TeacherInput, Weekday};
    use std::collections::BTreeMap;

    fn valid_input() -> TimetableInput {
        TimetableInput {
            classes: vec![ClassRequirements {
                name: "10A".into(),
                subjects: vec![SubjectHours {
                    subject: "Math".into(),
                    hours: 2,
                }],
            }],
            labs: vec!["Chem".into()],
            lab_block_length: 2,
            teachers: vec![TeacherInput {
                name: "Alice".into(),
                subject: "Math".into(),
                teaching_hours: 10,
                unavailable: BTreeMap::from([(Weekday::Monday, vec![0, 5])]),
            }],
            hours_per_day: 6,
            days_per_week: 5,
            config: PlacementConfig::default(),
        }
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&valid_input()).is_ok());
    }

    #[test]
    fn test_duplicate_and_empty_classes() {
        let mut input = valid_input();
        let mut copy = input.classes[0].clone();
        input.classes.push(copy.clone());
        copy.name = "  ".into();
        input.classes.push(copy);
        let errors = validate_input(&input).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::DuplicateClass("10A".into()),
                ValidationError::EmptyClassName { index: 2 },
            ]
        );
    }

    #[test]
    fn test_subject_problems() {
        let mut input = valid_input();
        input.classes[0].subjects.push(SubjectHours {
            subject: "Math".into(),
            hours: 0,
        });
        input.classes[0].subjects.push(SubjectHours {
            subject: "".into(),
            hours: 1,
        });
        let errors = validate_input(&input).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroSubjectHours {
            class: "10A".into(),
            subject: "Math".into()
        }));
    }

    #[test]
    fn test_lab_block_longer_than_day() {
        let mut input = valid_input();
        input.lab_block_length = 7;
        let errors = validate_input(&input).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidLabBlock {
                length: 7,
                hours_per_day: 6
            }]
        );

        // irrelevant without labs
        input.labs.clear();
        assert!(validate_input(&input).is_ok());
    }

    #[test]
    fn test_unavailable_hour_out_of_range() {
        let mut input = valid_input();
        input.teachers[0]
            .unavailable
            .insert(Weekday::Friday, vec![6]);
        let errors = validate_input(&input).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "teacher Alice is unavailable at hour 6 on Friday, outside a 6-hour day"
        );
    }

    #[test]
    fn test_lunch_hour_outside_day() {
        let mut input = valid_input();
        input.config.lunch_hour = Some(99);
        assert_eq!(
            validate_input(&input).unwrap_err(),
            vec![ValidationError::LunchHourOutOfRange {
                hour: 99,
                hours_per_day: 6
            }]
        );

        input.config.lunch_hour = Some(5);
        assert!(validate_input(&input).is_ok());
        input.config.lunch_hour = None;
        assert!(validate_input(&input).is_ok());
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let mut input = valid_input();
        input.teachers[0].unavailable.clear();
        input.hours_per_day = 65_536;
        input.days_per_week = 65_536;
        let errors = validate_input(&input).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::GridTooLarge {
                days: 65_536,
                hours: 65_536,
                max: MAX_GRID_CELLS
            }]
        );

        input.hours_per_day = 4_000_000_000;
        input.days_per_week = 1;
        assert!(matches!(
            validate_input(&input).unwrap_err()[0],
            ValidationError::GridTooLarge { .. }
        ));

        input.hours_per_day = 10;
        input.days_per_week = 6;
        assert!(validate_input(&input).is_ok());
    }

    #[test]
    fn test_teacher_and_grid_problems() {
        let mut input = valid_input();
        input.hours_per_day = 0;
        input.labs.clear();
        input.teachers[0].teaching_hours = 0;
        input.teachers[0].subject = " ".into();
        input.teachers[0].unavailable.clear();
        input.config.max_attempts = 0;
        let errors = validate_input(&input).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyGrid,
                ValidationError::EmptyTeacherSubject {
                    teacher: "Alice".into()
                },
                ValidationError::ZeroTeachingHours {
                    teacher: "Alice".into()
                },
                ValidationError::ZeroAttempts,
            ]
        );
    }
}
