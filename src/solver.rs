use crate::config::PlacementConfig;
use crate::data::{
    ClassTimetable, LogEntry, LogKind, PlacementFailure, PlacementTarget, SubjectOutcome,
    TimetableInput, TimetableOutput,
};
use crate::grid::{GridError, TimeGrid};
use crate::labs::place_lab;
use crate::pool::TeacherPool;
use crate::subjects::{eligible_teachers, place_subject_hour};
use crate::teacher::TeacherError;
use crate::validation::{ValidationError, validate_input};
use itertools::Itertools;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("invalid input: {}", .0.iter().join("; "))]
    InvalidInput(Vec<ValidationError>),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Teacher(#[from] TeacherError),
}

/// Builds a timetable for every class: labs first, then subjects.
///
/// Seeded from `config.seed` when set, otherwise from entropy.
pub fn solve(input: &TimetableInput) -> Result<TimetableOutput, SolveError> {
    let mut rng = match input.config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    solve_with_rng(input, &mut rng)
}

pub fn solve_with_rng<R: Rng>(
    input: &TimetableInput,
    rng: &mut R,
) -> Result<TimetableOutput, SolveError> {
    validate_input(input).map_err(SolveError::InvalidInput)?;
    let start_time = Instant::now();
    info!(
        "Generating timetables for {} classes, {} labs and {} teachers on a {}x{} week...",
        input.classes.len(),
        input.labs.len(),
        input.teachers.len(),
        input.days_per_week,
        input.hours_per_day
    );

    let mut run = Run::new(input, rng);
    run.balance_teachers();
    run.assign_labs()?;
    run.assign_subjects()?;
    let output = run.finish();

    info!(
        "Timetables generated in {:.2?} with {} failed placements",
        start_time.elapsed(),
        output.failures.len()
    );
    Ok(output)
}

/// Mutable state of one generation run.
struct Run<'a, R> {
    input: &'a TimetableInput,
    config: &'a PlacementConfig,
    rng: &'a mut R,
    class_names: Vec<String>,
    grids: Vec<TimeGrid>,
    pool: TeacherPool,
    log: Vec<LogEntry>,
    subjects: Vec<SubjectOutcome>,
    failures: Vec<PlacementFailure>,
}

impl<'a, R: Rng> Run<'a, R> {
    fn new(input: &'a TimetableInput, rng: &'a mut R) -> Self {
        let config = &input.config;
        let (days, hours) = (input.days_per_week, input.hours_per_day);
        Self {
            input,
            config,
            rng,
            class_names: input.classes.iter().map(|c| c.name.clone()).collect(),
            grids: input
                .classes
                .iter()
                .map(|_| TimeGrid::new(days, hours))
                .collect(),
            pool: TeacherPool::from_inputs(&input.teachers, days, hours, config.teacher_daily_cap),
            log: Vec::new(),
            subjects: Vec::new(),
            failures: Vec::new(),
        }
    }

    fn balance_teachers(&mut self) {
        let entries = self.pool.balance(&self.class_names);
        self.log.extend(entries);
    }

    fn record(&mut self, kind: LogKind, message: String) {
        match kind {
            LogKind::SubjectUnassignable | LogKind::PlacementFailed => warn!("{}", message),
            _ => info!("{}", message),
        }
        self.log.push(LogEntry::new(kind, message));
    }

    fn assign_labs(&mut self) -> Result<(), SolveError> {
        let input = self.input;
        let len = input.lab_block_length;
        for lab in &input.labs {
            for (class_name, grid) in self.class_names.iter().zip(self.grids.iter_mut()) {
                match place_lab(grid, lab, len, self.config, self.rng)? {
                    Some(block) => {
                        let message = format!(
                            "Assigned lab {} to {} on Day {}, hours {}-{}",
                            lab,
                            class_name,
                            block.day + 1,
                            block.start,
                            block.last_hour()
                        );
                        info!("{}", message);
                        self.log.push(LogEntry::new(LogKind::LabPlaced, message));
                    }
                    None => {
                        let reason = format!(
                            "no free {}-hour block clear of lunch after {} attempts",
                            len, self.config.max_attempts
                        );
                        let message =
                            format!("Could not place lab {} for {}: {}", lab, class_name, reason);
                        warn!("{}", message);
                        self.log.push(LogEntry::new(LogKind::PlacementFailed, message));
                        self.failures.push(PlacementFailure {
                            class_name: class_name.clone(),
                            target: PlacementTarget::Lab { lab: lab.clone() },
                            unplaced_hours: len,
                            reason,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn assign_subjects(&mut self) -> Result<(), SolveError> {
        let input = self.input;
        for (index, class) in input.classes.iter().enumerate() {
            for requirement in &class.subjects {
                let placed = self.assign_subject(index, &requirement.subject, requirement.hours)?;
                self.subjects.push(SubjectOutcome {
                    class_name: class.name.clone(),
                    subject: requirement.subject.clone(),
                    required: requirement.hours,
                    placed,
                });
            }
        }
        Ok(())
    }

    /// Places up to `required` periods of `subject`; returns how many landed.
    fn assign_subject(
        &mut self,
        class_index: usize,
        subject: &str,
        required: u32,
    ) -> Result<u32, SolveError> {
        let class_name = self.class_names[class_index].clone();
        let mut remaining = required;
        while remaining > 0 {
            // recomputed each hour: a teacher drops out once drained
            let eligible = eligible_teachers(&self.pool, &class_name, subject, self.config);
            if eligible.is_empty() {
                self.record(
                    LogKind::SubjectUnassignable,
                    format!(
                        "No available teachers for subject {} in class {}. Cannot assign {} remaining hours.",
                        subject, class_name, remaining
                    ),
                );
                break;
            }

            let grid = &mut self.grids[class_index];
            let placed = place_subject_hour(
                grid,
                &mut self.pool,
                &eligible,
                subject,
                self.config,
                self.rng,
            )?;
            match placed {
                Some(slot) => {
                    remaining -= 1;
                    let teacher = self.pool.get(slot.teacher).name().to_string();
                    self.record(
                        LogKind::SubjectPlaced,
                        format!(
                            "Assigned {} to {} on Day {}, Hour {} (teacher {})",
                            subject,
                            class_name,
                            slot.day + 1,
                            slot.hour,
                            teacher
                        ),
                    );
                }
                None => {
                    let reason = format!(
                        "no valid slot found after {} attempts",
                        self.config.max_attempts
                    );
                    self.record(
                        LogKind::PlacementFailed,
                        format!(
                            "Could not place {} for {}: {}, {} hours left unplaced",
                            subject, class_name, reason, remaining
                        ),
                    );
                    self.failures.push(PlacementFailure {
                        class_name: class_name.clone(),
                        target: PlacementTarget::Subject {
                            subject: subject.to_string(),
                        },
                        unplaced_hours: remaining,
                        reason,
                    });
                    break;
                }
            }
        }
        Ok(required - remaining)
    }

    fn finish(self) -> TimetableOutput {
        let timetables = self
            .class_names
            .into_iter()
            .zip(self.grids)
            .map(|(class_name, grid)| ClassTimetable {
                class_name,
                grid: grid.into_rows(),
            })
            .collect();
        TimetableOutput {
            timetables,
            log: self.log,
            subjects: self.subjects,
            teachers: self.pool.reports(),
            failures: self.failures,
        }
    }
}
