use log::trace;
use rand::Rng;

use crate::config::{PlacementConfig, TeacherSelection};
use crate::data::{Day, Hour};
use crate::grid::TimeGrid;
use crate::pool::{TeacherId, TeacherPool};
use crate::solver::SolveError;

/// A placed subject period and the teacher charged for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectSlot {
    pub day: Day,
    pub hour: Hour,
    pub teacher: TeacherId,
}

/// Teachers that may take `subject` in `class_name`, in roster order.
pub fn eligible_teachers(
    pool: &TeacherPool,
    class_name: &str,
    subject: &str,
    config: &PlacementConfig,
) -> Vec<TeacherId> {
    pool.with_budget(subject)
        .filter(|&id| match config.teacher_selection {
            TeacherSelection::Balanced => pool.get(id).is_assigned_to(class_name),
            TeacherSelection::FirstAvailable => true,
        })
        .collect()
}

/// Whether `subject` may go into (day, hour) of this class's grid.
pub fn fits_subject(
    grid: &TimeGrid,
    day: Day,
    hour: Hour,
    subject: &str,
    config: &PlacementConfig,
) -> bool {
    if config.is_lunch(hour) || !grid.is_empty(day, hour) {
        return false;
    }
    if grid.count(day, subject) as u32 >= config.subject_daily_cap {
        return false;
    }
    // run this period would join, including itself
    let run = grid.run_before(day, hour, subject) + 1 + grid.run_after(day, hour, subject);
    run <= config.max_consecutive
}

fn select_teacher(
    pool: &TeacherPool,
    eligible: &[TeacherId],
    day: Day,
    hour: Hour,
    config: &PlacementConfig,
) -> Option<TeacherId> {
    if config.enforce_teacher_limits {
        eligible
            .iter()
            .copied()
            .find(|&id| pool.can_take(id, day, hour))
    } else {
        eligible.first().copied()
    }
}

/// Places one period of `subject` at a random valid slot and charges a teacher.
///
/// Returns `Ok(None)` when no slot was accepted within `max_attempts` draws.
pub fn place_subject_hour<R: Rng>(
    grid: &mut TimeGrid,
    pool: &mut TeacherPool,
    eligible: &[TeacherId],
    subject: &str,
    config: &PlacementConfig,
    rng: &mut R,
) -> Result<Option<SubjectSlot>, SolveError> {
    if grid.days() == 0 || grid.hours() == 0 {
        return Ok(None);
    }
    for attempt in 0..config.max_attempts {
        let day = rng.gen_range(0..grid.days());
        let hour = rng.gen_range(0..grid.hours());

        if !fits_subject(grid, day, hour, subject, config) {
            continue;
        }
        let Some(teacher) = select_teacher(pool, eligible, day, hour, config) else {
            continue;
        };
        grid.set(day, hour, subject)?;
        pool.consume_hour(teacher, day, hour)?;
        trace!("{} placed after {} draws", subject, attempt + 1);
        return Ok(Some(SubjectSlot { day, hour, teacher }));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teacher::Teacher;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn single_teacher_pool(budget: u32) -> TeacherPool {
        TeacherPool::new(vec![Teacher::new("Alice", "Math", 5, 6, budget, 3)])
    }

    #[test]
    fn test_fits_subject_rejects_lunch_and_taken() {
        let config = PlacementConfig::default();
        let mut grid = TimeGrid::new(5, 6);
        grid.set(0, 0, "Art").unwrap();
        assert!(!fits_subject(&grid, 0, 4, "Math", &config));
        assert!(!fits_subject(&grid, 0, 0, "Math", &config));
        assert!(fits_subject(&grid, 0, 1, "Math", &config));
    }

    #[test]
    fn test_fits_subject_daily_cap() {
        let config = PlacementConfig::default();
        let mut grid = TimeGrid::new(5, 8);
        grid.set(2, 0, "Math").unwrap();
        grid.set(2, 6, "Math").unwrap();
        assert!(!fits_subject(&grid, 2, 2, "Math", &config));
        assert!(fits_subject(&grid, 3, 2, "Math", &config));
    }

    #[test]
    fn test_fits_subject_consecutive_limit() {
        let config = PlacementConfig {
            subject_daily_cap: 5,
            ..PlacementConfig::default()
        };
        let mut grid = TimeGrid::new(1, 8);
        grid.set(0, 0, "Math").unwrap();
        grid.set(0, 1, "Math").unwrap();
        assert!(!fits_subject(&grid, 0, 2, "Math", &config));

        grid.set(0, 6, "Math").unwrap();
        grid.set(0, 7, "Art").unwrap();
        assert!(fits_subject(&grid, 0, 5, "Math", &config));

        // periods already following the slot count towards the run
        let mut grid = TimeGrid::new(1, 8);
        grid.set(0, 6, "Math").unwrap();
        grid.set(0, 7, "Math").unwrap();
        assert!(!fits_subject(&grid, 0, 5, "Math", &config));
    }

    #[test]
    fn test_place_charges_first_teacher() {
        let config = PlacementConfig::default();
        let mut rng = StdRng::seed_from_u64(9);
        let mut grid = TimeGrid::new(5, 6);
        let mut pool = TeacherPool::new(vec![
            Teacher::new("Alice", "Math", 5, 6, 4, 3),
            Teacher::new("Dan", "Math", 5, 6, 4, 3),
        ]);
        let slot = place_subject_hour(&mut grid, &mut pool, &[0, 1], "Math", &config, &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(slot.teacher, 0);
        assert_ne!(slot.hour, 4);
        assert_eq!(grid.occupant(slot.day, slot.hour), Some("Math"));
        assert_eq!(pool.remaining_budget(0), 3);
        assert_eq!(pool.remaining_budget(1), 4);
    }

    #[test]
    fn test_unavailable_teacher_is_never_booked() {
        let config = PlacementConfig::default();
        let mut rng = StdRng::seed_from_u64(21);
        let mut teacher = Teacher::new("Alice", "Math", 1, 6, 10, 3);
        for hour in [0, 1, 2, 3] {
            teacher.mark_unavailable(0, hour);
        }
        let mut pool = TeacherPool::new(vec![teacher]);
        let mut grid = TimeGrid::new(1, 6);
        let slot = place_subject_hour(&mut grid, &mut pool, &[0], "Math", &config, &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(slot.hour, 5);
    }

    #[test]
    fn test_lax_mode_ignores_availability() {
        let config = PlacementConfig {
            enforce_teacher_limits: false,
            ..PlacementConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(21);
        let mut teacher = Teacher::new("Alice", "Math", 1, 6, 10, 3);
        for hour in 0..6 {
            teacher.mark_unavailable(0, hour);
        }
        let mut pool = TeacherPool::new(vec![teacher]);
        let mut grid = TimeGrid::new(1, 6);
        assert!(
            place_subject_hour(&mut grid, &mut pool, &[0], "Math", &config, &mut rng)
                .unwrap()
                .is_some()
        );
    }

    #[test]
    fn test_no_valid_slot_fails_after_bound() {
        let config = PlacementConfig {
            max_attempts: 300,
            ..PlacementConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(2);
        let mut grid = TimeGrid::new(1, 5);
        for hour in 0..4 {
            grid.set(0, hour, "Art").unwrap();
        }
        let mut pool = single_teacher_pool(5);
        assert_eq!(
            place_subject_hour(&mut grid, &mut pool, &[0], "Math", &config, &mut rng).unwrap(),
            None
        );
        assert_eq!(pool.remaining_budget(0), 5);
    }

    #[test]
    fn test_eligible_teachers_by_policy() {
        let mut pool = TeacherPool::new(vec![
            Teacher::new("Alice", "Math", 5, 6, 4, 3),
            Teacher::new("Dan", "Math", 5, 6, 4, 3),
        ]);
        pool.balance(&["9A".to_string(), "9B".to_string()]);

        let balanced = PlacementConfig::default();
        assert_eq!(eligible_teachers(&pool, "9B", "Math", &balanced), vec![1]);

        let first = PlacementConfig {
            teacher_selection: TeacherSelection::FirstAvailable,
            ..PlacementConfig::default()
        };
        assert_eq!(eligible_teachers(&pool, "9B", "Math", &first), vec![0, 1]);
        assert!(eligible_teachers(&pool, "9B", "Art", &first).is_empty());
    }
}
