use log::trace;
use rand::Rng;

use crate::config::PlacementConfig;
use crate::data::{Day, Hour};
use crate::grid::{GridError, TimeGrid};

/// Where a lab block landed: `len` periods from `start` on `day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabBlock {
    pub day: Day,
    pub start: Hour,
    pub len: u32,
}

impl LabBlock {
    pub fn last_hour(&self) -> Hour {
        self.start + self.len - 1
    }
}

/// Draws random blocks until one is free and clear of lunch, then fills it.
///
/// Returns `Ok(None)` once `max_attempts` draws were rejected, or right away
/// when the block cannot fit in a day at all.
pub fn place_lab<R: Rng>(
    grid: &mut TimeGrid,
    lab: &str,
    len: u32,
    config: &PlacementConfig,
    rng: &mut R,
) -> Result<Option<LabBlock>, GridError> {
    if len == 0 || len > grid.hours() || grid.days() == 0 {
        return Ok(None);
    }
    for attempt in 0..config.max_attempts {
        let day = rng.gen_range(0..grid.days());
        let start = rng.gen_range(0..=grid.hours() - len);

        if !config.block_avoids_lunch(start, len) || !grid.is_block_free(day, start, len) {
            continue;
        }
        grid.fill_block(day, start, len, lab)?;
        trace!("Lab {} placed after {} draws", lab, attempt + 1);
        return Ok(Some(LabBlock { day, start, len }));
    }
    Ok(None)
}
