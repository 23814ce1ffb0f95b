use thiserror::Error;

use crate::data::{Day, Hour};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("slot (day {day}, hour {hour}) is outside the grid")]
    OutOfBounds { day: Day, hour: Hour },
    #[error("slot (day {day}, hour {hour}) is already taken by {occupant}")]
    SlotOccupied {
        day: Day,
        hour: Hour,
        occupant: String,
    },
}

/// The week of one class: `days` rows of `hours` periods.
#[derive(Debug, Clone)]
pub struct TimeGrid {
    days: u32,
    hours: u32,
    cells: Vec<Option<String>>,
}

impl TimeGrid {
    pub fn new(days: u32, hours: u32) -> Self {
        Self {
            days,
            hours,
            cells: vec![None; (days * hours) as usize],
        }
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    fn index(&self, day: Day, hour: Hour) -> Result<usize, GridError> {
        if day >= self.days || hour >= self.hours {
            return Err(GridError::OutOfBounds { day, hour });
        }
        Ok((day * self.hours + hour) as usize)
    }

    pub fn occupant(&self, day: Day, hour: Hour) -> Option<&str> {
        self.index(day, hour)
            .ok()
            .and_then(|i| self.cells[i].as_deref())
    }

    /// Out-of-grid slots are never empty.
    pub fn is_empty(&self, day: Day, hour: Hour) -> bool {
        self.index(day, hour)
            .map(|i| self.cells[i].is_none())
            .unwrap_or(false)
    }

    /// Writes `occupant` into a free slot. Cells are never overwritten.
    pub fn set(&mut self, day: Day, hour: Hour, occupant: &str) -> Result<(), GridError> {
        let i = self.index(day, hour)?;
        if let Some(existing) = &self.cells[i] {
            return Err(GridError::SlotOccupied {
                day,
                hour,
                occupant: existing.clone(),
            });
        }
        self.cells[i] = Some(occupant.to_string());
        Ok(())
    }

    /// Number of periods on `day` held by `occupant`.
    pub fn count(&self, day: Day, occupant: &str) -> usize {
        (0..self.hours)
            .filter(|&hour| self.occupant(day, hour) == Some(occupant))
            .count()
    }

    /// Length of the run of `occupant` ending right before `hour`.
    pub fn run_before(&self, day: Day, hour: Hour, occupant: &str) -> u32 {
        (0..hour)
            .rev()
            .take_while(|&h| self.occupant(day, h) == Some(occupant))
            .count() as u32
    }

    /// Length of the run of `occupant` starting right after `hour`.
    pub fn run_after(&self, day: Day, hour: Hour, occupant: &str) -> u32 {
        (hour + 1..self.hours)
            .take_while(|&h| self.occupant(day, h) == Some(occupant))
            .count() as u32
    }

    pub fn is_block_free(&self, day: Day, start: Hour, len: u32) -> bool {
        start + len <= self.hours && (start..start + len).all(|hour| self.is_empty(day, hour))
    }

    /// Fills `[start, start + len)` on `day`; nothing is written unless the whole block is free.
    pub fn fill_block(
        &mut self,
        day: Day,
        start: Hour,
        len: u32,
        occupant: &str,
    ) -> Result<(), GridError> {
        for hour in start..start + len {
            let i = self.index(day, hour)?;
            if let Some(existing) = &self.cells[i] {
                return Err(GridError::SlotOccupied {
                    day,
                    hour,
                    occupant: existing.clone(),
                });
            }
        }
        for hour in start..start + len {
            self.set(day, hour, occupant)?;
        }
        Ok(())
    }

    /// Rows per day, for output.
    pub fn into_rows(self) -> Vec<Vec<Option<String>>> {
        let hours = self.hours.max(1) as usize;
        self.cells.chunks(hours).map(|row| row.to_vec()).collect()
    }
}
