//! Weekly school timetable generation.
//!
//! Places lab blocks and subject periods into one grid per class by
//! randomized retry, under lunch, daily-cap, consecutive-period and teacher
//! load rules. [`solver::solve`] is the entry point; [`server`] exposes it
//! over HTTP.

pub mod config;
pub mod data;
pub mod grid;
pub mod labs;
pub mod pool;
pub mod server;
pub mod solver;
pub mod subjects;
pub mod teacher;
pub mod validation;

pub use config::{PlacementConfig, TeacherSelection};
pub use data::{TimetableInput, TimetableOutput};
pub use solver::{SolveError, solve, solve_with_rng};
