//! Banquet seating planner: turns per-group booking lists into a padded,
//! numbered seating table and backfills vacancies from a reserve pool.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod guest;
pub mod loader;
pub mod logging;
pub mod processing;
pub mod seating;
pub mod summary;

pub use config::SeatingConfig;
pub use error::{SeatingError, SeatingResult};
pub use guest::{GroupKind, GroupTag, GuestRecord, ReserveGuest};
pub use processing::{RunReport, SeatingPipeline};
pub use seating::{Seat, SeatingPlan, TableSlot};
