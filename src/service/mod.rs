//! Service layer combining the tracker, finalizer and history consolidator
//! behind request-scoped operations.

mod day_locks;
mod timekeeper;

pub use day_locks::DayLocks;
pub use timekeeper::Timekeeper;
