//! Core data models for the PayTrack engine.
//!
//! This module contains the typed entities held by the record store
//! (employees, sessions, payroll records) and the read models built on top.

mod employee;
mod history;
mod payroll_record;
mod session;

pub use employee::{Employee, Role, normalize_employee_id};
pub use history::{
    DayStatus, EarningsSummary, HistoryRow, PayrollOverview, SESSION_SLOTS, SessionSlot,
};
pub use payroll_record::PayrollRecord;
pub use session::Session;
