//! PayTrack attendance and payroll engine
//!
//! This crate records punch-in/punch-out work sessions per employee and
//! date, finalizes a day's sessions into a payroll record with a daily
//! overtime split, and consolidates sessions and payroll into a per-date
//! history. An axum HTTP API exposes the same operations.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod context;
pub mod error;
pub mod finalizer;
pub mod history;
pub mod models;
pub mod service;
pub mod store;
pub mod tracker;
