//! Request types for the PayTrack HTTP API.
//!
//! Dates and times are optional on punch and finalize requests; when absent
//! they default to the server's local clock.

use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of `POST /sessions/punch-in` and `POST /sessions/punch-out`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PunchRequest {
    /// The calendar date to record against.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// The time of day of the punch.
    #[serde(default)]
    pub time: Option<NaiveTime>,
}

impl PunchRequest {
    /// The requested date and time, filling gaps from the local clock.
    pub fn resolve(&self) -> (NaiveDate, NaiveTime) {
        let now = Local::now();
        let clock = now.time().with_nanosecond(0).unwrap_or(now.time());
        (
            self.date.unwrap_or(now.date_naive()),
            self.time.unwrap_or(clock),
        )
    }
}

/// Body of `POST /shifts/finalize`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinalizeRequest {
    /// The calendar date to finalize.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl FinalizeRequest {
    /// The requested date, or today.
    pub fn resolve(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Query of `GET /sessions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionsQuery {
    /// The calendar date to list; today when absent.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl SessionsQuery {
    /// The requested date, or today.
    pub fn resolve(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Body of `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// The requested employee identifier.
    pub id: String,
    /// The display name.
    pub name: String,
    /// The authentication secret.
    pub secret: String,
}

/// Body of `PUT /admin/employees/:id/rates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateUpdateRequest {
    /// The new hourly rate.
    pub hourly_rate: Decimal,
    /// The new overtime multiplier.
    pub overtime_multiplier: Decimal,
}
