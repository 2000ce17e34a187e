//! Per-(employee, date) mutual exclusion.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::NaiveDate;

use crate::models::normalize_employee_id;

type DayKey = (String, NaiveDate);

/// Serializes work on the same employee and date while letting unrelated
/// keys proceed in parallel.
///
/// Slots are created on demand and dropped again once no caller holds them.
#[derive(Debug, Default)]
pub struct DayLocks {
    slots: Mutex<HashMap<DayKey, Arc<Mutex<()>>>>,
}

impl DayLocks {
    /// Creates an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` while holding the lock for (`employee_id`, `date`).
    ///
    /// ```
    /// use paytrack_engine::service::DayLocks;
    /// use chrono::NaiveDate;
    ///
    /// let locks = DayLocks::new();
    /// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    /// assert_eq!(locks.with_lock("u001", date, || 42), 42);
    /// assert_eq!(locks.held_keys(), 0);
    /// ```
    pub fn with_lock<T>(&self, employee_id: &str, date: NaiveDate, f: impl FnOnce() -> T) -> T {
        let key = (normalize_employee_id(employee_id).to_string(), date);
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(key.clone()).or_default())
        };

        let result = {
            let _guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };

        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        // Two references left means the table's and ours: nobody else is waiting.
        if Arc::strong_count(&slot) == 2 {
            slots.remove(&key);
        }
        // Release our reference while the table is still locked so counts stay exact.
        drop(slot);
        drop(slots);
        result
    }

    /// Number of keys currently tracked.
    pub fn held_keys(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
