//! In-process record store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveTime;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayrollRecord, Session, normalize_employee_id};

use super::{RecordFilter, RecordStore};

#[derive(Debug, Default)]
struct Tables {
    employees: Vec<Employee>,
    sessions: Vec<Session>,
    payroll: Vec<PayrollRecord>,
}

/// A thread-safe [`RecordStore`] kept entirely in memory.
///
/// Each trait method takes the table lock once, so a single call is atomic.
/// The store can be switched offline with [`InMemoryStore::set_available`]
/// to exercise the `StoreUnavailable` path.
///
/// # Example
///
/// ```
/// use paytrack_engine::store::{InMemoryStore, RecordFilter, RecordStore};
///
/// let store = InMemoryStore::new();
/// assert!(store.list_sessions(&RecordFilter::all()).unwrap().is_empty());
///
/// store.set_available(false);
/// assert!(store.list_sessions(&RecordFilter::all()).is_err());
/// ```
#[derive(Debug)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    available: AtomicBool,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates an empty, available store.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            available: AtomicBool::new(true),
        }
    }

    /// Creates a store seeded with `employees`. Later duplicates of an
    /// identifier are ignored.
    pub fn with_employees(employees: impl IntoIterator<Item = Employee>) -> Self {
        let mut tables = Tables::default();
        for employee in employees {
            if !tables.employees.iter().any(|e| e.has_id(&employee.id)) {
                tables.employees.push(employee);
            }
        }
        Self {
            tables: RwLock::new(tables),
            available: AtomicBool::new(true),
        }
    }

    /// Marks the backend reachable or unreachable.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, Tables>> {
        self.ensure_available()?;
        self.tables
            .read()
            .map_err(|_| EngineError::store_unavailable("record tables poisoned"))
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, Tables>> {
        self.ensure_available()?;
        self.tables
            .write()
            .map_err(|_| EngineError::store_unavailable("record tables poisoned"))
    }

    fn ensure_available(&self) -> EngineResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(EngineError::store_unavailable("in-memory store is offline"))
        }
    }
}

impl RecordStore for InMemoryStore {
    fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.read()?.employees.clone())
    }

    fn get_employee(&self, id: &str) -> EngineResult<Option<Employee>> {
        Ok(self.read()?.employees.iter().find(|e| e.has_id(id)).cloned())
    }

    fn append_employee(&self, employee: Employee) -> EngineResult<bool> {
        let mut tables = self.write()?;
        if tables.employees.iter().any(|e| e.has_id(&employee.id)) {
            return Ok(false);
        }
        tables.employees.push(employee);
        Ok(true)
    }

    fn update_employee_rates(
        &self,
        id: &str,
        hourly_rate: Decimal,
        overtime_multiplier: Decimal,
    ) -> EngineResult<bool> {
        let mut tables = self.write()?;
        match tables.employees.iter_mut().find(|e| e.has_id(id)) {
            Some(employee) => {
                employee.hourly_rate = hourly_rate;
                employee.overtime_multiplier = overtime_multiplier;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn list_sessions(&self, filter: &RecordFilter) -> EngineResult<Vec<Session>> {
        Ok(self
            .read()?
            .sessions
            .iter()
            .filter(|s| filter.matches(&s.employee_id, s.date))
            .cloned()
            .collect())
    }

    fn append_session(&self, session: Session) -> EngineResult<Session> {
        let mut tables = self.write()?;
        debug!(session_id = %session.id, "Appending session");
        tables.sessions.push(session.clone());
        Ok(session)
    }

    fn update_session(
        &self,
        id: &str,
        end_time: NaiveTime,
        duration_hours: Decimal,
    ) -> EngineResult<bool> {
        let mut tables = self.write()?;
        match tables.sessions.iter_mut().find(|s| s.id == id) {
            Some(session) => {
                session.end_time = Some(end_time);
                session.duration_hours = Some(duration_hours);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn list_payroll_records(&self, filter: &RecordFilter) -> EngineResult<Vec<PayrollRecord>> {
        Ok(self
            .read()?
            .payroll
            .iter()
            .filter(|r| filter.matches(&r.employee_id, r.date))
            .cloned()
            .collect())
    }

    fn append_payroll_record(&self, record: PayrollRecord) -> EngineResult<bool> {
        let mut tables = self.write()?;
        let key = RecordFilter::day(&record.employee_id, record.date);
        if tables
            .payroll
            .iter()
            .any(|r| key.matches(&r.employee_id, r.date))
        {
            return Ok(false);
        }
        tables.payroll.push(record);
        Ok(true)
    }
}
