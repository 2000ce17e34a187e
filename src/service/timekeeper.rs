//! The engine's entry point for callers acting on behalf of an employee.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use tracing::info;

use crate::calculation::validate_rates;
use crate::config::PayrollConfig;
use crate::context::RequestContext;
use crate::error::{EngineError, EngineResult};
use crate::finalizer::{FinalizedShift, finalize_shift};
use crate::history::{consolidate_history, earnings_summary, payroll_overview};
use crate::models::{
    EarningsSummary, Employee, HistoryRow, PayrollOverview, Role, Session, normalize_employee_id,
};
use crate::store::RecordStore;
use crate::tracker::{punch_in, punch_out, sessions_for_day};

use super::day_locks::DayLocks;

/// Runs tracker, finalizer and history operations for a [`RequestContext`].
///
/// Every mutating call on an (employee, date) pair holds that pair's lock
/// for its whole read-check-write sequence, so concurrent requests for the
/// same day cannot both pass a duplicate check.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use paytrack_engine::config::PayrollConfig;
/// use paytrack_engine::service::Timekeeper;
/// use paytrack_engine::store::InMemoryStore;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let keeper = Timekeeper::new(Arc::new(InMemoryStore::new()), PayrollConfig::default());
/// keeper.register_employee("u001", "Aisha", "secret").unwrap();
/// let ctx = keeper.context_for("u001").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// keeper.punch_in(&ctx, date, NaiveTime::from_hms_opt(9, 0, 0).unwrap()).unwrap();
/// keeper.punch_out(&ctx, date, NaiveTime::from_hms_opt(17, 0, 0).unwrap()).unwrap();
/// let shift = keeper.end_shift(&ctx, date).unwrap();
/// assert_eq!(shift.record.total_pay, rust_decimal::Decimal::from(80));
/// ```
pub struct Timekeeper {
    store: Arc<dyn RecordStore>,
    policy: PayrollConfig,
    locks: DayLocks,
}

impl Timekeeper {
    /// Creates a timekeeper over `store` applying `policy`.
    pub fn new(store: Arc<dyn RecordStore>, policy: PayrollConfig) -> Self {
        Self {
            store,
            policy,
            locks: DayLocks::new(),
        }
    }

    /// Returns the record store.
    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// Returns the payroll policy.
    pub fn policy(&self) -> &PayrollConfig {
        &self.policy
    }

    /// Resolves the context of an existing employee.
    pub fn context_for(&self, actor_id: &str) -> EngineResult<RequestContext> {
        self.employee(actor_id).map(|e| RequestContext::for_employee(&e))
    }

    fn employee(&self, employee_id: &str) -> EngineResult<Employee> {
        self.store
            .get_employee(employee_id)?
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: normalize_employee_id(employee_id).to_string(),
            })
    }

    /// Registers a new worker with the policy's default rates.
    pub fn register_employee(&self, id: &str, name: &str, secret: &str) -> EngineResult<Employee> {
        let id = normalize_employee_id(id);
        if id.is_empty() {
            return Err(EngineError::InvalidEmployee {
                field: "id".to_string(),
                message: "must not be blank".to_string(),
            });
        }
        if name.trim().is_empty() {
            return Err(EngineError::InvalidEmployee {
                field: "name".to_string(),
                message: "must not be blank".to_string(),
            });
        }

        validate_rates(
            self.policy.default_hourly_rate,
            self.policy.default_overtime_multiplier,
        )?;

        let employee = Employee {
            id: id.to_string(),
            name: name.trim().to_string(),
            secret: secret.to_string(),
            role: Role::Worker,
            hourly_rate: self.policy.default_hourly_rate,
            overtime_multiplier: self.policy.default_overtime_multiplier,
        };

        if !self.store.append_employee(employee.clone())? {
            return Err(EngineError::EmployeeAlreadyExists {
                employee_id: id.to_string(),
            });
        }
        info!(employee_id = %id, "Employee registered");
        Ok(employee)
    }

    /// Opens a session for the actor.
    pub fn punch_in(
        &self,
        ctx: &RequestContext,
        date: NaiveDate,
        time_of_day: NaiveTime,
    ) -> EngineResult<Session> {
        self.locks.with_lock(&ctx.actor_id, date, || {
            punch_in(self.store(), &ctx.actor_id, date, time_of_day)
        })
    }

    /// Closes the actor's open session.
    pub fn punch_out(
        &self,
        ctx: &RequestContext,
        date: NaiveDate,
        time_of_day: NaiveTime,
    ) -> EngineResult<Session> {
        self.locks.with_lock(&ctx.actor_id, date, || {
            punch_out(self.store(), &self.policy, &ctx.actor_id, date, time_of_day)
        })
    }

    /// Lists the actor's sessions for `date`.
    pub fn day_sessions(&self, ctx: &RequestContext, date: NaiveDate) -> EngineResult<Vec<Session>> {
        sessions_for_day(self.store(), &ctx.actor_id, date)
    }

    /// Finalizes the actor's day at the actor's current rates.
    pub fn end_shift(&self, ctx: &RequestContext, date: NaiveDate) -> EngineResult<FinalizedShift> {
        let employee = self.employee(&ctx.actor_id)?;
        self.finalize(
            &ctx.actor_id,
            date,
            employee.hourly_rate,
            employee.overtime_multiplier,
        )
    }

    /// Finalizes `employee_id`'s day at explicit rates.
    pub fn finalize(
        &self,
        employee_id: &str,
        date: NaiveDate,
        hourly_rate: Decimal,
        overtime_multiplier: Decimal,
    ) -> EngineResult<FinalizedShift> {
        self.locks.with_lock(employee_id, date, || {
            finalize_shift(
                self.store(),
                &self.policy,
                employee_id,
                date,
                hourly_rate,
                overtime_multiplier,
            )
        })
    }

    /// The actor's consolidated history.
    pub fn history(&self, ctx: &RequestContext) -> EngineResult<Vec<HistoryRow>> {
        consolidate_history(self.store(), &ctx.actor_id)
    }

    /// The actor's earnings totals.
    pub fn earnings(&self, ctx: &RequestContext) -> EngineResult<EarningsSummary> {
        earnings_summary(self.store(), &ctx.actor_id)
    }

    /// All payroll with per-employee totals. Admin only.
    pub fn payroll_overview(&self, ctx: &RequestContext) -> EngineResult<PayrollOverview> {
        ctx.require_admin("view all payroll")?;
        payroll_overview(self.store())
    }

    /// Changes an employee's rate and overtime multiplier. Admin only.
    pub fn update_rates(
        &self,
        ctx: &RequestContext,
        employee_id: &str,
        hourly_rate: Decimal,
        overtime_multiplier: Decimal,
    ) -> EngineResult<Employee> {
        ctx.require_admin("update pay rates")?;
        validate_rates(hourly_rate, overtime_multiplier)?;

        if !self
            .store
            .update_employee_rates(employee_id, hourly_rate, overtime_multiplier)?
        {
            return Err(EngineError::EmployeeNotFound {
                employee_id: normalize_employee_id(employee_id).to_string(),
            });
        }
        info!(
            actor_id = %ctx.actor_id,
            employee_id = %normalize_employee_id(employee_id),
            hourly_rate = %hourly_rate,
            overtime_multiplier = %overtime_multiplier,
            "Pay rates updated"
        );
        self.employee(employee_id)
    }
}
