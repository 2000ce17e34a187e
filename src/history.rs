//! History consolidator and earnings reports.
//!
//! Everything here is a read model: sessions and payroll records are merged
//! per date for display, and payroll records are totalled per employee.
//! Nothing is written back to the store.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{
    DayStatus, EarningsSummary, HistoryRow, PayrollOverview, PayrollRecord, SESSION_SLOTS, Session,
    SessionSlot, normalize_employee_id,
};
use crate::store::{RecordFilter, RecordStore};

#[derive(Default)]
struct DayEntries<'a> {
    sessions: Vec<&'a Session>,
    payroll: Option<&'a PayrollRecord>,
}

/// Builds the consolidated, date-descending history of one employee.
///
/// Within a date, sessions fill the `first`, `second` and `third` slots in
/// creation order, regardless of their start times. A date that has a
/// payroll record but no sessions still gets a row.
///
/// # Examples
///
/// ```
/// use paytrack_engine::history::consolidate_history;
/// use paytrack_engine::store::InMemoryStore;
/// use paytrack_engine::tracker::punch_in;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let store = InMemoryStore::new();
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// punch_in(&store, "u001", date, NaiveTime::from_hms_opt(9, 0, 0).unwrap()).unwrap();
///
/// let rows = consolidate_history(&store, "u001").unwrap();
/// assert_eq!(rows.len(), 1);
/// assert!(!rows[0].status.is_finalized());
/// ```
pub fn consolidate_history(
    store: &dyn RecordStore,
    employee_id: &str,
) -> EngineResult<Vec<HistoryRow>> {
    let filter = RecordFilter::employee(employee_id);
    let sessions = store.list_sessions(&filter)?;
    let payroll = store.list_payroll_records(&filter)?;

    let mut days: BTreeMap<NaiveDate, DayEntries<'_>> = BTreeMap::new();
    for session in &sessions {
        days.entry(session.date).or_default().sessions.push(session);
    }
    for record in &payroll {
        let entry = days.entry(record.date).or_default();
        // Keep the first record if the store ever held duplicates.
        if entry.payroll.is_none() {
            entry.payroll = Some(record);
        }
    }

    Ok(days
        .into_iter()
        .rev()
        .map(|(date, entries)| build_row(date, entries))
        .collect())
}

fn build_row(date: NaiveDate, entries: DayEntries<'_>) -> HistoryRow {
    let mut slots = entries
        .sessions
        .iter()
        .take(SESSION_SLOTS)
        .map(|s| SessionSlot::from(*s));
    let status = match entries.payroll {
        Some(record) => DayStatus::Finalized {
            total_pay: record.total_pay,
        },
        None => DayStatus::Pending,
    };

    HistoryRow {
        date,
        first: slots.next(),
        second: slots.next(),
        third: slots.next(),
        session_count: entries.sessions.len(),
        status,
    }
}

/// Totals every finalized day of one employee.
pub fn earnings_summary(
    store: &dyn RecordStore,
    employee_id: &str,
) -> EngineResult<EarningsSummary> {
    let employee_id = normalize_employee_id(employee_id);
    let records = store.list_payroll_records(&RecordFilter::employee(employee_id))?;

    let mut summary = EarningsSummary::empty(employee_id);
    for record in &records {
        summary.add(record);
    }
    Ok(summary)
}

/// Collects every payroll record with per-employee totals.
pub fn payroll_overview(store: &dyn RecordStore) -> EngineResult<PayrollOverview> {
    let records = store.list_payroll_records(&RecordFilter::all())?;

    let mut per_employee: BTreeMap<&str, EarningsSummary> = BTreeMap::new();
    for record in &records {
        let id = normalize_employee_id(&record.employee_id);
        per_employee
            .entry(id)
            .or_insert_with(|| EarningsSummary::empty(id))
            .add(record);
    }

    let employees: Vec<EarningsSummary> = per_employee.into_values().collect();
    let grand_total: Decimal = records.iter().map(|r| r.total_pay).sum();

    Ok(PayrollOverview {
        records,
        employees,
        grand_total,
    })
}
