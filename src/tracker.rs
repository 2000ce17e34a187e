//! Session tracker.
//!
//! Opens and closes work sessions. At most one session may be open per
//! employee and date; a second punch-in is refused rather than recorded.
//!
//! Callers that share a store across threads must serialize these calls per
//! (employee, date); [`Timekeeper`](crate::service::Timekeeper) does this.

use chrono::{NaiveDate, NaiveTime};
use tracing::{info, warn};

use crate::calculation::session_duration_hours;
use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Session, normalize_employee_id};
use crate::store::{RecordFilter, RecordStore};

/// Opens a new session for `employee_id` on `date` starting at `time_of_day`.
///
/// Fails with [`EngineError::AlreadyOpen`] if the employee already has an
/// open session on that date.
///
/// # Examples
///
/// ```
/// use paytrack_engine::store::InMemoryStore;
/// use paytrack_engine::tracker::punch_in;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let store = InMemoryStore::new();
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
///
/// let session = punch_in(&store, "u001", date, nine).unwrap();
/// assert!(session.is_open());
/// assert!(punch_in(&store, "u001", date, nine).is_err());
/// ```
pub fn punch_in(
    store: &dyn RecordStore,
    employee_id: &str,
    date: NaiveDate,
    time_of_day: NaiveTime,
) -> EngineResult<Session> {
    let employee_id = normalize_employee_id(employee_id);
    let sessions = store.list_sessions(&RecordFilter::day(employee_id, date))?;

    if let Some(open) = sessions.iter().find(|s| s.is_open()) {
        warn!(
            employee_id = %employee_id,
            date = %date,
            session_id = %open.id,
            "Punch-in refused, session already open"
        );
        return Err(EngineError::AlreadyOpen {
            employee_id: employee_id.to_string(),
            date,
            session_id: open.id.clone(),
        });
    }

    let session = store.append_session(Session::open(employee_id, date, time_of_day))?;
    info!(
        employee_id = %employee_id,
        date = %date,
        session_id = %session.id,
        start_time = %session.start_time,
        "Session opened"
    );
    Ok(session)
}

/// Closes the open session for `employee_id` on `date` at `time_of_day`.
///
/// The duration is computed with overnight wrap and rounded per `policy`.
/// If several sessions are open (data written before duplicates were
/// refused) the most recently created one is closed.
///
/// # Examples
///
/// ```
/// use paytrack_engine::config::PayrollConfig;
/// use paytrack_engine::store::InMemoryStore;
/// use paytrack_engine::tracker::{punch_in, punch_out};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let store = InMemoryStore::new();
/// let policy = PayrollConfig::default();
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
///
/// punch_in(&store, "u001", date, NaiveTime::from_hms_opt(9, 0, 0).unwrap()).unwrap();
/// let closed = punch_out(&store, &policy, "u001", date, NaiveTime::from_hms_opt(17, 30, 0).unwrap()).unwrap();
/// assert_eq!(closed.duration_hours, Some(Decimal::from_str("8.5").unwrap()));
/// ```
pub fn punch_out(
    store: &dyn RecordStore,
    policy: &PayrollConfig,
    employee_id: &str,
    date: NaiveDate,
    time_of_day: NaiveTime,
) -> EngineResult<Session> {
    let employee_id = normalize_employee_id(employee_id);
    let sessions = store.list_sessions(&RecordFilter::day(employee_id, date))?;

    let Some(mut session) = sessions.into_iter().rev().find(|s| s.is_open()) else {
        warn!(employee_id = %employee_id, date = %date, "Punch-out refused, nothing open");
        return Err(EngineError::NoOpenSession {
            employee_id: employee_id.to_string(),
            date,
        });
    };

    let duration = session_duration_hours(session.start_time, time_of_day, policy.rounding_dp);
    if !store.update_session(&session.id, time_of_day, duration)? {
        // Listed a moment ago but gone now: the backing table changed underneath us.
        return Err(EngineError::store_unavailable(format!(
            "session '{}' disappeared before it could be closed",
            session.id
        )));
    }

    session.end_time = Some(time_of_day);
    session.duration_hours = Some(duration);
    info!(
        employee_id = %employee_id,
        date = %date,
        session_id = %session.id,
        duration_hours = %duration,
        "Session closed"
    );
    Ok(session)
}

/// Lists every session of `employee_id` on `date` in creation order.
pub fn sessions_for_day(
    store: &dyn RecordStore,
    employee_id: &str,
    date: NaiveDate,
) -> EngineResult<Vec<Session>> {
    store.list_sessions(&RecordFilter::day(employee_id, date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_time(time_str: &str) -> NaiveTime {
        NaiveTime::parse_from_str(time_str, "%H:%M:%S").unwrap()
    }

    fn open_count(store: &InMemoryStore, employee_id: &str, date: NaiveDate) -> usize {
        sessions_for_day(store, employee_id, date)
            .unwrap()
            .iter()
            .filter(|s| s.is_open())
            .count()
    }

    #[test]
    fn test_punch_in_creates_open_session() {
        let store = InMemoryStore::new();
        let date = make_date("2026-03-02");

        let session = punch_in(&store, "u001", date, make_time("09:00:00")).unwrap();

        assert!(session.is_open());
        assert_eq!(session.employee_id, "u001");
        assert_eq!(session.start_time, make_time("09:00:00"));
        assert_eq!(sessions_for_day(&store, "u001", date).unwrap(), vec![session]);
    }

    #[test]
    fn test_punch_in_trims_employee_id() {
        let store = InMemoryStore::new();
        let session = punch_in(&store, "  u001 ", make_date("2026-03-02"), make_time("09:00:00"))
            .unwrap();
        assert_eq!(session.employee_id, "u001");
    }

    #[test]
    fn test_second_punch_in_is_rejected() {
        let store = InMemoryStore::new();
        let date = make_date("2026-03-02");
        let first = punch_in(&store, "u001", date, make_time("09:00:00")).unwrap();

        match punch_in(&store, "u001", date, make_time("09:05:00")) {
            Err(EngineError::AlreadyOpen { session_id, .. }) => assert_eq!(session_id, first.id),
            other => panic!("Expected AlreadyOpen, got {:?}", other),
        }
        assert_eq!(open_count(&store, "u001", date), 1);
        assert_eq!(sessions_for_day(&store, "u001", date).unwrap().len(), 1);
    }

    #[test]
    fn test_open_sessions_are_per_employee_and_date() {
        let store = InMemoryStore::new();
        let date = make_date("2026-03-02");
        punch_in(&store, "u001", date, make_time("09:00:00")).unwrap();

        assert!(punch_in(&store, "u002", date, make_time("09:00:00")).is_ok());
        assert!(punch_in(&store, "u001", make_date("2026-03-03"), make_time("09:00:00")).is_ok());
    }

    #[test]
    fn test_punch_out_same_day() {
        let store = InMemoryStore::new();
        let policy = PayrollConfig::default();
        let date = make_date("2026-03-02");
        let opened = punch_in(&store, "u001", date, make_time("09:00:00")).unwrap();

        let closed = punch_out(&store, &policy, "u001", date, make_time("17:30:00")).unwrap();

        assert_eq!(closed.id, opened.id);
        assert_eq!(closed.end_time, Some(make_time("17:30:00")));
        assert_eq!(closed.duration_hours, Some(dec("8.5")));

        let stored = &sessions_for_day(&store, "u001", date).unwrap()[0];
        assert_eq!(stored, &closed);
    }

    #[test]
    fn test_punch_out_wraps_past_midnight() {
        let store = InMemoryStore::new();
        let policy = PayrollConfig::default();
        let date = make_date("2026-03-02");
        punch_in(&store, "u001", date, make_time("22:00:00")).unwrap();

        let closed = punch_out(&store, &policy, "u001", date, make_time("02:00:00")).unwrap();
        assert_eq!(closed.duration_hours, Some(dec("4.0")));
    }

    #[test]
    fn test_punch_out_without_open_session() {
        let store = InMemoryStore::new();
        let policy = PayrollConfig::default();
        let date = make_date("2026-03-02");

        assert!(matches!(
            punch_out(&store, &policy, "u001", date, make_time("17:00:00")),
            Err(EngineError::NoOpenSession { .. })
        ));

        punch_in(&store, "u001", date, make_time("09:00:00")).unwrap();
        punch_out(&store, &policy, "u001", date, make_time("12:00:00")).unwrap();

        assert!(matches!(
            punch_out(&store, &policy, "u001", date, make_time("13:00:00")),
            Err(EngineError::NoOpenSession { .. })
        ));
    }

    #[test]
    fn test_break_then_resume() {
        let store = InMemoryStore::new();
        let policy = PayrollConfig::default();
        let date = make_date("2026-03-02");

        punch_in(&store, "u001", date, make_time("09:00:00")).unwrap();
        punch_out(&store, &policy, "u001", date, make_time("12:00:00")).unwrap();
        punch_in(&store, "u001", date, make_time("12:45:00")).unwrap();
        punch_out(&store, &policy, "u001", date, make_time("17:00:00")).unwrap();

        let durations: Vec<_> = sessions_for_day(&store, "u001", date)
            .unwrap()
            .into_iter()
            .map(|s| s.duration_hours.unwrap())
            .collect();
        assert_eq!(durations, vec![dec("3"), dec("4.25")]);
    }

    #[test]
    fn test_punch_out_closes_most_recent_of_legacy_duplicates() {
        let store = InMemoryStore::new();
        let policy = PayrollConfig::default();
        let date = make_date("2026-03-02");
        let older = store
            .append_session(Session::open("u001", date, make_time("08:00:00")))
            .unwrap();
        let newer = store
            .append_session(Session::open("u001", date, make_time("10:00:00")))
            .unwrap();

        let closed = punch_out(&store, &policy, "u001", date, make_time("11:00:00")).unwrap();

        assert_eq!(closed.id, newer.id);
        assert_eq!(closed.duration_hours, Some(dec("1")));
        let still_open: Vec<_> = sessions_for_day(&store, "u001", date)
            .unwrap()
            .into_iter()
            .filter(|s| s.is_open())
            .collect();
        assert_eq!(still_open.len(), 1);
        assert_eq!(still_open[0].id, older.id);
    }

    #[test]
    fn test_store_failure_is_reported() {
        let store = InMemoryStore::new();
        store.set_available(false);

        assert!(matches!(
            punch_in(&store, "u001", make_date("2026-03-02"), make_time("09:00:00")),
            Err(EngineError::StoreUnavailable { .. })
        ));
    }
}
