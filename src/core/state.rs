//! Application state backed by a key-value store.
//!
//! `AppState` is the one place the bag, the session history and the
//! last-visit timestamp are read and written. Everything is loaded
//! fail-open: a missing or malformed blob reads as empty.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::core::{ClubBag, Session};
use crate::error::{FailOpen, Result};
use crate::storage::{keys, KeyValueStore};

/// Persistent application state.
pub struct AppState<S: KeyValueStore> {
    store: S,
    bag: ClubBag,
    last_visit: Option<DateTime<Utc>>,
}

impl<S: KeyValueStore> AppState<S> {
    /// Load state from `store`. Unreadable entries start empty.
    pub fn load(store: S) -> Self {
        let bag = store
            .get_json::<ClubBag>(keys::USER_BAG)
            .fail_open_default("loading bag")
            .unwrap_or_default();

        let last_visit = store
            .get_json::<f64>(keys::LAST_VISIT)
            .fail_open_default("loading last visit")
            .and_then(timestamp_to_datetime);

        Self {
            store,
            bag,
            last_visit,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn bag(&self) -> &ClubBag {
        &self.bag
    }

    /// Replace the bag and persist it.
    pub fn save_bag(&mut self, bag: ClubBag) -> Result<()> {
        self.store.set_json(keys::USER_BAG, &bag)?;
        tracing::info!(clubs = bag.len(), "bag saved");
        self.bag = bag;
        Ok(())
    }

    /// Every recorded session, oldest first.
    ///
    /// Records that fail to decode are skipped.
    pub fn sessions(&self) -> Vec<Session> {
        let mut sessions: Vec<Session> = self
            .raw_sessions()
            .into_iter()
            .filter_map(|record| match serde_json::from_value::<Session>(record) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable session record");
                    None
                }
            })
            .collect();

        sessions.sort_by_key(Session::date);
        sessions
    }

    /// Append a finished session to the stored history.
    ///
    /// The full list is read and rewritten; existing records are kept as-is.
    pub fn record_session(&self, session: &Session) -> Result<()> {
        let mut records = self.raw_sessions();
        records.push(serde_json::to_value(session)?);
        self.store.set_json(keys::TEST_SESSIONS, &records)?;
        tracing::info!(
            score = session.score(),
            shots = session.shots().len(),
            total = records.len(),
            "session recorded"
        );
        Ok(())
    }

    fn raw_sessions(&self) -> Vec<Value> {
        self.store
            .get_json::<Vec<Value>>(keys::TEST_SESSIONS)
            .fail_open_default("loading sessions")
            .unwrap_or_default()
    }

    pub fn last_visit(&self) -> Option<DateTime<Utc>> {
        self.last_visit
    }

    /// Whole days between the last visit and `now`.
    pub fn days_since_last_visit(&self, now: DateTime<Utc>) -> Option<i64> {
        self.last_visit.map(|last| (now - last).num_days())
    }

    /// Record `now` as the last visit.
    pub fn touch_visit(&mut self, now: DateTime<Utc>) -> Result<()> {
        let seconds = now.timestamp_millis() as f64 / 1000.0;
        self.store.set_json(keys::LAST_VISIT, &seconds)?;
        self.last_visit = Some(now);
        Ok(())
    }
}

/// Convert stored epoch seconds; zero or invalid means "never visited".
fn timestamp_to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return None;
    }
    let millis = (seconds * 1000.0).round() as i64;
    Utc.timestamp_millis_opt(millis).single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Shot;
    use crate::storage::MemoryKeyValueStore;
    use chrono::Duration;
    use std::sync::Arc;

    fn store() -> Arc<MemoryKeyValueStore> {
        Arc::new(MemoryKeyValueStore::new())
    }

    fn session_at(date: DateTime<Utc>, score: f64) -> Session {
        Session::new(date, score, "", vec![Shot::new("7 Iron", 150.0, 0.0)])
    }

    #[test]
    fn test_fresh_state_is_empty() {
        let state = AppState::load(store());
        assert!(state.bag().is_empty());
        assert!(state.sessions().is_empty());
        assert!(state.last_visit().is_none());
        assert!(state.days_since_last_visit(Utc::now()).is_none());
    }

    #[test]
    fn test_bag_roundtrip_through_store() {
        let store = store();
        let mut state = AppState::load(Arc::clone(&store));

        let bag: ClubBag = ["Sand Wedge", "Driver", "6 Iron"].into_iter().collect();
        state.save_bag(bag.clone()).unwrap();
        assert_eq!(state.bag(), &bag);

        let reloaded = AppState::load(store);
        assert_eq!(reloaded.bag(), &bag);
    }

    #[test]
    fn test_malformed_bag_reads_empty() {
        let store = store();
        store.set(keys::USER_BAG, b"{not a list").unwrap();
        store.set(keys::TEST_SESSIONS, b"42").unwrap();

        let state = AppState::load(store);
        assert!(state.bag().is_empty());
        assert!(state.sessions().is_empty());
    }

    #[test]
    fn test_record_appends_and_sorts_by_date() {
        let store = store();
        let state = AppState::load(Arc::clone(&store));
        let now = Utc::now();

        state.record_session(&session_at(now, 80.0)).unwrap();
        state
            .record_session(&session_at(now - Duration::days(2), 60.0))
            .unwrap();

        let sessions = AppState::load(store).sessions();
        let scores: Vec<f64> = sessions.iter().map(Session::score).collect();
        assert_eq!(scores, vec![60.0, 80.0]);
    }

    #[test]
    fn test_unreadable_records_are_skipped_and_kept() {
        let store = store();
        store
            .set(
                keys::TEST_SESSIONS,
                br#"[{"date":"2025-07-17T09:30:00Z","score":70.0,"insights":"","shots":[]},{"bogus":true}]"#,
            )
            .unwrap();

        let state = AppState::load(Arc::clone(&store));
        assert_eq!(state.sessions().len(), 1);

        state.record_session(&session_at(Utc::now(), 90.0)).unwrap();

        let raw: Vec<Value> = store.get_json(keys::TEST_SESSIONS).unwrap().unwrap();
        assert_eq!(raw.len(), 3);
        assert_eq!(state.sessions().len(), 2);
    }

    #[test]
    fn test_bad_shot_keeps_its_session() {
        let store = store();
        store
            .set(
                keys::TEST_SESSIONS,
                br#"[{"date":"2025-07-17T09:30:00Z","score":70.0,"insights":"ok","shots":[
                    {"club":"7 Iron","distance":148.0,"deviation":5.0},
                    {"club":"7 Iron","distance":"far"}
                ]}]"#,
            )
            .unwrap();

        let state = AppState::load(Arc::clone(&store));
        let sessions = state.sessions();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].score(), 70.0);
        assert_eq!(sessions[0].shots(), &[Shot::new("7 Iron", 148.0, 5.0)]);

        // The stored record is rewritten untouched
        state.record_session(&session_at(Utc::now(), 90.0)).unwrap();
        let raw: Vec<Value> = store.get_json(keys::TEST_SESSIONS).unwrap().unwrap();
        assert_eq!(raw[0]["shots"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_last_visit() {
        let store = store();
        let mut state = AppState::load(Arc::clone(&store));
        let then = Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap();

        state.touch_visit(then).unwrap();

        let reloaded = AppState::load(store);
        assert_eq!(reloaded.last_visit(), Some(then));
        assert_eq!(
            reloaded.days_since_last_visit(then + Duration::days(3) + Duration::hours(5)),
            Some(3)
        );
    }

    #[test]
    fn test_zero_timestamp_means_never() {
        let store = store();
        store.set(keys::LAST_VISIT, b"0").unwrap();
        assert!(AppState::load(store).last_visit().is_none());
    }
}
