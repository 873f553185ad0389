use leaderboard_common::snapshot::Snapshot;
use log::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Scroll bookkeeping and last seen snapshot, kept across re-renders for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// `None` until the first snapshot of the session
    pub client: Option<Snapshot>,
    /// Offset the viewport was last asked to be at
    pub current_scroll_value: f64,
    /// Offset observed before the previous animated scroll
    pub last_scroll_value: f64,
    /// Offset observed two animated scrolls ago
    pub double_last_scroll_value: f64,
}

#[derive(Debug, Error)]
pub enum ViewStateError {
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
    #[error("Stored {field} is {value}, which is not a valid scroll offset")]
    InvalidScrollValue { field: &'static str, value: f64 },
}

impl ViewState {
    pub fn reset_scroll(&mut self) {
        self.current_scroll_value = 0.0;
        self.last_scroll_value = 0.0;
        self.double_last_scroll_value = 0.0;
    }

    /// Parses a stored record. A stored `null` yields a fresh state.
    pub fn from_json(json: &str) -> Result<Self, ViewStateError> {
        let state: Option<Self> = serde_json::from_str(json)?;
        let state = state.unwrap_or_default();
        state.validate()?;
        Ok(state)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    fn validate(&self) -> Result<(), ViewStateError> {
        for (field, value) in [
            ("currentScrollValue", self.current_scroll_value),
            ("lastScrollValue", self.last_scroll_value),
            ("doubleLastScrollValue", self.double_last_scroll_value),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ViewStateError::InvalidScrollValue { field, value });
            }
        }
        Ok(())
    }
}

/// Key-value store that lives as long as the display session
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

/// Reads the view state stored under `key`, falling back to a fresh one when nothing usable is
/// stored.
pub fn load_view_state<S: SessionStore + ?Sized>(store: &S, key: &str) -> ViewState {
    match store.get(key) {
        Some(json) => match ViewState::from_json(&json) {
            Ok(state) => state,
            Err(e) => {
                warn!("Discarding stored view state: {e}");
                ViewState::default()
            }
        },
        None => {
            debug!("No view state stored under {key:?}, starting fresh");
            ViewState::default()
        }
    }
}

pub fn save_view_state<S: SessionStore + ?Sized>(store: &mut S, key: &str, state: &ViewState) {
    match state.to_json() {
        Ok(json) => store.set(key, json),
        Err(e) => error!("Failed to serialize view state: {e}"),
    }
}
