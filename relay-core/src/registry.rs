//! Active-staff registry: staff sessions currently receiving live requests.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::allow_list::AllowList;
use crate::error::{RelayError, Result};
use crate::types::Chat;

/// One active staff member and where to deliver requests to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffSession {
    pub staff_id: i64,
    pub chat: Chat,
    pub display_name: String,
    /// Stamped by the router from its clock when the session is admitted.
    pub activated_at: DateTime<Utc>,
    /// Sent to the staff chat on a fresh activation, ahead of any queued requests.
    pub welcome: Option<String>,
}

impl StaffSession {
    pub fn new(staff_id: i64, chat: Chat, display_name: impl Into<String>) -> Self {
        Self {
            staff_id,
            chat,
            display_name: display_name.into(),
            activated_at: DateTime::<Utc>::MIN_UTC,
            welcome: None,
        }
    }

    pub fn with_welcome(mut self, text: impl Into<String>) -> Self {
        self.welcome = Some(text.into());
        self
    }
}

/// Outcome of a successful [`StaffRegistry::activate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Activated,
    AlreadyActive,
}

/// Outcome of a successful [`StaffRegistry::deactivate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deactivation {
    Removed,
    NotActive,
}

/// Sessions in activation order; at most one per staff id. Only allow-listed ids are admitted.
#[derive(Debug)]
pub struct StaffRegistry {
    allow_list: Arc<AllowList>,
    sessions: Vec<StaffSession>,
}

impl StaffRegistry {
    pub fn new(allow_list: Arc<AllowList>) -> Self {
        Self {
            allow_list,
            sessions: Vec::new(),
        }
    }

    /// Adds the session unless one with the same id is already active.
    pub fn activate(&mut self, staff_id: i64, session: StaffSession) -> Result<Activation> {
        self.authorize(staff_id)?;
        if self.contains(staff_id) {
            return Ok(Activation::AlreadyActive);
        }
        self.sessions.push(StaffSession { staff_id, ..session });
        Ok(Activation::Activated)
    }

    /// Removes every session with this id.
    pub fn deactivate(&mut self, staff_id: i64) -> Result<Deactivation> {
        self.authorize(staff_id)?;
        let before = self.sessions.len();
        self.sessions.retain(|s| s.staff_id != staff_id);
        if self.sessions.len() < before {
            Ok(Deactivation::Removed)
        } else {
            Ok(Deactivation::NotActive)
        }
    }

    pub fn get(&self, staff_id: i64) -> Option<&StaffSession> {
        self.sessions.iter().find(|s| s.staff_id == staff_id)
    }

    pub fn contains(&self, staff_id: i64) -> bool {
        self.sessions.iter().any(|s| s.staff_id == staff_id)
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn sessions(&self) -> impl Iterator<Item = &StaffSession> {
        self.sessions.iter()
    }

    fn authorize(&self, staff_id: i64) -> Result<()> {
        if self.allow_list.contains(staff_id) {
            Ok(())
        } else {
            Err(RelayError::Unauthorized(staff_id))
        }
    }
}
