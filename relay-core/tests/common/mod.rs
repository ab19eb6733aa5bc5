//! Test doubles shared by the relay-core integration tests: a recording [`Bot`] and a settable clock.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveTime, TimeZone, Utc};
use relay_core::{
    AllowList, AvailabilityPolicy, Bot, Chat, Clock, MessageRecord, Result, Router, StaffSession,
    User,
};

/// One recorded delivery.
#[derive(Debug, Clone)]
pub struct Sent {
    pub chat_id: i64,
    pub text: String,
}

/// Bot that records every message instead of sending it.
#[derive(Default)]
pub struct RecordingBot {
    sent: Mutex<Vec<Sent>>,
}

impl RecordingBot {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, chat_id: i64) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|s| s.chat_id == chat_id)
            .map(|s| s.text)
            .collect()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(Sent {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_html(&self, chat: &Chat, html: &str) -> Result<()> {
        self.send_message(chat, html).await
    }
}

/// Clock the test moves by hand.
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn at(now: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self(Mutex::new(now)))
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.0.lock().unwrap() = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub const STAFF_A: i64 = 1001;
pub const STAFF_B: i64 = 1002;
pub const OUTSIDER: i64 = 4242;

pub fn offset() -> FixedOffset {
    FixedOffset::east_opt(2 * 3600).unwrap()
}

/// Local business time on Tuesday 2024-05-14.
pub fn tuesday(h: u32, m: u32, s: u32) -> DateTime<Utc> {
    offset()
        .with_ymd_and_hms(2024, 5, 14, h, m, s)
        .unwrap()
        .with_timezone(&Utc)
}

/// Window 08:00-19:00, Monday to Saturday.
pub fn policy() -> AvailabilityPolicy {
    AvailabilityPolicy::new(
        offset(),
        NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        0..=5,
    )
    .unwrap()
}

pub fn router(bot: Arc<RecordingBot>, clock: Arc<ManualClock>) -> Router {
    Router::new(
        Arc::new(AllowList::from_ids([STAFF_A, STAFF_B])),
        policy(),
        clock,
        bot,
    )
}

pub fn staff(id: i64) -> StaffSession {
    StaffSession::new(id, Chat::private(id), format!("Staff {}", id))
}

pub fn request(text: &str) -> MessageRecord {
    let user = User {
        id: 7,
        username: Some("client".to_string()),
        first_name: Some("Client".to_string()),
        last_name: None,
    };
    MessageRecord::new(text, &user, tuesday(12, 0, 0).with_timezone(&offset()))
}

/// Extracts the request body from a staff notification.
pub fn body(html: &str) -> &str {
    html.rsplit("\n\n").next().unwrap_or_default()
}
