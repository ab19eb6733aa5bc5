//! Shared fixtures: a recording bot, a settable clock and message builders.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveTime, TimeZone, Utc};
use relay_core::{AllowList, AvailabilityPolicy, Bot, Chat, Clock, Message, Result, User};
use support_relay::{build_components, RelayComponents};
use tracing_subscriber::{fmt, EnvFilter};

pub const STAFF_ID: i64 = 1001;
pub const CUSTOMER_ID: i64 = 7;
pub const OUTSIDER_ID: i64 = 4242;
pub const GREETING: &str = "<b>Hello</b>";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing once per test process; `RUST_LOG` controls the level.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("debug,relay_core=debug,support_relay=debug"));
        let _ = fmt().with_env_filter(env_filter).with_test_writer().try_init();
    });
}

#[derive(Debug, Clone)]
pub struct Sent {
    pub chat_id: i64,
    pub text: String,
    pub html: bool,
}

#[derive(Default)]
pub struct RecordingBot {
    sent: Mutex<Vec<Sent>>,
}

impl RecordingBot {
    pub fn sent_to(&self, chat_id: i64) -> Vec<Sent> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.chat_id == chat_id)
            .cloned()
            .collect()
    }

    pub fn texts_to(&self, chat_id: i64) -> Vec<String> {
        self.sent_to(chat_id).into_iter().map(|s| s.text).collect()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }

    fn record(&self, chat: &Chat, text: &str, html: bool) {
        self.sent.lock().unwrap().push(Sent {
            chat_id: chat.id,
            text: text.to_string(),
            html,
        });
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(chat, text, false);
        Ok(())
    }

    async fn send_html(&self, chat: &Chat, html: &str) -> Result<()> {
        self.record(chat, html, true);
        Ok(())
    }
}

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

/// 08:00-19:00 every day.
pub fn policy() -> AvailabilityPolicy {
    AvailabilityPolicy::new(
        offset(),
        NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        0..=6,
    )
    .unwrap()
}

pub fn relay(bot: Arc<RecordingBot>, clock: Arc<ManualClock>) -> RelayComponents {
    init_tracing();
    build_components(
        Arc::new(AllowList::from_ids([STAFF_ID])),
        policy(),
        clock,
        bot,
        GREETING,
    )
}

pub fn message(user_id: i64, text: &str) -> Message {
    Message {
        id: format!("{}-{}", user_id, text.len()),
        user: User {
            id: user_id,
            username: Some(format!("user{}", user_id)),
            first_name: Some(format!("First{}", user_id)),
            last_name: None,
        },
        chat: Chat::private(user_id),
        content: text.to_string(),
        created_at: Utc::now(),
    }
}
