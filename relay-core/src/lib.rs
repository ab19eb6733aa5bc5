//! # relay-core
//!
//! Transport-agnostic core of the support relay: [`Bot`] and [`Handler`] traits, message and user
//! types, error taxonomy, tracing initialisation, and the routing discipline itself
//! ([`MessageRecord`], [`PendingQueue`], [`StaffRegistry`], [`AvailabilityPolicy`], [`Router`]).

pub mod allow_list;
pub mod availability;
pub mod bot;
pub mod error;
pub mod logger;
pub mod queue;
pub mod record;
pub mod registry;
pub mod router;
pub mod types;

pub use allow_list::AllowList;
pub use availability::{AvailabilityPolicy, Clock, SystemClock};
pub use bot::Bot;
pub use error::{RelayError, Result};
pub use logger::init_tracing;
pub use queue::PendingQueue;
pub use record::MessageRecord;
pub use registry::{Activation, Deactivation, StaffRegistry, StaffSession};
pub use router::{RouteOutcome, Router, RouterHandle, RouterStats};
pub use types::{Chat, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User};
