//! # Router
//!
//! Decides live delivery versus queueing for new requests and drains the pending queue when staff
//! become available. The router owns the [`StaffRegistry`] and [`PendingQueue`]; it runs as a single
//! task fed by [`RouterHandle`], so route / drain / activate / deactivate never interleave.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::allow_list::AllowList;
use crate::availability::{AvailabilityPolicy, Clock};
use crate::bot::Bot;
use crate::error::{RelayError, Result};
use crate::queue::PendingQueue;
use crate::record::MessageRecord;
use crate::registry::{Activation, Deactivation, StaffRegistry, StaffSession};

/// What happened to a routed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Broadcast live; `failed` recipients did not get it.
    Delivered { recipients: usize, failed: usize },
    /// Appended to the pending queue, which now holds `pending` records.
    Queued { pending: usize },
}

/// Snapshot of router state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouterStats {
    pub active_staff: usize,
    pub pending: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct Broadcast {
    delivered: usize,
    failed: usize,
}

/// Routing state and delivery. Use directly for single-owner code, or [`Router::spawn`] to serve
/// concurrent callers through a [`RouterHandle`].
pub struct Router {
    registry: StaffRegistry,
    queue: PendingQueue,
    policy: AvailabilityPolicy,
    clock: Arc<dyn Clock>,
    bot: Arc<dyn Bot>,
}

impl Router {
    pub fn new(
        allow_list: Arc<AllowList>,
        policy: AvailabilityPolicy,
        clock: Arc<dyn Clock>,
        bot: Arc<dyn Bot>,
    ) -> Self {
        Self {
            registry: StaffRegistry::new(allow_list),
            queue: PendingQueue::new(),
            policy,
            clock,
            bot,
        }
    }

    pub fn stats(&self) -> RouterStats {
        RouterStats {
            active_staff: self.registry.len(),
            pending: self.queue.len(),
        }
    }

    /// Broadcasts live when staff are active and the working window is open; queues otherwise.
    /// A record no active session accepted is queued as well.
    #[instrument(skip(self, record), fields(record_id = %record.id(), user_id = record.user_id()))]
    pub async fn route(&mut self, record: MessageRecord) -> RouteOutcome {
        let now = self.clock.now();
        if !self.registry.is_empty() && self.policy.is_live_window(now) {
            let sent = self.broadcast(&record).await;
            if sent.delivered > 0 {
                info!(
                    recipients = sent.delivered,
                    failed = sent.failed,
                    "Request delivered live"
                );
                return RouteOutcome::Delivered {
                    recipients: sent.delivered,
                    failed: sent.failed,
                };
            }
            warn!(failed = sent.failed, "No staff session accepted the request, queueing it");
        }

        let pending = self.queue.enqueue(record);
        info!(
            pending = pending,
            active_staff = self.registry.len(),
            "Request queued"
        );
        RouteOutcome::Queued { pending }
    }

    /// Delivers queued records oldest first, each to every active session before the next is
    /// taken. Ignores the working window. Returns the number of records delivered.
    ///
    /// With no active staff this is a no-op returning [`RelayError::NoActiveRecipients`]. If a record
    /// reaches nobody it goes back to the head of the queue and the drain stops there.
    #[instrument(skip(self))]
    pub async fn drain(&mut self) -> Result<usize> {
        if self.registry.is_empty() {
            warn!(
                pending = self.queue.len(),
                "Tried to drain pending requests with no active staff"
            );
            return Err(RelayError::NoActiveRecipients);
        }

        let mut delivered = 0;
        while let Some(record) = self.queue.dequeue() {
            let sent = self.broadcast(&record).await;
            if sent.delivered == 0 {
                warn!(
                    record_id = %record.id(),
                    failed = sent.failed,
                    "Queued request reached no staff session, keeping it at the head"
                );
                self.queue.requeue_front(record);
                break;
            }
            delivered += 1;
        }

        info!(
            delivered = delivered,
            pending = self.queue.len(),
            "Drain finished"
        );
        Ok(delivered)
    }

    /// Activates a staff session; a fresh activation sends the session's welcome, then drains the
    /// queue.
    #[instrument(skip(self, session), fields(staff_name = %session.display_name))]
    pub async fn activate(&mut self, staff_id: i64, mut session: StaffSession) -> Result<Activation> {
        session.activated_at = self.clock.now();
        let chat = session.chat.clone();
        let welcome = session.welcome.take();
        let activation = self.registry.activate(staff_id, session)?;
        match activation {
            Activation::Activated => {
                info!(active_staff = self.registry.len(), "Staff session activated");
                if let Some(text) = welcome {
                    if let Err(e) = self.bot.send_message(&chat, &text).await {
                        warn!(error = %e, "Failed to send activation welcome");
                    }
                }
                if !self.queue.is_empty() {
                    if let Err(e) = self.drain().await {
                        warn!(error = %e, "Drain after activation failed");
                    }
                }
            }
            Activation::AlreadyActive => debug!("Staff session already active"),
        }
        Ok(activation)
    }

    #[instrument(skip(self))]
    pub fn deactivate(&mut self, staff_id: i64) -> Result<Deactivation> {
        let active_secs = self
            .registry
            .get(staff_id)
            .map(|s| (self.clock.now() - s.activated_at).num_seconds());
        let deactivation = self.registry.deactivate(staff_id)?;
        info!(
            outcome = ?deactivation,
            active_secs = ?active_secs,
            active_staff = self.registry.len(),
            "Staff session deactivated"
        );
        Ok(deactivation)
    }

    /// Sends one record to every active session; a failure for one recipient does not stop the rest.
    async fn broadcast(&self, record: &MessageRecord) -> Broadcast {
        let html = record.to_html();
        let mut result = Broadcast::default();
        for session in self.registry.sessions() {
            match self.bot.send_html(&session.chat, &html).await {
                Ok(()) => {
                    debug!(staff_id = session.staff_id, record_id = %record.id(), "Delivered to staff");
                    result.delivered += 1;
                }
                Err(e) => {
                    warn!(
                        staff_id = session.staff_id,
                        record_id = %record.id(),
                        error = %e,
                        "Failed to deliver request to staff"
                    );
                    result.failed += 1;
                }
            }
        }
        result
    }

    /// Moves the router onto its own task and returns the handle that feeds it.
    pub fn spawn(self) -> RouterHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(self.run(rx));
        RouterHandle { tx }
    }

    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<RouterCommand>) {
        info!(policy = %self.policy, "Router started");
        while let Some(command) = rx.recv().await {
            match command {
                RouterCommand::Route { record, reply } => {
                    let _ = reply.send(self.route(record).await);
                }
                RouterCommand::Drain { reply } => {
                    let _ = reply.send(self.drain().await);
                }
                RouterCommand::Activate {
                    staff_id,
                    session,
                    reply,
                } => {
                    let _ = reply.send(self.activate(staff_id, session).await);
                }
                RouterCommand::Deactivate { staff_id, reply } => {
                    let _ = reply.send(self.deactivate(staff_id));
                }
                RouterCommand::Stats { reply } => {
                    let _ = reply.send(self.stats());
                }
            }
        }
        info!(pending = self.queue.len(), "Router stopped");
    }
}

enum RouterCommand {
    Route {
        record: MessageRecord,
        reply: oneshot::Sender<RouteOutcome>,
    },
    Drain {
        reply: oneshot::Sender<Result<usize>>,
    },
    Activate {
        staff_id: i64,
        session: StaffSession,
        reply: oneshot::Sender<Result<Activation>>,
    },
    Deactivate {
        staff_id: i64,
        reply: oneshot::Sender<Result<Deactivation>>,
    },
    Stats {
        reply: oneshot::Sender<RouterStats>,
    },
}

/// Cloneable front door to a spawned [`Router`]. Commands are processed one at a time in the
/// order they arrive.
#[derive(Clone)]
pub struct RouterHandle {
    tx: mpsc::UnboundedSender<RouterCommand>,
}

impl RouterHandle {
    pub async fn route(&self, record: MessageRecord) -> Result<RouteOutcome> {
        self.call(|reply| RouterCommand::Route { record, reply }).await
    }

    pub async fn drain(&self) -> Result<usize> {
        self.call(|reply| RouterCommand::Drain { reply }).await?
    }

    pub async fn activate(&self, staff_id: i64, session: StaffSession) -> Result<Activation> {
        self.call(|reply| RouterCommand::Activate {
            staff_id,
            session,
            reply,
        })
        .await?
    }

    pub async fn deactivate(&self, staff_id: i64) -> Result<Deactivation> {
        self.call(|reply| RouterCommand::Deactivate { staff_id, reply })
            .await?
    }

    pub async fn stats(&self) -> Result<RouterStats> {
        self.call(|reply| RouterCommand::Stats { reply }).await
    }

    async fn call<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> RouterCommand) -> Result<T> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(command(reply))
            .map_err(|_| RelayError::RouterUnavailable)?;
        rx.await.map_err(|_| RelayError::RouterUnavailable)
    }
}
