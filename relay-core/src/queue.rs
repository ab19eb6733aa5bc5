//! Pending queue: records waiting for an active staff member.

use std::collections::VecDeque;

use crate::record::MessageRecord;

/// FIFO buffer of records, oldest first. Unbounded and without deduplication.
#[derive(Debug, Default)]
pub struct PendingQueue {
    records: VecDeque<MessageRecord>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends at the tail; returns the new length.
    pub fn enqueue(&mut self, record: MessageRecord) -> usize {
        self.records.push_back(record);
        self.records.len()
    }

    /// Removes and returns the oldest record.
    pub fn dequeue(&mut self) -> Option<MessageRecord> {
        self.records.pop_front()
    }

    /// Puts a record back at the head after a drain could not deliver it to anyone.
    pub fn requeue_front(&mut self, record: MessageRecord) {
        self.records.push_front(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in delivery order.
    pub fn iter(&self) -> impl Iterator<Item = &MessageRecord> {
        self.records.iter()
    }
}
