use std::collections::{HashSet, VecDeque};

use crate::messages::MessageId;

/// Remembers the ids of the most recent messages to drop transport duplicates.
#[derive(Clone, Debug)]
pub struct RecentMessageFilter {
    capacity: usize,
    seen: HashSet<MessageId>,
    order: VecDeque<MessageId>,
}

impl RecentMessageFilter {
    /// Keeps up to `capacity` ids. Zero lets every message through.
    pub fn new(capacity: usize) -> RecentMessageFilter {
        RecentMessageFilter {
            capacity,
            seen: HashSet::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    /// Returns true the first time an id is offered within the window.
    pub fn check_and_remember(&mut self, id: MessageId) -> bool {
        if self.capacity == 0 {
            return true;
        }

        if !self.seen.insert(id) {
            return false;
        }

        self.order.push_back(id);
        if self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.seen.remove(&oldest);
            }
        }

        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
