use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

use crate::messages::{NodeId, VoteMessage};

/// Votes observed during one candidacy.
#[derive(Clone, Debug)]
pub struct VoteTally {
    candidate: NodeId,
    term: u64,
    total_votes: u32,
    self_votes: u32,
    counted: HashSet<(u64, NodeId, NodeId)>,
}

impl VoteTally {
    pub fn new(candidate: NodeId, term: u64) -> VoteTally {
        VoteTally {
            candidate,
            term,
            total_votes: 0,
            self_votes: 0,
            counted: HashSet::new(),
        }
    }

    pub fn term(&self) -> u64 {
        self.term
    }

    pub fn total_votes(&self) -> u32 {
        self.total_votes
    }

    pub fn self_votes(&self) -> u32 {
        self.self_votes
    }

    /// Counts a vote once per (term, voter, candidate). Returns false for repeated votes.
    pub fn record(&mut self, vote: &VoteMessage) -> bool {
        if !self.counted.insert((vote.term, vote.voter, vote.candidate)) {
            return false;
        }

        self.total_votes += 1;
        if vote.candidate == self.candidate && vote.term == self.term {
            self.self_votes += 1;
        }

        true
    }

    pub fn majority(&self) -> u32 {
        self.total_votes / 2 + 1
    }

    pub fn is_won(&self) -> bool {
        self.total_votes > 0 && self.self_votes >= self.majority()
    }
}

/// Tally of the running candidacy, shared between the election manager and inbound votes.
#[derive(Clone, Debug, Default)]
pub struct BallotBox {
    tally: Arc<Mutex<Option<VoteTally>>>,
}

impl BallotBox {
    pub fn new() -> BallotBox {
        BallotBox::default()
    }

    /// Starts counting for a new candidacy, discarding any previous tally.
    pub fn open(&self, candidate: NodeId, term: u64) {
        *self.tally.lock() = Some(VoteTally::new(candidate, term));
    }

    /// Records the vote if a candidacy is running.
    pub fn record(&self, vote: &VoteMessage) -> bool {
        match self.tally.lock().as_mut() {
            Some(tally) => tally.record(vote),
            None => false,
        }
    }

    pub fn close(&self) -> Option<VoteTally> {
        self.tally.lock().take()
    }

    pub fn is_open(&self) -> bool {
        self.tally.lock().is_some()
    }
}
