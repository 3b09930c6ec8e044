use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::messages::{HeartbeatMessage, MessageId, NodeId, VoteMessage};

pub mod sweeper;


/// Last reported state of a peer.
#[derive(Clone, Debug, PartialEq)]
pub struct MembershipEntry {
    pub node_id: NodeId,
    pub term: u64,
    pub is_leader: bool,
    pub cpu_usage: f32,
    pub mem_usage: f32,
    pub sent_at: DateTime<Utc>,
    pub last_seen: Instant,
    last_message_id: MessageId,
}

/// Peer summary exposed to status queries.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
#[display(fmt = "Member {} term {} leader {}", node_id, term, is_leader)]
pub struct MemberStatus {
    pub node_id: NodeId,
    pub term: u64,
    pub is_leader: bool,
}

impl From<&MembershipEntry> for MemberStatus {
    fn from(entry: &MembershipEntry) -> Self {
        MemberStatus {
            node_id: entry.node_id,
            term: entry.term,
            is_leader: entry.is_leader,
        }
    }
}

/// Outcome of applying a heartbeat to the membership table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HeartbeatApplied {
    NewMember,
    Updated,
    /// Same message seen before.
    Ignored,
}

/// Local, best-effort view of peer liveness built from received heartbeats.
///
/// Clones share the same table.
#[derive(Clone, Debug, Default)]
pub struct MembershipTracker {
    members: Arc<RwLock<HashMap<NodeId, MembershipEntry>>>,
}

impl MembershipTracker {
    pub fn new() -> MembershipTracker {
        MembershipTracker::default()
    }

    pub fn apply_heartbeat(&self, heartbeat: &HeartbeatMessage) -> HeartbeatApplied {
        self.apply_heartbeat_at(heartbeat, Instant::now())
    }

    /// Upserts the sender entry. A re-delivered heartbeat leaves the entry intact.
    ///
    /// Sender timestamps are informational only: peer clocks are not comparable, so any new
    /// message refreshes `last_seen`.
    pub fn apply_heartbeat_at(
        &self,
        heartbeat: &HeartbeatMessage,
        received_at: Instant,
    ) -> HeartbeatApplied {
        let mut members = self.members.write();

        if let Some(entry) = members.get(&heartbeat.sender) {
            if entry.last_message_id == heartbeat.id {
                return HeartbeatApplied::Ignored;
            }
        }

        let entry = MembershipEntry {
            node_id: heartbeat.sender,
            term: heartbeat.term,
            is_leader: heartbeat.is_leader,
            cpu_usage: heartbeat.cpu_usage,
            mem_usage: heartbeat.mem_usage,
            sent_at: heartbeat.timestamp,
            last_seen: received_at,
            last_message_id: heartbeat.id,
        };

        match members.insert(heartbeat.sender, entry) {
            None => HeartbeatApplied::NewMember,
            Some(_) => HeartbeatApplied::Updated,
        }
    }

    pub fn apply_vote(&self, vote: &VoteMessage) -> bool {
        self.apply_vote_at(vote, Instant::now())
    }

    /// Registers an unknown voter, or refreshes the liveness of a known one.
    ///
    /// Returns true when the voter was not a member yet. Votes carry no load figures, so the
    /// entry of a known member keeps the state reported by its last heartbeat.
    pub fn apply_vote_at(&self, vote: &VoteMessage, received_at: Instant) -> bool {
        let mut members = self.members.write();

        if let Some(entry) = members.get_mut(&vote.voter) {
            entry.last_seen = received_at;
            return false;
        }

        members.insert(
            vote.voter,
            MembershipEntry {
                node_id: vote.voter,
                term: vote.term,
                is_leader: false,
                cpu_usage: 0.0,
                mem_usage: 0.0,
                sent_at: Utc::now(),
                last_seen: received_at,
                last_message_id: vote.id,
            },
        );

        true
    }

    pub fn evict_stale(&self, threshold: Duration) -> Vec<NodeId> {
        self.evict_stale_at(Instant::now(), threshold)
    }

    /// Removes members silent for longer than the threshold and returns their ids.
    pub fn evict_stale_at(&self, now: Instant, threshold: Duration) -> Vec<NodeId> {
        let stale: Vec<NodeId> = {
            let members = self.members.read();
            members
                .values()
                .filter(|entry| now.saturating_duration_since(entry.last_seen) > threshold)
                .map(|entry| entry.node_id)
                .collect()
        };

        if stale.is_empty() {
            return stale;
        }

        let mut members = self.members.write();
        stale
            .into_iter()
            .filter(|node_id| {
                // may have been refreshed between the two locks
                let still_stale = members
                    .get(node_id)
                    .map(|entry| now.saturating_duration_since(entry.last_seen) > threshold)
                    .unwrap_or(false);

                still_stale && members.remove(node_id).is_some()
            })
            .collect()
    }

    pub fn contains(&self, node_id: NodeId) -> bool {
        self.members.read().contains_key(&node_id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.read().is_empty()
    }

    /// Snapshot of all known members ordered by node id.
    pub fn snapshot(&self) -> Vec<MemberStatus> {
        let mut snapshot: Vec<MemberStatus> = self
            .members
            .read()
            .values()
            .map(MemberStatus::from)
            .collect();
        snapshot.sort_by_key(|member| member.node_id);

        snapshot
    }
}
