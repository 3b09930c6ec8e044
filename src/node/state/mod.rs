use parking_lot::Mutex;
use std::sync::Arc;

use crate::messages::NodeId;


/// Node shared between workers. Only the node status watcher mutates it.
pub type ProtectedNode = Arc<Mutex<Node>>;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Display)]
pub enum Role {
    Follower,
    Candidate,
    Leader,
}

/// Leadership as known by a node: the term and the leader of that term.
///
/// Claims are ordered by term first, then by leader id, with the absence of a leader ordered
/// below every id. A greater claim always supersedes a smaller one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct LeadershipClaim {
    pub term: u64,
    pub leader_id: Option<NodeId>,
}

impl LeadershipClaim {
    pub fn new(term: u64, leader_id: Option<NodeId>) -> LeadershipClaim {
        LeadershipClaim { term, leader_id }
    }
}

/// Point-in-time view of a node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Display)]
#[display(
    fmt = "Node {} role {} term {} leader {:?}",
    node_id,
    role,
    term,
    leader_id
)]
pub struct NodeStatus {
    pub node_id: NodeId,
    pub role: Role,
    pub term: u64,
    pub leader_id: Option<NodeId>,
    pub is_leader: bool,
}

#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    role: Role,
    current_term: u64,
    current_leader_id: Option<NodeId>,
    highest_seen_term: u64,
    candidate_term: Option<u64>,
}

impl Node {
    pub fn new(id: NodeId) -> Node {
        Node {
            id,
            role: Role::Follower,
            current_term: 0,
            current_leader_id: None,
            highest_seen_term: 0,
            candidate_term: None,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn current_term(&self) -> u64 {
        self.current_term
    }

    pub fn current_leader_id(&self) -> Option<NodeId> {
        self.current_leader_id
    }

    pub fn highest_seen_term(&self) -> u64 {
        self.highest_seen_term
    }

    pub fn is_leader(&self) -> bool {
        self.role == Role::Leader
    }

    /// Leader known or self-elected; no election is needed.
    pub fn is_settled(&self) -> bool {
        self.current_leader_id.is_some()
    }

    /// Follower that knows no leader, as after an abandoned candidacy or a forgotten leader.
    pub fn is_leaderless_follower(&self) -> bool {
        self.role == Role::Follower && self.current_leader_id.is_none()
    }

    pub fn leadership_claim(&self) -> LeadershipClaim {
        LeadershipClaim::new(self.current_term, self.current_leader_id)
    }

    /// Returns true when `leader_id` claiming leadership for `term` wins over the local view.
    pub fn claim_supersedes(&self, term: u64, leader_id: NodeId) -> bool {
        LeadershipClaim::new(term, Some(leader_id)) > self.leadership_claim()
    }

    /// Adopts a superseding leadership claim and steps down to follower.
    ///
    /// Returns false when the claim was ignored: own claims and claims not greater than the
    /// local one.
    pub fn apply_leader_claim(&mut self, term: u64, leader_id: NodeId) -> bool {
        self.observe_term(term);

        if leader_id == self.id || !self.claim_supersedes(term, leader_id) {
            return false;
        }

        self.current_term = term;
        self.current_leader_id = Some(leader_id);
        self.role = Role::Follower;
        self.candidate_term = None;

        true
    }

    pub fn observe_term(&mut self, term: u64) {
        if term > self.highest_seen_term {
            self.highest_seen_term = term;
        }
    }

    /// Term strictly greater than any term this node has seen.
    pub fn next_candidate_term(&self) -> u64 {
        self.current_term.max(self.highest_seen_term) + 1
    }

    /// Starts a candidacy for `term`. Rejected while a leader is known or for stale terms.
    pub fn become_candidate(&mut self, term: u64) -> bool {
        if self.is_settled() || term <= self.current_term {
            return false;
        }

        self.observe_term(term);
        self.role = Role::Candidate;
        self.current_term = term;
        self.candidate_term = Some(term);

        true
    }

    /// Applies an election win. Only the candidacy for exactly this term can be promoted.
    pub fn promote_to_leader(&mut self, term: u64) -> bool {
        if self.role != Role::Candidate || self.candidate_term != Some(term) {
            return false;
        }

        self.role = Role::Leader;
        self.current_leader_id = Some(self.id);
        self.candidate_term = None;

        true
    }

    pub fn abandon_candidacy(&mut self) -> bool {
        if self.role != Role::Candidate {
            return false;
        }

        self.role = Role::Follower;
        self.candidate_term = None;

        true
    }

    /// Drops the known leader of a follower. Term is kept.
    pub fn forget_leader(&mut self) -> bool {
        if self.role != Role::Follower || self.current_leader_id.is_none() {
            return false;
        }

        self.current_leader_id = None;

        true
    }

    pub fn status(&self) -> NodeStatus {
        NodeStatus {
            node_id: self.id,
            role: self.role,
            term: self.current_term,
            leader_id: self.current_leader_id,
            is_leader: self.is_leader(),
        }
    }
}
