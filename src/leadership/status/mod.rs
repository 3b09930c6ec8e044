use crate::messages::NodeId;

pub mod administrator;
pub mod node_leadership_fsm;

/// Node state change requests, applied in order by the node status watcher.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LeaderElectionEvent {
    PromoteNodeToCandidate(u64), //term
    PromoteNodeToLeader(u64), //term
    ResetNodeToFollower(FollowerInfo),
    AbandonCandidacy,
    ForgetLeader,
    ObserveTerm(u64),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FollowerInfo {
    pub term: u64,
    pub leader_id: NodeId,
}
