use crate::leadership::status::{FollowerInfo, LeaderElectionEvent};
use crossbeam_channel::{Receiver, Sender};

pub trait LeaderElections: Clone + Send + Sync + 'static {
    fn reset_node_to_follower(&self, info: FollowerInfo);
    fn promote_node_to_leader(&self, term: u64);
    fn promote_node_to_candidate(&self, term: u64);
    fn abandon_candidacy(&self);
    fn forget_leader(&self);
    fn observe_term(&self, term: u64);
}

pub trait LeaderElectionsChannelRx {
    fn leader_election_event_rx(&self) -> &Receiver<LeaderElectionEvent>;
}

#[derive(Debug, Clone)]
pub struct ElectionAdministrator {
    leader_election_tx: Sender<LeaderElectionEvent>,
    leader_election_rx: Receiver<LeaderElectionEvent>,
}

impl ElectionAdministrator {
    pub fn new() -> ElectionAdministrator {
        let (leader_election_tx, leader_election_rx): (
            Sender<LeaderElectionEvent>,
            Receiver<LeaderElectionEvent>,
        ) = crossbeam_channel::unbounded();

        ElectionAdministrator {
            leader_election_tx,
            leader_election_rx,
        }
    }

    fn send_event(&self, event: LeaderElectionEvent) {
        if let Err(err) = self.leader_election_tx.send(event) {
            error!("Cannot send leader election event: {:?}", err.into_inner());
        }
    }
}

impl Default for ElectionAdministrator {
    fn default() -> Self {
        ElectionAdministrator::new()
    }
}

impl LeaderElections for ElectionAdministrator {
    fn reset_node_to_follower(&self, info: FollowerInfo) {
        self.send_event(LeaderElectionEvent::ResetNodeToFollower(info));
    }

    fn promote_node_to_leader(&self, term: u64) {
        self.send_event(LeaderElectionEvent::PromoteNodeToLeader(term));
    }

    fn promote_node_to_candidate(&self, term: u64) {
        self.send_event(LeaderElectionEvent::PromoteNodeToCandidate(term));
    }

    fn abandon_candidacy(&self) {
        self.send_event(LeaderElectionEvent::AbandonCandidacy);
    }

    fn forget_leader(&self) {
        self.send_event(LeaderElectionEvent::ForgetLeader);
    }

    fn observe_term(&self, term: u64) {
        self.send_event(LeaderElectionEvent::ObserveTerm(term));
    }
}

impl LeaderElectionsChannelRx for ElectionAdministrator {
    fn leader_election_event_rx(&self) -> &Receiver<LeaderElectionEvent> {
        &self.leader_election_rx
    }
}
