use parking_lot::Mutex;

use crate::leadership::status::administrator::LeaderElections;
use crate::leadership::status::FollowerInfo;
use crate::leadership::vote_tally::BallotBox;
use crate::membership::{HeartbeatApplied, MembershipTracker};
use crate::messages::{
    ClusterMessage, ElectionMessage, HeartbeatMessage, NodeId, RequestMessage, VoteMessage,
};
use crate::request_handler::dedup::RecentMessageFilter;
use crate::request_handler::RequestHandler;
use crate::transport::Transport;

/// Dispatches messages delivered by the transport.
pub struct InboundMessageProcessor<T, Ea, Rh>
where
    T: Transport,
    Ea: LeaderElections,
    Rh: RequestHandler,
{
    pub node_id: NodeId,
    pub transport: T,
    pub election_administrator: Ea,
    pub membership: MembershipTracker,
    pub ballot_box: BallotBox,
    pub request_handler: Rh,
    pub request_filter: Mutex<RecentMessageFilter>,
}

impl<T, Ea, Rh> InboundMessageProcessor<T, Ea, Rh>
where
    T: Transport,
    Ea: LeaderElections,
    Rh: RequestHandler,
{
    pub fn process(&self, message: ClusterMessage) {
        match message {
            ClusterMessage::Election(election) => self.handle_election(election),
            ClusterMessage::Vote(vote) => self.handle_vote(vote),
            ClusterMessage::Heartbeat(heartbeat) => self.handle_heartbeat(heartbeat),
            ClusterMessage::Request(request) => self.handle_request(request),
            ClusterMessage::Unrecognized => {
                trace!("Node {} Unrecognized message ignored", self.node_id);
            }
        }
    }

    fn handle_election(&self, election: ElectionMessage) {
        if election.candidate == self.node_id {
            return;
        }
        trace!("Node {} Received {}", self.node_id, election);

        self.election_administrator.observe_term(election.term);

        let vote = VoteMessage::new(election.candidate, self.node_id, election.term);
        if let Err(err) = self.transport.broadcast(vote.into()) {
            error!(
                "Node {} Vote for {} failed: {}",
                self.node_id, election.candidate, err
            );
        }
    }

    fn handle_vote(&self, vote: VoteMessage) {
        if vote.voter == self.node_id {
            return;
        }

        if self.membership.apply_vote(&vote) {
            info!("Node {} New member: {}", self.node_id, vote.voter);
        }

        let counted = self.ballot_box.record(&vote);
        trace!("Node {} Received {} counted {}", self.node_id, vote, counted);
    }

    fn handle_heartbeat(&self, heartbeat: HeartbeatMessage) {
        if heartbeat.sender == self.node_id {
            return;
        }

        if let HeartbeatApplied::NewMember = self.membership.apply_heartbeat(&heartbeat) {
            info!("Node {} New member: {}", self.node_id, heartbeat.sender);
        }

        if heartbeat.is_leader {
            self.election_administrator
                .reset_node_to_follower(FollowerInfo {
                    term: heartbeat.term,
                    leader_id: heartbeat.sender,
                });
        } else {
            self.election_administrator.observe_term(heartbeat.term);
        }
    }

    fn handle_request(&self, request: RequestMessage) {
        if !self.request_filter.lock().check_and_remember(request.id) {
            trace!("Node {} Duplicate request {} ignored", self.node_id, request.id);
            return;
        }

        trace!("Node {} Received {}", self.node_id, request);
        self.request_handler.on_request(request);
    }
}
