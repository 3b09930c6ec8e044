use crossbeam_channel::{Receiver, Sender};

use crate::common::raise_signal;
use crate::leadership::status::administrator::{LeaderElections, LeaderElectionsChannelRx};
use crate::leadership::status::LeaderElectionEvent;
use crate::leadership::watchdog::watchdog_handler::ResetLeadershipStatusWatchdog;
use crate::node::state::ProtectedNode;

pub struct NodeStatusWatcherParams<Ea, Rl>
where
    Ea: LeaderElections + LeaderElectionsChannelRx,
    Rl: ResetLeadershipStatusWatchdog,
{
    pub protected_node: ProtectedNode,
    pub election_administrator: Ea,
    pub leadership_status_watchdog_handler: Rl,
    pub leader_initial_heartbeat_tx: Sender<()>,
    pub leader_observed_tx: Sender<()>,
    pub election_request_tx: Sender<()>,
}

/// Applies leader election events to the node, one at a time.
pub fn run_node_status_watcher<Ea, Rl>(
    params: NodeStatusWatcherParams<Ea, Rl>,
    terminate_worker_rx: Receiver<()>,
) where
    Ea: LeaderElections + LeaderElectionsChannelRx,
    Rl: ResetLeadershipStatusWatchdog,
{
    let node_id = params.protected_node.lock().id;
    info!("Node {} Leader election status watcher worker started", node_id);
    loop {
        select!(
            recv(terminate_worker_rx) -> res  => {
                if res.is_err() {
                    error!("Abnormal exit for leader election status watcher worker");
                }
                break
            },
            recv(params.election_administrator.leader_election_event_rx()) -> event_result => {
                match event_result {
                    Ok(event) => change_node_leadership_state(&params, event),
                    Err(err) => {
                        error!("Node {} Cannot receive election event: {}", node_id, err);
                        break
                    }
                }
            }
        );
    }
    info!("Node {} Leader election status watcher worker stopped", node_id);
}

pub(crate) fn change_node_leadership_state<Ea, Rl>(
    params: &NodeStatusWatcherParams<Ea, Rl>,
    event: LeaderElectionEvent,
) where
    Ea: LeaderElections + LeaderElectionsChannelRx,
    Rl: ResetLeadershipStatusWatchdog,
{
    let mut node = params.protected_node.lock();

    match event {
        LeaderElectionEvent::PromoteNodeToCandidate(term) => {
            if node.become_candidate(term) {
                info!("Node {} Status changed to Candidate for term {}", node.id, term);
            } else {
                trace!("Node {} Candidacy for term {} rejected", node.id, term);
            }
        }
        LeaderElectionEvent::PromoteNodeToLeader(term) => {
            if node.promote_to_leader(term) {
                info!("Node {} Status changed to Leader for term {}", node.id, term);

                raise_signal(&params.leader_initial_heartbeat_tx);
            } else {
                info!("Node {} Election for term {} won too late", node.id, term);
            }
        }
        LeaderElectionEvent::ResetNodeToFollower(info) => {
            if node.apply_leader_claim(info.term, info.leader_id) {
                info!(
                    "Node {} Status changed to Follower of {} for term {}",
                    node.id, info.leader_id, info.term
                );

                raise_signal(&params.leader_observed_tx);
                params
                    .leadership_status_watchdog_handler
                    .reset_leadership_status_watchdog();
            } else if node.current_leader_id() == Some(info.leader_id) {
                params
                    .leadership_status_watchdog_handler
                    .reset_leadership_status_watchdog();
            } else if node.is_leaderless_follower() {
                // a live leader below the local term: campaign above it
                info!(
                    "Node {} Leader {} of lower term {} observed. Election requested",
                    node.id, info.leader_id, info.term
                );

                raise_signal(&params.election_request_tx);
            } else {
                trace!(
                    "Node {} Outdated leadership claim of {} for term {} ignored",
                    node.id, info.leader_id, info.term
                );
            }
        }
        LeaderElectionEvent::AbandonCandidacy => {
            if node.abandon_candidacy() {
                warn!("Node {} Candidacy abandoned for term {}", node.id, node.current_term());
            }
        }
        LeaderElectionEvent::ForgetLeader => {
            if node.forget_leader() {
                info!("Node {} Leader forgotten for term {}", node.id, node.current_term());

                raise_signal(&params.election_request_tx);
            }
        }
        LeaderElectionEvent::ObserveTerm(term) => {
            node.observe_term(term);
        }
    }
}
