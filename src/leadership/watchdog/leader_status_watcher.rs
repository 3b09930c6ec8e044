use crossbeam_channel::Receiver;
use std::time::Duration;

use crate::leadership::status::administrator::LeaderElections;
use crate::leadership::watchdog::watchdog_handler::ResetLeadershipEventChannelRx;
use crate::node::state::{ProtectedNode, Role};

pub struct WatchLeaderStatusParams<Ea, Rl>
where
    Ea: LeaderElections,
    Rl: ResetLeadershipEventChannelRx,
{
    pub protected_node: ProtectedNode,
    pub election_administrator: Ea,
    pub watchdog_event_rx: Rl,
    pub leader_liveness_timeout: Duration,
}

/// Forgets a leader that stayed silent for the liveness timeout.
pub fn watch_leader_status<Ea, Rl>(
    params: WatchLeaderStatusParams<Ea, Rl>,
    terminate_worker_rx: Receiver<()>,
) where
    Ea: LeaderElections,
    Rl: ResetLeadershipEventChannelRx,
{
    let node_id = params.protected_node.lock().id;
    info!("Node {} Watch leader expiration status worker started", node_id);
    loop {
        let timeout = crossbeam_channel::after(params.leader_liveness_timeout);
        select!(
            recv(terminate_worker_rx) -> res  => {
                if res.is_err() {
                    error!("Abnormal exit for watch leader expiration status worker");
                }
                break
            },
            recv(timeout) -> _  => {
                propose_leader_expiration(&params)
            },
            recv(params.watchdog_event_rx.reset_leadership_watchdog_rx())
                -> watchdog_event_result => {
                if let Err(err) = watchdog_event_result {
                    error!("Invalid result from watchdog_event_rx: {}", err);
                    break
                }
                trace!("Node {} Received reset watchdog ", node_id);
                continue
            },
        );
    }
    info!("Node {} Watch leader expiration status worker stopped", node_id);
}

fn propose_leader_expiration<Ea, Rl>(params: &WatchLeaderStatusParams<Ea, Rl>)
where
    Ea: LeaderElections,
    Rl: ResetLeadershipEventChannelRx,
{
    let node = params.protected_node.lock();
    if let (Role::Follower, Some(leader_id)) = (node.role(), node.current_leader_id()) {
        info!(
            "Node {} Leader {} awaiting time elapsed. Starting new election",
            node.id, leader_id
        );

        params.election_administrator.forget_leader();
    }
}
