use crossbeam_channel::Receiver;
use std::time::Duration;

use super::MembershipTracker;
use crate::messages::NodeId;

pub struct MembershipSweeperParams {
    pub node_id: NodeId,
    pub membership: MembershipTracker,
    pub eviction_threshold: Duration,
}

/// Evicts silent members at a fixed rate equal to the eviction threshold.
pub fn sweep_membership(params: MembershipSweeperParams, terminate_worker_rx: Receiver<()>) {
    info!("Node {} Membership sweeper worker started", params.node_id);
    let ticker = crossbeam_channel::tick(params.eviction_threshold);
    loop {
        select!(
            recv(terminate_worker_rx) -> res  => {
                if res.is_err() {
                    error!("Abnormal exit for membership sweeper worker");
                }
                break
            },
            recv(ticker) -> _ => {
                evict_inactive_members(&params);
            },
        );
    }
    info!("Node {} Membership sweeper worker stopped", params.node_id);
}

fn evict_inactive_members(params: &MembershipSweeperParams) {
    let evicted = params.membership.evict_stale(params.eviction_threshold);

    for node_id in evicted {
        warn!("Node {} New inactive node: {}", params.node_id, node_id);
    }
}
