use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::common::{self, raise_signal, signal_channel, Worker, WorkerPool};
use crate::errors::Result;
use crate::heartbeat::load::LoadSampler;
use crate::heartbeat::sender::{send_heartbeats, SendHeartbeatParams};
use crate::leadership::election::{run_election_manager, ElectionManagerParams};
use crate::leadership::status::administrator::ElectionAdministrator;
use crate::leadership::status::node_leadership_fsm::{
    run_node_status_watcher, NodeStatusWatcherParams,
};
use crate::leadership::vote_tally::BallotBox;
use crate::leadership::watchdog::leader_status_watcher::{
    watch_leader_status, WatchLeaderStatusParams,
};
use crate::leadership::watchdog::watchdog_handler::LeadershipStatusWatchdogHandler;
use crate::leadership::ElectionTimer;
use crate::membership::sweeper::{sweep_membership, MembershipSweeperParams};
use crate::membership::{MemberStatus, MembershipTracker};
use crate::messages::{NodeId, RequestMessage};
use crate::request_handler::dedup::RecentMessageFilter;
use crate::request_handler::inbound::InboundMessageProcessor;
use crate::request_handler::RequestHandler;
use crate::transport::Transport;

pub mod configuration;
pub mod state;

use configuration::{NodeConfiguration, NodeTimings};
use state::{Node, NodeStatus, ProtectedNode};

/// Running node. Dropping it without `terminate` leaves the node running.
#[derive(Debug)]
pub struct NodeHandle<T: Transport> {
    node_id: NodeId,
    protected_node: ProtectedNode,
    membership: MembershipTracker,
    transport: T,
    worker: Worker,
}

impl<T: Transport> NodeHandle<T> {
    pub fn id(&self) -> NodeId {
        self.node_id
    }

    pub fn status(&self) -> NodeStatus {
        self.protected_node.lock().status()
    }

    /// Known peers, ordered by node id.
    pub fn members(&self) -> Vec<MemberStatus> {
        self.membership.snapshot()
    }

    pub fn term(&self) -> u64 {
        self.protected_node.lock().current_term()
    }

    pub fn is_leader(&self) -> bool {
        self.protected_node.lock().is_leader()
    }

    pub fn leader_id(&self) -> Option<NodeId> {
        self.protected_node.lock().current_leader_id()
    }

    /// Sends a workload request to one node.
    pub fn send_request(
        &self,
        recipient: NodeId,
        request_type: &str,
        payload: Vec<u8>,
    ) -> Result<()> {
        let request = RequestMessage::new(self.node_id, request_type.to_string(), payload);
        trace!("Node {} Send {} to {}", self.node_id, request, recipient);

        self.transport.unicast(request.into(), recipient)
    }

    /// Sends a workload request to every other node.
    pub fn broadcast_request(&self, request_type: &str, payload: Vec<u8>) -> Result<()> {
        let request = RequestMessage::new(self.node_id, request_type.to_string(), payload);
        trace!("Node {} Broadcast {}", self.node_id, request);

        self.transport.broadcast(request.into())
    }

    /// Stops every worker and shuts the transport down.
    pub fn terminate(self) {
        self.worker.terminate();
    }
}

struct NodeMainParams<T, Et, Ls>
where
    T: Transport,
    Et: ElectionTimer,
    Ls: LoadSampler,
{
    protected_node: ProtectedNode,
    transport: T,
    election_timer: Et,
    load_sampler: Ls,
    timings: NodeTimings,
    membership: MembershipTracker,
    ballot_box: BallotBox,
    election_administrator: ElectionAdministrator,
}

/// Wires the node to its transport and starts the node workers.
pub fn start<T, Et, Ls, Rh>(config: NodeConfiguration<T, Et, Ls, Rh>) -> Result<NodeHandle<T>>
where
    T: Transport,
    Et: ElectionTimer,
    Ls: LoadSampler,
    Rh: RequestHandler,
{
    let node_id = config.node_id;
    let protected_node = Arc::new(Mutex::new(Node::new(node_id)));
    let membership = MembershipTracker::new();
    let ballot_box = BallotBox::new();
    let election_administrator = ElectionAdministrator::new();

    let processor = InboundMessageProcessor {
        node_id,
        transport: config.transport.clone(),
        election_administrator: election_administrator.clone(),
        membership: membership.clone(),
        ballot_box: ballot_box.clone(),
        request_handler: config.request_handler,
        request_filter: Mutex::new(RecentMessageFilter::new(
            config.timings.request_dedup_window,
        )),
    };
    config
        .transport
        .register_inbound_handler(Box::new(move |message| processor.process(message)))?;

    let worker = common::run_worker(
        run,
        NodeMainParams {
            protected_node: protected_node.clone(),
            transport: config.transport.clone(),
            election_timer: config.election_timer,
            load_sampler: config.load_sampler,
            timings: config.timings,
            membership: membership.clone(),
            ballot_box,
            election_administrator,
        },
    );

    Ok(NodeHandle {
        node_id,
        protected_node,
        membership,
        transport: config.transport,
        worker,
    })
}

fn run<T, Et, Ls>(params: NodeMainParams<T, Et, Ls>, terminate_worker_rx: Receiver<()>)
where
    T: Transport,
    Et: ElectionTimer,
    Ls: LoadSampler,
{
    let node_id = params.protected_node.lock().id;

    let (leader_initial_heartbeat_tx, leader_initial_heartbeat_rx) = signal_channel();
    let (leader_observed_tx, leader_observed_rx) = signal_channel();
    let (election_request_tx, election_request_rx) = signal_channel();
    let watchdog_handler = LeadershipStatusWatchdogHandler::new();

    let status_watcher_worker = common::run_worker(
        run_node_status_watcher,
        NodeStatusWatcherParams {
            protected_node: params.protected_node.clone(),
            election_administrator: params.election_administrator.clone(),
            leadership_status_watchdog_handler: watchdog_handler.clone(),
            leader_initial_heartbeat_tx,
            leader_observed_tx,
            election_request_tx: election_request_tx.clone(),
        },
    );

    let election_worker = common::run_worker(
        run_election_manager,
        ElectionManagerParams {
            protected_node: params.protected_node.clone(),
            election_administrator: params.election_administrator.clone(),
            transport: params.transport.clone(),
            election_timer: params.election_timer,
            ballot_box: params.ballot_box.clone(),
            membership: params.membership.clone(),
            election_request_rx,
            leader_observed_rx,
            voting_window: params.timings.voting_window,
            retry_policy: params.timings.retry,
            allow_single_node_leadership: params.timings.allow_single_node_leadership,
        },
    );

    let heartbeat_worker = common::run_worker(
        send_heartbeats,
        SendHeartbeatParams {
            protected_node: params.protected_node.clone(),
            transport: params.transport.clone(),
            load_sampler: params.load_sampler,
            heartbeat_interval: params.timings.heartbeat_interval,
            leader_initial_heartbeat_rx,
        },
    );

    let sweeper_worker = common::run_worker(
        sweep_membership,
        MembershipSweeperParams {
            node_id,
            membership: params.membership.clone(),
            eviction_threshold: params.timings.eviction_threshold(),
        },
    );

    let mut workers = vec![
        status_watcher_worker,
        election_worker,
        heartbeat_worker,
        sweeper_worker,
    ];

    if let Some(leader_liveness_timeout) = params.timings.leader_liveness_timeout {
        let watchdog_worker = common::run_worker(
            watch_leader_status,
            WatchLeaderStatusParams {
                protected_node: params.protected_node.clone(),
                election_administrator: params.election_administrator.clone(),
                watchdog_event_rx: watchdog_handler,
                leader_liveness_timeout,
            },
        );
        workers.push(watchdog_worker);
    }

    let worker_pool = WorkerPool::new(workers);

    info!("Node {} started", node_id);
    raise_signal(&election_request_tx);

    let terminate_result = terminate_worker_rx.recv();
    if let Err(e) = terminate_result {
        error!("Abnormal exit for node: {}", e);
    }

    info!("Node {} termination requested", node_id);

    worker_pool.terminate();
    worker_pool.join();
    params.transport.shutdown();

    info!("Node {} shutting down", node_id);
}
