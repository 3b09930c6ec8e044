use crossbeam_channel::Receiver;
use std::time::Duration;

use crate::heartbeat::load::LoadSampler;
use crate::messages::HeartbeatMessage;
use crate::node::state::ProtectedNode;
use crate::transport::Transport;

pub struct SendHeartbeatParams<T, Ls>
where
    T: Transport,
    Ls: LoadSampler,
{
    pub protected_node: ProtectedNode,
    pub transport: T,
    pub load_sampler: Ls,
    pub heartbeat_interval: Duration,
    pub leader_initial_heartbeat_rx: Receiver<()>,
}

/// Broadcasts the node status at a fixed rate, starting immediately.
pub fn send_heartbeats<T, Ls>(params: SendHeartbeatParams<T, Ls>, terminate_worker_rx: Receiver<()>)
where
    T: Transport,
    Ls: LoadSampler,
{
    let node_id = params.protected_node.lock().id;
    info!("Node {} Heartbeat sender worker started", node_id);

    send_heartbeat(&params);

    let ticker = crossbeam_channel::tick(params.heartbeat_interval);
    loop {
        select!(
            recv(terminate_worker_rx) -> res  => {
                if res.is_err() {
                    error!("Abnormal exit for heartbeat sender worker");
                }
                break
            },
            recv(ticker) -> _  => {
                send_heartbeat(&params)
            },
            recv(params.leader_initial_heartbeat_rx) -> res  => {
                if res.is_err() {
                    error!("Node {} Initial heartbeat channel closed", node_id);
                    break
                }
                trace!("Node {} Sending initial heartbeat...", node_id);
                send_heartbeat(&params)
            },
        );
    }
    info!("Node {} Heartbeat sender worker stopped", node_id);
}

fn send_heartbeat<T, Ls>(params: &SendHeartbeatParams<T, Ls>)
where
    T: Transport,
    Ls: LoadSampler,
{
    let (node_id, is_leader, term) = {
        let node = params.protected_node.lock();
        (node.id, node.is_leader(), node.current_term())
    };
    let load = params.load_sampler.sample();

    let heartbeat =
        HeartbeatMessage::new(node_id, is_leader, term, load.cpu_usage, load.mem_usage);

    trace!("Node {} Send {}", node_id, heartbeat);
    if let Err(err) = params.transport.broadcast(heartbeat.into()) {
        error!("Node {} Send heartbeat failed: {}", node_id, err)
    }
}
