#[macro_use]
extern crate log;
extern crate chrono;
extern crate env_logger;

use std::env;
use std::io::Write;
use std::thread;
use std::time::Duration;

use chrono::prelude::{DateTime, Local};

extern crate beacon;
extern crate beacon_modules;

use beacon::{NodeConfiguration, NodeHandle, NodeId, NodeTimings};
use beacon_modules::{
    InProcRegistry, InProcTransport, ProcLoadSampler, RandomizedElectionTimer,
    RecordingRequestHandler,
};

fn init_logger() {
    env_logger::builder()
        .format(|buf, record| {
            let now: DateTime<Local> = Local::now();
            writeln!(
                buf,
                "{:5}: {} - {}",
                record.level(),
                now.format("%H:%M:%S.%3f"),
                record.args()
            )
        })
        .init();
}

fn main() {
    init_logger();

    let node_count: u64 = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(3);
    let run_time_secs: u64 = env::args()
        .nth(2)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(20);

    info!("Cluster of {} nodes started", node_count);

    let registry = InProcRegistry::new();
    let nodes: Vec<NodeHandle<InProcTransport>> = (1..=node_count)
        .map(|node_id| start_node(NodeId(node_id), &registry))
        .collect();

    for _ in 0..run_time_secs {
        thread::sleep(Duration::from_secs(1));

        for node in &nodes {
            info!("{} members {}", node.status(), node.members().len());
        }
    }

    for node in nodes {
        node.terminate();
    }

    info!("Cluster stopped");
}

fn start_node(node_id: NodeId, registry: &InProcRegistry) -> NodeHandle<InProcTransport> {
    let transport = InProcTransport::new(node_id, registry).expect("can create transport");

    let node_config = NodeConfiguration {
        node_id,
        transport,
        election_timer: RandomizedElectionTimer::default(),
        load_sampler: ProcLoadSampler::new(),
        request_handler: RecordingRequestHandler::new(),
        timings: NodeTimings {
            leader_liveness_timeout: Some(Duration::from_secs(5)),
            ..NodeTimings::default()
        },
    };

    beacon::start_node(node_config).expect("can start node")
}
