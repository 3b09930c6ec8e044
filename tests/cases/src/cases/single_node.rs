use beacon::NodeId;
use beacon_modules::{InProcRegistry, InProcTransport};

use crate::steps;

pub fn run() {
	let registry = InProcRegistry::new();
	let transport = InProcTransport::new(NodeId(1), &registry).expect("can create transport");
	let node = steps::start_quiet_node(NodeId(1), transport, steps::fast_timings());

	let cluster = steps::cluster::CaseCluster { nodes: vec![node], request_handlers: Default::default() };
	let leader_id = cluster.wait_for_single_leader(steps::election_timeout());

	assert_eq!(NodeId(1), leader_id);
	assert_eq!(1, cluster.node(leader_id).term());
	assert!(cluster.node(leader_id).members().is_empty());

	cluster.terminate();
}
