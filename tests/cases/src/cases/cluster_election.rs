use beacon_modules::{InProcRegistry, InProcTransport};

use crate::steps;

pub fn run() {
	let registry = InProcRegistry::new();
	let cluster = steps::cluster::start_initial_cluster(vec![1, 2, 3, 4, 5], steps::fast_timings(),
		|node_id| InProcTransport::new(node_id, &registry).expect("can create transport"));

	let leader_id = cluster.wait_for_single_leader(steps::election_timeout());
	let term = cluster.node(leader_id).term();

	for node in &cluster.nodes {
		let status = node.status();
		assert_eq!(Some(leader_id), status.leader_id);
		assert_eq!(term, status.term);
		assert_eq!(node.id() == leader_id, status.is_leader);
	}

	cluster.terminate();
}
