use beacon::NodeTimings;
use beacon_modules::{InProcRegistry, InProcTransport};
use std::time::Duration;

use crate::steps;

pub fn run() {
	let timings = NodeTimings {
		leader_liveness_timeout: Some(Duration::from_millis(500)),
		..steps::fast_timings()
	};

	let registry = InProcRegistry::new();
	let mut cluster = steps::cluster::start_initial_cluster(vec![1, 2, 3], timings,
		|node_id| InProcTransport::new(node_id, &registry).expect("can create transport"));

	let old_leader_id = cluster.wait_for_single_leader(steps::election_timeout());
	let old_term = cluster.node(old_leader_id).term();

	cluster.terminate_node(old_leader_id);

	let new_leader_id = cluster.wait_for_single_leader(steps::election_timeout());

	assert_ne!(old_leader_id, new_leader_id);
	assert!(cluster.node(new_leader_id).term() > old_term);

	cluster.terminate();
}
