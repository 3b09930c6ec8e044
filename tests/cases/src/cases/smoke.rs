use beacon_modules::{InProcRegistry, InProcTransport};
use std::time::Duration;

use crate::steps;

pub fn run() {
	let registry = InProcRegistry::new();
	let cluster = steps::cluster::start_initial_cluster(vec![1, 2, 3], steps::fast_timings(),
		|node_id| InProcTransport::new(node_id, &registry).expect("can create transport"));

	let leader_id = cluster.wait_for_single_leader(steps::election_timeout());

	steps::sleep_ms(500);

	//leadership is stable without failures
	assert_eq!(Some(leader_id), cluster.single_leader());
	for node in &cluster.nodes {
		let all_members_known = steps::wait_until(Duration::from_secs(1), || node.members().len() == 2);
		assert!(all_members_known, "node {} knows every peer", node.id());
	}

	cluster.terminate();
}
