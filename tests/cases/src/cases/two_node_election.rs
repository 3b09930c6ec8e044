use beacon::{NodeId, Role};
use beacon_modules::{InProcRegistry, InProcTransport};

use crate::steps;

pub fn run() {
	let registry = InProcRegistry::new();
	let cluster = steps::cluster::start_initial_cluster(vec![1, 2], steps::fast_timings(),
		|node_id| InProcTransport::new(node_id, &registry).expect("can create transport"));

	let leader_id = cluster.wait_for_single_leader(steps::election_timeout());
	let follower_id = if leader_id == NodeId(1) { NodeId(2) } else { NodeId(1) };

	let leader = cluster.node(leader_id).status();
	let follower = cluster.node(follower_id).status();

	assert_eq!(Role::Leader, leader.role);
	assert_eq!(Role::Follower, follower.role);
	assert_eq!(Some(leader_id), follower.leader_id);
	assert_eq!(leader.term, follower.term);

	cluster.terminate();
}
