use beacon::{ElectionRetryPolicy, NodeId, NodeTimings, Role};
use beacon_modules::{InProcRegistry, InProcTransport};

use crate::steps;
use crate::steps::lossy_transport::LossyTransport;

pub fn run() {
	let registry = InProcRegistry::new();
	let max_attempts = 6;

	//an isolated node gives up its candidacy at a high term
	let isolated_transport = LossyTransport::new(NodeId(2), &registry, 0.0, 0.0);
	isolated_transport.partition();
	let isolated_timings = NodeTimings {
		allow_single_node_leadership: false,
		retry: ElectionRetryPolicy { max_attempts: Some(max_attempts), ..steps::fast_timings().retry },
		..steps::fast_timings()
	};
	let isolated = steps::start_quiet_node(NodeId(2), isolated_transport.clone(), isolated_timings);

	let abandoned = steps::wait_until(steps::election_timeout(), || {
		let status = isolated.status();
		status.role == Role::Follower && status.term >= u64::from(max_attempts)
	});
	assert!(abandoned, "isolated node abandons its candidacy: {}", isolated.status());
	let isolated_term = isolated.term();

	//the rest of the cluster elects a leader at a lower term
	let cluster = steps::cluster::start_initial_cluster(vec![1, 3], steps::fast_timings(),
		|node_id| InProcTransport::new(node_id, &registry).expect("can create transport"));
	let majority_leader_id = cluster.wait_for_single_leader(steps::election_timeout());
	let majority_term = cluster.node(majority_leader_id).term();
	assert!(majority_term < isolated_term, "majority term {} below {}", majority_term, isolated_term);
	assert_eq!(None, isolated.leader_id());

	//after healing every node agrees on one leader
	isolated_transport.heal();

	let agreed = steps::wait_until(steps::election_timeout(), || {
		let leader_id = isolated.leader_id();
		leader_id.is_some() && cluster.nodes.iter().all(|node| node.leader_id() == leader_id)
	});
	for node in &cluster.nodes {
		info!("--{}", node.status());
	}
	assert!(agreed, "no agreement after healing: {}", isolated.status());

	//the isolated node campaigned above the majority term and won
	let status = isolated.status();
	assert_eq!(Some(NodeId(2)), status.leader_id);
	assert!(status.is_leader);
	assert!(status.term > isolated_term);
	assert!(cluster.nodes.iter().all(|node| !node.is_leader()));

	isolated.terminate();
	cluster.terminate();
}
