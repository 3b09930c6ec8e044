use beacon::{NodeId, Role};
use beacon_modules::{InProcRegistry, InProcTransport};
use std::time::Duration;

use crate::steps;
use crate::steps::probe::ProbePeer;

pub fn run() {
	let registry = InProcRegistry::new();
	let cluster = steps::cluster::start_initial_cluster(vec![1, 2, 3], steps::fast_timings(),
		|node_id| InProcTransport::new(node_id, &registry).expect("can create transport"));

	let old_leader_id = cluster.wait_for_single_leader(steps::election_timeout());
	let old_term = cluster.node(old_leader_id).term();

	//a higher term claim demotes the elected leader
	let usurper = ProbePeer::join(NodeId(99), &registry);
	let new_term = old_term + 10;
	usurper.send_heartbeat(true, new_term);

	let adopted = steps::wait_until(Duration::from_secs(2), || cluster.nodes.iter().all(|node| {
		let status = node.status();
		status.leader_id == Some(usurper.node_id) && status.term == new_term
	}));
	assert!(adopted, "every node follows the higher term claim");
	assert_eq!(Role::Follower, cluster.node(old_leader_id).status().role);

	//the demoted leader announces itself as follower
	let demoted_heartbeat = usurper.wait_for(Duration::from_secs(1), |message| match message {
		beacon::ClusterMessage::Heartbeat(heartbeat) => heartbeat.sender == old_leader_id && heartbeat.term == new_term,
		_ => false,
	});
	match demoted_heartbeat {
		Some(beacon::ClusterMessage::Heartbeat(heartbeat)) => assert!(!heartbeat.is_leader),
		other => panic!("no heartbeat from the demoted leader: {:?}", other),
	}

	//a lower term claim arriving later changes nothing
	let latecomer = ProbePeer::join(NodeId(98), &registry);
	latecomer.send_heartbeat(true, old_term + 5);
	steps::sleep_ms(300);

	for node in &cluster.nodes {
		let status = node.status();
		assert_eq!(Some(usurper.node_id), status.leader_id);
		assert_eq!(new_term, status.term);
	}

	//so does a repeated claim
	usurper.send_heartbeat(true, new_term);
	steps::sleep_ms(300);
	assert!(cluster.nodes.iter().all(|node| node.leader_id() == Some(usurper.node_id)));

	latecomer.leave();
	usurper.leave();
	cluster.terminate();
}
