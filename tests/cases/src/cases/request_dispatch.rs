use beacon::{ClusterMessage, NodeId, RequestMessage};
use beacon_modules::{InProcRegistry, InProcTransport};
use std::time::Duration;

use crate::steps;
use crate::steps::probe::ProbePeer;

pub fn run() {
	let registry = InProcRegistry::new();
	let cluster = steps::cluster::start_initial_cluster(vec![1, 2], steps::fast_timings(),
		|node_id| InProcTransport::new(node_id, &registry).expect("can create transport"));
	let probe = ProbePeer::join(NodeId(50), &registry);

	//a duplicated request reaches the handler once
	let payload = vec![0u8, 1, 2, 254, 255];
	let request = RequestMessage::new(probe.node_id, "RUN_SCRIPT".to_string(), payload.clone());
	probe.send_request(NodeId(1), request.clone());
	probe.send_request(NodeId(1), request.clone());

	let handler = cluster.request_handler(NodeId(1));
	assert!(steps::wait_until(Duration::from_secs(1), || handler.total() > 0));
	steps::sleep_ms(200);

	assert_eq!(vec![request], handler.requests());
	assert_eq!(1, handler.count("RUN_SCRIPT", &payload));
	assert_eq!(0, cluster.request_handler(NodeId(2)).total());

	//node to node
	cluster.node(NodeId(1))
		.send_request(NodeId(2), "PING", b"hello".to_vec())
		.expect("can send request");

	let handler = cluster.request_handler(NodeId(2));
	assert!(steps::wait_until(Duration::from_secs(1), || handler.total() == 1));
	let received = &handler.requests()[0];
	assert_eq!(NodeId(1), received.sender);
	assert_eq!("PING", received.request_type);
	assert_eq!(b"hello".to_vec(), received.payload);

	//broadcast
	cluster.node(NodeId(2))
		.broadcast_request("STATUS", Vec::new())
		.expect("can broadcast request");

	let probe_received = probe.wait_for(Duration::from_secs(1), |message| match message {
		ClusterMessage::Request(request) => request.request_type == "STATUS",
		_ => false,
	});
	assert!(probe_received.is_some());
	let handler = cluster.request_handler(NodeId(1));
	assert!(steps::wait_until(Duration::from_secs(1), || handler.count("STATUS", &[]) == 1));

	probe.leave();
	cluster.terminate();
}
