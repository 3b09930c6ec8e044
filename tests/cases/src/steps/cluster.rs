use std::collections::HashMap;
use std::time::{Duration, Instant};

use beacon::{NodeHandle, NodeId, NodeTimings, Transport};
use beacon_modules::RecordingRequestHandler;

use crate::steps;

pub struct CaseCluster<T: Transport> {
	pub nodes: Vec<NodeHandle<T>>,
	pub request_handlers: HashMap<NodeId, RecordingRequestHandler>,
}

pub fn start_initial_cluster<F, T>(node_ids: Vec<u64>, timings: NodeTimings, transport_creator: F) -> CaseCluster<T>
where F: Fn(NodeId) -> T,
	  T: Transport {
	let mut nodes = Vec::new();
	let mut request_handlers = HashMap::new();

	for node_id in node_ids.into_iter().map(NodeId) {
		let transport = transport_creator(node_id);
		let (node, request_handler) = steps::start_recording_node(node_id, transport, timings);

		nodes.push(node);
		request_handlers.insert(node_id, request_handler);
	}

	CaseCluster { nodes, request_handlers }
}

impl <T: Transport> CaseCluster<T> {
	pub fn node(&self, node_id: NodeId) -> &NodeHandle<T> {
		self.nodes.iter()
			.find(|node| node.id() == node_id)
			.unwrap_or_else(|| panic!("node {} is running", node_id))
	}

	pub fn request_handler(&self, node_id: NodeId) -> &RecordingRequestHandler {
		&self.request_handlers[&node_id]
	}

	/// Leader every running node agrees on, if there is exactly one.
	pub fn single_leader(&self) -> Option<NodeId> {
		let leaders: Vec<NodeId> = self.nodes.iter()
			.filter(|node| node.is_leader())
			.map(|node| node.id())
			.collect();

		if leaders.len() != 1 {
			return None;
		}

		let leader_id = leaders[0];
		let agreed = self.nodes.iter().all(|node| node.leader_id() == Some(leader_id));

		if agreed { Some(leader_id) } else { None }
	}

	pub fn wait_for_single_leader(&self, timeout: Duration) -> NodeId {
		let started = Instant::now();
		while started.elapsed() < timeout {
			if let Some(leader_id) = self.single_leader() {
				info!("--Leader elected: {} after {:?}", leader_id, started.elapsed());
				return leader_id;
			}

			steps::sleep_ms(50);
		}

		for node in &self.nodes {
			error!("--{}", node.status());
		}
		panic!("cannot get a leader!")
	}

	pub fn terminate_node(&mut self, node_id: NodeId) {
		let position = self.nodes.iter()
			.position(|node| node.id() == node_id)
			.unwrap_or_else(|| panic!("node {} is running", node_id));

		self.nodes.remove(position).terminate();
		info!("--Node {} terminated", node_id);
	}

	pub fn terminate(self) {
		for node in self.nodes {
			node.terminate();
		}
	}
}
