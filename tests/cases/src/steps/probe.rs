use std::time::{Duration, Instant};

use beacon::{ClusterMessage, HeartbeatMessage, NodeId, RequestMessage, Transport};
use beacon_modules::{InProcRegistry, InProcTransport};
use crossbeam_channel::Receiver;

/// Hand-driven cluster member: sends crafted messages and records what it receives.
pub struct ProbePeer {
	pub node_id: NodeId,
	transport: InProcTransport,
	received_rx: Receiver<ClusterMessage>,
}

impl ProbePeer {
	pub fn join(node_id: NodeId, registry: &InProcRegistry) -> ProbePeer {
		let transport = InProcTransport::new(node_id, registry).expect("can create probe transport");
		let (received_tx, received_rx) = crossbeam_channel::unbounded();

		transport.register_inbound_handler(Box::new(move |message| {
			let _ = received_tx.send(message);
		})).expect("can register probe handler");

		ProbePeer { node_id, transport, received_rx }
	}

	pub fn send_heartbeat(&self, is_leader: bool, term: u64) -> HeartbeatMessage {
		let heartbeat = HeartbeatMessage::new(self.node_id, is_leader, term, 0.5, 0.5);
		self.transport.broadcast(heartbeat.clone().into()).expect("can broadcast heartbeat");

		heartbeat
	}

	pub fn send_request(&self, recipient: NodeId, request: RequestMessage) {
		self.transport.unicast(request.into(), recipient).expect("can send request");
	}

	/// Waits for a received message matching the predicate, dropping the others.
	pub fn wait_for<P>(&self, timeout: Duration, predicate: P) -> Option<ClusterMessage>
	where P: Fn(&ClusterMessage) -> bool {
		let deadline = Instant::now() + timeout;
		loop {
			let remaining = deadline.saturating_duration_since(Instant::now());
			match self.received_rx.recv_timeout(remaining) {
				Ok(message) if predicate(&message) => return Some(message),
				Ok(_) => continue,
				Err(_) => return None,
			}
		}
	}

	pub fn leave(self) {
		self.transport.shutdown();
	}
}
