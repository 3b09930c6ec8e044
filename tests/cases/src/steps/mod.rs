use beacon::{ElectionRetryPolicy, NodeConfiguration, NodeHandle, NodeId, NodeTimings, Transport};
use beacon_modules::{NoopRequestHandler, RandomizedElectionTimer, RecordingRequestHandler};
use beacon::{ElectionTimer, NoLoadSampler, RequestHandler};
use std::thread;
use std::time::Duration;

pub mod cluster;
pub mod probe;

pub fn sleep_ms(milliseconds: u64) {
	thread::sleep(Duration::from_millis(milliseconds));
}

/// Polls the condition every 10 ms until it holds or the timeout elapses.
pub fn wait_until<F: Fn() -> bool>(timeout: Duration, condition: F) -> bool {
	let attempts = timeout.as_millis() / 10;
	for _ in 0..attempts {
		if condition() {
			return true;
		}
		sleep_ms(10);
	}

	condition()
}

pub fn heartbeat_interval() -> Duration {
	Duration::from_millis(100)
}

/// Election bound used by the cases: startup wait, voting window and retries included.
pub fn election_timeout() -> Duration {
	Duration::from_secs(20)
}

pub fn election_timer() -> RandomizedElectionTimer {
	RandomizedElectionTimer::new(100, 600)
}

pub fn fast_timings() -> NodeTimings {
	NodeTimings {
		heartbeat_interval: heartbeat_interval(),
		voting_window: Some(Duration::from_millis(200)),
		retry: ElectionRetryPolicy {
			max_attempts: None,
			backoff_step: Duration::from_millis(50),
			max_backoff: Duration::from_millis(500),
		},
		..NodeTimings::default()
	}
}

pub fn start_node<T, Et, Rh>(node_id: NodeId, transport: T, election_timer: Et, request_handler: Rh, timings: NodeTimings) -> NodeHandle<T>
where T: Transport,
	  Et: ElectionTimer,
	  Rh: RequestHandler {
	let config = NodeConfiguration {
		node_id,
		transport,
		election_timer,
		load_sampler: NoLoadSampler,
		request_handler,
		timings,
	};

	beacon::start_node(config).expect("can start node")
}

pub fn start_quiet_node<T: Transport>(node_id: NodeId, transport: T, timings: NodeTimings) -> NodeHandle<T> {
	start_node(node_id, transport, election_timer(), NoopRequestHandler, timings)
}

pub fn start_recording_node<T: Transport>(node_id: NodeId, transport: T, timings: NodeTimings) -> (NodeHandle<T>, RecordingRequestHandler) {
	let handler = RecordingRequestHandler::new();
	let node = start_node(node_id, transport, election_timer(), handler.clone(), timings);

	(node, handler)
}
