use std::time::Duration;

use crate::heartbeat::load::LoadSampler;
use crate::leadership::ElectionTimer;
use crate::messages::NodeId;
use crate::request_handler::RequestHandler;
use crate::transport::Transport;

/// Retry rules for failed election rounds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ElectionRetryPolicy {
    /// Rounds before the candidacy is abandoned. `None` retries forever.
    pub max_attempts: Option<u32>,
    pub backoff_step: Duration,
    pub max_backoff: Duration,
}

impl ElectionRetryPolicy {
    /// Extra wait added before the retry following `attempt` failed rounds.
    pub fn backoff(&self, attempt: u32) -> Duration {
        match self.backoff_step.checked_mul(attempt) {
            Some(backoff) if backoff < self.max_backoff => backoff,
            _ => self.max_backoff,
        }
    }

    pub fn attempts_exhausted(&self, attempt: u32) -> bool {
        match self.max_attempts {
            Some(max_attempts) => attempt >= max_attempts,
            None => false,
        }
    }
}

impl Default for ElectionRetryPolicy {
    fn default() -> Self {
        ElectionRetryPolicy {
            max_attempts: Some(64),
            backoff_step: Duration::from_millis(100),
            max_backoff: Duration::from_millis(1000),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeTimings {
    pub heartbeat_interval: Duration,
    /// Vote collection window. `None` draws it from the election timer.
    pub voting_window: Option<Duration>,
    /// Silence from the current leader after which a follower starts a new election.
    pub leader_liveness_timeout: Option<Duration>,
    pub retry: ElectionRetryPolicy,
    /// A node that has seen no peers and got no votes elects itself.
    pub allow_single_node_leadership: bool,
    /// Number of recent request ids kept for duplicate detection. Zero disables it.
    pub request_dedup_window: usize,
}

impl NodeTimings {
    /// Silence after which a member is evicted.
    pub fn eviction_threshold(&self) -> Duration {
        self.heartbeat_interval * 2
    }
}

impl Default for NodeTimings {
    fn default() -> Self {
        NodeTimings {
            heartbeat_interval: Duration::from_millis(1000),
            voting_window: None,
            leader_liveness_timeout: None,
            retry: ElectionRetryPolicy::default(),
            allow_single_node_leadership: true,
            request_dedup_window: 1024,
        }
    }
}

#[derive(Clone, Debug)]
pub struct NodeConfiguration<T, Et, Ls, Rh>
where
    T: Transport,
    Et: ElectionTimer,
    Ls: LoadSampler,
    Rh: RequestHandler,
{
    pub node_id: NodeId,
    pub transport: T,
    pub election_timer: Et,
    pub load_sampler: Ls,
    pub request_handler: Rh,
    pub timings: NodeTimings,
}
