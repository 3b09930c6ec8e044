//! Leader election and membership tracking for a cluster of worker nodes.
//!
//! Nodes exchange elections, votes and heartbeats over a pluggable, unreliable transport and
//! converge on a single leader per cluster. The higher term always wins; equal terms resolve
//! to the higher node id.

#![warn(missing_debug_implementations, unsafe_code)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate crossbeam_channel;
#[macro_use]
extern crate derive_more;

mod common;
mod errors;
mod heartbeat;
mod leadership;
mod membership;
mod messages;
mod node;
mod request_handler;
mod transport;

pub use errors::{new_err, new_multiple_err, BeaconError};
pub use heartbeat::load::{LoadSampler, NoLoadSampler, NodeLoad};
pub use leadership::ElectionTimer;
pub use membership::MemberStatus;
pub use messages::{
    ClusterMessage, ElectionMessage, HeartbeatMessage, MessageId, MessageType, NodeId,
    RequestMessage, VoteMessage,
};
pub use node::configuration::{ElectionRetryPolicy, NodeConfiguration, NodeTimings};
pub use node::state::{LeadershipClaim, NodeStatus, Role};
pub use node::NodeHandle;
pub use request_handler::RequestHandler;
pub use transport::{InboundHandler, Transport};

/// Starts a node: registers its inbound handler on the transport and runs its workers.
pub fn start_node<T, Et, Ls, Rh>(
    node_config: NodeConfiguration<T, Et, Ls, Rh>,
) -> Result<NodeHandle<T>, BeaconError>
where
    T: Transport,
    Et: ElectionTimer,
    Ls: LoadSampler,
    Rh: RequestHandler,
{
    node::start(node_config)
}
