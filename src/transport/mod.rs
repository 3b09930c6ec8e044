use crate::errors::BeaconError;
use crate::messages::{ClusterMessage, NodeId};

/// Callback invoked by the transport once per received message, on a transport-owned thread.
pub type InboundHandler = Box<dyn Fn(ClusterMessage) + Send + Sync + 'static>;

/// Delivery mechanism connecting cluster members.
///
/// Delivery is at-most-once: messages may be lost, duplicated or reordered, and nothing is
/// acknowledged. Send failures are reported to the caller; the node never retries them.
pub trait Transport: Clone + Send + Sync + 'static {
    /// Delivers the message to all other cluster members.
    fn broadcast(&self, message: ClusterMessage) -> Result<(), BeaconError>;

    /// Delivers the message to exactly one member.
    fn unicast(&self, message: ClusterMessage, recipient: NodeId) -> Result<(), BeaconError>;

    /// Installs the single inbound message callback.
    fn register_inbound_handler(&self, handler: InboundHandler) -> Result<(), BeaconError>;

    /// Stops delivery and releases transport resources.
    fn shutdown(&self);
}
