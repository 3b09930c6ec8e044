use crate::messages::RequestMessage;

pub mod dedup;
pub mod inbound;

/// Receives workload requests routed to this node.
///
/// Called on the transport delivery thread, once per distinct request.
pub trait RequestHandler: Send + Sync + 'static {
    fn on_request(&self, request: RequestMessage);
}
