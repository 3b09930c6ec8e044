use beacon::{new_err, BeaconError, NodeId};
use crossbeam_channel::Sender;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Directory of the in-process transports of one cluster.
///
/// Clones share the same directory. Separate registries are fully isolated clusters.
#[derive(Clone, Debug, Default)]
pub struct InProcRegistry {
    endpoints: Arc<RwLock<HashMap<NodeId, Sender<Vec<u8>>>>>,
}

impl InProcRegistry {
    pub fn new() -> InProcRegistry {
        InProcRegistry::default()
    }

    pub(crate) fn register(
        &self,
        node_id: NodeId,
        frame_tx: Sender<Vec<u8>>,
    ) -> Result<(), BeaconError> {
        let mut endpoints = self.endpoints.write();
        if endpoints.contains_key(&node_id) {
            return new_err(
                format!("Node {} is already registered", node_id),
                String::new(),
            );
        }

        endpoints.insert(node_id, frame_tx);
        Ok(())
    }

    pub(crate) fn deregister(&self, node_id: NodeId) {
        self.endpoints.write().remove(&node_id);
    }

    pub(crate) fn endpoint(&self, node_id: NodeId) -> Option<Sender<Vec<u8>>> {
        self.endpoints.read().get(&node_id).cloned()
    }

    pub(crate) fn peer_endpoints(&self, node_id: NodeId) -> Vec<(NodeId, Sender<Vec<u8>>)> {
        self.endpoints
            .read()
            .iter()
            .filter(|(id, _)| **id != node_id)
            .map(|(id, frame_tx)| (*id, frame_tx.clone()))
            .collect()
    }

    /// Registered node ids in ascending order.
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.endpoints.read().keys().cloned().collect();
        nodes.sort();

        nodes
    }

    pub fn contains(&self, node_id: NodeId) -> bool {
        self.endpoints.read().contains_key(&node_id)
    }
}
