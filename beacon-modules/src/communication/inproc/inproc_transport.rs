use beacon::{new_err, new_multiple_err, BeaconError, ClusterMessage, InboundHandler, NodeId, Transport};
use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::thread::JoinHandle;

use super::registry::InProcRegistry;

#[derive(Debug)]
struct Delivery {
    join_handle: JoinHandle<()>,
    terminate_tx: Sender<()>,
}

#[derive(Debug)]
struct Endpoint {
    node_id: NodeId,
    registry: InProcRegistry,
    frame_rx: Receiver<Vec<u8>>,
    delivery: Mutex<Option<Delivery>>,
    shut_down: AtomicBool,
}

/// In-memory implementation of the Transport trait.
///
/// Messages travel as encoded frames through unbounded channels. Frames received before the
/// inbound handler is registered are kept and delivered once it is.
#[derive(Clone, Debug)]
pub struct InProcTransport {
    endpoint: Arc<Endpoint>,
}

impl InProcTransport {
    /// Creates the transport of `node_id` and registers it in the cluster registry.
    pub fn new(node_id: NodeId, registry: &InProcRegistry) -> Result<InProcTransport, BeaconError> {
        let (frame_tx, frame_rx): (Sender<Vec<u8>>, Receiver<Vec<u8>>) =
            crossbeam_channel::unbounded();

        registry.register(node_id, frame_tx)?;

        Ok(InProcTransport {
            endpoint: Arc::new(Endpoint {
                node_id,
                registry: registry.clone(),
                frame_rx,
                delivery: Mutex::new(None),
                shut_down: AtomicBool::new(false),
            }),
        })
    }

    pub fn node_id(&self) -> NodeId {
        self.endpoint.node_id
    }

    fn check_running(&self) -> Result<(), BeaconError> {
        if self.endpoint.shut_down.load(Ordering::SeqCst) {
            return new_err(
                format!("Transport of node {} is shut down", self.endpoint.node_id),
                String::new(),
            );
        }

        Ok(())
    }
}

impl Transport for InProcTransport {
    fn broadcast(&self, message: ClusterMessage) -> Result<(), BeaconError> {
        self.check_running()?;
        let frame = message.encode()?;

        let errors: Vec<BeaconError> = self
            .endpoint
            .registry
            .peer_endpoints(self.endpoint.node_id)
            .into_iter()
            .filter_map(|(node_id, frame_tx)| {
                frame_tx.send(frame.clone()).err().map(|err| {
                    BeaconError::new(format!("Cannot deliver to node {}", node_id), err.to_string())
                })
            })
            .collect();

        if !errors.is_empty() {
            return new_multiple_err(
                format!("Broadcast of {} failed", message.message_type()),
                errors,
            );
        }

        Ok(())
    }

    fn unicast(&self, message: ClusterMessage, recipient: NodeId) -> Result<(), BeaconError> {
        self.check_running()?;

        let frame_tx = match self.endpoint.registry.endpoint(recipient) {
            Some(frame_tx) => frame_tx,
            None => {
                return new_err(format!("Unknown recipient node {}", recipient), String::new())
            }
        };

        let frame = message.encode()?;
        if let Err(err) = frame_tx.send(frame) {
            return new_err(
                format!("Cannot deliver {} to node {}", message.message_type(), recipient),
                err.to_string(),
            );
        }

        Ok(())
    }

    fn register_inbound_handler(&self, handler: InboundHandler) -> Result<(), BeaconError> {
        self.check_running()?;

        let mut delivery = self.endpoint.delivery.lock();
        if delivery.is_some() {
            return new_err(
                format!(
                    "Inbound handler of node {} is already registered",
                    self.endpoint.node_id
                ),
                String::new(),
            );
        }

        let (terminate_tx, terminate_rx): (Sender<()>, Receiver<()>) =
            crossbeam_channel::unbounded();
        let node_id = self.endpoint.node_id;
        let frame_rx = self.endpoint.frame_rx.clone();

        let join_handle =
            thread::spawn(move || deliver_frames(node_id, frame_rx, terminate_rx, handler));

        *delivery = Some(Delivery {
            join_handle,
            terminate_tx,
        });

        Ok(())
    }

    fn shutdown(&self) {
        if self.endpoint.shut_down.swap(true, Ordering::SeqCst) {
            return;
        }

        self.endpoint.registry.deregister(self.endpoint.node_id);

        let delivery = self.endpoint.delivery.lock().take();
        if let Some(delivery) = delivery {
            if delivery.terminate_tx.send(()).is_err() {
                error!("Cannot send termination signal")
            }

            // the handler may shut its own transport down
            if delivery.join_handle.thread().id() != thread::current().id()
                && delivery.join_handle.join().is_err()
            {
                error!("Node {} Delivery thread panicked", self.endpoint.node_id)
            }
        }

        info!("Node {} Transport shut down", self.endpoint.node_id);
    }
}

fn deliver_frames(
    node_id: NodeId,
    frame_rx: Receiver<Vec<u8>>,
    terminate_rx: Receiver<()>,
    handler: InboundHandler,
) {
    trace!("Node {} Delivery worker started", node_id);
    loop {
        select!(
            recv(terminate_rx) -> _ => break,
            recv(frame_rx) -> res => {
                let frame = match res {
                    Ok(frame) => frame,
                    Err(_) => break,
                };

                match ClusterMessage::decode(&frame) {
                    Ok(message) => handler(message),
                    Err(err) => warn!("Node {} Malformed frame dropped: {}", node_id, err),
                }
            }
        );
    }
    trace!("Node {} Delivery worker stopped", node_id);
}
