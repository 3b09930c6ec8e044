use beacon::{RequestHandler, RequestMessage};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Discards requests after logging them.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct NoopRequestHandler;

impl RequestHandler for NoopRequestHandler {
    fn on_request(&self, request: RequestMessage) {
        info!("Request ignored: {}", request);
    }
}

/// Keeps every received request and counts them per type and payload.
#[derive(Clone, Debug, Default)]
pub struct RecordingRequestHandler {
    requests: Arc<Mutex<Vec<RequestMessage>>>,
    counts: Arc<Mutex<HashMap<(String, Vec<u8>), usize>>>,
}

impl RecordingRequestHandler {
    pub fn new() -> RecordingRequestHandler {
        RecordingRequestHandler::default()
    }

    pub fn requests(&self) -> Vec<RequestMessage> {
        self.requests.lock().clone()
    }

    pub fn total(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn count(&self, request_type: &str, payload: &[u8]) -> usize {
        self.counts
            .lock()
            .get(&(request_type.to_string(), payload.to_vec()))
            .cloned()
            .unwrap_or(0)
    }
}

impl RequestHandler for RecordingRequestHandler {
    fn on_request(&self, request: RequestMessage) {
        info!("Request received: {}", request);

        *self
            .counts
            .lock()
            .entry((request.request_type.clone(), request.payload.clone()))
            .or_insert(0) += 1;
        self.requests.lock().push(request);
    }
}
