use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{new_err, Result};


/// Cluster-unique, totally ordered node identifier.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{}", _0)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Generates a random identifier.
    pub fn random() -> NodeId {
        NodeId(rand::random())
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

/// Generated identifier carried by every message.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn generate() -> MessageId {
        MessageId(Uuid::new_v4())
    }
}

/// Type discriminant of the wire messages.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
pub enum MessageType {
    #[display(fmt = "ELECTION")]
    Election,
    #[display(fmt = "VOTE")]
    Vote,
    #[display(fmt = "HEARTBEAT")]
    Heartbeat,
    #[display(fmt = "REQUEST")]
    Request,
    #[display(fmt = "UNRECOGNIZED")]
    Unrecognized,
}

/// Announces a candidacy for the term.
#[derive(Clone, Debug, PartialEq, Display, Serialize, Deserialize)]
#[display(fmt = "Election: candidate {} term {}", candidate, term)]
pub struct ElectionMessage {
    pub id: MessageId,
    pub candidate: NodeId,
    pub term: u64,
}

impl ElectionMessage {
    pub fn new(candidate: NodeId, term: u64) -> ElectionMessage {
        ElectionMessage {
            id: MessageId::generate(),
            candidate,
            term,
        }
    }
}

/// Vote cast by `voter` for `candidate` in response to its election message.
#[derive(Clone, Debug, PartialEq, Display, Serialize, Deserialize)]
#[display(fmt = "Vote: candidate {} voter {} term {}", candidate, voter, term)]
pub struct VoteMessage {
    pub id: MessageId,
    pub candidate: NodeId,
    pub voter: NodeId,
    pub term: u64,
}

impl VoteMessage {
    pub fn new(candidate: NodeId, voter: NodeId, term: u64) -> VoteMessage {
        VoteMessage {
            id: MessageId::generate(),
            candidate,
            voter,
            term,
        }
    }
}

/// Periodic liveness and status announcement.
#[derive(Clone, Debug, PartialEq, Display, Serialize, Deserialize)]
#[display(
    fmt = "Heartbeat: sender {} leader {} term {} cpu {:.2} mem {:.2}",
    sender,
    is_leader,
    term,
    cpu_usage,
    mem_usage
)]
pub struct HeartbeatMessage {
    pub id: MessageId,
    pub sender: NodeId,
    pub is_leader: bool,
    pub term: u64,
    pub cpu_usage: f32,
    pub mem_usage: f32,
    pub timestamp: DateTime<Utc>,
}

impl HeartbeatMessage {
    pub fn new(
        sender: NodeId,
        is_leader: bool,
        term: u64,
        cpu_usage: f32,
        mem_usage: f32,
    ) -> HeartbeatMessage {
        HeartbeatMessage {
            id: MessageId::generate(),
            sender,
            is_leader,
            term,
            cpu_usage,
            mem_usage,
            timestamp: Utc::now(),
        }
    }
}

/// Workload request routed to a node. The payload is opaque to the core.
#[derive(Clone, Debug, PartialEq, Eq, Display, Serialize, Deserialize)]
#[display(
    fmt = "Request: sender {} type {} payload size {}",
    sender,
    request_type,
    "payload.len()"
)]
pub struct RequestMessage {
    pub id: MessageId,
    pub sender: NodeId,
    pub request_type: String,
    pub payload: Vec<u8>,
}

impl RequestMessage {
    pub fn new(sender: NodeId, request_type: String, payload: Vec<u8>) -> RequestMessage {
        RequestMessage {
            id: MessageId::generate(),
            sender,
            request_type,
            payload,
        }
    }
}

/// Every message exchanged between cluster members.
///
/// The wire form is JSON with a `type` discriminant. Discriminants this version does not
/// know decode into `Unrecognized`, which receivers ignore.
#[derive(Clone, Debug, PartialEq, Display, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClusterMessage {
    Election(ElectionMessage),
    Vote(VoteMessage),
    Heartbeat(HeartbeatMessage),
    Request(RequestMessage),
    #[serde(other)]
    #[display(fmt = "Unrecognized message")]
    Unrecognized,
}

impl ClusterMessage {
    pub fn message_type(&self) -> MessageType {
        match self {
            ClusterMessage::Election(_) => MessageType::Election,
            ClusterMessage::Vote(_) => MessageType::Vote,
            ClusterMessage::Heartbeat(_) => MessageType::Heartbeat,
            ClusterMessage::Request(_) => MessageType::Request,
            ClusterMessage::Unrecognized => MessageType::Unrecognized,
        }
    }

    /// Message id; unrecognized messages carry none we can read.
    pub fn id(&self) -> Option<MessageId> {
        match self {
            ClusterMessage::Election(msg) => Some(msg.id),
            ClusterMessage::Vote(msg) => Some(msg.id),
            ClusterMessage::Heartbeat(msg) => Some(msg.id),
            ClusterMessage::Request(msg) => Some(msg.id),
            ClusterMessage::Unrecognized => None,
        }
    }

    /// Serializes the message into its JSON wire form.
    pub fn encode(&self) -> Result<Vec<u8>> {
        match serde_json::to_vec(self) {
            Ok(bytes) => Ok(bytes),
            Err(err) => new_err(
                format!("Cannot encode {} message", self.message_type()),
                err.to_string(),
            ),
        }
    }

    /// Parses a message from its JSON wire form.
    pub fn decode(bytes: &[u8]) -> Result<ClusterMessage> {
        match serde_json::from_slice(bytes) {
            Ok(message) => Ok(message),
            Err(err) => new_err("Cannot decode cluster message".to_string(), err.to_string()),
        }
    }
}

impl From<ElectionMessage> for ClusterMessage {
    fn from(msg: ElectionMessage) -> Self {
        ClusterMessage::Election(msg)
    }
}

impl From<VoteMessage> for ClusterMessage {
    fn from(msg: VoteMessage) -> Self {
        ClusterMessage::Vote(msg)
    }
}

impl From<HeartbeatMessage> for ClusterMessage {
    fn from(msg: HeartbeatMessage) -> Self {
        ClusterMessage::Heartbeat(msg)
    }
}

impl From<RequestMessage> for ClusterMessage {
    fn from(msg: RequestMessage) -> Self {
        ClusterMessage::Request(msg)
    }
}
