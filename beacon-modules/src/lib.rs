//! Pluggable collaborators for `beacon` nodes: transports, election timers, load samplers and
//! request handlers.

#[macro_use]
extern crate log;
#[macro_use]
extern crate crossbeam_channel;
extern crate beacon;

mod communication;
mod election;
mod load;
mod request_handler;

pub use communication::inproc::inproc_transport::InProcTransport;
pub use communication::inproc::registry::InProcRegistry;
pub use election::fixed_election_timer::FixedElectionTimer;
pub use election::randomized_election_timer::RandomizedElectionTimer;
pub use load::ProcLoadSampler;
pub use request_handler::{NoopRequestHandler, RecordingRequestHandler};
