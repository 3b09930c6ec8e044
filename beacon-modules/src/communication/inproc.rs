pub mod inproc_transport;
pub mod registry;
