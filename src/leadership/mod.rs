use std::time::Duration;

pub mod election;
pub mod status;
pub mod vote_tally;
pub mod watchdog;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LeaderConfirmationEvent {
    ResetWatchdogCounter,
}

/// Source of the randomized waits used by elections.
pub trait ElectionTimer: Send + 'static {
    fn next_elections_timeout(&self) -> Duration;
}
