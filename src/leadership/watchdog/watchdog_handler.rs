use crate::leadership::LeaderConfirmationEvent;
use crossbeam_channel::{Receiver, Sender};

pub trait ResetLeadershipStatusWatchdog: Clone + Send + 'static {
    fn reset_leadership_status_watchdog(&self);
}

pub trait ResetLeadershipEventChannelRx {
    fn reset_leadership_watchdog_rx(&self) -> &Receiver<LeaderConfirmationEvent>;
}

/// Carries leader confirmations to the leader status watcher. Pending resets coalesce.
#[derive(Debug, Clone)]
pub struct LeadershipStatusWatchdogHandler {
    reset_leadership_watchdog_tx: Sender<LeaderConfirmationEvent>,
    reset_leadership_watchdog_rx: Receiver<LeaderConfirmationEvent>,
}

impl LeadershipStatusWatchdogHandler {
    pub fn new() -> LeadershipStatusWatchdogHandler {
        let (reset_leadership_watchdog_tx, reset_leadership_watchdog_rx): (
            Sender<LeaderConfirmationEvent>,
            Receiver<LeaderConfirmationEvent>,
        ) = crossbeam_channel::bounded(1);

        LeadershipStatusWatchdogHandler {
            reset_leadership_watchdog_tx,
            reset_leadership_watchdog_rx,
        }
    }
}

impl Default for LeadershipStatusWatchdogHandler {
    fn default() -> Self {
        LeadershipStatusWatchdogHandler::new()
    }
}

impl ResetLeadershipStatusWatchdog for LeadershipStatusWatchdogHandler {
    fn reset_leadership_status_watchdog(&self) {
        let _ = self
            .reset_leadership_watchdog_tx
            .try_send(LeaderConfirmationEvent::ResetWatchdogCounter);
    }
}

impl ResetLeadershipEventChannelRx for LeadershipStatusWatchdogHandler {
    fn reset_leadership_watchdog_rx(&self) -> &Receiver<LeaderConfirmationEvent> {
        &self.reset_leadership_watchdog_rx
    }
}
