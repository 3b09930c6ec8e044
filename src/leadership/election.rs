use crossbeam_channel::Receiver;
use std::time::Duration;

use crate::common::drain_signals;
use crate::leadership::status::administrator::LeaderElections;
use crate::leadership::vote_tally::BallotBox;
use crate::leadership::ElectionTimer;
use crate::membership::MembershipTracker;
use crate::messages::ElectionMessage;
use crate::node::configuration::ElectionRetryPolicy;
use crate::node::state::ProtectedNode;
use crate::transport::Transport;

pub struct ElectionManagerParams<T, Et, Ea>
where
    T: Transport,
    Et: ElectionTimer,
    Ea: LeaderElections,
{
    pub protected_node: ProtectedNode,
    pub election_administrator: Ea,
    pub transport: T,
    pub election_timer: Et,
    pub ballot_box: BallotBox,
    pub membership: MembershipTracker,
    pub election_request_rx: Receiver<()>,
    pub leader_observed_rx: Receiver<()>,
    pub voting_window: Option<Duration>,
    pub retry_policy: ElectionRetryPolicy,
    pub allow_single_node_leadership: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ElectionOutcome {
    Elected,
    Settled,
    Abandoned,
    Terminated,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum RoundOutcome {
    Won,
    Lost,
    Settled,
    Terminated,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum WaitOutcome {
    Elapsed,
    LeaderObserved,
    Terminated,
}

/// Runs an election every time one is requested, until terminated.
pub fn run_election_manager<T, Et, Ea>(
    params: ElectionManagerParams<T, Et, Ea>,
    terminate_worker_rx: Receiver<()>,
) where
    T: Transport,
    Et: ElectionTimer,
    Ea: LeaderElections,
{
    let node_id = params.protected_node.lock().id;
    info!("Node {} Election manager worker started", node_id);
    loop {
        select!(
            recv(terminate_worker_rx) -> res  => {
                if res.is_err() {
                    error!("Abnormal exit for election manager worker");
                }
                break
            },
            recv(params.election_request_rx) -> res => {
                if res.is_err() {
                    error!("Node {} Election request channel closed", node_id);
                    break
                }

                let outcome = run_election(&params, &terminate_worker_rx);
                trace!("Node {} Election finished: {:?}", node_id, outcome);
                if outcome == ElectionOutcome::Terminated {
                    break
                }
            }
        );
    }
    info!("Node {} Election manager worker stopped", node_id);
}

fn run_election<T, Et, Ea>(
    params: &ElectionManagerParams<T, Et, Ea>,
    terminate_worker_rx: &Receiver<()>,
) -> ElectionOutcome
where
    T: Transport,
    Et: ElectionTimer,
    Ea: LeaderElections,
{
    drain_signals(&params.leader_observed_rx);

    let mut attempt: u32 = 0;
    loop {
        let mut timeout = params.election_timer.next_elections_timeout();
        if attempt > 0 {
            timeout += params.retry_policy.backoff(attempt);
        }

        match wait_for_leader(params, terminate_worker_rx, timeout) {
            WaitOutcome::Terminated => return ElectionOutcome::Terminated,
            WaitOutcome::LeaderObserved => return ElectionOutcome::Settled,
            WaitOutcome::Elapsed => {}
        }

        match run_election_round(params, terminate_worker_rx) {
            RoundOutcome::Won => return ElectionOutcome::Elected,
            RoundOutcome::Settled => return ElectionOutcome::Settled,
            RoundOutcome::Terminated => return ElectionOutcome::Terminated,
            RoundOutcome::Lost => {}
        }

        attempt += 1;
        if params.retry_policy.attempts_exhausted(attempt) {
            error!(
                "Node {} No leader elected after {} attempts. Election stopped",
                params.protected_node.lock().id,
                attempt
            );
            params.election_administrator.abandon_candidacy();

            return ElectionOutcome::Abandoned;
        }
    }
}

fn run_election_round<T, Et, Ea>(
    params: &ElectionManagerParams<T, Et, Ea>,
    terminate_worker_rx: &Receiver<()>,
) -> RoundOutcome
where
    T: Transport,
    Et: ElectionTimer,
    Ea: LeaderElections,
{
    let (node_id, term) = {
        let node = params.protected_node.lock();
        if node.is_settled() {
            return RoundOutcome::Settled;
        }

        (node.id, node.next_candidate_term())
    };

    params.ballot_box.open(node_id, term);
    params.election_administrator.promote_node_to_candidate(term);

    info!("Node {} Election started for term {}", node_id, term);
    let election_message = ElectionMessage::new(node_id, term);
    if let Err(err) = params.transport.broadcast(election_message.into()) {
        error!("Node {} Election broadcast failed: {}", node_id, err);
    }

    let voting_window = params
        .voting_window
        .unwrap_or_else(|| params.election_timer.next_elections_timeout());
    let waited = wait_for_leader(params, terminate_worker_rx, voting_window);
    let tally = params.ballot_box.close();

    match waited {
        WaitOutcome::Terminated => return RoundOutcome::Terminated,
        WaitOutcome::LeaderObserved => return RoundOutcome::Settled,
        WaitOutcome::Elapsed => {}
    }

    let (total_votes, won) = match tally {
        Some(tally) => {
            let unopposed = tally.total_votes() == 0
                && params.allow_single_node_leadership
                && params.membership.is_empty();

            (tally.total_votes(), tally.is_won() || unopposed)
        }
        None => (0, false),
    };

    if won {
        info!(
            "Node {} Leader election won for term {} ({} votes)",
            node_id, term, total_votes
        );
        params.election_administrator.promote_node_to_leader(term);

        RoundOutcome::Won
    } else {
        info!(
            "Node {} Leader election failed for term {} ({} votes)",
            node_id, term, total_votes
        );

        RoundOutcome::Lost
    }
}

fn wait_for_leader<T, Et, Ea>(
    params: &ElectionManagerParams<T, Et, Ea>,
    terminate_worker_rx: &Receiver<()>,
    timeout: Duration,
) -> WaitOutcome
where
    T: Transport,
    Et: ElectionTimer,
    Ea: LeaderElections,
{
    let deadline = crossbeam_channel::after(timeout);
    select!(
        recv(terminate_worker_rx) -> _ => WaitOutcome::Terminated,
        recv(params.leader_observed_rx) -> res => {
            if res.is_err() {
                WaitOutcome::Terminated
            } else {
                WaitOutcome::LeaderObserved
            }
        },
        recv(deadline) -> _ => WaitOutcome::Elapsed,
    )
}
