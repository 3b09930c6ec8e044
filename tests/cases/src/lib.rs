//! # Beacon cluster test cases
//!
//! This subproject runs whole in-process clusters through election, membership and request
//! scenarios.

#[macro_use]
extern crate log;
pub mod cases;
mod steps;

pub use self::cases::smoke;

#[cfg(test)]
mod tests {
    use super::cases;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn smoke() {
        init_logger();
        cases::smoke::run();
    }

    #[test]
    fn two_node_election() {
        init_logger();
        cases::two_node_election::run();
    }

    #[test]
    fn cluster_election() {
        init_logger();
        cases::cluster_election::run();
    }

    #[test]
    fn single_node() {
        init_logger();
        cases::single_node::run();
    }

    #[test]
    fn membership_lifecycle() {
        init_logger();
        cases::membership_lifecycle::run();
    }

    #[test]
    fn term_safety() {
        init_logger();
        cases::term_safety::run();
    }

    #[test]
    fn request_dispatch() {
        init_logger();
        cases::request_dispatch::run();
    }

    #[test]
    fn lossy_network() {
        init_logger();
        cases::lossy_network::run();
    }

    #[test]
    fn leader_failover() {
        init_logger();
        cases::leader_failover::run();
    }

    #[test]
    fn partition_heal() {
        init_logger();
        cases::partition_heal::run();
    }
}
