pub mod cluster_election;
pub mod leader_failover;
pub mod partition_heal;
pub mod request_dispatch;
pub mod single_node;
pub mod smoke;
pub mod term_safety;
pub mod two_node_election;
