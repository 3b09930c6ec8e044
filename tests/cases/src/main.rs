#[macro_use]
extern crate log;
extern crate chrono;
extern crate crossbeam_channel;
extern crate env_logger;

pub mod cases;
mod steps;

use chrono::prelude::{DateTime, Local};
use std::io::Write;

extern crate beacon;
extern crate beacon_modules;

fn init_logger() {
    env_logger::builder()
        .format(|buf, record| {
            let now: DateTime<Local> = Local::now();
            let now_str = now.format("%H:%M:%S.%3f").to_string();
            writeln!(buf, "{:5}: {} - {}", record.level(), now_str, record.args())
        })
        .init();
}

fn main() {
    init_logger();

    cases::smoke::run();
    cases::two_node_election::run();
    cases::cluster_election::run();
    cases::single_node::run();
    cases::membership_lifecycle::run();
    cases::term_safety::run();
    cases::request_dispatch::run();
    cases::lossy_network::run();
    cases::leader_failover::run();
    cases::partition_heal::run();

    info!("All cases completed");
}
