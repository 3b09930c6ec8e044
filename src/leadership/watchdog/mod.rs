pub mod leader_status_watcher;
pub mod watchdog_handler;
