pub mod core;
pub mod device_manager;
pub mod poller;
