use crate::environment::Environment;
use crate::monitor::error::MonitorError;
use crate::snapshot::StatusSnapshot;

pub(crate) mod client;
pub use client::MonitorClient;
pub mod error;

#[cfg(test)]
use mockall::{automock, predicate::*};

/// The monitor backend's HTTP API as seen by the dashboard.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait MonitorApi: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Fetch the current relay state and device list.
    async fn get_status(&self) -> Result<StatusSnapshot, MonitorError>;

    /// Ask the backend to start monitoring a device.
    ///
    /// Returns the backend's success message, if it sent one.
    async fn add_device(&self, name: &str, ip: &str) -> Result<Option<String>, MonitorError>;

    /// Ask the backend to stop monitoring a device.
    async fn remove_device(&self, name: &str) -> Result<Option<String>, MonitorError>;
}
