//! Add/remove device requests

use super::core::{EventSender, RefreshHandle};
use crate::error_classifier::{ErrorClassifier, LogLevel};
use crate::events::{EventType, Update};
use crate::monitor::MonitorApi;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// A change to the monitored device list requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCommand {
    Add { name: String, ip: String },
    Remove { name: String },
}

/// Check a new device before anything is sent to the backend.
///
/// Returns the trimmed name and ip.
pub fn validate_new_device(name: &str, ip: &str) -> Result<(String, String), String> {
    let name = name.trim();
    let ip = ip.trim();
    if name.is_empty() || ip.is_empty() {
        return Err("Both name and IP are required".to_string());
    }
    Ok((name.to_string(), ip.to_string()))
}

/// Forwards device commands to the backend and refreshes status on success.
pub struct DeviceManager {
    api: Arc<dyn MonitorApi>,
    event_sender: EventSender,
    refresh: RefreshHandle,
    classifier: ErrorClassifier,
}

impl DeviceManager {
    pub fn new(
        api: Arc<dyn MonitorApi>,
        event_sender: EventSender,
        refresh: RefreshHandle,
    ) -> Self {
        Self {
            api,
            event_sender,
            refresh,
            classifier: ErrorClassifier::new(),
        }
    }

    /// Start the worker
    pub fn run(
        self,
        mut commands: mpsc::Receiver<DeviceCommand>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown.recv() => break,
                    command = commands.recv() => match command {
                        Some(command) => self.handle(command).await,
                        None => break,
                    },
                }
            }
        })
    }

    /// Execute one command and report its outcome.
    pub async fn handle(&self, command: DeviceCommand) {
        match command {
            DeviceCommand::Add { name, ip } => self.add_device(name, ip).await,
            DeviceCommand::Remove { name } => self.remove_device(name).await,
        }
    }

    async fn add_device(&self, name: String, ip: String) {
        match self.api.add_device(&name, &ip).await {
            Ok(message) => {
                self.event_sender
                    .send_device_event(
                        format!("Added device {} ({})", name, ip),
                        EventType::Success,
                        LogLevel::Info,
                        Update::DeviceAdded { name, message },
                    )
                    .await;
                self.refresh.request();
            }
            Err(e) => {
                let log_level = self.classifier.classify_mutation_error(&e);
                self.event_sender
                    .send_device_event(
                        format!("Failed to add device {}: {}", name, e),
                        EventType::Error,
                        log_level,
                        Update::AddFailed {
                            name,
                            error: e.user_message(),
                        },
                    )
                    .await;
            }
        }
    }

    async fn remove_device(&self, name: String) {
        match self.api.remove_device(&name).await {
            Ok(message) => {
                self.refresh.request();
                self.event_sender
                    .send_device_event(
                        format!("Removed device {}", name),
                        EventType::Success,
                        LogLevel::Info,
                        Update::DeviceRemoved { name, message },
                    )
                    .await;
            }
            Err(e) => {
                let log_level = self.classifier.classify_mutation_error(&e);
                self.event_sender
                    .send_device_event(
                        format!("Failed to remove device {}: {}", name, e),
                        EventType::Error,
                        log_level,
                        Update::RemoveFailed {
                            name,
                            error: e.user_message(),
                        },
                    )
                    .await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;
    use crate::monitor::MockMonitorApi;
    use crate::monitor::error::MonitorError;
    use mockall::predicate::eq;
    use tokio::sync::mpsc::error::TryRecvError;

    fn manager(
        api: MockMonitorApi,
    ) -> (DeviceManager, mpsc::Receiver<Event>, mpsc::Receiver<()>) {
        let (event_tx, event_rx) = mpsc::channel(8);
        let (refresh_tx, refresh_rx) = mpsc::channel(8);
        let manager = DeviceManager::new(
            Arc::new(api),
            EventSender::new(event_tx),
            RefreshHandle::new(refresh_tx),
        );
        (manager, event_rx, refresh_rx)
    }

    #[test]
    fn test_validate_new_device() {
        assert_eq!(
            validate_new_device(" cam1 ", " 10.0.0.9 "),
            Ok(("cam1".to_string(), "10.0.0.9".to_string()))
        );
        assert_eq!(
            validate_new_device("cam1", "   "),
            Err("Both name and IP are required".to_string())
        );
        assert!(validate_new_device("", "10.0.0.9").is_err());
    }

    #[tokio::test]
    /// A successful add reports the server message and triggers exactly one refresh.
    async fn test_add_success_refreshes_once() {
        let mut api = MockMonitorApi::new();
        api.expect_add_device()
            .with(eq("cam1"), eq("192.168.1.50"))
            .times(1)
            .returning(|_, _| Ok(Some("Added".to_string())));
        let (manager, mut events, mut refreshes) = manager(api);

        manager
            .handle(DeviceCommand::Add {
                name: "cam1".to_string(),
                ip: "192.168.1.50".to_string(),
            })
            .await;

        let event = events.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::Success);
        assert_eq!(
            event.update,
            Some(Update::DeviceAdded {
                name: "cam1".to_string(),
                message: Some("Added".to_string()),
            })
        );
        assert_eq!(refreshes.try_recv(), Ok(()));
        assert_eq!(refreshes.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    /// A rejected add carries the server's error text and does not refresh.
    async fn test_add_rejected_does_not_refresh() {
        let mut api = MockMonitorApi::new();
        api.expect_add_device().times(1).returning(|_, _| {
            Err(MonitorError::Rejected {
                message: "Invalid IP".to_string(),
            })
        });
        let (manager, mut events, mut refreshes) = manager(api);

        manager
            .handle(DeviceCommand::Add {
                name: "cam1".to_string(),
                ip: "300.1.1.1".to_string(),
            })
            .await;

        let event = events.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::Error);
        assert_eq!(event.log_level, LogLevel::Warn);
        assert_eq!(
            event.update,
            Some(Update::AddFailed {
                name: "cam1".to_string(),
                error: "Invalid IP".to_string(),
            })
        );
        assert_eq!(refreshes.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    /// A successful removal refreshes status and reports success.
    async fn test_remove_success_refreshes() {
        let mut api = MockMonitorApi::new();
        api.expect_remove_device()
            .with(eq("cam1"))
            .times(1)
            .returning(|_| Ok(None));
        let (manager, mut events, mut refreshes) = manager(api);

        manager
            .handle(DeviceCommand::Remove {
                name: "cam1".to_string(),
            })
            .await;

        assert_eq!(refreshes.try_recv(), Ok(()));
        let event = events.recv().await.unwrap();
        assert_eq!(
            event.update,
            Some(Update::DeviceRemoved {
                name: "cam1".to_string(),
                message: None,
            })
        );
    }

    #[tokio::test]
    /// The worker loop processes queued commands and exits on shutdown.
    async fn test_run_loop_processes_commands() {
        let mut api = MockMonitorApi::new();
        api.expect_remove_device()
            .times(1)
            .returning(|_| Err(MonitorError::Rejected {
                message: "Device not found".to_string(),
            }));
        let (manager, mut events, _refreshes) = manager(api);
        let (command_tx, command_rx) = mpsc::channel(4);
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let handle = manager.run(command_rx, shutdown_rx);

        command_tx
            .send(DeviceCommand::Remove {
                name: "ghost".to_string(),
            })
            .await
            .unwrap();
        let event = events.recv().await.unwrap();
        assert_eq!(
            event.update,
            Some(Update::RemoveFailed {
                name: "ghost".to_string(),
                error: "Device not found".to_string(),
            })
        );

        shutdown_tx.send(()).unwrap();
        handle.await.unwrap();
    }
}
