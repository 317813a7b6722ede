//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::events::Update;
use crate::logging::init_console_logger;
use crate::snapshot::{RelayIndicator, StatusSnapshot};
use std::error::Error;
use std::fmt::Write;

/// Plain-text rendering of a snapshot: the relay line, then one row per device.
pub fn device_table(snapshot: &StatusSnapshot) -> String {
    let mut table = String::new();
    let _ = writeln!(table, "{}", snapshot.relay_indicator().text());
    if snapshot.device_list.is_empty() {
        let _ = writeln!(table, "  (no devices)");
    }
    for (name, info) in snapshot.device_list.iter() {
        let _ = write!(table, "  {:<24} {:<9}", name, info.state().to_string());
        if let Some(ip) = &info.ip {
            let _ = write!(table, " {}", ip);
        }
        let _ = writeln!(table);
    }
    table
}

/// Tracks what headless mode last printed.
#[derive(Debug, Default)]
struct HeadlessView {
    last_applied_seq: u64,
    last_table: Option<String>,
}

impl HeadlessView {
    /// Returns the text to print, if the poll is newer and the output changed.
    ///
    /// A failed poll prints the error indicator once and forgets the last
    /// table, so the first snapshot after an outage is always printed.
    fn apply(&mut self, update: &Update) -> Option<String> {
        let output = match update {
            Update::Snapshot { seq, snapshot } => {
                if !self.advance(*seq) {
                    return None;
                }
                device_table(snapshot)
            }
            Update::PollFailed { seq } => {
                if !self.advance(*seq) {
                    return None;
                }
                format!("{}\n", RelayIndicator::Error.text())
            }
            _ => return None,
        };

        if self.last_table.as_ref() == Some(&output) {
            return None;
        }
        self.last_table = Some(output.clone());
        Some(output)
    }

    fn advance(&mut self, seq: u64) -> bool {
        if seq <= self.last_applied_seq {
            return false;
        }
        self.last_applied_seq = seq;
        true
    }
}

/// Runs the dashboard without a terminal UI
///
/// Worker events go to the `log` facade (stderr). The device table, or the
/// error indicator after a failed poll, is printed to stdout whenever it
/// changes. Ctrl+C stops the session.
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    init_console_logger();
    print_session_starting("headless", &session.environment);

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = session.shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });

    let mut shutdown_receiver = session.shutdown_sender.subscribe();
    let mut view = HeadlessView::default();

    loop {
        tokio::select! {
            Some(event) = session.workers.event_receiver.recv() => {
                event.emit_log();
                let output = event.update.as_ref().and_then(|update| view.apply(update));
                if let Some(output) = output {
                    print!("{}", output);
                }
            }
            _ = shutdown_receiver.recv() => {
                break;
            }
        }
    }

    print_session_shutdown();
    for handle in session.join_handles {
        let _ = handle.await;
    }
    print_session_exit_success();

    Ok(())
}
