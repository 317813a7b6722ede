//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::consts::cli_consts::{SPLASH_DURATION_MS, UI_FRAME_MS};
use crate::environment::Environment;
use crate::runtime::WorkerChannels;
use crate::ui::dashboard::state::NotificationKind;
use crate::ui::dashboard::{DashboardState, UiAction, render_dashboard};
use crate::ui::splash::render_splash;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use tokio::sync::mpsc::error::TrySendError;

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub poll_interval: Duration,
}

impl UIConfig {
    pub fn new(with_background_color: bool, poll_interval: Duration) -> Self {
        Self {
            with_background_color,
            poll_interval,
        }
    }
}

/// The different screens in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// The device dashboard.
    Dashboard,
}

/// Application state
#[derive(Debug)]
pub struct App {
    current_screen: Screen,

    /// Dashboard state. Created up front so that polls completing during the
    /// splash screen are not lost.
    dashboard: DashboardState,

    /// Channels to the running workers.
    workers: WorkerChannels,

    /// Broadcasts shutdown signal to worker tasks.
    shutdown_sender: broadcast::Sender<()>,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        environment: Environment,
        workers: WorkerChannels,
        shutdown_sender: broadcast::Sender<()>,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            current_screen: Screen::Splash,
            dashboard: DashboardState::new(environment, Instant::now(), ui_config),
            workers,
            shutdown_sender,
        }
    }

    /// Hand a key-triggered action to the workers. Returns `true` to quit.
    fn dispatch(&mut self, action: UiAction) -> bool {
        match action {
            UiAction::Quit => return true,
            UiAction::Refresh => self.workers.refresh.request(),
            UiAction::Send(command) => match self.workers.command_sender.try_send(command) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => self.dashboard.notify(
                    "Error: Too many pending requests",
                    NotificationKind::Error,
                    Instant::now(),
                ),
                Err(TrySendError::Closed(_)) => return true,
            },
        }
        false
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_millis(SPLASH_DURATION_MS);

    loop {
        // Queue all incoming events for processing
        while let Ok(event) = app.workers.event_receiver.try_recv() {
            app.dashboard.add_event(event);
        }

        app.dashboard.update(Instant::now());
        terminal.draw(|f| render(f, app.current_screen, &app.dashboard))?;

        if app.current_screen == Screen::Splash && splash_start.elapsed() >= splash_duration {
            app.current_screen = Screen::Dashboard;
            continue;
        }

        // Poll for key events
        if event::poll(Duration::from_millis(UI_FRAME_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }

                let quit = match app.current_screen {
                    Screen::Splash => {
                        // Any key other than quit skips the splash screen
                        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                            true
                        } else {
                            app.current_screen = Screen::Dashboard;
                            false
                        }
                    }
                    Screen::Dashboard => match app.dashboard.handle_key(key, Instant::now()) {
                        Some(action) => app.dispatch(action),
                        None => false,
                    },
                };

                if quit {
                    // Send shutdown signal to workers
                    let _ = app.shutdown_sender.send(());
                    return Ok(());
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: Screen, dashboard: &DashboardState) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard => render_dashboard(f, dashboard),
    }
}
