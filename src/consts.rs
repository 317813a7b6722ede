pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains all configuration constants for the dashboard,
    //! organized by functional area for clarity and maintainability.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of event buffer size for worker tasks
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Maximum number of pending device commands from the UI
    pub const COMMAND_QUEUE_SIZE: usize = 16;

    /// Maximum number of pending out-of-band refresh requests
    pub const REFRESH_QUEUE_SIZE: usize = 8;

    // =============================================================================
    // POLLING CONFIGURATION
    // =============================================================================

    /// Status polling configuration
    pub mod polling {
        use std::time::Duration;

        /// Interval between two status polls (milliseconds)
        pub const POLL_INTERVAL_MS: u64 = 500;

        /// Lower bound accepted for a user-provided poll interval (milliseconds)
        pub const MIN_POLL_INTERVAL_MS: u64 = 100;

        /// Helper function to get the default poll interval
        pub const fn poll_interval() -> Duration {
            Duration::from_millis(POLL_INTERVAL_MS)
        }
    }

    // =============================================================================
    // NOTIFICATION CONFIGURATION
    // =============================================================================

    /// Notification display configuration
    pub mod notification {
        use std::time::Duration;

        /// How long a notification stays on screen (milliseconds)
        pub const NOTIFICATION_TTL_MS: u64 = 3_000;

        /// Helper function to get the notification time-to-live
        pub const fn ttl() -> Duration {
            Duration::from_millis(NOTIFICATION_TTL_MS)
        }
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// HTTP client configuration
    pub mod http {
        use std::time::Duration;

        /// Connection timeout (seconds)
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Whole-request timeout (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    /// Splash screen duration (milliseconds)
    pub const SPLASH_DURATION_MS: u64 = 1_500;

    /// Terminal input poll timeout per frame (milliseconds)
    pub const UI_FRAME_MS: u64 = 100;
}
