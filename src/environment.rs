use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Default address of a locally running monitor backend.
pub const LOCAL_SERVER_URL: &str = "http://localhost:5000";

/// Represents the monitor backends the dashboard can talk to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Backend running on this machine on its default port.
    #[default]
    Local,
    /// Any other backend, addressed by its base URL.
    Custom { server_url: String },
}

impl Environment {
    /// Returns the monitor backend base URL associated with the environment.
    pub fn server_url(&self) -> String {
        match self {
            Environment::Local => LOCAL_SERVER_URL.to_string(),
            Environment::Custom { server_url } => server_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds an environment from a base URL, collapsing the local default.
    pub fn from_url(url: &str) -> Self {
        let trimmed = url.trim().trim_end_matches('/');
        if trimmed == LOCAL_SERVER_URL {
            Environment::Local
        } else {
            Environment::Custom {
                server_url: trimmed.to_string(),
            }
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("local") {
            return Ok(Environment::Local);
        }
        if value.starts_with("http://") || value.starts_with("https://") {
            return Ok(Environment::from_url(value));
        }
        Err(format!(
            "Unknown environment '{}': expected 'local' or an http(s) URL",
            value
        ))
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.server_url())
    }
}
