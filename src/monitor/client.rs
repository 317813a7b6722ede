//! Monitor API Client
//!
//! A JSON-over-HTTP client for the network monitor backend.

use crate::consts::cli_consts::http;
use crate::environment::Environment;
use crate::monitor::MonitorApi;
use crate::monitor::error::MonitorError;
use crate::snapshot::{AddDeviceRequest, MutationResponse, RemoveDeviceRequest, StatusSnapshot};
use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;

// User-Agent string with dashboard version
const USER_AGENT: &str = concat!("netmon-dashboard/", env!("CARGO_PKG_VERSION"));

const STATUS_ENDPOINT: &str = "api/status";
const ADD_DEVICE_ENDPOINT: &str = "api/add-device";
const REMOVE_DEVICE_ENDPOINT: &str = "api/remove-device";

#[derive(Debug, Clone)]
pub struct MonitorClient {
    client: Client,
    environment: Environment,
}

impl MonitorClient {
    pub fn new(environment: Environment) -> Self {
        Self {
            client: ClientBuilder::new()
                .connect_timeout(http::connect_timeout())
                .timeout(http::request_timeout())
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            environment,
        }
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.server_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn handle_response_status(response: Response) -> Result<Response, MonitorError> {
        if !response.status().is_success() {
            return Err(MonitorError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request(&self, endpoint: &str) -> Result<StatusSnapshot, MonitorError> {
        let url = self.build_url(endpoint);
        log::trace!("GET {}", url);
        let response = self.client.get(&url).send().await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&response_bytes)?)
    }

    /// POST a JSON body to a mutation endpoint.
    ///
    /// Error replies (400/404/500) carry the same `{success, error}` body as
    /// successful ones, so the body is decoded before the status is judged.
    async fn post_mutation<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Option<String>, MonitorError> {
        let url = self.build_url(endpoint);
        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        let response_bytes = response.bytes().await?;
        log::debug!("POST {} -> {}", url, status);

        match serde_json::from_slice::<MutationResponse>(&response_bytes) {
            Ok(reply) if reply.success && status.is_success() => Ok(reply.message),
            Ok(reply) => Err(MonitorError::Rejected {
                message: reply.error.or(reply.message).unwrap_or_else(|| {
                    if status.is_success() {
                        "Unknown error".to_string()
                    } else {
                        format!("Request failed with status {}", status.as_u16())
                    }
                }),
            }),
            Err(e) if status.is_success() => Err(MonitorError::Decode(e)),
            Err(_) => Err(MonitorError::Http {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&response_bytes).trim().to_string(),
            }),
        }
    }
}

#[async_trait::async_trait]
impl MonitorApi for MonitorClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn get_status(&self) -> Result<StatusSnapshot, MonitorError> {
        self.get_request(STATUS_ENDPOINT).await
    }

    async fn add_device(&self, name: &str, ip: &str) -> Result<Option<String>, MonitorError> {
        let request = AddDeviceRequest {
            name: name.to_string(),
            ip: ip.to_string(),
        };
        self.post_mutation(ADD_DEVICE_ENDPOINT, &request).await
    }

    async fn remove_device(&self, name: &str) -> Result<Option<String>, MonitorError> {
        let request = RemoveDeviceRequest {
            name: name.to_string(),
        };
        self.post_mutation(REMOVE_DEVICE_ENDPOINT, &request).await
    }
}
