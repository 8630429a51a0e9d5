// src/client.rs
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::BrowserError;
use crate::models::server::{Registration, ServerListing, StatusUpdate};

/// Header carrying the access key issued at registration. The backend accepts
/// no other auth mechanism on mutating calls.
pub const KEY_HEADER: &str = "x-chiv2-server-browser-key";

#[derive(Deserialize)]
struct RegisteredServer {
    unique_id: String,
}

#[derive(Deserialize)]
struct RegisterResponse {
    server: RegisteredServer,
    key: String,
    refresh_before: f64,
}

#[derive(Deserialize)]
struct HeartbeatResponse {
    refresh_before: f64,
}

#[derive(Deserialize)]
struct ServerListResponse {
    servers: Vec<Value>,
}

/// Client for the server-browser backend. Holds nothing but the HTTP
/// transport: every call is an independent round trip identified by the
/// `(address, unique_id, key)` triple the caller supplies, so one client can
/// serve any number of registrations concurrently.
pub struct BrowserClient {
    http: Client,
}

impl BrowserClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    /// Register a server with the backend at `address` (e.g.
    /// `http://0.0.0.0:8080`). The returned key authorizes every later call
    /// for this listing, and a heartbeat must be sent before
    /// `refresh_before` or the backend expires the registration.
    pub async fn register(
        &self,
        address: &str,
        listing: &ServerListing,
    ) -> Result<Registration, BrowserError> {
        let url = format!("{}/api/v1/servers", address);
        debug!("Registering \"{}\" with {}", listing.name, url);

        let response = self.http.post(&url).json(listing).send().await?;
        if !response.status().is_success() {
            return Err(check_response(response).await);
        }

        let body = response.json::<RegisterResponse>().await?;
        debug!(
            "Registered as {} (refresh before {})",
            body.server.unique_id, body.refresh_before
        );
        Ok(Registration {
            unique_id: body.server.unique_id,
            key: body.key,
            refresh_before: body.refresh_before,
        })
    }

    /// Push new live status for a registered server. This does not renew the
    /// refresh deadline; only a heartbeat does.
    pub async fn update(
        &self,
        address: &str,
        unique_id: &str,
        key: &str,
        update: &StatusUpdate,
    ) -> Result<(), BrowserError> {
        let url = format!("{}/api/v1/servers/{}", address, unique_id);
        debug!("Updating status of {} at {}", unique_id, url);

        let response = self
            .http
            .put(&url)
            .header(KEY_HEADER, key)
            .json(update)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(check_response(response).await);
        }
        Ok(())
    }

    /// Renew the registration. Returns the new refresh deadline; the caller
    /// must heartbeat again before it elapses. Scheduling is entirely the
    /// caller's job, the client does not retry or repeat on its own.
    pub async fn heartbeat(
        &self,
        address: &str,
        unique_id: &str,
        key: &str,
    ) -> Result<f64, BrowserError> {
        let url = format!("{}/api/v1/servers/{}/heartbeat", address, unique_id);
        debug!("Heartbeat for {} at {}", unique_id, url);

        let response = self.http.post(&url).header(KEY_HEADER, key).send().await?;
        if !response.status().is_success() {
            return Err(check_response(response).await);
        }

        let body = response.json::<HeartbeatResponse>().await?;
        Ok(body.refresh_before)
    }

    /// Remove the listing from the backend.
    pub async fn delete(
        &self,
        address: &str,
        unique_id: &str,
        key: &str,
    ) -> Result<(), BrowserError> {
        let url = format!("{}/api/v1/servers/{}", address, unique_id);
        debug!("Deleting {} at {}", unique_id, url);

        // The backend expects an empty JSON object here, not an empty body.
        let response = self
            .http
            .delete(&url)
            .header(KEY_HEADER, key)
            .json(&json!({}))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(check_response(response).await);
        }
        Ok(())
    }

    /// Fetch all registered servers. Records come back as raw JSON objects,
    /// decoded but otherwise untouched.
    pub async fn server_list(&self, address: &str) -> Result<Vec<Value>, BrowserError> {
        let url = format!("{}/api/v1/servers", address);
        debug!("Fetching server list from {}", url);

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(check_response(response).await);
        }

        let body = response.json::<ServerListResponse>().await?;
        Ok(body.servers)
    }
}

impl Default for BrowserClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn a non-success response into the normalized error. Reading the body
/// can itself fail mid-transfer; that surfaces as a transport error.
async fn check_response(response: reqwest::Response) -> BrowserError {
    let code = response.status().as_u16();
    match response.text().await {
        Ok(body) => BrowserError::from_status_and_body(code, &body),
        Err(err) => BrowserError::Http(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_deadlines_widen_to_float_exactly() {
        let integral: HeartbeatResponse =
            serde_json::from_value(json!({"refresh_before": 123})).unwrap();
        assert_eq!(integral.refresh_before, 123.0);

        let fractional: HeartbeatResponse =
            serde_json::from_value(json!({"refresh_before": 98765.25})).unwrap();
        assert_eq!(fractional.refresh_before, 98765.25);
    }

    #[test]
    fn register_reply_tolerates_extra_server_fields() {
        let reply: RegisterResponse = serde_json::from_value(json!({
            "server": {"unique_id": "abc", "name": "x", "player_count": 0},
            "key": "k",
            "refresh_before": 1.0,
        }))
        .unwrap();
        assert_eq!(reply.server.unique_id, "abc");
        assert_eq!(reply.key, "k");
    }
}
