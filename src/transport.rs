//! HTTP access to the time-tracking server.
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;

use crate::sync::{Command, SyncError};

/// Default address the tracking server binds to.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

const ACTIVITIES_ROUTE: &str = "api/activities";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Outbound interface to the server. Implementations are called from worker
/// threads.
pub trait Transport: Send + Sync {
    /// Raw snapshot for a `YYYY-MM-DD` day.
    fn fetch_activities(&self, date: &str) -> Result<Value, SyncError>;

    fn send(&self, command: &Command) -> Result<(), SyncError>;
}

#[derive(Serialize)]
struct DateRequest<'a> {
    date: &'a str,
}

pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, SyncError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| SyncError::TransportFailure(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, route: &str) -> String {
        format!("{}/{route}", self.base_url)
    }

    fn post<B: Serialize + ?Sized>(
        &self,
        route: &str,
        body: &B,
    ) -> Result<reqwest::blocking::Response, SyncError> {
        self.client
            .post(self.url(route))
            .json(body)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|err| SyncError::TransportFailure(err.to_string()))
    }
}

impl Transport for HttpTransport {
    fn fetch_activities(&self, date: &str) -> Result<Value, SyncError> {
        let response = self.post(ACTIVITIES_ROUTE, &DateRequest { date })?;
        response.json::<Value>().map_err(|err| {
            if err.is_decode() {
                SyncError::MalformedSnapshot(format!("response is not JSON: {err}"))
            } else {
                SyncError::TransportFailure(err.to_string())
            }
        })
    }

    fn send(&self, command: &Command) -> Result<(), SyncError> {
        self.post(command.route(), &command.body())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let transport = HttpTransport::new("http://localhost:8000/").unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8000");
        assert_eq!(
            transport.url(ACTIVITIES_ROUTE),
            "http://localhost:8000/api/activities"
        );
    }

    #[test]
    fn date_request_shape() {
        let body = serde_json::to_value(DateRequest { date: "2024-03-05" }).unwrap();
        assert_eq!(body, serde_json::json!({"date": "2024-03-05"}));
    }
}
