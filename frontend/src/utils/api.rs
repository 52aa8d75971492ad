use gloo_net::http::{Request, Response};
use gloo_net::Error as GlooError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use web_sys::RequestCredentials;

use crate::config;
use crate::models::{error_detail, BookingRequest, Flight, SearchCriteria};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("could not encode request: {0}")]
    Encode(String),
    #[error("backend responded with status {status}")]
    Status { status: u16, detail: Option<String> },
}

impl ApiError {
    /// The single line shown to the user: the backend's `detail` when it sent
    /// one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { detail: Some(detail), .. } => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<GlooError> for ApiError {
    fn from(err: GlooError) -> Self {
        match err {
            GlooError::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

/// Thin client over the backend base URL.
pub struct Api;

/// Request builder that resolves paths against the configured backend.
pub struct RequestWrapper {
    request: Request,
    method: &'static str,
    path: String,
}

impl RequestWrapper {
    fn new(path: &str, method: &'static str) -> Self {
        let full_url = format!("{}{}", config::get_backend_url(), path);
        let request = match method {
            "POST" => Request::post(&full_url),
            _ => Request::get(&full_url),
        }
        .credentials(RequestCredentials::SameOrigin);

        Self {
            request,
            method,
            path: path.to_string(),
        }
    }

    /// Set the request body as JSON
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_string(data).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.request = self
            .request
            .header("Content-Type", "application/json")
            .body(body);
        Ok(self)
    }

    /// Sends the request, turning any non-2xx status into `ApiError::Status`.
    pub async fn send(self) -> Result<Response, ApiError> {
        gloo_console::debug!(format!("{} {}", self.method, self.path));
        let response = self.request.send().await?;
        if response.ok() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        log::warn!("{} {} failed with status {}", self.method, self.path, status);
        Err(ApiError::Status {
            status,
            detail: error_detail(&body),
        })
    }

    pub async fn fetch_json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let response = self.send().await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl Api {
    pub fn get(path: &str) -> RequestWrapper {
        RequestWrapper::new(path, "GET")
    }

    pub fn post(path: &str) -> RequestWrapper {
        RequestWrapper::new(path, "POST")
    }
}

/// The two backend calls the page depends on.
#[allow(async_fn_in_trait)]
pub trait FlightApi {
    async fn list_flights(&self, criteria: &SearchCriteria) -> Result<Vec<Flight>, ApiError>;
    async fn book(&self, request: &BookingRequest) -> Result<(), ApiError>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HttpFlightApi;

impl FlightApi for HttpFlightApi {
    async fn list_flights(&self, criteria: &SearchCriteria) -> Result<Vec<Flight>, ApiError> {
        Api::get(&criteria.flights_path()).fetch_json().await
    }

    async fn book(&self, request: &BookingRequest) -> Result<(), ApiError> {
        Api::post("/api/book").json(request)?.send().await?;
        Ok(())
    }
}
