//! REST API client for the car listing endpoints.
//!
//! Wraps `GET /car/list`, `POST /car`, `PUT /car/{id}` and
//! `DELETE /car/{id}` using [`reqwest`]. Every call branches on an exact
//! HTTP 200 and resolves to an [`ApiOutcome`]; transport failures are
//! logged here and handed back to the caller as [`ClientError`].

use rental_core::car::Car;
use rental_core::form::{CarForm, IMAGE_FIELD};
use rental_core::types::DbId;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::envelope::{data_outcome, message_outcome, ApiOutcome};

/// HTTP client for the car API.
#[derive(Debug, Clone)]
pub struct CarApi {
    client: reqwest::Client,
    api_url: String,
}

/// Errors from the car REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The car API returned a non-2xx status code.
    #[error("Car API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 200 response carried a body that could not be decoded.
    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CarApi {
    /// Create a new API client.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `http://host:8000`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build a client with the configured base URL and request timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    /// Fetch every car.
    ///
    /// Sends `GET /car/list`.
    pub async fn get_car_list(&self) -> Result<ApiOutcome<Vec<Car>>, ClientError> {
        self.send_list()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error fetching car list"))
    }

    /// Create a car from multipart form data.
    ///
    /// Sends `POST /car`.
    pub async fn add_car(&self, form: &CarForm) -> Result<ApiOutcome<String>, ClientError> {
        self.send_add(form)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error adding car"))
    }

    /// Delete a car by id.
    ///
    /// Sends `DELETE /car/{id}`.
    pub async fn delete_car(&self, id: DbId) -> Result<ApiOutcome<String>, ClientError> {
        self.send_delete(id)
            .await
            .inspect_err(|e| tracing::error!(car_id = id, error = %e, "Error deleting car"))
    }

    /// Replace a car's attributes with multipart form data.
    ///
    /// Sends `PUT /car/{id}`.
    pub async fn update_car(
        &self,
        id: DbId,
        form: &CarForm,
    ) -> Result<ApiOutcome<String>, ClientError> {
        self.send_update(id, form)
            .await
            .inspect_err(|e| tracing::error!(car_id = id, error = %e, "Error updating car"))
    }

    // ---- requests ----

    async fn send_list(&self) -> Result<ApiOutcome<Vec<Car>>, ClientError> {
        let response = self
            .client
            .get(format!("{}/car/list", self.api_url))
            .send()
            .await?;

        let (status, body) = Self::read_body(response).await?;
        Ok(data_outcome(status, body)?)
    }

    async fn send_add(&self, form: &CarForm) -> Result<ApiOutcome<String>, ClientError> {
        let response = self
            .client
            .post(format!("{}/car", self.api_url))
            .multipart(multipart_form(form)?)
            .send()
            .await?;

        Self::read_message(response).await
    }

    async fn send_delete(&self, id: DbId) -> Result<ApiOutcome<String>, ClientError> {
        let response = self
            .client
            .delete(format!("{}/car/{}", self.api_url, id))
            .send()
            .await?;

        Self::read_message(response).await
    }

    async fn send_update(
        &self,
        id: DbId,
        form: &CarForm,
    ) -> Result<ApiOutcome<String>, ClientError> {
        let response = self
            .client
            .put(format!("{}/car/{}", self.api_url, id))
            .multipart(multipart_form(form)?)
            .send()
            .await?;

        Self::read_message(response).await
    }

    // ---- private helpers ----

    /// Reject non-2xx responses with [`ClientError::Status`] and read
    /// the body of the rest as JSON.
    ///
    /// An empty body reads as `null`. A non-JSON body only counts as
    /// malformed on a 200; for other 2xx codes it also reads as `null`
    /// so the error-field lookup falls back to the status text.
    async fn read_body(response: reqwest::Response) -> Result<(u16, Value), ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok((status.as_u16(), Value::Null));
        }

        let body = match serde_json::from_str::<Value>(&text) {
            Ok(body) => body,
            Err(e) if status == reqwest::StatusCode::OK => return Err(e.into()),
            Err(_) => Value::Null,
        };

        Ok((status.as_u16(), body))
    }

    async fn read_message(response: reqwest::Response) -> Result<ApiOutcome<String>, ClientError> {
        let (status, body) = Self::read_body(response).await?;
        Ok(message_outcome(status, &body))
    }
}

/// Encode a [`CarForm`] as a multipart body.
fn multipart_form(form: &CarForm) -> Result<Form, ClientError> {
    let mut multipart = Form::new();
    for (name, value) in form.text_fields() {
        multipart = multipart.text(name, value);
    }

    if let Some(image) = &form.image {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)?;
        multipart = multipart.part(IMAGE_FIELD, part);
    }

    Ok(multipart)
}
