use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Booking, BookingForm, ContactForm, ContactSubmission},
    error::FieldError,
    protocol::{
        BookingResponse, BookingsResponse, ContactStatusResponse, ContactSubmissionsResponse,
        ErrorResponse, PingResponse, SubmitBookingResponse, SubmitContactResponse,
        UpdateStatusRequest,
    },
};
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url '{0}'")]
    InvalidServerUrl(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("server rejected request ({status}): {message}")]
    Rejected {
        status: StatusCode,
        message: String,
        errors: Vec<FieldError>,
    },
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// HTTP client for the intake API.
#[derive(Clone)]
pub struct IntakeClient {
    http: Client,
    server_url: Url,
}

impl IntakeClient {
    pub fn new(server_url: &str) -> Result<Self> {
        let parsed = Url::parse(server_url)
            .map_err(|_| ClientError::InvalidServerUrl(server_url.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidServerUrl(server_url.to_string()));
        }
        Ok(Self {
            http: Client::new(),
            server_url: parsed,
        })
    }

    /// Appends percent-encoded path segments to the server url.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.server_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidServerUrl(self.server_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn ping(&self) -> Result<String> {
        let response = self.http.get(self.endpoint(&["api", "ping"])?).send().await?;
        let body: PingResponse = decode(response).await?;
        Ok(body.message)
    }

    /// Returns the id the server assigned to the submission.
    pub async fn submit_contact(&self, form: &ContactForm) -> Result<String> {
        let response = self
            .http
            .post(self.endpoint(&["api", "contact"])?)
            .json(form)
            .send()
            .await?;
        let body: SubmitContactResponse = decode(response).await?;
        debug!(submission_id = %body.submission_id, "contact submitted");
        Ok(body.submission_id)
    }

    pub async fn list_contact_submissions(&self) -> Result<Vec<ContactSubmission>> {
        let response = self
            .http
            .get(self.endpoint(&["api", "contact", "submissions"])?)
            .send()
            .await?;
        let body: ContactSubmissionsResponse = decode(response).await?;
        Ok(body.submissions)
    }

    pub async fn update_contact_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<Option<ContactSubmission>> {
        let response = self
            .http
            .put(self.endpoint(&["api", "contact", "submissions", id])?)
            .json(&UpdateStatusRequest {
                status: status.to_string(),
            })
            .send()
            .await?;
        let body: Option<ContactStatusResponse> = decode_optional(response).await?;
        Ok(body.map(|body| body.submission))
    }

    pub async fn submit_booking(&self, form: &BookingForm) -> Result<Booking> {
        let response = self
            .http
            .post(self.endpoint(&["api", "bookings"])?)
            .json(form)
            .send()
            .await?;
        let body: SubmitBookingResponse = decode(response).await?;
        debug!(booking_id = %body.booking_id, "booking submitted");
        Ok(body.booking)
    }

    pub async fn list_bookings(&self) -> Result<Vec<Booking>> {
        let response = self
            .http
            .get(self.endpoint(&["api", "bookings"])?)
            .send()
            .await?;
        let body: BookingsResponse = decode(response).await?;
        Ok(body.bookings)
    }

    pub async fn get_booking(&self, id: &str) -> Result<Option<Booking>> {
        let response = self
            .http
            .get(self.endpoint(&["api", "bookings", id])?)
            .send()
            .await?;
        let body: Option<BookingResponse> = decode_optional(response).await?;
        Ok(body.map(|body| body.booking))
    }

    pub async fn update_booking_status(&self, id: &str, status: &str) -> Result<Option<Booking>> {
        let response = self
            .http
            .put(self.endpoint(&["api", "bookings", id])?)
            .json(&UpdateStatusRequest {
                status: status.to_string(),
            })
            .send()
            .await?;
        let body: Option<BookingResponse> = decode_optional(response).await?;
        Ok(body.map(|body| body.booking))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    Err(rejection(status, &response.bytes().await?))
}

/// Like [`decode`], but a 404 carrying the API error envelope means the
/// record does not exist. A 404 for an unknown route is still an error.
async fn decode_optional<T: DeserializeOwned>(response: Response) -> Result<Option<T>> {
    let status = response.status();
    if status != StatusCode::NOT_FOUND {
        return decode(response).await.map(Some);
    }
    let body = response.bytes().await?;
    if serde_json::from_slice::<ErrorResponse>(&body).is_ok() {
        return Ok(None);
    }
    Err(rejection(status, &body))
}

fn rejection(status: StatusCode, body: &[u8]) -> ClientError {
    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(envelope) => ClientError::Rejected {
            status,
            message: envelope.message,
            errors: envelope.errors,
        },
        Err(_) => ClientError::Rejected {
            status,
            message: String::from_utf8_lossy(body).into_owned(),
            errors: Vec::new(),
        },
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
