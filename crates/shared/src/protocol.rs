use serde::{Deserialize, Serialize};

use crate::{
    domain::{Booking, ContactSubmission},
    error::{ApiError, FieldError},
};

pub const CONTACT_SUBMITTED_MESSAGE: &str = "Form submitted successfully";
pub const CONTACT_STATUS_UPDATED_MESSAGE: &str = "Status updated successfully";
pub const BOOKING_SUBMITTED_MESSAGE: &str = "Booking submitted successfully";
pub const BOOKING_STATUS_UPDATED_MESSAGE: &str = "Booking status updated successfully";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "API endpoint not found";
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Request body too large";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitContactResponse {
    pub success: bool,
    pub message: String,
    pub submission_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSubmissionsResponse {
    pub success: bool,
    pub submissions: Vec<ContactSubmission>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactStatusResponse {
    pub success: bool,
    pub message: String,
    pub submission: ContactSubmission,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBookingResponse {
    pub success: bool,
    pub message: String,
    pub booking_id: String,
    pub booking: Booking,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingsResponse {
    pub success: bool,
    pub bookings: Vec<Booking>,
    pub total: usize,
}

/// Single-booking envelope; `message` is only present after a status edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub booking: Booking,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl From<&ApiError> for ErrorResponse {
    fn from(value: &ApiError) -> Self {
        Self {
            success: false,
            message: value.message.clone(),
            errors: value.errors.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteNotFoundResponse {
    pub error: String,
}

impl SubmitContactResponse {
    pub fn new(submission: &ContactSubmission) -> Self {
        Self {
            success: true,
            message: CONTACT_SUBMITTED_MESSAGE.to_string(),
            submission_id: submission.id.clone(),
        }
    }
}

impl ContactSubmissionsResponse {
    pub fn new(submissions: Vec<ContactSubmission>) -> Self {
        Self {
            success: true,
            total: submissions.len(),
            submissions,
        }
    }
}

impl ContactStatusResponse {
    pub fn new(submission: ContactSubmission) -> Self {
        Self {
            success: true,
            message: CONTACT_STATUS_UPDATED_MESSAGE.to_string(),
            submission,
        }
    }
}

impl SubmitBookingResponse {
    pub fn new(booking: Booking) -> Self {
        Self {
            success: true,
            message: BOOKING_SUBMITTED_MESSAGE.to_string(),
            booking_id: booking.id.clone(),
            booking,
        }
    }
}

impl BookingsResponse {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self {
            success: true,
            total: bookings.len(),
            bookings,
        }
    }
}

impl BookingResponse {
    pub fn found(booking: Booking) -> Self {
        Self {
            success: true,
            message: None,
            booking,
        }
    }

    pub fn status_updated(booking: Booking) -> Self {
        Self {
            success: true,
            message: Some(BOOKING_STATUS_UPDATED_MESSAGE.to_string()),
            booking,
        }
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
