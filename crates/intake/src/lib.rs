use serde_json::{map::Entry, Map, Value};
use shared::{
    domain::{Booking, BookingForm, ContactForm, ContactSubmission},
    error::ApiError,
    protocol::UpdateStatusRequest,
};
use storage::SubmissionStore;
use tracing::info;
use url::form_urlencoded;

pub mod schema;
pub mod validation;

use schema::{BOOKING_FIELDS, CONTACT_FIELDS, STATUS_UPDATE_FIELDS};
use validation::validate;

pub const SUBMISSION_NOT_FOUND: &str = "Submission not found";
pub const BOOKING_NOT_FOUND: &str = "Booking not found";

/// Owns both intake collections. Built once at startup and shared by handle.
#[derive(Clone, Default)]
pub struct IntakeContext {
    pub contacts: SubmissionStore<ContactForm>,
    pub bookings: SubmissionStore<BookingForm>,
}

impl IntakeContext {
    pub fn new() -> Self {
        Self::default()
    }
}

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Parses a raw request body according to its `Content-Type`.
///
/// JSON bodies go through `serde_json`; an empty JSON body counts as `{}`.
/// Form bodies become an object of strings, with repeated keys collected
/// into arrays. Any other media type, or none, yields `{}` so the request
/// fails field validation rather than parsing.
pub fn parse_payload(content_type: Option<&str>, body: &[u8]) -> Result<Value, ApiError> {
    let media_type = content_type
        .and_then(|raw| raw.split(';').next())
        .map(|media| media.trim().to_ascii_lowercase());
    match media_type.as_deref() {
        Some(JSON_CONTENT_TYPE) => parse_json(body),
        Some(FORM_CONTENT_TYPE) => Ok(parse_form(body)),
        _ => Ok(Value::Object(Map::new())),
    }
}

fn parse_json(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::internal(format!("malformed request body: {e}")))
}

fn parse_form(body: &[u8]) -> Value {
    let mut object = Map::new();
    for (key, value) in form_urlencoded::parse(body) {
        let value = Value::String(value.into_owned());
        match object.entry(key.into_owned()) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Value::Array(values) => values.push(value),
                existing => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
            },
        }
    }
    Value::Object(object)
}

pub async fn submit_contact(
    ctx: &IntakeContext,
    payload: &Value,
) -> Result<ContactSubmission, ApiError> {
    let form: ContactForm = validate(CONTACT_FIELDS, payload)?;
    let submission = ctx.contacts.create(form).await;
    info!(
        submission_id = %submission.id,
        service = %submission.data.service,
        urgency = ?submission.data.urgency,
        "new contact form submission"
    );
    Ok(submission)
}

pub async fn list_contact_submissions(ctx: &IntakeContext) -> Vec<ContactSubmission> {
    ctx.contacts.list_all().await
}

pub async fn update_contact_status(
    ctx: &IntakeContext,
    id: &str,
    payload: &Value,
) -> Result<ContactSubmission, ApiError> {
    let request: UpdateStatusRequest = validate(STATUS_UPDATE_FIELDS, payload)?;
    let submission = ctx
        .contacts
        .update_status(id, &request.status)
        .await
        .ok_or_else(|| ApiError::not_found(SUBMISSION_NOT_FOUND))?;
    info!(submission_id = %id, status = %submission.status, "contact submission status updated");
    Ok(submission)
}

pub async fn submit_booking(ctx: &IntakeContext, payload: &Value) -> Result<Booking, ApiError> {
    let form: BookingForm = validate(BOOKING_FIELDS, payload)?;
    let booking = ctx.bookings.create(form).await;
    info!(
        booking_id = %booking.id,
        service = %booking.data.service,
        consultation_type = ?booking.data.consultation_type,
        preferred_date = %booking.data.preferred_date,
        "new consultation booking"
    );
    Ok(booking)
}

pub async fn list_bookings(ctx: &IntakeContext) -> Vec<Booking> {
    ctx.bookings.list_all().await
}

pub async fn get_booking(ctx: &IntakeContext, id: &str) -> Result<Booking, ApiError> {
    ctx.bookings
        .find_by_id(id)
        .await
        .ok_or_else(|| ApiError::not_found(BOOKING_NOT_FOUND))
}

pub async fn update_booking_status(
    ctx: &IntakeContext,
    id: &str,
    payload: &Value,
) -> Result<Booking, ApiError> {
    let request: UpdateStatusRequest = validate(STATUS_UPDATE_FIELDS, payload)?;
    let booking = ctx
        .bookings
        .update_status(id, &request.status)
        .await
        .ok_or_else(|| ApiError::not_found(BOOKING_NOT_FOUND))?;
    info!(booking_id = %id, status = %booking.status, "booking status updated");
    Ok(booking)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
