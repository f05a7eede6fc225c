use super::*;
use crate::schema::{BOOKING_FIELDS, CONTACT_FIELDS, STATUS_UPDATE_FIELDS};
use serde_json::json;
use shared::{
    domain::{BookingForm, BookingUrgency, ConsultationType, ContactForm, ContactUrgency},
    error::ErrorCode,
};

fn contact_payload() -> Value {
    json!({
        "name": "Jo",
        "email": "jo@x.com",
        "phone": "9876543210",
        "service": "GST",
        "message": "Need help with GST filing",
        "urgency": "urgent"
    })
}

fn booking_payload() -> Value {
    json!({
        "name": "Asha Rao",
        "email": "asha@example.com",
        "phone": "+91 98765 43210",
        "service": "Income tax return",
        "consultationType": "video",
        "preferredDate": "2024-05-01",
        "preferredTime": "10:30",
        "agreeToTerms": true
    })
}

fn fields(errors: &[FieldError]) -> Vec<&str> {
    errors.iter().filter_map(FieldError::field).collect()
}

#[test]
fn valid_contact_payload_produces_typed_form() {
    let form: ContactForm = validate(CONTACT_FIELDS, &contact_payload()).expect("valid");
    assert_eq!(form.name, "Jo");
    assert_eq!(form.urgency, ContactUrgency::Urgent);
}

#[test]
fn absent_urgency_takes_default() {
    let mut payload = contact_payload();
    payload.as_object_mut().expect("object").remove("urgency");
    let form: ContactForm = validate(CONTACT_FIELDS, &payload).expect("valid");
    assert_eq!(form.urgency, ContactUrgency::Normal);

    let normalized = check(CONTACT_FIELDS, &payload).expect("valid");
    assert_eq!(normalized["urgency"], "normal");
}

#[test]
fn unknown_keys_are_dropped() {
    let mut payload = contact_payload();
    payload["referrer"] = json!("newsletter");
    let normalized = check(CONTACT_FIELDS, &payload).expect("valid");
    assert!(!normalized.contains_key("referrer"));
}

#[test]
fn every_violation_is_reported() {
    let payload = json!({
        "name": "J",
        "email": "not-an-email",
        "phone": "12345",
        "service": "",
        "message": "short",
        "urgency": "whenever"
    });
    let errors = check(CONTACT_FIELDS, &payload).expect_err("invalid");
    assert_eq!(
        fields(&errors),
        ["name", "email", "phone", "service", "message", "urgency"]
    );
    assert_eq!(errors[0].code, IssueCode::TooSmall);
    assert_eq!(errors[0].message, "Name must be at least 2 characters");
    assert_eq!(errors[1].code, IssueCode::InvalidString);
    assert_eq!(errors[1].message, "Invalid email address");
    assert_eq!(errors[2].message, "Phone number must be at least 10 digits");
    assert_eq!(errors[3].message, "Service selection is required");
    assert_eq!(errors[4].message, "Message must be at least 10 characters");
    assert_eq!(errors[5].code, IssueCode::InvalidEnumValue);
    assert_eq!(
        errors[5].message,
        "Invalid enum value. Expected 'urgent' | 'normal' | 'low', received 'whenever'"
    );
}

#[test]
fn missing_required_fields_are_reported_as_required() {
    let errors = check(CONTACT_FIELDS, &json!({})).expect_err("invalid");
    assert_eq!(fields(&errors), ["name", "email", "phone", "service", "message"]);
    assert!(errors
        .iter()
        .all(|e| e.code == IssueCode::InvalidType && e.message == "Required"));
}

#[test]
fn wrong_json_types_are_reported() {
    let mut payload = contact_payload();
    payload["phone"] = json!(9876543210u64);
    payload["urgency"] = json!(null);
    let errors = check(CONTACT_FIELDS, &payload).expect_err("invalid");
    assert_eq!(errors[0].message, "Expected string, received number");
    assert_eq!(
        errors[1].message,
        "Expected 'urgent' | 'normal' | 'low', received null"
    );
}

#[test]
fn non_object_payload_fails_at_root() {
    let errors = check(CONTACT_FIELDS, &json!(["Jo"])).expect_err("invalid");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].path.is_empty());
    assert_eq!(errors[0].message, "Expected object, received array");
}

#[test]
fn length_counts_utf16_units_not_bytes() {
    let mut payload = contact_payload();
    payload["name"] = json!("É");
    let errors = check(CONTACT_FIELDS, &payload).expect_err("one unit");
    assert_eq!(fields(&errors), ["name"]);
}

#[test]
fn astral_characters_count_as_two_units() {
    let mut payload = contact_payload();
    payload["name"] = json!("😀");
    // Five mathematical bold digits are ten UTF-16 units.
    payload["phone"] = json!("𝟗𝟖𝟕𝟔𝟓");
    let normalized = check(CONTACT_FIELDS, &payload).expect("long enough");
    assert_eq!(normalized["name"], "😀");

    payload["phone"] = json!("𝟗𝟖𝟕𝟔");
    let errors = check(CONTACT_FIELDS, &payload).expect_err("eight units");
    assert_eq!(fields(&errors), ["phone"]);
}

#[test]
fn email_format_rules() {
    for ok in [
        "jo@x.com",
        "first.last+tag@mail.example.co.in",
        "o'neil@firm.org",
        "UPPER@CASE.COM",
    ] {
        assert!(is_valid_email(ok), "{ok} should be accepted");
    }
    for bad in [
        "plainaddress",
        ".lead@dot.com",
        "double..dot@x.com",
        "trailing.@x.com",
        "jo@x",
        "jo@x.c",
        "jo@-x.com",
        "jo@x..com",
        "jo @x.com",
        "jo@x.co\u{17F}",
        "jo@x.\u{212A}\u{212A}",
        "\u{212A}@x.com",
        "j\u{F6}@x.com",
    ] {
        assert!(!is_valid_email(bad), "{bad} should be rejected");
    }
}

#[test]
fn valid_booking_payload_applies_defaults_and_keeps_optionals_absent() {
    let form: BookingForm = validate(BOOKING_FIELDS, &booking_payload()).expect("valid");
    assert_eq!(form.consultation_type, ConsultationType::Video);
    assert_eq!(form.urgency, BookingUrgency::Normal);
    assert_eq!(form.budget, None);
    assert_eq!(form.description, None);
    assert!(form.agree_to_terms);
}

#[test]
fn booking_optionals_are_kept_when_present() {
    let mut payload = booking_payload();
    payload["budget"] = json!("10000");
    payload["description"] = json!("");
    payload["consultationType"] = json!("inperson");
    payload["urgency"] = json!("flexible");
    let form: BookingForm = validate(BOOKING_FIELDS, &payload).expect("valid");
    assert_eq!(form.budget.as_deref(), Some("10000"));
    assert_eq!(form.description.as_deref(), Some(""));
    assert_eq!(form.consultation_type, ConsultationType::InPerson);
    assert_eq!(form.urgency, BookingUrgency::Flexible);
}

#[test]
fn booking_without_terms_agreement_is_rejected() {
    let mut payload = booking_payload();
    payload["agreeToTerms"] = json!(false);
    let errors = check(BOOKING_FIELDS, &payload).expect_err("invalid");
    assert_eq!(fields(&errors), ["agreeToTerms"]);
    assert_eq!(errors[0].code, IssueCode::Custom);
    assert_eq!(errors[0].message, "Must agree to terms");

    payload["agreeToTerms"] = json!("true");
    let errors = check(BOOKING_FIELDS, &payload).expect_err("string is not a boolean");
    assert_eq!(errors[0].message, "Expected boolean, received string");
}

#[test]
fn booking_consultation_type_has_no_default() {
    let mut payload = booking_payload();
    payload.as_object_mut().expect("object").remove("consultationType");
    payload["preferredDate"] = json!("");
    let errors = check(BOOKING_FIELDS, &payload).expect_err("invalid");
    assert_eq!(fields(&errors), ["consultationType", "preferredDate"]);
    assert_eq!(errors[0].message, "Required");
    assert_eq!(errors[1].message, "Date is required");
}

#[test]
fn booking_urgency_vocabulary_differs_from_contact() {
    let mut payload = booking_payload();
    payload["urgency"] = json!("low");
    let errors = check(BOOKING_FIELDS, &payload).expect_err("invalid");
    assert_eq!(fields(&errors), ["urgency"]);
}

#[test]
fn validate_wraps_failures_in_validation_error() {
    let err = validate::<ContactForm>(CONTACT_FIELDS, &json!({})).expect_err("invalid");
    assert_eq!(err.code, ErrorCode::Validation);
    assert_eq!(err.message, "Validation error");
    assert_eq!(err.errors.len(), 5);
}

#[test]
fn status_update_accepts_any_string() {
    let normalized = check(STATUS_UPDATE_FIELDS, &json!({ "status": "" })).expect("valid");
    assert_eq!(normalized["status"], "");

    let errors = check(STATUS_UPDATE_FIELDS, &json!({ "status": 3 })).expect_err("invalid");
    assert_eq!(fields(&errors), ["status"]);
}
