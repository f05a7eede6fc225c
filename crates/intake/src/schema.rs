use crate::validation::{FieldSpec, Rule};

const NAME: FieldSpec = FieldSpec::required(
    "name",
    Rule::Text {
        min_len: 2,
        message: "Name must be at least 2 characters",
    },
);

const EMAIL: FieldSpec = FieldSpec::required(
    "email",
    Rule::Email {
        message: "Invalid email address",
    },
);

const PHONE: FieldSpec = FieldSpec::required(
    "phone",
    Rule::Text {
        min_len: 10,
        message: "Phone number must be at least 10 digits",
    },
);

const SERVICE: FieldSpec = FieldSpec::required(
    "service",
    Rule::Text {
        min_len: 1,
        message: "Service selection is required",
    },
);

const ANY_TEXT: Rule = Rule::Text {
    min_len: 0,
    message: "",
};

pub const CONTACT_FIELDS: &[FieldSpec] = &[
    NAME,
    EMAIL,
    PHONE,
    SERVICE,
    FieldSpec::required(
        "message",
        Rule::Text {
            min_len: 10,
            message: "Message must be at least 10 characters",
        },
    ),
    FieldSpec::with_default(
        "urgency",
        Rule::OneOf {
            values: &["urgent", "normal", "low"],
        },
        "normal",
    ),
];

pub const BOOKING_FIELDS: &[FieldSpec] = &[
    NAME,
    EMAIL,
    PHONE,
    SERVICE,
    FieldSpec::required(
        "consultationType",
        Rule::OneOf {
            values: &["phone", "video", "inperson"],
        },
    ),
    FieldSpec::required(
        "preferredDate",
        Rule::Text {
            min_len: 1,
            message: "Date is required",
        },
    ),
    FieldSpec::required(
        "preferredTime",
        Rule::Text {
            min_len: 1,
            message: "Time is required",
        },
    ),
    FieldSpec::optional("budget", ANY_TEXT),
    FieldSpec::optional("description", ANY_TEXT),
    FieldSpec::with_default(
        "urgency",
        Rule::OneOf {
            values: &["urgent", "normal", "flexible"],
        },
        "normal",
    ),
    FieldSpec::required(
        "agreeToTerms",
        Rule::MustBeTrue {
            message: "Must agree to terms",
        },
    ),
];

/// Body of a status edit. Any string is accepted as the new status.
pub const STATUS_UPDATE_FIELDS: &[FieldSpec] = &[FieldSpec::required("status", ANY_TEXT)];
