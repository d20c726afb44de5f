//! Request validation helpers
//!
//! Checks run on the raw JSON body before it is deserialized, so the API can
//! tell "field absent" apart from "field present with the wrong type" and
//! answer with the matching message.

use crate::core::AppError;
use crate::dtos::VotesDTO;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

pub const MULTIPLE_MISSING: &str = "Missing more than one required field";
pub const MULTIPLE_INVALID: &str = "Invalid data type for more than one field";
pub const INVALID_VOTES: &str = "Invalid or Missing Votes";

/// JSON primitive types a field can be required to have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    String,
    Number,
    Boolean,
}

impl JsonType {
    pub fn matches(self, value: &Value) -> bool {
        match self {
            JsonType::String => value.is_string(),
            JsonType::Number => value.is_number(),
            JsonType::Boolean => value.is_boolean(),
        }
    }
}

/// Expectation on one body field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: JsonType,
    pub required: bool,
    /// Replaces "<Field> is required"
    pub missing_message: Option<&'static str>,
    /// Replaces "Invalid <Field>"
    pub invalid_message: Option<&'static str>,
}

impl FieldRule {
    pub const fn required(name: &'static str, kind: JsonType) -> Self {
        Self {
            name,
            kind,
            required: true,
            missing_message: None,
            invalid_message: None,
        }
    }

    pub const fn optional(name: &'static str, kind: JsonType) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind)
        }
    }

    pub const fn with_invalid_message(mut self, invalid: &'static str) -> Self {
        self.invalid_message = Some(invalid);
        self
    }

    pub const fn with_messages(mut self, missing: &'static str, invalid: &'static str) -> Self {
        self.missing_message = Some(missing);
        self.invalid_message = Some(invalid);
        self
    }
}

/// Required fields whose key is absent. `null` counts as present.
/// A body that is not an object is missing every field.
pub fn missing_fields<'r>(body: &Value, rules: &'r [FieldRule]) -> Vec<&'r FieldRule> {
    rules
        .iter()
        .filter(|rule| rule.required && body.get(rule.name).is_none())
        .collect()
}

/// Fields that are present but whose JSON type does not match
pub fn invalid_types<'r>(body: &Value, rules: &'r [FieldRule]) -> Vec<&'r FieldRule> {
    rules
        .iter()
        .filter(|rule| {
            body.get(rule.name)
                .is_some_and(|value| !rule.kind.matches(value))
        })
        .collect()
}

/// Applies the two-tier policy: a generic message when two or more fields
/// fail, a field-specific one when exactly one does. Missing fields are
/// reported before type mismatches.
pub fn check_body(body: &Value, rules: &[FieldRule]) -> Result<(), AppError> {
    match missing_fields(body, rules).as_slice() {
        [] => {}
        [rule] => {
            let message = match rule.missing_message {
                Some(message) => message.to_string(),
                None => format!("{} is required", capitalise(rule.name)),
            };
            return Err(AppError::bad_request(message));
        }
        _ => return Err(AppError::bad_request(MULTIPLE_MISSING)),
    }

    match invalid_types(body, rules).as_slice() {
        [] => Ok(()),
        [rule] => {
            let message = match rule.invalid_message {
                Some(message) => message.to_string(),
                None => format!("Invalid {}", capitalise(rule.name)),
            };
            Err(AppError::bad_request(message))
        }
        _ => Err(AppError::bad_request(MULTIPLE_INVALID)),
    }
}

/// Upper-cases the first character
pub fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parses a numeric path identifier, rejecting anything that is not an `i32`.
pub fn parse_id(raw: &str, message: &'static str) -> Result<i32, AppError> {
    raw.parse::<i32>()
        .map_err(|_| AppError::bad_request(message))
}

/// Reads `inc_votes` from a vote patch body. Only a JSON integer that fits
/// the column is accepted; `"1"`, `1.5` and `null` are rejected.
pub fn parse_inc_votes(body: &Value) -> Result<VotesDTO, AppError> {
    body.get("inc_votes")
        .and_then(Value::as_i64)
        .and_then(|n| i32::try_from(n).ok())
        .map(|inc_votes| VotesDTO { inc_votes })
        .ok_or_else(|| AppError::bad_request(INVALID_VOTES))
}

lazy_static! {
    // What a lenient number parse accepts: blank, decimal with optional
    // exponent, hex/octal/binary literals, Infinity.
    static ref NUMERIC_LOOKING: Regex = Regex::new(
        r"^[ \t\r\n]*(?:[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?|0[xX][0-9a-fA-F]+|0[oO][0-7]+|0[bB][01]+|[+-]?Infinity)?[ \t\r\n]*$"
    )
    .expect("numeric pattern is valid");
}

/// True when the string would be read as a number, e.g. `"900"`, `"1e3"`, `" "`
pub fn looks_numeric(s: &str) -> bool {
    NUMERIC_LOOKING.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const COMMENT_RULES: [FieldRule; 2] = [
        FieldRule::required("username", JsonType::String),
        FieldRule::required("body", JsonType::String),
    ];

    #[test]
    fn test_missing_fields_detects_absent_keys_only() {
        let body = json!({ "username": null });
        let missing: Vec<_> = missing_fields(&body, &COMMENT_RULES)
            .iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(missing, vec!["body"]);
    }

    #[test]
    fn test_empty_string_is_not_missing() {
        let body = json!({ "username": "", "body": "" });
        assert!(check_body(&body, &COMMENT_RULES).is_ok());
    }

    #[test]
    fn test_two_missing_gives_generic_message() {
        let err = check_body(&json!({}), &COMMENT_RULES).unwrap_err();
        assert_eq!(err.message(), MULTIPLE_MISSING);
    }

    #[test]
    fn test_one_missing_gives_field_message() {
        let err = check_body(&json!({ "username": "lurker" }), &COMMENT_RULES).unwrap_err();
        assert_eq!(err.message(), "Body is required");
    }

    #[test]
    fn test_missing_checked_before_types() {
        let err = check_body(&json!({ "username": 5 }), &COMMENT_RULES).unwrap_err();
        assert_eq!(err.message(), "Body is required");
    }

    #[test]
    fn test_type_mismatch_messages() {
        let err = check_body(&json!({ "username": 5, "body": "hi" }), &COMMENT_RULES).unwrap_err();
        assert_eq!(err.message(), "Invalid Username");

        let err = check_body(&json!({ "username": 5, "body": [] }), &COMMENT_RULES).unwrap_err();
        assert_eq!(err.message(), MULTIPLE_INVALID);
    }

    #[test]
    fn test_custom_messages_override_defaults() {
        let rules = [
            FieldRule::required("img_url", JsonType::String)
                .with_messages("Image URL is required", "Invalid Image URL"),
        ];
        assert_eq!(
            check_body(&json!({}), &rules).unwrap_err().message(),
            "Image URL is required"
        );
        assert_eq!(
            check_body(&json!({ "img_url": true }), &rules).unwrap_err().message(),
            "Invalid Image URL"
        );
    }

    #[test]
    fn test_optional_field_only_type_checked() {
        let rules = [FieldRule::optional("article_img_url", JsonType::String)];
        assert!(check_body(&json!({}), &rules).is_ok());
        assert!(check_body(&json!({ "article_img_url": 1 }), &rules).is_err());
    }

    #[test]
    fn test_non_object_body_misses_everything() {
        let err = check_body(&json!([1, 2]), &COMMENT_RULES).unwrap_err();
        assert_eq!(err.message(), MULTIPLE_MISSING);
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("3", "Invalid Article ID").unwrap(), 3);
        for raw in ["mitch", "1.5", "", "99999999999"] {
            let err = parse_id(raw, "Invalid Article ID").unwrap_err();
            assert_eq!(err.message(), "Invalid Article ID");
        }
    }

    #[test]
    fn test_parse_inc_votes() {
        assert_eq!(parse_inc_votes(&json!({ "inc_votes": -15 })).unwrap().inc_votes, -15);
        for body in [
            json!({}),
            json!({ "inc_votes": "1" }),
            json!({ "inc_votes": 1.5 }),
            json!({ "inc_votes": null }),
            json!({ "inc_votes": 3_000_000_000i64 }),
        ] {
            let err = parse_inc_votes(&body).unwrap_err();
            assert_eq!(err.message(), INVALID_VOTES, "{body}");
        }
    }

    #[test]
    fn test_looks_numeric() {
        for s in ["900", "-1", "1.5", "1e3", " ", "0x1F", "Infinity", ".5"] {
            assert!(looks_numeric(s), "{s:?} should look numeric");
        }
        for s in ["7doublem", "butter_bridge", "1a", "NaN", "e5"] {
            assert!(!looks_numeric(s), "{s:?} should not look numeric");
        }
    }

    #[test]
    fn test_capitalise() {
        assert_eq!(capitalise("username"), "Username");
        assert_eq!(capitalise(""), "");
    }
}
