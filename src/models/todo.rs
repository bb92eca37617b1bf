use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, de};
use serde_json::Number;

use super::{ValidationError, expiry};

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const PERCENT_COMPLETE_RANGE: RangeInclusive<i64> = 0..=100;

pub const TITLE_REQUIRED: &str = "The Title field is required.";
pub const TITLE_TOO_LONG: &str = "Title cannot exceed 100 characters.";
pub const DESCRIPTION_TOO_LONG: &str = "Description cannot exceed 500 characters.";
pub const EXPIRY_DATE_REQUIRED: &str = "The ExpiryDate field is required.";
pub const PERCENT_COMPLETE_OUT_OF_RANGE: &str = "Percent Complete must be between 0 and 100.";

/// Body of `POST /todos` and `PUT /todos/{id}`.
///
/// There is no `id` field: an id sent by the client is dropped during
/// deserialization, the store is the only source of ids.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "expiry::deserialize_optional")]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_percent")]
    pub percent_complete: i64,
    #[serde(default)]
    pub is_done: bool,
}

/// A payload that passed validation; every field is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub title: String,
    pub description: String,
    pub expiry_date: DateTime<Utc>,
    pub percent_complete: i32,
    pub is_done: bool,
}

impl TodoPayload {
    /// Checks every rule and returns all violations, empty when valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        match self.title.as_deref() {
            None => errors.push(ValidationError::field("title", TITLE_REQUIRED)),
            Some(title) if title.trim().is_empty() => {
                errors.push(ValidationError::field("title", TITLE_REQUIRED))
            }
            Some(title) if title.chars().count() > TITLE_MAX_CHARS => {
                errors.push(ValidationError::field("title", TITLE_TOO_LONG))
            }
            Some(_) => {}
        }

        if let Some(description) = self.description.as_deref() {
            if description.chars().count() > DESCRIPTION_MAX_CHARS {
                errors.push(ValidationError::field("description", DESCRIPTION_TOO_LONG));
            }
        }

        if self.expiry_date.is_none() {
            errors.push(ValidationError::field("expiryDate", EXPIRY_DATE_REQUIRED));
        }

        if !PERCENT_COMPLETE_RANGE.contains(&self.percent_complete) {
            errors.push(ValidationError::field(
                "percentComplete",
                PERCENT_COMPLETE_OUT_OF_RANGE,
            ));
        }

        errors
    }

    pub fn into_draft(self) -> Result<TodoDraft, Vec<ValidationError>> {
        let errors = self.validate();
        match (
            self.title,
            self.expiry_date,
            i32::try_from(self.percent_complete),
        ) {
            (Some(title), Some(expiry_date), Ok(percent_complete)) if errors.is_empty() => {
                Ok(TodoDraft {
                    title,
                    description: self.description.unwrap_or_default(),
                    expiry_date,
                    percent_complete,
                    is_done: self.is_done,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Reads any JSON integer, clamping to the `i64` range, so that values too
/// large for a machine integer still fail the range rule instead of parsing.
fn deserialize_percent<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    if let Some(value) = number.as_i64() {
        return Ok(value);
    }
    if number.as_u64().is_some() {
        return Ok(i64::MAX);
    }
    match number.as_f64() {
        // saturating cast
        Some(value) if value.fract() == 0.0 => Ok(value as i64),
        _ => Err(de::Error::custom(format!(
            "invalid percentComplete '{number}': expected an integer"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;

    fn valid_payload() -> TodoPayload {
        TodoPayload {
            title: Some("Buy milk".to_string()),
            description: None,
            expiry_date: Some(Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()),
            percent_complete: 0,
            is_done: false,
        }
    }

    fn messages(payload: &TodoPayload) -> Vec<String> {
        payload
            .validate()
            .into_iter()
            .map(|error| error.error_message)
            .collect()
    }

    #[test]
    fn valid_payload_has_no_errors() {
        assert!(valid_payload().validate().is_empty());
    }

    #[test]
    fn title_is_required_and_not_blank() {
        for title in [None, Some(String::new()), Some("   ".to_string())] {
            let payload = TodoPayload {
                title,
                ..valid_payload()
            };
            assert_eq!(messages(&payload), vec![TITLE_REQUIRED.to_string()]);
        }
    }

    #[test]
    fn title_length_is_counted_in_characters() {
        let at_limit = TodoPayload {
            title: Some("ż".repeat(TITLE_MAX_CHARS)),
            ..valid_payload()
        };
        let over_limit = TodoPayload {
            title: Some("a".repeat(TITLE_MAX_CHARS + 1)),
            ..valid_payload()
        };

        assert!(at_limit.validate().is_empty());
        let errors = over_limit.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].member_names, vec!["title".to_string()]);
        assert!(errors[0].error_message.contains("Title"));
        assert!(errors[0].error_message.contains("100"));
    }

    #[test]
    fn description_is_limited_to_500_characters() {
        let payload = TodoPayload {
            description: Some("d".repeat(DESCRIPTION_MAX_CHARS + 1)),
            ..valid_payload()
        };

        assert_eq!(messages(&payload), vec![DESCRIPTION_TOO_LONG.to_string()]);
    }

    #[test]
    fn expiry_date_is_required() {
        let payload = TodoPayload {
            expiry_date: None,
            ..valid_payload()
        };

        assert_eq!(messages(&payload), vec![EXPIRY_DATE_REQUIRED.to_string()]);
    }

    #[test]
    fn percent_complete_bounds_are_inclusive() {
        for percent in [0, 100] {
            let payload = TodoPayload {
                percent_complete: percent,
                ..valid_payload()
            };
            assert!(payload.validate().is_empty(), "{percent} should be accepted");
        }

        for percent in [-1, 101, i64::MAX] {
            let payload = TodoPayload {
                percent_complete: percent,
                ..valid_payload()
            };
            let found = messages(&payload);
            assert_eq!(found.len(), 1);
            assert!(found[0].contains("Percent Complete must be between 0 and 100"));
        }
    }

    #[test]
    fn every_violation_is_reported() {
        let payload = TodoPayload {
            title: None,
            description: Some("d".repeat(501)),
            expiry_date: None,
            percent_complete: 250,
            is_done: true,
        };

        let members: Vec<String> = payload
            .validate()
            .into_iter()
            .flat_map(|error| error.member_names)
            .collect();
        assert_eq!(
            members,
            vec!["title", "description", "expiryDate", "percentComplete"]
        );
    }

    #[test]
    fn done_flag_is_independent_of_progress() {
        let payload = TodoPayload {
            percent_complete: 10,
            is_done: true,
            ..valid_payload()
        };

        let draft = payload.into_draft().expect("payload should be valid");
        assert!(draft.is_done);
        assert_eq!(draft.percent_complete, 10);
    }

    #[test]
    fn into_draft_fills_defaults() {
        let draft = valid_payload().into_draft().expect("payload should be valid");

        assert_eq!(draft.title, "Buy milk");
        assert_eq!(draft.description, "");
        assert_eq!(draft.percent_complete, 0);
    }

    #[test]
    fn into_draft_returns_errors_for_invalid_payload() {
        let payload = TodoPayload {
            percent_complete: 101,
            ..valid_payload()
        };

        let errors = payload.into_draft().expect_err("payload should be invalid");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn deserializes_camel_case_and_ignores_client_id() {
        let payload: TodoPayload = serde_json::from_value(json!({
            "id": 42,
            "title": "Buy milk",
            "expiryDate": "2026-10-19T09:00:00Z",
            "percentComplete": 30,
            "isDone": true
        }))
        .expect("payload should deserialize");

        assert_eq!(payload.title.as_deref(), Some("Buy milk"));
        assert_eq!(payload.description, None);
        assert_eq!(
            payload.expiry_date,
            Some(Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap())
        );
        assert_eq!(payload.percent_complete, 30);
        assert!(payload.is_done);
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let payload: TodoPayload =
            serde_json::from_value(json!({ "title": "t", "expiryDate": null }))
                .expect("payload should deserialize");

        assert_eq!(payload.expiry_date, None);
        assert_eq!(payload.percent_complete, 0);
        assert!(!payload.is_done);
    }

    #[test]
    fn integers_beyond_i64_still_hit_the_range_rule() {
        for raw in ["-9223372036854775809", "10000000000000000000", "1e30"] {
            let payload: TodoPayload = serde_json::from_str(&format!(
                r#"{{"title":"t","expiryDate":"2026-10-19","percentComplete":{raw}}}"#
            ))
            .unwrap_or_else(|err| panic!("{raw} should deserialize: {err}"));

            assert_eq!(messages(&payload), vec![PERCENT_COMPLETE_OUT_OF_RANGE.to_string()], "{raw}");
        }
    }

    #[test]
    fn fractional_percent_is_a_deserialization_error() {
        let err = serde_json::from_str::<TodoPayload>(
            r#"{"title":"t","expiryDate":"2026-10-19","percentComplete":12.5}"#,
        )
        .expect_err("fraction should fail");

        assert!(err.to_string().contains("invalid percentComplete"));
    }

    #[test]
    fn unparseable_expiry_is_a_deserialization_error() {
        let result = serde_json::from_value::<TodoPayload>(json!({
            "title": "t",
            "expiryDate": "next friday"
        }));

        let err = result.expect_err("bad date should fail");
        assert!(err.to_string().contains("invalid expiryDate"));
    }
}
