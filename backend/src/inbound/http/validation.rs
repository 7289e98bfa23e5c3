//! Shared parsing helpers for inbound HTTP payloads and paths.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::domain::{Error, RecordValidationError};

pub(crate) fn missing_field_error(field: &'static str) -> Error {
    Error::invalid_request(format!("{field} is required")).with_details(json!({ "field": field }))
}

/// Read a date as an RFC 3339 timestamp or a bare `YYYY-MM-DD` day.
///
/// Bare days are taken as midnight UTC, which is what HTML date inputs send.
pub(crate) fn parse_date(
    field: &'static str,
    raw: &str,
) -> Result<DateTime<Utc>, RecordValidationError> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or(RecordValidationError::InvalidDate { field })
}

pub(crate) fn parse_optional_date(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<DateTime<Utc>>, RecordValidationError> {
    raw.map(|value| parse_date(field, value)).transpose()
}

/// Parse an identifier taken from the request path.
///
/// Identifiers are opaque to clients, so text that cannot name a record
/// reports the record as missing rather than the request as malformed.
pub(crate) fn parse_path_id<T: FromStr>(raw: &str, not_found: &'static str) -> Result<T, Error> {
    raw.parse().map_err(|_| Error::not_found(not_found))
}

/// Parse an optional identifier carried in a request body. Blank text means
/// "no reference".
pub(crate) fn parse_reference_id<T: FromStr>(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<T>, Error> {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    value.parse().map(Some).map_err(|_| {
        Error::invalid_request(format!("{field} does not exist"))
            .with_details(json!({ "field": field }))
    })
}

/// Decode an update body that was accepted as raw JSON.
pub(crate) fn decode_body<T: DeserializeOwned>(body: Value) -> Result<T, Error> {
    serde_json::from_value(body)
        .map_err(|err| Error::invalid_request(format!("invalid JSON body: {err}")))
}

/// Settle a parsed update body against the record it targets.
///
/// A rejected body is only reported once `lookup` has found the record and
/// passed the ownership guard; until then the lookup's error wins.
pub(crate) async fn checked_patch<P, R, F, Fut>(
    parsed: Result<P, Error>,
    lookup: F,
) -> Result<P, Error>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<R, Error>>,
{
    match parsed {
        Ok(patch) => Ok(patch),
        Err(rejected) => {
            lookup().await?;
            Err(rejected)
        }
    }
}

/// Parse an optional status label.
pub(crate) fn parse_optional<T>(raw: Option<&str>) -> Result<Option<T>, RecordValidationError>
where
    T: FromStr<Err = RecordValidationError>,
{
    raw.map(str::parse).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::domain::{ErrorCode, ProjectId, TaskStatus};
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case("2024-04-01")]
    #[case("2024-04-01T00:00:00Z")]
    #[case(" 2024-04-01T02:00:00+02:00 ")]
    fn dates_normalise_to_utc(#[case] raw: &str) {
        let expected = Utc
            .with_ymd_and_hms(2024, 4, 1, 0, 0, 0)
            .single()
            .expect("valid date");
        assert_eq!(parse_date("dueDate", raw), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("tomorrow")]
    #[case("2024-13-01")]
    fn unreadable_dates_name_the_field(#[case] raw: &str) {
        assert_eq!(
            parse_date("dueDate", raw),
            Err(RecordValidationError::InvalidDate { field: "dueDate" })
        );
    }

    #[rstest]
    fn unparseable_path_id_is_not_found() {
        let err = parse_path_id::<ProjectId>("abc", "Project not found").expect_err("bad id");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Project not found");
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("  "))]
    fn blank_reference_means_none(#[case] raw: Option<&str>) {
        assert_eq!(parse_reference_id::<ProjectId>("project", raw).expect("ok"), None);
    }

    #[rstest]
    fn malformed_reference_is_invalid_request() {
        let err = parse_reference_id::<ProjectId>("project", Some("nope")).expect_err("bad id");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details(), Some(&json!({ "field": "project" })));
    }

    #[rstest]
    fn mistyped_body_is_invalid_request() {
        let err = decode_body::<HashMap<String, f64>>(json!({ "amount": "lots" }))
            .expect_err("wrong type");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert!(err.message().starts_with("invalid JSON body"));
    }

    #[rstest]
    #[case(Err(Error::not_found("Task not found")), ErrorCode::NotFound)]
    #[case(Err(Error::not_authorized("Not authorized")), ErrorCode::NotAuthorized)]
    #[case(Ok(()), ErrorCode::InvalidRequest)]
    #[tokio::test]
    async fn lookup_errors_outrank_body_errors(
        #[case] lookup: Result<(), Error>,
        #[case] expected: ErrorCode,
    ) {
        let parsed: Result<u8, Error> = Err(Error::invalid_request("title must not be empty"));
        let err = checked_patch(parsed, || async { lookup })
            .await
            .expect_err("rejected body");
        assert_eq!(err.code(), expected);
    }

    #[tokio::test]
    async fn valid_body_skips_the_lookup() {
        let mut looked_up = false;
        let patch = checked_patch(Ok(7_u8), || {
            looked_up = true;
            async { Ok::<(), Error>(()) }
        })
        .await
        .expect("valid body");
        assert_eq!(patch, 7);
        assert!(!looked_up);
    }

    #[rstest]
    fn status_labels_are_parsed_when_present() {
        assert_eq!(
            parse_optional::<TaskStatus>(Some("In Progress")),
            Ok(Some(TaskStatus::InProgress))
        );
        assert!(parse_optional::<TaskStatus>(Some("Blocked")).is_err());
        assert_eq!(parse_optional::<TaskStatus>(None), Ok(None));
    }
}
