use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use thiserror::Error;

use super::ZonedTime;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed datetime: {0}")]
    Timestamp(#[from] chrono::ParseError),
    #[error("no answer within {0:?}")]
    Timeout(std::time::Duration),
}

/// Anything that can tell the current time in a given zone.
#[allow(async_fn_in_trait)]
pub trait TimeService {
    async fn fetch(&self) -> Result<ZonedTime, SyncError>;
}

/// Only the field we use; worldtimeapi sends a lot more.
#[derive(Deserialize, Debug)]
struct WorldTimeResponse {
    datetime: String,
}

pub struct WorldTimeApi {
    client: reqwest::Client,
    url: &'static str,
    zone: FixedOffset,
}

impl WorldTimeApi {
    pub fn new(url: &'static str, zone: FixedOffset) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, url, zone })
    }
}

impl TimeService for WorldTimeApi {
    async fn fetch(&self) -> Result<ZonedTime, SyncError> {
        let body = self
            .client
            .get(self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_response(&body, self.zone)
    }
}

/// Reads the ISO-8601 `datetime` field and moves it into `zone`.
pub fn parse_response(body: &str, zone: FixedOffset) -> Result<ZonedTime, SyncError> {
    let response: WorldTimeResponse = serde_json::from_str(body)?;
    let datetime = DateTime::parse_from_rfc3339(&response.datetime)?;
    Ok(datetime.with_timezone(&zone))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use chrono::Timelike;

    #[test]
    fn parses_datetime_field() {
        let time = parse_response(
            r#"{"datetime": "2024-01-01T15:00:00+05:30"}"#,
            config::ZONE,
        )
        .unwrap();

        assert_eq!(time.hour(), 15);
        assert_eq!(time.minute(), 0);
        assert_eq!(time.offset().local_minus_utc(), 19800);
    }

    #[test]
    fn converts_foreign_offset_into_zone() {
        let time = parse_response(
            r#"{"abbreviation": "UTC", "datetime": "2024-01-01T09:30:00.123456+00:00", "unixtime": 1704101400}"#,
            config::ZONE,
        )
        .unwrap();

        assert_eq!((time.hour(), time.minute(), time.second()), (15, 0, 0));
    }

    #[test]
    fn rejects_missing_field() {
        let result = parse_response(r#"{"utc_datetime": "2024-01-01T09:30:00Z"}"#, config::ZONE);
        assert!(matches!(result, Err(SyncError::Json(_))));
    }

    #[test]
    fn rejects_garbage_datetime() {
        let result = parse_response(r#"{"datetime": "yesterday"}"#, config::ZONE);
        assert!(matches!(result, Err(SyncError::Timestamp(_))));
    }
}
