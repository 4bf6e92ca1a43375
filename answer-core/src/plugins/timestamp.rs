//! Unix timestamp plugin (`timestamp`)

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::answer::{escape_html, Answer, AnswerKind};
use crate::context::QueryContext;
use crate::error::Result;
use crate::plugin::{PatternMatcher, Plugin};

/// Values at or above this magnitude are read as milliseconds
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Converts Unix timestamps to calendar dates, or reports the current one
pub struct TimestampPlugin {
    /// `[now, convert]`
    patterns: Vec<PatternMatcher>,
}

impl TimestampPlugin {
    pub const NAME: &'static str = "timestamp";

    pub fn new() -> Result<Self> {
        let now = PatternMatcher::new(&[
            r"^(?:current|now)\s+(?:unix\s+|epoch\s+)?(?:timestamp|time\s*stamp|epoch|unix\s+time)$",
            r"^(?:unix|epoch)\s+(?:time|timestamp)(?:\s+now)?$",
            r"^(?:timestamp|epoch)\s+now$",
        ])?;
        let convert = PatternMatcher::new(&[
            r"^(?:unix|epoch|timestamp)(?:\s+(?:time|timestamp))?\s+(?P<value>-?\d+)$",
            r"^(?P<value>-?\d+)\s+(?:to|in|as)\s+(?:date|utc|iso|iso\s*8601)$",
        ])?;

        Ok(Self {
            patterns: vec![now, convert],
        })
    }

    fn render(&self, query: &str, title: &str, at: DateTime<Utc>) -> Result<Answer> {
        let iso = at.to_rfc3339_opts(SecondsFormat::Secs, true);
        let weekday = at.format("%A").to_string();
        let content = format!(
            "<div class=\"answer-timestamp\"><span class=\"seconds\">{}</span> = <time datetime=\"{}\">{}</time></div>",
            at.timestamp(),
            iso,
            at.format("%A, %B %-d, %Y %H:%M:%S UTC")
        );
        Answer::new(AnswerKind::Timestamp, query, title, content)
            .with_data("seconds", at.timestamp())?
            .with_data("milliseconds", at.timestamp_millis())?
            .with_data("iso8601", &iso)?
            .with_data("weekday", &weekday)
    }

    fn out_of_range(&self, query: &str, raw: &str) -> Result<Answer> {
        let content = format!(
            "<div class=\"answer-timestamp answer-error\"><code>{}</code> is outside the supported date range</div>",
            escape_html(raw)
        );
        Answer::new(AnswerKind::Timestamp, query, "Unix Timestamp", content)
            .with_data("input", raw)?
            .with_data("error", "OUT_OF_RANGE")
    }
}

/// Interpret a raw value as seconds, or as milliseconds when it is large
fn to_datetime(value: i64) -> Option<DateTime<Utc>> {
    if value.unsigned_abs() >= MILLIS_THRESHOLD as u64 {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    }
}

#[async_trait]
impl Plugin for TimestampPlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Converts Unix timestamps (seconds or milliseconds) to UTC dates"
    }

    fn examples(&self) -> &[&'static str] {
        &["unix 1700000000", "timestamp 1700000000000", "current timestamp"]
    }

    fn patterns(&self) -> &[PatternMatcher] {
        &self.patterns
    }

    async fn handle(&self, _ctx: &QueryContext, query: &str) -> Result<Option<Answer>> {
        if self.patterns[0].is_match(query) {
            return self.render(query, "Current Unix Timestamp", Utc::now()).map(Some);
        }

        let Some(raw) = self.patterns[1].named(query, "value") else {
            return Ok(None);
        };
        let answer = match raw.parse::<i64>().ok().and_then(to_datetime) {
            Some(at) => self.render(query, "Unix Timestamp", at)?,
            None => self.out_of_range(query, &raw)?,
        };
        Ok(Some(answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn answer(query: &str) -> Option<Answer> {
        TimestampPlugin::new()
            .unwrap()
            .handle(&QueryContext::new(), query)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_seconds() {
        let a = answer("unix 0").await.unwrap();
        assert_eq!(a.get("iso8601").unwrap(), "1970-01-01T00:00:00Z");
        assert_eq!(a.get("weekday").unwrap(), "Thursday");

        let a = answer("timestamp 1700000000").await.unwrap();
        assert_eq!(a.get("iso8601").unwrap(), "2023-11-14T22:13:20Z");
        assert_eq!(a.get("milliseconds").unwrap(), 1_700_000_000_000i64);
    }

    #[tokio::test]
    async fn test_large_values_are_milliseconds() {
        let a = answer("epoch 1700000000000").await.unwrap();
        assert_eq!(a.get("seconds").unwrap(), 1_700_000_000i64);
        assert_eq!(a.get("iso8601").unwrap(), "2023-11-14T22:13:20Z");
    }

    #[tokio::test]
    async fn test_negative_seconds() {
        let a = answer("unix -86400").await.unwrap();
        assert_eq!(a.get("iso8601").unwrap(), "1969-12-31T00:00:00Z");
    }

    #[tokio::test]
    async fn test_now() {
        let before = Utc::now().timestamp();
        let a = answer("current timestamp").await.unwrap();
        let seconds = a.get("seconds").unwrap().as_i64().unwrap();
        assert!(seconds >= before);
        assert_eq!(a.title, "Current Unix Timestamp");
    }

    #[tokio::test]
    async fn test_unparseable_value_is_rendered() {
        let a = answer("unix 99999999999999999999").await.unwrap();
        assert_eq!(a.get("error").unwrap(), "OUT_OF_RANGE");
    }
}
