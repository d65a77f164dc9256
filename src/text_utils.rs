use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

pub const DEFAULT_TIME_FORMAT: &str = "%b %e, %I:%M%P";

/// Either a raw Unix timestamp or an already parsed time.
pub enum TimeSource {
    Timestamp(i64),
    Parsed(NaiveDateTime),
}

impl From<i64> for TimeSource {
    fn from(value: i64) -> Self {
        TimeSource::Timestamp(value)
    }
}

impl From<NaiveDateTime> for TimeSource {
    fn from(value: NaiveDateTime) -> Self {
        TimeSource::Parsed(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for TimeSource {
    fn from(value: DateTime<Tz>) -> Self {
        TimeSource::Parsed(value.with_timezone(&Local).naive_local())
    }
}

fn to_local(secs: i64) -> NaiveDateTime {
    match Local.timestamp_opt(secs, 0).earliest() {
        Some(dt) => dt.naive_local(),
        None => DateTime::from_timestamp(secs, 0).unwrap_or_default().naive_utc(),
    }
}

/// Timestamps are shown in local time.
pub fn format_time<T: Into<TimeSource>>(src: T, fmt: &str) -> String {
    let date_time = match src.into() {
        TimeSource::Timestamp(secs) => to_local(secs),
        TimeSource::Parsed(date_time) => date_time,
    };
    date_time.format(fmt).to_string()
}

pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

pub fn join_url(base_url: &str, href: &str) -> String {
    if base_url.is_empty() {
        return href.to_string();
    }

    let base_url = base_url.trim_end_matches('/');
    format!("{}/{}", base_url, href)
}
