use chrono::{DateTime, SecondsFormat, Utc};

/// RFC 3339 in UTC with second precision, e.g. `2024-01-01T00:00:00Z`.
pub fn rfc3339(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn build_time() -> String {
    rfc3339(Utc::now())
}
