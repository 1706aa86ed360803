//! Show start times are naive local date-times with second precision.

use time::{macros::format_description, OffsetDateTime, PrimitiveDateTime};
use tracing::warn;

/// Current server-local time, truncated to whole seconds.
///
/// Falls back to UTC when the local offset cannot be determined
/// (e.g. in a multi-threaded process on some platforms).
pub fn local_now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_local().unwrap_or_else(|e| {
        warn!("Cannot determine local offset, using UTC: {e}");
        OffsetDateTime::now_utc()
    });
    let now = now.replace_nanosecond(0).unwrap_or(now);
    PrimitiveDateTime::new(now.date(), now.time())
}

/// Formats as `YYYY-MM-DD HH:MM:SS`
pub fn format_show_time(t: &PrimitiveDateTime) -> String {
    t.format(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ))
    .unwrap_or_else(|_| t.to_string())
}

pub fn parse_show_time(value: &str) -> Result<PrimitiveDateTime, time::error::Parse> {
    let value = value.trim();
    PrimitiveDateTime::parse(
        value,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )
    .or_else(|_| {
        PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        )
    })
    .or_else(|_| {
        PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day]T[hour]:[minute]"),
        )
    })
    .or_else(|_| {
        PrimitiveDateTime::parse(
            value,
            format_description!("[year]-[month]-[day] [hour]:[minute]"),
        )
    })
}
