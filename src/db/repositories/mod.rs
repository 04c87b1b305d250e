pub mod favorite;
pub mod review;

/// UTC timestamp with microsecond precision so string ordering follows insertion order.
pub(crate) fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}
