use iso8601_timestamp::Timestamp;

/// Parse an optional timestamp field, treating malformed values as absent
pub fn parse(name: &'static str, value: Option<&str>) -> Option<Timestamp> {
    let value = value?;
    let parsed = Timestamp::parse(value);
    if parsed.is_none() {
        warn!(field = name, value, "malformed timestamp");
    }

    parsed
}
