use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A value with an ISO-8601 text form.
pub trait IsoValue: Sized + Copy {
    fn parse_iso(s: &str) -> Option<Self>;
    fn to_iso(&self) -> String;
}

impl IsoValue for NaiveDate {
    /// Accepts a bare date or any datetime form (keeping its date part).
    fn parse_iso(s: &str) -> Option<Self> {
        let s = s.trim();
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .or_else(|| NaiveDateTime::parse_iso(s).map(|dt| dt.date()))
    }

    fn to_iso(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }
}

impl IsoValue for NaiveDateTime {
    fn parse_iso(s: &str) -> Option<Self> {
        let s = s.trim();
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(dt);
            }
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.naive_local());
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    fn to_iso(&self) -> String {
        self.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
    }
}

/// A date-bearing field that keeps unparseable input verbatim.
///
/// Strings that parse become `Parsed`; anything else (bad strings, numbers,
/// objects) is held as `Raw` and written back unchanged on save.
#[derive(Debug, Clone, PartialEq)]
pub enum Lenient<T> {
    Parsed(T),
    Raw(Value),
}

/// Calendar fields: `start_date`, `due_date`.
pub type CalendarDate = Lenient<NaiveDate>;
/// Timestamp fields: `timestamp`, `created_at`, `updated_at`.
pub type Timestamp = Lenient<NaiveDateTime>;

impl<T: IsoValue> Lenient<T> {
    pub fn from_json(value: Value) -> Self {
        match value.as_str().and_then(T::parse_iso) {
            Some(parsed) => Lenient::Parsed(parsed),
            None => Lenient::Raw(value),
        }
    }

    /// The parsed value, if the field held a recognisable date.
    pub fn value(&self) -> Option<T> {
        match self {
            Lenient::Parsed(v) => Some(*v),
            Lenient::Raw(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Lenient::Parsed(v) => Value::String(v.to_iso()),
            Lenient::Raw(raw) => raw.clone(),
        }
    }
}

impl<T> From<T> for Lenient<T> {
    fn from(value: T) -> Self {
        Lenient::Parsed(value)
    }
}

impl<T: IsoValue> Serialize for Lenient<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Lenient::Parsed(v) => serializer.serialize_str(&v.to_iso()),
            Lenient::Raw(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de, T: IsoValue> Deserialize<'de> for Lenient<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let lenient = Lenient::from_json(value);
        if let Lenient::Raw(raw) = &lenient {
            tracing::warn!(value = %raw, "keeping unparseable date value as-is");
        }
        Ok(lenient)
    }
}

/// Parsed value of an optional lenient field.
pub fn value_of<T: IsoValue>(field: &Option<Lenient<T>>) -> Option<T> {
    field.as_ref().and_then(Lenient::value)
}

/// Current local time truncated to microseconds, the precision stored on disk.
pub fn now_timestamp() -> NaiveDateTime {
    let now = Local::now().naive_local();
    let micros = now.nanosecond() / 1_000 * 1_000;
    now.with_nanosecond(micros).unwrap_or(now)
}

/// Today's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_date_accepts_datetime_text() {
        let field: CalendarDate = serde_json::from_value(json!("2026-01-15T10:30:00.123456")).unwrap();
        assert_eq!(field.value(), Some(date(2026, 1, 15)));
        assert_eq!(serde_json::to_value(&field).unwrap(), json!("2026-01-15"));
    }

    #[test]
    fn test_unparseable_date_is_kept_verbatim() {
        let field: CalendarDate = serde_json::from_value(json!("end of Q1")).unwrap();
        assert_eq!(field, Lenient::Raw(json!("end of Q1")));
        assert_eq!(field.value(), None);
        assert_eq!(serde_json::to_value(&field).unwrap(), json!("end of Q1"));
    }

    #[test]
    fn test_non_string_date_is_kept_verbatim() {
        let field: Timestamp = serde_json::from_value(json!(1735689600)).unwrap();
        assert_eq!(serde_json::to_value(&field).unwrap(), json!(1735689600));
    }

    #[test]
    fn test_timestamp_keeps_microseconds() {
        let field: Timestamp = serde_json::from_value(json!("2026-02-03T08:09:10.000042")).unwrap();
        let ts = field.value().unwrap();
        assert_eq!(ts.nanosecond(), 42_000);
        assert_eq!(field.to_json(), json!("2026-02-03T08:09:10.000042"));
    }

    #[test]
    fn test_timestamp_accepts_offset_and_space_forms() {
        assert!(NaiveDateTime::parse_iso("2026-02-03 08:09:10").is_some());
        assert!(NaiveDateTime::parse_iso("2026-02-03T08:09:10+01:00").is_some());
        assert_eq!(
            NaiveDateTime::parse_iso("2026-02-03").map(|dt| dt.date()),
            Some(date(2026, 2, 3))
        );
    }

    #[test]
    fn test_now_timestamp_round_trips() {
        let now = now_timestamp();
        assert_eq!(NaiveDateTime::parse_iso(&now.to_iso()), Some(now));
    }
}
