use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Enums stored on disk by their display label.
pub trait Labelled: Sized + Copy + Default + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.label().eq_ignore_ascii_case(s))
    }
}

fn read_labelled<'de, T, D>(deserializer: D, what: &'static str) -> Result<T, D::Error>
where
    T: Labelled,
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value.as_str().and_then(T::parse) {
        Some(v) => Ok(v),
        None => {
            if !value.is_null() {
                tracing::warn!(%value, name = what, "unrecognised value, using default");
            }
            Ok(T::default())
        }
    }
}

/// A labelled field as it was stored: a recognised value, or the original
/// JSON kept verbatim so saving does not rewrite it.
#[derive(Debug, Clone, PartialEq)]
pub enum Stored<T> {
    Known(T),
    Unknown(Value),
}

impl<T: Labelled> Stored<T> {
    /// The recognised value, or the default for an unknown label.
    pub fn get(&self) -> T {
        match self {
            Stored::Known(v) => *v,
            Stored::Unknown(_) => T::default(),
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Stored::Known(_))
    }

    /// Replace with `value` unless it is already what `get` reports.
    /// An unknown label survives being "set" to the default it displays as.
    pub fn set(&mut self, value: T)
    where
        T: PartialEq,
    {
        if self.get() != value {
            *self = Stored::Known(value);
        }
    }
}

impl<T: Default> Default for Stored<T> {
    fn default() -> Self {
        Stored::Known(T::default())
    }
}

impl<T> From<T> for Stored<T> {
    fn from(value: T) -> Self {
        Stored::Known(value)
    }
}

impl<T: Labelled> Serialize for Stored<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Stored::Known(v) => serializer.serialize_str(v.label()),
            Stored::Unknown(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de, T: Labelled> Deserialize<'de> for Stored<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(Stored::default());
        }
        match value.as_str().and_then(T::parse) {
            Some(v) => Ok(Stored::Known(v)),
            None => {
                tracing::warn!(%value, "unrecognised label, keeping it as written");
                Ok(Stored::Unknown(value))
            }
        }
    }
}

/// Priority of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Labelled for Priority {
    const ALL: &'static [Self] = &[Priority::High, Priority::Medium, Priority::Low];

    fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

/// Stored (base) status of a project. `Overdue` is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    OnHold,
}

impl Labelled for Status {
    const ALL: &'static [Self] = &[
        Status::NotStarted,
        Status::InProgress,
        Status::Completed,
        Status::OnHold,
    ];

    fn label(self) -> &'static str {
        match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
            Status::OnHold => "On Hold",
        }
    }
}

/// Status as shown to the user: the stored status, or `Overdue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DisplayStatus {
    NotStarted,
    InProgress,
    Completed,
    OnHold,
    Overdue,
}

impl DisplayStatus {
    pub const ALL: &'static [DisplayStatus] = &[
        DisplayStatus::NotStarted,
        DisplayStatus::InProgress,
        DisplayStatus::Completed,
        DisplayStatus::Overdue,
        DisplayStatus::OnHold,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DisplayStatus::NotStarted => "Not Started",
            DisplayStatus::InProgress => "In Progress",
            DisplayStatus::Completed => "Completed",
            DisplayStatus::OnHold => "On Hold",
            DisplayStatus::Overdue => "Overdue",
        }
    }
}

impl From<Status> for DisplayStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::NotStarted => DisplayStatus::NotStarted,
            Status::InProgress => DisplayStatus::InProgress,
            Status::Completed => DisplayStatus::Completed,
            Status::OnHold => DisplayStatus::OnHold,
        }
    }
}

impl std::fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        read_labelled(deserializer, "priority")
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        read_labelled(deserializer, "status")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_labels_round_trip_through_json() {
        for status in Status::ALL {
            let v = serde_json::to_value(status).unwrap();
            assert_eq!(serde_json::from_value::<Status>(v).unwrap(), *status);
        }
        assert_eq!(serde_json::to_value(Status::OnHold).unwrap(), json!("On Hold"));
    }

    #[test]
    fn test_unknown_labels_fall_back_to_default() {
        assert_eq!(serde_json::from_value::<Status>(json!("Overdue")).unwrap(), Status::NotStarted);
        assert_eq!(serde_json::from_value::<Priority>(json!("urgent")).unwrap(), Priority::Medium);
        assert_eq!(serde_json::from_value::<Priority>(json!("high")).unwrap(), Priority::High);
    }

    #[test]
    fn test_stored_label_keeps_unknown_text() {
        let blocked: Stored<Status> = serde_json::from_value(json!("Blocked")).unwrap();
        assert!(!blocked.is_known());
        assert_eq!(blocked.get(), Status::NotStarted);
        assert_eq!(serde_json::to_value(&blocked).unwrap(), json!("Blocked"));

        let known: Stored<Priority> = serde_json::from_value(json!("low")).unwrap();
        assert_eq!(known, Stored::Known(Priority::Low));
        assert_eq!(serde_json::to_value(&known).unwrap(), json!("Low"));
        let missing: Stored<Priority> = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(missing, Stored::Known(Priority::Medium));
    }

    #[test]
    fn test_setting_the_displayed_default_keeps_unknown_label() {
        let mut status: Stored<Status> = Stored::Unknown(json!("Blocked"));
        status.set(Status::NotStarted);
        assert_eq!(status, Stored::Unknown(json!("Blocked")));
        status.set(Status::InProgress);
        assert_eq!(status, Stored::Known(Status::InProgress));
    }
}
