use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Local};

/// The kind of record an id is minted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Project,
    Subtask,
    Note,
}

impl IdKind {
    pub fn prefix(self) -> &'static str {
        match self {
            IdKind::Project => "proj",
            IdKind::Subtask => "task",
            IdKind::Note => "note",
        }
    }
}

/// Last microsecond stamp handed out by this process.
static LAST_ISSUED_MICROS: AtomicI64 = AtomicI64::new(i64::MIN);

/// Mint an id such as `proj_20260115103000123456`.
///
/// The stamp is the local wall clock at microsecond resolution. Calls that
/// land on the same microsecond are pushed forward one microsecond at a time,
/// so ids from one process never repeat.
pub fn generate_id(kind: IdKind) -> String {
    let now = Local::now().naive_local();
    let wanted = now.and_utc().timestamp_micros();

    let mut last = LAST_ISSUED_MICROS.load(Ordering::Relaxed);
    let issued = loop {
        let candidate = wanted.max(last.saturating_add(1));
        match LAST_ISSUED_MICROS.compare_exchange_weak(
            last,
            candidate,
            Ordering::AcqRel,
            Ordering::Relaxed,
        ) {
            Ok(_) => break candidate,
            Err(actual) => last = actual,
        }
    };

    let stamp = DateTime::from_timestamp_micros(issued)
        .map(|dt| dt.naive_utc())
        .unwrap_or(now);
    format!("{}_{}", kind.prefix(), stamp.format("%Y%m%d%H%M%S%6f"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rapid_ids_are_distinct() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_id(IdKind::Subtask)).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_id_carries_kind_prefix_and_stamp() {
        let id = generate_id(IdKind::Project);
        let (prefix, stamp) = id.split_once('_').unwrap();
        assert_eq!(prefix, "proj");
        assert_eq!(stamp.len(), 20);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
        assert!(generate_id(IdKind::Note).starts_with("note_"));
    }
}
