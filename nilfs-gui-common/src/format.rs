//! Formatting utilities for list rows

use chrono::NaiveDateTime;

use crate::{CheckpointEntry, MountEntry};

/// Format elapsed time into human-readable string
///
/// # Examples
/// ```
/// use nilfs_gui_common::format_elapsed_time;
/// assert_eq!(format_elapsed_time(30), "30s");
/// assert_eq!(format_elapsed_time(90), "1m 30s");
/// assert_eq!(format_elapsed_time(3665), "1h 1m");
/// assert_eq!(format_elapsed_time(90000), "1d 1h");
/// ```
pub fn format_elapsed_time(seconds: i64) -> String {
    if seconds < 60 {
        format!("{seconds}s")
    } else if seconds < 3600 {
        let mins = seconds / 60;
        let secs = seconds % 60;
        if secs == 0 {
            format!("{mins}m")
        } else {
            format!("{mins}m {secs}s")
        }
    } else if seconds < 86400 {
        let hours = seconds / 3600;
        let mins = (seconds % 3600) / 60;
        if mins == 0 {
            format!("{hours}h")
        } else {
            format!("{hours}h {mins}m")
        }
    } else {
        let days = seconds / 86400;
        let hours = (seconds % 86400) / 3600;
        if hours == 0 {
            format!("{days}d")
        } else {
            format!("{days}d {hours}h")
        }
    }
}

/// Age of a checkpoint relative to `now`, e.g. "2h 5m ago"
///
/// Returns `None` for timestamps in the future (clock skew between the
/// volume and this machine).
pub fn format_age(timestamp: NaiveDateTime, now: NaiveDateTime) -> Option<String> {
    let seconds = now.signed_duration_since(timestamp).num_seconds();
    if seconds < 0 {
        return None;
    }
    Some(format!("{} ago", format_elapsed_time(seconds)))
}

/// Row title for a mounted checkpoint
pub fn mount_title(entry: &MountEntry) -> String {
    format!("Checkpoint {}", entry.checkpoint)
}

/// Row subtitle for a mounted checkpoint
pub fn mount_subtitle(entry: &MountEntry) -> String {
    format!("{}  •  {}", entry.mount_point, entry.device)
}

/// Row title for a checkpoint or snapshot
pub fn checkpoint_title(entry: &CheckpointEntry) -> String {
    format!("{} {}", entry.kind_label(), entry.checkpoint)
}

/// Row subtitle for a checkpoint or snapshot, with the age when known
pub fn checkpoint_subtitle(entry: &CheckpointEntry, now: NaiveDateTime) -> String {
    let mut parts = vec![format!("{} {}", entry.date, entry.time)];
    if let Some(age) = entry.timestamp().and_then(|ts| format_age(ts, now)) {
        parts.push(age);
    }
    parts.push(entry.device.clone());
    parts.join("  •  ")
}

impl CheckpointEntry {
    fn kind_label(&self) -> &'static str {
        match self.kind {
            crate::EntryKind::Checkpoint => "Checkpoint",
            crate::EntryKind::Snapshot => "Snapshot",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntryKind;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_format_elapsed_time() {
        assert_eq!(format_elapsed_time(0), "0s");
        assert_eq!(format_elapsed_time(60), "1m");
        assert_eq!(format_elapsed_time(3600), "1h");
        assert_eq!(format_elapsed_time(86400), "1d");
    }

    #[test]
    fn test_format_age() {
        let now = at("2024-01-02 05:04:05");
        assert_eq!(format_age(at("2024-01-02 03:04:05"), now).as_deref(), Some("2h ago"));
        assert_eq!(format_age(at("2024-01-03 00:00:00"), now), None);
    }

    #[test]
    fn test_checkpoint_row_text() {
        let entry = CheckpointEntry {
            date: "2024-01-02".to_string(),
            time: "03:04:05".to_string(),
            checkpoint: 17,
            device: "/dev/sda5".to_string(),
            kind: EntryKind::Snapshot,
        };
        assert_eq!(checkpoint_title(&entry), "Snapshot 17");
        assert_eq!(
            checkpoint_subtitle(&entry, at("2024-01-02 03:05:05")),
            "2024-01-02 03:04:05  •  1m ago  •  /dev/sda5"
        );
    }

    #[test]
    fn test_unparsable_date_hides_age() {
        let entry = CheckpointEntry {
            date: "yesterday".to_string(),
            time: "noon".to_string(),
            checkpoint: 3,
            device: "/dev/sdb1".to_string(),
            kind: EntryKind::Checkpoint,
        };
        assert_eq!(
            checkpoint_subtitle(&entry, at("2024-01-02 03:05:05")),
            "yesterday noon  •  /dev/sdb1"
        );
    }
}
