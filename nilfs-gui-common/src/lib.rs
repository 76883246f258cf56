// Shared types and utilities for NILFS GUI

pub mod config;
pub mod format;
pub mod parse;
pub mod scrub;
pub mod validation;

use chrono::NaiveDateTime;

pub use config::NilfsConfig;
pub use format::{format_age, format_elapsed_time};
pub use parse::{parse_checkpoints, parse_devices, parse_mount_entries, MountParser};
pub use scrub::{response_text, scrub_output};
pub use validation::{validate_argument, validate_directory, ValidationError};

/// Filesystem type handled by default
pub const DEFAULT_FS_TYPE: &str = "nilfs2";

/// GTK application ID
pub const APP_ID: &str = "org.nilfs.NilfsGui";

/// Whether a listing row is a plain checkpoint or a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Checkpoint,
    Snapshot,
}

impl EntryKind {
    /// Mode tag used by `lscp` output and by `chcp` as its target argument
    pub fn tag(self) -> &'static str {
        match self {
            EntryKind::Checkpoint => "cp",
            EntryKind::Snapshot => "ss",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "cp" => Some(EntryKind::Checkpoint),
            "ss" => Some(EntryKind::Snapshot),
            _ => None,
        }
    }

    /// Heading shown above a list of this kind
    pub fn title(self) -> &'static str {
        match self {
            EntryKind::Checkpoint => "Checkpoints",
            EntryKind::Snapshot => "Snapshots",
        }
    }
}

/// A checkpoint currently mounted read-only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub checkpoint: u64,
    pub mount_point: String,
    pub device: String,
}

impl MountEntry {
    pub fn selection(&self) -> Selection {
        Selection {
            checkpoint: self.checkpoint,
            target: self.mount_point.clone(),
        }
    }
}

/// One row of `lscp` output for a device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointEntry {
    pub date: String,
    pub time: String,
    pub checkpoint: u64,
    pub device: String,
    pub kind: EntryKind,
}

impl CheckpointEntry {
    pub fn selection(&self) -> Selection {
        Selection {
            checkpoint: self.checkpoint,
            target: self.device.clone(),
        }
    }

    /// Creation time, if the date and time columns parse
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&format!("{} {}", self.date, self.time), "%Y-%m-%d %H:%M:%S")
            .ok()
    }
}

/// The highlighted row of a list view, as needed by the next command
///
/// `target` is the mount point for mount-list rows and the device for
/// checkpoint and snapshot rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub checkpoint: u64,
    pub target: String,
}
