//! Text scraping of `mount` and `lscp` output
//!
//! Nothing here fails: lines that do not have the expected shape are skipped,
//! so malformed output simply yields fewer rows.

use regex::Regex;

use crate::{CheckpointEntry, EntryKind, MountEntry};

/// Compiled patterns for one filesystem type
#[derive(Debug, Clone)]
pub struct MountParser {
    device_re: Regex,
    entry_re: Regex,
}

impl MountParser {
    pub fn new(fs_type: &str) -> Self {
        let fs = regex::escape(fs_type);
        // Patterns are built from an escaped literal and cannot fail to compile
        let device_re = Regex::new(&format!(r"^/(.*)\s+on\s+/(.*)\s+type\s+{fs}\s+"))
            .expect("valid device regex");
        let entry_re = Regex::new(&format!(
            r"^/(.*)\s+on\s+/(.*)\s+type\s+{fs}\s+\(.*\bcp=(\d+)\b.*\)\s*$"
        ))
        .expect("valid mount entry regex");

        Self { device_re, entry_re }
    }

    /// Unique devices, most recently listed first
    pub fn devices(&self, output: &str) -> Vec<String> {
        let mut devices: Vec<String> = Vec::new();

        for line in output.lines().rev() {
            if let Some(caps) = self.device_re.captures(line) {
                let device = format!("/{}", &caps[1]);
                if !devices.contains(&device) {
                    devices.push(device);
                }
            }
        }

        devices
    }

    /// Checkpoint mounts, in listing order
    ///
    /// Lines without a `cp=` option (the writable mount) are not entries.
    pub fn mount_entries(&self, output: &str) -> Vec<MountEntry> {
        let mut entries = Vec::new();

        for line in output.lines().rev() {
            let Some(caps) = self.entry_re.captures(line) else {
                continue;
            };
            let Ok(checkpoint) = caps[3].parse::<u64>() else {
                continue;
            };

            // Each row goes on top of the ones already collected
            entries.insert(
                0,
                MountEntry {
                    checkpoint,
                    mount_point: format!("/{}", &caps[2]),
                    device: format!("/{}", &caps[1]),
                },
            );
        }

        entries
    }
}

/// Devices mounted with `fs_type`, see [`MountParser::devices`]
pub fn parse_devices(output: &str, fs_type: &str) -> Vec<String> {
    MountParser::new(fs_type).devices(output)
}

/// Checkpoint mounts of `fs_type`, see [`MountParser::mount_entries`]
pub fn parse_mount_entries(output: &str, fs_type: &str) -> Vec<MountEntry> {
    MountParser::new(fs_type).mount_entries(output)
}

/// Parse `lscp` output for one device, keeping rows tagged with `kind`
///
/// Rows are returned in the order they appear in the output. Both the native
/// `<cno> <date> <time> <mode> ...` layout and `<date> <time> <cno> <tag>`
/// are understood.
pub fn parse_checkpoints(output: &str, device: &str, kind: EntryKind) -> Vec<CheckpointEntry> {
    output
        .lines()
        .filter(|line| line.chars().any(|c| c.is_ascii_digit()))
        .filter_map(|line| parse_checkpoint_line(line, device))
        .filter(|entry| entry.kind == kind)
        .collect()
}

fn parse_checkpoint_line(line: &str, device: &str) -> Option<CheckpointEntry> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return None;
    }

    let (checkpoint, date, time, tag) = if is_number(fields[0]) {
        (fields[0], fields[1], fields[2], fields[3])
    } else if is_number(fields[2]) {
        (fields[2], fields[0], fields[1], fields[3])
    } else {
        return None;
    };

    Some(CheckpointEntry {
        date: date.to_string(),
        time: time.to_string(),
        checkpoint: checkpoint.parse().ok()?,
        device: device.to_string(),
        kind: EntryKind::from_tag(tag)?,
    })
}

fn is_number(field: &str) -> bool {
    !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit())
}
