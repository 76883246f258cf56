use anyhow::{bail, Context, Result};
use std::path::Path;
use std::rc::Rc;

use nilfs_gui_common::{
    parse_checkpoints, validate_argument, CheckpointEntry, EntryKind, MountEntry, MountParser,
    NilfsConfig, Selection,
};

use crate::command::{CommandOutput, CommandRunner};

/// Devices and checkpoint mounts from one run of the mount listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountTable {
    pub devices: Vec<String>,
    pub entries: Vec<MountEntry>,
}

/// Front-end for `mount`, `lscp`, `chcp` and `umount`
pub struct NilfsTools {
    config: NilfsConfig,
    runner: Rc<dyn CommandRunner>,
    parser: MountParser,
    elevate: bool,
}

impl NilfsTools {
    /// Privileged commands go through the elevation wrapper unless we already run as root
    pub fn new(config: NilfsConfig, runner: Rc<dyn CommandRunner>) -> Self {
        let elevate = !is_root();
        if !elevate {
            log::info!("Running as root, privileged commands run without {}", config.elevate_cmd);
        }
        Self::with_elevation(config, runner, elevate)
    }

    pub fn with_elevation(config: NilfsConfig, runner: Rc<dyn CommandRunner>, elevate: bool) -> Self {
        let parser = MountParser::new(&config.fs_type);
        Self {
            config,
            runner,
            parser,
            elevate,
        }
    }

    pub fn config(&self) -> &NilfsConfig {
        &self.config
    }

    /// Raw `mount -l -t <fs>` output
    fn list_mounts(&self) -> Result<String> {
        let args = vec!["-l".to_string(), "-t".to_string(), self.config.fs_type.clone()];
        let output = self.runner.run(&self.config.mount_cmd, &args)?;

        if !output.success {
            bail!("{} failed: {}", self.config.mount_cmd, output.stderr.trim());
        }

        Ok(output.stdout)
    }

    /// Devices currently mounted with the target filesystem type
    ///
    /// An empty list means "no devices"; `Err` means the listing itself failed.
    pub fn devices(&self) -> Result<Vec<String>> {
        let output = self.list_mounts()?;
        Ok(self.parser.devices(&output))
    }

    /// Devices and checkpoint mounts from a single listing
    pub fn mount_table(&self) -> Result<MountTable> {
        let output = self.list_mounts()?;
        Ok(MountTable {
            devices: self.parser.devices(&output),
            entries: self.parser.mount_entries(&output),
        })
    }

    /// `lscp` rows of one device, in listing order
    pub fn checkpoints(&self, device: &str, kind: EntryKind) -> Result<Vec<CheckpointEntry>> {
        let mut args = Vec::new();
        if kind == EntryKind::Snapshot {
            args.push("-s".to_string());
        }
        args.extend(["-b".to_string(), "-r".to_string(), device.to_string()]);

        let output = self.runner.run(&self.config.lscp_cmd, &args)?;
        if !output.success {
            bail!(
                "{} failed for {device}: {}",
                self.config.lscp_cmd,
                output.stderr.trim()
            );
        }

        Ok(parse_checkpoints(&output.stdout, device, kind))
    }

    /// Mount checkpoint `selection.checkpoint` of `selection.target` read-only at `directory`
    pub fn mount_checkpoint(&self, selection: &Selection, directory: &Path) -> Result<CommandOutput> {
        validate_argument("device", &selection.target)?;
        let dir = directory.to_string_lossy().into_owned();
        validate_argument("mount point", &dir)?;

        let args = vec![
            "-t".to_string(),
            self.config.fs_type.clone(),
            "-r".to_string(),
            "-o".to_string(),
            format!("cp={}", selection.checkpoint),
            selection.target.clone(),
            dir,
        ];
        self.run_privileged(&self.config.mount_cmd, args)
    }

    /// Unmount the checkpoint mounted at `mount_point`
    pub fn unmount(&self, mount_point: &str) -> Result<CommandOutput> {
        validate_argument("mount point", mount_point)?;
        self.run_privileged(&self.config.umount_cmd, vec![mount_point.to_string()])
    }

    /// Turn a checkpoint into a snapshot or back (`chcp <cp|ss> <device> <cno>`)
    pub fn change_mode(&self, to: EntryKind, selection: &Selection) -> Result<CommandOutput> {
        validate_argument("device", &selection.target)?;
        let args = vec![
            to.tag().to_string(),
            selection.target.clone(),
            selection.checkpoint.to_string(),
        ];
        self.run_privileged(&self.config.chcp_cmd, args)
    }

    fn run_privileged(&self, program: &str, args: Vec<String>) -> Result<CommandOutput> {
        log::info!("Running privileged: {} {}", program, args.join(" "));

        let output = if self.elevate {
            let mut wrapped = Vec::with_capacity(args.len() + 1);
            wrapped.push(program.to_string());
            wrapped.extend(args);
            self.runner
                .run(&self.config.elevate_cmd, &wrapped)
                .with_context(|| format!("Could not start {}", self.config.elevate_cmd))?
        } else {
            self.runner.run(program, &args)?
        };

        if !output.success {
            log::warn!("{program} reported failure: {}", output.combined().trim());
        }

        Ok(output)
    }
}

/// Check if running as root
pub fn is_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::fake::FakeRunner;
    use std::path::PathBuf;

    fn tools(runner: &Rc<FakeRunner>) -> NilfsTools {
        NilfsTools::with_elevation(NilfsConfig::default(), runner.clone(), true)
    }

    #[test]
    fn test_mount_table() {
        let runner = Rc::new(FakeRunner::new());
        runner.respond(
            "mount -l -t nilfs2",
            "/dev/sda5 on / type nilfs2 (rw)\n/dev/sda5 on /mnt/backup type nilfs2 (ro,cp=42)\n",
        );

        let table = tools(&runner).mount_table().unwrap();
        assert_eq!(table.devices, vec!["/dev/sda5"]);
        assert_eq!(table.entries.len(), 1);
        assert_eq!(table.entries[0].checkpoint, 42);
    }

    #[test]
    fn test_listing_failure_is_distinct_from_empty() {
        let runner = Rc::new(FakeRunner::new());
        assert!(tools(&runner).devices().is_err());

        runner.respond_with(
            "mount -l -t nilfs2",
            CommandOutput {
                success: false,
                stdout: String::new(),
                stderr: "permission denied".to_string(),
            },
        );
        let err = tools(&runner).devices().unwrap_err();
        assert!(err.to_string().contains("permission denied"));

        runner.respond("mount -l -t nilfs2", "");
        assert!(tools(&runner).devices().unwrap().is_empty());
    }

    #[test]
    fn test_lscp_arguments() {
        let runner = Rc::new(FakeRunner::new());
        runner.respond("lscp -s -b -r /dev/sda5", "2024-01-02 03:04:05 17 ss\n");
        runner.respond("lscp -b -r /dev/sda5", "2024-01-02 03:04:05 16 cp\n");

        let t = tools(&runner);
        assert_eq!(t.checkpoints("/dev/sda5", EntryKind::Snapshot).unwrap()[0].checkpoint, 17);
        assert_eq!(t.checkpoints("/dev/sda5", EntryKind::Checkpoint).unwrap()[0].checkpoint, 16);
    }

    #[test]
    fn test_privileged_commands_are_wrapped() {
        let runner = Rc::new(FakeRunner::new());
        runner.respond("pkexec mount -t nilfs2 -r -o cp=17 /dev/sda5 /mnt/cp17", "");
        runner.respond("pkexec umount /mnt/backup", "");
        runner.respond("pkexec chcp ss /dev/sda5 17", "");

        let t = tools(&runner);
        let sel = Selection {
            checkpoint: 17,
            target: "/dev/sda5".to_string(),
        };
        t.mount_checkpoint(&sel, &PathBuf::from("/mnt/cp17")).unwrap();
        t.unmount("/mnt/backup").unwrap();
        t.change_mode(EntryKind::Snapshot, &sel).unwrap();

        assert_eq!(runner.calls().len(), 3);
    }

    #[test]
    fn test_root_runs_directly() {
        let runner = Rc::new(FakeRunner::new());
        runner.respond("chcp cp /dev/sda5 17", "");

        let t = NilfsTools::with_elevation(NilfsConfig::default(), runner.clone(), false);
        let sel = Selection {
            checkpoint: 17,
            target: "/dev/sda5".to_string(),
        };
        assert!(t.change_mode(EntryKind::Checkpoint, &sel).is_ok());
        assert_eq!(runner.calls(), vec!["chcp cp /dev/sda5 17"]);
    }

    #[test]
    fn test_option_like_targets_rejected() {
        let runner = Rc::new(FakeRunner::new());
        assert!(tools(&runner).unmount("--all").is_err());
        assert!(runner.calls().is_empty());
    }
}
