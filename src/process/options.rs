use serde::Deserialize;

/// Command line switches passed to rsync. Field names follow the long option names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RsyncOptions {
    /// Executable to run instead of `rsync` from `PATH`.
    pub rsync_binary_path: Option<String>,

    pub verbose: bool,
    pub quiet: bool,
    pub checksum: bool,
    pub archive: bool,
    pub recursive: bool,
    pub relative: bool,
    pub update: bool,
    pub inplace: bool,
    pub append: bool,
    pub dirs: bool,
    pub links: bool,
    pub copy_links: bool,
    pub safe_links: bool,
    pub hard_links: bool,
    pub perms: bool,
    pub executability: bool,
    pub acls: bool,
    pub xattrs: bool,
    pub owner: bool,
    pub group: bool,
    pub times: bool,
    pub omit_dir_times: bool,
    pub sparse: bool,
    pub dry_run: bool,
    pub whole_file: bool,
    pub one_file_system: bool,
    pub existing: bool,
    pub ignore_existing: bool,
    pub remove_source_files: bool,
    pub delete: bool,
    pub delete_excluded: bool,
    pub ignore_errors: bool,
    pub force: bool,
    pub partial: bool,
    pub prune_empty_dirs: bool,
    pub numeric_ids: bool,
    pub ignore_times: bool,
    pub size_only: bool,
    pub fuzzy: bool,
    pub compress: bool,
    pub cvs_exclude: bool,
    pub stats: bool,
    pub human_readable: bool,
    pub progress: bool,
    pub ipv4: bool,
    pub ipv6: bool,

    pub rsh: Option<String>,
    pub rsync_path: Option<String>,
    pub chmod: Option<String>,
    pub chown: Option<String>,
    pub partial_dir: Option<String>,
    pub temp_dir: Option<String>,
    pub compare_dest: Option<String>,
    pub copy_dest: Option<String>,
    pub link_dest: Option<String>,
    pub max_size: Option<String>,
    pub min_size: Option<String>,
    pub skip_compress: Option<String>,
    pub info: Option<String>,
    pub max_delete: Option<u32>,
    pub block_size: Option<u32>,
    pub timeout: Option<u32>,
    pub contimeout: Option<u32>,
    pub modify_window: Option<i32>,
    pub compress_level: Option<u8>,
    pub bwlimit: Option<String>,

    pub exclude: Vec<String>,
    pub include: Vec<String>,
    pub filter: Vec<String>,
}

impl RsyncOptions {
    pub fn binary(&self) -> &str {
        self.rsync_binary_path.as_deref().unwrap_or("rsync")
    }

    /// Switches on the flags whose output the progress parser depends on.
    pub fn force_progress_output(&mut self) {
        self.human_readable = true;
        self.partial = true;
        self.progress = true;
        self.archive = true;
    }

    pub fn args(&self) -> Vec<String> {
        let flags = [
            (self.verbose, "--verbose"),
            (self.quiet, "--quiet"),
            (self.checksum, "--checksum"),
            (self.archive, "--archive"),
            (self.recursive, "--recursive"),
            (self.relative, "--relative"),
            (self.update, "--update"),
            (self.inplace, "--inplace"),
            (self.append, "--append"),
            (self.dirs, "--dirs"),
            (self.links, "--links"),
            (self.copy_links, "--copy-links"),
            (self.safe_links, "--safe-links"),
            (self.hard_links, "--hard-links"),
            (self.perms, "--perms"),
            (self.executability, "--executability"),
            (self.acls, "--acls"),
            (self.xattrs, "--xattrs"),
            (self.owner, "--owner"),
            (self.group, "--group"),
            (self.times, "--times"),
            (self.omit_dir_times, "--omit-dir-times"),
            (self.sparse, "--sparse"),
            (self.dry_run, "--dry-run"),
            (self.whole_file, "--whole-file"),
            (self.one_file_system, "--one-file-system"),
            (self.existing, "--existing"),
            (self.ignore_existing, "--ignore-existing"),
            (self.remove_source_files, "--remove-source-files"),
            (self.delete, "--delete"),
            (self.delete_excluded, "--delete-excluded"),
            (self.ignore_errors, "--ignore-errors"),
            (self.force, "--force"),
            (self.partial, "--partial"),
            (self.prune_empty_dirs, "--prune-empty-dirs"),
            (self.numeric_ids, "--numeric-ids"),
            (self.ignore_times, "--ignore-times"),
            (self.size_only, "--size-only"),
            (self.fuzzy, "--fuzzy"),
            (self.compress, "--compress"),
            (self.cvs_exclude, "--cvs-exclude"),
            (self.stats, "--stats"),
            (self.human_readable, "--human-readable"),
            (self.progress, "--progress"),
            (self.ipv4, "--ipv4"),
            (self.ipv6, "--ipv6"),
        ];

        let mut args: Vec<String> = flags
            .iter()
            .filter(|(enabled, _)| *enabled)
            .map(|(_, flag)| flag.to_string())
            .collect();

        let values = [
            ("--rsh", self.rsh.clone()),
            ("--rsync-path", self.rsync_path.clone()),
            ("--chmod", self.chmod.clone()),
            ("--chown", self.chown.clone()),
            ("--partial-dir", self.partial_dir.clone()),
            ("--temp-dir", self.temp_dir.clone()),
            ("--compare-dest", self.compare_dest.clone()),
            ("--copy-dest", self.copy_dest.clone()),
            ("--link-dest", self.link_dest.clone()),
            ("--max-size", self.max_size.clone()),
            ("--min-size", self.min_size.clone()),
            ("--skip-compress", self.skip_compress.clone()),
            ("--info", self.info.clone()),
            ("--max-delete", self.max_delete.map(|v| v.to_string())),
            ("--block-size", self.block_size.map(|v| v.to_string())),
            ("--timeout", self.timeout.map(|v| v.to_string())),
            ("--contimeout", self.contimeout.map(|v| v.to_string())),
            ("--modify-window", self.modify_window.map(|v| v.to_string())),
            ("--compress-level", self.compress_level.map(|v| v.to_string())),
            ("--bwlimit", self.bwlimit.clone()),
        ];

        for (name, value) in values {
            if let Some(value) = value {
                args.push(format!("{}={}", name, value));
            }
        }

        for pattern in &self.exclude {
            args.push(format!("--exclude={}", pattern));
        }
        for pattern in &self.include {
            args.push(format!("--include={}", pattern));
        }
        for rule in &self.filter {
            args.push(format!("--filter={}", rule));
        }

        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_produce_no_arguments() {
        assert!(RsyncOptions::default().args().is_empty());
        assert_eq!(RsyncOptions::default().binary(), "rsync");
    }

    #[test]
    fn forced_flags_are_present() {
        let mut options = RsyncOptions::default();
        options.force_progress_output();

        let args = options.args();
        for flag in ["--archive", "--partial", "--human-readable", "--progress"] {
            assert!(args.contains(&flag.to_string()), "missing {}", flag);
        }
        assert_eq!(args.len(), 4);
    }

    #[test]
    fn valued_and_repeated_options() {
        let options = RsyncOptions {
            delete: true,
            rsh: Some("ssh -p 2222".to_string()),
            timeout: Some(30),
            exclude: vec!["*.tmp".to_string(), ".git/".to_string()],
            include: vec!["src/".to_string()],
            ..RsyncOptions::default()
        };

        assert_eq!(
            options.args(),
            vec![
                "--delete",
                "--rsh=ssh -p 2222",
                "--timeout=30",
                "--exclude=*.tmp",
                "--exclude=.git/",
                "--include=src/",
            ]
        );
    }

    #[test]
    fn deserializes_partial_records() {
        let options: RsyncOptions =
            serde_json::from_str(r#"{"dry_run": true, "exclude": ["target/"], "bwlimit": "1m"}"#)
                .unwrap();

        assert!(options.dry_run);
        assert_eq!(options.exclude, vec!["target/"]);
        assert_eq!(options.bwlimit.as_deref(), Some("1m"));
        assert!(!options.archive);
    }
}
