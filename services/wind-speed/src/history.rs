//! Provenance records for the `history` global attribute.
//!
//! Each processing step prepends one line to `history`:
//!
//! ```text
//! Tue Mar 05 14:02:11 2024 /usr/local/bin/calc-wind-speed calc-wind-speed u.nc uwnd v.nc vwnd out.nc (Git hash: 1a2b3c4)
//! ```

use std::path::Path;
use std::process::Command;

use chrono::{DateTime, Local, TimeZone};
use tracing::debug;

use crate::config::RuntimeConfig;
use crate::error::{WindSpeedError, WindSpeedResult};

/// Name of the global attribute holding the processing log.
pub const HISTORY: &str = "history";

/// `strftime` format of the record timestamp.
pub const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

const SHORT_HASH_LEN: usize = 7;

/// A version-control commit identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision(String);

impl Revision {
    /// Accept a hex commit identifier of at least 7 characters.
    pub fn new(id: impl Into<String>) -> WindSpeedResult<Self> {
        let id = id.into().trim().to_string();
        if id.len() < SHORT_HASH_LEN || !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(WindSpeedError::InvalidRevision(id));
        }
        Ok(Self(id))
    }

    /// Resolve the commit checked out in `repo_dir` with `git rev-parse HEAD`.
    pub fn from_repository(repo_dir: &Path) -> WindSpeedResult<Self> {
        let output = Command::new("git")
            .arg("-C")
            .arg(repo_dir)
            .args(["rev-parse", "--verify", "HEAD"])
            .output()
            .map_err(|e| WindSpeedError::CommandError(format!("Failed to run git: {}", e)))?;

        if !output.status.success() {
            return Err(WindSpeedError::NotARepository(format!(
                "{}: {}",
                repo_dir.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Self::new(String::from_utf8_lossy(&output.stdout))
    }

    /// The abbreviated 7-character form.
    pub fn short(&self) -> &str {
        &self.0[..SHORT_HASH_LEN]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// How the current output is being produced.
#[derive(Debug, Clone)]
pub struct ProvenanceContext {
    /// Path of the running executable
    pub executable: String,
    /// Full invocation, program name included, joined by single spaces
    pub invocation: String,
    pub revision: Revision,
}

impl ProvenanceContext {
    pub fn new(
        executable: impl Into<String>,
        args: impl IntoIterator<Item = impl AsRef<str>>,
        revision: Revision,
    ) -> Self {
        let invocation = args
            .into_iter()
            .map(|arg| arg.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            executable: executable.into(),
            invocation,
            revision,
        }
    }

    /// Build the context of the running process.
    ///
    /// The revision comes from `config.revision` when set, otherwise from the
    /// repository at `config.repo_dir`.
    pub fn from_process(config: &RuntimeConfig) -> WindSpeedResult<Self> {
        let revision = match &config.revision {
            Some(id) => Revision::new(id.as_str())?,
            None => Revision::from_repository(&config.repo_dir)?,
        };
        let executable = std::env::current_exe()
            .map(|p| p.display().to_string())
            .map_err(|e| {
                WindSpeedError::CommandError(format!("Failed to resolve executable path: {}", e))
            })?;

        let context = Self::new(executable, std::env::args(), revision);
        debug!(
            executable = %context.executable,
            revision = %context.revision.as_str(),
            "Resolved provenance"
        );
        Ok(context)
    }
}

/// Create a history record for `context` at time `now`.
pub fn create_history<Tz>(context: &ProvenanceContext, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{} {} {} (Git hash: {})",
        now.format(TIMESTAMP_FORMAT),
        context.executable,
        context.invocation,
        context.revision.short()
    )
}

/// Create a history record stamped with the current local time.
pub fn stamp(context: &ProvenanceContext) -> String {
    create_history(context, &Local::now())
}

/// Prepend `new_record` to an existing history.
pub fn chain_history(new_record: &str, old_history: &str) -> String {
    format!("{}\n{}", new_record, old_history)
}
