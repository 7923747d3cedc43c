//! Thin wrappers around the macOS command-line tools the audit relies on.
//!
//! Nothing in here interprets tool output; the inspector and verdict services
//! decide what a given exit status or description means.

use crate::domain::constants::QUARANTINE_ATTR;
use crate::domain::models::ToolsConfig;
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};

#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    pub stdout: String,
}

pub trait SystemTools {
    /// `xattr -p com.apple.quarantine <path>`
    fn read_quarantine(&self, path: &Path) -> Result<ToolOutput, ToolError>;
    /// `spctl --assess --type execute <path>`
    fn assess_execute(&self, path: &Path) -> Result<ToolOutput, ToolError>;
    /// `file <path>`
    fn describe_file(&self, path: &Path) -> Result<ToolOutput, ToolError>;
    /// `sudo xattr -dr com.apple.quarantine <path>`
    fn remove_quarantine(&self, path: &Path) -> Result<ToolOutput, ToolError>;
}

/// Runs the real tools as child processes, one at a time.
#[derive(Debug, Clone)]
pub struct CommandTools {
    config: ToolsConfig,
}

impl CommandTools {
    pub fn new(config: ToolsConfig) -> Self {
        Self { config }
    }

    fn capture(&self, program: &str, args: &[&OsStr]) -> Result<ToolOutput, ToolError> {
        tracing::debug!(program, ?args, "running tool");
        let out = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ToolError::Spawn {
                tool: program.to_string(),
                source,
            })?;
        Ok(ToolOutput {
            success: out.status.success(),
            stdout: String::from_utf8_lossy(&out.stdout).to_string(),
        })
    }
}

impl SystemTools for CommandTools {
    fn read_quarantine(&self, path: &Path) -> Result<ToolOutput, ToolError> {
        self.capture(
            &self.config.xattr,
            &[OsStr::new("-p"), OsStr::new(QUARANTINE_ATTR), path.as_os_str()],
        )
    }

    fn assess_execute(&self, path: &Path) -> Result<ToolOutput, ToolError> {
        self.capture(
            &self.config.spctl,
            &[
                OsStr::new("--assess"),
                OsStr::new("--type"),
                OsStr::new("execute"),
                path.as_os_str(),
            ],
        )
    }

    fn describe_file(&self, path: &Path) -> Result<ToolOutput, ToolError> {
        self.capture(&self.config.file, &[path.as_os_str()])
    }

    fn remove_quarantine(&self, path: &Path) -> Result<ToolOutput, ToolError> {
        let remove = [OsStr::new("-dr"), OsStr::new(QUARANTINE_ATTR), path.as_os_str()];
        let (program, args) = if self.config.elevate.is_empty() {
            (self.config.xattr.as_str(), remove.to_vec())
        } else {
            let mut args = vec![OsStr::new(&self.config.xattr)];
            args.extend(remove);
            (self.config.elevate.as_str(), args)
        };
        // Inherits the terminal so the elevation prompt reaches the user.
        tracing::debug!(program, ?args, "running tool");
        let status = Command::new(program)
            .args(&args)
            .status()
            .map_err(|source| ToolError::Spawn {
                tool: program.to_string(),
                source,
            })?;
        Ok(ToolOutput {
            success: status.success(),
            stdout: String::new(),
        })
    }
}

/// True if `program` is an existing path or can be found on `PATH`.
pub fn program_available(program: &str) -> bool {
    if program.is_empty() {
        return false;
    }
    let p = Path::new(program);
    if p.components().count() > 1 {
        return p.is_file();
    }
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}
