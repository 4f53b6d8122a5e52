use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("git not found, skipping commit")]
    ToolMissing,
    #[error("git {step} failed: {stderr}")]
    CommandFailed { step: &'static str, stderr: String },
    #[error("cannot run git {step}: {source}")]
    Spawn {
        step: &'static str,
        source: std::io::Error,
    },
}

/// Records a saved document in version control.
pub trait Snapshotter {
    fn snapshot(&self, file: &Path, label: &str) -> Result<(), SnapshotError>;
}

/// Stages, commits and pushes from the directory holding the file.
pub struct GitSnapshotter {
    program: PathBuf,
}

impl Default for GitSnapshotter {
    fn default() -> Self {
        Self {
            program: PathBuf::from("git"),
        }
    }
}

impl GitSnapshotter {
    #[cfg(test)]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, dir: &Path, step: &'static str, args: &[&str]) -> Result<(), SnapshotError> {
        let output = Command::new(&self.program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|source| match source.kind() {
                std::io::ErrorKind::NotFound => SnapshotError::ToolMissing,
                _ => SnapshotError::Spawn { step, source },
            })?;
        if !output.status.success() {
            return Err(SnapshotError::CommandFailed {
                step,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        tracing::debug!(step, "git step ok");
        Ok(())
    }
}

impl Snapshotter for GitSnapshotter {
    fn snapshot(&self, file: &Path, label: &str) -> Result<(), SnapshotError> {
        let dir = match file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file.to_string_lossy().to_string());

        self.run(dir, "add", &["add", &name])?;
        self.run(dir, "commit", &["commit", "-m", label])?;
        self.run(dir, "push", &["push"])?;
        Ok(())
    }
}
