use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};
use tracing::debug;

/// Shells out to the JS runtime for solutions and tests.
pub struct Runner {
    program: String,
    workdir: PathBuf,
}

impl Runner {
    pub fn new(program: &str, workdir: impl Into<PathBuf>) -> Self {
        Runner {
            program: program.to_string(),
            workdir: workdir.into(),
        }
    }

    /// `<program> run <solution>`
    pub fn run_solution(&self, solution: &Path) -> Result<ExitStatus> {
        self.invoke(&[OsStr::new("run"), solution.as_os_str()])
    }

    /// `<program> test [file]`
    pub fn run_tests(&self, test_file: Option<&Path>) -> Result<ExitStatus> {
        let mut args = vec![OsStr::new("test")];
        if let Some(file) = test_file {
            args.push(file.as_os_str());
        }
        self.invoke(&args)
    }

    fn invoke(&self, args: &[&OsStr]) -> Result<ExitStatus> {
        debug!(program = %self.program, ?args, workdir = %self.workdir.display(), "spawning");
        Command::new(&self.program)
            .args(args)
            .current_dir(&self.workdir)
            .status()
            .with_context(|| format!("failed to launch `{}`", self.program))
    }
}

/// Process exit code to forward; signals and out-of-range codes become 1.
pub fn exit_code(status: ExitStatus) -> u8 {
    match status.code() {
        Some(code) => u8::try_from(code).unwrap_or(1),
        None => 1,
    }
}
