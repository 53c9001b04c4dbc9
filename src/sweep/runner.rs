//! Analyzer subprocess invocation
//!
//! Runs the analyzer synchronously: spawn, wait for exit, capture stdout and
//! stderr. No timeout is applied. Sweeps talk to the analyzer through the
//! [`ToolRunner`] trait so the driver can be exercised without a process.

use super::command::display_command;
use super::SweepError;
use std::process::{Command, Stdio};
use tracing::debug;

/// Captured result of one analyzer run
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
    /// Process exit code (`None` if killed by a signal)
    pub return_code: Option<i32>,
}

impl ToolOutput {
    /// Output of a run that exited with status 0
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            return_code: Some(0),
        }
    }

    /// Whether the process exited with status 0
    pub fn succeeded(&self) -> bool {
        self.return_code == Some(0)
    }
}

/// Something that can run the analyzer with a list of arguments
pub trait ToolRunner {
    /// Name of the tool (for logging)
    fn name(&self) -> &str;

    /// Run to completion with the given arguments
    fn run(&mut self, args: &[String]) -> Result<ToolOutput, SweepError>;

    /// Command line as it would be run, for logs and dry runs
    fn describe(&self, args: &[String]) -> String {
        display_command(self.name(), args)
    }
}

/// Runs the analyzer as a child process.
///
/// `leading_args` go before the per-configuration arguments, e.g. the script
/// path when `program` is `node`.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: String,
    leading_args: Vec<String>,
}

impl ProcessRunner {
    pub fn new(program: impl Into<String>, leading_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            leading_args,
        }
    }

    /// Full argv after the program name
    pub fn full_args(&self, args: &[String]) -> Vec<String> {
        self.leading_args.iter().chain(args).cloned().collect()
    }
}

impl ToolRunner for ProcessRunner {
    fn name(&self) -> &str {
        &self.program
    }

    fn describe(&self, args: &[String]) -> String {
        display_command(&self.program, &self.full_args(args))
    }

    fn run(&mut self, args: &[String]) -> Result<ToolOutput, SweepError> {
        let full_args = self.full_args(args);
        debug!("Running {} {:?}", self.program, full_args);

        let mut command = Command::new(&self.program);
        command.args(&full_args);
        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());

        let child = command.spawn().map_err(|source| SweepError::Spawn {
            tool: self.program.clone(),
            source,
        })?;

        // wait_with_output drains both pipes while waiting, so a chatty
        // child cannot block on a full stderr buffer
        let output = child.wait_with_output().map_err(|source| SweepError::Spawn {
            tool: self.program.clone(),
            source,
        })?;

        Ok(ToolOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            return_code: output.status.code(),
        })
    }
}
