//! The default shell host

use std::io::{self, IsTerminal};

use crate::settings::OutputSettings;
use crate::stream::OutputStream;

use super::traits::PrintCapability;

/// A shell host with the default print behaviour.
///
/// Owns its settings and its two streams. `stdout` can be swapped at runtime,
/// e.g. while a command's output is redirected to a file.
#[derive(Debug, Clone)]
pub struct Shell {
    settings: OutputSettings,
    stdout: OutputStream,
    stderr: OutputStream,
    /// Overrides the detected terminal state of stdin
    stdin_terminal: Option<bool>,
}

impl Shell {
    /// A shell writing to the process streams.
    pub fn new(settings: OutputSettings) -> Self {
        Self::builder().settings(settings).build()
    }

    pub fn builder() -> ShellBuilder {
        ShellBuilder::default()
    }

    pub fn settings_mut(&mut self) -> &mut OutputSettings {
        &mut self.settings
    }

    /// Replace stdout, returning the previous stream.
    pub fn set_stdout(&mut self, stdout: OutputStream) -> OutputStream {
        std::mem::replace(&mut self.stdout, stdout)
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(OutputSettings::default())
    }
}

impl PrintCapability for Shell {
    fn settings(&self) -> &OutputSettings {
        &self.settings
    }

    fn stdout(&self) -> &OutputStream {
        &self.stdout
    }

    fn stderr(&self) -> &OutputStream {
        &self.stderr
    }

    fn stdin_is_terminal(&self) -> bool {
        self.stdin_terminal.unwrap_or_else(|| io::stdin().is_terminal())
    }
}

/// Builder for [`Shell`]. Streams default to the process streams.
#[derive(Debug, Default)]
pub struct ShellBuilder {
    settings: OutputSettings,
    stdout: Option<OutputStream>,
    stderr: Option<OutputStream>,
    stdin_terminal: Option<bool>,
}

impl ShellBuilder {
    pub fn settings(mut self, settings: OutputSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn stdout(mut self, stdout: OutputStream) -> Self {
        self.stdout = Some(stdout);
        self
    }

    pub fn stderr(mut self, stderr: OutputStream) -> Self {
        self.stderr = Some(stderr);
        self
    }

    /// Treat stdin as a terminal (or not) instead of checking the process stdin.
    pub fn stdin_terminal(mut self, is_terminal: bool) -> Self {
        self.stdin_terminal = Some(is_terminal);
        self
    }

    pub fn build(self) -> Shell {
        Shell {
            settings: self.settings,
            stdout: self.stdout.unwrap_or_else(OutputStream::stdout),
            stderr: self.stderr.unwrap_or_else(OutputStream::stderr),
            stdin_terminal: self.stdin_terminal,
        }
    }
}
