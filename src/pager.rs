//! Pager detection and execution.
//!
//! Long output can be handed to the configured pager (`less -RXF` by default)
//! instead of being written directly. The pager inherits the terminal, so it
//! is only used when the destination really is one.

use std::io::{self, Write};
use std::process::{Command, Stdio};

use crate::error::OutputError;
use crate::settings::OutputSettings;
use crate::stream::OutputStream;

/// A pager command line, run through the platform shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    command: String,
}

impl Pager {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// The pager configured in `settings`; `chop` selects the truncating variant.
    pub fn from_settings(settings: &OutputSettings, chop: bool) -> Self {
        if chop {
            Self::new(settings.pager_chop.clone())
        } else {
            Self::new(settings.pager.clone())
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Feed `text` to the pager and wait for it to exit.
    ///
    /// The user quitting the pager before reading everything closes its stdin;
    /// that is not an error.
    pub fn page(&self, text: &str) -> Result<(), OutputError> {
        log::debug!("Piping through pager: {}", self.command);

        let mut child = shell_command(&self.command)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|source| OutputError::Pager {
                command: self.command.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(text.as_bytes()) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    log::debug!("Pager closed its input early");
                }
                Err(source) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(OutputError::Pager {
                        command: self.command.clone(),
                        source,
                    });
                }
            }
            // stdin dropped here so the pager sees EOF
        }

        let status = child.wait().map_err(|source| OutputError::Pager {
            command: self.command.clone(),
            source,
        })?;
        if !status.success() {
            log::debug!("Pager exited with status: {}", status);
        }
        Ok(())
    }
}

/// Whether output bound for `dest` may go through a pager.
///
/// Both stdin (`stdin_is_terminal`) and the destination must be terminals, and
/// the shell must not be redirecting output.
pub fn can_page(
    dest: &OutputStream,
    settings: &OutputSettings,
    stdin_is_terminal: bool,
) -> bool {
    !settings.redirecting && stdin_is_terminal && dest.is_terminal()
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::Capture;

    #[test]
    fn test_from_settings_selects_command() {
        let settings = OutputSettings {
            pager: "less -R".into(),
            pager_chop: "less -SR".into(),
            ..Default::default()
        };
        assert_eq!(Pager::from_settings(&settings, false).command(), "less -R");
        assert_eq!(Pager::from_settings(&settings, true).command(), "less -SR");
    }

    #[test]
    fn test_can_page_requires_terminal_destination() {
        let settings = OutputSettings::default();
        assert!(!can_page(&Capture::new().stream(), &settings, true));
        assert!(can_page(&Capture::terminal().stream(), &settings, true));
    }

    #[test]
    fn test_can_page_requires_terminal_stdin() {
        let settings = OutputSettings::default();
        assert!(!can_page(&Capture::terminal().stream(), &settings, false));
    }

    #[test]
    fn test_can_page_not_while_redirecting() {
        let settings = OutputSettings {
            redirecting: true,
            ..Default::default()
        };
        assert!(!can_page(&Capture::terminal().stream(), &settings, true));
    }

    #[test]
    #[cfg(unix)]
    fn test_page_feeds_stdin() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("paged.txt");
        let pager = Pager::new(format!("cat > '{}'", out.display()));
        pager.page("line 1\nline 2\n").unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "line 1\nline 2\n");
    }

    #[test]
    #[cfg(unix)]
    fn test_page_tolerates_early_exit() {
        // `true` never reads stdin
        let text = "x".repeat(1 << 20);
        Pager::new("true").page(&text).unwrap();
    }

    #[test]
    #[cfg(unix)]
    fn test_page_failing_command_is_not_an_error() {
        Pager::new("false").page("ignored").unwrap();
    }
}
