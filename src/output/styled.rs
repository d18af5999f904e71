//! Styled-terminal override of a shell's print operations
//!
//! [`StyledOutput`] wraps a host and owns two rendering sessions: one bound
//! to the host's stdout as it was when the wrapper was built, one bound to the
//! error stream. It changes a single operation, `pexcept`, which in debug
//! mode renders the exception as a traceback with local values. Every other
//! operation is forwarded to the host unchanged.

use std::fmt;

use crate::console::Console;
use crate::error::OutputError;
use crate::settings::OutputSettings;
use crate::stream::OutputStream;
use crate::styling::StyleFn;
use crate::traceback::ExceptionReport;

use super::traits::{ExceptMessage, PrintCapability, PrintOptions};

#[derive(Debug)]
pub struct StyledOutput<H> {
    host: H,
    out: Console,
    err: Console,
}

impl<H: PrintCapability> StyledOutput<H> {
    /// Wrap an initialized host. The error session writes to the process
    /// error stream.
    pub fn new(host: H) -> Self {
        Self::with_error_stream(host, OutputStream::stderr())
    }

    /// Wrap a host, binding the error session to `stderr`.
    pub fn with_error_stream(host: H, stderr: OutputStream) -> Self {
        let allow_style = host.settings().allow_style;
        let out = Console::new(host.stdout().clone()).with_allow_style(allow_style);
        let err = Console::new(stderr).with_allow_style(allow_style);
        Self { host, out, err }
    }

    /// Session bound to the host's stdout.
    pub fn console(&mut self) -> &Console {
        self.sync_allow_style();
        &self.out
    }

    /// Session bound to the error stream.
    pub fn error_console(&mut self) -> &Console {
        self.sync_allow_style();
        &self.err
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_inner(self) -> H {
        self.host
    }

    /// Both sessions follow the host's current `allow_style`, which `set` may
    /// have changed since construction.
    fn sync_allow_style(&mut self) {
        let allow_style = self.host.settings().allow_style;
        self.out.set_allow_style(allow_style);
        self.err.set_allow_style(allow_style);
    }
}

impl<H: PrintCapability> PrintCapability for StyledOutput<H> {
    fn settings(&self) -> &OutputSettings {
        self.host.settings()
    }

    fn stdout(&self) -> &OutputStream {
        self.host.stdout()
    }

    fn stderr(&self) -> &OutputStream {
        self.host.stderr()
    }

    fn debug(&self) -> bool {
        self.host.debug()
    }

    fn stdin_is_terminal(&self) -> bool {
        self.host.stdin_is_terminal()
    }

    fn print_to(
        &mut self,
        dest: &OutputStream,
        msg: &dyn fmt::Display,
        style: Option<&StyleFn>,
        options: &PrintOptions,
    ) -> Result<(), OutputError> {
        self.host.print_to(dest, msg, style, options)
    }

    fn poutput(
        &mut self,
        msg: &dyn fmt::Display,
        options: &PrintOptions,
    ) -> Result<(), OutputError> {
        self.host.poutput(msg, options)
    }

    fn perror(
        &mut self,
        msg: &dyn fmt::Display,
        options: &PrintOptions,
    ) -> Result<(), OutputError> {
        self.host.perror(msg, options)
    }

    fn psuccess(
        &mut self,
        msg: &dyn fmt::Display,
        options: &PrintOptions,
    ) -> Result<(), OutputError> {
        self.host.psuccess(msg, options)
    }

    fn pwarning(
        &mut self,
        msg: &dyn fmt::Display,
        options: &PrintOptions,
    ) -> Result<(), OutputError> {
        self.host.pwarning(msg, options)
    }

    fn pfailure(
        &mut self,
        msg: &dyn fmt::Display,
        options: &PrintOptions,
    ) -> Result<(), OutputError> {
        self.host.pfailure(msg, options)
    }

    /// In debug mode with an exception at hand, print its traceback with
    /// locals on the error session instead of the message. Otherwise defer
    /// to the host.
    ///
    /// Formatting failures of the traceback are returned, not hidden.
    fn pexcept(
        &mut self,
        msg: ExceptMessage<'_>,
        exception: Option<&ExceptionReport>,
        options: &PrintOptions,
    ) -> Result<(), OutputError> {
        if self.debug()
            && let Some(report) = exception
        {
            self.sync_allow_style();
            return match self.err.print_exception(report, true) {
                Err(OutputError::BrokenChannel(e)) => {
                    log::debug!("Error stream closed, dropping traceback: {e}");
                    Ok(())
                }
                other => other,
            };
        }
        self.host.pexcept(msg, exception, options)
    }

    fn pfeedback(
        &mut self,
        msg: &dyn fmt::Display,
        options: &PrintOptions,
    ) -> Result<(), OutputError> {
        self.host.pfeedback(msg, options)
    }
}
