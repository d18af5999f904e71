//! The print capability shared by every shell host
//!
//! `PrintCapability` declares the output operations of a shell. A host only
//! supplies its settings and streams; the default method bodies are the
//! host's default behaviour. Wrappers such as
//! [`StyledOutput`](super::StyledOutput) implement the trait again and forward
//! to the host for everything they do not change.

use std::fmt::{self, Write as _};
use std::io::{self, IsTerminal};

use crate::error::OutputError;
use crate::pager::{self, Pager};
use crate::settings::OutputSettings;
use crate::stream::OutputStream;
use crate::styling::{AllowStyle, StyleFn, paint, strip_ansi};
use crate::traceback::{ExceptionReport, short_type_name};

/// Hint appended to non-debug exception messages.
pub const DEBUG_TIP: &str =
    "\nTo enable full traceback, run the following command: 'set debug true'";

/// Per-call formatting options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    /// Appended after the (styled) message
    pub end: String,
    /// Apply the channel's default style
    pub apply_style: bool,
    /// Route through the pager when possible
    pub paged: bool,
    /// With `paged`, truncate long lines instead of wrapping them
    pub chop: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            end: "\n".to_string(),
            apply_style: true,
            paged: false,
            chop: false,
        }
    }
}

impl PrintOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn end(mut self, end: impl Into<String>) -> Self {
        self.end = end.into();
        self
    }

    pub fn no_style(mut self) -> Self {
        self.apply_style = false;
        self
    }

    pub fn paged(mut self, chop: bool) -> Self {
        self.paged = true;
        self.chop = chop;
        self
    }
}

/// What `pexcept` reports: a plain message or an error value.
#[derive(Clone, Copy)]
pub enum ExceptMessage<'a> {
    Message(&'a dyn fmt::Display),
    Error {
        type_name: &'a str,
        error: &'a dyn fmt::Display,
    },
}

impl<'a> ExceptMessage<'a> {
    pub fn error<E: std::error::Error>(error: &'a E) -> Self {
        Self::Error {
            type_name: short_type_name(std::any::type_name::<E>()),
            error,
        }
    }

    fn render(&self) -> Result<String, OutputError> {
        let mut text = String::new();
        match self {
            Self::Message(message) => write!(text, "{message}"),
            Self::Error { type_name, error } => write!(
                text,
                "EXCEPTION of type '{type_name}' occurred with message: {error}"
            ),
        }
        .map_err(OutputError::rendering("exception message"))?;
        Ok(text)
    }
}

impl<'a> From<&'a ExceptionReport> for ExceptMessage<'a> {
    fn from(report: &'a ExceptionReport) -> Self {
        match report.type_name() {
            Some(type_name) => Self::Error {
                type_name,
                error: report.error(),
            },
            None => Self::Message(report.error()),
        }
    }
}

impl fmt::Debug for ExceptMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(_) => f.write_str("ExceptMessage::Message"),
            Self::Error { type_name, .. } => write!(f, "ExceptMessage::Error({type_name})"),
        }
    }
}

/// Output operations of a shell.
///
/// Every operation writes synchronously and completes before returning. A
/// destination whose reader has gone away is not an error for the `p*`
/// operations: the message is dropped. Formatting failures are returned.
pub trait PrintCapability {
    fn settings(&self) -> &OutputSettings;

    /// Current standard output of the shell
    fn stdout(&self) -> &OutputStream;

    fn stderr(&self) -> &OutputStream;

    fn debug(&self) -> bool {
        self.settings().debug
    }

    /// Whether the user can interact with a pager.
    fn stdin_is_terminal(&self) -> bool {
        io::stdin().is_terminal()
    }

    /// Write `msg`, formatted by `style`, to `dest`.
    ///
    /// Unlike the `p*` operations this reports a closed destination as
    /// [`OutputError::BrokenChannel`].
    fn print_to(
        &mut self,
        dest: &OutputStream,
        msg: &dyn fmt::Display,
        style: Option<&StyleFn>,
        options: &PrintOptions,
    ) -> Result<(), OutputError> {
        let mut text = render_message(msg, style)?;
        text.push_str(&options.end);
        let interactive = self.stdin_is_terminal();
        let settings = self.settings();

        if options.paged && pager::can_page(dest, settings, interactive) {
            if settings.allow_style == AllowStyle::Never {
                text = strip_ansi(&text);
            }
            return Pager::from_settings(settings, options.chop).page(&text);
        }

        dest.write_str(&settings.allow_style.render(&text, dest.is_terminal()))?;
        Ok(())
    }

    /// Print to stdout in the output style.
    fn poutput(
        &mut self,
        msg: &dyn fmt::Display,
        options: &PrintOptions,
    ) -> Result<(), OutputError> {
        let theme = self.settings().theme;
        let style = move |text: &str| paint(theme.output, text);
        let style = options.apply_style.then_some(&style as &StyleFn);
        let dest = self.stdout().clone();
        let result = self.print_to(&dest, msg, style, options);
        recover_stdout(self, result)
    }

    /// Print to stderr in the error style.
    fn perror(
        &mut self,
        msg: &dyn fmt::Display,
        options: &PrintOptions,
    ) -> Result<(), OutputError> {
        let theme = self.settings().theme;
        let style = move |text: &str| paint(theme.error, text);
        let style = options.apply_style.then_some(&style as &StyleFn);
        let dest = self.stderr().clone();
        let result = self.print_to(&dest, msg, style, options);
        recover(result)
    }

    /// Print to stdout in the success style. The style is always applied.
    fn psuccess(
        &mut self,
        msg: &dyn fmt::Display,
        options: &PrintOptions,
    ) -> Result<(), OutputError> {
        let theme = self.settings().theme;
        let style = move |text: &str| paint(theme.success, text);
        let style = Some(&style as &StyleFn);
        let dest = self.stdout().clone();
        let result = self.print_to(&dest, msg, style, options);
        recover_stdout(self, result)
    }

    /// Print to stderr in the warning style.
    ///
    /// Kept for compatibility; `print_to` with a style function covers it.
    fn pwarning(
        &mut self,
        msg: &dyn fmt::Display,
        options: &PrintOptions,
    ) -> Result<(), OutputError> {
        let theme = self.settings().theme;
        let style = move |text: &str| paint(theme.warning, text);
        let style = options.apply_style.then_some(&style as &StyleFn);
        let dest = self.stderr().clone();
        let result = self.print_to(&dest, msg, style, options);
        recover(result)
    }

    /// Print to stderr in the failure style. The style is always applied.
    fn pfailure(
        &mut self,
        msg: &dyn fmt::Display,
        options: &PrintOptions,
    ) -> Result<(), OutputError> {
        let theme = self.settings().theme;
        let style = move |text: &str| paint(theme.failure, text);
        let style = Some(&style as &StyleFn);
        let dest = self.stderr().clone();
        let result = self.print_to(&dest, msg, style, options);
        recover(result)
    }

    /// Report an exception on stderr.
    ///
    /// `exception` is the error being handled, if any. Its traceback is
    /// printed only in debug mode; the message is always printed, followed in
    /// non-debug mode by a hint on how to see the traceback. `paged` and
    /// `chop` are ignored.
    fn pexcept(
        &mut self,
        msg: ExceptMessage<'_>,
        exception: Option<&ExceptionReport>,
        options: &PrintOptions,
    ) -> Result<(), OutputError> {
        let debug = self.debug();
        let theme = self.settings().theme;

        if debug && let Some(report) = exception {
            let traceback = report.render(false)?;
            let dest = self.stderr().clone();
            let text = self.settings().allow_style.render(&traceback, dest.is_terminal());
            recover(dest.write_str(&text).map_err(OutputError::from))?;
        }

        let mut text = msg.render()?;
        if options.apply_style {
            text = paint(theme.error, &text);
        }
        if !debug && self.settings().debug_tip {
            text.push_str(&paint(theme.feedback_tip, DEBUG_TIP));
        }

        let options = PrintOptions {
            end: options.end.clone(),
            ..PrintOptions::default()
        }
        .no_style();
        self.perror(&text, &options)
    }

    /// Print nonessential feedback.
    ///
    /// Silenced by `quiet`. Goes to stdout when `feedback_to_output` is set
    /// (so it ends up in redirected output), to stderr otherwise.
    fn pfeedback(
        &mut self,
        msg: &dyn fmt::Display,
        options: &PrintOptions,
    ) -> Result<(), OutputError> {
        let settings = self.settings();
        let theme = settings.theme;
        if settings.quiet {
            return Ok(());
        }
        if settings.feedback_to_output {
            return self.poutput(msg, options);
        }

        let style = move |text: &str| paint(theme.output, text);
        let style = options.apply_style.then_some(&style as &StyleFn);
        let dest = self.stderr().clone();
        let result = self.print_to(&dest, msg, style, options);
        recover(result)
    }
}

fn render_message(
    msg: &dyn fmt::Display,
    style: Option<&StyleFn>,
) -> Result<String, OutputError> {
    let mut text = String::new();
    write!(text, "{msg}").map_err(OutputError::rendering("message"))?;
    Ok(match style {
        Some(style) => style(&text),
        None => text,
    })
}

/// Drop a message whose destination has gone away.
fn recover(result: Result<(), OutputError>) -> Result<(), OutputError> {
    match result {
        Err(OutputError::BrokenChannel(e)) => {
            log::debug!("Output channel closed, dropping message: {e}");
            Ok(())
        }
        other => other,
    }
}

/// Like [`recover`], and report a broken stdout with the configured warning.
fn recover_stdout<H: PrintCapability + ?Sized>(
    host: &H,
    result: Result<(), OutputError>,
) -> Result<(), OutputError> {
    if let Err(OutputError::BrokenChannel(_)) = &result
        && let Some(warning) = &host.settings().broken_pipe_warning
    {
        if let Err(e) = host.stderr().write_str(warning) {
            log::debug!("Failed to write broken pipe warning: {e}");
        }
    }
    recover(result)
}
