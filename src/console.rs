//! Rendering sessions
//!
//! A [`Console`] is bound to exactly one destination when it is created and
//! stays bound to it. It applies the [`AllowStyle`] policy before every write.

use anstyle::Style;

use crate::error::OutputError;
use crate::styling::{AllowStyle, paint};
use crate::stream::OutputStream;
use crate::traceback::ExceptionReport;

#[derive(Debug, Clone)]
pub struct Console {
    stream: OutputStream,
    allow_style: AllowStyle,
}

impl Console {
    pub fn new(stream: OutputStream) -> Self {
        Self {
            stream,
            allow_style: AllowStyle::default(),
        }
    }

    /// Session bound to the process error stream.
    pub fn stderr() -> Self {
        Self::new(OutputStream::stderr())
    }

    pub fn with_allow_style(mut self, allow_style: AllowStyle) -> Self {
        self.allow_style = allow_style;
        self
    }

    pub fn set_allow_style(&mut self, allow_style: AllowStyle) {
        self.allow_style = allow_style;
    }

    pub fn allow_style(&self) -> AllowStyle {
        self.allow_style
    }

    pub fn stream(&self) -> &OutputStream {
        &self.stream
    }

    /// Write `text` followed by `end`.
    pub fn print(&self, text: &str, end: &str) -> Result<(), OutputError> {
        let mut out = self
            .allow_style
            .render(text, self.stream.is_terminal());
        out.push_str(end);
        self.stream.write_str(&out)?;
        Ok(())
    }

    pub fn print_styled(&self, text: &str, style: Style, end: &str) -> Result<(), OutputError> {
        self.print(&paint(style, text), end)
    }

    /// Render `report` as a traceback, optionally with each frame's locals.
    pub fn print_exception(
        &self,
        report: &ExceptionReport,
        show_locals: bool,
    ) -> Result<(), OutputError> {
        let traceback = report.render(show_locals)?;
        self.print(&traceback, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::Capture;
    use crate::styling::SUCCESS;
    use crate::traceback::Frame;

    #[test]
    fn test_print_appends_end() {
        let capture = Capture::new();
        let console = Console::new(capture.stream());
        console.print("hello", "").unwrap();
        console.print("world", "\n").unwrap();
        assert_eq!(capture.contents(), "helloworld\n");
    }

    #[test]
    fn test_print_styled_respects_policy() {
        let capture = Capture::new();
        let console = Console::new(capture.stream()).with_allow_style(AllowStyle::Always);
        console.print_styled("ok", SUCCESS, "\n").unwrap();
        assert_eq!(capture.take(), format!("{}\n", paint(SUCCESS, "ok")));

        // Default policy strips when the destination is not a terminal
        let console = Console::new(capture.stream());
        console.print_styled("ok", SUCCESS, "\n").unwrap();
        assert_eq!(capture.take(), "ok\n");

        let terminal = Capture::terminal();
        let console = Console::new(terminal.stream());
        console.print_styled("ok", SUCCESS, "\n").unwrap();
        assert_eq!(terminal.take(), format!("{}\n", paint(SUCCESS, "ok")));
    }

    #[test]
    fn test_print_exception() {
        let capture = Capture::new();
        let console = Console::new(capture.stream()).with_allow_style(AllowStyle::Never);
        let report = ExceptionReport::from_anyhow(anyhow::anyhow!("boom"))
            .with_frame(Frame::new("main", "src/main.rs", 3).with_local("n", 1));
        console.print_exception(&report, true).unwrap();
        assert_eq!(
            capture.contents(),
            "Traceback (most recent call last):\n  File \"src/main.rs\", line 3, in main\n      n = 1\nboom\n"
        );
    }

    #[test]
    fn test_closed_stream_is_broken_channel() {
        let capture = Capture::new();
        capture.close();
        let err = Console::new(capture.stream()).print("x", "\n").unwrap_err();
        assert!(err.is_broken_channel());
    }
}
