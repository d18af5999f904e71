//! Exception reports with frame and local-variable context
//!
//! Rust has no ambient "exception currently being handled", so the caller
//! builds an [`ExceptionReport`] where the error is caught and passes it to
//! `pexcept` explicitly:
//!
//! ```rust,ignore
//! let report = ExceptionReport::new(err)
//!     .with_frame(Frame::here("do_load").with_local("path", path.clone()));
//! shell.pexcept(ExceptMessage::from(&report), Some(&report), &PrintOptions::default())?;
//! ```
//!
//! Values are formatted only when the report is rendered; a `Display` or
//! `Debug` implementation that fails turns into [`OutputError::Rendering`].

use std::fmt::{self, Write as _};
use std::panic::Location;

use color_print::cformat;
use unicode_width::UnicodeWidthStr;

use crate::error::OutputError;

/// Last path segment of a type name, without generic arguments.
pub(crate) fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// One stack frame of a report.
pub struct Frame {
    function: String,
    file: String,
    line: u32,
    locals: Vec<(String, Box<dyn fmt::Debug>)>,
}

impl Frame {
    pub fn new(function: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            function: function.into(),
            file: file.into(),
            line,
            locals: Vec::new(),
        }
    }

    /// A frame located at the caller.
    #[track_caller]
    pub fn here(function: impl Into<String>) -> Self {
        let location = Location::caller();
        Self::new(function, location.file(), location.line())
    }

    pub fn with_local(mut self, name: impl Into<String>, value: impl fmt::Debug + 'static) -> Self {
        self.locals.push((name.into(), Box::new(value)));
        self
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("function", &self.function)
            .field("file", &self.file)
            .field("line", &self.line)
            .field("locals", &self.locals.len())
            .finish()
    }
}

/// An error together with the frames it passed through.
#[derive(Debug)]
pub struct ExceptionReport {
    error: anyhow::Error,
    type_name: Option<&'static str>,
    frames: Vec<Frame>,
}

impl ExceptionReport {
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            error: anyhow::Error::new(error),
            type_name: Some(short_type_name(std::any::type_name::<E>())),
            frames: Vec::new(),
        }
    }

    /// Report for an `anyhow::Error`; its concrete type is not known.
    pub fn from_anyhow(error: anyhow::Error) -> Self {
        Self {
            error,
            type_name: None,
            frames: Vec::new(),
        }
    }

    /// Append a frame. Frames are listed outermost first.
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frames.push(frame);
        self
    }

    pub fn error(&self) -> &anyhow::Error {
        &self.error
    }

    pub fn type_name(&self) -> Option<&'static str> {
        self.type_name
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Render the traceback, styled with ANSI escapes.
    pub fn render(&self, show_locals: bool) -> Result<String, OutputError> {
        let mut out = String::new();
        out.push_str(&cformat!("<bold>Traceback</> <dim>(most recent call last):</>\n"));

        for frame in &self.frames {
            let file = &frame.file;
            let line = frame.line;
            let function = &frame.function;
            out.push_str(&cformat!(
                "  File \"<cyan>{file}</>\", line <cyan>{line}</>, in <green>{function}</>\n"
            ));

            if show_locals && !frame.locals.is_empty() {
                let width = frame
                    .locals
                    .iter()
                    .map(|(name, _)| name.width())
                    .max()
                    .unwrap_or(0);
                for (name, value) in &frame.locals {
                    let mut rendered = String::new();
                    write!(rendered, "{value:?}").map_err(OutputError::rendering("local value"))?;
                    let padding = " ".repeat(width - name.width());
                    out.push_str(&cformat!("      <yellow>{name}</>{padding} = {rendered}\n"));
                }
            }
        }

        let mut chain = self.error.chain();
        if let Some(top) = chain.next() {
            let mut message = String::new();
            write!(message, "{top}").map_err(OutputError::rendering("exception message"))?;
            match self.type_name {
                Some(type_name) => {
                    out.push_str(&cformat!("<bold><red>{type_name}</></>: {message}\n"))
                }
                None => out.push_str(&cformat!("<bold><red>{message}</></>\n")),
            }
        }
        for cause in chain {
            let mut message = String::new();
            write!(message, "{cause}").map_err(OutputError::rendering("exception cause"))?;
            out.push_str(&cformat!("<dim>Caused by:</> {message}\n"));
        }

        Ok(out)
    }
}
