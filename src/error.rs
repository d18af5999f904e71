//! Error types for the output layer
//!
//! - **`OutputError`** - failures of a print operation. Broken channels are
//!   swallowed by the `p*` operations; everything else reaches the caller.
//! - **`SettingsError`** - failures of `set` and of loading settings files.

use std::io;
use std::path::PathBuf;

/// Failure of a print operation.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// The destination was closed or its reader went away mid-write.
    #[error("output channel closed")]
    BrokenChannel(#[source] io::Error),

    /// A value could not be formatted.
    #[error("failed to render {what}")]
    Rendering {
        what: &'static str,
        #[source]
        source: std::fmt::Error,
    },

    /// The pager could not be started or fed.
    #[error("failed to run pager '{command}'")]
    Pager {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(io::Error),
}

impl OutputError {
    pub(crate) fn rendering(what: &'static str) -> impl FnOnce(std::fmt::Error) -> Self {
        move |source| Self::Rendering { what, source }
    }

    pub fn is_broken_channel(&self) -> bool {
        matches!(self, Self::BrokenChannel(_))
    }
}

impl From<io::Error> for OutputError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::BrokenPipe {
            Self::BrokenChannel(err)
        } else {
            Self::Io(err)
        }
    }
}

/// Failure to change or load [`OutputSettings`](crate::settings::OutputSettings).
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("unknown setting '{name}'")]
    UnknownSetting { name: String },

    #[error("invalid value '{value}' for setting '{name}': {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },

    #[error("failed to read settings from {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings")]
    Parse(#[from] toml::de::Error),
}
