//! Host-level output settings.
//!
//! `OutputSettings` holds the toggles a shell exposes to its users (`debug`,
//! `quiet`, `feedback_to_output`, ...). They can be changed at runtime through
//! [`OutputSettings::set`], the backend of the shell's `set` command, or read
//! from the `[output]` table of a TOML file:
//!
//! ```toml
//! [output]
//! debug = true
//! allow-style = "never"
//! pager = "less -R"
//! ```

use std::path::Path;

use crate::error::SettingsError;
use crate::styling::{AllowStyle, Theme};

#[cfg(windows)]
const DEFAULT_PAGER: &str = "more";
#[cfg(not(windows))]
const DEFAULT_PAGER: &str = "less -RXF";

#[cfg(windows)]
const DEFAULT_PAGER_CHOP: &str = "more";
#[cfg(not(windows))]
const DEFAULT_PAGER_CHOP: &str = "less -SRXF";

/// Output toggles of a shell.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct OutputSettings {
    /// Show full tracebacks from `pexcept`
    pub debug: bool,
    /// Silence `pfeedback`
    pub quiet: bool,
    /// Send feedback to stdout (and therefore into redirected output) instead of stderr
    pub feedback_to_output: bool,
    pub allow_style: AllowStyle,
    /// Pager command for wrapped output
    pub pager: String,
    /// Pager command for chopped (truncated) output
    pub pager_chop: String,
    /// Written to stderr when stdout turns out to be a broken pipe
    pub broken_pipe_warning: Option<String>,
    /// Append the "set debug true" hint to non-debug exception messages
    pub debug_tip: bool,
    /// Output is being redirected; paging is bypassed
    #[serde(skip)]
    pub redirecting: bool,
    #[serde(skip)]
    pub theme: Theme,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            debug: false,
            quiet: false,
            feedback_to_output: false,
            allow_style: AllowStyle::default(),
            pager: DEFAULT_PAGER.to_string(),
            pager_chop: DEFAULT_PAGER_CHOP.to_string(),
            broken_pipe_warning: None,
            debug_tip: true,
            redirecting: false,
            theme: Theme::default(),
        }
    }
}

#[derive(Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    #[serde(default)]
    output: OutputSettings,
}

impl OutputSettings {
    /// Parse settings from TOML text. Absent keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let file: SettingsFile = toml::from_str(text)?;
        Ok(file.output)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loading output settings from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Change one setting by name, as the shell's `set` command does.
    ///
    /// Names may be written with dashes or underscores.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), SettingsError> {
        let key = name.trim().replace('-', "_");
        match key.as_str() {
            "debug" => self.debug = parse_bool(name, value)?,
            "quiet" => self.quiet = parse_bool(name, value)?,
            "feedback_to_output" => self.feedback_to_output = parse_bool(name, value)?,
            "debug_tip" => self.debug_tip = parse_bool(name, value)?,
            "allow_style" => {
                self.allow_style = value.trim().parse().map_err(|_| SettingsError::InvalidValue {
                    name: name.to_string(),
                    value: value.to_string(),
                    reason: "expected always, never or terminal".to_string(),
                })?;
            }
            "pager" => self.pager = value.to_string(),
            "pager_chop" => self.pager_chop = value.to_string(),
            "broken_pipe_warning" => {
                self.broken_pipe_warning = (!value.is_empty()).then(|| value.to_string())
            }
            _ => {
                return Err(SettingsError::UnknownSetting {
                    name: name.to_string(),
                });
            }
        }
        log::debug!("Setting {key} changed to {value:?}");
        Ok(())
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(SettingsError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
