//! Styling for shell output.
//!
//! This module uses the anstyle ecosystem:
//! - anstyle for composable styles, one per output channel
//! - anstream for stripping escapes when styling is not allowed
//! - style functions (`&dyn Fn(&str) -> String`) for callers that bring their own

use anstyle::{AnsiColor, Color, Style};

// ============================================================================
// Semantic Style Constants
// ============================================================================

/// Regular command output (plain)
pub const OUTPUT: Style = Style::new();

/// Error style (bright red) - use as `{ERROR}text{ERROR:#}`
pub const ERROR: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightRed)));

/// Success style (green)
pub const SUCCESS: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));

/// Warning style (bright yellow)
pub const WARNING: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightYellow)));

/// Failure style (bold bright red)
pub const FAILURE: Style = Style::new()
    .bold()
    .fg_color(Some(Color::Ansi(AnsiColor::BrightRed)));

/// A caller-supplied style function.
pub type StyleFn = dyn Fn(&str) -> String;

/// Wrap `text` in the escape codes of `style`. A plain style leaves it untouched.
pub fn paint(style: Style, text: &str) -> String {
    format!("{style}{text}{style:#}")
}

/// Remove every ANSI escape sequence from `text`.
pub fn strip_ansi(text: &str) -> String {
    anstream::adapter::strip_str(text).to_string()
}

/// One style per output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub output: Style,
    pub error: Style,
    pub success: Style,
    pub warning: Style,
    pub failure: Style,
    /// The "set debug true" hint after a non-debug exception
    pub feedback_tip: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            output: OUTPUT,
            error: ERROR,
            success: SUCCESS,
            warning: WARNING,
            failure: FAILURE,
            feedback_tip: WARNING,
        }
    }
}

/// When escape codes survive to the destination.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AllowStyle {
    /// Keep escapes everywhere
    Always,
    /// Strip escapes everywhere
    Never,
    /// Keep escapes only when writing to a terminal
    #[default]
    Terminal,
}

impl AllowStyle {
    pub fn should_strip(self, is_terminal: bool) -> bool {
        match self {
            AllowStyle::Always => false,
            AllowStyle::Never => true,
            AllowStyle::Terminal => !is_terminal,
        }
    }

    /// Apply this policy to text bound for a destination.
    pub fn render(self, text: &str, is_terminal: bool) -> String {
        if self.should_strip(is_terminal) {
            strip_ansi(text)
        } else {
            text.to_string()
        }
    }
}
