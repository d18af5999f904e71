pub mod console;
pub mod error;
pub mod output;
pub mod pager;
pub mod settings;
pub mod stream;
pub mod styling;
pub mod traceback;

// Re-export the types most hosts need
pub use console::Console;
pub use error::{OutputError, SettingsError};
pub use output::{ExceptMessage, PrintCapability, PrintOptions, Shell, StyledOutput};
pub use settings::OutputSettings;
pub use stream::{Capture, OutputStream};
pub use traceback::{ExceptionReport, Frame};
