//! Print operations of a command shell.
//!
//! # Architecture
//!
//! [`PrintCapability`] is the contract every shell host satisfies: the output
//! channels (`poutput`, `perror`, `psuccess`, `pwarning`, `pfailure`,
//! `pexcept`, `pfeedback`) plus the general `print_to`. A host supplies its
//! settings and streams; the trait's default methods are its behaviour.
//!
//! [`StyledOutput`] composes over a host. It owns two rendering sessions
//! ([`Console`](crate::console::Console)) and overrides only `pexcept`;
//! everything else is forwarded explicitly to the wrapped host.
//!
//! ## Usage Pattern
//!
//! ```rust,ignore
//! use richcmd::output::{ExceptMessage, PrintCapability, PrintOptions, Shell, StyledOutput};
//!
//! let mut shell = StyledOutput::new(Shell::new(settings));
//!
//! shell.poutput(&"Listing 3 items", &PrintOptions::new())?;
//! shell.psuccess(&"Done", &PrintOptions::new())?;
//!
//! if let Err(err) = run_command() {
//!     let report = ExceptionReport::new(err).with_frame(Frame::here("run_command"));
//!     shell.pexcept(ExceptMessage::from(&report), Some(&report), &PrintOptions::new())?;
//! }
//! ```
//!
//! ## Streams
//!
//! - **stdout**: `poutput`, `psuccess`, and `pfeedback` when `feedback_to_output` is set
//! - **stderr**: `perror`, `pwarning`, `pfailure`, `pexcept`, and `pfeedback` otherwise

mod shell;
mod styled;
mod traits;

pub use shell::{Shell, ShellBuilder};
pub use styled::StyledOutput;
pub use traits::{DEBUG_TIP, ExceptMessage, PrintCapability, PrintOptions};
