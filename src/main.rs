use std::path::PathBuf;
use std::process;

use anstream::eprintln;
use anyhow::Context;
use clap::{Parser, ValueEnum};
use richcmd::output::{ExceptMessage, PrintCapability, PrintOptions, Shell, StyledOutput};
use richcmd::settings::OutputSettings;
use richcmd::styling::{AllowStyle, ERROR};
use richcmd::traceback::{ExceptionReport, Frame};

#[derive(Parser)]
#[command(name = "richcmd")]
#[command(about = "Print a message through a styled shell output channel", long_about = None)]
#[command(version)]
struct Cli {
    /// Output channel to print on
    #[arg(value_enum)]
    channel: Channel,

    /// Message to print (words are joined with spaces)
    #[arg(required = true)]
    message: Vec<String>,

    /// Settings file with an [output] table
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Show full tracebacks for `except`
    #[arg(long)]
    debug: bool,

    /// Silence the feedback channel
    #[arg(long)]
    quiet: bool,

    /// Send feedback to stdout instead of stderr
    #[arg(long)]
    feedback_to_output: bool,

    /// When to keep color codes (always, never, terminal)
    #[arg(long, value_name = "MODE")]
    allow_style: Option<AllowStyle>,

    /// Do not apply the channel's default style
    #[arg(long)]
    no_style: bool,

    /// Show the message through the pager
    #[arg(long)]
    paged: bool,

    /// With --paged, truncate long lines instead of wrapping them
    #[arg(long, requires = "paged")]
    chop: bool,

    /// Log decisions to stderr (same as RUST_LOG=debug)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Channel {
    Output,
    Error,
    Success,
    Warning,
    Failure,
    Feedback,
    /// Raise a sample error and report it
    Except,
}

/// Error raised by the `except` channel.
#[derive(Debug, thiserror::Error)]
#[error("command '{command}' failed")]
struct CommandFailed {
    command: String,
    #[source]
    source: std::io::Error,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "off" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{ERROR}error:{ERROR:#} {e:#}");
        process::exit(1);
    }
}

fn load_settings(cli: &Cli) -> anyhow::Result<OutputSettings> {
    let mut settings = match &cli.config {
        Some(path) => OutputSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => OutputSettings::default(),
    };
    settings.debug |= cli.debug;
    settings.quiet |= cli.quiet;
    settings.feedback_to_output |= cli.feedback_to_output;
    if let Some(allow_style) = cli.allow_style {
        settings.allow_style = allow_style;
    }
    Ok(settings)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = load_settings(&cli)?;
    log::debug!("Printing on {:?} with {:?}", cli.channel, settings);

    let mut shell = StyledOutput::new(Shell::new(settings));
    let message = cli.message.join(" ");

    let mut options = PrintOptions::new();
    if cli.no_style {
        options = options.no_style();
    }
    if cli.paged {
        options = options.paged(cli.chop);
    }

    match cli.channel {
        Channel::Output => shell.poutput(&message, &options)?,
        Channel::Error => shell.perror(&message, &options)?,
        Channel::Success => shell.psuccess(&message, &options)?,
        Channel::Warning => shell.pwarning(&message, &options)?,
        Channel::Failure => shell.pfailure(&message, &options)?,
        Channel::Feedback => shell.pfeedback(&message, &options)?,
        Channel::Except => {
            let report = sample_failure(&message);
            shell.pexcept(ExceptMessage::from(&report), Some(&report), &options)?;
        }
    }
    Ok(())
}

fn sample_failure(message: &str) -> ExceptionReport {
    let error = CommandFailed {
        command: "except".to_string(),
        source: std::io::Error::other(message.to_string()),
    };
    ExceptionReport::new(error).with_frame(
        Frame::here("run")
            .with_local("channel", "except")
            .with_local("message", message.to_string()),
    )
}
