//! Behaviour of the print operations through the styled override.
//!
//! Every host here writes into in-memory captures: one for the host's stdout,
//! one for the host's stderr, and one for the override's error session.

use std::fmt;

use insta::assert_snapshot;
use richcmd::output::{ExceptMessage, PrintCapability, PrintOptions, Shell, StyledOutput};
use richcmd::settings::OutputSettings;
use richcmd::stream::Capture;
use richcmd::styling::{AllowStyle, SUCCESS, Theme, paint, strip_ansi};
use richcmd::traceback::{ExceptionReport, Frame};
use rstest::rstest;

struct TestShell {
    shell: StyledOutput<Shell>,
    out: Capture,
    err: Capture,
    session_err: Capture,
}

fn test_shell(settings: OutputSettings) -> TestShell {
    let out = Capture::new();
    let err = Capture::new();
    let session_err = Capture::new();
    let host = Shell::builder()
        .settings(settings)
        .stdout(out.stream())
        .stderr(err.stream())
        .build();
    TestShell {
        shell: StyledOutput::with_error_stream(host, session_err.stream()),
        out,
        err,
        session_err,
    }
}

fn styled_settings() -> OutputSettings {
    OutputSettings {
        allow_style: AllowStyle::Always,
        theme: Theme {
            output: SUCCESS,
            ..Theme::default()
        },
        ..Default::default()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("cannot parse '{input}'")]
struct ParseFailure {
    input: String,
}

struct Unprintable;

impl fmt::Debug for Unprintable {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        Err(fmt::Error)
    }
}

#[rstest]
#[case("hello", "\n")]
#[case("hello", "")]
#[case("", "\n")]
#[case("multi\nline", "\r\n")]
#[case("日本語 ✅", " <end>")]
fn poutput_writes_styled_message_then_end(#[case] msg: &str, #[case] end: &str) {
    let mut t = test_shell(styled_settings());
    t.shell.poutput(&msg, &PrintOptions::new().end(end)).unwrap();
    assert_eq!(t.out.take(), format!("{}{end}", paint(SUCCESS, msg)));

    t.shell
        .poutput(&msg, &PrintOptions::new().end(end).no_style())
        .unwrap();
    assert_eq!(t.out.take(), format!("{msg}{end}"));

    assert_eq!(t.err.contents(), "");
    assert_eq!(t.session_err.contents(), "");
}

#[rstest]
#[case::perror("perror")]
#[case::pwarning("pwarning")]
#[case::pfailure("pfailure")]
#[case::pexcept("pexcept")]
fn error_channels_never_write_stdout(#[case] operation: &str) {
    let mut t = test_shell(styled_settings());
    let opts = PrintOptions::new();
    match operation {
        "perror" => t.shell.perror(&"msg", &opts),
        "pwarning" => t.shell.pwarning(&"msg", &opts),
        "pfailure" => t.shell.pfailure(&"msg", &opts),
        "pexcept" => t.shell.pexcept(ExceptMessage::Message(&"msg"), None, &opts),
        _ => unreachable!(),
    }
    .unwrap();
    assert_eq!(t.out.contents(), "");
    assert!(strip_ansi(&t.err.contents()).starts_with("msg"));
}

#[test]
fn pexcept_without_debug_never_inspects_exception() {
    let mut t = test_shell(OutputSettings {
        allow_style: AllowStyle::Never,
        ..Default::default()
    });
    // Formatting this frame would fail; it must not be touched
    let report = ExceptionReport::new(ParseFailure {
        input: "12x".into(),
    })
    .with_frame(Frame::new("parse", "src/parse.rs", 3).with_local("state", Unprintable));

    t.shell
        .pexcept(ExceptMessage::from(&report), Some(&report), &PrintOptions::new())
        .unwrap();

    assert_snapshot!(t.err.contents(), @r"
    EXCEPTION of type 'ParseFailure' occurred with message: cannot parse '12x'
    To enable full traceback, run the following command: 'set debug true'
    ");
    assert_eq!(t.session_err.contents(), "");
}

#[test]
fn pexcept_with_debug_and_exception_shows_locals() {
    let mut t = test_shell(OutputSettings {
        debug: true,
        allow_style: AllowStyle::Never,
        ..Default::default()
    });
    let report = ExceptionReport::new(ParseFailure {
        input: "12x".into(),
    })
    .with_frame(Frame::new("execute", "src/shell.rs", 88).with_local("line", "add 12x"))
    .with_frame(
        Frame::new("parse", "src/parse.rs", 3)
            .with_local("input", "12x")
            .with_local("position", 2usize),
    );

    t.shell
        .pexcept(ExceptMessage::from(&report), Some(&report), &PrintOptions::new())
        .unwrap();

    assert_snapshot!(t.session_err.contents(), @r#"
    Traceback (most recent call last):
      File "src/shell.rs", line 88, in execute
          line = "add 12x"
      File "src/parse.rs", line 3, in parse
          input    = "12x"
          position = 2
    ParseFailure: cannot parse '12x'
    "#);
    assert_eq!(t.err.contents(), "");
    assert_eq!(t.out.contents(), "");
}

#[test]
fn pexcept_with_debug_but_no_exception_prints_message() {
    let mut t = test_shell(OutputSettings {
        debug: true,
        allow_style: AllowStyle::Never,
        ..Default::default()
    });
    t.shell
        .pexcept(ExceptMessage::Message(&"nothing raised"), None, &PrintOptions::new())
        .unwrap();
    assert_eq!(t.err.contents(), "nothing raised\n");
    assert_eq!(t.session_err.contents(), "");
}

#[test]
fn independent_hosts_own_their_sessions() {
    let mut a = test_shell(OutputSettings::default());
    let mut b = test_shell(OutputSettings::default());
    a.shell.poutput(&"from a", &PrintOptions::new()).unwrap();
    b.shell.poutput(&"from b", &PrintOptions::new()).unwrap();
    a.shell.console().print("session a", "\n").unwrap();
    assert_eq!(a.out.contents(), "from a\nsession a\n");
    assert_eq!(b.out.contents(), "from b\n");
}

#[test]
fn consecutive_writes_keep_call_order() {
    let mut t = test_shell(styled_settings());
    t.shell.poutput(&"hello", &PrintOptions::new().end("")).unwrap();
    t.shell.poutput(&"world", &PrintOptions::new().end("\n")).unwrap();
    assert_eq!(
        t.out.contents(),
        format!("{}{}\n", paint(SUCCESS, "hello"), paint(SUCCESS, "world"))
    );
}

#[test]
fn closed_stdout_is_silent() {
    let mut t = test_shell(OutputSettings::default());
    t.out.close();
    t.shell.poutput(&"x", &PrintOptions::new()).unwrap();
    assert_eq!(t.out.contents(), "");
    assert_eq!(t.err.contents(), "");
    assert_eq!(t.session_err.contents(), "");
}

#[test]
fn quiet_silences_feedback_everywhere() {
    let mut t = test_shell(OutputSettings {
        quiet: true,
        ..Default::default()
    });
    t.shell.pfeedback(&"note", &PrintOptions::new()).unwrap();
    t.shell.host_mut().settings_mut().feedback_to_output = true;
    t.shell.pfeedback(&"note", &PrintOptions::new()).unwrap();
    assert_eq!(t.out.contents(), "");
    assert_eq!(t.err.contents(), "");
    assert_eq!(t.session_err.contents(), "");
}

#[test]
fn set_command_changes_behaviour() {
    let mut t = test_shell(OutputSettings {
        allow_style: AllowStyle::Never,
        ..Default::default()
    });
    let report = ExceptionReport::from_anyhow(anyhow::anyhow!("late failure"));

    t.shell
        .host_mut()
        .settings_mut()
        .set("debug", "true")
        .unwrap();
    t.shell
        .pexcept(ExceptMessage::from(&report), Some(&report), &PrintOptions::new())
        .unwrap();
    assert_eq!(
        t.session_err.contents(),
        "Traceback (most recent call last):\nlate failure\n"
    );
}
