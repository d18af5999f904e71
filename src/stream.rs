//! Output destinations
//!
//! An [`OutputStream`] is a clonable handle to one sink. The shell owns a
//! handle for stdout and one for stderr; rendering sessions hold clones of
//! the same handles, so writes from either land in the same place and in
//! call order.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::rc::Rc;

/// A writable destination that knows whether it is an interactive terminal.
pub trait Sink: Write {
    fn is_terminal(&self) -> bool {
        false
    }
}

impl Sink for io::Stdout {
    fn is_terminal(&self) -> bool {
        IsTerminal::is_terminal(self)
    }
}

impl Sink for io::Stderr {
    fn is_terminal(&self) -> bool {
        IsTerminal::is_terminal(self)
    }
}

/// Adapter for arbitrary writers (files, pipes, buffers). Never a terminal.
struct WriterSink<W>(W);

impl<W: Write> Write for WriterSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<W: Write> Sink for WriterSink<W> {}

/// Shared handle to an output destination.
#[derive(Clone)]
pub struct OutputStream {
    inner: Rc<RefCell<dyn Sink>>,
    label: &'static str,
}

impl OutputStream {
    pub fn new(sink: impl Sink + 'static) -> Self {
        Self::labeled(sink, "custom")
    }

    fn labeled(sink: impl Sink + 'static, label: &'static str) -> Self {
        let inner: Rc<RefCell<dyn Sink>> = Rc::new(RefCell::new(sink));
        Self { inner, label }
    }

    /// Handle to the process standard output.
    pub fn stdout() -> Self {
        Self::labeled(io::stdout(), "stdout")
    }

    /// Handle to the process standard error.
    pub fn stderr() -> Self {
        Self::labeled(io::stderr(), "stderr")
    }

    /// Wrap any writer. The result never reports itself as a terminal.
    pub fn from_writer(writer: impl Write + 'static) -> Self {
        Self::new(WriterSink(writer))
    }

    pub fn is_terminal(&self) -> bool {
        self.inner.borrow().is_terminal()
    }

    /// Write `text` completely and flush.
    pub fn write_str(&self, text: &str) -> io::Result<()> {
        let mut sink = self.inner.borrow_mut();
        sink.write_all(text.as_bytes())?;
        sink.flush()
    }

    /// Whether both handles write to the same sink.
    pub fn same_destination(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }
}

impl fmt::Debug for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputStream")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct CaptureState {
    buf: Vec<u8>,
    closed: bool,
    terminal: bool,
}

/// In-memory sink. Clones share the same buffer.
///
/// After [`close`](Capture::close) every write fails with
/// [`io::ErrorKind::BrokenPipe`], the same way a pipe behaves once its reader
/// has exited.
#[derive(Clone, Default)]
pub struct Capture {
    state: Rc<RefCell<CaptureState>>,
}

impl Capture {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capture that claims to be an interactive terminal.
    pub fn terminal() -> Self {
        let capture = Self::default();
        capture.state.borrow_mut().terminal = true;
        capture
    }

    /// A stream handle writing into this capture.
    pub fn stream(&self) -> OutputStream {
        OutputStream::labeled(self.clone(), "capture")
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.state.borrow().buf).into_owned()
    }

    /// Return the contents and clear the buffer.
    pub fn take(&self) -> String {
        let buf = std::mem::take(&mut self.state.borrow_mut().buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    pub fn close(&self) {
        self.state.borrow_mut().closed = true;
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.borrow_mut();
        if state.closed {
            return Err(io::Error::from(io::ErrorKind::BrokenPipe));
        }
        state.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.state.borrow().closed {
            return Err(io::Error::from(io::ErrorKind::BrokenPipe));
        }
        Ok(())
    }
}

impl Sink for Capture {
    fn is_terminal(&self) -> bool {
        self.state.borrow().terminal
    }
}
