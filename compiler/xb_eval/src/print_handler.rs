//! Output sink for `WRITE`.
//!
//! The runtime never talks to a console directly; formatted text goes to a
//! print handler chosen by the host:
//! - `Stdout`: the process's standard output (default for `Interpret`)
//! - `Buffer`: captured in memory, for tests and embedding hosts
//! - `Silent`: discarded
//!
//! Enum dispatch, no trait objects.

use std::sync::Arc;

use parking_lot::Mutex;

pub enum PrintHandlerImpl {
    Stdout,
    Buffer(Mutex<String>),
    Silent,
}

impl PrintHandlerImpl {
    /// Emit `msg` followed by a newline.
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout => println!("{msg}"),
            Self::Buffer(buf) => {
                let mut buf = buf.lock();
                buf.push_str(msg);
                buf.push('\n');
            }
            Self::Silent => {}
        }
    }

    /// Emit `msg` without a newline.
    pub fn print(&self, msg: &str) {
        match self {
            Self::Stdout => print!("{msg}"),
            Self::Buffer(buf) => buf.lock().push_str(msg),
            Self::Silent => {}
        }
    }

    /// Everything captured so far. Empty for handlers that do not capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(buf) => buf.lock().clone(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    /// Take the captured output, leaving the buffer empty.
    pub fn take_output(&self) -> String {
        match self {
            Self::Buffer(buf) => std::mem::take(&mut *buf.lock()),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(buf) = self {
            buf.lock().clear();
        }
    }
}

impl std::fmt::Debug for PrintHandlerImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Stdout => "Stdout",
            Self::Buffer(_) => "Buffer",
            Self::Silent => "Silent",
        })
    }
}

/// Print handler shared between a runtime and its host.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(Mutex::new(String::new())))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}
