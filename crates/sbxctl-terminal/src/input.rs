//! Timed polling of local input.

use std::io;
use std::time::Duration;

/// Result of one poll of the input source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Bytes that were available, in arrival order.
    Data(Vec<u8>),
    /// Nothing arrived within the timeout.
    Idle,
    /// The input stream is closed.
    Eof,
}

/// A source of keystrokes that can be polled with a timeout.
pub trait InputSource: Send {
    /// Wait at most `timeout` for input and return what is available.
    fn poll_input(&mut self, timeout: Duration) -> io::Result<InputEvent>;
}

// =============================================================================
// STDIN
// =============================================================================

/// Size of the read buffer. Must be at least std's stdin buffer capacity so
/// reads bypass it and nothing is left buffered where `poll` cannot see it.
#[cfg(unix)]
const STDIN_READ_BUF: usize = 8 * 1024;

/// Process stdin, polled with `poll(2)`.
#[cfg(unix)]
pub struct StdinSource {
    buf: Box<[u8]>,
}

#[cfg(unix)]
impl StdinSource {
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; STDIN_READ_BUF].into_boxed_slice(),
        }
    }
}

#[cfg(unix)]
impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
impl InputSource for StdinSource {
    fn poll_input(&mut self, timeout: Duration) -> io::Result<InputEvent> {
        use io::Read;
        use nix::poll::{poll, PollFd, PollFlags};

        let stdin = io::stdin();
        let timeout_ms = timeout.as_millis().min(i32::MAX as u128) as i32;

        let ready = {
            let mut fds = [PollFd::new(&stdin, PollFlags::POLLIN)];
            match poll(&mut fds, timeout_ms) {
                Ok(n) => n > 0,
                Err(nix::errno::Errno::EINTR) => false,
                Err(e) => return Err(io::Error::from(e)),
            }
        };
        if !ready {
            return Ok(InputEvent::Idle);
        }

        match stdin.lock().read(&mut self.buf) {
            Ok(0) => Ok(InputEvent::Eof),
            Ok(n) => Ok(InputEvent::Data(self.buf[..n].to_vec())),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(InputEvent::Idle),
            Err(e) => Err(e),
        }
    }
}
