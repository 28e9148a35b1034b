//! Host console capability.
//!
//! The ACIA talks to the outside world through [`ConsoleHost`]. The process
//! implementation, [`StdioHost`], writes output bytes straight to stdout and
//! takes input from one of two sources:
//!
//! * **Terminal:** when stdin is interactive, the terminal is switched to raw
//!   mode on first use and keys are polled with `crossterm` events. Ctrl-C
//!   arrives as a key and is reported through [`StdioHost::poll_interrupt`]
//!   instead of killing the process, so raw mode is always undone on drop.
//! * **Piped:** otherwise a background thread reads stdin byte by byte and
//!   the host drains its channel without blocking.

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, IsTerminal, Read, Write};
use std::sync::mpsc::{Receiver, TryRecvError, channel};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tracing::{debug, warn};

/// Interrupt polls between two terminal event checks.
const INTERRUPT_POLL_INTERVAL: u32 = 4096;

/// Keyboard and screen of the machine hosting the emulator.
pub trait ConsoleHost {
    /// Returns true if a keystroke is waiting to be read.
    fn key_pending(&mut self) -> bool;

    /// Consumes and returns one pending keystroke, or `None` if nothing is pending.
    fn read_key(&mut self) -> Option<u8>;

    /// Emits one byte immediately (unbuffered).
    fn write_byte(&mut self, byte: u8);
}

/// A terminal key event as the console sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleKey {
    /// A byte delivered to the ACIA data register.
    Byte(u8),
    /// Ctrl-C: the user asked to stop the run.
    Interrupt,
}

impl ConsoleKey {
    /// Translates a terminal key event.
    ///
    /// Only key presses count. Printable ASCII passes through, Ctrl-letter
    /// becomes the matching control code, and Enter sends carriage return.
    /// Keys with no ASCII meaning (arrows, function keys) yield `None`.
    pub fn from_event(key: &KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let byte = match key.code {
            KeyCode::Char(ch) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if ch.eq_ignore_ascii_case(&'c') {
                    return Some(Self::Interrupt);
                }
                if !ch.is_ascii_alphabetic() {
                    return None;
                }
                (ch.to_ascii_uppercase() as u8) & 0x1F
            }
            KeyCode::Char(ch) if ch.is_ascii() => ch as u8,
            KeyCode::Enter => b'\r',
            KeyCode::Tab => b'\t',
            KeyCode::Backspace => 0x08,
            KeyCode::Esc => 0x1B,
            KeyCode::Delete => 0x7F,
            _ => return None,
        };
        Some(Self::Byte(byte))
    }
}

/// Raw mode held for the lifetime of the value.
struct RawMode;

impl RawMode {
    fn enable() -> Option<Self> {
        match terminal::enable_raw_mode() {
            Ok(()) => Some(Self),
            Err(e) => {
                warn!(error = %e, "terminal raw mode unavailable, console input disabled");
                None
            }
        }
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Where keystrokes come from.
enum Input {
    /// Interactive terminal; raw mode is entered on first poll.
    Terminal(Option<RawMode>),
    /// Bytes forwarded by the stdin reader thread.
    Piped(Receiver<u8>),
    /// The input source is exhausted or unusable.
    Closed,
}

/// Console backed by the process's stdin and stdout.
pub struct StdioHost {
    input: Input,
    /// Keystrokes read ahead of the guest.
    pending: VecDeque<u8>,
    /// Set once Ctrl-C has been seen on the terminal.
    interrupted: bool,
    /// Countdown to the next terminal check in `poll_interrupt`.
    ticks: u32,
}

impl StdioHost {
    /// Creates a host on the process's standard streams.
    ///
    /// Spawns the stdin reader thread when stdin is not a terminal. Raw mode
    /// is deferred until the first keyboard poll so that messages printed
    /// before the run keep normal line handling.
    pub fn new() -> Self {
        let input = if io::stdin().is_terminal() {
            Input::Terminal(None)
        } else {
            let (tx, rx) = channel();
            let _ = thread::spawn(move || {
                let mut buffer = [0u8; 1];
                let mut handle = io::stdin().lock();
                while handle.read_exact(&mut buffer).is_ok() {
                    if tx.send(buffer[0]).is_err() {
                        break;
                    }
                }
            });
            Input::Piped(rx)
        };
        Self {
            input,
            pending: VecDeque::new(),
            interrupted: false,
            ticks: 0,
        }
    }

    /// Returns true once the user has pressed Ctrl-C.
    pub const fn interrupted(&self) -> bool {
        self.interrupted
    }

    /// Checks for Ctrl-C without consuming guest input.
    ///
    /// Meant to be called once per executed instruction; the terminal is only
    /// queried every few thousand calls. Keys that arrive meanwhile are queued
    /// for the guest.
    pub fn poll_interrupt(&mut self) -> bool {
        if !self.interrupted {
            self.ticks += 1;
            if self.ticks >= INTERRUPT_POLL_INTERVAL {
                self.ticks = 0;
                self.drain_terminal();
            }
        }
        self.interrupted
    }

    /// Moves every available input byte into the pending queue.
    fn fill(&mut self) {
        if matches!(self.input, Input::Terminal(_)) {
            self.drain_terminal();
            return;
        }
        let Input::Piped(rx) = &self.input else {
            return;
        };
        let closed = loop {
            match rx.try_recv() {
                Ok(byte) => self.pending.push_back(byte),
                Err(TryRecvError::Empty) => break false,
                Err(TryRecvError::Disconnected) => break true,
            }
        };
        if closed {
            debug!("stdin closed");
            self.input = Input::Closed;
        }
    }

    /// Reads every terminal event that is ready, entering raw mode first if needed.
    fn drain_terminal(&mut self) {
        let Input::Terminal(raw) = &mut self.input else {
            return;
        };
        if raw.is_none() {
            *raw = RawMode::enable();
            if raw.is_none() {
                self.input = Input::Closed;
                return;
            }
        }
        loop {
            match event::poll(Duration::from_millis(0)) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    warn!(error = %e, "terminal poll failed, console input disabled");
                    self.input = Input::Closed;
                    break;
                }
            }
            match event::read() {
                Ok(Event::Key(key)) => match ConsoleKey::from_event(&key) {
                    Some(ConsoleKey::Byte(byte)) => self.pending.push_back(byte),
                    Some(ConsoleKey::Interrupt) => {
                        debug!("interrupt key pressed");
                        self.interrupted = true;
                    }
                    None => {}
                },
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "terminal read failed, console input disabled");
                    self.input = Input::Closed;
                    break;
                }
            }
        }
    }
}

impl Default for StdioHost {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdioHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let input = match &self.input {
            Input::Terminal(raw) if raw.is_some() => "terminal (raw)",
            Input::Terminal(_) => "terminal",
            Input::Piped(_) => "piped",
            Input::Closed => "closed",
        };
        f.debug_struct("StdioHost")
            .field("input", &input)
            .field("pending", &self.pending.len())
            .field("interrupted", &self.interrupted)
            .finish()
    }
}

impl ConsoleHost for StdioHost {
    fn key_pending(&mut self) -> bool {
        if self.pending.is_empty() {
            self.fill();
        }
        !self.pending.is_empty()
    }

    fn read_key(&mut self) -> Option<u8> {
        if self.pending.is_empty() {
            self.fill();
        }
        self.pending.pop_front()
    }

    fn write_byte(&mut self, byte: u8) {
        let mut out = io::stdout().lock();
        let _ = out.write_all(&[byte]);
        let _ = out.flush();
    }
}
