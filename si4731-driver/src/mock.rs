//! Scripted fake chip for driver tests
//!
//! Bus, pins and delay share one [`Trace`] so tests can assert the exact
//! interleaving of pin edges, waits and bus traffic.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorType, OutputPin};
use si4731_hal::{BusError, I2cBus};

/// Something observable the driver did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Write { address: u8, data: Vec<u8> },
    Read { address: u8, len: usize },
    Pin { name: &'static str, high: bool },
    DelayMs(u32),
}

/// Shared, ordered event log
#[derive(Debug, Clone, Default)]
pub struct Trace(Rc<RefCell<Vec<Event>>>);

impl Trace {
    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Payloads of every bus write, in order
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Write { data, .. } => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    /// Lengths of every bus read, in order
    pub fn reads(&self) -> Vec<usize> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Read { len, .. } => Some(*len),
                _ => None,
            })
            .collect()
    }

    /// Total milliseconds spent in delays
    pub fn delayed_ms(&self) -> u32 {
        self.0
            .borrow()
            .iter()
            .map(|e| match e {
                Event::DelayMs(ms) => *ms,
                _ => 0,
            })
            .sum()
    }
}

/// Fake Si4731 on the bus
///
/// Reads pop scripted replies; once the script runs dry every read returns
/// `idle_reply` (CTS set by default). Writes succeed unless a failure was
/// queued.
pub struct MockBus {
    trace: Trace,
    replies: VecDeque<Result<Vec<u8>, BusError>>,
    write_results: VecDeque<Result<(), BusError>>,
    pub idle_reply: u8,
}

impl MockBus {
    pub fn new(trace: Trace) -> Self {
        Self {
            trace,
            replies: VecDeque::new(),
            write_results: VecDeque::new(),
            idle_reply: 0x80,
        }
    }

    /// Queue reply bytes for the next read (may be shorter than requested)
    pub fn reply(&mut self, bytes: &[u8]) -> &mut Self {
        self.replies.push_back(Ok(bytes.to_vec()));
        self
    }

    /// Queue `count` single-byte "not ready" replies
    pub fn not_ready(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            self.reply(&[0x00]);
        }
        self
    }

    /// Queue a failing read
    pub fn read_error(&mut self, error: BusError) -> &mut Self {
        self.replies.push_back(Err(error));
        self
    }

    /// Queue the result of the next write
    pub fn write_result(&mut self, result: Result<(), BusError>) -> &mut Self {
        self.write_results.push_back(result);
        self
    }
}

impl I2cBus for MockBus {
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusError> {
        self.trace.push(Event::Write {
            address,
            data: data.to_vec(),
        });
        self.write_results.pop_front().unwrap_or(Ok(()))
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, BusError> {
        self.trace.push(Event::Read {
            address,
            len: buf.len(),
        });
        match self.replies.pop_front() {
            Some(Ok(bytes)) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                Ok(n)
            }
            Some(Err(e)) => Err(e),
            None => {
                buf.fill(self.idle_reply);
                Ok(buf.len())
            }
        }
    }
}

/// Output pin recording its edges
pub struct MockPin {
    name: &'static str,
    trace: Trace,
    pub fail: bool,
}

impl MockPin {
    pub fn new(name: &'static str, trace: Trace) -> Self {
        Self {
            name,
            trace,
            fail: false,
        }
    }

    fn drive(&mut self, high: bool) -> Result<(), digital::ErrorKind> {
        if self.fail {
            return Err(digital::ErrorKind::Other);
        }
        self.trace.push(Event::Pin {
            name: self.name,
            high,
        });
        Ok(())
    }
}

impl ErrorType for MockPin {
    type Error = digital::ErrorKind;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true)
    }
}

/// Delay that only records, never sleeps
pub struct MockDelay {
    trace: Trace,
}

impl MockDelay {
    pub fn new(trace: Trace) -> Self {
        Self { trace }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.trace.push(Event::DelayMs(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.trace.push(Event::DelayMs(ms));
    }
}

/// A fresh bus, RST pin, SEN pin and delay sharing one trace
pub fn rig() -> (MockBus, MockPin, MockPin, MockDelay, Trace) {
    let trace = Trace::default();
    (
        MockBus::new(trace.clone()),
        MockPin::new("rst", trace.clone()),
        MockPin::new("sen", trace.clone()),
        MockDelay::new(trace.clone()),
        trace,
    )
}
