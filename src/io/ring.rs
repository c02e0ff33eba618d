//! Lock-free ring sink and an in-process loopback opener.
//!
//! `RingSink` is the producer half of an `rtrb` ring. Whoever holds the
//! matching `SinkTap` (a device callback, a test, a recorder) consumes
//! samples at its own pace, and `write` blocks whenever the ring is full.
//! That blocking is the only pacing a synthesis worker gets.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::{self, Receiver, Sender},
    Arc, Mutex,
};
use std::thread;
use std::time::{Duration, Instant};

use rtrb::{Consumer, Producer, PushError, RingBuffer};
use tracing::{debug, trace};

use super::sink::{AudioSink, SinkError, SinkFormat, SinkOpener};

/// Busy retries before a blocked write starts sleeping
const SPIN_LIMIT: u32 = 64;
/// Sleep between retries once spinning gave up (~16 samples at 80 kHz)
const BACKOFF: Duration = Duration::from_micros(200);
/// Extra time `drain` allows on top of the ring's own play-out time
const DRAIN_GRACE: Duration = Duration::from_millis(50);

pub struct RingSink {
    /// None once closed
    producer: Option<Producer<i8>>,
    capacity: usize,
    sample_rate: u32,
    /// Set by the consumer side when it can no longer make progress
    fault: Arc<AtomicBool>,
    stopped: bool,
}

impl RingSink {
    /// Create a sink and the tap that consumes from it
    pub fn new(format: &SinkFormat) -> (Self, SinkTap) {
        let capacity = format.buffer_len.max(1);
        let (producer, consumer) = RingBuffer::<i8>::new(capacity);
        let fault = Arc::new(AtomicBool::new(false));

        let sink = Self {
            producer: Some(producer),
            capacity,
            sample_rate: format.sample_rate.max(1),
            fault: fault.clone(),
            stopped: false,
        };
        let tap = SinkTap { consumer, fault };
        (sink, tap)
    }

    /// Samples written but not yet consumed
    pub fn queued(&self) -> usize {
        self.producer
            .as_ref()
            .map_or(0, |p| self.capacity - p.slots())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn is_disconnected(&self) -> bool {
        self.fault.load(Ordering::Acquire)
            || self.producer.as_ref().map_or(true, |p| p.is_abandoned())
    }

    /// Worst-case time for a full ring to play out
    fn play_out_time(&self) -> Duration {
        Duration::from_secs_f64(self.capacity as f64 / self.sample_rate as f64)
    }
}

impl AudioSink for RingSink {
    fn write(&mut self, sample: i8) -> Result<(), SinkError> {
        if self.stopped {
            return Err(SinkError::Stopped);
        }

        let mut pending = sample;
        let mut attempts = 0u32;
        loop {
            let producer = self.producer.as_mut().ok_or(SinkError::Stopped)?;
            match producer.push(pending) {
                Ok(()) => return Ok(()),
                Err(PushError::Full(rejected)) => pending = rejected,
            }

            if self.is_disconnected() {
                return Err(SinkError::Disconnected);
            }

            attempts = attempts.saturating_add(1);
            if attempts < SPIN_LIMIT {
                std::hint::spin_loop();
            } else {
                thread::sleep(BACKOFF);
            }
        }
    }

    fn stop(&mut self) {
        self.stopped = true;
    }

    fn resume(&mut self) {
        self.stopped = false;
    }

    fn drain(&mut self) {
        let deadline = Instant::now() + self.play_out_time() + DRAIN_GRACE;
        while self.queued() > 0 && !self.is_disconnected() {
            if Instant::now() >= deadline {
                debug!(queued = self.queued(), "gave up draining audio sink");
                return;
            }
            thread::sleep(BACKOFF);
        }
    }

    fn close(&mut self) {
        if self.producer.take().is_some() {
            trace!("ring sink closed");
        }
    }
}

/// Consumer half of a `RingSink`
pub struct SinkTap {
    consumer: Consumer<i8>,
    fault: Arc<AtomicBool>,
}

impl SinkTap {
    pub fn pop(&mut self) -> Option<i8> {
        self.consumer.pop().ok()
    }

    /// Move every currently queued sample into `out`, returning how many
    pub fn read_available(&mut self, out: &mut Vec<i8>) -> usize {
        let mut count = 0;
        while let Ok(sample) = self.consumer.pop() {
            out.push(sample);
            count += 1;
        }
        count
    }

    /// True once the producing sink has been closed (or dropped)
    pub fn is_closed(&self) -> bool {
        self.consumer.is_abandoned()
    }

    /// Tell the producer that nothing will consume its samples any more.
    ///
    /// Blocked and future writes fail with `SinkError::Disconnected`.
    pub fn fault(&self) {
        self.fault.store(true, Ordering::Release);
    }

    /// Shared flag behind `fault`, for callbacks that cannot own the tap
    pub(crate) fn fault_flag(&self) -> Arc<AtomicBool> {
        self.fault.clone()
    }
}

/// Opens `RingSink`s and hands their taps to a channel.
///
/// Used for headless runs and tests: the receiver decides how fast samples
/// are consumed, and therefore how fast workers run.
pub struct LoopbackOpener {
    taps: Mutex<Sender<SinkTap>>,
}

impl LoopbackOpener {
    pub fn new() -> (Self, Receiver<SinkTap>) {
        let (tx, rx) = mpsc::channel();
        (Self { taps: Mutex::new(tx) }, rx)
    }
}

impl SinkOpener for LoopbackOpener {
    fn open(&self, format: &SinkFormat) -> Result<Box<dyn AudioSink>, SinkError> {
        let (sink, tap) = RingSink::new(format);
        let taps = self.taps.lock().unwrap_or_else(|e| e.into_inner());
        taps.send(tap).map_err(|_| SinkError::Disconnected)?;
        Ok(Box::new(sink))
    }
}
