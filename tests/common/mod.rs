#![allow(dead_code)]

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use buzzer_tone::io::SinkTap;

/// Poll `condition` until it holds or five seconds pass
pub fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    condition()
}

/// Consumes every tap a loopback opener hands out, standing in for a device
pub struct Drain {
    open_sinks: Arc<AtomicUsize>,
    samples: Arc<AtomicUsize>,
    done: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Drain {
    pub fn spawn(taps: Receiver<SinkTap>) -> Self {
        let open_sinks = Arc::new(AtomicUsize::new(0));
        let samples = Arc::new(AtomicUsize::new(0));
        let done = Arc::new(AtomicBool::new(false));

        let handle = thread::spawn({
            let open_sinks = open_sinks.clone();
            let samples = samples.clone();
            let done = done.clone();
            move || {
                let mut readers = Vec::new();
                while !done.load(Ordering::Acquire) {
                    match taps.recv_timeout(Duration::from_millis(5)) {
                        Ok(tap) => {
                            open_sinks.fetch_add(1, Ordering::AcqRel);
                            let reader =
                                read_until_closed(tap, open_sinks.clone(), samples.clone());
                            readers.push(reader);
                        }
                        Err(RecvTimeoutError::Timeout) => {}
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                for reader in readers {
                    let _ = reader.join();
                }
            }
        });

        Self {
            open_sinks,
            samples,
            done,
            handle: Some(handle),
        }
    }

    /// Sinks opened and not yet closed by their worker
    pub fn open_sinks(&self) -> usize {
        self.open_sinks.load(Ordering::Acquire)
    }

    pub fn samples(&self) -> usize {
        self.samples.load(Ordering::Acquire)
    }
}

impl Drop for Drain {
    fn drop(&mut self) {
        self.done.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn read_until_closed(
    mut tap: SinkTap,
    open_sinks: Arc<AtomicUsize>,
    samples: Arc<AtomicUsize>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut buffer = Vec::with_capacity(8_000);
        loop {
            buffer.clear();
            let read = tap.read_available(&mut buffer);
            samples.fetch_add(read, Ordering::AcqRel);
            if read == 0 && tap.is_closed() {
                break;
            }
            thread::sleep(Duration::from_millis(1));
        }
        open_sinks.fetch_sub(1, Ordering::AcqRel);
    })
}
