//! Background thread that polls the sweep and arms pings on its own cadence,
//! for hosts that would rather not call `trigger` from their render loop.

use crate::engine::TriggerHandle;
use crate::trigger::{Point, Sweep};
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Where the polling thread reads the current sweep and object positions from.
pub trait SweepSource: Send {
    fn sweep(&self) -> Sweep;
    /// Replace the contents of `out` with the current object positions.
    fn positions(&self, out: &mut Vec<Point>);
}

#[derive(Debug, Clone)]
struct SweepSnapshot {
    sweep: Sweep,
    positions: Vec<Point>,
}

/// Latest sweep state, published by the render loop and read by a `TriggerLoop`.
#[derive(Debug, Clone)]
pub struct SharedSweep {
    inner: Arc<Mutex<SweepSnapshot>>,
}

impl SharedSweep {
    pub fn new(sweep: Sweep) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SweepSnapshot {
                sweep,
                positions: Vec::new(),
            })),
        }
    }

    pub fn publish(&self, sweep: Sweep, positions: &[Point]) {
        let mut snapshot = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        snapshot.sweep = sweep;
        snapshot.positions.clear();
        snapshot.positions.extend_from_slice(positions);
    }
}

impl SweepSource for SharedSweep {
    fn sweep(&self) -> Sweep {
        self.inner.lock().unwrap_or_else(|p| p.into_inner()).sweep
    }

    fn positions(&self, out: &mut Vec<Point>) {
        let snapshot = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        out.clear();
        out.extend_from_slice(&snapshot.positions);
    }
}

pub struct TriggerLoop {
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl TriggerLoop {
    pub fn spawn<S>(handle: TriggerHandle, source: S, interval: Duration) -> std::io::Result<Self>
    where
        S: SweepSource + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let thread = std::thread::Builder::new()
            .name("radar-trigger".to_string())
            .spawn(move || {
                info!("Trigger loop started");
                let mut positions = Vec::new();
                while flag.load(Ordering::Acquire) {
                    source.positions(&mut positions);
                    handle.trigger(&source.sweep(), &positions);
                    std::thread::sleep(interval);
                }
                info!("Trigger loop stopped");
            })?;

        Ok(Self {
            running,
            thread: Some(thread),
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Clear the running flag and wait for the thread to exit.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Trigger loop thread panicked");
            }
        }
    }
}

impl Drop for TriggerLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
