//! Repeating timers.
//!
//! A [`Ticker`] fires at a fixed interval until stopped. Starting twice never
//! creates a second timer, stopping twice is harmless, and rescheduling
//! replaces the running timer in one step so ticks never overlap.
//!
//! [`TokioTicker`] runs on a tokio `interval` and delivers ticks through a
//! channel. Every arm of the timer gets a new generation number; the
//! [`TickReceiver`] drops ticks from older generations, so nothing queued
//! before a `stop` or `reschedule` is ever delivered after it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

pub trait Ticker {
    /// Begin ticking every `interval`. No-op while already running.
    fn start(&mut self, interval: Duration);

    /// Cancel the timer. No-op while stopped.
    fn stop(&mut self);

    /// Re-arm at a new cadence. Only takes effect while running.
    fn reschedule(&mut self, interval: Duration);

    fn is_running(&self) -> bool;
}

/// One timer firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    generation: u64,
}

/// Ticker backed by a spawned tokio task
#[derive(Debug)]
pub struct TokioTicker {
    tx: mpsc::UnboundedSender<Tick>,
    generation: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
    interval: Duration,
}

/// Receiving end of a [`TokioTicker`]
#[derive(Debug)]
pub struct TickReceiver {
    rx: mpsc::UnboundedReceiver<Tick>,
    generation: Arc<AtomicU64>,
}

/// Create a ticker and the receiver its ticks arrive on.
///
/// `start` and `reschedule` spawn onto the current tokio runtime, so they
/// must be called from inside one.
pub fn tokio_ticker() -> (TokioTicker, TickReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    let generation = Arc::new(AtomicU64::new(0));
    let ticker = TokioTicker {
        tx,
        generation: Arc::clone(&generation),
        task: None,
        interval: Duration::ZERO,
    };
    (ticker, TickReceiver { rx, generation })
}

impl TokioTicker {
    pub fn interval(&self) -> Duration {
        self.interval
    }

    fn arm(&mut self, interval: Duration) {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let period = interval.max(Duration::from_millis(1));
        let tx = self.tx.clone();

        self.interval = interval;
        self.task = Some(tokio::spawn(async move {
            let mut timer = time::interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                timer.tick().await;
                if tx.send(Tick { generation }).is_err() {
                    break;
                }
            }
        }));
    }

    fn disarm(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        // Invalidate anything already queued.
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

impl Ticker for TokioTicker {
    fn start(&mut self, interval: Duration) {
        if self.task.is_some() {
            return;
        }
        self.arm(interval);
    }

    fn stop(&mut self) {
        if self.task.is_none() {
            return;
        }
        self.disarm();
    }

    fn reschedule(&mut self, interval: Duration) {
        if self.task.is_none() {
            self.interval = interval;
            return;
        }
        self.disarm();
        self.arm(interval);
    }

    fn is_running(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl TickReceiver {
    /// Wait for the next live tick.
    ///
    /// Pending forever while the ticker is stopped; `None` once the ticker
    /// has been dropped.
    pub async fn recv(&mut self) -> Option<Tick> {
        loop {
            let tick = self.rx.recv().await?;
            if tick.generation == self.generation.load(Ordering::Acquire) {
                return Some(tick);
            }
        }
    }

    /// Non-blocking variant of [`recv`](Self::recv)
    pub fn try_recv(&mut self) -> Option<Tick> {
        while let Ok(tick) = self.rx.try_recv() {
            if tick.generation == self.generation.load(Ordering::Acquire) {
                return Some(tick);
            }
        }
        None
    }
}

/// Ticker that never fires on its own.
///
/// For headless runs and tests: the caller decides when a tick happens and
/// this only records what the session asked of it.
#[derive(Debug, Clone, Default)]
pub struct ManualTicker {
    running: bool,
    interval: Duration,
    starts: u32,
    stops: u32,
    reschedules: u32,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Times a timer was actually armed by `start`
    pub fn starts(&self) -> u32 {
        self.starts
    }

    /// Times a running timer was actually cancelled by `stop`
    pub fn stops(&self) -> u32 {
        self.stops
    }

    pub fn reschedules(&self) -> u32 {
        self.reschedules
    }
}

impl Ticker for ManualTicker {
    fn start(&mut self, interval: Duration) {
        if self.running {
            return;
        }
        self.running = true;
        self.interval = interval;
        self.starts += 1;
    }

    fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.stops += 1;
    }

    fn reschedule(&mut self, interval: Duration) {
        self.interval = interval;
        if self.running {
            self.reschedules += 1;
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_ticker_start_is_idempotent() {
        let mut ticker = ManualTicker::new();
        ticker.start(Duration::from_millis(100));
        ticker.start(Duration::from_millis(200));
        assert!(ticker.is_running());
        assert_eq!(ticker.starts(), 1);
        assert_eq!(ticker.interval(), Duration::from_millis(100));
    }

    #[test]
    fn manual_ticker_stop_is_redundant_safe() {
        let mut ticker = ManualTicker::new();
        ticker.stop();
        assert_eq!(ticker.stops(), 0);
        ticker.start(Duration::from_millis(100));
        ticker.stop();
        ticker.stop();
        assert!(!ticker.is_running());
        assert_eq!(ticker.stops(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_ticker_fires_at_interval() {
        let (mut ticker, mut rx) = tokio_ticker();
        ticker.start(Duration::from_millis(100));

        let started = Instant::now();
        rx.recv().await.unwrap();
        assert_eq!(started.elapsed(), Duration::from_millis(100));
        rx.recv().await.unwrap();
        assert_eq!(started.elapsed(), Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_ticker_double_start_keeps_one_timer() {
        let (mut ticker, mut rx) = tokio_ticker();
        ticker.start(Duration::from_millis(100));
        ticker.start(Duration::from_millis(100));

        time::sleep(Duration::from_millis(350)).await;
        let mut count = 0;
        while rx.try_recv().is_some() {
            count += 1;
        }
        assert_eq!(count, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_ticker_stop_discards_queued_ticks() {
        let (mut ticker, mut rx) = tokio_ticker();
        ticker.start(Duration::from_millis(50));
        time::sleep(Duration::from_millis(175)).await;

        ticker.stop();
        ticker.stop();
        assert!(!ticker.is_running());
        assert!(rx.try_recv().is_none());

        let waited = time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(waited.is_err(), "no tick may arrive after stop");
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_ticker_reschedule_changes_cadence() {
        let (mut ticker, mut rx) = tokio_ticker();
        ticker.start(Duration::from_millis(1000));
        time::sleep(Duration::from_millis(500)).await;

        ticker.reschedule(Duration::from_millis(300));
        assert_eq!(ticker.interval(), Duration::from_millis(300));

        let rescheduled = Instant::now();
        rx.recv().await.unwrap();
        assert_eq!(rescheduled.elapsed(), Duration::from_millis(300));
    }
}
