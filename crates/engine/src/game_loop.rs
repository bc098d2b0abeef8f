//! Game loop service - the loop handle the session drives.
//!
//! Wraps a [`Ticker`] together with the interval it should run at. The session
//! changes the interval as the game speeds up; the service only re-arms the
//! ticker when the value actually changed and the loop is running.

use std::time::Duration;

use crate::ticker::Ticker;

#[derive(Debug)]
pub struct GameLoopService<T> {
    ticker: T,
    interval: Duration,
    running: bool,
}

impl<T: Ticker> GameLoopService<T> {
    pub fn new(ticker: T, interval: Duration) -> Self {
        Self {
            ticker,
            interval,
            running: false,
        }
    }

    /// Start ticking at the current interval. No-op while running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.ticker.start(self.interval);
        self.running = true;
    }

    /// Stop ticking. No-op while stopped.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.ticker.stop();
        self.running = false;
    }

    /// Change the tick interval; returns true if it changed.
    pub fn set_interval(&mut self, interval: Duration) -> bool {
        if interval == self.interval {
            return false;
        }
        self.interval = interval;
        if self.running {
            self.ticker.reschedule(interval);
        }
        true
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticker::ManualTicker;

    fn service() -> GameLoopService<ManualTicker> {
        GameLoopService::new(ManualTicker::new(), Duration::from_millis(1000))
    }

    #[test]
    fn start_arms_ticker_once() {
        let mut game_loop = service();
        game_loop.start();
        game_loop.start();
        assert!(game_loop.is_running());
        assert_eq!(game_loop.ticker().starts(), 1);
        assert_eq!(game_loop.ticker().interval(), Duration::from_millis(1000));
    }

    #[test]
    fn stop_when_stopped_is_noop() {
        let mut game_loop = service();
        game_loop.stop();
        game_loop.start();
        game_loop.stop();
        game_loop.stop();
        assert!(!game_loop.is_running());
        assert_eq!(game_loop.ticker().stops(), 1);
    }

    #[test]
    fn set_interval_reschedules_only_when_running_and_changed() {
        let mut game_loop = service();
        assert!(game_loop.set_interval(Duration::from_millis(900)));
        assert_eq!(game_loop.ticker().reschedules(), 0);

        game_loop.start();
        assert_eq!(game_loop.ticker().interval(), Duration::from_millis(900));
        assert!(!game_loop.set_interval(Duration::from_millis(900)));
        assert!(game_loop.set_interval(Duration::from_millis(850)));
        assert_eq!(game_loop.ticker().reschedules(), 1);
        assert_eq!(game_loop.ticker().interval(), Duration::from_millis(850));
    }
}
