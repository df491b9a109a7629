// Author: Dustin Pilgrim
// License: MIT

use std::sync::Arc;

use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::core::clock::Clock;
use crate::core::counter_msg::CounterMsg;

/// Samples the clock once per frame and feeds it to the counter.
///
/// Dropping or stopping the driver aborts the pending tick, so no sample is
/// delivered after teardown.
pub struct ClockDriver {
    handle: Option<JoinHandle<()>>,
}

impl ClockDriver {
    pub fn spawn(tx: Sender<CounterMsg>, frame: Duration, clock: Arc<dyn Clock>) -> Self {
        let handle = tokio::spawn(run_ticker(tx, frame, clock));
        Self { handle: Some(handle) }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            crate::ddebug!("Ticker", "clock driver cancelled");
        }
    }
}

impl Drop for ClockDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_ticker(tx: Sender<CounterMsg>, frame: Duration, clock: Arc<dyn Clock>) {
    crate::ddebug!("Ticker", "ticker started ({} ms/frame)", frame.as_millis());

    let mut ticks = interval(frame);
    // A slow frame is dropped, not replayed in a burst.
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticks.tick().await;

        // If the counter is gone, stop.
        if tx.send(CounterMsg::Tick { now: clock.now() }).await.is_err() {
            crate::ddebug!("Ticker", "ticker stopping (receiver dropped)");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::{FixedClock, SystemClock};
    use chrono::{TimeZone, Utc};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn delivers_ticks_with_sampled_instant() {
        let t = Utc.with_ymd_and_hms(2025, 9, 1, 13, 37, 0).unwrap();
        let (tx, mut rx) = mpsc::channel(8);
        let _driver = ClockDriver::spawn(tx, Duration::from_millis(1), Arc::new(FixedClock(t)));

        for _ in 0..3 {
            match rx.recv().await {
                Some(CounterMsg::Tick { now }) => assert_eq!(now, t),
                other => panic!("unexpected message: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn stop_cancels_pending_tick() {
        let (tx, mut rx) = mpsc::channel(1);
        let mut driver = ClockDriver::spawn(tx, Duration::from_millis(1), Arc::new(SystemClock));

        assert!(rx.recv().await.is_some());
        driver.stop();
        assert!(!driver.is_running());

        // Aborting drops the task's sender; the channel drains then closes.
        while rx.recv().await.is_some() {}
    }

    #[tokio::test]
    async fn exits_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        let driver = ClockDriver::spawn(tx, Duration::from_millis(1), Arc::new(SystemClock));
        drop(rx);

        for _ in 0..200 {
            if !driver.is_running() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("ticker kept running without a receiver");
    }
}
