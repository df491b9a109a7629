// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::{mpsc, watch};
use tokio::time::Duration;

use crate::core::counter_msg::CounterMsg;
use crate::render::Presenter;
use crate::services::ticker::ClockDriver;

use super::{AnyError, Counter, Flow};

impl<P: Presenter> Counter<P> {
    /// Drive the counter until shutdown, channel close, or an IPC stop.
    ///
    /// `tx` feeds the clock driver; IPC senders are cloned from it by the caller.
    pub async fn run(
        &mut self,
        tx: mpsc::Sender<CounterMsg>,
        mut rx: mpsc::Receiver<CounterMsg>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<(), AnyError> {
        crate::dinfo!("Counter", "counter starting ({} ms/frame)", self.frame_ms);

        let mut driver = ClockDriver::spawn(
            tx,
            Duration::from_millis(self.frame_ms),
            self.clock.clone(),
        );

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        crate::dinfo!("Counter", "counter stopping (shutdown requested)");
                        break;
                    }
                }

                maybe = rx.recv() => {
                    let Some(msg) = maybe else {
                        crate::dinfo!("Counter", "counter stopping (event channel closed)");
                        break;
                    };

                    if self.handle(msg) == Flow::Stop {
                        break;
                    }
                }
            }
        }

        // Cancel the pending tick before the presenter goes away.
        driver.stop();

        self.presenter.teardown()?;
        Ok(())
    }
}
