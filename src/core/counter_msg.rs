// Author: Dustin Pilgrim
// License: MIT

use chrono::{DateTime, Utc};
use tokio::sync::oneshot;

use crate::core::view::View;

#[derive(Debug)]
pub enum CounterMsg {
    /// One frame from the clock driver.
    Tick { now: DateTime<Utc> },

    /// A reset the caller has already confirmed.
    Reset {
        reply: oneshot::Sender<Result<String, String>>,
    },

    GetInfo { reply: oneshot::Sender<View> },

    GetHistory { reply: oneshot::Sender<Vec<String>> },

    Stop {
        reply: oneshot::Sender<Result<String, String>>,
    },
}
