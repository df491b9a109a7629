// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::{mpsc, oneshot};

use crate::core::counter_msg::CounterMsg;

const NOT_RUNNING: &str = "Doomsday counter not running";
const NO_RESPONSE: &str = "ERROR: No response from counter";

/// Turn a counter reply into the text sent back over the socket.
fn reply_text(res: Result<Result<String, String>, oneshot::error::RecvError>, fallback: &str) -> String {
    match res {
        Ok(Ok(msg)) => {
            let out = msg.trim_end();
            if out.is_empty() {
                fallback.to_string()
            } else {
                out.to_string()
            }
        }
        Ok(Err(e)) => format!("ERROR: {}", e.trim_end()),
        Err(_) => NO_RESPONSE.to_string(),
    }
}

/// Handle `doomsday reset`. The caller has already confirmed.
pub async fn handle_reset(tx: &mpsc::Sender<CounterMsg>) -> String {
    let (reply_tx, reply_rx) = oneshot::channel();

    if tx.send(CounterMsg::Reset { reply: reply_tx }).await.is_err() {
        return NOT_RUNNING.to_string();
    }

    reply_text(reply_rx.await, "Incident timer reset")
}

/// Handle `doomsday stop`.
///
/// Replies once the counter has acknowledged the request.
pub async fn handle_stop(tx: &mpsc::Sender<CounterMsg>) -> String {
    let (reply_tx, reply_rx) = oneshot::channel();

    if tx.send(CounterMsg::Stop { reply: reply_tx }).await.is_err() {
        return NOT_RUNNING.to_string();
    }

    reply_text(reply_rx.await, "Stopping doomsday counter")
}

pub async fn handle_info(tx: &mpsc::Sender<CounterMsg>, as_json: bool) -> String {
    let (reply_tx, reply_rx) = oneshot::channel();

    if tx.send(CounterMsg::GetInfo { reply: reply_tx }).await.is_err() {
        return if as_json {
            serde_json::json!({ "running": false }).to_string()
        } else {
            NOT_RUNNING.to_string()
        };
    }

    match reply_rx.await {
        Ok(view) if as_json => {
            let mut json = view.to_json();
            json["running"] = serde_json::Value::Bool(true);
            json.to_string()
        }
        Ok(view) => view.pretty_text(),
        Err(_) => NO_RESPONSE.to_string(),
    }
}

pub async fn handle_history(tx: &mpsc::Sender<CounterMsg>) -> String {
    let (reply_tx, reply_rx) = oneshot::channel();

    if tx.send(CounterMsg::GetHistory { reply: reply_tx }).await.is_err() {
        return NOT_RUNNING.to_string();
    }

    match reply_rx.await {
        Ok(entries) => entries.join("\n"),
        Err(_) => NO_RESPONSE.to_string(),
    }
}
