// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::mpsc;

use crate::core::counter_msg::CounterMsg;

use super::handlers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpcCommand {
    Reset,
    Info { json: bool },
    History,
    Stop,
}

pub fn parse_command(cmd: &str) -> Result<IpcCommand, String> {
    let mut parts = cmd.split_whitespace();
    let head = parts.next().unwrap_or("");
    let rest: Vec<&str> = parts.collect();

    match (head, rest.as_slice()) {
        ("reset", []) => Ok(IpcCommand::Reset),
        ("info", []) => Ok(IpcCommand::Info { json: false }),
        ("info", ["--json"]) => Ok(IpcCommand::Info { json: true }),
        ("history", []) => Ok(IpcCommand::History),
        ("stop", []) => Ok(IpcCommand::Stop),
        _ => Err(format!("ERROR: Unknown command '{}'", cmd.trim())),
    }
}

/// Routes incoming commands to appropriate handlers
pub async fn route_command(cmd: &str, tx: &mpsc::Sender<CounterMsg>) -> String {
    match parse_command(cmd) {
        Ok(IpcCommand::Reset) => handlers::handle_reset(tx).await,
        Ok(IpcCommand::Info { json }) => handlers::handle_info(tx, json).await,
        Ok(IpcCommand::History) => handlers::handle_history(tx).await,
        Ok(IpcCommand::Stop) => handlers::handle_stop(tx).await,
        Err(e) => {
            crate::dwarn!("Router", "Unknown IPC command: {}", cmd.trim());
            e
        }
    }
}
