// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{UnixListener, UnixStream},
    sync::mpsc,
    task::JoinHandle,
    time::{timeout, Duration},
};

use crate::core::counter_msg::CounterMsg;

use super::router::route_command;

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Binds the counter socket and spawns the accept loop.
///
/// Any stale socket file is replaced; the single-instance lock guarantees it
/// is not owned by a live counter.
pub fn spawn_ipc_server(tx: mpsc::Sender<CounterMsg>) -> Result<JoinHandle<()>, String> {
    let path = super::socket_path()?;
    spawn_ipc_server_at(&path, tx)
}

pub fn spawn_ipc_server_at(
    path: &Path,
    tx: mpsc::Sender<CounterMsg>,
) -> Result<JoinHandle<()>, String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
    }
    let _ = std::fs::remove_file(path);

    let listener = UnixListener::bind(path)
        .map_err(|e| format!("failed to bind {}: {e}", path.display()))?;

    crate::dinfo!("Ipc", "listening on {}", path.display());

    Ok(tokio::spawn(accept_loop(listener, tx)))
}

pub fn remove_socket() {
    if let Ok(path) = super::socket_path() {
        let _ = std::fs::remove_file(path);
    }
}

async fn accept_loop(listener: UnixListener, tx: mpsc::Sender<CounterMsg>) {
    loop {
        match listener.accept().await {
            Ok((mut stream, _addr)) => {
                let tx = tx.clone();

                tokio::spawn(async move {
                    let result = timeout(CONNECTION_TIMEOUT, async {
                        if let Err(e) = handle_connection(&mut stream, &tx).await {
                            crate::derror!("Ipc", "Error handling IPC connection: {}", e);
                        }
                    })
                    .await;

                    if result.is_err() {
                        crate::derror!("Ipc", "IPC connection timed out after 10 seconds");
                    }

                    let _ = stream.shutdown().await;
                });
            }
            Err(e) => crate::derror!("Ipc", "Failed to accept IPC connection: {}", e),
        }
    }
}

/// Handles a single IPC connection
async fn handle_connection(
    stream: &mut UnixStream,
    tx: &mpsc::Sender<CounterMsg>,
) -> std::io::Result<()> {
    let mut buf = vec![0u8; 256];
    let n = stream.read(&mut buf).await?;

    if n == 0 {
        return Ok(());
    }

    let cmd = String::from_utf8_lossy(&buf[..n]).trim().to_string();
    crate::ddebug!("Ipc", "Received IPC command: {}", cmd);

    let response = route_command(&cmd, tx).await;

    stream.write_all(response.as_bytes()).await?;
    stream.flush().await?;

    Ok(())
}
