// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::UnixStream,
    time::{timeout, Duration},
};

const STEP_TIMEOUT: Duration = Duration::from_secs(2);

pub async fn send_raw(cmd: &str) -> Result<String, String> {
    let path = crate::ipc::socket_path()?;
    send_raw_to(&path, cmd).await
}

/// One request/response exchange: write, half-close, read to EOF.
pub async fn send_raw_to(path: &Path, cmd: &str) -> Result<String, String> {
    if !path.exists() {
        return Err("counter not running".to_string());
    }

    let mut stream = match timeout(STEP_TIMEOUT, UnixStream::connect(path)).await {
        Ok(Ok(s)) => s,
        Ok(Err(e)) => return Err(format!("failed to connect to {}: {e}", path.display())),
        Err(_) => return Err("timeout connecting to counter".to_string()),
    };

    timeout(STEP_TIMEOUT, stream.write_all(cmd.as_bytes()))
        .await
        .map_err(|_| "timeout writing to counter".to_string())?
        .map_err(|e| format!("write failed: {e}"))?;

    timeout(STEP_TIMEOUT, stream.shutdown())
        .await
        .map_err(|_| "timeout finalizing request".to_string())?
        .map_err(|e| format!("shutdown failed: {e}"))?;

    let mut resp = Vec::new();
    timeout(STEP_TIMEOUT, stream.read_to_end(&mut resp))
        .await
        .map_err(|_| "timeout reading response".to_string())?
        .map_err(|e| format!("read failed: {e}"))?;

    Ok(String::from_utf8_lossy(&resp).to_string())
}
