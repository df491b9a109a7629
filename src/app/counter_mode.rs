// Author: Dustin Pilgrim
// License: MIT

use std::io::{self, IsTerminal};
use std::sync::Arc;

use tokio::signal::unix::{signal, SignalKind};

use crate::cli::Args;
use crate::core::clock::SystemClock;
use crate::counter::Counter;
use crate::render::{FrameOptions, TerminalPresenter};

type AnyError = Box<dyn std::error::Error + Send + Sync>;

/// Redrawing in place only makes sense on a terminal; pipes and files get one frame.
fn single_frame(once: bool, stdout_is_tty: bool) -> bool {
    once || !stdout_is_tty
}

pub async fn run(args: Args) -> Result<(), AnyError> {
    crate::log::set_verbose(args.verbose);

    // load (file, then command-line overrides)
    let loaded = crate::config::load(args.config.as_deref()).map_err(|e| {
        crate::derror!("Config", "{e:#}");
        eprintln!("doomsday: {e:#}");
        io::Error::new(io::ErrorKind::InvalidInput, format!("{e:#}"))
    })?;

    let mut cfg = loaded.cfg;
    let no_color = args.no_color || crate::app::platform::no_color_env();
    cfg.apply_overrides(args.since.as_deref(), args.fps, no_color)
        .map_err(|e| {
            eprintln!("doomsday: {e}");
            e
        })?;

    let opts = FrameOptions {
        colors: cfg.colors,
        show_legend: cfg.show_legend,
        show_history: cfg.show_history,
    };
    let presenter = TerminalPresenter::stdout(opts);
    let mut counter = Counter::new(&cfg, presenter, Arc::new(SystemClock));

    if single_frame(args.once, io::stdout().is_terminal()) {
        crate::ddebug!("Doomsday", "drawing a single frame (once={})", args.once);
        counter.render_once()?;
        return Ok(());
    }

    // single-instance
    let _instance_lock = crate::app::platform::acquire_single_instance_lock().map_err(|e| {
        eprintln!("doomsday: {e}");
        io::Error::new(io::ErrorKind::AlreadyExists, e)
    })?;

    match &loaded.path {
        Some(p) => crate::dinfo!("Doomsday", "doomsday starting (config: {})", p.display()),
        None => crate::dinfo!("Doomsday", "doomsday starting (built-in config)"),
    }

    let (tx, rx) = tokio::sync::mpsc::channel(256);
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let ipc = match crate::ipc::server::spawn_ipc_server(tx.clone()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            crate::dwarn!("Ipc", "failed to start: {}", e);
            None
        }
    };

    let mut counter_task = tokio::spawn(async move { counter.run(tx, rx, shutdown_rx).await });

    let mut sigterm = signal(SignalKind::terminate())?;

    let result = tokio::select! {
        res = &mut counter_task => res,

        _ = tokio::signal::ctrl_c() => {
            crate::dinfo!("Doomsday", "received Ctrl+C, shutting down");
            let _ = shutdown_tx.send(true);
            counter_task.await
        }

        _ = sigterm.recv() => {
            crate::dinfo!("Doomsday", "received SIGTERM, shutting down");
            let _ = shutdown_tx.send(true);
            counter_task.await
        }
    };

    if let Some(handle) = ipc {
        handle.abort();
        crate::ipc::server::remove_socket();
    }

    // leave the shell prompt below the last frame
    println!();

    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(e),
        Err(join_err) => Err(Box::new(join_err) as AnyError),
    }
}
