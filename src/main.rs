// Author: Dustin Pilgrim
// License: MIT

mod app;
mod cli;
mod config;
mod core;
mod counter;
mod ipc;
mod log;
mod render;
mod services;

use clap::Parser;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

// All counter state lives on one task; a single-threaded runtime is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AnyError> {
    let args = cli::Args::parse();

    if let Some(command) = args.command.clone() {
        crate::log::set_verbose(args.verbose);
        return app::command::run(args, command).await;
    }

    app::counter_mode::run(args).await
}
