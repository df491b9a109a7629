// Author: Dustin Pilgrim
// License: MIT

use std::io::{self, BufRead, Write};

use crate::cli::{Args, Command};
use crate::core::controller::{ConfirmGate, RESET_PROMPT};

type AnyError = Box<dyn std::error::Error + Send + Sync>;

/// Asks a yes/no question on a terminal. Anything but `y`/`yes` is a no.
pub struct PromptGate<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptGate<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> ConfirmGate for PromptGate<R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if write!(self.output, "{prompt} [y/N] ").and_then(|_| self.output.flush()).is_err() {
            return false;
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => false,
            Ok(_) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        }
    }
}

async fn send_and_print(msg: &str, fallback: &str) {
    match crate::ipc::client::send_raw(msg).await {
        Ok(resp) => {
            let out = resp.trim_end();
            if out.is_empty() {
                if !fallback.is_empty() {
                    println!("{fallback}");
                }
            } else {
                println!("{out}");
            }
        }
        Err(e) => eprintln!("doomsday: {e}"),
    }
}

pub async fn run(args: Args, command: Command) -> Result<(), AnyError> {
    match command {
        Command::Reset { yes } => {
            let confirmed = if yes {
                true
            } else {
                let stdin = io::stdin();
                PromptGate::new(stdin.lock(), io::stdout()).confirm(RESET_PROMPT)
            };

            if !confirmed {
                println!("Reset cancelled");
                return Ok(());
            }

            send_and_print("reset", "Incident timer reset").await;
            Ok(())
        }

        Command::Info { json } => {
            let msg = if json { "info --json" } else { "info" };

            match crate::ipc::client::send_raw(msg).await {
                Ok(resp) => {
                    if !resp.is_empty() {
                        println!("{resp}");
                    }
                }
                Err(e) => {
                    if json {
                        // Status bars need valid JSON on stdout even when the counter isn't running.
                        println!("{}", serde_json::json!({ "running": false }));
                    } else {
                        eprintln!("doomsday: {e}");
                    }
                }
            }
            Ok(())
        }

        Command::History => {
            send_and_print("history", "").await;
            Ok(())
        }

        Command::Stop => {
            send_and_print("stop", "Stopping doomsday counter").await;
            Ok(())
        }

        Command::Legend => {
            let colors = !args.no_color && !crate::app::platform::no_color_env();
            println!("{}", crate::render::terminal::legend_text(colors));
            Ok(())
        }
    }
}
