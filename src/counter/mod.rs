// Author: Dustin Pilgrim
// License: MIT

mod run;

use std::io;
use std::sync::Arc;

use crate::config::CounterConfig;
use crate::core::{
    clock::Clock,
    controller::{request_reset, ResetOutcome},
    counter_msg::CounterMsg,
    state::IncidentState,
    view::{format_history_entry, View},
};
use crate::render::Presenter;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Owns the incident state from activation to teardown.
///
/// Every mutation and every frame goes through [`Counter::handle`], one
/// message at a time, so a reset can never interleave with a tick.
pub struct Counter<P: Presenter> {
    state: IncidentState,
    presenter: P,
    clock: Arc<dyn Clock>,
    frame_ms: u64,
    render_error_logged: bool,
}

impl<P: Presenter> Counter<P> {
    pub fn new(cfg: &CounterConfig, presenter: P, clock: Arc<dyn Clock>) -> Self {
        crate::ddebug!(
            "Counter",
            "counter: reference={}, fps={}, colors={}, legend={}, history={}",
            cfg.reference.to_rfc3339(),
            cfg.fps,
            cfg.colors,
            cfg.show_legend,
            cfg.show_history,
        );

        Self {
            state: IncidentState::new(cfg.reference),
            presenter,
            clock,
            frame_ms: cfg.frame_interval_ms(),
            render_error_logged: false,
        }
    }

    /// Draw a single frame for the current instant and release the output.
    pub fn render_once(&mut self) -> io::Result<()> {
        let view = View::build(&self.state, self.clock.now());
        let drawn = self.presenter.present(&view);
        let restored = self.presenter.teardown();
        drawn.and(restored)
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &IncidentState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn presenter(&self) -> &P {
        &self.presenter
    }

    fn handle(&mut self, msg: CounterMsg) -> Flow {
        match msg {
            CounterMsg::Tick { now } => {
                let view = View::build(&self.state, now);
                if let Err(e) = self.presenter.present(&view) {
                    if !self.render_error_logged {
                        self.render_error_logged = true;
                        crate::derror!("Counter", "failed to draw frame: {}", e);
                    }
                }
                Flow::Continue
            }

            CounterMsg::Reset { reply } => {
                let out = match request_reset(&mut self.state, &mut true, self.clock.as_ref()) {
                    ResetOutcome::Reset { at } => {
                        crate::dinfo!(
                            "Counter",
                            "incident recorded at {} (history: {})",
                            at.to_rfc3339(),
                            self.state.history().len()
                        );
                        Ok(format!("Incident timer reset at {}", format_history_entry(at)))
                    }
                    ResetOutcome::Declined => Ok("Reset cancelled".to_string()),
                };
                let _ = reply.send(out);
                Flow::Continue
            }

            CounterMsg::GetInfo { reply } => {
                let _ = reply.send(View::build(&self.state, self.clock.now()));
                Flow::Continue
            }

            CounterMsg::GetHistory { reply } => {
                let entries = self
                    .state
                    .history()
                    .iter()
                    .map(|t| format_history_entry(*t))
                    .collect();
                let _ = reply.send(entries);
                Flow::Continue
            }

            CounterMsg::Stop { reply } => {
                crate::dinfo!("Counter", "counter stopping (stop requested via IPC)");
                let _ = reply.send(Ok("Stopping doomsday counter".to_string()));
                Flow::Stop
            }
        }
    }
}

#[cfg(test)]
mod tests;
