// Author: Dustin Pilgrim
// License: MIT

use std::io::{self, Write};

use crate::core::{tier::Tier, view::View};

use super::Presenter;

pub const TITLE: &str = "DAYS SINCE THE LAST INCIDENT";
pub const CAPTION: &str = "Hours • Minutes • Seconds • Milliseconds";
const HINT: &str = "reset: `doomsday reset`  •  quit: Ctrl+C";

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[90m";
const HOME: &str = "\x1b[H";
const CLEAR_LINE: &str = "\x1b[K";
const CLEAR_BELOW: &str = "\x1b[J";
const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";

#[derive(Debug, Clone, Copy)]
pub struct FrameOptions {
    pub colors: bool,
    pub show_legend: bool,
    pub show_history: bool,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            colors: true,
            show_legend: true,
            show_history: true,
        }
    }
}

struct Painter {
    colors: bool,
}

impl Painter {
    fn paint(&self, style: &str, text: &str) -> String {
        if self.colors {
            format!("{style}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let left = width.saturating_sub(len) / 2;
    let right = width.saturating_sub(len + left);
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// Build one full frame as plain lines (no cursor control).
pub fn render_frame(view: &View, opts: FrameOptions) -> Vec<String> {
    let p = Painter { colors: opts.colors };
    let tint = view.tier.ansi();

    let days = format!("{} d", view.text.days);
    let clock = format!(
        "{} : {} : {} . {}",
        view.text.hours, view.text.minutes, view.text.seconds, view.text.milliseconds
    );

    let inner = [days.chars().count(), clock.chars().count(), CAPTION.chars().count()]
        .into_iter()
        .max()
        .unwrap_or(0)
        + 4;

    let mut lines = Vec::new();

    lines.push(p.paint(&format!("{BOLD}{tint}"), TITLE));
    lines.push(String::new());

    let border = |l: &str, r: &str| p.paint(tint, &format!("{l}{}{r}", "─".repeat(inner)));
    let row = |text: &str, style: &str| {
        format!(
            "{}{}{}",
            p.paint(tint, "│"),
            p.paint(style, &center(text, inner)),
            p.paint(tint, "│")
        )
    };

    lines.push(border("╭", "╮"));
    lines.push(row(&days, &format!("{BOLD}{tint}")));
    lines.push(row(&clock, tint));
    lines.push(row("", ""));
    lines.push(row(CAPTION, DIM));
    lines.push(border("╰", "╯"));

    lines.push(String::new());
    lines.push(p.paint(DIM, HINT));

    if opts.show_legend {
        lines.push(String::new());
        lines.push(p.paint(DIM, "Color Legend:"));
        let legend: Vec<String> = Tier::ALL
            .iter()
            .map(|t| p.paint(t.ansi(), &format!("{} = {}", t.range(), t.label())))
            .collect();
        lines.push(legend.join("  "));
    }

    if opts.show_history {
        lines.push(String::new());
        lines.push(p.paint(DIM, "Incident history:"));
        for entry in &view.history {
            lines.push(p.paint(DIM, entry));
        }
    }

    lines
}

/// Redraws the whole frame in place on an ANSI terminal.
pub struct TerminalPresenter<W: Write> {
    out: W,
    opts: FrameOptions,
    cursor_hidden: bool,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, opts: FrameOptions) -> Self {
        Self {
            out,
            opts,
            cursor_hidden: false,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout(opts: FrameOptions) -> Self {
        Self::new(io::stdout(), opts)
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn present(&mut self, view: &View) -> io::Result<()> {
        let mut buf = String::new();

        if !self.cursor_hidden {
            buf.push_str(HIDE_CURSOR);
            self.cursor_hidden = true;
        }

        buf.push_str(HOME);
        for line in render_frame(view, self.opts) {
            buf.push_str(&line);
            buf.push_str(CLEAR_LINE);
            buf.push('\n');
        }
        buf.push_str(CLEAR_BELOW);

        // One write per frame keeps partial frames off the screen.
        self.out.write_all(buf.as_bytes())?;
        self.out.flush()
    }

    fn teardown(&mut self) -> io::Result<()> {
        if self.cursor_hidden {
            self.out.write_all(SHOW_CURSOR.as_bytes())?;
            self.cursor_hidden = false;
        }
        self.out.flush()
    }
}

/// Static legend used by `doomsday legend`.
pub fn legend_text(colors: bool) -> String {
    let p = Painter { colors };
    Tier::ALL
        .iter()
        .map(|t| {
            p.paint(
                t.ansi(),
                &format!("{:<7} {:<10} {}", t.range(), t.label(), t.color()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
