// Author: Dustin Pilgrim
// License: MIT

use std::io;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::{mpsc, oneshot, watch};

use super::{Counter, Flow};
use crate::config::CounterConfig;
use crate::core::clock::FixedClock;
use crate::core::counter_msg::CounterMsg;
use crate::core::tier::Tier;
use crate::core::view::View;
use crate::render::{FrameOptions, Presenter, TerminalPresenter};

#[derive(Default)]
struct Recording {
    frames: Vec<View>,
    torn_down: bool,
}

impl Presenter for Recording {
    fn present(&mut self, view: &View) -> io::Result<()> {
        self.frames.push(view.clone());
        Ok(())
    }

    fn teardown(&mut self) -> io::Result<()> {
        self.torn_down = true;
        Ok(())
    }
}

fn reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 13, 37, 0).unwrap()
}

fn counter_at(now: DateTime<Utc>) -> Counter<Recording> {
    crate::log::set_log_file(None);
    let cfg = CounterConfig {
        reference: reference(),
        fps: 100,
        ..CounterConfig::default()
    };
    Counter::new(&cfg, Recording::default(), Arc::new(FixedClock(now)))
}

#[test]
fn tick_renders_fresh_view() {
    let mut c = counter_at(reference());
    let now = reference() + Duration::days(3) + Duration::milliseconds(7);

    assert_eq!(c.handle(CounterMsg::Tick { now }), Flow::Continue);

    let frame = &c.presenter().frames[0];
    assert_eq!(frame.text.days, "3");
    assert_eq!(frame.text.milliseconds, "007");
    assert_eq!(frame.tier, Tier::Improving);
}

#[test]
fn reset_uses_clock_and_replies() {
    let now = reference() + Duration::days(10);
    let mut c = counter_at(now);

    let (reply, mut rx) = oneshot::channel();
    c.handle(CounterMsg::Reset { reply });

    let msg = rx.try_recv().unwrap().unwrap();
    assert_eq!(msg, "Incident timer reset at Thu, 11 Sep 2025 13:37:00 GMT");
    assert_eq!(c.state().reference(), now);
    assert_eq!(c.state().history(), &[now, reference()]);
}

#[test]
fn history_reply_is_most_recent_first() {
    let now = reference() + Duration::days(1);
    let mut c = counter_at(now);

    let (reply, _rx) = oneshot::channel();
    c.handle(CounterMsg::Reset { reply });

    let (reply, mut rx) = oneshot::channel();
    c.handle(CounterMsg::GetHistory { reply });
    assert_eq!(
        rx.try_recv().unwrap(),
        vec![
            "Tue, 02 Sep 2025 13:37:00 GMT".to_string(),
            "Mon, 01 Sep 2025 13:37:00 GMT".to_string(),
        ]
    );
}

#[test]
fn info_samples_clock() {
    let now = reference() + Duration::days(31);
    let mut c = counter_at(now);

    let (reply, mut rx) = oneshot::channel();
    c.handle(CounterMsg::GetInfo { reply });
    let view = rx.try_recv().unwrap();
    assert_eq!(view.tier, Tier::Legendary);
    assert_eq!(view.text.days, "31");
}

#[test]
fn stop_ends_loop() {
    let mut c = counter_at(reference());
    let (reply, mut rx) = oneshot::channel();
    assert_eq!(c.handle(CounterMsg::Stop { reply }), Flow::Stop);
    assert!(rx.try_recv().unwrap().is_ok());
}

#[test]
fn render_once_draws_one_frame() {
    let mut c = counter_at(reference() + Duration::hours(5));
    c.render_once().unwrap();
    assert_eq!(c.presenter().frames.len(), 1);
    assert_eq!(c.presenter().frames[0].text.hours, "05");
    assert!(c.presenter().torn_down);
}

#[test]
fn render_once_restores_terminal_cursor() {
    crate::log::set_log_file(None);
    let cfg = CounterConfig {
        reference: reference(),
        colors: false,
        ..CounterConfig::default()
    };
    let presenter = TerminalPresenter::new(Vec::new(), FrameOptions::default());
    let mut c = Counter::new(&cfg, presenter, Arc::new(FixedClock(reference())));

    c.render_once().unwrap();

    let out = String::from_utf8_lossy(c.presenter().output()).into_owned();
    let hidden = out.find("\x1b[?25l").expect("cursor hidden for the frame");
    let shown = out.rfind("\x1b[?25h").expect("cursor shown after the frame");
    assert!(shown > hidden);
    assert!(out.ends_with("\x1b[?25h"));
}

#[tokio::test]
async fn run_ticks_until_stop_then_tears_down() {
    let mut c = counter_at(reference() + Duration::days(2));
    let (tx, rx) = mpsc::channel(16);
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);

    let stopper = tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(60)).await;
        let (reply, _rx) = oneshot::channel();
        let _ = stopper.send(CounterMsg::Stop { reply }).await;
    });

    c.run(tx, rx, shutdown_rx).await.unwrap();

    assert!(!c.presenter().frames.is_empty());
    assert!(c.presenter().frames.iter().all(|f| f.tier == Tier::Risky));
    assert!(c.presenter().torn_down);
}

#[tokio::test]
async fn run_honors_shutdown_signal() {
    let mut c = counter_at(reference());
    let (tx, rx) = mpsc::channel(16);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(30)).await;
        let _ = shutdown_tx.send(true);
        // Keep the sender alive until the counter has seen the change.
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
    });

    c.run(tx, rx, shutdown_rx).await.unwrap();
    assert!(c.presenter().torn_down);
}
