use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};

/// Holds the latest terminal size until resizing settles.
pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the viewer until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or event reading fails.
    /// A payload that cannot be loaded is shown on screen, not returned.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; the viewer needs an interactive terminal")?;
        let size = terminal.size()?;
        crate::perf::log_event("init.terminal", format!("{}x{}", size.width, size.height));

        let mut model = self.prepare_model((size.width, size.height));
        let result = self.event_loop(&mut terminal, &mut model);

        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();
        result
    }

    fn dispatch(&mut self, model: &mut Model, msg: Message, frame_idx: u64) {
        crate::perf::log_event("event.message", format!("frame={frame_idx} msg={msg:?}"));
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        self.handle_message_side_effects(model, &side_msg);
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;
        execute!(stdout(), EnableMouseCapture)?;

        loop {
            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                crate::perf::log_event(
                    "event.resize.apply",
                    format!("frame={frame_idx} width={width} height={height}"),
                );
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending() {
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Coalesce key repeat bursts into a single render.
                loop {
                    let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    if let Some(msg) =
                        Self::handle_event(event::read()?, model, event_ms, &mut resize_debouncer)
                    {
                        self.dispatch(model, msg, frame_idx);
                        needs_render = true;
                    }
                    if !event::poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }

            if needs_render {
                frame_idx += 1;
                let draw_start = Instant::now();
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                crate::perf::log_event(
                    "frame.draw",
                    format!(
                        "frame={frame_idx} draw_ms={:.3} viewport={:?}",
                        draw_start.elapsed().as_secs_f64() * 1000.0,
                        model.viewport.visible_range()
                    ),
                );
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
