use std::time::Instant;

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::view::{Cue, ListView, Stats, Surface};

use super::app::{App, Mode};
use super::events::KeySource;
use super::render;

/// The terminal as a presentation surface for the controller.
///
/// Lives for one controller call. Confirmations run a nested key loop on the
/// same terminal so the calling operation blocks until answered.
pub struct TuiSurface<'a, B: Backend> {
    pub app: &'a mut App,
    terminal: &'a mut Terminal<B>,
    keys: &'a mut dyn KeySource,
}

impl<'a, B: Backend> TuiSurface<'a, B> {
    pub fn new(
        app: &'a mut App,
        terminal: &'a mut Terminal<B>,
        keys: &'a mut dyn KeySource,
    ) -> Self {
        TuiSurface {
            app,
            terminal,
            keys,
        }
    }

    fn ask(&mut self) -> std::io::Result<bool> {
        loop {
            let now = Instant::now();
            self.app.tick(now);
            let app = &*self.app;
            self.terminal.draw(|frame| render::render(frame, app, now))?;

            let key = self.keys.read_key()?;
            match (key.modifiers, key.code) {
                (_, KeyCode::Char('y' | 'Y')) | (_, KeyCode::Enter) => return Ok(true),
                (_, KeyCode::Char('n' | 'N')) | (_, KeyCode::Esc) => return Ok(false),
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(false),
                _ => {}
            }
        }
    }
}

impl<B: Backend> Surface for TuiSurface<'_, B> {
    fn render_list(&mut self, view: &ListView) {
        self.app.set_view(view.clone());
    }

    fn show_stats(&mut self, stats: Stats) {
        self.app.set_stats(stats, Instant::now());
    }

    fn confirm(&mut self, message: &str) -> bool {
        let previous = self.app.mode;
        self.app.prompt = Some(message.to_string());
        self.app.mode = Mode::Confirm;

        let answer = self.ask().unwrap_or_else(|e| {
            tracing::error!("confirmation aborted: {e}");
            false
        });

        self.app.prompt = None;
        self.app.mode = previous;
        answer
    }

    fn notify(&mut self, message: &str) {
        self.app.notice = Some(message.to_string());
    }

    fn cue(&mut self, cue: Cue) {
        let now = Instant::now();
        match cue {
            Cue::Shake => self.app.cues.shake_until = Some((now, now + self.app.shake_for)),
            Cue::ClearInput => self.app.input.clear(),
            Cue::FocusInput => self.app.mode = Mode::Edit,
            Cue::Completing(id) => {
                let until = now + self.app.completing_for;
                self.app.cues.completing.retain(|(cid, _)| *cid != id);
                self.app.cues.completing.push((id, until));
            }
        }
    }
}
