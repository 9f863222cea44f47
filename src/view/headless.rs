use std::collections::VecDeque;

use crate::view::{Cue, ListView, Stats, Surface};

/// Something a [`HeadlessSurface`] was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Render(ListView),
    Stats(Stats),
    Confirm(String),
    Notify(String),
    Cue(Cue),
}

/// Surface with no display: records every call and answers confirmations
/// from a queue, falling back to a fixed answer.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    pub events: Vec<SurfaceEvent>,
    answers: VecDeque<bool>,
    default_answer: bool,
}

impl HeadlessSurface {
    /// Surface that approves every confirmation
    pub fn approving() -> Self {
        HeadlessSurface {
            default_answer: true,
            ..Default::default()
        }
    }

    /// Surface that declines every confirmation
    pub fn declining() -> Self {
        Self::default()
    }

    /// Queue an answer for the next confirmation
    pub fn answer(&mut self, yes: bool) -> &mut Self {
        self.answers.push_back(yes);
        self
    }

    pub fn last_list(&self) -> Option<&ListView> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::Render(v) => Some(v),
            _ => None,
        })
    }

    pub fn last_stats(&self) -> Option<Stats> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::Stats(s) => Some(*s),
            _ => None,
        })
    }

    pub fn cues(&self) -> Vec<Cue> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Cue(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    pub fn prompts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Confirm(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Notify(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Surface for HeadlessSurface {
    fn render_list(&mut self, view: &ListView) {
        self.events.push(SurfaceEvent::Render(view.clone()));
    }

    fn show_stats(&mut self, stats: Stats) {
        self.events.push(SurfaceEvent::Stats(stats));
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.events.push(SurfaceEvent::Confirm(message.to_string()));
        self.answers.pop_front().unwrap_or(self.default_answer)
    }

    fn notify(&mut self, message: &str) {
        self.events.push(SurfaceEvent::Notify(message.to_string()));
    }

    fn cue(&mut self, cue: Cue) {
        self.events.push(SurfaceEvent::Cue(cue));
    }
}
