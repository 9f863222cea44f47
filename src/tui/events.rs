use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Where key presses come from
pub trait KeySource {
    /// Wait up to `timeout` for a key press
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>>;
    /// Block until a key press arrives
    fn read_key(&mut self) -> io::Result<KeyEvent>;
}

/// Key presses from the real terminal
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            return Ok(Some(key));
        }
        Ok(None)
    }

    fn read_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                return Ok(key);
            }
        }
    }
}

/// Pre-recorded key presses
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<KeyEvent>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        ScriptedKeys {
            keys: keys.into_iter().collect(),
        }
    }

    /// Plain key presses from characters, e.g. `"yq"`
    pub fn chars(s: &str) -> Self {
        Self::new(s.chars().map(|c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)))
    }

    pub fn push(&mut self, key: KeyEvent) {
        self.keys.push_back(key);
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn poll_key(&mut self, _timeout: Duration) -> io::Result<Option<KeyEvent>> {
        Ok(self.keys.pop_front())
    }

    fn read_key(&mut self) -> io::Result<KeyEvent> {
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more scripted keys"))
    }
}
