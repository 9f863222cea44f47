use std::io;
use std::time::{Duration, Instant};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};

use crate::io::store::KeyValueStore;
use crate::model::{Priority, UiConfig};
use crate::model::task::TaskId;
use crate::ops::task_list::TaskList;
use crate::view::animation::{Counter, TweenSpec};
use crate::view::{ListView, Stats};

use super::events::{CrosstermKeys, KeySource};
use super::input;
use super::render;
use super::surface::TuiSurface;
use super::theme::Theme;

/// How long the loop waits for a key before redrawing animations
const FRAME: Duration = Duration::from_millis(20);

/// How often age labels are recomputed while idle
const AGE_REFRESH: Duration = Duration::from_secs(30);

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving through the list
    Navigate,
    /// Typing a new task
    Edit,
    /// A confirmation prompt is open
    Confirm,
}

/// Single-line text input with a byte cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLine {
    pub buffer: String,
    /// Byte offset, always on a grapheme boundary
    pub cursor: usize,
}

impl InputLine {
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }
}

/// Cosmetic timers. Nothing outside rendering reads them.
#[derive(Debug, Clone, Default)]
pub struct CueTimers {
    pub shake_until: Option<(Instant, Instant)>,
    pub completing: Vec<(TaskId, Instant)>,
}

impl CueTimers {
    /// Horizontal offset of the input line while shaking (0 when still)
    pub fn shake_offset(&self, now: Instant) -> i16 {
        match self.shake_until {
            Some((start, end)) if now < end => {
                let phase = now.saturating_duration_since(start).as_millis() / 60;
                match phase % 4 {
                    0 => 0,
                    1 => -2,
                    2 => 0,
                    _ => 2,
                }
            }
            _ => 0,
        }
    }

    pub fn is_shaking(&self, now: Instant) -> bool {
        self.shake_until.is_some_and(|(_, end)| now < end)
    }

    pub fn is_completing(&self, id: TaskId, now: Instant) -> bool {
        self.completing
            .iter()
            .any(|(cid, until)| *cid == id && now < *until)
    }

    /// Drop expired timers
    pub fn expire(&mut self, now: Instant) {
        if self.shake_until.is_some_and(|(_, end)| now >= end) {
            self.shake_until = None;
        }
        self.completing.retain(|(_, until)| now < *until);
    }

    pub fn is_idle(&self) -> bool {
        self.shake_until.is_none() && self.completing.is_empty()
    }
}

/// Presentation state of the terminal UI
pub struct App {
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub input: InputLine,
    /// Priority the next added task gets
    pub priority: Priority,
    /// Last list view handed over by the controller
    pub view: ListView,
    /// Selected row in `view.rows`
    pub cursor: usize,
    pub total: Counter,
    pub completed: Counter,
    pub remaining: Counter,
    pub tween: TweenSpec,
    pub cues: CueTimers,
    pub shake_for: Duration,
    pub completing_for: Duration,
    /// Message shown in the status row until the next key
    pub notice: Option<String>,
    /// Open confirmation prompt
    pub prompt: Option<String>,
    pub show_help: bool,
}

impl App {
    pub fn new(ui: &UiConfig) -> Self {
        App {
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(ui),
            input: InputLine::default(),
            priority: Priority::default(),
            view: ListView {
                filter: Default::default(),
                rows: Vec::new(),
            },
            cursor: 0,
            total: Counter::new(0),
            completed: Counter::new(0),
            remaining: Counter::new(0),
            tween: TweenSpec::new(
                Duration::from_millis(ui.counter_duration_ms),
                ui.counter_steps,
            ),
            cues: CueTimers::default(),
            shake_for: Duration::from_millis(ui.shake_ms),
            completing_for: Duration::from_millis(ui.completing_ms),
            notice: None,
            prompt: None,
            show_help: false,
        }
    }

    /// Take a new list view, keeping the cursor on the same task when it is
    /// still visible
    pub fn set_view(&mut self, view: ListView) {
        let selected = self.selected_id();
        self.cursor = selected
            .and_then(|id| view.rows.iter().position(|r| r.id == id))
            .unwrap_or(self.cursor);
        self.view = view;
        self.clamp_cursor();
    }

    pub fn set_stats(&mut self, stats: Stats, now: Instant) {
        self.total.set_target(stats.total as i64, now, self.tween);
        self.completed.set_target(stats.completed as i64, now, self.tween);
        self.remaining.set_target(stats.remaining as i64, now, self.tween);
    }

    pub fn selected_id(&self) -> Option<TaskId> {
        self.view.rows.get(self.cursor).map(|r| r.id)
    }

    pub fn clamp_cursor(&mut self) {
        if self.view.rows.is_empty() {
            self.cursor = 0;
        } else {
            self.cursor = self.cursor.min(self.view.rows.len() - 1);
        }
    }

    /// Advance cosmetic state. Returns true while something is still moving.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.cues.expire(now);
        let counting = [
            self.total.tick(now),
            self.completed.tick(now),
            self.remaining.tick(now),
        ]
        .contains(&true);
        counting || !self.cues.is_idle()
    }
}

/// Run the TUI against `list` until the user quits
pub fn run<S: KeyValueStore>(
    list: &mut TaskList<S>,
    ui: &UiConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(ui);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal even if something panics mid-frame
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut keys = CrosstermKeys;
    let result = run_event_loop(&mut terminal, &mut app, list, &mut keys);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

pub fn run_event_loop<B: Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    list: &mut TaskList<S>,
    keys: &mut dyn KeySource,
) -> Result<(), Box<dyn std::error::Error>> {
    {
        let mut surface = TuiSurface::new(app, terminal, keys);
        list.initialize(&mut surface);
    }
    tracing::info!("tui started with {} task(s)", list.tasks().len());

    let mut last_refresh = Instant::now();
    loop {
        let now = Instant::now();
        app.tick(now);
        terminal.draw(|frame| render::render(frame, app, now))?;

        if let Some(key) = keys.poll_key(FRAME)? {
            let mut surface = TuiSurface::new(app, terminal, keys);
            input::handle_key(list, &mut surface, key);
        } else if last_refresh.elapsed() >= AGE_REFRESH {
            let mut surface = TuiSurface::new(app, terminal, keys);
            list.render(&mut surface);
            last_refresh = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }
    tracing::info!("tui stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::filter::Filter;
    use crate::view::TaskRow;

    fn row(id: i64) -> TaskRow {
        TaskRow {
            id: TaskId(id),
            text: format!("task {id}"),
            completed: false,
            priority: Priority::Medium,
            age: "Just now".into(),
        }
    }

    fn view(ids: &[i64]) -> ListView {
        ListView {
            filter: Filter::All,
            rows: ids.iter().copied().map(row).collect(),
        }
    }

    #[test]
    fn set_view_follows_selected_task() {
        let mut app = App::new(&UiConfig::default());
        app.set_view(view(&[3, 2, 1]));
        app.cursor = 1;
        app.set_view(view(&[4, 3, 2, 1]));
        assert_eq!(app.selected_id(), Some(TaskId(2)));
    }

    #[test]
    fn set_view_clamps_when_selected_task_disappears() {
        let mut app = App::new(&UiConfig::default());
        app.set_view(view(&[3, 2, 1]));
        app.cursor = 2;
        app.set_view(view(&[3, 2]));
        assert_eq!(app.cursor, 1);
        app.set_view(view(&[]));
        assert_eq!(app.cursor, 0);
        assert_eq!(app.selected_id(), None);
    }

    #[test]
    fn cue_timers_expire() {
        let t0 = Instant::now();
        let mut cues = CueTimers {
            shake_until: Some((t0, t0 + Duration::from_millis(500))),
            completing: vec![(TaskId(1), t0 + Duration::from_millis(400))],
        };
        assert!(cues.is_shaking(t0));
        assert!(cues.is_completing(TaskId(1), t0));
        assert!(!cues.is_completing(TaskId(2), t0));

        cues.expire(t0 + Duration::from_millis(450));
        assert!(cues.is_shaking(t0 + Duration::from_millis(450)));
        assert!(cues.completing.is_empty());

        cues.expire(t0 + Duration::from_millis(500));
        assert!(cues.is_idle());
        assert_eq!(cues.shake_offset(t0 + Duration::from_millis(600)), 0);
    }

    #[test]
    fn stats_start_counter_tweens() {
        let t0 = Instant::now();
        let mut app = App::new(&UiConfig::default());
        app.set_stats(
            Stats {
                total: 2,
                completed: 0,
                remaining: 2,
            },
            t0,
        );
        assert!(app.total.is_animating());
        assert!(!app.completed.is_animating());
        assert!(app.tick(t0));
        assert!(!app.tick(t0 + Duration::from_secs(1)));
        assert_eq!(app.total.value_at(t0), 2);
    }
}
