use std::io::BufRead;

use crate::util::text::sanitize_for_terminal;
use crate::view::{Cue, ListView, Stats, Surface};

/// Line-oriented surface for one-shot commands.
///
/// Views and statistics are kept for the handler to print; confirmations are
/// read from `input` unless `assume_yes` is set; notices go to stderr.
/// Anything written to the terminal has control characters replaced.
pub struct ConsoleSurface<R> {
    input: R,
    assume_yes: bool,
    pub last_list: Option<ListView>,
    pub last_stats: Option<Stats>,
    pub notices: Vec<String>,
}

impl<R: BufRead> ConsoleSurface<R> {
    pub fn new(input: R, assume_yes: bool) -> Self {
        ConsoleSurface {
            input,
            assume_yes,
            last_list: None,
            last_stats: None,
            notices: Vec::new(),
        }
    }
}

/// Text shown before reading a y/n answer
fn prompt_line(message: &str) -> String {
    format!("{} [y/n] ", sanitize_for_terminal(message))
}

impl<R: BufRead> Surface for ConsoleSurface<R> {
    fn render_list(&mut self, view: &ListView) {
        self.last_list = Some(view.clone());
    }

    fn show_stats(&mut self, stats: Stats) {
        self.last_stats = Some(stats);
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{}", prompt_line(message));
        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => answer.trim().eq_ignore_ascii_case("y"),
            Err(e) => {
                tracing::warn!("could not read confirmation: {e}");
                false
            }
        }
    }

    fn notify(&mut self, message: &str) {
        eprintln!("{}", sanitize_for_terminal(message));
        self.notices.push(message.to_string());
    }

    fn cue(&mut self, _cue: Cue) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_yes_from_input() {
        let mut surface = ConsoleSurface::new(Cursor::new("Y\n"), false);
        assert!(surface.confirm("Delete?"));
    }

    #[test]
    fn anything_else_declines() {
        let mut surface = ConsoleSurface::new(Cursor::new("yes please\n"), false);
        assert!(!surface.confirm("Delete?"));
        // EOF
        assert!(!surface.confirm("Delete?"));
    }

    #[test]
    fn assume_yes_never_reads() {
        let mut surface = ConsoleSurface::new(Cursor::new("n\n"), true);
        assert!(surface.confirm("Delete?"));
        assert!(surface.confirm("Delete?"));
    }

    #[test]
    fn prompt_strips_escape_sequences() {
        let message = "Delete task: \"\u{1b}[2Jpwn\"?";
        let line = prompt_line(message);
        assert!(!line.contains('\u{1b}'));
        assert_eq!(line, "Delete task: \"\u{FFFD}[2Jpwn\"? [y/n] ");

        let mut surface = ConsoleSurface::new(Cursor::new("y\n"), false);
        assert!(surface.confirm(message));
    }

    #[test]
    fn records_notices() {
        let mut surface = ConsoleSurface::new(Cursor::new(""), false);
        surface.notify("No completed tasks to clear!");
        assert_eq!(surface.notices, vec!["No completed tasks to clear!"]);
    }
}
