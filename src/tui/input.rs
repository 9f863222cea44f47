use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::Backend;

use crate::io::store::KeyValueStore;
use crate::model::filter::Filter;
use crate::ops::task_list::TaskList;
use crate::util::text::{next_grapheme_boundary, prev_grapheme_boundary, word_boundary_left};

use super::app::{InputLine, Mode};
use super::surface::TuiSurface;

/// Handle a key event in the current mode
pub fn handle_key<S: KeyValueStore, B: Backend>(
    list: &mut TaskList<S>,
    surface: &mut TuiSurface<'_, B>,
    key: KeyEvent,
) {
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    surface.app.notice = None;

    if surface.app.show_help {
        // Any key closes help
        surface.app.show_help = false;
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        surface.app.should_quit = true;
        return;
    }

    match surface.app.mode {
        Mode::Navigate => handle_navigate(list, surface, key),
        Mode::Edit => handle_edit(list, surface, key),
        // Prompts are answered inside the surface's own loop
        Mode::Confirm => {}
    }
}

fn handle_navigate<S: KeyValueStore, B: Backend>(
    list: &mut TaskList<S>,
    surface: &mut TuiSurface<'_, B>,
    key: KeyEvent,
) {
    let selected = surface.app.selected_id();
    let app = &mut *surface.app;
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('a' | 'i') | KeyCode::Char('/') => app.mode = Mode::Edit,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('j') | KeyCode::Down => {
            if app.cursor + 1 < app.view.rows.len() {
                app.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => app.cursor = app.cursor.saturating_sub(1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor = app.view.rows.len().saturating_sub(1);
        }
        KeyCode::Char('p') => app.priority = app.priority.next(),
        KeyCode::Char(' ' | 'x') => {
            if let Some(id) = selected {
                list.toggle_task(surface, id);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = selected {
                list.delete_task(surface, id);
            }
        }
        KeyCode::Char('C') => {
            list.clear_completed(surface);
        }
        KeyCode::Char('f') => {
            let next = list.filter().next();
            list.select_filter(surface, next);
        }
        KeyCode::Char(c @ '1'..='4') => {
            let idx = (c as usize) - ('1' as usize);
            list.select_filter(surface, Filter::ALL[idx]);
        }
        _ => {}
    }
}

fn handle_edit<S: KeyValueStore, B: Backend>(
    list: &mut TaskList<S>,
    surface: &mut TuiSurface<'_, B>,
    key: KeyEvent,
) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => surface.app.mode = Mode::Navigate,
        (_, KeyCode::Enter) => {
            let text = surface.app.input.buffer.clone();
            let priority = surface.app.priority;
            list.add_task(surface, &text, priority);
        }
        (_, KeyCode::Tab) => surface.app.priority = surface.app.priority.next(),
        (_, KeyCode::BackTab) => {
            surface.app.priority = surface.app.priority.next().next();
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => surface.app.input.clear(),
        (KeyModifiers::CONTROL, KeyCode::Char('w')) => delete_word_back(&mut surface.app.input),
        (KeyModifiers::CONTROL, KeyCode::Char('a')) => surface.app.input.cursor = 0,
        (KeyModifiers::CONTROL, KeyCode::Char('e')) => {
            surface.app.input.cursor = surface.app.input.buffer.len();
        }
        (_, KeyCode::Backspace) => delete_back(&mut surface.app.input),
        (_, KeyCode::Delete) => delete_forward(&mut surface.app.input),
        (_, KeyCode::Left) => {
            let input = &mut surface.app.input;
            if let Some(prev) = prev_grapheme_boundary(&input.buffer, input.cursor) {
                input.cursor = prev;
            }
        }
        (_, KeyCode::Right) => {
            let input = &mut surface.app.input;
            if let Some(next) = next_grapheme_boundary(&input.buffer, input.cursor) {
                input.cursor = next;
            }
        }
        (_, KeyCode::Home) => surface.app.input.cursor = 0,
        (_, KeyCode::End) => surface.app.input.cursor = surface.app.input.buffer.len(),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            let input = &mut surface.app.input;
            input.buffer.insert(input.cursor, c);
            input.cursor += c.len_utf8();
        }
        _ => {}
    }
}

fn delete_back(input: &mut InputLine) {
    if let Some(prev) = prev_grapheme_boundary(&input.buffer, input.cursor) {
        input.buffer.replace_range(prev..input.cursor, "");
        input.cursor = prev;
    }
}

fn delete_forward(input: &mut InputLine) {
    if let Some(next) = next_grapheme_boundary(&input.buffer, input.cursor) {
        input.buffer.replace_range(input.cursor..next, "");
    }
}

fn delete_word_back(input: &mut InputLine) {
    let start = word_boundary_left(&input.buffer, input.cursor);
    input.buffer.replace_range(start..input.cursor, "");
    input.cursor = start;
}
