//! Keyboard input handling.
//!
//! Maps terminal key events to [`App`] actions.  There are three modes,
//! checked in order: the add-feed prompt captures all typing, the open menu
//! captures navigation and Enter, and otherwise keys scroll the entry list.
//!
//! ## For contributors
//!
//! To add a new keybinding:
//!
//! 1. Add a method on [`App`] (or the reader) for the action.
//! 2. Add a `KeyCode` match arm in the right mode below.
//! 3. Update the help text in [`crate::ui`].

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::App;
use crate::source::FeedFetcher;

/// Process a single key event, updating app state accordingly.
///
/// Only reacts to key-press events (ignoring release / repeat) so that each
/// physical keypress triggers exactly one action.
pub fn handle_key_event<F: FeedFetcher + 'static>(app: &mut App<F>, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.prompt.is_some() {
        match key.code {
            KeyCode::Esc => app.cancel_prompt(),
            KeyCode::Enter => app.prompt_submit(),
            KeyCode::Backspace => app.prompt_backspace(),
            KeyCode::Char(c) => app.prompt_push(c),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit = true,
        KeyCode::Char('m') => app.reader.menu_mut().toggle(),
        KeyCode::Char('a') => app.open_prompt(),
        _ if app.reader.menu().is_open() => handle_menu_key(app, key.code),
        KeyCode::Esc => app.quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.reader.renderer_mut().select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.reader.renderer_mut().select_previous(),
        KeyCode::Home | KeyCode::Char('g') => app.reader.renderer_mut().select_first(),
        KeyCode::End | KeyCode::Char('G') => app.reader.renderer_mut().select_last(),
        _ => {}
    }
}

fn handle_menu_key<F: FeedFetcher + 'static>(app: &mut App<F>, code: KeyCode) {
    if code == KeyCode::Enter {
        app.activate_selected();
        return;
    }

    let menu = app.reader.menu_mut();
    match code {
        KeyCode::Esc => menu.close(),
        KeyCode::Down | KeyCode::Char('j') => menu.select_next(),
        KeyCode::Up | KeyCode::Char('k') => menu.select_previous(),
        KeyCode::Home | KeyCode::Char('g') => menu.select_first(),
        KeyCode::End | KeyCode::Char('G') => menu.select_last(),
        _ => {}
    }
}
