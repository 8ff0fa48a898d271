//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).
//!
//! ## For contributors
//!
//! * The layout is a heading line, the entry list and a one-line status bar.
//!   When the menu is open it takes a fixed-width column on the left of the
//!   entry list.
//! * Colours and styles are defined inline.
//! * [`ratatui`] is the TUI framework; see its docs for widget details.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, PromptField};
use crate::source::FeedFetcher;

const MENU_WIDTH: u16 = 28;

/// Draw the complete UI for one frame.
pub fn draw<F: FeedFetcher + 'static>(app: &mut App<F>, frame: &mut Frame) {
    let [heading_area, main_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_heading(app, frame, heading_area);

    if app.reader.menu().is_open() {
        let [menu_area, entries_area] =
            Layout::horizontal([Constraint::Length(MENU_WIDTH), Constraint::Min(1)])
                .areas(main_area);
        draw_menu(app, frame, menu_area);
        draw_entries(app, frame, entries_area);
    } else {
        draw_entries(app, frame, main_area);
    }

    draw_status_bar(app, frame, status_area);
}

fn draw_heading<F: FeedFetcher + 'static>(app: &App<F>, frame: &mut Frame, area: Rect) {
    let heading = Paragraph::new(Line::from(vec![
        Span::styled(" ☰ ", Style::default().fg(Color::Cyan)),
        Span::styled(
            app.reader.heading().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]));
    frame.render_widget(heading, area);
}

/// Render the feed menu.  Feeds added at runtime are shown in green.
fn draw_menu<F: FeedFetcher + 'static>(app: &mut App<F>, frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = app
        .reader
        .menu()
        .items()
        .iter()
        .map(|item| {
            let color = if item.custom { Color::Green } else { Color::White };
            ListItem::new(Span::styled(item.label.clone(), Style::default().fg(color)))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title(" All Feeds ").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.reader.menu_mut().list_state);
}

/// Render the entries of the most recently loaded feed.
///
/// Until the first load renders, the block is marked as not loaded so an
/// empty feed can be told apart from one still in flight.
fn draw_entries<F: FeedFetcher + 'static>(app: &mut App<F>, frame: &mut Frame, area: Rect) {
    let title = if app.reader.renderer().rendered().is_some() {
        " Entries "
    } else {
        " Entries (not loaded) "
    };
    let items: Vec<ListItem> = app
        .reader
        .entries()
        .iter()
        .map(|entry| {
            let mut lines = vec![Line::from(vec![
                Span::styled(
                    format!("{:<18}", entry.date_label()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(" "),
                Span::styled(entry.title.clone(), Style::default().fg(Color::White)),
            ])];
            if let Some(snippet) = &entry.snippet {
                lines.push(Line::from(Span::styled(
                    format!("{:<19}{}", "", snippet),
                    Style::default().fg(Color::Gray),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.reader.renderer_mut().list_state);
}

/// Render the bottom status bar, or the add-feed prompt when it is open.
fn draw_status_bar<F: FeedFetcher + 'static>(app: &App<F>, frame: &mut Frame, area: Rect) {
    let line = match &app.prompt {
        Some(prompt) => {
            let label = match prompt.field {
                PromptField::Url => "Feed URL: ",
                PromptField::Name => "Feed name: ",
            };
            Line::from(vec![
                Span::styled(format!(" {label}"), Style::default().fg(Color::Yellow)),
                Span::raw(format!("{}_", prompt.buffer())),
                Span::raw("  Enter: next  Esc: cancel"),
            ])
        }
        None => {
            let link = selected_link(app).unwrap_or_default();
            Line::from(vec![
                Span::raw(" "),
                Span::styled(app.status_line(), Style::default().fg(Color::Yellow)),
                Span::raw("  "),
                Span::styled(link, Style::default().fg(Color::Cyan)),
                Span::raw("  q: quit  m: menu  a: add feed  ↑/↓: scroll"),
            ])
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn selected_link<F: FeedFetcher + 'static>(app: &App<F>) -> Option<String> {
    let index = app.reader.renderer().list_state.selected()?;
    app.reader.entries().get(index)?.link.clone()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::reader::FeedReader;
    use crate::source::testing::FakeFetcher;

    fn app() -> App<FakeFetcher> {
        let (reader, _rx) = FeedReader::new(
            [("http://x/tech.xml", "Tech"), ("http://x/news.xml", "News")],
            Arc::new(FakeFetcher::new()),
        )
        .unwrap();
        App::new(reader)
    }

    fn screen(app: &mut App<FakeFetcher>) -> String {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(app, f)).unwrap();
        let buf = terminal.backend().buffer().clone();
        buf.content()
            .iter()
            .map(|c| c.symbol().chars().next().unwrap_or(' '))
            .collect()
    }

    #[test]
    fn draw_does_not_panic_with_no_entries() {
        let mut app = app();
        let text = screen(&mut app);
        assert!(text.contains("Feeds"));
        assert!(text.contains("Entries"));
    }

    #[test]
    fn closed_menu_is_not_drawn() {
        let mut app = app();
        let text = screen(&mut app);
        assert!(!text.contains("All Feeds"));
    }

    #[test]
    fn open_menu_lists_feeds() {
        let mut app = app();
        app.reader.menu_mut().open();
        let text = screen(&mut app);
        assert!(text.contains("All Feeds"));
        assert!(text.contains("Tech"));
        assert!(text.contains("News"));
    }

    #[test]
    fn registered_feed_appears_in_menu() {
        let mut app = app();
        app.reader.register("http://x/sport.xml", "Sport").unwrap();
        app.reader.menu_mut().open();
        let text = screen(&mut app);
        assert!(text.contains("Sport"));
    }

    #[test]
    fn prompt_replaces_status_bar() {
        let mut app = app();
        app.open_prompt();
        app.prompt_push('h');
        let text = screen(&mut app);
        assert!(text.contains("Feed URL: h_"));
    }

    #[test]
    fn status_bar_shows_help() {
        let mut app = app();
        app.status = "OK".to_string();
        let text = screen(&mut app);
        assert!(text.contains("OK"));
        assert!(text.contains("a: add feed"));
    }

    #[tokio::test]
    async fn settled_entries_are_drawn() {
        let fetcher = FakeFetcher::new().with_entries("http://x/tech.xml", &["Hello world"]);
        let (mut reader, mut rx) =
            FeedReader::new([("http://x/tech.xml", "Tech")], Arc::new(fetcher)).unwrap();
        reader.load(0, Box::new(|| {})).unwrap();
        reader.settle(rx.recv().await.unwrap());
        let mut app = App::new(reader);

        let text = screen(&mut app);
        assert!(text.contains("Hello world"));
        assert!(text.contains("Tech"));
        assert!(!text.contains("not loaded"));
    }

    #[test]
    fn entries_marked_not_loaded_before_first_render() {
        let mut app = app();
        let text = screen(&mut app);
        assert!(text.contains("Entries (not loaded)"));
    }

    #[tokio::test]
    async fn empty_feed_is_drawn_as_loaded() {
        let fetcher = FakeFetcher::new().with_entries("http://x/tech.xml", &[]);
        let (mut reader, mut rx) =
            FeedReader::new([("http://x/tech.xml", "Tech")], Arc::new(fetcher)).unwrap();
        reader.load(0, Box::new(|| {})).unwrap();
        reader.settle(rx.recv().await.unwrap());
        let mut app = App::new(reader);

        let text = screen(&mut app);
        assert!(text.contains("Entries"));
        assert!(!text.contains("not loaded"));
    }
}
