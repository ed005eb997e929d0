//! # Search Bar Component
//!
//! One-line name filter opened with `/`. While active it captures typing;
//! Enter keeps the filter, Esc clears it.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::gateway::PokemonSummary;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, PartialEq)]
pub enum SearchEvent {
    Changed,
    Done,
    Cleared,
}

#[derive(Default)]
pub struct SearchBar {
    pub query: String,
    pub active: bool,
}

impl SearchBar {
    pub fn open(&mut self) {
        self.active = true;
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.active = false;
    }

    pub fn is_filtering(&self) -> bool {
        !self.query.is_empty()
    }

    /// Case-insensitive substring match on the name.
    pub fn matches(&self, summary: &PokemonSummary) -> bool {
        self.query.is_empty()
            || summary
                .name
                .to_lowercase()
                .contains(&self.query.to_lowercase())
    }
}

impl EventHandler for SearchBar {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SearchEvent> {
        if !self.active {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                self.query.push(*c);
                Some(SearchEvent::Changed)
            }
            TuiEvent::Backspace => {
                self.query.pop();
                Some(SearchEvent::Changed)
            }
            TuiEvent::Submit => {
                self.active = false;
                Some(SearchEvent::Done)
            }
            TuiEvent::Escape => {
                self.clear();
                Some(SearchEvent::Cleared)
            }
            _ => None,
        }
    }
}

impl Component for SearchBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let prompt_style = if self.active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let line = Line::from(vec![
            Span::styled(" / ", prompt_style),
            Span::raw(self.query.as_str()),
        ]);
        frame.render_widget(line, area);

        if self.active {
            let x = area.x + 3 + self.query.width() as u16;
            frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(1)), area.y));
        }
    }
}
