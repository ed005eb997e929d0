//! # Pokémon List Component
//!
//! Scrollable list of summaries with a cursor, used for both the "All" and
//! "Favorites" tabs.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `PokemonListState` lives in `TuiState` and survives between frames
//! - `PokemonList` is created each frame with borrowed state and entries

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::gateway::PokemonSummary;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PAGE_JUMP: usize = 10;
const NAME_COLUMN_WIDTH: usize = 18;

/// Events emitted by the list cursor.
#[derive(Debug, PartialEq)]
pub enum ListEvent {
    Moved,
    /// Cursor tried to move past the last entry.
    ReachedEnd,
}

#[derive(Default)]
pub struct PokemonListState {
    pub selected: usize,
    /// Number of entries shown in the last frame.
    pub len: usize,
    pub list_state: ListState,
}

impl PokemonListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the cursor inside `len` entries.
    pub fn clamp(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        *self.list_state.offset_mut() = 0;
        self.clamp(self.len);
    }

    fn move_to(&mut self, index: usize) -> Option<ListEvent> {
        if self.len == 0 {
            return None;
        }
        self.selected = index.min(self.len - 1);
        self.list_state.select(Some(self.selected));
        Some(ListEvent::Moved)
    }
}

impl EventHandler for PokemonListState {
    type Event = ListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ListEvent> {
        match event {
            TuiEvent::CursorUp => self.move_to(self.selected.saturating_sub(1)),
            TuiEvent::CursorDown => {
                if self.len > 0 && self.selected + 1 >= self.len {
                    Some(ListEvent::ReachedEnd)
                } else {
                    self.move_to(self.selected + 1)
                }
            }
            TuiEvent::PageUp => self.move_to(self.selected.saturating_sub(PAGE_JUMP)),
            TuiEvent::PageDown => self.move_to(self.selected + PAGE_JUMP),
            _ => None,
        }
    }
}

/// `#  25  Pikachu            ★ 0.4 m`
fn entry_line(summary: &PokemonSummary) -> Line<'static> {
    let name_width = summary.name.width();
    let padding = " ".repeat(NAME_COLUMN_WIDTH.saturating_sub(name_width));
    let star = if summary.favorite { "★" } else { " " };

    let mut spans = vec![
        Span::styled(format!("#{:>4}  ", summary.id), Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}{}", summary.name, padding)),
        Span::styled(format!(" {star}"), Style::default().fg(Color::Yellow)),
    ];
    if let Some(details) = &summary.details {
        spans.push(Span::styled(
            format!("  {}", details.type_names().join("/")),
            Style::default().fg(Color::Green),
        ));
    }
    Line::from(spans)
}

pub struct PokemonList<'a> {
    pub entries: &'a [&'a PokemonSummary],
    pub state: &'a mut PokemonListState,
    pub title: &'a str,
    pub empty_message: &'a str,
}

impl Component for PokemonList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.title))
            .padding(Padding::horizontal(1));

        self.state.clamp(self.entries.len());

        if self.entries.is_empty() {
            let empty = Paragraph::new(self.empty_message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|summary| ListItem::new(entry_line(summary)))
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
