//! # TitleBar Component
//!
//! Top status bar: app name, tab counters, a spinner while a page is loading
//! and the latest status message.
//!
//! Stateless: it renders whatever props it is given.
//!
//! ```text
//!  Pokédex │ All (40) · ★ Favorites (3) │ ⠙ Loading more Pokémon...
//! ```

use crate::tui::Tab;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct TitleBar<'a> {
    pub status_message: &'a str,
    pub is_loading: bool,
    pub spinner_frame: usize,
    pub tab: Tab,
    pub list_count: usize,
    pub favorite_count: usize,
}

impl TitleBar<'_> {
    fn tab_style(&self, tab: Tab) -> Style {
        if self.tab == tab {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    pub fn line(&self) -> Line<'static> {
        let separator = Span::styled(" │ ", Style::default().fg(Color::DarkGray));
        let mut spans = vec![
            Span::styled(
                " Pokédex",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            separator.clone(),
            Span::styled(format!("All ({})", self.list_count), self.tab_style(Tab::All)),
            Span::styled(" · ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("★ Favorites ({})", self.favorite_count),
                self.tab_style(Tab::Favorites),
            ),
        ];

        if self.is_loading || !self.status_message.is_empty() {
            spans.push(separator);
        }
        if self.is_loading {
            let frame = SPINNER[self.spinner_frame % SPINNER.len()];
            spans.push(Span::styled(format!("{frame} "), Style::default().fg(Color::Cyan)));
        }
        if !self.status_message.is_empty() {
            spans.push(Span::raw(self.status_message.to_string()));
        }

        Line::from(spans)
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.line(), area);
    }
}
