//! # Landing Page Component
//!
//! Full-area splash shown when there is no list to draw: the welcome
//! screen, the first-load spinner, an empty result or a load error.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::component::Component;

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

#[derive(Debug, Clone, PartialEq)]
pub enum Splash {
    Welcome,
    Loading { frame_index: usize },
    Empty,
    Error(String),
}

pub struct LandingPage {
    splash: Splash,
}

impl LandingPage {
    pub fn new(splash: Splash) -> Self {
        Self { splash }
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let heading = |text: String, color: Color| {
            Line::from(Span::styled(
                text,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        };
        let hint = |text: &str| {
            Line::from(Span::styled(text.to_string(), Style::default().fg(Color::DarkGray)))
        };

        match &self.splash {
            Splash::Welcome => vec![
                heading("Welcome to the Pokédex!".to_string(), Color::Red),
                Line::default(),
                hint("Press any key to start exploring"),
                hint("q to quit"),
                Line::default(),
                hint(&format!("v{}", env!("CARGO_PKG_VERSION"))),
            ],
            Splash::Loading { frame_index } => vec![heading(
                format!("{} Loading Pokémon...", SPINNER[frame_index % SPINNER.len()]),
                Color::Cyan,
            )],
            Splash::Empty => vec![
                heading("No Pokémon found".to_string(), Color::Yellow),
                hint("Press any key to reload, q to quit"),
            ],
            Splash::Error(message) => vec![
                heading("Could not load the Pokédex".to_string(), Color::Red),
                Line::from(message.clone()),
                Line::default(),
                hint("Press any key to retry, q to quit"),
            ],
        }
    }
}

impl Component for LandingPage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines();
        let [text_area] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, text_area);
    }
}
