//! # Details Panel Component
//!
//! Centered overlay for a single Pokémon. Shows a loading line until the
//! details arrive, then height, weight, types and the artwork URL.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::gateway::types::capitalize;
use crate::gateway::{PokemonDetails, PokemonSummary};
use crate::tui::component::Component;

pub struct DetailsPanel<'a> {
    pub summary: &'a PokemonSummary,
    /// Set when the last details fetch failed.
    pub error: Option<&'a str>,
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<9}"), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

/// `"Grass, Poison"`
pub fn format_types(details: &PokemonDetails) -> String {
    details
        .type_names()
        .iter()
        .map(|name| capitalize(name))
        .collect::<Vec<_>>()
        .join(", ")
}

impl DetailsPanel<'_> {
    fn lines(&self) -> Vec<Line<'static>> {
        let summary = self.summary;
        let mut lines = vec![
            Line::from(Span::styled(
                summary.name.clone(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];

        match (&summary.details, self.error) {
            (None, Some(error)) => {
                lines.push(Line::from(Span::styled(
                    format!("Could not load details: {error}"),
                    Style::default().fg(Color::Red),
                )));
                lines.push(Line::from(Span::styled(
                    "Press Enter to retry",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            (None, None) => lines.push(Line::from(Span::styled(
                "Loading details...",
                Style::default().fg(Color::DarkGray),
            ))),
            (Some(details), _) => {
                lines.push(field("Number", format!("#{}", details.id)));
                lines.push(field("Height", format!("{:.1} m", details.height_metres())));
                lines.push(field("Weight", format!("{:.1} kg", details.weight_kilograms())));
                lines.push(field("Types", format_types(details)));
                if let Some(url) = &details.artwork_url {
                    lines.push(field("Artwork", url.clone()));
                }
            }
        }

        lines.push(Line::default());
        let favorite = if summary.favorite {
            Span::styled("★ Favorite", Style::default().fg(Color::Yellow))
        } else {
            Span::styled("☆ Not a favorite", Style::default().fg(Color::DarkGray))
        };
        lines.push(Line::from(favorite));
        lines
    }
}

impl Component for DetailsPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 60, area);

        // Clear underlying content
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" #{} ", self.summary.id))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" f Favorite  s Share  Esc Close ").centered())
            .padding(Padding::horizontal(1));

        let paragraph = Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, overlay);
    }
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{details, summaries};

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_format_types_title_cases() {
        assert_eq!(format_types(&details("bulbasaur", &["grass", "poison"])), "Grass, Poison");
    }

    #[test]
    fn test_lines_without_details_show_loading() {
        let summary = summaries(0, &["bulbasaur"]).remove(0);
        let panel = DetailsPanel { summary: &summary, error: None };
        let rendered = text(&panel.lines());
        assert!(rendered.contains("Loading details..."));
        assert!(rendered.contains("Not a favorite"));
    }

    #[test]
    fn test_lines_after_failure_offer_retry() {
        let summary = summaries(0, &["bulbasaur"]).remove(0);
        let panel = DetailsPanel {
            summary: &summary,
            error: Some("HTTP error! status: 500"),
        };
        let rendered = text(&panel.lines());
        assert!(rendered.contains("Could not load details: HTTP error! status: 500"));
        assert!(rendered.contains("Enter to retry"));
        assert!(!rendered.contains("Loading details..."));
    }

    #[test]
    fn test_lines_with_details_show_units() {
        let mut summary = summaries(0, &["bulbasaur"]).remove(0);
        summary.details = Some(details("bulbasaur", &["grass", "poison"]));
        summary.favorite = true;

        let rendered = text(&DetailsPanel { summary: &summary, error: None }.lines());
        assert!(rendered.contains("0.7 m"));
        assert!(rendered.contains("6.9 kg"));
        assert!(rendered.contains("Grass, Poison"));
        assert!(rendered.contains("https://img.example/bulbasaur.png"));
        assert!(rendered.contains("★ Favorite"));
    }

    #[test]
    fn test_centered_rect_is_inside_outer() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 60, outer);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 30);
        assert_eq!(inner.x, 20);
    }
}
