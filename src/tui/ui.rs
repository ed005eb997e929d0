use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{DetailsPanel, LandingPage, PokemonList, Splash, TitleBar};
use crate::tui::{Screen, Tab, TuiState, visible_entries};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

const HELP: [(&str, &str); 8] = [
    ("↑↓", "Move"),
    ("Enter", "Details"),
    ("f", "Favorite"),
    ("s", "Share"),
    ("m", "More"),
    ("/", "Search"),
    ("Tab", "Favorites"),
    ("q", "Quit"),
];

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, bottom_area] = layout.areas(frame.area());

    TitleBar {
        status_message: &app.status_message,
        is_loading: app.store.is_loading(),
        spinner_frame,
        tab: tui.tab,
        list_count: app.store.list().len(),
        favorite_count: app.store.favorites().len(),
    }
    .render(frame, title_area);

    // Main area - splash OR list (+ details overlay)
    match splash_for(app, tui, spinner_frame) {
        Some(splash) => LandingPage::new(splash).render(frame, main_area),
        None => draw_browse_area(frame, main_area, app, tui),
    }

    if tui.search.active || tui.search.is_filtering() {
        tui.search.render(frame, bottom_area);
    } else if tui.screen == Screen::Browse {
        frame.render_widget(help_line(), bottom_area);
    }
}

/// Which splash replaces the list, if any.
fn splash_for(app: &App, tui: &TuiState, spinner_frame: usize) -> Option<Splash> {
    if tui.screen == Screen::Welcome {
        return Some(Splash::Welcome);
    }
    if !app.store.list().is_empty() {
        return None;
    }
    if app.store.is_loading() {
        Some(Splash::Loading {
            frame_index: spinner_frame,
        })
    } else if let Some(error) = &app.error {
        Some(Splash::Error(error.clone()))
    } else {
        Some(Splash::Empty)
    }
}

fn draw_browse_area(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let entries = visible_entries(app, tui);

    let mut title = match tui.tab {
        Tab::All => "All Pokémon".to_string(),
        Tab::Favorites => "★ Favorites".to_string(),
    };
    if tui.search.is_filtering() {
        title.push_str(&format!(" matching \"{}\"", tui.search.query));
    }
    let empty_message = if tui.search.is_filtering() {
        "No Pokémon match your search"
    } else {
        match tui.tab {
            Tab::All => "No Pokémon loaded",
            Tab::Favorites => "No favorites yet. Press f on a Pokémon to add one.",
        }
    };

    PokemonList {
        entries: &entries,
        state: &mut tui.list,
        title: &title,
        empty_message,
    }
    .render(frame, area);

    if let Some(summary) = tui.details.and_then(|id| app.store.get(id)) {
        DetailsPanel {
            summary,
            error: app.details_error(&summary.name),
        }
        .render(frame, area);
    }
}

fn help_line() -> Line<'static> {
    let mut spans = Vec::with_capacity(HELP.len() * 2);
    for (key, label) in HELP {
        spans.push(Span::styled(format!(" {key}"), Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(format!(" {label} "), Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}
