use ratatui::Frame;
use ratatui::layout::Rect;

use super::event::TuiEvent;

/// Something that draws itself into a region of the frame.
///
/// Props arrive as struct fields (a summary to show, counters for the title
/// bar). Long-lived state such as the list cursor is owned by `TuiState` and
/// borrowed for the frame.
///
/// `render` takes `&mut self` because stateful widgets like `ListState`
/// update their scroll offset while drawing.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Turns raw key events into component-level events (cursor moved, search
/// changed). Returns `None` for keys the component does not care about.
pub trait EventHandler {
    type Event;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
