use ratatui::Frame;
use ratatui::layout::{Position, Rect};

/// Something that draws itself into a region of the frame.
///
/// Components get their data as props (struct fields) and may borrow
/// persistent state mutably so they can record layout (scroll extents,
/// button positions) while rendering.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Turns low-level terminal events into a component's high-level events.
pub trait EventHandler {
    /// What this component reports to its parent.
    type Event;

    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}

/// Whether a mouse position falls inside a rendered area.
pub fn hit(area: Rect, column: u16, row: u16) -> bool {
    area.contains(Position::new(column, row))
}
