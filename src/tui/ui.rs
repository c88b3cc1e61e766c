use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ChatPanel, Heading, ToastStack, UploadForm};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

const UPLOAD_HINTS: &str = "Enter submit · Esc quit";
const CHAT_HINTS: &str = "Enter send · Ctrl+R voice · Esc quit";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [heading_area, _, body_area] =
        Layout::vertical([Length(1), Length(1), Min(0)]).areas(frame.area());

    let hints = if app.chat_visible { CHAT_HINTS } else { UPLOAD_HINTS };
    let document = app.selected_file().map(|f| f.file_name());
    Heading::new(document, hints).render(frame, heading_area);

    if app.chat_visible {
        tui.upload.input.focused = false;
        tui.chat.input.focused = true;
        ChatPanel::new(
            &mut tui.chat,
            app.messages(),
            app.listening(),
            app.voice.is_available(),
        )
        .render(frame, body_area);
    } else {
        tui.upload.input.focused = true;
        UploadForm::new(&mut tui.upload, &app.accepted_extensions).render(frame, body_area);
    }

    // Toasts overlay everything, drawn last
    ToastStack::new(&app.toasts).render(frame, frame.area());
}
