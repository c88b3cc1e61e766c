pub mod button;
pub mod chat_panel;
pub mod heading;
pub mod input_box;
pub mod message_bubble;
pub mod toast;
pub mod upload_form;

pub use chat_panel::{ChatEvent, ChatPanel, ChatPanelState};
pub use heading::Heading;
pub use toast::ToastStack;
pub use upload_form::{UploadEvent, UploadForm, UploadFormState};
