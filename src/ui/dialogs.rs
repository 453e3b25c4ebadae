//! Modal dialogs via the native message-box API.
//!
//! Every user-facing error and confirmation goes through these, so the
//! whole surface stays synchronous: a dialog blocks until dismissed.

use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

pub fn error(title: &str, text: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(title)
        .set_description(text)
        .show();
}

pub fn info(title: &str, text: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title(title)
        .set_description(text)
        .show();
}

/// Yes/No question; returns true on Yes.
pub fn confirm(title: &str, text: &str) -> bool {
    MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title(title)
        .set_description(text)
        .set_buttons(MessageButtons::YesNo)
        .show()
        == MessageDialogResult::Yes
}
