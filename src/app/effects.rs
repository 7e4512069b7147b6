use crate::app::{App, Message, Model};

impl App {
    pub(super) fn handle_message_side_effects(&mut self, model: &mut Model, msg: &Message) {
        if matches!(msg, Message::ToggleTheme) {
            let mode = model.edition.toggle_theme(self.prefs.as_mut());
            tracing::info!(theme = mode.label(), "theme toggled");
            crate::perf::log_event("theme.toggle", format!("mode={}", mode.label()));
        }
    }
}
