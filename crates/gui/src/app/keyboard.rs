//! Keyboard shortcut handling

use eframe::egui;
use shared::ToolMode;

use crate::state::AppState;
use crate::viewport::ViewportPanel;

const TOOL_KEYS: [(egui::Key, ToolMode); 5] = [
    (egui::Key::Q, ToolMode::Select),
    (egui::Key::W, ToolMode::Move),
    (egui::Key::E, ToolMode::Rotate),
    (egui::Key::R, ToolMode::Scale),
    (egui::Key::M, ToolMode::Measure),
];

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(
    ctx: &egui::Context,
    state: &mut AppState,
    viewport: &mut ViewportPanel,
) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    ctx.input(|i| {
        if i.modifiers.command {
            return;
        }
        for (key, tool) in TOOL_KEYS {
            if i.key_pressed(key) {
                state.set_tool(tool);
            }
        }
        // Escape: cancel pending measurement and deselect
        if i.key_pressed(egui::Key::Escape) {
            viewport.cancel_pending();
            state.selection.clear();
        }
    });
}
