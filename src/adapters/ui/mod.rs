pub mod banner;
pub mod notifier;
pub mod render;
pub mod tui;

pub use notifier::TerminalNotifier;

/// Prints the welcome banner and applies the emerald theme for all subsequent inquire prompts.
/// Call once at startup (e.g. in main after tracing init).
pub fn init_ui() {
    banner::print_welcome();
    tui::apply_theme();
}
