use ratatui::Frame;

use crate::app::{App, AppState};
use crate::ui::render_help;

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Inputs, result card and both sweep charts
pub struct CalculatorScreen;

impl Screen for CalculatorScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
    }
}

/// Key bindings and the formula
pub struct HelpScreen;

impl Screen for HelpScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_help(app, f.area(), f.buffer_mut());
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Calculator => Box::new(CalculatorScreen),
        AppState::Help => Box::new(HelpScreen),
    }
}
