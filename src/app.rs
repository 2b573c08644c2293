use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::config::Config;
use crate::session::Session;

/// Step for Left/Right nudges
pub const NUDGE_STEP: f64 = 1.0;
/// Step for PageUp/PageDown nudges
pub const NUDGE_STEP_LARGE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Calculator,
    Help,
}

/// What the event loop should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub state: AppState,
    pub show_kmh: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            session: Session::new(config),
            state: AppState::Calculator,
            show_kmh: config.show_kmh,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Flow {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        match self.state {
            AppState::Help => match key.code {
                KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') => {
                    self.state = AppState::Calculator;
                }
                _ => {}
            },
            AppState::Calculator => match key.code {
                KeyCode::Esc => return Flow::Quit,
                KeyCode::F(1) => self.state = AppState::Help,
                KeyCode::Enter => {
                    let phase = self.session.calculate();
                    debug!("calculate triggered: {:?}", phase);
                }
                KeyCode::Tab | KeyCode::Down => self.session.focus_next(),
                KeyCode::BackTab | KeyCode::Up => self.session.focus_prev(),
                KeyCode::Left => self.session.nudge(-NUDGE_STEP),
                KeyCode::Right => self.session.nudge(NUDGE_STEP),
                KeyCode::PageDown => self.session.nudge(-NUDGE_STEP_LARGE),
                KeyCode::PageUp => self.session.nudge(NUDGE_STEP_LARGE),
                KeyCode::Backspace => self.session.backspace(),
                KeyCode::Char('u') if ctrl => self.session.clear_field(),
                KeyCode::Char('r') if ctrl => {
                    self.session.reset();
                }
                KeyCode::Char(c) if !ctrl => self.session.insert_char(c),
                _ => {}
            },
        }

        Flow::Continue
    }
}
