use tracing::{debug, info};

use crate::calculator::{self, CalculationResult, SampledSeries, ValidationError};
use crate::config::Config;
use crate::util::format_plain;

/// Range of the distance slider (m)
pub const DISTANCE_SLIDER: (f64, f64) = (0.0, 1000.0);
/// Range of the time slider (s)
pub const TIME_SLIDER: (f64, f64) = (1.0, 120.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Field {
    Distance,
    Time,
}

impl Field {
    pub fn other(self) -> Self {
        match self {
            Field::Distance => Field::Time,
            Field::Time => Field::Distance,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Field::Distance => "m",
            Field::Time => "s",
        }
    }

    /// (min, max) of the slider bound to this field
    pub fn slider_range(self) -> (f64, f64) {
        match self {
            Field::Distance => DISTANCE_SLIDER,
            Field::Time => TIME_SLIDER,
        }
    }

    /// Slider position for the raw text: the parsed value, or the slider
    /// minimum when the text is not a usable number.
    pub fn slider_value(self, raw: &str) -> f64 {
        let (min, max) = self.slider_range();
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v != 0.0 => v.clamp(min, max),
            _ => min,
        }
    }
}

/// Raw text of both inputs, exactly as typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    pub distance: String,
    pub time: String,
}

impl Inputs {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Distance => &self.distance,
            Field::Time => &self.time,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Distance => &mut self.distance,
            Field::Time => &mut self.time,
        }
    }
}

impl From<&Config> for Inputs {
    fn from(cfg: &Config) -> Self {
        Self {
            distance: cfg.distance.clone(),
            time: cfg.time.clone(),
        }
    }
}

/// The last computed pair of sweeps
#[derive(Debug, Clone, PartialEq)]
pub struct Sweeps {
    pub over_time: SampledSeries,
    pub over_distance: SampledSeries,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Valid,
    Invalid(ValidationError),
}

/// UI-held calculator state. The core functions stay pure; this is where the
/// current text, the last result and the last error live between triggers.
#[derive(Debug, Clone)]
pub struct Session {
    defaults: Inputs,
    pub inputs: Inputs,
    pub focus: Field,
    pub result: Option<CalculationResult>,
    pub error: Option<ValidationError>,
    /// Kept across failed triggers so the charts keep the last valid sweep
    pub sweeps: Option<Sweeps>,
    /// Inputs edited since the last trigger
    pub dirty: bool,
}

impl Session {
    /// Build from config and run the initial calculation on the defaults
    pub fn new(cfg: &Config) -> Self {
        let defaults = Inputs::from(cfg);
        let mut session = Self {
            inputs: defaults.clone(),
            defaults,
            focus: Field::Distance,
            result: None,
            error: None,
            sweeps: None,
            dirty: false,
        };
        session.calculate();
        session
    }

    pub fn phase(&self) -> Phase {
        match self.error {
            Some(err) => Phase::Invalid(err),
            None => Phase::Valid,
        }
    }

    /// Explicit trigger: validate the current text and refresh the outputs
    pub fn calculate(&mut self) -> Phase {
        self.dirty = false;
        match calculator::calculate(&self.inputs.distance, &self.inputs.time) {
            Ok(calc) => {
                debug!(
                    distance = calc.result.distance,
                    time = calc.result.time,
                    speed = calc.result.speed,
                    "calculated"
                );
                self.result = Some(calc.result);
                self.error = None;
                self.sweeps = Some(Sweeps {
                    over_time: calc.over_time,
                    over_distance: calc.over_distance,
                });
            }
            Err(err) => {
                info!(
                    distance = %self.inputs.distance,
                    time = %self.inputs.time,
                    "rejected input: {}",
                    err
                );
                self.result = None;
                self.error = Some(err);
            }
        }
        self.phase()
    }

    pub fn focused_text(&self) -> &str {
        self.inputs.get(self.focus)
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.other();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.other();
    }

    pub fn insert_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        self.inputs.get_mut(self.focus).push(c);
        self.dirty = true;
    }

    pub fn backspace(&mut self) {
        if self.inputs.get_mut(self.focus).pop().is_some() {
            self.dirty = true;
        }
    }

    pub fn clear_field(&mut self) {
        let text = self.inputs.get_mut(self.focus);
        if !text.is_empty() {
            text.clear();
            self.dirty = true;
        }
    }

    /// Move the focused field's slider by `delta`, clamped to its range.
    /// Does not recalculate.
    pub fn nudge(&mut self, delta: f64) {
        let field = self.focus;
        let (min, max) = field.slider_range();
        let next = (field.slider_value(self.inputs.get(field)) + delta).clamp(min, max);
        let text = format_plain(next);
        let slot = self.inputs.get_mut(field);
        if *slot != text {
            *slot = text;
            self.dirty = true;
        }
    }

    /// Restore the configured defaults and recalculate
    pub fn reset(&mut self) -> Phase {
        self.inputs = self.defaults.clone();
        self.focus = Field::Distance;
        self.calculate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::SWEEP_POINTS;

    fn session() -> Session {
        Session::new(&Config::default())
    }

    #[test]
    fn new_session_is_calculated_from_defaults() {
        let s = session();
        assert_eq!(s.phase(), Phase::Valid);
        assert_eq!(s.result.unwrap().speed, 10.0);
        let sweeps = s.sweeps.as_ref().unwrap();
        assert_eq!(sweeps.over_time.len(), SWEEP_POINTS);
        assert_eq!(sweeps.over_distance.len(), SWEEP_POINTS);
        assert!(!s.dirty);
    }

    #[test]
    fn invalid_defaults_start_invalid_without_sweeps() {
        let cfg = Config {
            distance: "10".into(),
            time: "0".into(),
            show_kmh: true,
        };
        let s = Session::new(&cfg);
        assert_eq!(s.phase(), Phase::Invalid(ValidationError::NonPositiveTime));
        assert!(s.result.is_none());
        assert!(s.sweeps.is_none());
    }

    #[test]
    fn failure_clears_result_but_keeps_sweeps() {
        let mut s = session();
        let before = s.sweeps.clone();

        s.focus = Field::Time;
        s.clear_field();
        s.insert_char('-');
        s.insert_char('1');
        assert!(s.dirty);

        assert_eq!(
            s.calculate(),
            Phase::Invalid(ValidationError::NonPositiveTime)
        );
        assert!(s.result.is_none());
        assert_eq!(s.sweeps, before);
        assert!(!s.dirty);
    }

    #[test]
    fn success_after_failure_clears_error() {
        let mut s = session();
        s.inputs.distance = "xyz".into();
        assert_eq!(s.calculate(), Phase::Invalid(ValidationError::NonNumeric));

        s.inputs.distance = "50".into();
        assert_eq!(s.calculate(), Phase::Valid);
        assert!(s.error.is_none());
        assert_eq!(s.result.unwrap().speed, 5.0);
    }

    #[test]
    fn editing_does_not_recalculate() {
        let mut s = session();
        s.backspace();
        assert_eq!(s.inputs.distance, "10");
        assert_eq!(s.result.unwrap().distance, 100.0);
        assert!(s.dirty);
    }

    #[test]
    fn control_chars_are_ignored() {
        let mut s = session();
        s.insert_char('\n');
        assert_eq!(s.inputs.distance, "100");
        assert!(!s.dirty);
    }

    #[test]
    fn focus_toggles_between_fields() {
        let mut s = session();
        assert_eq!(s.focus, Field::Distance);
        s.focus_next();
        assert_eq!(s.focus, Field::Time);
        assert_eq!(s.focused_text(), "10");
        s.focus_prev();
        assert_eq!(s.focus, Field::Distance);
    }

    #[test]
    fn nudge_clamps_to_slider_range() {
        let mut s = session();
        s.nudge(10.0);
        assert_eq!(s.inputs.distance, "110");
        s.nudge(5000.0);
        assert_eq!(s.inputs.distance, "1000");

        s.focus = Field::Time;
        s.nudge(-100.0);
        assert_eq!(s.inputs.time, "1");
        s.nudge(1.0);
        assert_eq!(s.inputs.time, "2");
    }

    #[test]
    fn nudge_from_garbage_starts_at_slider_minimum() {
        let mut s = session();
        s.inputs.distance = "abc".into();
        s.nudge(1.0);
        assert_eq!(s.inputs.distance, "1");

        s.focus = Field::Time;
        s.inputs.time = String::new();
        s.nudge(1.0);
        assert_eq!(s.inputs.time, "2");
    }

    #[test]
    fn nudge_at_bound_is_not_an_edit() {
        let mut s = session();
        s.focus = Field::Time;
        s.inputs.time = "120".into();
        s.nudge(1.0);
        assert_eq!(s.inputs.time, "120");
        assert!(!s.dirty);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut s = session();
        s.inputs.distance = "-5".into();
        s.calculate();
        s.focus = Field::Time;

        assert_eq!(s.reset(), Phase::Valid);
        assert_eq!(s.inputs.distance, "100");
        assert_eq!(s.focus, Field::Distance);
        assert_eq!(s.result.unwrap().speed, 10.0);
    }

    #[test]
    fn field_display_and_units() {
        assert_eq!(Field::Distance.to_string(), "Distance");
        assert_eq!(Field::Time.unit(), "s");
        assert_eq!(Field::Time.slider_value("0"), 1.0);
        assert_eq!(Field::Distance.slider_value("2000"), 1000.0);
    }
}
