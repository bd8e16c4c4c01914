use core::fmt;

use css_syntax::parse_function;
use log::debug;
use smallvec::SmallVec;

use crate::easing::{Interpolation, cubic_bezier};

const EASE: [f64; 4] = [0.25, 0.1, 0.25, 1.0];
const EASE_IN: [f64; 4] = [0.42, 0.0, 1.0, 1.0];
const EASE_OUT: [f64; 4] = [0.0, 0.0, 0.58, 1.0];
const EASE_IN_OUT: [f64; 4] = [0.42, 0.0, 0.58, 1.0];

/// Where a `steps()` function jumps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepPosition {
    Start,
    End,
}

/// An easing curve plus its parameters.
///
/// `CubicBezier` carries `[x1, y1, x2, y2]`; `Steps` carries
/// `[count, 1.0]` for a start jump and `[count, 0.0]` for an end jump.
/// Named curves carry nothing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimingFunction {
    pub interpolation: Interpolation,
    pub parameters: SmallVec<f64, 4>,
}

impl TimingFunction {
    pub fn new(interpolation: Interpolation) -> Self {
        Self {
            interpolation,
            parameters: SmallVec::new(),
        }
    }

    pub fn cubic_bezier(control: [f64; 4]) -> Self {
        Self {
            interpolation: Interpolation::CubicBezier,
            parameters: SmallVec::from(control),
        }
    }

    pub fn steps(count: u32, position: StepPosition) -> Self {
        let start = match position {
            StepPosition::Start => 1.0,
            StepPosition::End => 0.0,
        };
        Self {
            interpolation: Interpolation::Steps,
            parameters: SmallVec::from([f64::from(count.max(1)), start]),
        }
    }

    /// Parse a timing-function token: a CSS keyword (`ease`, `ease-in`,
    /// `step-start` ...), `cubic-bezier(...)`, `steps(...)`, or a named
    /// curve such as `bounce-out`.
    pub fn parse(text: &str) -> Option<Self> {
        let lowered = text.trim().to_ascii_lowercase();
        let keyword = match lowered.as_str() {
            "linear" => Some(Self::new(Interpolation::Linear)),
            "ease" => Some(Self::cubic_bezier(EASE)),
            "ease-in" => Some(Self::cubic_bezier(EASE_IN)),
            "ease-out" => Some(Self::cubic_bezier(EASE_OUT)),
            "ease-in-out" => Some(Self::cubic_bezier(EASE_IN_OUT)),
            "step-start" => Some(Self::steps(1, StepPosition::Start)),
            "step-end" => Some(Self::steps(1, StepPosition::End)),
            _ => None,
        };
        if keyword.is_some() {
            return keyword;
        }
        if lowered.contains('(') {
            return Self::parse_function_form(&lowered);
        }
        Interpolation::from_name(&lowered).map(Self::new)
    }

    fn parse_function_form(text: &str) -> Option<Self> {
        let function = parse_function(text)?;
        match function.name.as_str() {
            "cubic-bezier" => {
                let numbers: Vec<f64> = function
                    .args
                    .iter()
                    .filter_map(|arg| arg.text.trim().parse::<f64>().ok())
                    .collect();
                let [x1, y1, x2, y2] = <[f64; 4]>::try_from(numbers).ok()?;
                if function.args.len() != 4
                    || !(0.0..=1.0).contains(&x1)
                    || !(0.0..=1.0).contains(&x2)
                {
                    debug!(target: "css::transitions", "invalid cubic-bezier: {text}");
                    return None;
                }
                Some(Self::cubic_bezier([x1, y1, x2, y2]))
            }
            "steps" => {
                let count = function
                    .arg(0)?
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|count| *count > 0)?;
                let position = match function.arg(1).map(str::trim) {
                    None | Some("end" | "jump-end") => StepPosition::End,
                    Some("start" | "jump-start") => StepPosition::Start,
                    Some(other) => {
                        debug!(target: "css::transitions", "unknown step position {other:?}");
                        return None;
                    }
                };
                Some(Self::steps(count, position))
            }
            other => {
                debug!(target: "css::transitions", "unknown timing function {other:?}");
                None
            }
        }
    }

    /// Eased progress for linear `progress` in `0..=1`.
    pub fn ease(&self, progress: f64) -> f64 {
        let time = progress.clamp(0.0, 1.0);
        match self.interpolation {
            Interpolation::CubicBezier => match self.parameters.as_slice() {
                &[x1, y1, x2, y2] => cubic_bezier(time, [x1, y1, x2, y2]),
                _ => time,
            },
            Interpolation::Steps => {
                let count = self.parameters.first().copied().unwrap_or(1.0).max(1.0);
                let jumps_at_start = self.parameters.get(1).is_some_and(|flag| *flag > 0.0);
                if time >= 1.0 {
                    return 1.0;
                }
                let step = (time * count).floor();
                if jumps_at_start {
                    ((step + 1.0) / count).min(1.0)
                } else {
                    step / count
                }
            }
            curve => curve.ease(time),
        }
    }
}

impl fmt::Display for TimingFunction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.interpolation, self.parameters.as_slice()) {
            (Interpolation::CubicBezier, &[x1, y1, x2, y2]) => {
                write!(formatter, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
            (Interpolation::Steps, &[count, start]) => {
                let position = if start > 0.0 { "start" } else { "end" };
                write!(formatter, "steps({count}, {position})")
            }
            (interpolation, _) => write!(formatter, "{interpolation:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Keywords map to bezier control points; named curves keep their variant.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn keywords_and_names() {
        assert_eq!(TimingFunction::parse("ease-in"), Some(TimingFunction::cubic_bezier(EASE_IN)));
        assert_eq!(
            TimingFunction::parse("LINEAR"),
            Some(TimingFunction::new(Interpolation::Linear))
        );
        assert_eq!(
            TimingFunction::parse("bounce-out"),
            Some(TimingFunction::new(Interpolation::BounceOut))
        );
        assert_eq!(TimingFunction::parse("color"), None);
        assert_eq!(TimingFunction::parse("200ms"), None);
    }

    /// Function forms validate their arguments.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn function_forms() {
        assert_eq!(
            TimingFunction::parse("cubic-bezier(0.1, 0.7, 1.0, 0.1)"),
            Some(TimingFunction::cubic_bezier([0.1, 0.7, 1.0, 0.1]))
        );
        assert_eq!(TimingFunction::parse("cubic-bezier(2, 0, 1, 1)"), None);
        assert_eq!(TimingFunction::parse("cubic-bezier(0, 0, 1)"), None);
        assert_eq!(
            TimingFunction::parse("steps(4, start)"),
            Some(TimingFunction::steps(4, StepPosition::Start))
        );
        assert_eq!(
            TimingFunction::parse("steps(4)"),
            Some(TimingFunction::steps(4, StepPosition::End))
        );
        assert_eq!(TimingFunction::parse("steps(0)"), None);
    }

    /// Steps jump at the right edges.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn step_evaluation() {
        let end = TimingFunction::steps(4, StepPosition::End);
        assert!((end.ease(0.0) - 0.0).abs() < f64::EPSILON);
        assert!((end.ease(0.3) - 0.25).abs() < f64::EPSILON);
        assert!((end.ease(1.0) - 1.0).abs() < f64::EPSILON);
        let start = TimingFunction::steps(4, StepPosition::Start);
        assert!((start.ease(0.0) - 0.25).abs() < f64::EPSILON);
        assert!((start.ease(0.8) - 1.0).abs() < f64::EPSILON);
    }
}
