//! Easing curves.

use core::f64::consts::PI;

/// Named easing curves plus the two parameterized CSS forms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Interpolation {
    #[default]
    Linear,
    QuadraticIn,
    QuadraticOut,
    QuadraticInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuarticIn,
    QuarticOut,
    QuarticInOut,
    QuinticIn,
    QuinticOut,
    QuinticInOut,
    SineIn,
    SineOut,
    SineInOut,
    ExponentialIn,
    ExponentialOut,
    ExponentialInOut,
    CircularIn,
    CircularOut,
    CircularInOut,
    BackIn,
    BackOut,
    BackInOut,
    BounceIn,
    BounceOut,
    BounceInOut,
    ElasticIn,
    ElasticOut,
    ElasticInOut,
    /// `cubic-bezier(x1, y1, x2, y2)`; control points live in the timing
    /// function's parameters.
    CubicBezier,
    /// `steps(n, start|end)`; parameters are `[n, 1.0 if start else 0.0]`.
    Steps,
}

const BACK_OVERSHOOT: f64 = 1.701_58;
const BOUNCE_SCALE: f64 = 7.5625;
const BOUNCE_SPAN: f64 = 2.75;

impl Interpolation {
    /// Look up a named curve. Hyphens and underscores are ignored, so
    /// `quadratic-in-out`, `quadratic_in_out` and `quadraticinout` agree.
    /// Short forms (`quad`, `quart`, `quint`, `expo`, `circ`) are accepted.
    pub fn from_name(name: &str) -> Option<Self> {
        let compact = name
            .chars()
            .filter(|character| *character != '-' && *character != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        let (family, mode) = ["inout", "in", "out"]
            .into_iter()
            .find_map(|suffix| {
                compact
                    .strip_suffix(suffix)
                    .filter(|family| !family.is_empty())
                    .map(|family| (family, suffix))
            })
            .unwrap_or((compact.as_str(), ""));
        let curve = match (family, mode) {
            ("linear", "") => Self::Linear,
            ("quad" | "quadratic", "in") => Self::QuadraticIn,
            ("quad" | "quadratic", "out") => Self::QuadraticOut,
            ("quad" | "quadratic", "inout") => Self::QuadraticInOut,
            ("cubic", "in") => Self::CubicIn,
            ("cubic", "out") => Self::CubicOut,
            ("cubic", "inout") => Self::CubicInOut,
            ("quart" | "quartic", "in") => Self::QuarticIn,
            ("quart" | "quartic", "out") => Self::QuarticOut,
            ("quart" | "quartic", "inout") => Self::QuarticInOut,
            ("quint" | "quintic", "in") => Self::QuinticIn,
            ("quint" | "quintic", "out") => Self::QuinticOut,
            ("quint" | "quintic", "inout") => Self::QuinticInOut,
            ("sine", "in") => Self::SineIn,
            ("sine", "out") => Self::SineOut,
            ("sine", "inout") => Self::SineInOut,
            ("expo" | "exponential", "in") => Self::ExponentialIn,
            ("expo" | "exponential", "out") => Self::ExponentialOut,
            ("expo" | "exponential", "inout") => Self::ExponentialInOut,
            ("circ" | "circular", "in") => Self::CircularIn,
            ("circ" | "circular", "out") => Self::CircularOut,
            ("circ" | "circular", "inout") => Self::CircularInOut,
            ("back", "in") => Self::BackIn,
            ("back", "out") => Self::BackOut,
            ("back", "inout") => Self::BackInOut,
            ("bounce", "in") => Self::BounceIn,
            ("bounce", "out") => Self::BounceOut,
            ("bounce", "inout") => Self::BounceInOut,
            ("elastic", "in") => Self::ElasticIn,
            ("elastic", "out") => Self::ElasticOut,
            ("elastic", "inout") => Self::ElasticInOut,
            _ => return None,
        };
        Some(curve)
    }

    /// Evaluate a parameterless curve at `progress` (clamped to `0..=1`).
    /// The parameterized forms fall back to linear here; evaluate them
    /// through [`crate::TimingFunction::ease`].
    pub fn ease(self, progress: f64) -> f64 {
        let time = progress.clamp(0.0, 1.0);
        match self {
            Self::Linear | Self::CubicBezier | Self::Steps => time,
            Self::QuadraticIn => time.powi(2),
            Self::QuadraticOut => 1.0 - (1.0 - time).powi(2),
            Self::QuadraticInOut => in_out(time, 2),
            Self::CubicIn => time.powi(3),
            Self::CubicOut => 1.0 - (1.0 - time).powi(3),
            Self::CubicInOut => in_out(time, 3),
            Self::QuarticIn => time.powi(4),
            Self::QuarticOut => 1.0 - (1.0 - time).powi(4),
            Self::QuarticInOut => in_out(time, 4),
            Self::QuinticIn => time.powi(5),
            Self::QuinticOut => 1.0 - (1.0 - time).powi(5),
            Self::QuinticInOut => in_out(time, 5),
            Self::SineIn => 1.0 - (time * PI / 2.0).cos(),
            Self::SineOut => (time * PI / 2.0).sin(),
            Self::SineInOut => -((PI * time).cos() - 1.0) / 2.0,
            Self::ExponentialIn => exponential_in(time),
            Self::ExponentialOut => 1.0 - exponential_in(1.0 - time),
            Self::ExponentialInOut => mirror(time, exponential_in),
            Self::CircularIn => 1.0 - (1.0 - time.powi(2)).sqrt(),
            Self::CircularOut => (1.0 - (time - 1.0).powi(2)).sqrt(),
            Self::CircularInOut => mirror(time, |half| 1.0 - (1.0 - half.powi(2)).sqrt()),
            Self::BackIn => back_in(time, BACK_OVERSHOOT),
            Self::BackOut => 1.0 - back_in(1.0 - time, BACK_OVERSHOOT),
            Self::BackInOut => mirror(time, |half| back_in(half, BACK_OVERSHOOT * 1.525)),
            Self::BounceIn => 1.0 - bounce_out(1.0 - time),
            Self::BounceOut => bounce_out(time),
            Self::BounceInOut => mirror(time, |half| 1.0 - bounce_out(1.0 - half)),
            Self::ElasticIn => elastic_in(time),
            Self::ElasticOut => 1.0 - elastic_in(1.0 - time),
            Self::ElasticInOut => mirror(time, elastic_in),
        }
    }
}

/// Symmetric in-out built from an "in" curve: first half runs the curve
/// compressed, second half runs its reflection.
fn mirror(time: f64, curve: impl Fn(f64) -> f64) -> f64 {
    if time < 0.5 {
        curve(time * 2.0) / 2.0
    } else {
        1.0 - curve((1.0 - time) * 2.0) / 2.0
    }
}

fn in_out(time: f64, power: i32) -> f64 {
    mirror(time, |half| half.powi(power))
}

fn exponential_in(time: f64) -> f64 {
    if time <= 0.0 {
        0.0
    } else {
        2.0_f64.powf(10.0_f64.mul_add(time, -10.0))
    }
}

fn back_in(time: f64, overshoot: f64) -> f64 {
    (overshoot + 1.0).mul_add(time.powi(3), -overshoot * time.powi(2))
}

fn bounce_out(time: f64) -> f64 {
    if time < 1.0 / BOUNCE_SPAN {
        BOUNCE_SCALE * time * time
    } else if time < 2.0 / BOUNCE_SPAN {
        let shifted = time - 1.5 / BOUNCE_SPAN;
        BOUNCE_SCALE.mul_add(shifted.powi(2), 0.75)
    } else if time < 2.5 / BOUNCE_SPAN {
        let shifted = time - 2.25 / BOUNCE_SPAN;
        BOUNCE_SCALE.mul_add(shifted.powi(2), 0.9375)
    } else {
        let shifted = time - 2.625 / BOUNCE_SPAN;
        BOUNCE_SCALE.mul_add(shifted.powi(2), 0.984_375)
    }
}

fn elastic_in(time: f64) -> f64 {
    if time <= 0.0 {
        return 0.0;
    }
    if time >= 1.0 {
        return 1.0;
    }
    let period = (2.0 * PI) / 3.0;
    -(2.0_f64.powf(10.0_f64.mul_add(time, -10.0))) * (time.mul_add(10.0, -10.75) * period).sin()
}

/// Polynomial coefficients of one bezier axis with end points 0 and 1.
#[derive(Clone, Copy)]
struct BezierAxis {
    cubic: f64,
    square: f64,
    linear: f64,
}

impl BezierAxis {
    fn new(first: f64, second: f64) -> Self {
        let linear = 3.0 * first;
        let square = 3.0_f64.mul_add(second - first, -linear);
        Self {
            cubic: 1.0 - linear - square,
            square,
            linear,
        }
    }

    fn sample(self, param: f64) -> f64 {
        self.cubic.mul_add(param, self.square).mul_add(param, self.linear) * param
    }

    fn slope(self, param: f64) -> f64 {
        (3.0 * self.cubic)
            .mul_add(param, 2.0 * self.square)
            .mul_add(param, self.linear)
    }
}

/// Evaluate `cubic-bezier(x1, y1, x2, y2)` at `progress`.
///
/// Inverts the x polynomial with Newton-Raphson, falling back to bisection
/// when the slope flattens, then samples y.
pub fn cubic_bezier(progress: f64, control: [f64; 4]) -> f64 {
    let [x1, y1, x2, y2] = control;
    let horizontal = BezierAxis::new(x1, x2);
    let vertical = BezierAxis::new(y1, y2);
    let target = progress.clamp(0.0, 1.0);

    let mut param = target;
    for _ in 0..8 {
        let error = horizontal.sample(param) - target;
        if error.abs() < 1e-7 {
            return vertical.sample(param);
        }
        let derivative = horizontal.slope(param);
        if derivative.abs() < 1e-6 {
            break;
        }
        param = (param - error / derivative).clamp(0.0, 1.0);
    }

    let (mut low, mut high) = (0.0_f64, 1.0_f64);
    param = target;
    for _ in 0..32 {
        let value = horizontal.sample(param);
        if (value - target).abs() < 1e-7 {
            break;
        }
        if value < target {
            low = param;
        } else {
            high = param;
        }
        param = (low + high) / 2.0;
    }
    vertical.sample(param)
}
