//! Property transitions and keyframe animations: timing functions,
//! transition and animation definitions, and the diff that turns changed
//! property values into animation requests.
//!
//! Time is never advanced here. A host animation system receives
//! [`TransitionRequest`]s and [`AnimationDefinition`]s and samples
//! [`TimingFunction::ease`] itself.

#![forbid(unsafe_code)]

mod animation;
mod definition;
mod easing;
mod request;
mod time;
mod timing;

pub use animation::{
    AnimationDefinition, AnimationDirection, AnimationMap, FillMode, IterationCount,
    is_animation_property,
};
pub use definition::{
    ALL_PROPERTIES, TransitionDefinition, TransitionMap, is_transition_property,
};
pub use easing::{Interpolation, cubic_bezier};
pub use request::{PropertyChange, TransitionRequest, collect_transition_requests};
pub use time::parse_time;
pub use timing::{StepPosition, TimingFunction};
