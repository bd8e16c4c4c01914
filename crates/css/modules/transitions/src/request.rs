use core::time::Duration;

use log::{debug, trace};

use crate::{TimingFunction, TransitionMap, is_animation_property, is_transition_property};

/// A property whose computed value changed between two style passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyChange<'value> {
    pub property: &'value str,
    pub old_value: &'value str,
    pub new_value: &'value str,
}

/// An animation the host should run from `old_value` to `new_value`.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionRequest {
    pub property: String,
    pub old_value: String,
    pub new_value: String,
    pub delay: Duration,
    pub duration: Duration,
    pub timing_function: TimingFunction,
}

/// One request per change covered by `transitions`.
///
/// Unchanged values, the transition and animation properties, and changes
/// whose definition has neither duration nor delay produce nothing.
pub fn collect_transition_requests<'value, I>(
    changes: I,
    transitions: &TransitionMap,
) -> Vec<TransitionRequest>
where
    I: IntoIterator<Item = PropertyChange<'value>>,
{
    if transitions.is_empty() {
        return Vec::new();
    }
    let mut requests = Vec::new();
    for change in changes {
        if change.old_value == change.new_value
            || is_transition_property(change.property)
            || is_animation_property(change.property)
        {
            continue;
        }
        let Some(definition) = transitions.lookup(change.property) else {
            continue;
        };
        if definition.is_instant() {
            trace!(target: "css::transitions", "{} changes instantly", change.property);
            continue;
        }
        debug!(
            target: "css::transitions",
            "transition {}: {:?} -> {:?} over {:?}",
            change.property,
            change.old_value,
            change.new_value,
            definition.duration
        );
        requests.push(TransitionRequest {
            property: change.property.to_owned(),
            old_value: change.old_value.to_owned(),
            new_value: change.new_value.to_owned(),
            delay: definition.delay,
            duration: definition.duration,
            timing_function: definition.timing_function.clone(),
        });
    }
    requests
}
