use core::time::Duration;

use css_syntax::{split_top_level, split_top_level_whitespace};
use log::debug;

use crate::{TimingFunction, parse_time};

/// Wildcard property name.
pub const ALL_PROPERTIES: &str = "all";

/// How one property animates.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionDefinition {
    pub property: String,
    pub timing_function: TimingFunction,
    pub delay: Duration,
    pub duration: Duration,
}

impl TransitionDefinition {
    pub fn new(property: &str) -> Self {
        Self {
            property: property.to_ascii_lowercase(),
            timing_function: TimingFunction::default(),
            delay: Duration::ZERO,
            duration: Duration::ZERO,
        }
    }

    /// True when there is nothing to animate.
    pub fn is_instant(&self) -> bool {
        self.duration.is_zero() && self.delay.is_zero()
    }
}

/// Returns true for `transition` and its longhands.
pub fn is_transition_property(name: &str) -> bool {
    name == "transition" || name.starts_with("transition-")
}

/// Transition definitions keyed by property, in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionMap {
    definitions: Vec<TransitionDefinition>,
}

impl TransitionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `definition`, replacing any with the same property.
    pub fn insert(&mut self, definition: TransitionDefinition) {
        if let Some(existing) = self
            .definitions
            .iter_mut()
            .find(|existing| existing.property == definition.property)
        {
            *existing = definition;
        } else {
            self.definitions.push(definition);
        }
    }

    /// Exact entry for `property`.
    pub fn get(&self, property: &str) -> Option<&TransitionDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.property == property)
    }

    /// Entry for `property`, falling back to `all`.
    pub fn lookup(&self, property: &str) -> Option<&TransitionDefinition> {
        self.get(property).or_else(|| self.get(ALL_PROPERTIES))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransitionDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Build a map from the winning `(name, value)` declarations of a node.
    ///
    /// The `transition` shorthand is a comma list of
    /// `[property] [duration] [timing-function] [delay]` in any order; the
    /// first time is the duration and the second the delay. Longhand lists
    /// override the matching field of every entry and repeat cyclically,
    /// as CSS does; `transition-property` decides how many entries there are.
    /// Other names are ignored.
    pub fn from_declarations<'decl, I>(declarations: I) -> Self
    where
        I: IntoIterator<Item = (&'decl str, &'decl str)>,
    {
        let mut shorthand: Option<&str> = None;
        let mut properties: Option<&str> = None;
        let mut durations: Option<&str> = None;
        let mut delays: Option<&str> = None;
        let mut timings: Option<&str> = None;
        for (name, value) in declarations {
            match name {
                "transition" => shorthand = Some(value),
                "transition-property" => properties = Some(value),
                "transition-duration" => durations = Some(value),
                "transition-delay" => delays = Some(value),
                "transition-timing-function" => timings = Some(value),
                _ => {}
            }
        }

        let mut entries = shorthand.map(parse_shorthand_list).unwrap_or_default();
        if let Some(list) = properties.map(non_empty_items) {
            entries = list
                .iter()
                .enumerate()
                .map(|(index, property)| {
                    let mut entry = cyclic(&entries, index)
                        .cloned()
                        .unwrap_or_else(|| TransitionDefinition::new(property));
                    entry.property = property.to_ascii_lowercase();
                    entry
                })
                .collect();
        }
        if let Some(list) = durations.map(non_empty_items) {
            override_field(&mut entries, &list, |entry, text| {
                if let Some(duration) = parse_time(text) {
                    entry.duration = duration;
                }
            });
        }
        if let Some(list) = delays.map(non_empty_items) {
            override_field(&mut entries, &list, |entry, text| {
                if let Some(delay) = parse_time(text) {
                    entry.delay = delay;
                }
            });
        }
        if let Some(list) = timings.map(non_empty_items) {
            override_field(&mut entries, &list, |entry, text| {
                if let Some(timing) = TimingFunction::parse(text) {
                    entry.timing_function = timing;
                }
            });
        }

        let mut map = Self::new();
        for entry in entries {
            if entry.property == "none" || entry.property.is_empty() {
                continue;
            }
            map.insert(entry);
        }
        map
    }
}

pub(crate) fn non_empty_items(value: &str) -> Vec<String> {
    split_top_level(value, ',')
        .into_iter()
        .filter(|item| !item.is_empty())
        .collect()
}

/// Item `index` of a list that repeats to cover any length.
pub(crate) fn cyclic<T>(items: &[T], index: usize) -> Option<&T> {
    index.checked_rem(items.len()).and_then(|slot| items.get(slot))
}

/// Apply a longhand list to every entry, cycling the list.
pub(crate) fn override_field<T>(
    entries: &mut [T],
    values: &[String],
    mut apply: impl FnMut(&mut T, &str),
) {
    for (index, entry) in entries.iter_mut().enumerate() {
        if let Some(text) = cyclic(values, index) {
            apply(entry, text);
        }
    }
}

fn parse_shorthand_list(value: &str) -> Vec<TransitionDefinition> {
    non_empty_items(value)
        .iter()
        .filter_map(|item| parse_shorthand_item(item))
        .collect()
}

fn parse_shorthand_item(item: &str) -> Option<TransitionDefinition> {
    let mut definition = TransitionDefinition::new(ALL_PROPERTIES);
    let mut seen_duration = false;
    let mut seen_delay = false;
    let mut seen_property = false;
    for token in split_top_level_whitespace(item) {
        if let Some(time) = parse_time(&token) {
            if !seen_duration {
                definition.duration = time;
                seen_duration = true;
            } else if !seen_delay {
                definition.delay = time;
                seen_delay = true;
            } else {
                debug!(target: "css::transitions", "extra time {token:?} in {item:?}");
            }
        } else if let Some(timing) = TimingFunction::parse(&token) {
            definition.timing_function = timing;
        } else if !seen_property {
            definition.property = token.to_ascii_lowercase();
            seen_property = true;
        } else {
            debug!(target: "css::transitions", "dropping transition item {item:?}");
            return None;
        }
    }
    Some(definition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Interpolation;

    /// Shorthand tokens may appear in any order.
    ///
    /// # Errors
    /// Returns an error if an expected entry is missing.
    #[test]
    fn shorthand_order() -> Result<(), Box<dyn core::error::Error>> {
        let map = TransitionMap::from_declarations([(
            "transition",
            "ease-out 1s opacity 50ms, color 200ms",
        )]);
        assert_eq!(map.len(), 2);
        let opacity = map.get("opacity").ok_or("opacity")?;
        assert_eq!(opacity.duration, Duration::from_secs(1));
        assert_eq!(opacity.delay, Duration::from_millis(50));
        assert_eq!(opacity.timing_function.interpolation, Interpolation::CubicBezier);
        let color = map.get("color").ok_or("color")?;
        assert_eq!(color.timing_function, TimingFunction::default());
        Ok(())
    }

    /// Longhands repeat cyclically over the property list.
    ///
    /// # Errors
    /// Returns an error if an expected entry is missing.
    #[test]
    fn longhand_cycling() -> Result<(), Box<dyn core::error::Error>> {
        let map = TransitionMap::from_declarations([
            ("transition-property", "color, opacity, rotation"),
            ("transition-duration", "100ms, 300ms"),
            ("transition-timing-function", "bounce-in"),
        ]);
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("rotation").ok_or("rotation")?.duration, Duration::from_millis(100));
        assert_eq!(map.get("opacity").ok_or("opacity")?.duration, Duration::from_millis(300));
        assert_eq!(
            map.get("opacity").ok_or("opacity")?.timing_function.interpolation,
            Interpolation::BounceIn
        );
        Ok(())
    }

    /// `all` is the fallback and `none` disables.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn wildcard_and_none() {
        let map = TransitionMap::from_declarations([("transition", "1s")]);
        assert!(map.lookup("background-color").is_some());
        let none = TransitionMap::from_declarations([("transition", "none")]);
        assert!(none.is_empty());
    }
}
