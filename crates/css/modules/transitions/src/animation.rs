use core::time::Duration;

use css_syntax::split_top_level_whitespace;
use log::debug;

use crate::definition::{cyclic, non_empty_items, override_field};
use crate::{TimingFunction, parse_time};

/// Playback direction of an animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimationDirection {
    #[default]
    Normal,
    Reverse,
    Alternate,
    AlternateReverse,
}

impl AnimationDirection {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "reverse" => Some(Self::Reverse),
            "alternate" => Some(Self::Alternate),
            "alternate-reverse" => Some(Self::AlternateReverse),
            _ => None,
        }
    }
}

/// Which keyframe values apply outside the active period.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillMode {
    #[default]
    None,
    Forwards,
    Backwards,
    Both,
}

impl FillMode {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "forwards" => Some(Self::Forwards),
            "backwards" => Some(Self::Backwards),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

/// How many times an animation runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IterationCount {
    Finite(u32),
    Infinite,
}

impl Default for IterationCount {
    fn default() -> Self {
        Self::Finite(1)
    }
}

impl IterationCount {
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("infinite") {
            return Some(Self::Infinite);
        }
        trimmed.parse::<u32>().ok().map(Self::Finite)
    }
}

/// One `animation` entry: a keyframe set name and how to play it.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationDefinition {
    /// Name of the `@keyframes` set, as written.
    pub name: String,
    pub duration: Duration,
    pub delay: Duration,
    pub timing_function: TimingFunction,
    pub iterations: IterationCount,
    pub direction: AnimationDirection,
    pub fill_mode: FillMode,
    pub paused: bool,
}

impl AnimationDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            duration: Duration::ZERO,
            delay: Duration::ZERO,
            timing_function: TimingFunction::default(),
            iterations: IterationCount::default(),
            direction: AnimationDirection::default(),
            fill_mode: FillMode::default(),
            paused: false,
        }
    }
}

/// Returns true for `animation` and its longhands.
pub fn is_animation_property(name: &str) -> bool {
    name == "animation" || name.starts_with("animation-")
}

/// Animation definitions keyed by name, in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimationMap {
    definitions: Vec<AnimationDefinition>,
}

impl AnimationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `definition`, replacing any with the same name.
    pub fn insert(&mut self, definition: AnimationDefinition) {
        if let Some(existing) = self
            .definitions
            .iter_mut()
            .find(|existing| existing.name == definition.name)
        {
            *existing = definition;
        } else {
            self.definitions.push(definition);
        }
    }

    pub fn get(&self, name: &str) -> Option<&AnimationDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnimationDefinition> {
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
    /// The `animation` shorthand is a comma list whose items hold a name,
    /// up to two times (duration, then delay), a timing function, an
    /// iteration count, a direction, a fill mode and a play state in any
    /// order. `animation-name` decides how many entries there are; the
    /// other longhands override the matching field and repeat cyclically.
    pub fn from_declarations<'decl, I>(declarations: I) -> Self
    where
        I: IntoIterator<Item = (&'decl str, &'decl str)>,
    {
        let mut shorthand: Option<&str> = None;
        let mut names: Option<&str> = None;
        let mut longhands: Vec<(&str, &str)> = Vec::new();
        for (name, value) in declarations {
            match name {
                "animation" => shorthand = Some(value),
                "animation-name" => names = Some(value),
                _ if is_animation_property(name) => longhands.push((name, value)),
                _ => {}
            }
        }

        let mut entries = shorthand.map(parse_shorthand_list).unwrap_or_default();
        if let Some(list) = names.map(non_empty_items) {
            entries = list
                .iter()
                .enumerate()
                .map(|(index, name)| {
                    let mut entry = cyclic(&entries, index)
                        .cloned()
                        .unwrap_or_else(|| AnimationDefinition::new(name));
                    name.clone_into(&mut entry.name);
                    entry
                })
                .collect();
        }
        for (name, value) in longhands {
            let list = non_empty_items(value);
            match name {
                "animation-duration" => override_field(&mut entries, &list, |entry, text| {
                    if let Some(duration) = parse_time(text) {
                        entry.duration = duration;
                    }
                }),
                "animation-delay" => override_field(&mut entries, &list, |entry, text| {
                    if let Some(delay) = parse_time(text) {
                        entry.delay = delay;
                    }
                }),
                "animation-timing-function" => {
                    override_field(&mut entries, &list, |entry, text| {
                        if let Some(timing) = TimingFunction::parse(text) {
                            entry.timing_function = timing;
                        }
                    });
                }
                "animation-iteration-count" => {
                    override_field(&mut entries, &list, |entry, text| {
                        if let Some(iterations) = IterationCount::parse(text) {
                            entry.iterations = iterations;
                        }
                    });
                }
                "animation-direction" => override_field(&mut entries, &list, |entry, text| {
                    if let Some(direction) = AnimationDirection::parse(text) {
                        entry.direction = direction;
                    }
                }),
                "animation-fill-mode" => override_field(&mut entries, &list, |entry, text| {
                    if let Some(fill_mode) = FillMode::parse(text) {
                        entry.fill_mode = fill_mode;
                    }
                }),
                "animation-play-state" => override_field(&mut entries, &list, |entry, text| {
                    entry.paused = text.trim().eq_ignore_ascii_case("paused");
                }),
                _ => debug!(target: "css::transitions", "ignoring {name}"),
            }
        }

        let mut map = Self::new();
        for entry in entries {
            if entry.name.is_empty() || entry.name.eq_ignore_ascii_case("none") {
                continue;
            }
            map.insert(entry);
        }
        map
    }
}

fn parse_shorthand_list(value: &str) -> Vec<AnimationDefinition> {
    non_empty_items(value)
        .iter()
        .filter_map(|item| parse_shorthand_item(item))
        .collect()
}

fn parse_shorthand_item(item: &str) -> Option<AnimationDefinition> {
    let mut definition = AnimationDefinition::new("");
    let mut seen_duration = false;
    let mut seen_delay = false;
    let mut seen_name = false;
    for token in split_top_level_whitespace(item) {
        let lowered = token.to_ascii_lowercase();
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
        } else if lowered == "paused" || lowered == "running" {
            definition.paused = lowered == "paused";
        } else if let Some(direction) = AnimationDirection::parse(&lowered) {
            definition.direction = direction;
        } else if let Some(fill_mode) = FillMode::parse(&lowered) {
            definition.fill_mode = fill_mode;
        } else if let Some(iterations) = IterationCount::parse(&lowered) {
            definition.iterations = iterations;
        } else if let Some(timing) = TimingFunction::parse(&lowered) {
            definition.timing_function = timing;
        } else if !seen_name {
            definition.name = token;
            seen_name = true;
        } else {
            debug!(target: "css::transitions", "dropping animation item {item:?}");
            return None;
        }
    }
    Some(definition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Interpolation;

    /// Every shorthand component lands in its field, in any order.
    ///
    /// # Errors
    /// Returns an error if the entry is missing.
    #[test]
    fn shorthand_components() -> Result<(), Box<dyn core::error::Error>> {
        let map = AnimationMap::from_declarations([(
            "animation",
            "2s Pulse bounce-out 100ms infinite alternate both paused",
        )]);
        let pulse = map.get("Pulse").ok_or("Pulse")?;
        assert_eq!(pulse.duration, Duration::from_secs(2));
        assert_eq!(pulse.delay, Duration::from_millis(100));
        assert_eq!(pulse.timing_function.interpolation, Interpolation::BounceOut);
        assert_eq!(pulse.iterations, IterationCount::Infinite);
        assert_eq!(pulse.direction, AnimationDirection::Alternate);
        assert_eq!(pulse.fill_mode, FillMode::Both);
        assert!(pulse.paused);
        Ok(())
    }

    /// `animation-name` sets the entries; other longhands cycle over them.
    ///
    /// # Errors
    /// Returns an error if an entry is missing.
    #[test]
    fn longhands_cycle_over_names() -> Result<(), Box<dyn core::error::Error>> {
        let map = AnimationMap::from_declarations([
            ("animation-name", "fade, spin, grow"),
            ("animation-duration", "1s, 250ms"),
            ("animation-iteration-count", "3"),
            ("animation-direction", "reverse, normal"),
            ("animation-play-state", "running"),
        ]);
        assert_eq!(map.len(), 3);
        let grow = map.get("grow").ok_or("grow")?;
        assert_eq!(grow.duration, Duration::from_secs(1));
        assert_eq!(grow.iterations, IterationCount::Finite(3));
        assert_eq!(grow.direction, AnimationDirection::Reverse);
        let spin = map.get("spin").ok_or("spin")?;
        assert_eq!(spin.duration, Duration::from_millis(250));
        assert!(!spin.paused);
        Ok(())
    }

    /// Longhands refine shorthand entries and `none` disables.
    ///
    /// # Errors
    /// Returns an error if an entry is missing.
    #[test]
    fn longhand_over_shorthand_and_none() -> Result<(), Box<dyn core::error::Error>> {
        let map = AnimationMap::from_declarations([
            ("animation", "fade 1s, spin 2s linear"),
            ("animation-fill-mode", "forwards"),
        ]);
        assert_eq!(map.len(), 2);
        let spin = map.get("spin").ok_or("spin")?;
        assert_eq!(spin.duration, Duration::from_secs(2));
        assert_eq!(spin.fill_mode, FillMode::Forwards);
        assert!(AnimationMap::from_declarations([("animation", "none")]).is_empty());
        assert!(AnimationMap::from_declarations([("animation-name", "none")]).is_empty());
        Ok(())
    }
}
