use css_properties::PropertyRegistry;
use css_selectors::Specificity;
use css_syntax::{RawKeyframes, split_top_level};
use log::debug;

use crate::{Declaration, DeclarationBlock};

/// Declarations that apply at one point of an animation.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe {
    offset: f64,
    block: DeclarationBlock,
}

impl Keyframe {
    /// Position in the animation, `0.0` for `from` to `1.0` for `to`.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn declarations(&self) -> &[Declaration] {
        self.block.declarations()
    }

    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.block.declaration(name)
    }
}

/// Parse a keyframe offset: `from`, `to` or a percentage in `0%..=100%`.
pub fn parse_keyframe_offset(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("from") {
        return Some(0.0);
    }
    if trimmed.eq_ignore_ascii_case("to") {
        return Some(1.0);
    }
    let percent = trimmed.strip_suffix('%')?.trim().parse::<f64>().ok()?;
    (0.0..=100.0)
        .contains(&percent)
        .then_some(percent / 100.0)
}

/// A named `@keyframes` set with its frames sorted by offset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyframesDefinition {
    name: String,
    keyframes: Vec<Keyframe>,
    marker: u32,
}

impl KeyframesDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }

    /// Build a set from parsed text. Declarations are normalized through
    /// the registry like rule declarations. Frames with an invalid offset
    /// are dropped.
    pub fn from_raw(raw: &RawKeyframes, registry: &PropertyRegistry) -> Self {
        let mut definition = Self::new(&raw.name);
        for frame in &raw.frames {
            let mut block = DeclarationBlock::default();
            for declaration in &frame.declarations {
                block.push(
                    &declaration.name,
                    &declaration.value,
                    declaration.important,
                    Specificity::default(),
                    registry,
                );
            }
            for piece in split_top_level(&frame.prelude, ',') {
                match parse_keyframe_offset(&piece) {
                    Some(offset) => definition.insert_block(offset, block.clone()),
                    None => debug!(
                        target: "css::cascade",
                        "dropping keyframe {piece:?} in @keyframes {}",
                        raw.name
                    ),
                }
            }
        }
        definition
    }

    /// Add declarations at `offset` (clamped to `0..=1`). A frame already
    /// at that offset takes the new declarations over its own.
    pub fn insert_block(&mut self, offset: f64, block: DeclarationBlock) {
        let offset = offset.clamp(0.0, 1.0);
        let existing = self
            .keyframes
            .iter_mut()
            .find(|keyframe| (keyframe.offset - offset).abs() < f64::EPSILON);
        if let Some(keyframe) = existing {
            keyframe.block.merge_from(block);
            return;
        }
        let position = self
            .keyframes
            .partition_point(|keyframe| keyframe.offset <= offset);
        self.keyframes.insert(position, Keyframe { offset, block });
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Frames in ascending offset order.
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Distinct property names animated by any frame, in first-seen order.
    pub fn properties(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for declaration in self.keyframes.iter().flat_map(Keyframe::declarations) {
            if !names.contains(&declaration.name.as_str()) {
                names.push(&declaration.name);
            }
        }
        names
    }

    pub fn marker(&self) -> u32 {
        self.marker
    }

    pub fn set_marker(&mut self, marker: u32) {
        self.marker = marker;
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `from`, `to` and percentages map to offsets; out-of-range ones fail.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn offsets() {
        assert_eq!(parse_keyframe_offset("FROM"), Some(0.0));
        assert_eq!(parse_keyframe_offset(" to "), Some(1.0));
        assert_eq!(parse_keyframe_offset("25%"), Some(0.25));
        assert_eq!(parse_keyframe_offset("150%"), None);
        assert_eq!(parse_keyframe_offset("-5%"), None);
        assert_eq!(parse_keyframe_offset("half"), None);
    }
}
