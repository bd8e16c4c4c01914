//! The closed set of pseudo-classes and a compact bitmask over it.

use core::fmt;

/// Supported pseudo-classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PseudoClass {
    Hover,
    Focus,
    FocusWithin,
    Selected,
    /// Also spelled `:active`.
    Pressed,
    Disabled,
    Enabled,
    Checked,
    FirstChild,
    LastChild,
    OnlyChild,
    Root,
    Empty,
}

impl PseudoClass {
    pub const ALL: [Self; 13] = [
        Self::Hover,
        Self::Focus,
        Self::FocusWithin,
        Self::Selected,
        Self::Pressed,
        Self::Disabled,
        Self::Enabled,
        Self::Checked,
        Self::FirstChild,
        Self::LastChild,
        Self::OnlyChild,
        Self::Root,
        Self::Empty,
    ];

    /// Look up a pseudo-class by name, ASCII case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let lowered = name.to_ascii_lowercase();
        let pseudo = match lowered.as_str() {
            "hover" => Self::Hover,
            "focus" => Self::Focus,
            "focus-within" => Self::FocusWithin,
            "selected" => Self::Selected,
            "pressed" | "active" => Self::Pressed,
            "disabled" => Self::Disabled,
            "enabled" => Self::Enabled,
            "checked" => Self::Checked,
            "first-child" => Self::FirstChild,
            "last-child" => Self::LastChild,
            "only-child" => Self::OnlyChild,
            "root" => Self::Root,
            "empty" => Self::Empty,
            _ => return None,
        };
        Some(pseudo)
    }

    /// Canonical name without the leading colon.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hover => "hover",
            Self::Focus => "focus",
            Self::FocusWithin => "focus-within",
            Self::Selected => "selected",
            Self::Pressed => "pressed",
            Self::Disabled => "disabled",
            Self::Enabled => "enabled",
            Self::Checked => "checked",
            Self::FirstChild => "first-child",
            Self::LastChild => "last-child",
            Self::OnlyChild => "only-child",
            Self::Root => "root",
            Self::Empty => "empty",
        }
    }

    /// True for classes derived from tree shape rather than node state.
    pub const fn is_structural(self) -> bool {
        matches!(
            self,
            Self::FirstChild | Self::LastChild | Self::OnlyChild | Self::Root | Self::Empty
        )
    }

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for PseudoClass {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Bitmask of [`PseudoClass`] values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PseudoClassSet(u16);

impl PseudoClassSet {
    pub const EMPTY: Self = Self(0);

    pub const fn contains(self, pseudo: PseudoClass) -> bool {
        self.0 & pseudo.bit() != 0
    }

    pub const fn with(self, pseudo: PseudoClass) -> Self {
        Self(self.0 | pseudo.bit())
    }

    pub const fn without(self, pseudo: PseudoClass) -> Self {
        Self(self.0 & !pseudo.bit())
    }

    pub fn insert(&mut self, pseudo: PseudoClass) {
        *self = self.with(pseudo);
    }

    pub fn remove(&mut self, pseudo: PseudoClass) {
        *self = self.without(pseudo);
    }

    /// Set or clear `pseudo`. Returns whether the set changed.
    pub fn set(&mut self, pseudo: PseudoClass, enabled: bool) -> bool {
        let before = *self;
        if enabled {
            self.insert(pseudo);
        } else {
            self.remove(pseudo);
        }
        before != *self
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = PseudoClass> {
        PseudoClass::ALL
            .into_iter()
            .filter(move |pseudo| self.contains(*pseudo))
    }
}

impl FromIterator<PseudoClass> for PseudoClassSet {
    fn from_iter<I: IntoIterator<Item = PseudoClass>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `active` aliases `pressed` and names are case-insensitive.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn aliases_and_case() {
        assert_eq!(PseudoClass::from_name("ACTIVE"), Some(PseudoClass::Pressed));
        assert_eq!(PseudoClass::from_name("Hover"), Some(PseudoClass::Hover));
        assert_eq!(PseudoClass::from_name("visited"), None);
    }

    /// Setting a flag twice reports a change only once.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn set_reports_changes() {
        let mut set = PseudoClassSet::EMPTY;
        assert!(set.set(PseudoClass::Hover, true));
        assert!(!set.set(PseudoClass::Hover, true));
        assert!(set.contains(PseudoClass::Hover));
        assert!(!set.contains(PseudoClass::Focus));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![PseudoClass::Hover]);
        assert!(set.set(PseudoClass::Hover, false));
        assert!(set.is_empty());
    }
}
