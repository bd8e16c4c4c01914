//! Selector specificity.

use crate::{CompoundSelector, Selector, SimpleSelector};

/// Specificity triple (ids, classes/attributes/pseudo-classes, tags),
/// ordered lexicographically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity(pub u16, pub u16, pub u16);

impl Specificity {
    /// Specificity given to inline declarations. Beats any parsed selector.
    pub const INLINE: Self = Self(1_000, 0, 0);

    /// Scalar weight `ids * 100 + classes * 10 + tags`.
    pub const fn weight(self) -> u32 {
        (self.0 as u32) * 100 + (self.1 as u32) * 10 + self.2 as u32
    }
}

/// Compute the specificity of a compound selector.
pub fn specificity_of_compound(compound: &CompoundSelector) -> Specificity {
    let mut id_count = 0u16;
    let mut class_attr_count = 0u16;
    let mut type_count = 0u16;
    for simple in &compound.simples {
        match simple {
            SimpleSelector::Id(_) => {
                id_count = id_count.saturating_add(1);
            }
            SimpleSelector::Class(_)
            | SimpleSelector::AttrExists(_)
            | SimpleSelector::AttrEquals { .. }
            | SimpleSelector::PseudoClass(_) => {
                class_attr_count = class_attr_count.saturating_add(1);
            }
            SimpleSelector::Type(_) => {
                type_count = type_count.saturating_add(1);
            }
            SimpleSelector::Universal => {}
        }
    }
    Specificity(id_count, class_attr_count, type_count)
}

/// Compute the specificity of a selector (sum of its compounds).
pub fn specificity_of_selector(selector: &Selector) -> Specificity {
    let mut total = specificity_of_compound(selector.first());
    for pair in selector.rest() {
        let add = specificity_of_compound(&pair.1);
        total.0 = total.0.saturating_add(add.0);
        total.1 = total.1.saturating_add(add.1);
        total.2 = total.2.saturating_add(add.2);
    }
    total
}
