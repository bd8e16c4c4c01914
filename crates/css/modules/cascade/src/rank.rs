use core::cmp::Ordering;

use css_selectors::Specificity;

/// Priority tuple used to order declarations in the cascade.
///
/// Compared field by field: important beats normal, then higher
/// specificity, then later source order. Source orders are unique within a
/// stylesheet, so two distinct declarations never tie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CascadeRank {
    pub important: bool,
    pub specificity: Specificity,
    pub source_order: u64,
}

impl CascadeRank {
    #[inline]
    pub const fn new(important: bool, specificity: Specificity, source_order: u64) -> Self {
        Self {
            important,
            specificity,
            source_order,
        }
    }

    /// Rank of an inline declaration: above every stylesheet rule of the
    /// same importance.
    #[inline]
    pub const fn inline(important: bool) -> Self {
        Self::new(important, Specificity::INLINE, u64::MAX)
    }

    /// True if `self` should replace `previous`.
    pub fn wins_over(&self, previous: &Self) -> bool {
        compare_rank(self, previous) != Ordering::Less
    }
}

/// Compare two ranks; `Greater` means `left` wins.
pub fn compare_rank(left: &CascadeRank, right: &CascadeRank) -> Ordering {
    if left.important != right.important {
        return left.important.cmp(&right.important);
    }
    if left.specificity != right.specificity {
        return left.specificity.cmp(&right.specificity);
    }
    left.source_order.cmp(&right.source_order)
}

impl PartialOrd for CascadeRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CascadeRank {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_rank(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Importance, then specificity, then order.
    ///
    /// # Panics
    /// Panics if assertions fail.
    #[test]
    fn ordering() {
        let weak_important = CascadeRank::new(true, Specificity(0, 0, 1), 0);
        let strong_normal = CascadeRank::new(false, Specificity(1, 0, 0), 9);
        assert!(weak_important > strong_normal);
        let early = CascadeRank::new(false, Specificity(0, 1, 0), 1);
        let late = CascadeRank::new(false, Specificity(0, 1, 0), 2);
        assert!(late.wins_over(&early));
        assert!(!early.wins_over(&late));
        assert!(CascadeRank::inline(false) > CascadeRank::new(false, Specificity(9, 9, 9), 5));
        assert!(CascadeRank::inline(false) < weak_important);
    }
}
