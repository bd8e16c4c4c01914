//! Right-to-left selector matching.

use crate::{
    Combinator, CompoundSelector, NodeAdapter, PseudoClass, Selector, SelectorList, SimpleSelector,
};

/// Whether pseudo-class requirements take part in matching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MatchMode {
    /// Treat every pseudo-class as satisfied. Used to collect the rules a
    /// node could match in any interactive state.
    IgnorePseudo,
    /// Require pseudo-classes to hold for the node's current state.
    #[default]
    ApplyPseudo,
}

/// Match a selector list against a node.
pub fn matches_selector_list<A: NodeAdapter>(
    adapter: &A,
    node: A::Handle,
    list: &SelectorList,
    mode: MatchMode,
) -> bool {
    list.selectors
        .iter()
        .any(|selector| matches_selector(adapter, node, selector, mode))
}

/// Match a selector against a node, subject first, walking leftwards.
pub fn matches_selector<A: NodeAdapter>(
    adapter: &A,
    node: A::Handle,
    selector: &Selector,
    mode: MatchMode,
) -> bool {
    if selector.is_empty() {
        return false;
    }
    match_from(adapter, node, selector, selector.rest().len(), mode)
}

/// Compound at position `index`, counting `first` as position 0.
fn compound_at(selector: &Selector, index: usize) -> Option<&CompoundSelector> {
    match index.checked_sub(1) {
        None => Some(selector.first()),
        Some(rest_index) => selector.rest().get(rest_index).map(|pair| &pair.1),
    }
}

/// True if `node` matches compound `index` and the compounds to its left
/// can be satisfied through their combinators. Backtracks across
/// ancestors and siblings.
fn match_from<A: NodeAdapter>(
    adapter: &A,
    node: A::Handle,
    selector: &Selector,
    index: usize,
    mode: MatchMode,
) -> bool {
    let Some(compound) = compound_at(selector, index) else {
        return false;
    };
    if !matches_compound(adapter, node, compound, mode) {
        return false;
    }
    let Some(left_index) = index.checked_sub(1) else {
        return true;
    };
    let Some(&(combinator, _)) = selector.rest().get(left_index) else {
        return false;
    };
    match combinator {
        Combinator::Child => adapter
            .parent(node)
            .is_some_and(|parent| match_from(adapter, parent, selector, left_index, mode)),
        Combinator::Descendant => {
            let mut ancestor = adapter.parent(node);
            while let Some(candidate) = ancestor {
                if match_from(adapter, candidate, selector, left_index, mode) {
                    return true;
                }
                ancestor = adapter.parent(candidate);
            }
            false
        }
        Combinator::AdjacentSibling => adapter
            .previous_sibling(node)
            .is_some_and(|sibling| match_from(adapter, sibling, selector, left_index, mode)),
        Combinator::GeneralSibling => {
            let mut sibling = adapter.previous_sibling(node);
            while let Some(candidate) = sibling {
                if match_from(adapter, candidate, selector, left_index, mode) {
                    return true;
                }
                sibling = adapter.previous_sibling(candidate);
            }
            false
        }
    }
}

/// Match a compound selector against a single node.
pub fn matches_compound<A: NodeAdapter>(
    adapter: &A,
    node: A::Handle,
    compound: &CompoundSelector,
    mode: MatchMode,
) -> bool {
    compound.simples.iter().all(|simple| match simple {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(type_name) => adapter.tag_name(node).eq_ignore_ascii_case(type_name),
        SimpleSelector::Class(class_name) => adapter.has_class(node, class_name),
        SimpleSelector::Id(id_value) => adapter
            .element_id(node)
            .is_some_and(|value| value == id_value.as_str()),
        SimpleSelector::AttrExists(name) => adapter.attr(node, name).is_some(),
        SimpleSelector::AttrEquals { name, value } => adapter
            .attr(node, name)
            .is_some_and(|attr_value| attr_value == value.as_str()),
        SimpleSelector::PseudoClass(pseudo) => {
            mode == MatchMode::IgnorePseudo || matches_pseudo(adapter, node, *pseudo)
        }
    })
}

fn matches_pseudo<A: NodeAdapter>(adapter: &A, node: A::Handle, pseudo: PseudoClass) -> bool {
    match pseudo {
        PseudoClass::FirstChild => adapter.previous_sibling(node).is_none(),
        PseudoClass::LastChild => adapter.next_sibling(node).is_none(),
        PseudoClass::OnlyChild => {
            adapter.previous_sibling(node).is_none() && adapter.next_sibling(node).is_none()
        }
        PseudoClass::Root => adapter.parent(node).is_none(),
        PseudoClass::Empty => adapter.first_child(node).is_none(),
        PseudoClass::Enabled => !adapter
            .pseudo_classes(node)
            .contains(PseudoClass::Disabled),
        PseudoClass::Hover
        | PseudoClass::Focus
        | PseudoClass::FocusWithin
        | PseudoClass::Selected
        | PseudoClass::Pressed
        | PseudoClass::Disabled
        | PseudoClass::Checked => adapter.pseudo_classes(node).contains(pseudo),
    }
}
