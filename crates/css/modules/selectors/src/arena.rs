//! A small owned widget tree implementing [`NodeAdapter`].
//!
//! Hosts with their own tree implement the adapter directly; the arena
//! serves tests, benchmarks and simple embedders.

use crate::{NodeAdapter, PseudoClass, PseudoClassSet};

/// Handle into a [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Index of the node within its arena.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, Default)]
struct ArenaNode {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    state: PseudoClassSet,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Owned tree of tagged nodes.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<ArenaNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, tag: &str, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(ArenaNode {
            tag: tag.to_owned(),
            parent,
            ..ArenaNode::default()
        });
        id
    }

    /// Create a parentless node.
    pub fn create_root(&mut self, tag: &str) -> NodeId {
        self.push(tag, None)
    }

    /// Create a node as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let child = self.push(tag, Some(parent));
        if let Some(node) = self.nodes.get_mut(parent.index()) {
            node.children.push(child);
        }
        child
    }

    /// Move `node` to the end of `new_parent`'s children.
    pub fn reparent(&mut self, node: NodeId, new_parent: NodeId) {
        if let Some(old_parent) = self.get(node).and_then(|entry| entry.parent)
            && let Some(entry) = self.nodes.get_mut(old_parent.index())
        {
            entry.children.retain(|child| *child != node);
        }
        if let Some(entry) = self.nodes.get_mut(new_parent.index()) {
            entry.children.push(node);
        }
        if let Some(entry) = self.nodes.get_mut(node.index()) {
            entry.parent = Some(new_parent);
        }
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        if let Some(entry) = self.nodes.get_mut(node.index()) {
            entry.id = Some(id.to_owned());
        }
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(entry) = self.nodes.get_mut(node.index())
            && !entry.classes.iter().any(|existing| existing == class)
        {
            entry.classes.push(class.to_owned());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(entry) = self.nodes.get_mut(node.index()) {
            entry.classes.retain(|existing| existing != class);
        }
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(entry) = self.nodes.get_mut(node.index()) {
            if let Some(slot) = entry.attrs.iter_mut().find(|pair| pair.0 == name) {
                value.clone_into(&mut slot.1);
            } else {
                entry.attrs.push((name.to_owned(), value.to_owned()));
            }
        }
    }

    /// Set or clear a state flag. Returns whether the node's state changed.
    pub fn set_pseudo_class(&mut self, node: NodeId, pseudo: PseudoClass, enabled: bool) -> bool {
        self.nodes
            .get_mut(node.index())
            .is_some_and(|entry| entry.state.set(pseudo, enabled))
    }

    /// Children of `node` in order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map_or(&[], |entry| entry.children.as_slice())
    }

    fn get(&self, node: NodeId) -> Option<&ArenaNode> {
        self.nodes.get(node.index())
    }

    fn sibling(&self, node: NodeId, offset: isize) -> Option<NodeId> {
        let parent = self.get(node)?.parent?;
        let siblings = self.children(parent);
        let position = siblings.iter().position(|child| *child == node)?;
        siblings.get(position.checked_add_signed(offset)?).copied()
    }
}

impl NodeAdapter for NodeArena {
    type Handle = NodeId;

    fn unique_key(&self, node: NodeId) -> u64 {
        u64::from(node.0)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.parent
    }

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.sibling(node, -1)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.sibling(node, 1)
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).first().copied()
    }

    fn tag_name(&self, node: NodeId) -> &str {
        self.get(node).map_or("", |entry| entry.tag.as_str())
    }

    fn element_id(&self, node: NodeId) -> Option<&str> {
        self.get(node)?.id.as_deref()
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node)
            .is_some_and(|entry| entry.classes.iter().any(|existing| existing == class))
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node)?
            .attrs
            .iter()
            .find(|pair| pair.0 == name)
            .map(|pair| pair.1.as_str())
    }

    fn pseudo_classes(&self, node: NodeId) -> PseudoClassSet {
        self.get(node).map_or(PseudoClassSet::EMPTY, |entry| entry.state)
    }
}
