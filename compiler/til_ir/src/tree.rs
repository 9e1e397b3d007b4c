//! The generic declaration tree.
//!
//! The parser produces a tree of untyped nodes: each node carries a string,
//! an ordered tag list, and ordered children. The analyzer gives the nodes
//! meaning; nothing here knows about types or maps.
//!
//! Nodes live in a flat arena owned by [`Tree`] and reference each other by
//! [`NodeId`], so semantic records can hold stable handles into the tree
//! without borrowing it.

use smallvec::SmallVec;

use crate::Span;

/// Index of a node in its owning [`Tree`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct NodeId(pub u32);

/// A modifier attached to a node, e.g. `@type(struct)` or `@array(count)`.
///
/// Tag arguments are ordinary nodes: `@map(Color -> $Type, default: Red)`
/// has the args `Color`, `->`, `$Type`, and `default` (with child `Red`).
#[derive(Clone, Debug)]
pub struct Tag {
    pub name: String,
    pub span: Span,
    pub args: SmallVec<[NodeId; 2]>,
}

impl Tag {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Tag {
            name: name.into(),
            span,
            args: SmallVec::new(),
        }
    }
}

/// One declaration node.
#[derive(Clone, Debug, Default)]
pub struct Node {
    /// The node's own text: a name, a literal, or an operator like `->`.
    pub string: String,
    pub span: Span,
    pub tags: SmallVec<[Tag; 1]>,
    pub children: SmallVec<[NodeId; 4]>,
}

impl Node {
    pub fn new(string: impl Into<String>, span: Span) -> Self {
        Node {
            string: string.into(),
            span,
            tags: SmallVec::new(),
            children: SmallVec::new(),
        }
    }

    /// First tag with the given name, if any.
    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }

    /// Whether any tag with the given name is attached.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tag(name).is_some()
    }
}

/// Arena of nodes for one parsed file.
///
/// `root` is a synthetic node whose children are the file's top-level
/// declarations.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
    pub root: NodeId,
}

impl Tree {
    pub fn new() -> Self {
        Tree {
            nodes: vec![Node::default()],
            root: NodeId(0),
        }
    }

    /// Add a node to the arena.
    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    /// Children of a node, resolved to references.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &Node)> {
        self.node(id).children.iter().map(|&c| (c, self.node(c)))
    }

    /// First child of a node, if any.
    pub fn first_child(&self, id: NodeId) -> Option<&Node> {
        self.node(id).children.first().map(|&c| self.node(c))
    }

    /// Among a tag's args, find the named arg (`name` or `name: value`) and
    /// return its node.
    pub fn tag_arg_named<'t>(&'t self, tag: &Tag, name: &str) -> Option<&'t Node> {
        tag.args.iter().map(|&a| self.node(a)).find(|n| n.string == name)
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tags_and_children() {
        let mut tree = Tree::new();
        let child = tree.push(Node::new("4", Span::DUMMY));
        let mut node = Node::new("u32", Span::DUMMY);
        node.tags.push(Tag::new("type", Span::DUMMY));
        node.children.push(child);
        let id = tree.push(node);

        assert!(tree.node(id).has_tag("type"));
        assert!(!tree.node(id).has_tag("map"));
        assert_eq!(tree.first_child(id).map(|n| n.string.as_str()), Some("4"));
        assert_eq!(tree.children(id).count(), 1);
    }
}
