use core::fmt;

use crate::{idx::{Idx, IdxDisplay}, segment::Segment, trapezoid::Trapezoid};

/// A node of the point location structure.
///
/// Branch children are ordered `(left, right)` for an `X` test and `(below, above)` for a `Y` test.
#[derive(Debug, Clone)]
pub(crate) enum QueryNode {
    Branch(Idx<QueryNode>, Idx<QueryNode>, QueryNodeBranch),
    Sink(Idx<Trapezoid>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QueryNodeBranch {
    /// Left or right of the vertical wall through a vertex
    X(usize),
    /// Below or above a segment
    Y(Idx<Segment>),
}

impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Branch(_, _, branch) => write!(f, "{}", branch),
            Self::Sink(ti) => write!(f, "S({})", ti),
        }
    }
}

impl fmt::Display for QueryNodeBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X(v) => write!(f, "X(v{})", v),
            Self::Y(si) => write!(f, "Y({})", si),
        }
    }
}

impl IdxDisplay for QueryNode {
    fn fmt(f: &mut std::fmt::Formatter<'_>, idx: usize) -> std::fmt::Result {
        write!(f, "q{}", idx)
    }
}

impl QueryNode {
    pub fn root(ti: Idx<Trapezoid>) -> Self {
        Self::Sink(ti)
    }

    pub fn x(v: usize, qi_left: Idx<Self>, qi_right: Idx<Self>) -> Self {
        Self::Branch(qi_left, qi_right, QueryNodeBranch::X(v))
    }

    pub fn y(si: Idx<Segment>, qi_below: Idx<Self>, qi_above: Idx<Self>) -> Self {
        Self::Branch(qi_below, qi_above, QueryNodeBranch::Y(si))
    }

    /// Overwrite this sink in place, so every parent now reaches `node` instead.
    ///
    /// Returns the trapezoid the sink referred to, or `None` if this node was already a branch
    /// (in which case it is left untouched).
    #[must_use]
    pub fn replace_sink(&mut self, node: Self) -> Option<Idx<Trapezoid>> {
        match *self {
            Self::Sink(ti) => {
                *self = node;
                Some(ti)
            }
            Self::Branch(..) => None,
        }
    }
}

#[cfg(feature = "debugging")]
pub(crate) struct IndexedQueryNode<'a>(Idx<QueryNode>, &'a QueryNode);

#[cfg(feature = "debugging")]
impl<'a> fmt::Display for IndexedQueryNode<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.0, self.1)
    }
}

#[cfg(feature = "debugging")]
impl QueryNode {
    /// Unfold the structure below `qi` into a tree; shared subtrees are repeated under each parent
    pub fn as_text_tree<'a>(qi: Idx<QueryNode>, qs: &'a [QueryNode]) -> text_trees::TreeNode<IndexedQueryNode<'a>> {
        let node = IndexedQueryNode(qi, &qs[qi]);
        match &qs[qi] {
            QueryNode::Branch(first, second, _) => text_trees::TreeNode::with_child_nodes(node, vec![Self::as_text_tree(*first, qs), Self::as_text_tree(*second, qs)].into_iter()),
            QueryNode::Sink(_) => text_trees::TreeNode::new(node),
        }
    }
}
