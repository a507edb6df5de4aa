//! Search nodes and the arena that owns them.

use crate::heuristic::Heuristic;
use crate::puzzle::{Board, Move};

/// Index of a node inside its [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A board together with how the search reached it.
///
/// Set membership in the frontier and closed set is decided by `board`
/// alone; `parent` and `g_cost` describe the best path known so far.
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub board: Board,
    /// `None` for the root.
    pub parent: Option<NodeId>,
    /// Slide that produced this board from its parent.
    pub action: Option<Move>,
    /// Slides from the root along the current parent chain.
    pub g_cost: u32,
    /// Heuristic estimate, computed once since the board never changes.
    pub h_cost: u32,
}

impl SearchNode {
    #[must_use]
    pub fn f_cost(&self) -> u32 {
        self.g_cost.saturating_add(self.h_cost)
    }
}

/// Owns every node created during one search.
///
/// Parent links are arena indices, so the path tree needs no shared
/// ownership and is dropped in one piece when the search returns. Only nodes
/// still on the frontier are ever re-parented, and those have no children
/// yet, so a parent chain can never loop back on itself.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the start node.
    pub fn root(&mut self, board: Board, heuristic: Heuristic) -> NodeId {
        let h_cost = heuristic.evaluate(&board);
        self.insert(SearchNode {
            board,
            parent: None,
            action: None,
            g_cost: 0,
            h_cost,
        })
    }

    pub fn insert(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    /// Point `id` at a cheaper path through `parent`.
    pub fn reparent(&mut self, id: NodeId, parent: NodeId, action: Option<Move>, g_cost: u32) {
        let node = &mut self.nodes[id.0];
        node.parent = Some(parent);
        node.action = action;
        node.g_cost = g_cost;
    }

    /// Successor nodes of `id`, one per legal slide, not yet stored.
    ///
    /// The caller decides which of them enter the arena.
    #[must_use]
    pub fn children(&self, id: NodeId, heuristic: Heuristic) -> Vec<SearchNode> {
        let node = self.get(id);
        node.board
            .successors()
            .map(|(action, board)| {
                let h_cost = heuristic.evaluate(&board);
                SearchNode {
                    board,
                    parent: Some(id),
                    action: Some(action),
                    g_cost: node.g_cost + 1,
                    h_cost,
                }
            })
            .collect()
    }

    /// `id` followed by each ancestor up to and including the root.
    pub fn path_to_root(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&current| self.get(current).parent)
    }

    /// Number of parent links between `id` and the root.
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        self.path_to_root(id).count() - 1
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
