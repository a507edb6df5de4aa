//! Open and closed sets for best-first search.
//!
//! The open set is ordered by `(f_cost, insertion_order)`, which picks the
//! same node a front-to-back linear scan for the first minimal `f` would.
//! A node whose path is improved keeps its original insertion order.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::node::{NodeArena, NodeId, SearchNode};
use crate::puzzle::Board;

/// The frontier ordering key. Lower `f_cost` first, then older insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierKey {
    f_cost: u32,
    insertion_order: u64,
}

/// What happened to a child offered to [`Frontier::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Its board was already expanded.
    Closed,
    /// Its board was already open with an equal or cheaper path.
    Duplicate,
    /// Its board was already open and this path is cheaper; the open node
    /// was re-pointed at it.
    Improved(NodeId),
    /// A new board, stored and opened.
    Inserted(NodeId),
}

/// Boards that have been expanded. Never reopened.
#[derive(Debug, Default)]
pub struct ClosedSet {
    boards: HashSet<Board>,
}

impl ClosedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the board was already closed.
    pub fn insert(&mut self, board: Board) -> bool {
        self.boards.insert(board)
    }

    #[must_use]
    pub fn contains(&self, board: &Board) -> bool {
        self.boards.contains(board)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

/// Open set with best-first extraction and duplicate reconciliation.
///
/// Holds at most one node per board.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: BTreeMap<FrontierKey, NodeId>,
    open: HashMap<Board, (NodeId, FrontierKey)>,
    next_insertion: u64,
    high_water: usize,
}

impl Frontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a node already stored in `arena`.
    ///
    /// Returns `false` without changes if its board is already open.
    pub fn push(&mut self, arena: &NodeArena, id: NodeId) -> bool {
        let node = arena.get(id);
        if self.open.contains_key(&node.board) {
            return false;
        }
        let key = FrontierKey {
            f_cost: node.f_cost(),
            insertion_order: self.next_insertion,
        };
        self.next_insertion += 1;
        self.queue.insert(key, id);
        self.open.insert(node.board.clone(), (id, key));
        self.high_water = self.high_water.max(self.open.len());
        true
    }

    /// The open node with the lowest `f_cost`, oldest first on ties.
    #[must_use]
    pub fn peek_best(&self) -> Option<NodeId> {
        self.queue.first_key_value().map(|(_, &id)| id)
    }

    /// Remove and return the node [`Frontier::peek_best`] would give.
    pub fn pop_best(&mut self, arena: &NodeArena) -> Option<NodeId> {
        let (_, id) = self.queue.pop_first()?;
        self.open.remove(&arena.get(id).board);
        Some(id)
    }

    /// The open node holding `board`, if any.
    #[must_use]
    pub fn get(&self, board: &Board) -> Option<NodeId> {
        self.open.get(board).map(|&(id, _)| id)
    }

    #[must_use]
    pub fn contains(&self, board: &Board) -> bool {
        self.open.contains_key(board)
    }

    /// Fold a freshly generated child into the open set.
    ///
    /// Closed boards are dropped. An open board keeps its node and place in
    /// line; only a strictly cheaper path replaces its parent and `g_cost`.
    /// Anything else is stored in `arena` and opened.
    pub fn merge(
        &mut self,
        arena: &mut NodeArena,
        closed: &ClosedSet,
        child: SearchNode,
    ) -> MergeOutcome {
        if closed.contains(&child.board) {
            return MergeOutcome::Closed;
        }

        if let Some(&(existing, key)) = self.open.get(&child.board) {
            if child.g_cost >= arena.get(existing).g_cost {
                return MergeOutcome::Duplicate;
            }
            let Some(parent) = child.parent else {
                return MergeOutcome::Duplicate;
            };

            debug!(
                node = existing.index(),
                old_g = arena.get(existing).g_cost,
                new_g = child.g_cost,
                "cheaper path to open board"
            );
            arena.reparent(existing, parent, child.action, child.g_cost);

            let rekeyed = FrontierKey {
                f_cost: arena.get(existing).f_cost(),
                insertion_order: key.insertion_order,
            };
            self.queue.remove(&key);
            self.queue.insert(rekeyed, existing);
            self.open.insert(child.board, (existing, rekeyed));
            return MergeOutcome::Improved(existing);
        }

        let id = arena.insert(child);
        self.push(arena, id);
        MergeOutcome::Inserted(id)
    }

    /// Current number of open nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.open.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Largest number of open nodes seen at once.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::Heuristic;
    use crate::puzzle::Move;

    fn board(cells: [[u32; 3]; 3]) -> Board {
        let rows: Vec<Vec<u32>> = cells.iter().map(|r| r.to_vec()).collect();
        Board::from_rows(3, &rows).unwrap()
    }

    fn detached(board: Board, parent: Option<NodeId>, g_cost: u32, h_cost: u32) -> SearchNode {
        SearchNode {
            board,
            parent,
            action: parent.map(|_| Move::Up),
            g_cost,
            h_cost,
        }
    }

    #[test]
    fn pops_lowest_f_then_oldest() {
        let mut arena = NodeArena::new();
        let mut frontier = Frontier::new();

        let a = arena.insert(detached(board([[1, 0, 2], [3, 4, 5], [6, 7, 8]]), None, 0, 5));
        let b = arena.insert(detached(board([[3, 1, 2], [0, 4, 5], [6, 7, 8]]), None, 0, 3));
        let c = arena.insert(detached(board([[1, 4, 2], [3, 0, 5], [6, 7, 8]]), None, 1, 2));
        for id in [a, b, c] {
            assert!(frontier.push(&arena, id));
        }

        assert_eq!(frontier.peek_best(), Some(b), "b and c tie at f = 3, b is older");
        assert_eq!(frontier.pop_best(&arena), Some(b));
        assert_eq!(frontier.pop_best(&arena), Some(c));
        assert_eq!(frontier.pop_best(&arena), Some(a));
        assert_eq!(frontier.pop_best(&arena), None);
        assert!(frontier.is_empty());
    }

    #[test]
    fn push_refuses_open_board() {
        let mut arena = NodeArena::new();
        let mut frontier = Frontier::new();
        let first = arena.insert(detached(Board::goal(3).unwrap(), None, 0, 0));
        let second = arena.insert(detached(Board::goal(3).unwrap(), None, 4, 0));

        assert!(frontier.push(&arena, first));
        assert!(!frontier.push(&arena, second));
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.get(&Board::goal(3).unwrap()), Some(first));
    }

    #[test]
    fn high_water_survives_pops() {
        let mut arena = NodeArena::new();
        let mut frontier = Frontier::new();
        let root = arena.root(Board::goal(3).unwrap(), Heuristic::Manhattan);
        frontier.push(&arena, root);
        let closed = ClosedSet::new();

        for child in arena.children(root, Heuristic::Manhattan) {
            frontier.merge(&mut arena, &closed, child);
        }
        assert_eq!(frontier.high_water(), 3);

        let _ = frontier.pop_best(&arena);
        let _ = frontier.pop_best(&arena);
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.high_water(), 3);
    }

    #[test]
    fn merge_skips_closed_boards() {
        let mut arena = NodeArena::new();
        let mut frontier = Frontier::new();
        let mut closed = ClosedSet::new();
        let goal = Board::goal(3).unwrap();
        closed.insert(goal.clone());

        let outcome = frontier.merge(&mut arena, &closed, detached(goal.clone(), None, 0, 0));
        assert_eq!(outcome, MergeOutcome::Closed);
        assert!(!frontier.contains(&goal));
        assert!(arena.is_empty());
    }

    #[test]
    fn merge_keeps_cheaper_existing_path() {
        let mut arena = NodeArena::new();
        let mut frontier = Frontier::new();
        let closed = ClosedSet::new();
        let target = board([[1, 0, 2], [3, 4, 5], [6, 7, 8]]);
        let root = arena.root(Board::goal(3).unwrap(), Heuristic::Manhattan);

        let first = detached(target.clone(), Some(root), 2, 2);
        let MergeOutcome::Inserted(existing) = frontier.merge(&mut arena, &closed, first) else {
            panic!("first sighting should insert");
        };

        let costlier = detached(target.clone(), Some(root), 5, 2);
        assert_eq!(
            frontier.merge(&mut arena, &closed, costlier),
            MergeOutcome::Duplicate
        );
        let equal = detached(target, Some(root), 2, 2);
        assert_eq!(
            frontier.merge(&mut arena, &closed, equal),
            MergeOutcome::Duplicate
        );
        assert_eq!(arena.get(existing).g_cost, 2);
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn merge_improves_open_path_without_losing_its_place() {
        let mut arena = NodeArena::new();
        let mut frontier = Frontier::new();
        let closed = ClosedSet::new();
        let root = arena.root(Board::goal(3).unwrap(), Heuristic::Manhattan);

        let target = board([[1, 0, 2], [3, 4, 5], [6, 7, 8]]);
        let rival = board([[3, 1, 2], [0, 4, 5], [6, 7, 8]]);

        // target opens first at f = 8, rival second at f = 4.
        let MergeOutcome::Inserted(target_id) =
            frontier.merge(&mut arena, &closed, detached(target.clone(), Some(root), 6, 2))
        else {
            panic!("target should insert");
        };
        let MergeOutcome::Inserted(rival_id) =
            frontier.merge(&mut arena, &closed, detached(rival, Some(root), 2, 2))
        else {
            panic!("rival should insert");
        };
        let shortcut = arena.insert(detached(board([[1, 2, 0], [3, 4, 5], [6, 7, 8]]), Some(root), 1, 4));

        let outcome = frontier.merge(&mut arena, &closed, detached(target, Some(shortcut), 2, 2));
        assert_eq!(outcome, MergeOutcome::Improved(target_id));

        let node = arena.get(target_id);
        assert_eq!(node.g_cost, 2);
        assert_eq!(node.parent, Some(shortcut));
        assert_eq!(frontier.len(), 2);
        // Both sit at f = 4 now; target was opened first and keeps that seniority.
        assert_eq!(frontier.pop_best(&arena), Some(target_id));
        assert_eq!(frontier.pop_best(&arena), Some(rival_id));
    }
}
