//! Indexed Skip List
//!
//! A skip list addressed purely by position. There are no keys: every forward link records a
//! `span`, the number of positions it advances, so any traversal can track its absolute
//! position while descending from the top level without ever scanning the bottom.
//!
//! # Structure
//!
//! Positions below are 1-based ranks; the head sentinel sits at rank 0 and the virtual end at
//! rank `len + 1`. Every level's spans therefore sum to `len + 1`.
//!
//! ```text
//! Level 3: HEAD -1-> 10 -------------3-------------> END
//! Level 2: HEAD -1-> 10 -----2-----> 30 -----1-----> END
//! Level 1: HEAD -1-> 10 -1-> 20 -1-> 30 -----1-----> END
//! ```
//!
//! Each element is a tower of nodes linked top-to-bottom by `down`. Only the bottom node of a
//! tower holds the item.
//!
//! # Operations
//!
//! - `get(index)` / `get_mut(index)` / `set(index, item)`: O(log n) expected
//! - `insert(index, item)`: O(log n) expected, `index == len` appends
//! - `remove(index)`: O(log n) expected, returns the item
//! - `len()`: O(1)
//! - `clear()`: O(n) to drop items
//!
//! Tower heights are drawn from a geometric distribution capped at `max_level`. Levels are
//! added on demand when a tall tower arrives and dropped again once their last node is removed.

use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::config::SkipListConfig;
use crate::error::{ConfigError, IndexOutOfRange};
use crate::level::LevelGenerator;
use crate::node::{Arena, Idx, Node};

/// A list with O(log n) expected insert, remove and access by position.
pub struct IndexedSkipList<T> {
    /// Every node, sentinels included.
    nodes: Arena<T>,
    /// Head sentinel of the top level.
    head: Idx,
    /// Number of items.
    len: usize,
    /// Number of levels, always in `1..=max_level`.
    height: usize,
    levels: LevelGenerator,
}

impl<T> IndexedSkipList<T> {
    /// Creates an empty list with the default tunables, seeded from system entropy.
    pub fn new() -> Self {
        Self::from_valid_config(SkipListConfig::default())
    }

    /// Creates an empty list with the default tunables and a fixed seed, so tower heights
    /// repeat from run to run.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_valid_config(SkipListConfig::default().with_seed(seed))
    }

    pub fn with_config(config: SkipListConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: SkipListConfig) -> Self {
        debug!(
            probability = config.probability,
            max_level = config.max_level,
            seeded = config.seed.is_some(),
            "creating indexed skip list"
        );
        let mut nodes = Arena::new();
        let head = nodes.alloc(Node::sentinel(None, 1));
        IndexedSkipList {
            nodes,
            head,
            len: 0,
            height: 1,
            levels: LevelGenerator::new(config.probability, config.max_level, config.seed),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels currently present.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn max_level(&self) -> usize {
        self.levels.max_level()
    }

    pub fn probability(&self) -> f64 {
        self.levels.probability()
    }

    fn out_of_range(&self, index: usize) -> IndexOutOfRange {
        IndexOutOfRange {
            index,
            len: self.len,
        }
    }

    // --- Traversal ---

    /// Follows `down` links to the bottom node of the tower containing `idx`.
    fn bottom_of(&self, mut idx: Idx) -> Idx {
        while let Some(down) = self.nodes.get(idx).down {
            idx = down;
        }
        idx
    }

    /// Finds the bottom node of the element at `rank`, which must be in `1..=len`.
    ///
    /// Descends from the top, advancing at each level while the next hop does not overshoot.
    /// The search can stop as soon as some level lands exactly on `rank`.
    fn locate(&self, rank: usize) -> Idx {
        let mut x = self.head;
        let mut pos = 0;
        loop {
            while let Some(next) = self.nodes.get(x).forward {
                let span = self.nodes.get(x).span;
                if pos + span > rank {
                    break;
                }
                pos += span;
                x = next;
            }
            if pos == rank {
                break;
            }
            let Some(down) = self.nodes.get(x).down else {
                break;
            };
            x = down;
        }
        debug_assert_eq!(pos, rank, "traversal missed rank {}", rank);
        self.bottom_of(x)
    }

    // --- Access ---

    /// Returns the item at `index`.
    pub fn get(&self, index: usize) -> Result<&T, IndexOutOfRange> {
        self.item_at(index).ok_or(self.out_of_range(index))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfRange> {
        let err = self.out_of_range(index);
        if index >= self.len {
            return Err(err);
        }
        let idx = self.locate(index + 1);
        self.nodes.get_mut(idx).item.as_mut().ok_or(err)
    }

    fn item_at(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        let idx = self.locate(index + 1);
        self.nodes.get(idx).item.as_ref()
    }

    /// Replaces the item at `index`, returning the old one.
    pub fn set(&mut self, index: usize, item: T) -> Result<T, IndexOutOfRange> {
        let slot = self.get_mut(index)?;
        Ok(mem::replace(slot, item))
    }

    pub fn first(&self) -> Option<&T> {
        self.item_at(0)
    }

    pub fn last(&self) -> Option<&T> {
        self.item_at(self.len.checked_sub(1)?)
    }

    // --- Mutation ---

    /// Inserts `item` so that it ends up at `index`, shifting later items back by one.
    /// `index == len` appends.
    pub fn insert(&mut self, index: usize, item: T) -> Result<(), IndexOutOfRange> {
        if index > self.len {
            return Err(self.out_of_range(index));
        }
        let level = self.levels.random_level();
        self.insert_at_level(index, item, level);
        Ok(())
    }

    /// Appends `item` at the end.
    pub fn push(&mut self, item: T) {
        let level = self.levels.random_level();
        self.insert_at_level(self.len, item, level);
    }

    /// Inserts with a tower of exactly `level` nodes. `index` must be `<= len` and `level`
    /// must be in `1..=max_level`.
    fn insert_at_level(&mut self, index: usize, item: T, level: usize) {
        self.grow_to(level);

        let mut x = self.head;
        let mut pos = 0;
        let mut current = self.height;
        // Node created at the level above, waiting for its `down` link.
        let mut above: Option<Idx> = None;
        let mut item = Some(item);

        loop {
            // Stop at the rightmost node at or before rank `index`.
            while let Some(next) = self.nodes.get(x).forward {
                let span = self.nodes.get(x).span;
                if pos + span > index {
                    break;
                }
                pos += span;
                x = next;
            }

            if current > level {
                // No landing point at this level; the hop over the new item just gets longer.
                self.nodes.get_mut(x).span += 1;
            } else {
                let (forward, span) = {
                    let node = self.nodes.get(x);
                    (node.forward, node.span)
                };
                let new_idx = self.nodes.alloc(Node {
                    item: if current == 1 { item.take() } else { None },
                    forward,
                    down: None,
                    span: pos + span - index,
                });
                let node = self.nodes.get_mut(x);
                node.forward = Some(new_idx);
                node.span = index + 1 - pos;

                if let Some(above) = above {
                    self.nodes.get_mut(above).down = Some(new_idx);
                }
                above = Some(new_idx);
            }

            let Some(down) = self.nodes.get(x).down else {
                break;
            };
            x = down;
            current -= 1;
        }

        self.len += 1;
        self.check_invariants();
    }

    /// Adds empty levels on top until there are at least `level` of them.
    fn grow_to(&mut self, level: usize) {
        if level <= self.height {
            return;
        }
        // Nothing sits on a new level yet, so its sentinel hops straight to the end.
        while self.height < level {
            self.head = self.nodes.alloc(Node::sentinel(Some(self.head), self.len + 1));
            self.height += 1;
        }
        trace!(height = self.height, len = self.len, "skip list grew");
    }

    /// Removes and returns the item at `index`, shifting later items forward by one.
    pub fn remove(&mut self, index: usize) -> Result<T, IndexOutOfRange> {
        let err = self.out_of_range(index);
        if index >= self.len {
            return Err(err);
        }
        let rank = index + 1;

        let mut x = self.head;
        let mut pos = 0;
        let mut removed = None;

        loop {
            // Stop just before rank `rank`.
            while let Some(next) = self.nodes.get(x).forward {
                let span = self.nodes.get(x).span;
                if pos + span >= rank {
                    break;
                }
                pos += span;
                x = next;
            }

            let (forward, span) = {
                let node = self.nodes.get(x);
                (node.forward, node.span)
            };
            match forward {
                Some(target) if pos + span == rank => {
                    // The removed tower has a node here: absorb its hop and unlink it.
                    let (target_forward, target_span) = {
                        let node = self.nodes.get(target);
                        (node.forward, node.span)
                    };
                    let node = self.nodes.get_mut(x);
                    node.span += target_span - 1;
                    node.forward = target_forward;
                    removed = self.nodes.free(target).or(removed);
                }
                _ => self.nodes.get_mut(x).span -= 1,
            }

            let Some(down) = self.nodes.get(x).down else {
                break;
            };
            x = down;
        }

        self.len -= 1;
        self.shrink();
        self.check_invariants();

        // The bottom level always holds the removed item.
        removed.ok_or(err)
    }

    /// Drops empty levels from the top, stopping at the first level with a node on it.
    fn shrink(&mut self) {
        let height = self.height;
        while self.height > 1 {
            let top = self.nodes.get(self.head);
            if top.forward.is_some() {
                break;
            }
            let Some(down) = top.down else {
                break;
            };
            self.nodes.free(self.head);
            self.head = down;
            self.height -= 1;
        }
        if self.height < height {
            trace!(height = self.height, len = self.len, "skip list shrank");
        }
    }

    /// Removes every item. The level generator keeps its state.
    pub fn clear(&mut self) {
        debug!(len = self.len, height = self.height, "clearing skip list");
        self.nodes.clear();
        self.head = self.nodes.alloc(Node::sentinel(None, 1));
        self.len = 0;
        self.height = 1;
    }

    // --- Iteration & rendering ---

    /// Iterates the items in positional order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            current: self.nodes.get(self.bottom_of(self.head)).forward,
            remaining: self.len,
        }
    }

    /// Level-by-level dump of items and spans, top level first.
    ///
    /// ```
    /// use indexed_skiplist::{IndexedSkipList, SkipListConfig};
    ///
    /// let config = SkipListConfig::default().with_probability(0.0);
    /// let mut list = IndexedSkipList::with_config(config).unwrap();
    /// list.push('a');
    /// list.push('b');
    /// assert_eq!(
    ///     list.render_levels().to_string(),
    ///     "height: 1, len: 2\nL1: (head)-1- (a)-1- (b)-1-\n"
    /// );
    /// ```
    pub fn render_levels(&self) -> LevelDump<'_, T> {
        LevelDump { list: self }
    }

    // --- Invariant checking ---

    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        use rustc_hash::FxHashMap;

        assert!(
            (1..=self.levels.max_level()).contains(&self.height),
            "INVARIANT VIOLATED: height={} outside 1..={}",
            self.height,
            self.levels.max_level()
        );

        // Rank of every node, one map per level, top level first.
        let mut ranks: Vec<FxHashMap<Idx, usize>> = Vec::with_capacity(self.height);
        let mut sentinel = Some(self.head);
        while let Some(head) = sentinel {
            let level = self.height - ranks.len();
            let mut level_ranks = FxHashMap::default();
            let mut idx = head;
            let mut pos = 0;
            loop {
                level_ranks.insert(idx, pos);
                let node = self.nodes.get(idx);
                pos += node.span;
                match node.forward {
                    Some(next) => idx = next,
                    None => break,
                }
            }
            assert_eq!(
                pos,
                self.len + 1,
                "INVARIANT VIOLATED: level {} spans sum to {} != len + 1 = {}",
                level,
                pos,
                self.len + 1
            );
            ranks.push(level_ranks);
            sentinel = self.nodes.get(head).down;
        }
        assert_eq!(
            ranks.len(),
            self.height,
            "INVARIANT VIOLATED: {} sentinel levels != height {}",
            ranks.len(),
            self.height
        );

        // Every node sits on top of a node with the same rank.
        for pair in ranks.windows(2) {
            for (&idx, &rank) in &pair[0] {
                let node = self.nodes.get(idx);
                assert!(node.item.is_none(), "INVARIANT VIOLATED: upper node holds an item");
                let below = node.down.and_then(|down| pair[1].get(&down));
                assert_eq!(
                    below,
                    Some(&rank),
                    "INVARIANT VIOLATED: node at rank {} is not stacked on its own tower",
                    rank
                );
            }
        }
        if let Some(bottom) = ranks.last() {
            for (&idx, &rank) in bottom {
                let node = self.nodes.get(idx);
                assert!(node.down.is_none(), "INVARIANT VIOLATED: bottom node has a down link");
                assert_eq!(
                    node.item.is_some(),
                    rank != 0,
                    "INVARIANT VIOLATED: item presence wrong at bottom rank {}",
                    rank
                );
            }
            assert_eq!(bottom.len(), self.len + 1);
        }

        // Only the bottom level may be empty.
        if self.height > 1 {
            assert!(
                self.nodes.get(self.head).forward.is_some(),
                "INVARIANT VIOLATED: empty top level at height {}",
                self.height
            );
        }

        let total: usize = ranks.iter().map(|level| level.len()).sum();
        assert_eq!(
            total,
            self.nodes.live(),
            "INVARIANT VIOLATED: {} reachable nodes != {} live arena slots",
            total,
            self.nodes.live()
        );
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    fn check_invariants(&self) {}
}

impl<T> Default for IndexedSkipList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for IndexedSkipList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for IndexedSkipList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = IndexedSkipList::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a IndexedSkipList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Renders as `[e0, e1, ..., en-1]`, or `[]` when empty.
impl<T: fmt::Display> fmt::Display for IndexedSkipList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        f.write_str("]")
    }
}

impl<T: fmt::Debug> fmt::Debug for IndexedSkipList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over the items of an [`IndexedSkipList`], in positional order.
pub struct Iter<'a, T> {
    nodes: &'a Arena<T>,
    current: Option<Idx>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.current?);
        self.current = node.forward;
        self.remaining = self.remaining.saturating_sub(1);
        node.item.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Returned by [`IndexedSkipList::render_levels`].
pub struct LevelDump<'a, T> {
    list: &'a IndexedSkipList<T>,
}

impl<T: fmt::Display> fmt::Display for LevelDump<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = self.list;
        writeln!(f, "height: {}, len: {}", list.height, list.len)?;

        let mut sentinel = Some(list.head);
        let mut level = list.height;
        while let Some(head) = sentinel {
            write!(f, "L{}: (head)-{}-", level, list.nodes.get(head).span)?;
            let mut current = list.nodes.get(head).forward;
            while let Some(idx) = current {
                let node = list.nodes.get(idx);
                match &list.nodes.get(list.bottom_of(idx)).item {
                    Some(item) => write!(f, " ({})-{}-", item, node.span)?,
                    None => write!(f, " (?)-{}-", node.span)?,
                }
                current = node.forward;
            }
            writeln!(f)?;
            sentinel = list.nodes.get(head).down;
            level -= 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    impl<T> IndexedSkipList<T> {
        /// Spans of every level, top level first, sentinel included.
        fn spans(&self) -> Vec<Vec<usize>> {
            let mut levels = Vec::new();
            let mut sentinel = Some(self.head);
            while let Some(head) = sentinel {
                let mut spans = Vec::new();
                let mut current = Some(head);
                while let Some(idx) = current {
                    spans.push(self.nodes.get(idx).span);
                    current = self.nodes.get(idx).forward;
                }
                levels.push(spans);
                sentinel = self.nodes.get(head).down;
            }
            levels
        }
    }

    fn flat() -> IndexedSkipList<i32> {
        IndexedSkipList::with_config(SkipListConfig::default().with_probability(0.0)).unwrap()
    }

    fn items<T: Clone>(list: &IndexedSkipList<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn empty_list() {
        let list: IndexedSkipList<i32> = IndexedSkipList::new();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.height(), 1);
        assert_eq!(list.max_level(), 20);
        assert_eq!(list.probability(), 0.5);
        assert_eq!(list.get(0), Err(IndexOutOfRange { index: 0, len: 0 }));
        assert_eq!(list.first(), None);
        assert_eq!(list.last(), None);
        assert_eq!(list.to_string(), "[]");
        assert_eq!(list.spans(), vec![vec![1]]);
    }

    #[test]
    fn append_and_get() {
        let mut list = IndexedSkipList::with_seed(1);
        list.push(10);
        list.push(20);
        list.push(30);

        assert_eq!(list.get(0), Ok(&10));
        assert_eq!(list.get(1), Ok(&20));
        assert_eq!(list.get(2), Ok(&30));
        assert_eq!(list.to_string(), "[10, 20, 30]");
        assert_eq!(format!("{:?}", list), "[10, 20, 30]");
    }

    #[test]
    fn insert_in_middle() {
        let mut list = IndexedSkipList::with_seed(2);
        list.extend([10, 20, 30]);
        list.insert(1, 99).unwrap();
        assert_eq!(list.to_string(), "[10, 99, 20, 30]");
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn remove_front() {
        let mut list = IndexedSkipList::with_seed(3);
        list.extend([10, 99, 20, 30]);
        assert_eq!(list.remove(0), Ok(10));
        assert_eq!(list.to_string(), "[99, 20, 30]");
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn out_of_range() {
        let mut list = IndexedSkipList::with_seed(4);
        list.extend([10, 20, 30]);

        assert_eq!(list.get(5), Err(IndexOutOfRange { index: 5, len: 3 }));
        assert_eq!(list.get(3), Err(IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(list.remove(3), Err(IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(list.insert(4, 0), Err(IndexOutOfRange { index: 4, len: 3 }));
        assert_eq!(list.set(3, 0), Err(IndexOutOfRange { index: 3, len: 3 }));
        assert!(list.get_mut(7).is_err());
        assert_eq!(
            list.get(5).unwrap_err().to_string(),
            "index 5 out of range for length 3"
        );
    }

    #[test]
    fn failed_ops_leave_structure_alone() {
        let mut list = IndexedSkipList::with_seed(5);
        list.extend(0..50);
        let spans = list.spans();
        let live = list.nodes.live();

        assert!(list.insert(51, -1).is_err());
        assert!(list.remove(50).is_err());
        assert!(list.set(50, -1).is_err());

        assert_eq!(list.len(), 50);
        assert_eq!(list.spans(), spans);
        assert_eq!(list.nodes.live(), live);
        assert_eq!(items(&list), (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn clear_resets() {
        let mut list = IndexedSkipList::with_seed(6);
        list.extend(0..100);
        list.clear();

        assert_eq!(list.len(), 0);
        assert_eq!(list.height(), 1);
        assert_eq!(list.to_string(), "[]");
        assert_eq!(list.spans(), vec![vec![1]]);
        assert_eq!(list.nodes.live(), 1);

        list.insert(0, 7).unwrap();
        assert_eq!(list.get(0), Ok(&7));
    }

    #[test]
    fn hand_built_spans() {
        let mut list = IndexedSkipList::with_seed(0);
        list.insert_at_level(0, 10, 3);
        assert_eq!(list.spans(), vec![vec![1, 1], vec![1, 1], vec![1, 1]]);

        list.insert_at_level(1, 20, 1);
        assert_eq!(list.spans(), vec![vec![1, 2], vec![1, 2], vec![1, 1, 1]]);

        list.insert_at_level(2, 30, 2);
        assert_eq!(
            list.spans(),
            vec![vec![1, 3], vec![1, 2, 1], vec![1, 1, 1, 1]]
        );
        assert_eq!(list.height(), 3);

        // 20 only lives on the bottom level; the hops above it shorten.
        assert_eq!(list.remove(1), Ok(20));
        assert_eq!(list.spans(), vec![vec![1, 2], vec![1, 1, 1], vec![1, 1, 1]]);

        // Removing 10 empties the top level, which is dropped.
        assert_eq!(list.remove(0), Ok(10));
        assert_eq!(list.height(), 2);
        assert_eq!(list.spans(), vec![vec![1, 1], vec![1, 1]]);

        assert_eq!(list.remove(0), Ok(30));
        assert_eq!(list.height(), 1);
        assert_eq!(list.spans(), vec![vec![1]]);
        assert_eq!(list.nodes.live(), 1);
    }

    #[test]
    fn insert_before_tall_tower() {
        let mut list = IndexedSkipList::with_seed(0);
        list.insert_at_level(0, 'b', 2);
        list.insert_at_level(0, 'a', 1);
        assert_eq!(list.spans(), vec![vec![2, 1], vec![1, 1, 1]]);
        assert_eq!(list.get(0), Ok(&'a'));
        assert_eq!(list.get(1), Ok(&'b'));
    }

    #[test]
    fn shrink_stops_at_first_level_with_content() {
        let mut list = IndexedSkipList::with_seed(0);
        list.insert_at_level(0, 'a', 2);
        list.insert_at_level(1, 'b', 4);
        list.insert_at_level(2, 'c', 1);
        assert_eq!(list.height(), 4);

        // Levels 4 and 3 only hold 'b'; level 2 still holds 'a'.
        assert_eq!(list.remove(1), Ok('b'));
        assert_eq!(list.height(), 2);
        assert_eq!(list.spans(), vec![vec![1, 2], vec![1, 1, 1]]);
        assert_eq!(items(&list), vec!['a', 'c']);
    }

    #[test]
    fn render_levels() {
        let mut list = IndexedSkipList::with_seed(0);
        list.insert_at_level(0, 10, 2);
        list.insert_at_level(1, 20, 1);
        assert_eq!(
            list.render_levels().to_string(),
            "height: 2, len: 2\n\
             L2: (head)-1- (10)-2-\n\
             L1: (head)-1- (10)-1- (20)-1-\n"
        );
    }

    #[test]
    fn set_and_get_mut() {
        let mut list = flat();
        list.extend([1, 2, 3]);
        assert_eq!(list.set(1, 20), Ok(2));
        *list.get_mut(2).unwrap() += 100;
        assert_eq!(items(&list), vec![1, 20, 103]);
        assert_eq!(list.first(), Some(&1));
        assert_eq!(list.last(), Some(&103));
    }

    #[test]
    fn iterate() {
        let list: IndexedSkipList<u32> = (1..=5).collect();
        let iter = list.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);

        let mut total = 0;
        for item in &list {
            total += item;
        }
        assert_eq!(total, 15);
    }

    #[test]
    fn insert_at_beginning() {
        let mut list = IndexedSkipList::with_seed(7);
        for i in 0..10 {
            list.insert(0, i).unwrap();
        }
        assert_eq!(items(&list), (0..10).rev().collect::<Vec<_>>());
    }

    #[test]
    fn height_is_capped() {
        let config = SkipListConfig::default()
            .with_probability(0.9)
            .with_max_level(3)
            .with_seed(8);
        let mut list = IndexedSkipList::with_config(config).unwrap();
        for i in 0..500 {
            list.push(i);
            assert!(list.height() <= 3);
        }
        assert_eq!(list.height(), 3);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = SkipListConfig::default().with_probability(1.0);
        assert!(matches!(
            IndexedSkipList::<i32>::with_config(config),
            Err(ConfigError::InvalidProbability(_))
        ));
    }

    #[test]
    fn same_seed_same_shape() {
        let mut a = IndexedSkipList::with_seed(9);
        let mut b = IndexedSkipList::with_seed(9);
        for i in 0..200 {
            a.insert(i / 2, i).unwrap();
            b.insert(i / 2, i).unwrap();
        }
        assert_eq!(a.spans(), b.spans());
        assert_eq!(a.height(), b.height());
    }

    #[test]
    fn items_are_dropped() {
        let marker = Rc::new(());
        let mut list = IndexedSkipList::with_seed(10);
        for _ in 0..20 {
            list.push(Rc::clone(&marker));
        }
        assert_eq!(Rc::strong_count(&marker), 21);

        let removed = list.remove(5).unwrap();
        drop(removed);
        assert_eq!(Rc::strong_count(&marker), 20);

        list.clear();
        assert_eq!(Rc::strong_count(&marker), 1);

        list.push(Rc::clone(&marker));
        drop(list);
        assert_eq!(Rc::strong_count(&marker), 1);
    }

    #[test]
    fn stress_test() {
        let mut list = IndexedSkipList::with_seed(11);
        for i in 0..1000 {
            list.insert(i, i).unwrap();
        }
        assert_eq!(list.len(), 1000);

        for i in 0..1000 {
            assert_eq!(list.get(i), Ok(&i), "failed at {}", i);
        }

        // Remove every other item from the end
        for i in (0..500).rev() {
            assert_eq!(list.remove(i * 2), Ok(i * 2));
        }
        assert_eq!(list.len(), 500);

        for i in 0..500 {
            let expected = i * 2 + 1;
            assert_eq!(list.get(i), Ok(&expected), "failed at index {}", i);
        }

        while !list.is_empty() {
            list.remove(list.len() / 2).unwrap();
        }
        assert_eq!(list.height(), 1);
        assert_eq!(list.nodes.live(), 1);
    }
}
