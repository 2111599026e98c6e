//! Node arena.
//!
//! Every node of every tower, head sentinels included, lives in one `Vec` and links to its
//! neighbours by slot index. Slots freed by removal go on a free list and are reused by later
//! insertions, so the arena only grows to the peak number of live nodes.

/// Node index type. u32 saves space vs usize on 64-bit.
pub(crate) type Idx = u32;

/// One element at one level of its tower, or a head sentinel.
pub(crate) struct Node<T> {
    /// Only the bottom node of a tower carries the item; upper nodes and sentinels hold `None`.
    pub(crate) item: Option<T>,
    /// Next node at this level.
    pub(crate) forward: Option<Idx>,
    /// Same tower, one level lower.
    pub(crate) down: Option<Idx>,
    /// Positions advanced by following `forward`. A node with no successor spans to the
    /// virtual end just past the last element.
    pub(crate) span: usize,
}

impl<T> Node<T> {
    pub(crate) fn sentinel(down: Option<Idx>, span: usize) -> Self {
        Node {
            item: None,
            forward: None,
            down,
            span,
        }
    }
}

pub(crate) struct Arena<T> {
    nodes: Vec<Node<T>>,
    free_list: Vec<Idx>,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Arena {
            nodes: Vec::new(),
            free_list: Vec::new(),
        }
    }

    pub(crate) fn get(&self, idx: Idx) -> &Node<T> {
        &self.nodes[idx as usize]
    }

    pub(crate) fn get_mut(&mut self, idx: Idx) -> &mut Node<T> {
        &mut self.nodes[idx as usize]
    }

    pub(crate) fn alloc(&mut self, node: Node<T>) -> Idx {
        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx as usize] = node;
            idx
        } else {
            let idx = Idx::try_from(self.nodes.len()).unwrap_or_else(|_| {
                panic!("skip list arena exceeded {} nodes", Idx::MAX)
            });
            self.nodes.push(node);
            idx
        }
    }

    /// Returns the slot to the free list, handing back whatever item it held.
    pub(crate) fn free(&mut self, idx: Idx) -> Option<T> {
        let node = self.get_mut(idx);
        node.forward = None;
        node.down = None;
        node.span = 0;
        let item = node.item.take();
        self.free_list.push(idx);
        item
    }

    /// Drops every node and item.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
    }

    /// Number of occupied slots.
    pub(crate) fn live(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(item: &'static str) -> Node<&'static str> {
        Node {
            item: Some(item),
            forward: None,
            down: None,
            span: 1,
        }
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut arena = Arena::new();
        let a = arena.alloc(leaf("a"));
        let b = arena.alloc(leaf("b"));
        assert_eq!(arena.live(), 2);

        assert_eq!(arena.free(a), Some("a"));
        assert_eq!(arena.live(), 1);

        let c = arena.alloc(leaf("c"));
        assert_eq!(c, a);
        assert_eq!(arena.get(c).item, Some("c"));
        assert_eq!(arena.get(b).item, Some("b"));
        assert_eq!(arena.live(), 2);
    }

    #[test]
    fn clear_empties_everything() {
        let mut arena = Arena::new();
        let a = arena.alloc(leaf("a"));
        arena.alloc(leaf("b"));
        arena.free(a);
        arena.clear();
        assert_eq!(arena.live(), 0);
        assert_eq!(arena.alloc(leaf("c")), 0);
    }
}
