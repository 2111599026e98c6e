//! The PositionalList trait defines the interface for lists addressed by position.
//!
//! It exists so that the skip list and a plain `Vec` can be driven by the same code:
//! conformance tests replay one operation sequence against both, and the benchmarks compare
//! them on identical workloads.

use crate::error::IndexOutOfRange;
use crate::skip_list::IndexedSkipList;

/// A sequence addressed only by position.
///
/// `get` and `remove` accept indices in `0..len`; `insert` accepts `0..=len`. Anything else
/// returns [`IndexOutOfRange`] and leaves the list untouched.
pub trait PositionalList<T> {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Result<&T, IndexOutOfRange>;

    /// Inserts `item` at `index`, shifting later items back. `index == len` appends.
    fn insert(&mut self, index: usize, item: T) -> Result<(), IndexOutOfRange>;

    /// Appends `item`; the same as `insert(len, item)`.
    fn push(&mut self, item: T);

    /// Removes and returns the item at `index`, shifting later items forward.
    fn remove(&mut self, index: usize) -> Result<T, IndexOutOfRange>;

    fn clear(&mut self);
}

impl<T> PositionalList<T> for IndexedSkipList<T> {
    fn len(&self) -> usize {
        IndexedSkipList::len(self)
    }

    fn get(&self, index: usize) -> Result<&T, IndexOutOfRange> {
        IndexedSkipList::get(self, index)
    }

    fn insert(&mut self, index: usize, item: T) -> Result<(), IndexOutOfRange> {
        IndexedSkipList::insert(self, index, item)
    }

    fn push(&mut self, item: T) {
        IndexedSkipList::push(self, item);
    }

    fn remove(&mut self, index: usize) -> Result<T, IndexOutOfRange> {
        IndexedSkipList::remove(self, index)
    }

    fn clear(&mut self) {
        IndexedSkipList::clear(self);
    }
}

/// Reference model: O(n) insert and remove, but obviously correct.
impl<T> PositionalList<T> for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> Result<&T, IndexOutOfRange> {
        self.as_slice().get(index).ok_or(IndexOutOfRange {
            index,
            len: self.as_slice().len(),
        })
    }

    fn insert(&mut self, index: usize, item: T) -> Result<(), IndexOutOfRange> {
        let len = self.as_slice().len();
        if index > len {
            return Err(IndexOutOfRange { index, len });
        }
        Vec::insert(self, index, item);
        Ok(())
    }

    fn push(&mut self, item: T) {
        Vec::push(self, item);
    }

    fn remove(&mut self, index: usize) -> Result<T, IndexOutOfRange> {
        let len = self.as_slice().len();
        if index >= len {
            return Err(IndexOutOfRange { index, len });
        }
        Ok(Vec::remove(self, index))
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario<L: PositionalList<i32>>(mut list: L) -> Vec<i32> {
        list.push(10);
        list.push(20);
        list.push(30);
        list.insert(1, 99).unwrap();
        assert_eq!(list.remove(0), Ok(10));
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(5), Err(IndexOutOfRange { index: 5, len: 3 }));
        assert_eq!(list.insert(4, 0), Err(IndexOutOfRange { index: 4, len: 3 }));
        (0..list.len()).map(|i| *list.get(i).unwrap()).collect()
    }

    #[test]
    fn skip_list_and_vec_agree() {
        let from_vec = scenario(Vec::new());
        let from_skip_list = scenario(IndexedSkipList::with_seed(1));
        assert_eq!(from_vec, vec![99, 20, 30]);
        assert_eq!(from_skip_list, from_vec);
    }

    #[test]
    fn clear_through_trait() {
        let mut list: IndexedSkipList<i32> = IndexedSkipList::with_seed(2);
        PositionalList::push(&mut list, 1);
        assert!(!PositionalList::is_empty(&list));
        PositionalList::clear(&mut list);
        assert!(PositionalList::is_empty(&list));
    }
}
