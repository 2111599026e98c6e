//! Indexed skip lists: positional lists with O(log n) expected insert, remove and access.
//!
//! # Quick Start
//!
//! ```
//! use indexed_skiplist::IndexedSkipList;
//!
//! let mut list = IndexedSkipList::new();
//! list.push(10);
//! list.push(20);
//! list.push(30);
//! list.insert(1, 99).unwrap();
//! assert_eq!(list.to_string(), "[10, 99, 20, 30]");
//!
//! assert_eq!(list.remove(0), Ok(10));
//! assert_eq!(list.get(0), Ok(&99));
//! assert!(list.get(5).is_err());
//! ```
//!
//! Tower heights are random. Use [`IndexedSkipList::with_seed`] or a [`SkipListConfig`] with a
//! seed to make the shape of the list reproducible.

mod config;
mod error;
mod level;
mod node;
mod positional;
mod skip_list;

pub use config::{DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY, MAX_LEVEL_LIMIT, SkipListConfig};
pub use error::{ConfigError, IndexOutOfRange};
pub use positional::PositionalList;
pub use skip_list::{IndexedSkipList, Iter, LevelDump};
