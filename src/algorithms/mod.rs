pub mod backtracking;
pub mod dynamic;
pub mod graph;
pub mod hashing;
pub mod heap;
pub mod linked_list;
pub mod searching;
pub mod sorting;
pub mod tree;
pub mod trie;

pub use heap::HeapOrder;
pub use sorting::PivotStrategy;
