pub mod tree_multiset;
pub mod tree_set;
