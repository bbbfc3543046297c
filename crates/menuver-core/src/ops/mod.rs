pub mod tree;

pub use tree::{ChildIndex, MenuTree};
