//! The injected rendering surface the widget draws against

pub mod tree;

pub use tree::{Dom, MountTarget, NodeId};
