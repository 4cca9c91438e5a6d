//! Internal node storage shared by the skip list engine.

pub(crate) mod node_arena;

pub(crate) use node_arena::{HEAD, NodeArena, NodeId, TAIL};
