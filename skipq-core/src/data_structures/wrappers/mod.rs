//! Views layered over a list.

pub mod read_only;

pub use read_only::ReadOnlyView;
