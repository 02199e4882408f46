//! Composite flow nodes for deterministic, single-pass rule trees.
//!
//! Every node completes within the tick it is evaluated in. There is no
//! running state and no delta time: a node either fired (`Success`) or did
//! nothing (`Failure`).
//!
//! - **Borrowing composites**: children are borrowed slices, so trees that
//!   live in plain data (e.g. deserialized rule lists) can be walked without
//!   boxing every node
//! - **Caller-supplied order**: randomized traversal is expressed as an
//!   explicit permutation, keeping randomness (and its seed) outside the tree
//! - **Zero dependencies**
//!
//! # Architecture
//!
//! - [`Behavior`]: core trait for all nodes
//! - [`Status`]: Success or Failure
//! - Composite nodes: [`Selector`] (first child that fires), [`Every`]
//!   (all children, fires if any fired)
//! - Decorator nodes: [`Repeat`]

pub mod behavior;
pub mod composite;
pub mod decorator;
pub mod status;

pub use behavior::Behavior;
pub use composite::{Every, Selector};
pub use decorator::Repeat;
pub use status::Status;
