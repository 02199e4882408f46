//! File boundary of the world engine.
//!
//! `world-core` never touches storage; this crate reads and writes world
//! documents (JSON or RON) and engine configuration (TOML plus environment
//! overrides), handing plain `world-core` values to the caller.

pub mod loaders;

pub use loaders::{ConfigLoader, DocumentFormat, LoadResult, WorldDocument, WorldLoader};
