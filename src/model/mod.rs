//! Core tree data structures and the derived per-node index.
//!
//! The architecture catalog is held in an arena: nodes are owned by
//! [`ArchTree`] and addressed by [`NodeId`]. Children are owned ids, the
//! parent link is a plain id, so the back-referenced tree shape of the
//! payload never turns into a reference cycle.
//!
//! Derived state (`dependents`, `index`) is recomputed by
//! [`build_index`] on every rebuild and is a disposable cache, never a
//! source of truth.

mod index;
mod tree;

pub use index::*;
pub use tree::*;
