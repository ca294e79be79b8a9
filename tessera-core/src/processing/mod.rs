//! Chunk-level parallelism
//!
//! Chunks never share mutable state, so processing is a plain ordered map
//! that either runs in place or on a rayon pool.

pub mod parallel;

pub use parallel::map_ordered;
