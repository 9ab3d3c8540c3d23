//! Boundary to the tile rendering collaborator.

pub mod layer;
