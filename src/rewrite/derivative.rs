//! Finite-difference derivative nodes.

use crate::graft::builder::GraftBuilder;
use crate::graft::graph::Graft;
use crate::graft::op_kind;

fn wrap_root(graft: &Graft, op_type: &str) -> Graft {
    let (mut b, root) = GraftBuilder::from_graft(graft);
    let key = b.push_op(op_type, vec![root]);
    b.seal(key)
}

/// Undivided difference along the x (east-west) axis.
pub fn gradient_x(graft: &Graft) -> Graft {
    wrap_root(graft, op_kind::GRADIENT_X)
}

/// Undivided difference along the y (north-south) axis.
pub fn gradient_y(graft: &Graft) -> Graft {
    wrap_root(graft, op_kind::GRADIENT_Y)
}

/// Per-pixel x resolution, read from the data's georeferencing when evaluated.
pub fn resolution_graft_x() -> Graft {
    Graft::nullary(op_kind::RESOLUTION_X)
}

/// Per-pixel y resolution, read from the data's georeferencing when evaluated.
pub fn resolution_graft_y() -> Graft {
    Graft::nullary(op_kind::RESOLUTION_Y)
}

#[cfg(test)]
#[path = "../../tests/unit/rewrite/derivative.rs"]
mod tests;
