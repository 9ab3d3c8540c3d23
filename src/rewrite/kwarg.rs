use serde_json::Value;

use crate::foundation::error::GraftResult;
use crate::graft::graph::Graft;
use crate::graft::node::Node;

/// Bind `kwarg` to the literal `value` on every op node whose type is in `op_types`.
///
/// Returns a new graft; `graft` and its cache id are untouched.
pub fn update_kwarg(
    graft: &Graft,
    op_types: &[&str],
    kwarg: &str,
    value: Value,
) -> GraftResult<Graft> {
    let mut replaced = 0usize;
    let out = graft.rewrite(|b, node| match node {
        Node::Op(mut op) if op_types.contains(&op.op_type.as_str()) => {
            let key = b.literal(value.clone());
            op.kwargs.insert(kwarg.to_string(), key);
            replaced += 1;
            Ok(Node::Op(op))
        }
        other => Ok(other),
    })?;
    tracing::debug!(kwarg, replaced, "updated keyword argument");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/rewrite/kwarg.rs"]
mod tests;
