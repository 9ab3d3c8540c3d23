use std::collections::{BTreeMap, HashMap, HashSet};

use serde_json::Value;

use crate::foundation::error::{GraftError, GraftResult};
use crate::graft::fingerprint::{self, node_key};
use crate::graft::graph::Graft;
use crate::graft::node::{Node, NodeKey, OpNode, Parameter};

/// Append-only node arena used to build a [`Graft`].
///
/// Every inserted node may only reference keys already present in the arena, so a finished
/// graft is acyclic by construction. Identical nodes share one key.
#[derive(Clone, Debug, Default)]
pub struct GraftBuilder {
    nodes: BTreeMap<NodeKey, Node>,
}

impl GraftBuilder {
    /// Start with an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing graft. Returns the builder and the graft's root key.
    pub fn from_graft(graft: &Graft) -> (Self, NodeKey) {
        let builder = Self {
            nodes: graft.node_map().clone(),
        };
        (builder, graft.returns().clone())
    }

    /// `true` when `key` is defined in this arena.
    pub fn contains(&self, key: &NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Insert a literal node.
    pub fn literal(&mut self, value: impl Into<Value>) -> NodeKey {
        self.intern(Node::Literal(value.into()))
    }

    /// Insert a deferred parameter node.
    pub fn param(&mut self, param: &Parameter) -> NodeKey {
        self.intern(Node::Param(param.clone()))
    }

    /// Insert an operation node over existing keys.
    ///
    /// Fails with an integrity error when an argument references a key that is not yet
    /// defined, which is also what rules out cycles.
    pub fn op(
        &mut self,
        op_type: &str,
        args: &[NodeKey],
        kwargs: BTreeMap<String, NodeKey>,
    ) -> GraftResult<NodeKey> {
        for key in args.iter().chain(kwargs.values()) {
            if !self.contains(key) {
                return Err(GraftError::integrity(format!(
                    "'{op_type}' argument references undefined key '{key}'"
                )));
            }
        }
        Ok(self.intern(Node::Op(
            OpNode::new(op_type, args.to_vec()).with_kwargs(kwargs),
        )))
    }

    /// Insert an operation whose arguments were produced by this builder.
    pub(crate) fn push_op(&mut self, op_type: &str, args: Vec<NodeKey>) -> NodeKey {
        self.intern(Node::Op(OpNode::new(op_type, args)))
    }

    pub(crate) fn push_op_with_kwargs(
        &mut self,
        op_type: &str,
        args: Vec<NodeKey>,
        kwargs: BTreeMap<String, NodeKey>,
    ) -> NodeKey {
        self.intern(Node::Op(OpNode::new(op_type, args).with_kwargs(kwargs)))
    }

    /// Copy every node of `other` into this arena and return the key of its root here.
    ///
    /// Nodes equal to ones already present are shared; a key already owned by a different
    /// node is renamed.
    pub fn merge(&mut self, other: &Graft) -> NodeKey {
        let mut renamed: HashMap<&NodeKey, NodeKey> = HashMap::new();
        for key in other.topological_order() {
            let Some(node) = other.node_map().get(key) else {
                continue;
            };
            let node = node
                .clone()
                .map_references(|r| renamed.get(r).cloned().unwrap_or_else(|| r.clone()));
            let new_key = self.intern(node);
            renamed.insert(key, new_key);
        }
        renamed
            .get(other.returns())
            .cloned()
            .unwrap_or_else(|| other.returns().clone())
    }

    /// Insert `node` under its content key, renaming on collision.
    pub(crate) fn intern(&mut self, node: Node) -> NodeKey {
        let mut salt = 0;
        loop {
            let key = node_key(&node, salt);
            match self.nodes.get(&key) {
                None => {
                    self.nodes.insert(key.clone(), node);
                    return key;
                }
                Some(existing) if *existing == node => return key,
                Some(_) => salt += 1,
            }
        }
    }

    /// Finish the graft rooted at `returns`.
    ///
    /// Nodes not reachable from `returns` are dropped.
    pub fn finish(self, returns: NodeKey) -> GraftResult<Graft> {
        if !self.contains(&returns) {
            return Err(GraftError::integrity(format!(
                "returns key '{returns}' is not defined"
            )));
        }
        Ok(self.seal(returns))
    }

    pub(crate) fn seal(self, returns: NodeKey) -> Graft {
        let mut nodes = self.nodes;
        let reachable = reachable_from(&nodes, &returns);
        nodes.retain(|k, _| reachable.contains(k));
        let cache_id = fingerprint::graph_cache_id(&nodes, &returns);
        Graft::from_sealed(nodes, returns, cache_id)
    }
}

fn reachable_from(nodes: &BTreeMap<NodeKey, Node>, root: &NodeKey) -> HashSet<NodeKey> {
    let mut seen = HashSet::new();
    let mut stack = vec![root.clone()];
    while let Some(key) = stack.pop() {
        if !seen.insert(key.clone()) {
            continue;
        }
        if let Some(node) = nodes.get(&key) {
            stack.extend(node.references().into_iter().cloned());
        }
    }
    seen
}

/// Rebuild an arbitrary node table bottom-up into a canonical graft.
///
/// `rewrite` sees each reachable node with its references already renamed to canonical keys
/// and returns the node to insert in its place. External input is validated here: dangling
/// references, a missing root, and cycles are integrity errors.
pub(crate) fn canonicalize<F>(
    nodes: &BTreeMap<NodeKey, Node>,
    returns: &NodeKey,
    mut rewrite: F,
) -> GraftResult<Graft>
where
    F: FnMut(&mut GraftBuilder, Node) -> GraftResult<Node>,
{
    if !nodes.contains_key(returns) {
        return Err(GraftError::integrity(format!(
            "returns key '{returns}' is not defined"
        )));
    }
    let order = checked_topological_order(nodes, returns)?;

    let mut builder = GraftBuilder::new();
    let mut renamed: HashMap<&NodeKey, NodeKey> = HashMap::new();
    for key in order {
        let node = nodes[key]
            .clone()
            .map_references(|r| renamed.get(r).cloned().unwrap_or_else(|| r.clone()));
        let node = rewrite(&mut builder, node)?;
        for r in node.references() {
            if !builder.contains(r) {
                return Err(GraftError::integrity(format!(
                    "node '{key}' references undefined key '{r}'"
                )));
            }
        }
        let new_key = builder.intern(node);
        renamed.insert(key, new_key);
    }

    let root = renamed
        .get(returns)
        .cloned()
        .ok_or_else(|| GraftError::integrity("returns key was not rebuilt"))?;
    Ok(builder.seal(root))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Post-order of the nodes reachable from `root`; dependencies come before dependents.
pub(crate) fn checked_topological_order<'a>(
    nodes: &'a BTreeMap<NodeKey, Node>,
    root: &'a NodeKey,
) -> GraftResult<Vec<&'a NodeKey>> {
    let mut marks: HashMap<&NodeKey, Mark> = HashMap::new();
    let mut order = Vec::with_capacity(nodes.len());
    // (key, index of next reference to visit)
    let mut stack: Vec<(&NodeKey, usize)> = vec![(root, 0)];
    marks.insert(root, Mark::Visiting);

    while let Some((key, next)) = stack.pop() {
        let node = nodes.get(key).ok_or_else(|| {
            GraftError::integrity(format!("reference to undefined key '{key}'"))
        })?;
        let refs = node.references();
        if let Some(child) = refs.get(next).copied() {
            stack.push((key, next + 1));
            match marks.get(child) {
                Some(Mark::Visiting) => {
                    return Err(GraftError::integrity(format!(
                        "cycle detected through key '{child}'"
                    )));
                }
                Some(Mark::Done) => {}
                None => {
                    if !nodes.contains_key(child) {
                        return Err(GraftError::integrity(format!(
                            "node '{key}' references undefined key '{child}' \
                             (string arguments name nodes, string literals need their own entry)"
                        )));
                    }
                    marks.insert(child, Mark::Visiting);
                    stack.push((child, 0));
                }
            }
        } else {
            marks.insert(key, Mark::Done);
            order.push(key);
        }
    }
    Ok(order)
}

#[cfg(test)]
#[path = "../../tests/unit/graft/builder.rs"]
mod tests;
