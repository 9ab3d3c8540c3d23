use std::collections::{BTreeMap, BTreeSet};

use serde::ser::SerializeMap;
use serde_json::Value;

use crate::foundation::error::{GraftError, GraftResult};
use crate::graft::builder::{self, GraftBuilder};
use crate::graft::fingerprint::{self, CacheId};
use crate::graft::node::{Node, NodeKey, Parameter};

/// Reserved graft entry naming the root node.
pub const RETURNS_KEY: &str = "returns";
/// Reserved graft entry carrying the derived cache id.
pub const CACHE_ID_KEY: &str = "cache_id";

/// An immutable, acyclic computation graph with a single root.
///
/// Grafts are only produced by [`GraftBuilder`] or by [`reset_graft`], so every referenced key
/// exists, `returns` resolves, and node keys are canonical. The cache id is derived state: it is
/// recomputed whenever a graft is sealed and never copied from another graft.
#[derive(Clone, Debug, PartialEq)]
pub struct Graft {
    nodes: BTreeMap<NodeKey, Node>,
    returns: NodeKey,
    cache_id: CacheId,
}

impl Graft {
    pub(crate) fn from_sealed(
        nodes: BTreeMap<NodeKey, Node>,
        returns: NodeKey,
        cache_id: CacheId,
    ) -> Self {
        Self {
            nodes,
            returns,
            cache_id,
        }
    }

    /// Graft holding a single literal.
    pub fn literal(value: impl Into<Value>) -> Self {
        let mut b = GraftBuilder::new();
        let key = b.literal(value);
        b.seal(key)
    }

    /// Graft holding a single operation without arguments.
    pub fn nullary(op_type: &str) -> Self {
        let mut b = GraftBuilder::new();
        let key = b.push_op(op_type, Vec::new());
        b.seal(key)
    }

    /// Key of the root node.
    pub fn returns(&self) -> &NodeKey {
        &self.returns
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        // `returns` always resolves in a sealed graft.
        &self.nodes[&self.returns]
    }

    /// Operation name of the root node, if it is an operation.
    pub fn root_op_type(&self) -> Option<&str> {
        self.root().op_type()
    }

    /// Look up a node by key.
    pub fn resolve(&self, key: &str) -> GraftResult<&Node> {
        self.nodes
            .get(&NodeKey::new(key))
            .ok_or_else(|| GraftError::unknown_key(key))
    }

    /// Look up a node and require a literal value.
    pub fn resolve_literal(&self, key: &str) -> GraftResult<&Value> {
        self.resolve(key)?.as_literal().ok_or_else(|| {
            GraftError::validation(format!("graft key '{key}' is not a literal"))
        })
    }

    /// The derived structural hash.
    pub fn cache_id(&self) -> CacheId {
        self.cache_id
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a graft holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate nodes in key order.
    pub fn nodes(&self) -> impl Iterator<Item = (&NodeKey, &Node)> {
        self.nodes.iter()
    }

    pub(crate) fn node_map(&self) -> &BTreeMap<NodeKey, Node> {
        &self.nodes
    }

    /// Deferred parameters this graft depends on, in key order.
    pub fn parameters(&self) -> Vec<&Parameter> {
        self.nodes
            .values()
            .filter_map(|n| match n {
                Node::Param(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    /// Node keys with dependencies before dependents, ending at the root.
    pub fn topological_order(&self) -> Vec<&NodeKey> {
        builder::checked_topological_order(&self.nodes, &self.returns).unwrap_or_default()
    }

    /// Build a new graft by passing every node, bottom-up, through `rewrite`.
    ///
    /// The input graft is not modified.
    pub fn rewrite<F>(&self, rewrite: F) -> GraftResult<Graft>
    where
        F: FnMut(&mut GraftBuilder, Node) -> GraftResult<Node>,
    {
        builder::canonicalize(&self.nodes, &self.returns, rewrite)
    }

    /// Validate and canonicalize an external node table.
    pub fn from_nodes(nodes: BTreeMap<NodeKey, Node>, returns: NodeKey) -> GraftResult<Graft> {
        builder::canonicalize(&nodes, &returns, |_, n| Ok(n))
    }
}

/// Recompute the structural hash of `graft`, ignoring its stored cache id.
pub fn compute_cache_id(graft: &Graft) -> CacheId {
    fingerprint::graph_cache_id(graft.node_map(), graft.returns())
}

/// Rebuild `graft` with canonical keys and a freshly computed cache id.
///
/// Used after deserialization so a restored graft never carries an identity that was not
/// derived from its own structure.
pub fn reset_graft(graft: &Graft) -> GraftResult<Graft> {
    graft.rewrite(|_, n| Ok(n))
}

impl serde::Serialize for Graft {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.nodes.len() + 2))?;
        for (key, node) in &self.nodes {
            map.serialize_entry(key.as_str(), node)?;
        }
        map.serialize_entry(RETURNS_KEY, self.returns.as_str())?;
        map.serialize_entry(CACHE_ID_KEY, &self.cache_id)?;
        map.end()
    }
}

impl<'de> serde::Deserialize<'de> for Graft {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let mut raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let returns = match raw.remove(RETURNS_KEY) {
            Some(Value::String(s)) => NodeKey::new(s),
            Some(other) => {
                return Err(D::Error::custom(format!(
                    "graft '{RETURNS_KEY}' must be a key string, got {other}"
                )));
            }
            None => return Err(D::Error::custom(format!("graft is missing '{RETURNS_KEY}'"))),
        };
        raw.remove(CACHE_ID_KEY);

        let inline = hoist_inline_literals(&mut raw);
        let mut nodes = BTreeMap::new();
        for (key, value) in raw {
            let node: Node = serde_json::from_value(value)
                .map_err(|e| D::Error::custom(format!("graft node '{key}': {e}")))?;
            nodes.insert(NodeKey::new(key), node);
        }
        for (key, value) in inline {
            nodes.insert(NodeKey::new(key), Node::Literal(value));
        }
        Graft::from_nodes(nodes, returns).map_err(D::Error::custom)
    }
}

/// Move non-string arguments of operation records into literal entries of their own.
///
/// Strings always name nodes, so only numbers, booleans, null, lists and mappings can be
/// written inline. Returns the new `(key, literal)` entries.
fn hoist_inline_literals(raw: &mut BTreeMap<String, Value>) -> Vec<(String, Value)> {
    let mut taken: BTreeSet<String> = raw.keys().cloned().collect();
    let mut inline = Vec::new();
    let mut hoist = |base: String, slot: &mut Value| {
        if slot.is_string() {
            return;
        }
        let mut key = base;
        while taken.contains(&key) {
            key.push('\'');
        }
        taken.insert(key.clone());
        inline.push((key.clone(), std::mem::replace(slot, Value::String(key))));
    };

    for (key, value) in raw.iter_mut() {
        let Value::Object(record) = value else {
            continue;
        };
        if !record.contains_key("op_type") {
            continue;
        }
        if let Some(Value::Array(args)) = record.get_mut("args") {
            for (i, arg) in args.iter_mut().enumerate() {
                hoist(format!("{key}/{i}"), arg);
            }
        }
        if let Some(Value::Object(kwargs)) = record.get_mut("kwargs") {
            for (name, arg) in kwargs.iter_mut() {
                hoist(format!("{key}/{name}"), arg);
            }
        }
    }
    inline
}

#[cfg(test)]
#[path = "../../tests/unit/graft/graph.rs"]
mod tests;
