use std::collections::BTreeMap;
use std::fmt;

use xxhash_rust::xxh3::Xxh3;

use crate::graft::node::{Node, NodeKey};

const XXH3_SEED: u64 = 0x6d6f_7361_6963_6766;

/// Deterministic structural hash of a graft.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheId(pub u128);

impl fmt::Display for CacheId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl serde::Serialize for CacheId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish64(self) -> u64 {
        self.inner.digest()
    }

    fn finish128(self) -> u128 {
        self.inner.digest128()
    }
}

/// Content-addressed key for `node`.
///
/// Arguments contribute their own keys, so a key covers the whole sub-graph below it.
/// `salt` is non-zero only when an unrelated node already owns the unsalted key.
pub(crate) fn node_key(node: &Node, salt: u32) -> NodeKey {
    let mut h = StableHasher::new();
    write_node(&mut h, node);
    if salt > 0 {
        h.write_u8(0xff);
        h.write_u32(salt);
    }
    NodeKey::new(format!("{:016x}", h.finish64()))
}

/// Hash of the node table plus the returns key.
pub(crate) fn graph_cache_id(nodes: &BTreeMap<NodeKey, Node>, returns: &NodeKey) -> CacheId {
    let mut h = StableHasher::new();
    h.write_u64(nodes.len() as u64);
    for (key, node) in nodes {
        h.write_str(key.as_str());
        write_node(&mut h, node);
    }
    h.write_str(returns.as_str());
    CacheId(h.finish128())
}

fn write_node(h: &mut StableHasher, node: &Node) {
    match node {
        Node::Literal(v) => {
            h.write_u8(0);
            write_json_value(h, v);
        }
        Node::Op(op) => {
            h.write_u8(1);
            h.write_str(&op.op_type);
            h.write_u32(op.args.len() as u32);
            for a in &op.args {
                h.write_str(a.as_str());
            }
            h.write_u32(op.kwargs.len() as u32);
            for (name, key) in &op.kwargs {
                h.write_str(name);
                h.write_str(key.as_str());
            }
        }
        Node::Param(p) => {
            h.write_u8(2);
            h.write_str(&p.name);
            h.write_str(p.param_type.as_str());
        }
    }
}

fn write_json_value(h: &mut StableHasher, v: &serde_json::Value) {
    match v {
        serde_json::Value::Null => h.write_u8(0),
        serde_json::Value::Bool(x) => {
            h.write_u8(1);
            h.write_u8(u8::from(*x));
        }
        serde_json::Value::Number(n) => {
            h.write_u8(2);
            h.write_str(&n.to_string());
        }
        serde_json::Value::String(s) => {
            h.write_u8(3);
            h.write_str(s);
        }
        serde_json::Value::Array(items) => {
            h.write_u8(4);
            h.write_u64(items.len() as u64);
            for item in items {
                write_json_value(h, item);
            }
        }
        serde_json::Value::Object(map) => {
            h.write_u8(5);
            let mut keys = map.keys().collect::<Vec<_>>();
            keys.sort();
            h.write_u64(keys.len() as u64);
            for k in keys {
                h.write_str(k);
                write_json_value(h, &map[k.as_str()]);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graft/fingerprint.rs"]
mod tests;
