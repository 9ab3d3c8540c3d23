//! The deferred computation graph: nodes, content-addressed keys, and the graft container.

pub(crate) mod builder;
pub(crate) mod fingerprint;
pub(crate) mod graph;
pub(crate) mod node;
pub mod op_kind;

pub use builder::GraftBuilder;
pub use fingerprint::CacheId;
pub use graph::{CACHE_ID_KEY, Graft, RETURNS_KEY, compute_cache_id, reset_graft};
pub use node::{Node, NodeKey, OpNode, ParamType, Parameter};
