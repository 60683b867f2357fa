//! Music knowledge graph
//!
//! This module implements the graph data model:
//! - Artist and genre nodes, namespaced by kind
//! - Undirected, typed edges (`belongs_to` and artist-to-artist relations)
//! - Multiple edges between the same nodes when their relations differ
//! - Construction from catalog records

pub mod builder;
pub mod store;
pub mod types;

// Re-export main types
pub use builder::GraphBuilder;
pub use store::{GraphEdge, GraphStatistics, MusicGraph};
pub use types::{NodeKey, NodeKind, ParseNodeKeyError, RelationKind};
