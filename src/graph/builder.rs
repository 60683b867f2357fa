//! Graph construction from catalog records

use super::store::MusicGraph;
use super::types::{NodeKey, RelationKind};
use crate::catalog::{is_unknown, MusicRecord};
use tracing::{info, warn};

/// Builds a `MusicGraph` from records.
///
/// Per record:
/// - artist node and genre node
/// - `belongs_to` edge between them
/// - if a related artist is known, its artist node and an edge carrying the record's relation
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: MusicGraph,
    unrecognized_relations: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a full record batch
    pub fn build(records: &[MusicRecord]) -> MusicGraph {
        let mut builder = Self::new();
        for record in records {
            builder.add_record(record);
        }
        builder.finish()
    }

    /// Add one record's nodes and edges
    pub fn add_record(&mut self, record: &MusicRecord) {
        let artist = self.graph.add_node(NodeKey::artist(&record.artist));
        let genre = self.graph.add_node(NodeKey::genre(&record.genre));
        self.graph.add_edge(artist, genre, RelationKind::BelongsTo);

        if record.has_related_artist() {
            if !is_unknown(&record.relation) && RelationKind::parse(&record.relation).is_none() {
                self.unrecognized_relations += 1;
            }
            let related = self.graph.add_node(NodeKey::artist(&record.related_artist));
            self.graph
                .add_edge(artist, related, RelationKind::from_label(&record.relation));
        }
    }

    /// Finish building and return the graph
    pub fn finish(self) -> MusicGraph {
        if self.unrecognized_relations > 0 {
            warn!(
                "{} records carried an unrecognized relation label; stored as '{}'",
                self.unrecognized_relations,
                RelationKind::Related
            );
        }
        info!(
            "Graph built with {} nodes and {} edges",
            self.graph.node_count(),
            self.graph.edge_count()
        );
        self.graph
    }
}

impl MusicGraph {
    /// Shorthand for `GraphBuilder::build`
    pub fn from_records(records: &[MusicRecord]) -> Self {
        GraphBuilder::build(records)
    }
}
