//! Core type definitions for the music knowledge graph

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of a graph node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Artist,
    Genre,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Artist => "artist",
            NodeKind::Genre => "genre",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a node key from its canonical string form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid node key '{0}': expected 'artist:<name>' or 'genre:<name>'")]
pub struct ParseNodeKeyError(pub String);

/// Node identity: the pair (kind, name).
///
/// An artist and a genre sharing a literal name are different nodes.
/// The canonical string form is `artist:<name>` or `genre:<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeKey {
    pub kind: NodeKind,
    pub name: String,
}

impl NodeKey {
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        NodeKey {
            kind,
            name: name.into(),
        }
    }

    pub fn artist(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Artist, name)
    }

    pub fn genre(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Genre, name)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

impl FromStr for NodeKey {
    type Err = ParseNodeKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, name) = s
            .split_once(':')
            .ok_or_else(|| ParseNodeKeyError(s.to_string()))?;
        let kind = match kind {
            "artist" => NodeKind::Artist,
            "genre" => NodeKind::Genre,
            _ => return Err(ParseNodeKeyError(s.to_string())),
        };
        Ok(NodeKey::new(kind, name))
    }
}

/// Relationship carried by an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum RelationKind {
    /// Artist performs in a genre
    BelongsTo,
    AssociatedBand,
    CollaboratesWith,
    InfluencedBy,
    Influences,
    /// Related artist whose relation label is missing or unrecognized
    Related,
}

impl RelationKind {
    /// Relations that can link two artists
    pub const ARTIST_RELATIONS: [RelationKind; 5] = [
        RelationKind::AssociatedBand,
        RelationKind::CollaboratesWith,
        RelationKind::InfluencedBy,
        RelationKind::Influences,
        RelationKind::Related,
    ];

    /// Parse a relation label; `None` if it is not one of the known labels
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "belongs_to" => Some(RelationKind::BelongsTo),
            "associatedBand" => Some(RelationKind::AssociatedBand),
            "collaboratesWith" => Some(RelationKind::CollaboratesWith),
            "influencedBy" => Some(RelationKind::InfluencedBy),
            "influences" => Some(RelationKind::Influences),
            "related" => Some(RelationKind::Related),
            _ => None,
        }
    }

    /// Parse a relation label taken from an artist-to-artist record
    pub fn from_label(label: &str) -> Self {
        match Self::parse(label) {
            Some(RelationKind::BelongsTo) | None => RelationKind::Related,
            Some(kind) => kind,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::BelongsTo => "belongs_to",
            RelationKind::AssociatedBand => "associatedBand",
            RelationKind::CollaboratesWith => "collaboratesWith",
            RelationKind::InfluencedBy => "influencedBy",
            RelationKind::Influences => "influences",
            RelationKind::Related => "related",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
