//! Music metadata record

use serde::{Deserialize, Serialize};

/// Placeholder used for every missing value
pub const UNKNOWN: &str = "Unknown";

fn unknown() -> String {
    UNKNOWN.to_string()
}

/// One song row as delivered by the acquisition layer.
///
/// Column names follow the catalog file header:
/// `title,artist,genre,relatedArtist,relation,instrument,releaseDate`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicRecord {
    #[serde(default = "unknown")]
    pub title: String,
    #[serde(default = "unknown")]
    pub artist: String,
    #[serde(default = "unknown")]
    pub genre: String,
    #[serde(default = "unknown")]
    pub related_artist: String,
    #[serde(default = "unknown")]
    pub relation: String,
    #[serde(default = "unknown")]
    pub instrument: String,
    #[serde(default = "unknown")]
    pub release_date: String,
}

impl MusicRecord {
    /// Record with the three mandatory fields set and everything else unknown
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        MusicRecord {
            title: title.into(),
            artist: artist.into(),
            genre: genre.into(),
            related_artist: unknown(),
            relation: unknown(),
            instrument: unknown(),
            release_date: unknown(),
        }
    }

    pub fn with_release_date(mut self, date: impl Into<String>) -> Self {
        self.release_date = date.into();
        self
    }

    pub fn with_instrument(mut self, instrument: impl Into<String>) -> Self {
        self.instrument = instrument.into();
        self
    }

    /// Attach a related artist and the relation label linking it
    pub fn with_related(mut self, artist: impl Into<String>, relation: impl Into<String>) -> Self {
        self.related_artist = artist.into();
        self.relation = relation.into();
        self
    }

    /// Whether the record links its artist to another artist
    pub fn has_related_artist(&self) -> bool {
        !is_unknown(&self.related_artist)
    }

    /// Replace empty or whitespace-only fields with `UNKNOWN` and trim the rest
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.title,
            &mut self.artist,
            &mut self.genre,
            &mut self.related_artist,
            &mut self.relation,
            &mut self.instrument,
            &mut self.release_date,
        ] {
            let trimmed = field.trim();
            if trimmed.is_empty() {
                *field = unknown();
            } else if trimmed.len() != field.len() {
                *field = trimmed.to_string();
            }
        }
        self
    }
}

/// Whether a field carries the missing-value placeholder
pub fn is_unknown(value: &str) -> bool {
    value == UNKNOWN
}
