//! Ranked result export (CSV and JSON)

use super::engine::RankedSong;
use crate::catalog::CatalogResult;
use serde::Serialize;
use std::io::Write;

/// Flat result row with the exported column names
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow<'a> {
    pub title: &'a str,
    pub artist: &'a str,
    pub genre: &'a str,
    pub release_date: &'a str,
    pub similarity: f32,
    pub influence: &'a str,
}

impl<'a> From<&'a RankedSong> for ResultRow<'a> {
    fn from(song: &'a RankedSong) -> Self {
        ResultRow {
            title: &song.record.title,
            artist: &song.record.artist,
            genre: &song.record.genre,
            release_date: &song.record.release_date,
            similarity: song.similarity,
            influence: &song.influence,
        }
    }
}

/// Write results as headered CSV
pub fn write_results_csv<W: Write>(writer: W, results: &[RankedSong]) -> CatalogResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for song in results {
        writer.serialize(ResultRow::from(song))?;
    }
    writer.flush()?;
    Ok(())
}

/// Render results as a pretty-printed JSON array
pub fn results_to_json(results: &[RankedSong]) -> serde_json::Result<String> {
    let rows: Vec<ResultRow<'_>> = results.iter().map(ResultRow::from).collect();
    serde_json::to_string_pretty(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MusicRecord;
    use crate::similarity::FeatureContributions;

    fn results() -> Vec<RankedSong> {
        let contributions = FeatureContributions { artist: 0.25, genre: 0.75 };
        vec![RankedSong {
            record: MusicRecord::new("Pumpy", "Cadet (rapper)", "Afroswing").with_release_date("2019-01-18"),
            similarity: 0.5,
            influence: contributions.influence(),
            contributions,
        }]
    }

    #[test]
    fn test_csv_columns() {
        let mut out = Vec::new();
        write_results_csv(&mut out, &results()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("title,artist,genre,releaseDate,similarity,influence"));
        assert_eq!(
            lines.next(),
            Some("Pumpy,Cadet (rapper),Afroswing,2019-01-18,0.5,\"artist: 25.00%, genre: 75.00%\"")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_json_rows() {
        let json = results_to_json(&results()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["releaseDate"], "2019-01-18");
        assert_eq!(value[0]["similarity"], 0.5);
        assert_eq!(value[0]["influence"], "artist: 25.00%, genre: 75.00%");
        assert_eq!(results_to_json(&[]).unwrap(), "[]");
    }
}
