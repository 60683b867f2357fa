//! Catalog file format
//!
//! Headered CSV with the columns
//! `title,artist,genre,relatedArtist,relation,instrument,releaseDate`.
//! Missing columns and empty cells are read as `"Unknown"`.

use super::record::MusicRecord;
use super::CatalogResult;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Read catalog records from any reader
pub fn read_catalog<R: Read>(reader: R) -> CatalogResult<Vec<MusicRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in reader.deserialize::<MusicRecord>() {
        records.push(row?.normalized());
    }

    debug!("Parsed {} catalog rows", records.len());
    Ok(records)
}

/// Read catalog records from a file
pub fn read_catalog_file(path: impl AsRef<Path>) -> CatalogResult<Vec<MusicRecord>> {
    let path = path.as_ref();
    info!("Loading catalog from {:?}", path);
    let file = File::open(path)?;
    read_catalog(file)
}

/// Write catalog records with a header row
pub fn write_catalog<W: Write>(writer: W, records: &[MusicRecord]) -> CatalogResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write catalog records to a file, replacing it
pub fn write_catalog_file(path: impl AsRef<Path>, records: &[MusicRecord]) -> CatalogResult<()> {
    let file = File::create(path.as_ref())?;
    write_catalog(file, records)?;
    info!("Saved {} catalog rows to {:?}", records.len(), path.as_ref());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UNKNOWN;

    #[test]
    fn test_read_full_header() {
        let data = "\
title,artist,genre,relatedArtist,relation,instrument,releaseDate
Pumpy,Cadet (rapper),Afroswing,Krept and Konan,associatedBand,Unknown,2019-01-18
Fake Love,Drake,Hip hop,Unknown,Unknown,Unknown,2016-10-24
";
        let records = read_catalog(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].related_artist, "Krept and Konan");
        assert_eq!(records[0].release_date, "2019-01-18");
        assert!(!records[1].has_related_artist());
    }

    #[test]
    fn test_read_missing_columns_and_cells() {
        let data = "\
artist,title,genre
Drake,,Hip hop
";
        let records = read_catalog(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].artist, "Drake");
        assert_eq!(records[0].title, UNKNOWN);
        assert_eq!(records[0].release_date, UNKNOWN);
    }

    #[test]
    fn test_write_then_read() {
        let records = vec![
            MusicRecord::new("Song, with comma", "Artist", "Pop").with_release_date("2020-02-02"),
            MusicRecord::new("Other", "Artist", "Rock").with_related("Band", "associatedBand"),
            MusicRecord::new("Solo", "Player", "Jazz").with_instrument("Saxophone"),
        ];

        let mut buf = Vec::new();
        write_catalog(&mut buf, &records).unwrap();

        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("title,artist,genre,relatedArtist,relation,instrument,releaseDate"));

        let restored = read_catalog(buf.as_slice()).unwrap();
        assert_eq!(restored[2].instrument, "Saxophone");
        assert_eq!(restored, records);
    }
}
