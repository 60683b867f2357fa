//! SongGraph CLI: train embeddings from a catalog and query similar songs

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use songgraph::catalog::read_catalog_file;
use songgraph::similarity::{results_to_json, write_results_csv};
use songgraph::{
    CsvFileSource, EmbeddingPipeline, EmbeddingStore, MusicGraph, RankedSong, SimilarityEngine,
    SongGraphConfig, SongQuery,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "songgraph", version, about = "SongGraph song recommendation CLI")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Train embeddings from a catalog CSV and save them
    Train {
        /// Catalog CSV file
        #[arg(long)]
        data: PathBuf,

        /// Embedding file to write
        #[arg(long)]
        output: PathBuf,

        /// YAML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Rank catalog songs by similarity to a song
    Similar {
        /// Catalog CSV file
        #[arg(long)]
        data: PathBuf,

        /// Embedding file written by `train`
        #[arg(long)]
        embeddings: PathBuf,

        #[arg(long)]
        title: String,

        #[arg(long)]
        artist: String,

        #[arg(long)]
        genre: String,

        /// Number of results
        #[arg(long, default_value_t = SongGraphConfig::default().search.top_n)]
        top_n: usize,
    },
    /// Print knowledge graph statistics for a catalog
    Stats {
        /// Catalog CSV file
        #[arg(long)]
        data: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Train { data, output, config } => run_train(&data, &output, config.as_deref()),
        Commands::Similar {
            data,
            embeddings,
            title,
            artist,
            genre,
            top_n,
        } => {
            let query = SongQuery::new(title, artist, genre);
            run_similar(&data, &embeddings, &query, top_n, &cli.format)
        }
        Commands::Stats { data } => run_stats(&data, &cli.format),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run_train(data: &Path, output: &Path, config: Option<&Path>) -> anyhow::Result<()> {
    let config = match config {
        Some(path) => SongGraphConfig::from_yaml_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => SongGraphConfig::default(),
    };

    let pipeline = EmbeddingPipeline::new(config)?;
    let model = pipeline.run(&CsvFileSource::new(data))?;
    model
        .store
        .save(output)
        .with_context(|| format!("writing embeddings to {}", output.display()))?;

    println!(
        "Trained {} embeddings ({} dimensions) from {} records and {} walks",
        model.store.len(),
        model.store.dimensions(),
        model.records.len(),
        model.walk_count
    );
    println!("Saved to {}", output.display());
    Ok(())
}

fn run_similar(
    data: &Path,
    embeddings: &Path,
    query: &SongQuery,
    top_n: usize,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let records = read_catalog_file(data)
        .with_context(|| format!("reading catalog {}", data.display()))?;
    let store = EmbeddingStore::load(embeddings)
        .with_context(|| format!("reading embeddings {}", embeddings.display()))?;
    info!(
        "Loaded {} records and {} embeddings",
        records.len(),
        store.len()
    );

    let engine = SimilarityEngine::new(Arc::new(records), Arc::new(store));
    let results = engine.find_similar(query, top_n);

    match format {
        OutputFormat::Json => println!("{}", results_to_json(&results)?),
        OutputFormat::Csv => write_results_csv(std::io::stdout().lock(), &results)?,
        OutputFormat::Table => print_results_table(&results),
    }
    Ok(())
}

fn print_results_table(results: &[RankedSong]) {
    if results.is_empty() {
        println!("(no results)");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "title",
        "artist",
        "genre",
        "releaseDate",
        "similarity",
        "influence",
    ]);

    for song in results {
        table.add_row(vec![
            song.record.title.clone(),
            song.record.artist.clone(),
            song.record.genre.clone(),
            song.record.release_date.clone(),
            format!("{:.4}", song.similarity),
            song.influence.clone(),
        ]);
    }

    println!("{}", table);
    println!("{} row(s)", results.len());
}

fn run_stats(data: &Path, format: &OutputFormat) -> anyhow::Result<()> {
    let records = read_catalog_file(data)
        .with_context(|| format!("reading catalog {}", data.display()))?;
    let stats = MusicGraph::from_records(&records).statistics();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Csv => {
            println!("metric,count");
            println!("records,{}", records.len());
            println!("artists,{}", stats.artist_count);
            println!("genres,{}", stats.genre_count);
            println!("edges,{}", stats.edge_count);
            println!("isolated,{}", stats.isolated_count);
            for (relation, count) in &stats.edges_by_relation {
                println!("edges:{},{}", relation, count);
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["metric", "count"]);
            table.add_row(vec!["records".to_string(), records.len().to_string()]);
            table.add_row(vec!["artists".to_string(), stats.artist_count.to_string()]);
            table.add_row(vec!["genres".to_string(), stats.genre_count.to_string()]);
            table.add_row(vec!["edges".to_string(), stats.edge_count.to_string()]);
            table.add_row(vec!["isolated".to_string(), stats.isolated_count.to_string()]);
            for (relation, count) in &stats.edges_by_relation {
                table.add_row(vec![format!("edges: {}", relation), count.to_string()]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}
