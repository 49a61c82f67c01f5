//! Stats command - show corpus statistics and facet values.

use crate::app::App;
use brevsok_core::{Config, MetadataIndex};
use std::path::PathBuf;

/// Run the stats command.
pub fn run(config: Config, corpus_path: Option<PathBuf>) -> anyhow::Result<()> {
    let app = App::new(config, corpus_path)?;

    println!("Brevsok Corpus");
    println!("==============");
    println!();

    if app.corpus.is_empty() {
        println!("Corpus is empty.");
        return Ok(());
    }

    let stats = app.corpus.stats();
    let index = MetadataIndex::build(&app.corpus);

    println!("Summary:");
    println!("  Total letters: {}", stats.total_letters);
    println!("  Dated:         {}", stats.dated);
    println!("  Tagged:        {}", stats.tagged);
    if let (Some(earliest), Some(latest)) = (&stats.earliest, &stats.latest) {
        println!("  Date range:    {} to {}", earliest, latest);
    }

    println!();
    println!("Facet values:");
    println!("  Creators:      {}", index.creators.len());
    println!("  Years:         {}", index.years.len());
    println!("  Tags:          {}", index.tags.len());
    println!("  Locations:     {}", index.locations.len());
    println!("  Destinations:  {}", index.destinations.len());

    if !index.years.is_empty() {
        println!();
        println!("Years: {}", index.years.join(", "));
    }
    if !index.tags.is_empty() {
        println!();
        println!("Tags: {}", index.tags.join(", "));
    }

    Ok(())
}
