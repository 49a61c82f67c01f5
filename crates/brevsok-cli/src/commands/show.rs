//! Show command - display a single letter.

use crate::app::App;
use brevsok_core::{fields, Config, LetterId};
use std::path::PathBuf;

/// Run the show command.
pub fn run(config: Config, corpus_path: Option<PathBuf>, id: u64) -> anyhow::Result<()> {
    let app = App::new(config, corpus_path)?;

    let Some(letter) = app.corpus.get(LetterId::new(id)) else {
        anyhow::bail!("no letter with id {}", id);
    };

    let title = letter.first_value(fields::TITLE).unwrap_or("(untitled)");
    println!("Letter #{}: {}", letter.id, title);
    println!("{}", "=".repeat(title.len() + 10 + id.to_string().len()));
    println!();

    let date = letter.letter_date();
    if !date.is_empty() {
        println!("Date:        {}", date);
    }
    let creators = letter.creators();
    if !creators.is_empty() {
        println!("Creator:     {}", creators.join(", "));
    }
    if let Some(location) = letter.first_value(fields::LOCATION) {
        println!("Location:    {}", location);
    }
    if let Some(destination) = letter.first_value(fields::DESTINATION) {
        println!("Destination: {}", destination);
    }
    if !letter.tags.is_empty() {
        println!("Tags:        {}", letter.tags.join(", "));
    }
    if let Some(description) = letter.first_value(fields::DESCRIPTION) {
        println!();
        println!("{}", description);
    }
    if let Some(text) = letter.first_value(fields::TEXT) {
        println!();
        println!("{}", text);
    }

    if !letter.files.is_empty() {
        println!();
        println!("Files:");
        for file in &letter.files {
            println!(
                "  {} ({})",
                file.original_name.as_deref().unwrap_or("unnamed"),
                file.mime_type.as_deref().unwrap_or("unknown type")
            );
        }
    }

    Ok(())
}
