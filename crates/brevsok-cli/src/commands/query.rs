//! Query command - search the corpus.

use crate::app::App;
use crate::OutputFormat;
use brevsok_core::{fields, parser, Config, LetterDocument, SortKey, UrlState};
use std::path::PathBuf;
use std::time::Instant;

/// Run the query command.
pub fn run(
    config: Config,
    corpus_path: Option<PathBuf>,
    expression: &str,
    sort: Option<String>,
    limit: usize,
    output: OutputFormat,
    link: bool,
) -> anyhow::Result<()> {
    let app = App::new(config, corpus_path)?;

    if app.corpus.is_empty() {
        eprintln!("Corpus is empty.");
        return Ok(());
    }

    let filters = parser::parse(expression);
    let sort = match sort {
        Some(ref s) => s
            .parse::<SortKey>()
            .map_err(|e| anyhow::anyhow!("{}", e))?,
        None => app.config.default_sort(),
    };
    let limit = if limit == 0 {
        app.config.general.max_results
    } else {
        limit
    };

    let start = Instant::now();
    let mut results = brevsok_core::evaluate(&app.corpus, &filters);
    brevsok_core::sort_documents(&mut results, sort);
    let total = results.len();
    results.truncate(limit);
    let elapsed = start.elapsed();

    match output {
        OutputFormat::Text => {
            for letter in &results {
                print_letter_line(&app.config, letter);
            }

            eprintln!();
            if total > results.len() {
                eprintln!(
                    "Showing {} of {} results ({:.3}ms)",
                    results.len(),
                    total,
                    elapsed.as_secs_f64() * 1000.0
                );
            } else {
                eprintln!(
                    "Found {} results in {:.3}ms",
                    total,
                    elapsed.as_secs_f64() * 1000.0
                );
            }
        }
        OutputFormat::Json => {
            let json_results: Vec<serde_json::Value> = results
                .iter()
                .map(|letter| {
                    serde_json::json!({
                        "id": letter.id.as_u64(),
                        "title": letter.first_value(fields::TITLE),
                        "date": letter.letter_date(),
                        "creators": letter.creators(),
                        "location": letter.first_value(fields::LOCATION),
                        "destination": letter.first_value(fields::DESTINATION),
                        "tags": letter.tags,
                    })
                })
                .collect();

            println!("{}", serde_json::to_string_pretty(&json_results)?);
        }
    }

    if link {
        let mut state = UrlState::new(filters);
        state.sort = sort;
        eprintln!("Link: ?{}", state.encode());
    }

    Ok(())
}

fn print_letter_line(config: &Config, letter: &LetterDocument) {
    let title = letter.first_value(fields::TITLE).unwrap_or("(untitled)");
    let date = letter.letter_date();
    if date.is_empty() {
        println!("#{:<5} {}", letter.id, title);
    } else {
        println!("#{:<5} {}  [{}]", letter.id, title, date);
    }

    let creators = letter.creators();
    if !creators.is_empty() {
        println!("       from {}", creators.join(", "));
    }

    if config.display.show_route {
        let location = letter.first_value(fields::LOCATION);
        let destination = letter.first_value(fields::DESTINATION);
        if location.is_some() || destination.is_some() {
            println!(
                "       {} -> {}",
                location.unwrap_or("?"),
                destination.unwrap_or("?")
            );
        }
    }

    if config.display.show_tags && !letter.tags.is_empty() {
        println!("       tags: {}", letter.tags.join(", "));
    }
}
