// src/main.rs
//
// rmp-lookup: resolve instructor names the way the schedule page does,
// through one session cache.

use anyhow::Context;
use clap::Parser;
use log::info;
use std::io::BufRead;

use rmp_annotate::application::{fallback_search_url, lookup_ratings, AppState, RatingResponse};
use rmp_annotate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    config.validate()?;

    let names = if config.names.is_empty() {
        std::io::stdin()
            .lock()
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .context("reading names from stdin")?
    } else {
        config.names.clone()
    };

    let state = AppState::new(&config).context("building session")?;
    let results = lookup_ratings(&state, &names).await;

    for (name, response) in &results {
        let Some(response) = response else {
            continue;
        };
        if config.json {
            println!("{}", serde_json::to_string(response)?);
            continue;
        }
        match response {
            RatingResponse::Found(found) => {
                let difficulty = found
                    .difficulty
                    .map(|d| format!("{:.1}", d))
                    .unwrap_or_else(|| "n/a".to_string());
                let again = found
                    .would_take_again
                    .map(|p| format!("{:.0}%", p))
                    .unwrap_or_else(|| "n/a".to_string());
                println!(
                    "{}: {:.1} ({} {}, difficulty {}, would take again {}, {} ratings) {}",
                    name,
                    found.rating,
                    found.first_name,
                    found.last_name,
                    difficulty,
                    again,
                    found.num_ratings,
                    found.profile_url.as_deref().unwrap_or("")
                );
            }
            RatingResponse::Unavailable(unavailable) => {
                let link = fallback_search_url(name.trim(), &config.school_name)?;
                println!("{}: N/A ({}) {}", name, unavailable.error, link);
            }
        }
    }

    info!(
        "{} names, {} cached identities, {} lookups sent",
        names.len(),
        state.cache.cached_len(),
        state.cache.external_calls()
    );
    Ok(())
}
