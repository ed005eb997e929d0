use clap::Parser;
use pokedex::core::config::{self, CliOverrides, PokedexConfig};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "pokedex", about = "Browse, favorite and share Pokémon from the terminal")]
struct Args {
    /// PokéAPI base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Pokémon per page
    #[arg(long)]
    page_size: Option<usize>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to pokedex.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("pokedex.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, using defaults", e);
        PokedexConfig::default()
    });
    let overrides = CliOverrides {
        base_url: args.base_url,
        page_size: args.page_size,
    };
    let resolved = config::resolve(&file_config, &overrides);

    log::info!(
        "Pokédex starting up against {} (page size {})",
        resolved.base_url,
        resolved.page_size
    );

    pokedex::tui::run(resolved)
}
