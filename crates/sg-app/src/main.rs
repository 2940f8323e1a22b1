use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use sg_app::{cli, pipeline, prompt};
use sg_core::config::OutputFormat;
use sg_core::error::CoreError;

/// Dossier du mod Stendhal où copier les fichiers générés.
const STENDHAL_SIGNS_DIR: &str = "minecraft/config/stendhal/signs/";

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config, puis appliquer les overrides CLI
    let mut config = cli.resolve_config()?;
    cli.apply_overrides(&mut config)?;

    // 4. Charger la bibliothèque (fatal avant toute sortie)
    let library = sg_core::library::load_library(&config.library_path)?;

    // 5. Texte et option
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let text = match cli.text.as_deref().map(str::trim) {
        Some("") => return Err(CoreError::EmptyInput.into()),
        Some(text) => text.to_string(),
        None => prompt::read_text(&mut input, &mut stdout)?,
    };
    if cli.is_interactive() && cli.page_size.is_none() {
        config.page_size = prompt::read_page_size(&mut input, &mut stdout, config.page_size)?;
    }

    // 6. Paginer, rendre, écrire
    let outcome = pipeline::run(&config, &library, &text)?;

    writeln!(
        stdout,
        "{} fichier(s) écrit(s) dans {}",
        outcome.files.len(),
        outcome.dir.display()
    )?;
    if config.format == OutputFormat::Stendhal {
        writeln!(stdout, "Copier les fichiers générés dans {STENDHAL_SIGNS_DIR}")?;
    }
    Ok(())
}
