use std::path::PathBuf;

use anyhow::Result;
use sg_core::config::SignConfig;
use sg_core::library::Library;
use sg_core::paginate::paginate;
use sg_core::render::Renderer;
use sg_export::SignWriter;

/// Résultat d'un run : dossier de sortie et fichiers écrits, dans l'ordre.
#[derive(Debug)]
pub struct Outcome {
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Pagine, rend puis écrit `text`.
///
/// Every page is rendered before the first file is written, so an
/// unsupported character leaves the output directory untouched.
///
/// # Errors
/// Returns an error for an empty text, an unsupported character, or a
/// filesystem failure.
pub fn run(config: &SignConfig, library: &Library, text: &str) -> Result<Outcome> {
    log::info!("Étape 1/3 : Pagination par {} glyphes", config.page_size);
    let pages = paginate(text, config.page_size)?;

    log::info!("Étape 2/3 : Rendu de {} page(s)", pages.len());
    let rendered = Renderer::new(library, config.render_options()).render_all(&pages)?;

    let writer = SignWriter::new(&config.output_dir, &config.prefix, text, config.format);
    log::info!("Étape 3/3 : Écriture dans {}", writer.dir().display());
    writer.prepare(config.clean_output)?;
    let files = writer.write_all(&rendered)?;

    Ok(Outcome {
        dir: writer.dir().to_path_buf(),
        files,
    })
}
