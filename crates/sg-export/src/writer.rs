use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sg_core::config::OutputFormat;
use sg_core::render::RenderedPage;
use sg_core::sanitize::base_name;

use crate::format::encode;

/// Nom de repli quand le texte ne laisse aucun caractère utilisable.
const FALLBACK_BASE: &str = "sign";

/// Writes rendered pages as `<dir>/<base>/<prefix>_<base>_<N>.<ext>`.
///
/// # Example
/// ```
/// use sg_core::config::OutputFormat;
/// use sg_export::SignWriter;
/// use std::path::Path;
///
/// let writer = SignWriter::new(Path::new("Results"), "cyberpunked", "HELLO", OutputFormat::Plain);
/// assert_eq!(writer.file_name(2), "cyberpunked_HELLO_2.txt");
/// assert_eq!(writer.dir(), Path::new("Results/HELLO"));
/// ```
pub struct SignWriter {
    dir: PathBuf,
    prefix: String,
    base: String,
    format: OutputFormat,
}

impl SignWriter {
    /// Crée un writer pour le texte source `text`.
    #[must_use]
    pub fn new(results_dir: &Path, prefix: &str, text: &str, format: OutputFormat) -> Self {
        let mut base = base_name(text);
        if base.is_empty() {
            log::warn!("Nom de fichier vide après nettoyage, utilisation de '{FALLBACK_BASE}'");
            base = FALLBACK_BASE.to_string();
        }
        Self {
            dir: results_dir.join(&base),
            prefix: prefix.to_string(),
            base,
            format,
        }
    }

    /// Dossier de sortie de ce texte.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// File stem for page `index`, also used as the Stendhal title.
    #[must_use]
    pub fn stem(&self, index: usize) -> String {
        format!("{}_{}_{index}", self.prefix, self.base)
    }

    #[must_use]
    pub fn file_name(&self, index: usize) -> String {
        format!("{}.{}", self.stem(index), self.format.extension())
    }

    /// Crée le dossier de sortie. Avec `clean`, le vide d'abord.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be removed or created.
    pub fn prepare(&self, clean: bool) -> Result<()> {
        if clean && self.dir.exists() {
            log::info!("Suppression de {}", self.dir.display());
            fs::remove_dir_all(&self.dir)
                .with_context(|| format!("Impossible de vider {}", self.dir.display()))?;
        }
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Impossible de créer {}", self.dir.display()))
    }

    /// Writes one page, overwriting any file of the same name.
    ///
    /// # Errors
    /// Returns an I/O error with the target path in context.
    pub fn write_page(&self, page: &RenderedPage) -> Result<PathBuf> {
        let path = self.dir.join(self.file_name(page.index));
        let content = encode(self.format, &self.stem(page.index), &page.lines);
        fs::write(&path, content)
            .with_context(|| format!("Échec d'écriture de {}", path.display()))?;
        log::debug!("Page {} ({:?}) → {}", page.index, page.text, path.display());
        Ok(path)
    }

    /// Writes every page in index order. Stops at the first failure; files
    /// already written stay on disk.
    ///
    /// # Errors
    /// Returns the first write error.
    pub fn write_all(&self, pages: &[RenderedPage]) -> Result<Vec<PathBuf>> {
        let paths = pages
            .iter()
            .map(|p| self.write_page(p))
            .collect::<Result<Vec<_>>>()?;
        log::info!("{} fichier(s) écrit(s) dans {}", paths.len(), self.dir.display());
        Ok(paths)
    }
}
