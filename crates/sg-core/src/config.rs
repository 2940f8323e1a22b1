use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::paginate::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MIN_PAGE_SIZE};
use crate::render::RenderOptions;

/// Préfixe par défaut des fichiers générés.
pub const DEFAULT_PREFIX: &str = "cyberpunked";

/// Configuration complète d'un run.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use sg_core::config::SignConfig;
/// let config = SignConfig::default();
/// assert_eq!(config.page_size, 3);
/// assert_eq!(config.prefix, "cyberpunked");
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SignConfig {
    // === Bibliothèque ===
    /// Fichier de définition, ou dossier de fichiers `*.txt`.
    pub library_path: PathBuf,
    /// Variante de largeur utilisée (0 = première colonne).
    pub variant: usize,

    // === Mise en page ===
    /// Glyphes par panneau [2, 6].
    pub page_size: usize,
    /// Séparateur entre deux glyphes.
    pub separator: String,
    /// Double chaque espace des glyphes.
    pub double_spaces: bool,

    // === Sortie ===
    /// Dossier racine des résultats.
    pub output_dir: PathBuf,
    /// Préfixe des noms de fichiers.
    pub prefix: String,
    /// Format des fichiers écrits.
    pub format: OutputFormat,
    /// Vider le dossier de sortie avant écriture, pour qu'il ne contienne
    /// que les pages du run courant.
    pub clean_output: bool,
}

/// Output file format.
///
/// # Example
/// ```
/// use sg_core::config::OutputFormat;
/// assert_eq!(OutputFormat::default().extension(), "txt");
/// assert_eq!(OutputFormat::Stendhal.extension(), "stendhal");
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Rendered lines only.
    #[default]
    #[serde(alias = "Plain", alias = "txt")]
    Plain,
    /// Stendhal sign file (`title:` / `lines:` header, `#- ` line prefix).
    #[serde(alias = "Stendhal")]
    Stendhal,
}

impl OutputFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Plain => "txt",
            Self::Stendhal => "stendhal",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" | "txt" => Ok(Self::Plain),
            "stendhal" => Ok(Self::Stendhal),
            other => Err(crate::error::CoreError::Config(format!(
                "format inconnu '{other}' (plain, stendhal)"
            ))),
        }
    }
}

impl Default for SignConfig {
    fn default() -> Self {
        Self {
            library_path: PathBuf::from("libraries"),
            variant: 0,
            page_size: DEFAULT_PAGE_SIZE,
            separator: "  ".to_string(),
            double_spaces: true,
            output_dir: PathBuf::from("Results"),
            prefix: DEFAULT_PREFIX.to_string(),
            format: OutputFormat::Plain,
            clean_output: true,
        }
    }
}

impl SignConfig {
    /// Clamp all fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        let clamped = self.page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);
        if clamped != self.page_size {
            log::warn!(
                "page_size {} hors limites, ramené à {clamped}",
                self.page_size
            );
            self.page_size = clamped;
        }
        if self.prefix.trim().is_empty() {
            self.prefix = DEFAULT_PREFIX.to_string();
        }
    }

    /// Options passed to the renderer.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            variant: self.variant,
            separator: self.separator.clone(),
            double_spaces: self.double_spaces,
        }
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    library: Option<LibrarySection>,
    layout: Option<LayoutSection>,
    output: Option<OutputSection>,
}

#[derive(Deserialize)]
struct LibrarySection {
    path: Option<PathBuf>,
    variant: Option<usize>,
}

#[derive(Deserialize)]
struct LayoutSection {
    page_size: Option<usize>,
    separator: Option<String>,
    double_spaces: Option<bool>,
}

#[derive(Deserialize)]
struct OutputSection {
    dir: Option<PathBuf>,
    prefix: Option<String>,
    format: Option<OutputFormat>,
    clean: Option<bool>,
}

/// Parse une configuration TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the TOML is malformed.
///
/// # Example
/// ```
/// use sg_core::config::{parse_config, OutputFormat};
/// let config = parse_config("[layout]\npage_size = 6\n[output]\nformat = \"Stendhal\"\n").unwrap();
/// assert_eq!(config.page_size, 6);
/// assert_eq!(config.format, OutputFormat::Stendhal);
/// assert_eq!(config.prefix, "cyberpunked");
/// ```
pub fn parse_config(content: &str) -> Result<SignConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;
    let mut config = SignConfig::default();

    if let Some(l) = file.library {
        if let Some(v) = l.path {
            config.library_path = v;
        }
        if let Some(v) = l.variant {
            config.variant = v;
        }
    }
    if let Some(l) = file.layout {
        if let Some(v) = l.page_size {
            config.page_size = v;
        }
        if let Some(v) = l.separator {
            config.separator = v;
        }
        if let Some(v) = l.double_spaces {
            config.double_spaces = v;
        }
    }
    if let Some(o) = file.output {
        if let Some(v) = o.dir {
            config.output_dir = v;
        }
        if let Some(v) = o.prefix {
            config.prefix = v;
        }
        if let Some(v) = o.format {
            config.format = v;
        }
        if let Some(v) = o.clean {
            config.clean_output = v;
        }
    }

    config.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use sg_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<SignConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Configuration invalide : {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), SignConfig::default());
    }

    #[test]
    fn sections_override_fields() {
        let config = parse_config(
            r#"
[library]
path = "fonts/cyber.txt"
variant = 1

[layout]
separator = " "
double_spaces = false

[output]
dir = "out"
prefix = "sign"
clean = false
"#,
        )
        .unwrap();
        assert_eq!(config.library_path, PathBuf::from("fonts/cyber.txt"));
        assert_eq!(config.variant, 1);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.separator, " ");
        assert!(!config.double_spaces);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.prefix, "sign");
        assert!(!config.clean_output);
    }

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(parse_config("[layout]\npage_size = 12").unwrap().page_size, 6);
        assert_eq!(parse_config("[layout]\npage_size = 0").unwrap().page_size, 2);
    }

    #[test]
    fn blank_prefix_falls_back() {
        let config = parse_config("[output]\nprefix = \"  \"").unwrap();
        assert_eq!(config.prefix, DEFAULT_PREFIX);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(parse_config("[layout\npage_size = 3").is_err());
    }

    #[test]
    fn format_from_str() {
        assert_eq!("STENDHAL".parse::<OutputFormat>().unwrap(), OutputFormat::Stendhal);
        assert_eq!("txt".parse::<OutputFormat>().unwrap(), OutputFormat::Plain);
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn format_accepts_any_case_in_toml() {
        for (raw, expected) in [
            ("stendhal", OutputFormat::Stendhal),
            ("Stendhal", OutputFormat::Stendhal),
            ("plain", OutputFormat::Plain),
            ("Plain", OutputFormat::Plain),
        ] {
            let config = parse_config(&format!("[output]\nformat = \"{raw}\"\n")).unwrap();
            assert_eq!(config.format, expected, "format = {raw:?}");
        }
        assert!(parse_config("[output]\nformat = \"pdf\"\n").is_err());
    }

    #[test]
    fn output_is_cleaned_by_default() {
        assert!(SignConfig::default().clean_output);
        assert!(parse_config("[output]\ndir = \"out\"\n").unwrap().clean_output);
    }

    #[test]
    fn shipped_default_matches_builtin() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/default.toml");
        assert_eq!(load_config(&path).unwrap(), SignConfig::default());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.toml");
        std::fs::write(&path, "[layout]\npage_size = 4\n").unwrap();
        assert_eq!(load_config(&path).unwrap().page_size, 4);
        assert!(load_config(&dir.path().join("missing.toml")).is_err());
    }
}
