use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use sg_core::config::{OutputFormat, SignConfig, load_config};
use sg_core::paginate::check_page_size;

/// signscii : texte → panneaux ASCII-art, un fichier par panneau.
///
/// Sans argument, le texte et la taille de page sont demandés au clavier.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Texte à convertir (sinon demandé au clavier).
    #[arg(long)]
    pub text: Option<String>,

    /// Glyphes par panneau, de 2 à 6.
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Fichier de bibliothèque, ou dossier de fichiers .txt.
    #[arg(long)]
    pub library: Option<PathBuf>,

    /// Dossier racine des résultats.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Format de sortie : plain, stendhal.
    #[arg(long)]
    pub format: Option<String>,

    /// Garder les fichiers déjà présents dans le dossier de sortie.
    #[arg(long, default_value_t = false)]
    pub keep_existing: bool,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Applique les options de ligne de commande par-dessus la config.
    ///
    /// # Errors
    /// Returns an error for an out-of-range page size or an unknown format.
    pub fn apply_overrides(&self, config: &mut SignConfig) -> Result<()> {
        if let Some(size) = self.page_size {
            config.page_size = check_page_size(size)?;
        }
        if let Some(ref path) = self.library {
            config.library_path.clone_from(path);
        }
        if let Some(ref dir) = self.output {
            config.output_dir.clone_from(dir);
        }
        if let Some(ref format) = self.format {
            config.format = format.parse::<OutputFormat>()?;
        }
        if self.keep_existing {
            config.clean_output = false;
        }
        Ok(())
    }

    /// Config file if present, defaults otherwise.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn resolve_config(&self) -> Result<SignConfig> {
        if self.config.exists() {
            load_config(&self.config)
        } else {
            log::warn!(
                "Config introuvable : {}. Utilisation des défauts.",
                self.config.display()
            );
            Ok(SignConfig::default())
        }
    }

    /// Le texte et l'option sont demandés au clavier.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.text.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_is_interactive() {
        let cli = Cli::parse_from(["signscii"]);
        assert!(cli.is_interactive());
        assert_eq!(cli.config, PathBuf::from("config/default.toml"));
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn overrides_replace_config_values() {
        let cli = Cli::parse_from([
            "signscii",
            "--text",
            "HELLO",
            "--page-size",
            "5",
            "--library",
            "fonts",
            "--output",
            "out",
            "--format",
            "stendhal",
            "--keep-existing",
        ]);
        let mut config = SignConfig::default();
        cli.apply_overrides(&mut config).unwrap();

        assert!(!cli.is_interactive());
        assert_eq!(config.page_size, 5);
        assert_eq!(config.library_path, PathBuf::from("fonts"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.format, OutputFormat::Stendhal);
        assert!(!config.clean_output);
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let cli = Cli::parse_from(["signscii", "--config", path.to_str().unwrap()]);
        assert_eq!(cli.resolve_config().unwrap(), SignConfig::default());
    }

    #[test]
    fn existing_config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signs.toml");
        std::fs::write(&path, "[layout]\npage_size = 5\n[output]\nformat = \"stendhal\"\n").unwrap();
        let cli = Cli::parse_from(["signscii", "-c", path.to_str().unwrap()]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.format, OutputFormat::Stendhal);
    }

    #[test]
    fn broken_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[layout\n").unwrap();
        let cli = Cli::parse_from(["signscii", "-c", path.to_str().unwrap()]);
        assert!(cli.resolve_config().is_err());
    }

    #[test]
    fn out_of_range_page_size_is_rejected() {
        let cli = Cli::parse_from(["signscii", "--page-size", "9"]);
        assert!(cli.apply_overrides(&mut SignConfig::default()).is_err());
    }

    #[test]
    fn unknown_format_is_rejected() {
        let cli = Cli::parse_from(["signscii", "--format", "gif"]);
        assert!(cli.apply_overrides(&mut SignConfig::default()).is_err());
    }
}
