use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Referenced file or directory does not exist.
    #[error("Fichier introuvable : {path}")]
    FileNotFound {
        /// Path that was not found.
        path: String,
    },

    /// The library sources were read but define no glyph.
    #[error("Bibliothèque vide : aucun glyphe défini dans {path}")]
    EmptyLibrary {
        /// Library file or directory.
        path: String,
    },

    /// A character of the input text has no glyph in the library.
    #[error("Caractère non supporté : {ch:?}")]
    UnsupportedCharacter {
        /// The offending character.
        ch: char,
    },

    /// Page size outside the sign capacity.
    #[error("Taille de page invalide : {size} (attendu {min}..={max})")]
    InvalidPageSize {
        /// Requested size.
        size: usize,
        /// Smallest accepted size.
        min: usize,
        /// Largest accepted size.
        max: usize,
    },

    /// Nothing to render.
    #[error("Texte vide")]
    EmptyInput,
}
