use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::CoreError;

/// Extension des fichiers de définition lus dans un dossier de bibliothèques.
const LIBRARY_EXT: &str = "txt";

/// ASCII-art block for one character, one width variant.
///
/// # Example
/// ```
/// use sg_core::library::Glyph;
/// let glyph = Glyph::new(vec!["█▀█".into(), "█▄█".into()]);
/// assert_eq!(glyph.height(), 2);
/// assert_eq!(glyph.width(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Glyph {
    lines: Vec<String>,
}

impl Glyph {
    #[must_use]
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Lignes du glyphe, de haut en bas.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Largeur en caractères de la ligne la plus longue.
    #[must_use]
    pub fn width(&self) -> usize {
        self.lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
    }
}

/// Mapping character → glyph variants. Built once, read-only afterwards.
///
/// # Example
/// ```
/// use sg_core::library::parse_library;
/// let lib = parse_library("A\n|/\\|\n|--|\n");
/// assert!(lib.contains('A'));
/// assert_eq!(lib.glyph('A', 0).unwrap().lines(), ["/\\", "--"]);
/// assert!(lib.glyph('B', 0).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Library {
    glyphs: HashMap<char, Vec<Glyph>>,
}

impl Library {
    /// Registers `variants` for `ch`, replacing any previous definition.
    pub fn insert(&mut self, ch: char, variants: Vec<Glyph>) {
        if self.glyphs.insert(ch, variants).is_some() {
            log::debug!("Glyphe {ch:?} redéfini");
        }
    }

    /// Looks up the glyph of `ch` in the requested width variant.
    ///
    /// Falls back to variant 0, silently, when the character exists but does
    /// not define `variant`. See [`Library::missing_variant`].
    ///
    /// # Errors
    /// Returns [`CoreError::UnsupportedCharacter`] if `ch` has no definition.
    pub fn glyph(&self, ch: char, variant: usize) -> Result<&Glyph, CoreError> {
        let variants = self
            .glyphs
            .get(&ch)
            .filter(|v| !v.is_empty())
            .ok_or(CoreError::UnsupportedCharacter { ch })?;

        Ok(variants.get(variant).unwrap_or(&variants[0]))
    }

    /// Characters that do not define `variant` and fall back to variant 0, sorted.
    ///
    /// # Example
    /// ```
    /// use sg_core::library::parse_library;
    /// let lib = parse_library("A\n|a|a2|\nB\n|b|\n");
    /// assert_eq!(lib.missing_variant(1), vec!['B']);
    /// assert!(lib.missing_variant(0).is_empty());
    /// ```
    #[must_use]
    pub fn missing_variant(&self, variant: usize) -> Vec<char> {
        let mut chars: Vec<char> = self
            .glyphs
            .iter()
            .filter(|(_, v)| !v.is_empty() && v.len() <= variant)
            .map(|(&ch, _)| ch)
            .collect();
        chars.sort_unstable();
        chars
    }

    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.get(&ch).is_some_and(|v| !v.is_empty())
    }

    /// Nombre de variantes de largeur définies pour `ch` (0 si absent).
    #[must_use]
    pub fn variants(&self, ch: char) -> usize {
        self.glyphs.get(&ch).map_or(0, Vec::len)
    }

    /// First character of `text` the library cannot render, in text order.
    ///
    /// # Example
    /// ```
    /// use sg_core::library::parse_library;
    /// let lib = parse_library("A\n|a|\nB\n|b|\n");
    /// assert_eq!(lib.first_unsupported("ABBA"), None);
    /// assert_eq!(lib.first_unsupported("AB?C"), Some('?'));
    /// ```
    #[must_use]
    pub fn first_unsupported(&self, text: &str) -> Option<char> {
        text.chars().find(|&c| !self.contains(c))
    }

    /// Supported characters, sorted.
    #[must_use]
    pub fn chars(&self) -> Vec<char> {
        let mut chars: Vec<char> = self.glyphs.keys().copied().collect();
        chars.sort_unstable();
        chars
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// A key line has fewer than two pipes; data lines are `|cell|cell|...|`.
fn is_key_line(line: &str) -> bool {
    line.matches('|').count() < 2
}

/// Characters defined by a key line.
///
/// A lone `|` defines the pipe, a blank line defines the space.
fn parse_key(line: &str) -> Vec<char> {
    let stripped = line.trim();
    if stripped == "|" {
        return vec!['|'];
    }
    if stripped.is_empty() {
        return vec![' '];
    }

    stripped
        .split_whitespace()
        .filter_map(|token| {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Some(ch),
                _ => {
                    log::warn!("Clé ignorée (plus d'un caractère) : {token:?}");
                    None
                }
            }
        })
        .collect()
}

/// Cells between the first and the last pipe.
fn data_cells(line: &str) -> Vec<String> {
    let parts: Vec<&str> = line.split('|').collect();
    parts[1..parts.len() - 1]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

/// Rows of cells → one glyph per column. Missing cells become empty lines.
fn transpose(rows: &[Vec<String>]) -> Vec<Glyph> {
    let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..cols)
        .map(|col| {
            Glyph::new(
                rows.iter()
                    .map(|row| row.get(col).cloned().unwrap_or_default())
                    .collect(),
            )
        })
        .collect()
}

fn commit(library: &mut Library, keys: &[char], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }
    let variants = transpose(rows);
    for &ch in keys {
        library.insert(ch, variants.clone());
    }
}

/// Parse le format de définition des bibliothèques.
///
/// Each block is a key line listing the characters it defines, followed by
/// data lines whose pipe-separated cells are the glyph rows, one column per
/// width variant:
///
/// ```text
/// A a
/// |█▀█|▄▀▄|
/// |█▀█|█▀█|
/// ```
///
/// # Example
/// ```
/// use sg_core::library::parse_library;
/// let lib = parse_library("A a\n|/\\|^|\n|--|A|\n");
/// assert_eq!(lib.variants('a'), 2);
/// assert_eq!(lib.glyph('a', 1).unwrap().lines(), ["^", "A"]);
/// ```
#[must_use]
pub fn parse_library(input: &str) -> Library {
    let mut library = Library::default();
    let mut current_keys: Option<Vec<char>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();

    for line in input.lines() {
        if is_key_line(line) {
            if let Some(keys) = current_keys.take() {
                commit(&mut library, &keys, &rows);
            } else if !rows.is_empty() {
                log::warn!("{} ligne(s) de données sans clé ignorée(s)", rows.len());
            }
            rows.clear();
            current_keys = Some(parse_key(line));
        } else {
            rows.push(data_cells(line));
        }
    }

    if let Some(keys) = current_keys {
        commit(&mut library, &keys, &rows);
    }

    library
}

/// Charge une bibliothèque depuis un fichier, ou depuis tous les `*.txt`
/// d'un dossier (ordre alphabétique des noms de fichiers).
///
/// # Errors
/// Returns an error if the path does not exist, cannot be read, or defines
/// no glyph.
///
/// # Example
/// ```no_run
/// use sg_core::library::load_library;
/// use std::path::Path;
/// let lib = load_library(Path::new("libraries")).unwrap();
/// ```
pub fn load_library(path: &Path) -> Result<Library> {
    if !path.exists() {
        return Err(CoreError::FileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let content = if path.is_dir() {
        read_library_dir(path)?
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Impossible de lire {}", path.display()))?
    };

    let library = parse_library(&content);
    if library.is_empty() {
        return Err(CoreError::EmptyLibrary {
            path: path.display().to_string(),
        }
        .into());
    }

    log::info!(
        "Bibliothèque chargée : {} glyphes depuis {}",
        library.len(),
        path.display()
    );
    Ok(library)
}

fn read_library_dir(dir: &Path) -> Result<String> {
    let mut files = Vec::new();
    let entries =
        fs::read_dir(dir).with_context(|| format!("Impossible de lire {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        let is_library = path.is_file()
            && path
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(LIBRARY_EXT));
        if is_library {
            files.push(path);
        }
    }
    files.sort();

    let mut combined = String::new();
    for file in &files {
        log::debug!("Lecture de {}", file.display());
        let text = fs::read_to_string(file)
            .with_context(|| format!("Impossible de lire {}", file.display()))?;
        combined.push_str(&text);
        combined.push('\n');
    }
    Ok(combined)
}
