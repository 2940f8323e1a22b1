/// Nombre de caractères du texte repris dans les noms de fichiers.
pub const NAME_SOURCE_CHARS: usize = 15;

/// Longueur maximale d'un nom de fichier.
const MAX_NAME_CHARS: usize = 255;

/// Remplacement visuel des caractères interdits dans les noms de fichiers Windows.
fn replacement(ch: char) -> Option<&'static str> {
    let s = match ch {
        '<' => "⧀",
        '>' => "⧁",
        ':' => "ː",
        '"' => "`",
        '/' => "⧸",
        '\\' => "⧹",
        '|' => "ǀ",
        '?' => "？",
        '*' => "⁎",
        '\t' => "    ",
        _ => return None,
    };
    Some(s)
}

/// Makes `name` safe to use as a file or directory name.
///
/// Forbidden characters are swapped for look-alikes, trailing spaces and
/// dots are dropped and the result is capped at 255 characters.
///
/// # Example
/// ```
/// use sg_core::sanitize::sanitize_filename;
/// assert_eq!(sanitize_filename("a/b:c?. "), "a⧸bːc？");
/// ```
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        match replacement(ch) {
            Some(s) => out.push_str(s),
            None => out.push(ch),
        }
    }
    out.trim_end_matches([' ', '.'])
        .chars()
        .take(MAX_NAME_CHARS)
        .collect()
}

/// Base name of the output files for `text`: its first 15 characters, sanitized.
///
/// # Example
/// ```
/// use sg_core::sanitize::base_name;
/// assert_eq!(base_name("Night City forever"), "Night City fore");
/// ```
#[must_use]
pub fn base_name(text: &str) -> String {
    let head: String = text.chars().take(NAME_SOURCE_CHARS).collect();
    sanitize_filename(&head)
}
