use sg_core::config::OutputFormat;

/// Préfixe de ligne attendu par le mod Stendhal.
const STENDHAL_LINE_PREFIX: &str = "#- ";

/// Encode les lignes rendues d'une page dans le format demandé.
///
/// `title` is the file stem, only used by formats that carry a header.
///
/// # Example
/// ```
/// use sg_core::config::OutputFormat;
/// use sg_export::format::encode;
///
/// let lines = vec!["██".to_string(), "▀▀".to_string()];
/// assert_eq!(encode(OutputFormat::Plain, "x_1", &lines), "██\n▀▀\n");
/// assert_eq!(
///     encode(OutputFormat::Stendhal, "x_1", &lines),
///     "title: x_1\nlines:\n#- ██\n#- ▀▀"
/// );
/// ```
#[must_use]
pub fn encode(format: OutputFormat, title: &str, lines: &[String]) -> String {
    match format {
        OutputFormat::Plain => {
            let mut out = lines.join("\n");
            out.push('\n');
            out
        }
        OutputFormat::Stendhal => {
            let body = lines
                .iter()
                .map(|l| format!("{STENDHAL_LINE_PREFIX}{l}"))
                .collect::<Vec<_>>()
                .join("\n");
            format!("title: {title}\nlines:\n{body}")
        }
    }
}
