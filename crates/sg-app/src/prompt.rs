use std::io::{BufRead, Write};

use anyhow::{Result, bail};
use sg_core::paginate::{MAX_PAGE_SIZE, MIN_PAGE_SIZE, check_page_size};

/// Question posée pour le texte.
pub const TEXT_PROMPT: &str = "Texte à cyberpunker : ";

fn ask<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> Result<Option<String>> {
    write!(out, "{question}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Demande le texte jusqu'à obtenir une réponse non vide.
///
/// Surrounding whitespace is trimmed.
///
/// # Errors
/// Returns an error if input closes before a non-empty line, or on I/O failure.
///
/// # Example
/// ```
/// use sg_app::prompt::read_text;
/// let mut input = "\n   \n  HELLO \n".as_bytes();
/// let mut out = Vec::new();
/// assert_eq!(read_text(&mut input, &mut out).unwrap(), "HELLO");
/// ```
pub fn read_text<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String> {
    loop {
        match ask(input, out, TEXT_PROMPT)? {
            Some(text) if !text.is_empty() => return Ok(text),
            Some(_) => {}
            None => bail!("Entrée fermée avant la saisie du texte"),
        }
    }
}

/// Demande la taille de page. Réponse vide ou fin d'entrée : `default`.
///
/// Invalid answers are reported and asked again.
///
/// # Errors
/// Returns an error on I/O failure.
pub fn read_page_size<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    default: usize,
) -> Result<usize> {
    let question =
        format!("Glyphes par panneau ({MIN_PAGE_SIZE}-{MAX_PAGE_SIZE}) [{default}] : ");
    loop {
        let Some(answer) = ask(input, out, &question)? else {
            return Ok(default);
        };
        if answer.is_empty() {
            return Ok(default);
        }
        let parsed = answer
            .parse::<usize>()
            .map_err(anyhow::Error::from)
            .and_then(|n| Ok(check_page_size(n)?));
        match parsed {
            Ok(size) => return Ok(size),
            Err(e) => writeln!(out, "Réponse invalide '{answer}' : {e}")?,
        }
    }
}
