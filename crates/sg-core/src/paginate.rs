use crate::error::CoreError;

/// Plus petit nombre de glyphes par panneau.
pub const MIN_PAGE_SIZE: usize = 2;

/// Largest number of glyphs a sign can hold.
pub const MAX_PAGE_SIZE: usize = 6;

/// Three glyphs per sign, the classic layout.
pub const DEFAULT_PAGE_SIZE: usize = 3;

/// Contiguous slice of the input text, rendered onto one sign.
///
/// # Example
/// ```
/// use sg_core::paginate::paginate;
/// let pages = paginate("HELLO", 3).unwrap();
/// assert_eq!(pages[0].text(), "HEL");
/// assert_eq!(pages[1].index(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    index: usize,
    text: String,
}

impl Page {
    /// 1-based position of the page.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Nombre de caractères (pas d'octets).
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Validates a requested page size against the sign capacity.
///
/// # Errors
/// Returns [`CoreError::InvalidPageSize`] outside `MIN_PAGE_SIZE..=MAX_PAGE_SIZE`.
pub fn check_page_size(size: usize) -> Result<usize, CoreError> {
    if (MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(CoreError::InvalidPageSize {
            size,
            min: MIN_PAGE_SIZE,
            max: MAX_PAGE_SIZE,
        })
    }
}

/// Découpe le texte en pages consécutives de `size` caractères.
///
/// The last page holds whatever remains and may be shorter than `size`,
/// even shorter than [`MIN_PAGE_SIZE`]. It is never padded.
///
/// # Errors
/// Returns [`CoreError::EmptyInput`] for an empty text and
/// [`CoreError::InvalidPageSize`] for an out-of-range size.
///
/// # Example
/// ```
/// use sg_core::paginate::paginate;
/// let pages = paginate("HELLO WORLD", 6).unwrap();
/// assert_eq!(pages.len(), 2);
/// assert_eq!(pages[0].text(), "HELLO ");
/// assert_eq!(pages[1].text(), "WORLD");
/// ```
pub fn paginate(text: &str, size: usize) -> Result<Vec<Page>, CoreError> {
    let size = check_page_size(size)?;
    if text.is_empty() {
        return Err(CoreError::EmptyInput);
    }

    let chars: Vec<char> = text.chars().collect();
    let pages: Vec<Page> = chars
        .chunks(size)
        .enumerate()
        .map(|(i, chunk)| Page {
            index: i + 1,
            text: chunk.iter().collect(),
        })
        .collect();

    if chars.len() % size != 0 {
        log::warn!(
            "Le texte ne se répartit pas exactement sur les panneaux : dernière page de {} caractère(s)",
            chars.len() % size
        );
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_reconstruct_the_text() {
        let text = "Ünïcödé signs, 123!";
        for size in MIN_PAGE_SIZE..=MAX_PAGE_SIZE {
            let pages = paginate(text, size).unwrap();
            let joined: String = pages.iter().map(Page::text).collect();
            assert_eq!(joined, text);
        }
    }

    #[test]
    fn page_count_is_ceiling() {
        let text = "ABCDEFGHIJKLM";
        let len = text.chars().count();
        for size in MIN_PAGE_SIZE..=MAX_PAGE_SIZE {
            let pages = paginate(text, size).unwrap();
            assert_eq!(pages.len(), len.div_ceil(size));
            assert!(pages.iter().all(|p| p.len() <= size));
            assert!(pages[..pages.len() - 1].iter().all(|p| p.len() == size));
        }
    }

    #[test]
    fn indices_start_at_one_and_increase() {
        let pages = paginate("ABCDEFG", 2).unwrap();
        let indices: Vec<usize> = pages.iter().map(Page::index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
    }

    #[test]
    fn hello_with_five_is_one_page() {
        let pages = paginate("HELLO", 5).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].text(), "HELLO");
    }

    #[test]
    fn single_character_still_yields_a_page() {
        let pages = paginate("A", 3).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].len(), 1);
    }

    #[test]
    fn rejects_out_of_range_sizes() {
        for size in [0, 1, 7, 100] {
            assert!(matches!(
                paginate("HELLO", size),
                Err(CoreError::InvalidPageSize { .. })
            ));
        }
    }

    #[test]
    fn rejects_empty_text() {
        assert_eq!(paginate("", 3), Err(CoreError::EmptyInput));
    }
}
