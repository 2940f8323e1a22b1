use crate::error::CoreError;
use crate::library::{Glyph, Library};
use crate::paginate::Page;

/// Options de rendu horizontal.
///
/// # Example
/// ```
/// use sg_core::render::RenderOptions;
/// let opts = RenderOptions::default();
/// assert_eq!(opts.separator, "  ");
/// assert!(opts.double_spaces);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Width variant picked from the library.
    pub variant: usize,
    /// Inserted between adjacent glyphs on every line.
    pub separator: String,
    /// Widen each blank cell inside a glyph to two spaces.
    pub double_spaces: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            variant: 0,
            separator: "  ".to_string(),
            double_spaces: true,
        }
    }
}

/// One page joined into a single multi-line block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPage {
    /// 1-based page index, copied from the [`Page`].
    pub index: usize,
    /// Source characters of the page.
    pub text: String,
    /// Rendered lines, top to bottom.
    pub lines: Vec<String>,
}

/// Joint horizontalement les glyphes d'une page.
///
/// # Example
/// ```
/// use sg_core::library::parse_library;
/// use sg_core::paginate::paginate;
/// use sg_core::render::{RenderOptions, Renderer};
///
/// let lib = parse_library("H\n|#.#|\n|###|\nI\n|#|\n|#|\n");
/// let renderer = Renderer::new(&lib, RenderOptions::default());
/// let page = &paginate("HI", 2).unwrap()[0];
/// let out = renderer.render(page).unwrap();
/// assert_eq!(out.lines, ["#.#  #", "###  #"]);
/// ```
pub struct Renderer<'a> {
    library: &'a Library,
    options: RenderOptions,
}

impl<'a> Renderer<'a> {
    /// Reports once, here, the characters lacking the requested variant.
    #[must_use]
    pub fn new(library: &'a Library, options: RenderOptions) -> Self {
        let missing = library.missing_variant(options.variant);
        if !missing.is_empty() {
            log::warn!(
                "Variante {} absente pour {} glyphe(s) ({}), utilisation de la variante 0",
                options.variant,
                missing.len(),
                missing.iter().collect::<String>()
            );
        }
        Self { library, options }
    }

    /// Renders one page.
    ///
    /// Line `i` is line `i` of every glyph in page order. Lines of a glyph are
    /// right-padded to the glyph width, and glyphs shorter than the tallest
    /// one get blank lines, so columns stay aligned.
    ///
    /// # Errors
    /// Returns [`CoreError::UnsupportedCharacter`] naming the first character
    /// of the page missing from the library.
    pub fn render(&self, page: &Page) -> Result<RenderedPage, CoreError> {
        let blocks = page
            .text()
            .chars()
            .map(|ch| {
                self.library
                    .glyph(ch, self.options.variant)
                    .map(|g| self.prepare(g))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let height = blocks.iter().map(Vec::len).max().unwrap_or(0);
        let blocks: Vec<Vec<String>> = blocks
            .into_iter()
            .map(|mut block| {
                let width = block.first().map_or(0, |l| l.chars().count());
                block.resize_with(height, || Self::blank(width));
                block
            })
            .collect();
        let lines = (0..height)
            .map(|row| {
                blocks
                    .iter()
                    .map(|block| block[row].as_str())
                    .collect::<Vec<_>>()
                    .join(&self.options.separator)
            })
            .collect();

        Ok(RenderedPage {
            index: page.index(),
            text: page.text().to_string(),
            lines,
        })
    }

    /// Renders every page, or none: the first unsupported character aborts.
    ///
    /// # Errors
    /// Returns the first [`CoreError::UnsupportedCharacter`] encountered.
    pub fn render_all(&self, pages: &[Page]) -> Result<Vec<RenderedPage>, CoreError> {
        pages.iter().map(|p| self.render(p)).collect()
    }

    /// Lignes du glyphe, espaces élargis, remplies à largeur constante.
    fn prepare(&self, glyph: &Glyph) -> Vec<String> {
        let mut lines: Vec<String> = glyph
            .lines()
            .iter()
            .map(|l| {
                if self.options.double_spaces {
                    l.replace(' ', "  ")
                } else {
                    l.clone()
                }
            })
            .collect();

        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        for line in &mut lines {
            let pad = width - line.chars().count();
            line.extend(std::iter::repeat_n(' ', pad));
        }
        lines
    }

    fn blank(width: usize) -> String {
        " ".repeat(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::parse_library;
    use crate::paginate::paginate;

    const FONT: &str = "\
H
|█ █|
|███|
|█ █|
E
|███|
|██ |
|███|
L
|█  |
|█  |
|███|
O
|███|
|█ █|
|███|
";

    fn plain() -> RenderOptions {
        RenderOptions {
            double_spaces: false,
            ..RenderOptions::default()
        }
    }

    #[test]
    fn hello_joins_glyphs_in_order() {
        let lib = parse_library(FONT);
        let renderer = Renderer::new(&lib, plain());
        let pages = paginate("HELLO", 5).unwrap();
        let out = renderer.render(&pages[0]).unwrap();
        assert_eq!(
            out.lines,
            [
                "█ █  ███  █    █    ███",
                "███  ██   █    █    █ █",
                "█ █  ███  ███  ███  ███",
            ]
        );
        assert_eq!(out.index, 1);
        assert_eq!(out.text, "HELLO");
    }

    #[test]
    fn double_spaces_widen_blank_cells() {
        let lib = parse_library(FONT);
        let renderer = Renderer::new(&lib, RenderOptions::default());
        let out = renderer.render(&paginate("HO", 2).unwrap()[0]).unwrap();
        assert_eq!(out.lines[0], "█  █  ███ ");
        assert_eq!(out.lines[1], "███   █  █");
    }

    #[test]
    fn shorter_glyphs_are_padded() {
        let lib = parse_library("A\n|aa|\n|aa|\n|aa|\nB\n|b|\n");
        let renderer = Renderer::new(&lib, plain());
        let out = renderer.render(&paginate("AB", 2).unwrap()[0]).unwrap();
        assert_eq!(out.lines, ["aa  b", "aa   ", "aa   "]);
    }

    #[test]
    fn unsupported_character_aborts_render_all() {
        let lib = parse_library(FONT);
        let renderer = Renderer::new(&lib, plain());
        let pages = paginate("HELLO WORLD", 6).unwrap();
        assert_eq!(
            renderer.render_all(&pages),
            Err(CoreError::UnsupportedCharacter { ch: ' ' })
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let lib = parse_library(FONT);
        let renderer = Renderer::new(&lib, RenderOptions::default());
        let pages = paginate("HELLOHOLE", 4).unwrap();
        assert_eq!(
            renderer.render_all(&pages).unwrap(),
            renderer.render_all(&pages).unwrap()
        );
    }

    #[test]
    fn missing_variant_renders_first_variant() {
        let lib = parse_library("A\n|a|A|\nB\n|b|\n");
        let renderer = Renderer::new(
            &lib,
            RenderOptions {
                variant: 1,
                ..plain()
            },
        );
        let out = renderer.render(&paginate("AB", 2).unwrap()[0]).unwrap();
        assert_eq!(out.lines, ["A  b"]);
    }

    #[test]
    fn custom_separator() {
        let lib = parse_library(FONT);
        let renderer = Renderer::new(
            &lib,
            RenderOptions {
                separator: "|".into(),
                ..plain()
            },
        );
        let out = renderer.render(&paginate("LL", 2).unwrap()[0]).unwrap();
        assert_eq!(out.lines[2], "███|███");
    }
}
