//! Syntax highlighting for code blocks

use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Code highlighter backed by syntect's bundled syntaxes and themes
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl Highlighter {
    /// Create a highlighter using the named theme, or the first bundled
    /// theme if the name is unknown
    pub fn new(theme_name: &str) -> Option<Self> {
        let mut theme_set = ThemeSet::load_defaults();
        let theme = match theme_set.themes.remove(theme_name) {
            Some(theme) => theme,
            None => {
                tracing::warn!("Unknown highlight theme {:?}, using a default", theme_name);
                theme_set.themes.into_values().next()?
            }
        };

        Some(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    /// Highlight `code` as `lang`.
    ///
    /// Returns `None` for languages syntect does not know, so the caller can
    /// fall back to an escaped plain block.
    pub fn highlight(&self, code: &str, lang: &str) -> Option<String> {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))?;

        match highlighted_html_for_string(code, &self.syntax_set, syntax, &self.theme) {
            Ok(html) => Some(html),
            Err(e) => {
                tracing::debug!(language = %lang, error = %e, "highlighting failed");
                None
            }
        }
    }
}

impl std::fmt::Debug for Highlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Highlighter")
            .field("theme", &self.theme.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_known_language() {
        let highlighter = Highlighter::new("base16-ocean.dark").unwrap();
        let html = highlighter.highlight("fn main() {}\n", "rust").unwrap();
        assert!(html.starts_with("<pre"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_unknown_language_is_not_highlighted() {
        let highlighter = Highlighter::new("base16-ocean.dark").unwrap();
        assert!(highlighter.highlight("x", "no-such-language").is_none());
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        assert!(Highlighter::new("no-such-theme").is_some());
    }
}
