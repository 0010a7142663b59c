use once_cell::sync::Lazy;
use ratatui::style::Color;
use syntect::parsing::SyntaxReference;
use syntect::parsing::SyntaxSet;

pub static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

pub struct Syntaxes {}

impl Syntaxes {
    /// Resolves a code fence language to a syntax, falling back to plain text.
    pub fn get(name: &str) -> &'static SyntaxReference {
        let name = name.trim();
        if name.is_empty() {
            return SYNTAX_SET.find_syntax_plain_text();
        }

        if let Some(syntax) = SYNTAX_SET.find_syntax_by_token(name) {
            return syntax;
        }

        if let Some(syntax) = SYNTAX_SET.find_syntax_by_name(name) {
            return syntax;
        }

        return SYNTAX_SET.find_syntax_plain_text();
    }

    pub fn translate_colour(syntect_color: syntect::highlighting::Color) -> Option<Color> {
        match syntect_color {
            syntect::highlighting::Color { r, g, b, a } if a > 0 => {
                return Some(Color::Rgb(r, g, b));
            }
            _ => return None,
        }
    }
}
