#[cfg(test)]
#[path = "textarea_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

pub const PASSWORD_MASK: char = '\u{2022}';

pub struct TextArea {}

impl<'a> TextArea {
    pub fn default() -> tui_textarea::TextArea<'a> {
        return TextArea::with_title("Ask me anything...");
    }

    pub fn with_title(title: &'a str) -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(title)
                .padding(Padding::new(1, 1, 0, 0)),
        );

        return textarea;
    }

    pub fn password(title: &'a str) -> tui_textarea::TextArea<'a> {
        let mut textarea = TextArea::with_title(title);
        textarea.set_mask_char(PASSWORD_MASK);

        return textarea;
    }

    /// Highlights the border of the field that currently has focus.
    pub fn set_focus(textarea: &mut tui_textarea::TextArea<'a>, focused: bool, title: &'a str) {
        let mut border_style = Style::default();
        if focused {
            border_style = border_style.fg(Color::Cyan);
        }

        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(border_style)
                .title(title)
                .padding(Padding::new(1, 1, 0, 0)),
        );
    }

    /// Inserts pasted text, turning line breaks into new lines.
    pub fn paste(textarea: &mut tui_textarea::TextArea<'a>, text: &str) {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        for (idx, line) in normalized.split('\n').enumerate() {
            if idx > 0 {
                textarea.insert_newline();
            }
            textarea.insert_str(line);
        }
    }

    pub fn content(textarea: &tui_textarea::TextArea<'a>) -> String {
        return textarea.lines().join("\n");
    }
}
