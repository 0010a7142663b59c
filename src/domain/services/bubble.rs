#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use std::mem;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use syntect::easy::HighlightLines;
use syntect::highlighting::Theme;

use super::Syntaxes;
use super::SYNTAX_SET;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Role;

// Both borders, both inner paddings and the scrollbar column.
const BORDER_WIDTH: usize = 5;
// Columns a bubble never takes from the row besides its text.
const RESERVED_WIDTH: usize = 8;
const MIN_SIDE_GAP_RATIO: f32 = 0.04;
const CODE_FENCE: &str = "```";

type Row = Vec<Span<'static>>;

fn width_of(text: &str) -> usize {
    return text.chars().count();
}

fn row_width(row: &[Span<'static>]) -> usize {
    return row.iter().map(|span| return width_of(&span.content)).sum();
}

/// One chat message drawn as a framed box. Your own messages sit on the
/// right, the coach's on the left.
pub struct Bubble<'a> {
    message: &'a Message,
    window_width: usize,
}

impl<'a> Bubble<'a> {
    pub fn new(message: &'a Message, window_width: usize) -> Bubble<'a> {
        return Bubble {
            message,
            window_width,
        };
    }

    fn is_right_aligned(&self) -> bool {
        return self.message.author.role() == Role::User;
    }

    fn border_style(&self) -> Style {
        if self.message.message_type() == MessageType::Error {
            return Style::default().fg(Color::Red);
        }

        match self.message.author.role() {
            Role::User => return Style::default().fg(Color::Cyan),
            Role::Model => return Style::default(),
        }
    }

    /// Width available to the text itself. Never narrower than the author
    /// label so the title always fits in the top border.
    fn text_width(&self) -> usize {
        let side_gap = (self.window_width as f32 * MIN_SIDE_GAP_RATIO).ceil() as usize;
        let available = self.window_width.saturating_sub(BORDER_WIDTH + side_gap);
        let longest = self
            .message
            .text
            .lines()
            .map(width_of)
            .max()
            .unwrap_or(0);

        return longest
            .min(available)
            .max(width_of(&self.message.author.to_string()));
    }

    pub fn as_lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        let text_width = self.text_width();
        let rows = highlight_markdown(&self.message.text, theme)
            .into_iter()
            .flat_map(|row| return wrap_row(row, text_width))
            .collect::<Vec<Row>>();

        return self.frame(rows, text_width);
    }

    fn frame(&self, rows: Vec<Row>, text_width: usize) -> Vec<Line<'static>> {
        let style = self.border_style();
        let gap = " ".repeat(self.window_width.saturating_sub(text_width + RESERVED_WIDTH));
        let author = self.message.author.to_string();
        let top = format!(
            "╭{author}{}╮",
            "─".repeat(text_width + 2 - width_of(&author))
        );
        let bottom = format!("╰{}╯", "─".repeat(text_width + 2));

        let place = |mut spans: Row| -> Line<'static> {
            if self.is_right_aligned() {
                spans.insert(0, Span::raw(gap.to_string()));
            } else {
                spans.push(Span::raw(gap.to_string()));
            }
            return Line::from(spans);
        };

        let mut lines = vec![place(vec![Span::styled(top, style)])];
        for mut row in rows {
            let fill = " ".repeat(text_width.saturating_sub(row_width(&row)));
            row.insert(0, Span::styled("│ ", style));
            row.push(Span::styled(format!("{fill} │"), style));
            lines.push(place(row));
        }
        lines.push(place(vec![Span::styled(bottom, style)]));

        return lines;
    }
}

/// Splits message text into rows of spans, colouring fenced code blocks with
/// the fence's language. Fence lines stay visible.
fn highlight_markdown(text: &str, theme: &Theme) -> Vec<Row> {
    let mut code: Option<HighlightLines> = None;
    let mut rows = vec![];

    for line in text.lines() {
        if line.trim().starts_with(CODE_FENCE) {
            code = match code {
                Some(_) => None,
                None => {
                    let lang = line.trim().trim_start_matches(CODE_FENCE);
                    Some(HighlightLines::new(Syntaxes::get(lang), theme))
                }
            };
            rows.push(vec![Span::raw(line.to_string())]);
            continue;
        }

        let highlighted = code.as_mut().and_then(|highlighter| {
            // Multi-line constructs only highlight correctly with the newline kept.
            return highlighter
                .highlight_line(&format!("{line}\n"), &SYNTAX_SET)
                .ok()
                .map(|segments| {
                    return segments
                        .into_iter()
                        .map(|(style, content)| {
                            return Span::styled(
                                content.trim_end_matches('\n').to_string(),
                                Style {
                                    fg: Syntaxes::translate_colour(style.foreground),
                                    ..Style::default()
                                },
                            );
                        })
                        .collect::<Row>();
                });
        });

        rows.push(highlighted.unwrap_or_else(|| return vec![Span::raw(line.to_string())]));
    }

    return rows;
}

/// Word wraps a row to `width` columns, keeping span styles. Words longer
/// than a whole row are cut.
fn wrap_row(row: Row, width: usize) -> Vec<Row> {
    if width == 0 || row_width(&row) <= width {
        return vec![row];
    }

    let mut rows = vec![];
    let mut current: Row = vec![];
    let mut current_width = 0;

    for span in row {
        let style = span.style;
        let mut chunk = String::new();

        for (idx, word) in span.content.split(' ').enumerate() {
            let mut piece = word.to_string();
            if idx > 0 {
                piece = format!(" {word}");
            }

            if current_width > 0 && current_width + width_of(&piece) > width {
                if !chunk.is_empty() {
                    current.push(Span::styled(mem::take(&mut chunk), style));
                }
                rows.push(mem::take(&mut current));
                current_width = 0;
                piece = word.to_string();
            }

            let mut chars = piece.chars().collect::<Vec<char>>();
            while chars.len() > width {
                let tail = chars.split_off(width);
                chunk.extend(chars);
                current.push(Span::styled(mem::take(&mut chunk), style));
                rows.push(mem::take(&mut current));
                chars = tail;
            }

            current_width += chars.len();
            chunk.extend(chars);
        }

        if !chunk.is_empty() {
            current.push(Span::styled(chunk, style));
        }
    }

    rows.push(current);
    return rows;
}
