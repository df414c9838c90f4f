//! Poem card widget
//!
//! Renders one poem as a bordered card filled with the poem's color:
//! - Title (bold)
//! - Content, one paragraph per line, blank lines as spacer rows
//! - Author (italic)
//! - Change Color control hint
//!
//! Long lines are word-wrapped to the card width, so the card height depends
//! on the width it is given. [`card_height`] and the widget use the same
//! line builder so the grid can size rows before drawing.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::{readable_on, Theme};
use crate::config::Labels;
use crate::poem::{ContentLine, PoemRecord};

/// Horizontal padding inside the border
const PADDING_X: u16 = 1;
/// Border rows/columns on each side
const BORDER: u16 = 1;

/// One row of a laid-out card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardLine {
    Title(String),
    Paragraph(String),
    Spacer,
    Author(String),
    Control,
}

/// Width available to text for a card of `card_width` columns
pub fn text_width(card_width: u16) -> usize {
    card_width.saturating_sub(2 * (BORDER + PADDING_X)) as usize
}

/// Lay out a poem for the given text width
pub fn card_lines(poem: &PoemRecord, width: usize) -> Vec<CardLine> {
    let mut lines: Vec<CardLine> = wrap(&poem.title, width)
        .into_iter()
        .map(CardLine::Title)
        .collect();
    lines.push(CardLine::Spacer);

    for line in poem.content_lines() {
        match line {
            ContentLine::Text(text) => {
                lines.extend(wrap(text, width).into_iter().map(CardLine::Paragraph));
            }
            ContentLine::Spacer => lines.push(CardLine::Spacer),
        }
    }

    if !poem.author.is_empty() {
        lines.push(CardLine::Spacer);
        lines.push(CardLine::Author(truncate(&format!("— {}", poem.author), width)));
    }
    lines.push(CardLine::Control);
    lines
}

/// Total card height, borders included
pub fn card_height(poem: &PoemRecord, card_width: u16) -> u16 {
    let rows = card_lines(poem, text_width(card_width)).len() as u16;
    rows.saturating_add(2 * BORDER)
}

/// Poem card widget
pub struct PoemCard<'a> {
    poem: &'a PoemRecord,
    theme: &'a Theme,
    labels: &'a Labels,
    selected: bool,
}

impl<'a> PoemCard<'a> {
    pub fn new(poem: &'a PoemRecord, theme: &'a Theme, labels: &'a Labels) -> Self {
        Self {
            poem,
            theme,
            labels,
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl<'a> Widget for PoemCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let bg = self.theme.card_color(&self.poem.color);
        let fg = readable_on(bg);
        let base = Style::default().fg(fg).bg(bg);

        let (border_type, border_style) = if self.selected {
            (
                BorderType::Thick,
                Style::default().fg(self.theme.selection_border).bg(bg),
            )
        } else {
            (BorderType::Rounded, base)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(border_style)
            .style(base);
        let inner = block.inner(area);
        block.render(area, buf);

        let inner_width = inner.width.saturating_sub(2 * PADDING_X);
        if inner_width == 0 {
            return;
        }
        let x = inner.x + PADDING_X;
        let width = inner_width as usize;
        let max_y = inner.y + inner.height;

        let control = if self.selected {
            format!("[c] {}", self.labels.change_color)
        } else {
            format!("[ {} ]", self.labels.change_color)
        };

        for (y, line) in (inner.y..max_y).zip(card_lines(self.poem, width)) {
            match line {
                CardLine::Title(text) => {
                    buf.set_string(x, y, text, base.add_modifier(Modifier::BOLD));
                }
                CardLine::Paragraph(text) => {
                    buf.set_string(x, y, text, base);
                }
                CardLine::Spacer => {}
                CardLine::Author(text) => {
                    buf.set_string(x, y, text, base.add_modifier(Modifier::ITALIC));
                }
                CardLine::Control => {
                    let style = if self.selected {
                        base.add_modifier(Modifier::REVERSED)
                    } else {
                        base.add_modifier(Modifier::DIM)
                    };
                    buf.set_string(x, y, truncate(&control, width), style);
                }
            }
        }
    }
}

/// Word-wrap `s` to `max_width` display columns.
///
/// Words wider than the line are split. Always returns at least one line.
pub fn wrap(s: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in s.split_whitespace() {
        let word_width = word.width();
        let sep = usize::from(!current.is_empty());

        if current_width + sep + word_width <= max_width {
            if sep == 1 {
                current.push(' ');
            }
            current.push_str(word);
            current_width += sep + word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= max_width {
            current.push_str(word);
            current_width = word_width;
        } else {
            for c in word.chars() {
                let char_width = c.width().unwrap_or(0);
                if current_width + char_width > max_width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(c);
                current_width += char_width;
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Truncate string to fit within max_width, adding ellipsis if needed
fn truncate(s: &str, max_width: usize) -> String {
    let width = s.width();
    if width <= max_width {
        s.to_string()
    } else if max_width <= 1 {
        "…".to_string()
    } else {
        let mut result = String::new();
        let mut current_width = 0;

        for c in s.chars() {
            let char_width = c.width().unwrap_or(0);
            if current_width + char_width + 1 > max_width {
                result.push('…');
                break;
            }
            result.push(c);
            current_width += char_width;
        }

        result
    }
}
