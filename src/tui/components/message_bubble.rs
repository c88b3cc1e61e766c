use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::message::{Author, ChatMessage};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Borders (top + bottom) plus the author line.
const VERTICAL_OVERHEAD: u16 = 3;
/// Bubbles take this share of the row, in percent.
const WIDTH_PERCENT: u32 = 70;
/// Narrowest bubble worth drawing.
const MIN_WIDTH: u16 = 12;

/// A stateless component that renders one chat message as a bubble.
///
/// # Styling
///
/// Layout and color depend only on the author:
/// - **Me**: right-aligned, yellow (highlighted)
/// - **Bot**: left-aligned, gray (neutral)
///
/// Text is always black. The author label sits in bold on the first line.
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered height
/// with `textwrap` options that match `Paragraph` wrapping, so the chat panel
/// can lay out its scroll canvas before rendering anything.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub message: &'a ChatMessage,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a ChatMessage) -> Self {
        Self { message }
    }

    /// Bubble width for a row of `row_width` columns.
    pub fn bubble_width(row_width: u16) -> u16 {
        let preferred = (row_width as u32 * WIDTH_PERCENT / 100) as u16;
        preferred.max(MIN_WIDTH).min(row_width)
    }

    /// Where the bubble sits inside its row.
    pub fn bubble_rect(author: Author, row: Rect) -> Rect {
        let width = Self::bubble_width(row.width);
        let x = if author.is_user() {
            row.x + row.width - width
        } else {
            row.x
        };
        Rect::new(x, row.y, width, row.height)
    }

    /// Calculate the height required for this message in a row of `row_width`.
    pub fn calculate_height(message: &ChatMessage, row_width: u16) -> u16 {
        let content_width = Self::bubble_width(row_width).saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders; still occupy a row
            return 1;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(&message.text, options);
        let max_lines = usize::from(u16::MAX - VERTICAL_OVERHEAD);
        (lines.len().clamp(1, max_lines) as u16) + VERTICAL_OVERHEAD
    }
}

pub fn bubble_style(author: Author) -> Style {
    let bg = if author.is_user() {
        Color::Yellow
    } else {
        Color::Gray
    };
    Style::default().fg(Color::Black).bg(bg)
}

impl Widget for MessageBubble<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let author = self.message.author;
        let style = bubble_style(author);
        let bubble = Self::bubble_rect(author, area);

        let mut lines = vec![Line::styled(
            format!("{}:", author.label()),
            style.add_modifier(Modifier::BOLD),
        )];
        lines.extend(Text::raw(self.message.text.as_str()).lines);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        Paragraph::new(lines)
            .style(style)
            .wrap(Wrap { trim: true })
            .block(block)
            .render(bubble, buf);
    }
}

impl Component for MessageBubble<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_row(message: &ChatMessage, width: u16) -> Buffer {
        let height = MessageBubble::calculate_height(message, width);
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        MessageBubble::new(message).render(area, &mut buf);
        buf
    }

    #[test]
    fn bubble_takes_seventy_percent() {
        assert_eq!(MessageBubble::bubble_width(100), 70);
        assert_eq!(MessageBubble::bubble_width(20), 14);
        // Minimum width wins on narrow rows, but never exceeds the row
        assert_eq!(MessageBubble::bubble_width(15), 12);
        assert_eq!(MessageBubble::bubble_width(8), 8);
    }

    #[test]
    fn me_is_right_aligned_bot_is_left() {
        let row = Rect::new(2, 4, 100, 5);
        assert_eq!(MessageBubble::bubble_rect(Author::Me, row).x, 32);
        assert_eq!(MessageBubble::bubble_rect(Author::Bot, row).x, 2);
    }

    #[test]
    fn styles_follow_author() {
        assert_eq!(bubble_style(Author::Me).bg, Some(Color::Yellow));
        assert_eq!(bubble_style(Author::Bot).bg, Some(Color::Gray));
        assert_eq!(bubble_style(Author::Me).fg, Some(Color::Black));
    }

    #[test]
    fn height_single_line() {
        let msg = ChatMessage::bot("Ask me now");
        // borders + author line + one text line
        assert_eq!(MessageBubble::calculate_height(&msg, 80), 4);
    }

    #[test]
    fn height_wraps_long_text() {
        // Row 20 → bubble 14 → 10 content columns
        let msg = ChatMessage::me("aaaa bbbb cccc");
        assert_eq!(MessageBubble::calculate_height(&msg, 20), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn height_saturates_for_huge_text() {
        // Two words per line at 10 content columns, far past u16::MAX lines
        let text = "word ".repeat(200_000);
        let msg = ChatMessage::me(text);
        assert_eq!(MessageBubble::calculate_height(&msg, 20), u16::MAX);
    }

    #[test]
    fn height_degenerate_width() {
        let msg = ChatMessage::me("Hello");
        assert_eq!(MessageBubble::calculate_height(&msg, 3), 1);
    }

    #[test]
    fn renders_author_label_and_text() {
        let buf = render_row(&ChatMessage::me("Hello"), 40);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Me:"));
        assert!(text.contains("Hello"));
    }

    #[test]
    fn user_bubble_leaves_left_side_empty() {
        let buf = render_row(&ChatMessage::me("Hello"), 40);
        // 70% of 40 = 28 wide, starting at column 12
        assert_eq!(buf[(0, 0)].symbol(), " ");
        assert_eq!(buf[(0, 0)].bg, Color::Reset);
        assert_eq!(buf[(12, 1)].bg, Color::Yellow);
    }

    #[test]
    fn bot_bubble_starts_at_left_edge() {
        let buf = render_row(&ChatMessage::bot("Ask me now"), 40);
        assert_eq!(buf[(0, 0)].symbol(), "╭");
        assert_eq!(buf[(39, 0)].bg, Color::Reset);
    }
}
