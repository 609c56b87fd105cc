use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::engine::gapper::Token;
use crate::engine::grading::AnswerStatus;
use crate::session::exercise::Exercise;
use crate::ui::theme::Theme;

/// Pure projection of an exercise into styled text: one span run per Text
/// token, one composite (prefix, typed value, underscore padding, trailing)
/// per Gap. Owns no state; re-rendering with the same session is safe.
pub struct ClozeArea<'a> {
    exercise: &'a Exercise,
    theme: &'a Theme,
}

impl<'a> ClozeArea<'a> {
    pub fn new(exercise: &'a Exercise, theme: &'a Theme) -> Self {
        Self { exercise, theme }
    }
}

impl Widget for ClozeArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" C-Test ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = vec![Line::default()];
        let mut gap_idx = 0usize;

        for token in &self.exercise.tokens {
            match token {
                Token::Text { content } => {
                    for (i, segment) in content.split('\n').enumerate() {
                        if i > 0 {
                            lines.push(Line::default());
                        }
                        if !segment.is_empty() {
                            lines.last_mut().unwrap().push_span(Span::styled(
                                segment.to_string(),
                                Style::default().fg(colors.fg()),
                            ));
                        }
                    }
                }
                Token::Gap {
                    prefix, trailing, ..
                } => {
                    let slot = &self.exercise.slots[gap_idx];
                    let focused = gap_idx == self.exercise.focused;
                    gap_idx += 1;

                    let line = lines.last_mut().unwrap();
                    line.push_span(Span::styled(
                        prefix.clone(),
                        Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
                    ));

                    let value_style = match slot.status {
                        AnswerStatus::Correct => Style::default().fg(colors.text_correct()),
                        AnswerStatus::Incorrect => Style::default()
                            .fg(colors.text_incorrect())
                            .bg(colors.text_incorrect_bg())
                            .add_modifier(Modifier::UNDERLINED),
                        AnswerStatus::Empty => Style::default().fg(colors.fg()),
                    };
                    if !slot.value.is_empty() {
                        line.push_span(Span::styled(slot.value.clone(), value_style));
                    }

                    let typed = slot.value.chars().count();
                    let remaining = slot.record.missing_len().saturating_sub(typed);
                    if remaining > 0 {
                        if focused {
                            line.push_span(Span::styled(
                                "_",
                                Style::default()
                                    .fg(colors.text_cursor_fg())
                                    .bg(colors.text_cursor_bg()),
                            ));
                            if remaining > 1 {
                                line.push_span(Span::styled(
                                    "_".repeat(remaining - 1),
                                    Style::default().fg(colors.text_pending()),
                                ));
                            }
                        } else {
                            line.push_span(Span::styled(
                                "_".repeat(remaining),
                                Style::default().fg(colors.text_pending()),
                            ));
                        }
                    } else if focused {
                        // Full gap: mark focus on the last typed char's cell
                        line.push_span(Span::styled(
                            " ",
                            Style::default().bg(colors.text_cursor_bg()),
                        ));
                    }

                    if !trailing.is_empty() {
                        line.push_span(Span::styled(
                            trailing.clone(),
                            Style::default().fg(colors.fg()),
                        ));
                    }
                }
            }
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .style(Style::default().bg(colors.bg()))
            .render(inner, buf);
    }
}
