use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ideas::client::Issue;
use crate::ideas::markdown;
use crate::ui::theme::Theme;

const CARD_ROWS: usize = 4;

/// Card list of fetched issues: title, label chips, a markdown-stripped
/// excerpt. Shows a progress notice until the list fetch completes.
pub struct IdeaList<'a> {
    issues: &'a [Issue],
    selected: usize,
    loading: bool,
    theme: &'a Theme,
}

impl<'a> IdeaList<'a> {
    pub fn new(issues: &'a [Issue], selected: usize, loading: bool, theme: &'a Theme) -> Self {
        Self {
            issues,
            selected,
            loading,
            theme,
        }
    }
}

impl Widget for IdeaList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Idea Board ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.loading {
            let notice = Paragraph::new(Line::from(Span::styled(
                "Loading ideas…",
                Style::default().fg(colors.text_pending()),
            )))
            .alignment(Alignment::Center);
            notice.render(inner, buf);
            return;
        }

        if self.issues.is_empty() {
            let notice = Paragraph::new(Line::from(Span::styled(
                "No open ideas.",
                Style::default().fg(colors.text_pending()),
            )))
            .alignment(Alignment::Center);
            notice.render(inner, buf);
            return;
        }

        let visible = (inner.height as usize / CARD_ROWS).max(1);
        let first = self.selected.saturating_sub(visible.saturating_sub(1));

        let mut lines: Vec<Line> = Vec::new();
        let excerpt_width = inner.width.saturating_sub(4) as usize;

        for (i, issue) in self.issues.iter().enumerate().skip(first).take(visible) {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };

            let title_style = Style::default()
                .fg(if is_selected {
                    colors.accent()
                } else {
                    colors.fg()
                })
                .add_modifier(if is_selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                });
            lines.push(Line::from(Span::styled(
                format!(" {indicator} #{} {}", issue.number, issue.title),
                title_style,
            )));

            let mut chip_spans: Vec<Span> = vec![Span::raw("   ")];
            for label in &issue.labels {
                chip_spans.push(Span::styled(
                    format!("[{}]", label.name),
                    Style::default().fg(colors.chip()),
                ));
                chip_spans.push(Span::raw(" "));
            }
            lines.push(Line::from(chip_spans));

            let excerpt = issue
                .body
                .as_deref()
                .map(|body| markdown::card_excerpt(body, excerpt_width))
                .unwrap_or_default();
            lines.push(Line::from(Span::styled(
                format!("   {excerpt}"),
                Style::default().fg(colors.text_pending()),
            )));
            lines.push(Line::default());
        }

        Paragraph::new(lines)
            .style(Style::default().bg(colors.bg()))
            .render(inner, buf);
    }
}
