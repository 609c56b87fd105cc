use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::ideas::client::{Comment, Issue};
use crate::ideas::markdown;
use crate::ui::theme::Theme;

/// Detail view of one idea: issue body plus its comments. The issue and the
/// comment list arrive from two independent fetches; the progress notice
/// stays until both are present, whichever order they land in.
pub struct IdeaDetail<'a> {
    issue: Option<&'a Issue>,
    comments: Option<&'a [Comment]>,
    scroll: u16,
    theme: &'a Theme,
}

impl<'a> IdeaDetail<'a> {
    pub fn new(
        issue: Option<&'a Issue>,
        comments: Option<&'a [Comment]>,
        scroll: u16,
        theme: &'a Theme,
    ) -> Self {
        Self {
            issue,
            comments,
            scroll,
            theme,
        }
    }
}

impl Widget for IdeaDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Idea ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let (Some(issue), Some(comments)) = (self.issue, self.comments) else {
            let notice = Paragraph::new(Line::from(Span::styled(
                "Loading…",
                Style::default().fg(colors.text_pending()),
            )))
            .alignment(Alignment::Center);
            notice.render(inner, buf);
            return;
        };

        let mut lines: Vec<Line> = Vec::new();

        lines.push(Line::from(Span::styled(
            issue.title.clone(),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            issue.html_url.clone(),
            Style::default().fg(colors.text_pending()),
        )));
        lines.push(Line::default());

        let body = issue.body.as_deref().unwrap_or("");
        for body_line in markdown::strip_markdown(body).lines() {
            lines.push(Line::from(Span::styled(
                body_line.to_string(),
                Style::default().fg(colors.fg()),
            )));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("Comments ({})", comments.len()),
            Style::default()
                .fg(colors.header_fg())
                .add_modifier(Modifier::BOLD),
        )));

        if comments.is_empty() {
            lines.push(Line::from(Span::styled(
                "No comments.",
                Style::default()
                    .fg(colors.text_pending())
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        for comment in comments {
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled(
                    comment.user.login.clone(),
                    Style::default()
                        .fg(colors.chip())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", comment.created_at.format("%Y-%m-%d")),
                    Style::default().fg(colors.text_pending()),
                ),
            ]));
            let comment_body = comment.body.as_deref().unwrap_or("");
            for body_line in markdown::strip_markdown(comment_body).lines() {
                lines.push(Line::from(Span::styled(
                    body_line.to_string(),
                    Style::default().fg(colors.fg()),
                )));
            }
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .style(Style::default().bg(colors.bg()))
            .render(inner, buf);
    }
}
