use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::store::schema::Preferences;
use crate::ui::theme::Theme;

/// Collapsible strip above the compose editor showing the active gap
/// settings. Collapsed it is a single reminder line; the collapsed state is
/// persisted by the caller.
pub struct OptionsPanel<'a> {
    prefs: &'a Preferences,
    collapsed: bool,
    theme: &'a Theme,
}

impl<'a> OptionsPanel<'a> {
    pub fn new(prefs: &'a Preferences, collapsed: bool, theme: &'a Theme) -> Self {
        Self {
            prefs,
            collapsed,
            theme,
        }
    }

    /// Rows the panel occupies in its current state.
    pub fn height(collapsed: bool) -> u16 {
        if collapsed { 1 } else { 2 }
    }
}

impl Widget for OptionsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        if self.collapsed {
            let line = Line::from(Span::styled(
                " Options hidden — [Ctrl-T] show ",
                Style::default().fg(colors.text_pending()),
            ));
            Paragraph::new(line)
                .style(Style::default().bg(colors.bg()))
                .render(area, buf);
            return;
        }

        let hints = if self.prefs.capitalize_hints {
            "keep case"
        } else {
            "lowercase"
        };
        let summary = format!(
            " Gaps from sentence {} | skip words under {} chars | hints {} ",
            self.prefs.start_sentence, self.prefs.skip_words_shorter_than, hints
        );
        let lines = vec![
            Line::from(Span::styled(summary, Style::default().fg(colors.fg()))),
            Line::from(Span::styled(
                " edit in Preferences from the menu  [Ctrl-T] hide ",
                Style::default().fg(colors.text_pending()),
            )),
        ];
        Paragraph::new(lines)
            .style(Style::default().bg(colors.bg()))
            .render(area, buf);
    }
}
