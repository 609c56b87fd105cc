mod app;
mod config;
mod engine;
mod event;
mod ideas;
mod session;
mod store;
mod ui;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use tracing_subscriber::EnvFilter;

use app::{App, AppScreen, NoticeKind};
use event::{AppEvent, EventHandler};
use session::input;
use ui::components::cloze_area::ClozeArea;
use ui::components::idea_detail::IdeaDetail;
use ui::components::idea_list::IdeaList;
use ui::components::options_panel::OptionsPanel;
use ui::layout::AppLayout;
use ui::text_editor::TextEditor;

#[derive(Parser)]
#[command(
    name = "clozer",
    version,
    about = "Terminal C-Test trainer with an open-source idea board"
)]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Issue repository for the idea board (owner/name)")]
    repo: Option<String>,

    #[arg(help = "Text file to preload into the compose screen")]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let mut app = App::new();

    if let Some(repo) = cli.repo {
        app.set_ideas_repo(&repo);
    }
    if let Some(theme_name) = cli.theme {
        match ui::theme::Theme::load(&theme_name) {
            Some(theme) => {
                let theme: &'static ui::theme::Theme = Box::leak(Box::new(theme));
                app.theme = theme;
                app.menu.theme = theme;
            }
            None => {
                tracing::warn!(
                    theme = theme_name,
                    available = ?ui::theme::Theme::available_themes(),
                    "unknown theme, keeping configured one"
                );
            }
        }
    }
    if let Some(path) = cli.file {
        let content = fs::read_to_string(&path)?;
        app.editor.set_text(content.trim_end());
        app.screen = AppScreen::Compose;
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Diagnostics go to a log file, never to the terminal the UI owns. Logging
/// is best-effort: if the file cannot be created the app runs without it.
fn init_logging() {
    let Some(dir) = dirs::data_dir() else {
        return;
    };
    let dir = dir.join("clozer");
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = fs::File::create(dir.join("clozer.log")) else {
        return;
    };
    let filter = EnvFilter::try_from_env("CLOZER_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key, events),
            AppEvent::Fetch(fetch) => app.on_fetch(fetch),
            AppEvent::Tick => {}
            AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent, events: &EventHandler) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key, events),
        AppScreen::Compose => handle_compose_key(app, key),
        AppScreen::Exercise => handle_exercise_key(app, key),
        AppScreen::Ideas => handle_ideas_key(app, key, events),
        AppScreen::IdeaDetail => handle_detail_key(app, key),
        AppScreen::Preferences => handle_preferences_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent, events: &EventHandler) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('t') | KeyCode::Char('1') => app.go_to_compose(),
        KeyCode::Char('i') | KeyCode::Char('2') => app.open_ideas(&events.sender()),
        KeyCode::Char('p') | KeyCode::Char('3') => app.go_to_preferences(),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => match app.menu.selected {
            0 => app.go_to_compose(),
            1 => app.open_ideas(&events.sender()),
            2 => app.go_to_preferences(),
            _ => {}
        },
        _ => {}
    }
}

fn handle_compose_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Char('g') if ctrl => app.generate(),
        KeyCode::Char('l') if ctrl => app.load_sample(),
        KeyCode::Char('t') if ctrl => app.toggle_panel(),
        KeyCode::Char('r') if ctrl => app.reset(),
        _ => app.editor.handle(key),
    }
}

fn handle_exercise_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.leave_exercise(),
        KeyCode::Char('e') if ctrl => {
            if let Some(exercise) = &mut app.exercise {
                exercise.hint_focused();
            }
        }
        KeyCode::Char('s') if ctrl => app.compute_score(),
        KeyCode::Char('a') if ctrl => app.reveal_answers(),
        KeyCode::Char('r') if ctrl => app.reset(),
        KeyCode::Tab | KeyCode::Right => {
            if let Some(exercise) = &mut app.exercise {
                exercise.focus_next();
            }
        }
        KeyCode::BackTab | KeyCode::Left => {
            if let Some(exercise) = &mut app.exercise {
                exercise.focus_prev();
            }
        }
        KeyCode::Backspace => {
            if let Some(exercise) = &mut app.exercise {
                input::process_backspace(exercise);
            }
        }
        KeyCode::Char(ch) if !ctrl => {
            if let Some(exercise) = &mut app.exercise {
                input::process_char(exercise, ch);
            }
        }
        _ => {}
    }
}

fn handle_ideas_key(app: &mut App, key: KeyEvent, events: &EventHandler) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Down | KeyCode::Char('j') => app.ideas_select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.ideas_select_prev(),
        KeyCode::Enter => app.open_selected_idea(&events.sender()),
        KeyCode::Char('r') => {
            app.ideas.clear();
            app.open_ideas(&events.sender());
        }
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.detail = None;
            app.screen = AppScreen::Ideas;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if let Some(detail) = app.detail.as_mut() {
                detail.scroll = detail.scroll.saturating_add(1);
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if let Some(detail) = app.detail.as_mut() {
                detail.scroll = detail.scroll.saturating_sub(1);
            }
        }
        _ => {}
    }
}

fn handle_preferences_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.save_preferences();
            app.go_to_menu();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.prefs_selected = app.prefs_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.prefs_selected = (app.prefs_selected + 1).min(2);
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.prefs_cycle(true),
        KeyCode::Left | KeyCode::Char('h') => app.prefs_cycle(false),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Compose => render_compose(frame, app),
        AppScreen::Exercise => render_exercise(frame, app),
        AppScreen::Ideas => render_ideas(frame, app),
        AppScreen::IdeaDetail => render_detail(frame, app),
        AppScreen::Preferences => render_preferences(frame, app),
    }
}

fn render_header(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, app: &App, info: &str) {
    let colors = &app.theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " clozer ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info.to_string(),
            Style::default()
                .fg(colors.text_pending())
                .bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_notice(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, app: &App) {
    let colors = &app.theme.colors;
    let Some(notice) = &app.notice else {
        return;
    };
    let style = match notice.kind {
        NoticeKind::Info => Style::default().fg(colors.success()),
        NoticeKind::Error => Style::default()
            .fg(colors.error())
            .add_modifier(Modifier::BOLD),
    };
    let line = Paragraph::new(Line::from(Span::styled(format!(" {}", notice.text), style)));
    frame.render_widget(line, area);
}

fn render_footer(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, app: &App, hints: &str) {
    let colors = &app.theme.colors;
    let footer = Paragraph::new(Line::from(Span::styled(
        hints.to_string(),
        Style::default().fg(colors.text_pending()),
    )));
    frame.render_widget(footer, area);
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    render_header(
        frame,
        layout.header,
        app,
        &format!(" ideas: {}", app.config.ideas_repo),
    );

    let menu_area = ui::layout::centered_rect(50, 80, layout.main);
    frame.render_widget(&app.menu, menu_area);

    render_notice(frame, layout.notice, app);
    render_footer(
        frame,
        layout.footer,
        app,
        " [t] Test  [i] Ideas  [p] Preferences  [q] Quit ",
    );
}

/// Compose buffer lines with a block cursor, placeholder text when empty.
fn editor_lines<'a>(editor: &'a TextEditor, app: &App) -> Vec<Line<'a>> {
    let colors = &app.theme.colors;

    if editor.is_empty() {
        return vec![Line::from(vec![
            Span::styled(" ", Style::default().bg(colors.text_cursor_bg())),
            Span::styled(
                "Paste or type a text, then press Ctrl-G…",
                Style::default().fg(colors.text_pending()),
            ),
        ])];
    }

    let (cursor_line, cursor_col) = editor.cursor_position();
    let mut lines = Vec::new();
    for (i, text_line) in editor.value().split('\n').enumerate() {
        if i == cursor_line {
            let split = text_line
                .char_indices()
                .nth(cursor_col)
                .map(|(b, c)| (b, Some(c)))
                .unwrap_or((text_line.len(), None));
            let mut spans = vec![Span::styled(
                &text_line[..split.0],
                Style::default().fg(colors.fg()),
            )];
            match split.1 {
                Some(ch) => {
                    let next = split.0 + ch.len_utf8();
                    spans.push(Span::styled(
                        &text_line[split.0..next],
                        Style::default()
                            .fg(colors.text_cursor_fg())
                            .bg(colors.text_cursor_bg()),
                    ));
                    spans.push(Span::styled(
                        &text_line[next..],
                        Style::default().fg(colors.fg()),
                    ));
                }
                None => {
                    spans.push(Span::styled(
                        " ",
                        Style::default().bg(colors.text_cursor_bg()),
                    ));
                }
            }
            lines.push(Line::from(spans));
        } else {
            lines.push(Line::from(Span::styled(
                text_line,
                Style::default().fg(colors.fg()),
            )));
        }
    }
    lines
}

fn render_compose(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = AppLayout::new(frame.area());
    render_header(frame, layout.header, app, " Compose");

    let panel_height = OptionsPanel::height(app.panel_collapsed);
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(panel_height), Constraint::Min(3)])
        .split(layout.main);

    let panel = OptionsPanel::new(&app.preferences, app.panel_collapsed, app.theme);
    frame.render_widget(panel, main_layout[0]);

    let block = Block::bordered()
        .title(" Source text ")
        .border_style(Style::default().fg(colors.border_focused()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(main_layout[1]);
    frame.render_widget(block, main_layout[1]);
    frame.render_widget(
        Paragraph::new(editor_lines(&app.editor, app))
            .wrap(ratatui::widgets::Wrap { trim: false }),
        inner,
    );

    render_notice(frame, layout.notice, app);
    render_footer(
        frame,
        layout.footer,
        app,
        " [Ctrl-G] Generate  [Ctrl-L] Sample  [Ctrl-T] Options  [Ctrl-R] Clear  [Esc] Menu ",
    );
}

fn render_exercise(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    if let Some(exercise) = &app.exercise {
        let info = format!(
            " Gaps: {} | Filled: {}",
            exercise.gap_count(),
            exercise.filled_count()
        );
        render_header(frame, layout.header, app, &info);

        let cloze = ClozeArea::new(exercise, app.theme);
        frame.render_widget(cloze, layout.main);
    }

    render_notice(frame, layout.notice, app);
    render_footer(
        frame,
        layout.footer,
        app,
        " [Tab] Next gap  [Ctrl-E] Hint  [Ctrl-S] Score  [Ctrl-A] Answers  [Ctrl-R] Reset  [Esc] Back ",
    );
}

fn render_ideas(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    render_header(
        frame,
        layout.header,
        app,
        &format!(" Idea Board — {}", app.config.ideas_repo),
    );

    let list = IdeaList::new(&app.ideas, app.ideas_selected, app.ideas_loading, app.theme);
    frame.render_widget(list, layout.main);

    render_notice(frame, layout.notice, app);
    render_footer(
        frame,
        layout.footer,
        app,
        " [Enter] Open  [j/k] Move  [r] Reload  [Esc] Menu ",
    );
}

fn render_detail(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    render_header(frame, layout.header, app, " Idea");

    if let Some(detail) = &app.detail {
        let widget = IdeaDetail::new(
            detail.issue.as_ref(),
            detail.comments.as_deref(),
            detail.scroll,
            app.theme,
        );
        frame.render_widget(widget, layout.main);
    }

    render_notice(frame, layout.notice, app);
    render_footer(frame, layout.footer, app, " [j/k] Scroll  [Esc] Back ");
}

fn render_preferences(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let area = frame.area();
    let centered = ui::layout::centered_rect(60, 70, area);

    let block = Block::bordered()
        .title(" Preferences ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let fields: Vec<(String, String)> = vec![
        (
            "Start gaps at sentence".to_string(),
            format!("{}", app.preferences.start_sentence),
        ),
        (
            "Skip words shorter than".to_string(),
            format!("{}", app.preferences.skip_words_shorter_than),
        ),
        (
            "Keep hint capitalization".to_string(),
            if app.preferences.capitalize_hints {
                "yes".to_string()
            } else {
                "no".to_string()
            },
        ),
    ];

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(fields.len() as u16 * 3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(inner);

    let header = Paragraph::new(Line::from(Span::styled(
        "  Use arrows to navigate, Enter/Right to change, ESC to save & exit",
        Style::default().fg(colors.text_pending()),
    )));
    header.render(layout[0], frame.buffer_mut());

    let field_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            fields
                .iter()
                .map(|_| Constraint::Length(3))
                .collect::<Vec<_>>(),
        )
        .split(layout[1]);

    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.prefs_selected;
        let indicator = if is_selected { " > " } else { "   " };

        let label_style = Style::default()
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
        let value_style = Style::default().fg(if is_selected {
            colors.hint()
        } else {
            colors.text_pending()
        });

        let lines = vec![
            Line::from(Span::styled(format!("{indicator}{label}:"), label_style)),
            Line::from(Span::styled(format!("  < {value} >"), value_style)),
        ];
        Paragraph::new(lines).render(field_layout[i], frame.buffer_mut());
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        "  [ESC] Save & back  [Enter/arrows] Change value",
        Style::default().fg(colors.accent()),
    )));
    footer.render(layout[3], frame.buffer_mut());
}
