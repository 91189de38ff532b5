use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::EnableBracketedPaste;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Gauge;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::Status;
use crate::domain::models::StatusKind;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::CardView;
use crate::domain::services::Screen;

const TOKEN_TITLE: &str = "Bearer token (Enter to log in)";
const PATH_TITLE: &str = "Document path (Enter to select)";

pub fn help_text() -> String {
    let text = r#"
LOGIN SCREEN:
- Enter: Log in with the pasted token.

UPLOAD SCREEN:
- Enter: Select the document typed in the path box.
- CTRL+g: Generate flashcards from the selected document.
- CTRL+l: Switch the flashcard language.
- Up/Down: Change how many flashcards to generate.
- CTRL+s: Study the last generated flashcards.
- CTRL+e: Export flashcards as JSON.
- CTRL+o: Log out.

STUDY SCREEN:
- Right, n: Next card.
- Left, p: Previous card.
- Space, Enter: Flip the card.
- m: Mark or unmark the card as mastered.
- u: Back to the upload screen.
- e: Export flashcards as JSON.
- o: Log out.
- q, Esc: Quit.

ANY SCREEN:
- CTRL+c: Quit.
    "#;

    return text.trim().to_string();
}

fn render_status<B: Backend>(frame: &mut Frame<B>, rect: Rect, status: &Option<Status>, hint: &str) {
    let line = match status {
        Some(status) => {
            let color = match status.kind {
                StatusKind::Info => Color::Green,
                StatusKind::Warning => Color::Yellow,
                StatusKind::Error => Color::Red,
            };
            Line::from(Span::styled(status.text.to_string(), Style::default().fg(color)))
        }
        None => Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
    };

    frame.render_widget(Paragraph::new(vec![line]), rect);
}

fn render_login<B: Backend>(
    frame: &mut Frame<B>,
    app_state: &AppState,
    textarea: &tui_textarea::TextArea,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.size());

    frame.render_widget(
        Paragraph::new("Welcome to Flashdeck.\n\nPaste your bearer token below to log in.")
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title("Login")
                    .padding(Padding::new(1, 1, 1, 0)),
            ),
        layout[0],
    );
    frame.render_widget(textarea.widget(), layout[1]);
    render_status(frame, layout[2], &app_state.status, "CTRL+c to quit");
}

fn render_upload<B: Backend>(
    frame: &mut Frame<B>,
    app_state: &AppState,
    textarea: &tui_textarea::TextArea,
    loading: &Loading,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let uploader = &app_state.uploader;
    let document = match uploader.document() {
        Some(document) => format!("{} ({} bytes)", document.name, document.size),
        None => "none selected".to_string(),
    };
    let settings = vec![
        Line::from(format!("Document:   {document}")),
        Line::from(format!("Language:   {}", uploader.language())),
        Line::from(format!("Flashcards: {}", uploader.num_flashcards())),
    ];
    frame.render_widget(
        Paragraph::new(settings).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title("Generate flashcards (PDF or text, max 5MB)")
                .padding(Padding::new(1, 1, 0, 0)),
        ),
        layout[0],
    );

    let body = if !uploader.error().is_empty() {
        Paragraph::new(vec![Line::from(Span::styled(
            uploader.error().to_string(),
            Style::default().fg(Color::Red),
        ))])
    } else {
        Paragraph::new(uploader.preview().to_string())
    };
    frame.render_widget(
        body.wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title("Preview")
                .padding(Padding::new(1, 1, 0, 0)),
        ),
        layout[1],
    );

    if uploader.is_uploading() {
        loading.render(frame, layout[2]);
    } else {
        frame.render_widget(textarea.widget(), layout[2]);
    }

    render_status(
        frame,
        layout[3],
        &app_state.status,
        "CTRL+g generate, CTRL+s study, CTRL+e export, CTRL+o log out",
    );
}

fn render_study<B: Backend>(frame: &mut Frame<B>, app_state: &AppState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let study = match &app_state.study {
        Some(study) if !study.is_empty() => study,
        _ => {
            frame.render_widget(
                Paragraph::new("No flashcards to study.").alignment(Alignment::Center),
                layout[1],
            );
            render_status(frame, layout[3], &app_state.status, "u to upload, q to quit");
            return;
        }
    };

    frame.render_widget(
        Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Progress"))
            .gauge_style(Style::default().fg(Color::Blue))
            .ratio((study.progress_percent() / 100.0).clamp(0.0, 1.0))
            .label(format!("Card {}", study.position())),
        layout[0],
    );

    if let Some(card) = study.current() {
        let view = CardView::new(card, study.is_flipped(), study.is_current_mastered());
        let border_color = if study.is_current_mastered() {
            Color::Green
        } else {
            Color::Reset
        };
        frame.render_widget(
            Paragraph::new(view.body())
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(border_color))
                        .title(view.title())
                        .padding(Padding::new(2, 2, 1, 1)),
                ),
            layout[1],
        );
    }

    let markers = study
        .cards()
        .iter()
        .enumerate()
        .map(|(idx, card)| {
            let mut style = Style::default().fg(Color::DarkGray);
            if study.is_mastered(card) {
                style = style.fg(Color::Green);
            }
            if idx == study.current_index() {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            return Span::styled(if study.is_mastered(card) { "● " } else { "○ " }, style);
        })
        .collect::<Vec<Span>>();
    let summary = Line::from(format!(
        "Mastered: {} of {}    Remaining: {}",
        study.mastered_count(),
        study.len(),
        study.remaining_count()
    ));
    frame.render_widget(
        Paragraph::new(vec![Line::from(markers), summary]).alignment(Alignment::Center),
        layout[2],
    );
    render_status(
        frame,
        layout[3],
        &app_state.status,
        "Left/Right navigate, space flip, m mastered, u upload, q quit",
    );
}

async fn handle_upload_input(
    app_state: &mut AppState,
    input: Input,
    tx: &mpsc::UnboundedSender<Action>,
    textarea: &mut tui_textarea::TextArea<'_>,
) -> Result<()> {
    match input {
        Input {
            key: Key::Char('g'),
            ctrl: true,
            ..
        } => {
            if let Some(request) = app_state.submit() {
                tx.send(Action::Generate(request))?;
            }
        }
        Input {
            key: Key::Char('l'),
            ctrl: true,
            ..
        } => {
            app_state.uploader.next_language();
        }
        Input { key: Key::Up, .. } => {
            app_state.uploader.increment_num_flashcards();
        }
        Input { key: Key::Down, .. } => {
            app_state.uploader.decrement_num_flashcards();
        }
        Input {
            key: Key::Char('s'),
            ctrl: true,
            ..
        } => {
            app_state.open_study();
        }
        Input {
            key: Key::Char('e'),
            ctrl: true,
            ..
        } => {
            app_state.export().await;
        }
        Input {
            key: Key::Char('o'),
            ctrl: true,
            ..
        } => {
            app_state.logout();
        }
        input => {
            textarea.input(input);
        }
    }

    return Ok(());
}

/// Returns false when the user asked to quit.
async fn handle_study_input(app_state: &mut AppState, input: Input) -> bool {
    match input {
        Input {
            key: Key::Char('q'),
            ..
        }
        | Input { key: Key::Esc, .. } => {
            return false;
        }
        Input {
            key: Key::Char('u'),
            ..
        } => {
            app_state.open_upload();
        }
        Input {
            key: Key::Char('e'),
            ..
        } => {
            app_state.export().await;
        }
        Input {
            key: Key::Char('o'),
            ..
        } => {
            app_state.logout();
        }
        input => {
            let study = match app_state.study.as_mut() {
                Some(study) => study,
                None => return true,
            };

            match input.key {
                Key::Right | Key::Char('n') => study.advance(),
                Key::Left | Key::Char('p') => study.retreat(),
                Key::Char(' ') => study.flip(),
                Key::Char('m') => study.toggle_mastered(),
                _ => (),
            }
        }
    }

    return true;
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);
    let mut token_input = TextArea::with_title(TOKEN_TITLE);
    let mut path_input = TextArea::with_title(PATH_TITLE);
    let loading = Loading::default();

    loop {
        terminal.draw(|frame| {
            match app_state.screen {
                Screen::Login => render_login(frame, app_state, &token_input),
                Screen::Upload => render_upload(frame, app_state, &path_input, &loading),
                Screen::Study => render_study(frame, app_state),
            }
        })?;

        match events.next().await? {
            Event::GenerationResult(result) => {
                app_state.handle_generation_result(result);
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::UITick() => (),
            Event::KeyboardPaste(text) => match app_state.screen {
                Screen::Login => {
                    token_input.insert_str(text);
                }
                Screen::Upload => {
                    path_input.insert_str(text);
                }
                Screen::Study => (),
            },
            Event::KeyboardEnter() => match app_state.screen {
                Screen::Login => {
                    let token = token_input.lines().join("");
                    if token.trim().is_empty() {
                        continue;
                    }

                    token_input = TextArea::with_title(TOKEN_TITLE);
                    app_state.login(token.trim());
                }
                Screen::Upload => {
                    let path = path_input.lines().join("");
                    if path.trim().is_empty() {
                        continue;
                    }

                    app_state.select_path(&path).await;
                }
                Screen::Study => {
                    if let Some(study) = app_state.study.as_mut() {
                        study.flip();
                    }
                }
            },
            Event::KeyboardCharInput(input) => match app_state.screen {
                Screen::Login => {
                    token_input.input(input);
                }
                Screen::Upload => {
                    handle_upload_input(app_state, input, &tx, &mut path_input).await?;
                }
                Screen::Study => {
                    if !handle_study_input(app_state, input).await {
                        break;
                    }
                }
            },
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    // Startup login can fail, so it runs before the terminal is taken over.
    let mut app_state = AppState::from_config().await?;

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let res = start_loop(&mut terminal, &mut app_state, tx, rx).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return res;
}
