use std::io;
use std::path;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::Route;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::ChatFocus;
use crate::domain::services::ChatPhase;
use crate::domain::services::Navbar;
use crate::domain::services::SessionStore;
use crate::domain::services::Themes;
use crate::domain::services::EMPTY_CHAT_TITLE;

fn render_chat(frame: &mut Frame, rect: Rect, app_state: &mut AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Length(32), Constraint::Min(1)])
        .split(rect);

    app_state.sidebar.render(
        frame,
        columns[0],
        app_state.chat.conversation_id(),
        app_state.chat_focus == ChatFocus::Sidebar,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Min(1), Constraint::Max(4)])
        .split(columns[1]);

    if rows[0].width != app_state.last_known_width || rows[0].height != app_state.last_known_height
    {
        app_state.set_rect(rows[0]);
    }

    if app_state.chat.phase() == ChatPhase::LoadingHistory {
        Loading::new("Loading conversation...").render(frame, rows[0]);
    } else if app_state.chat.is_empty_state() {
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    EMPTY_CHAT_TITLE,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from("Ask about interviews, career moves, or your resume."),
            ])
            .alignment(Alignment::Center),
            rows[0],
        );
    } else {
        app_state
            .bubble_list
            .render(frame, rows[0], app_state.scroll.position);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            rows[0].inner(&Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut app_state.scroll.scrollbar_state,
        );
    }

    if app_state.chat.phase() == ChatPhase::AwaitingReply {
        Loading::new("Thinking...").render(frame, rows[1]);
    } else {
        frame.render_widget(app_state.chat_input.widget(), rows[1]);
    }
}

fn render(frame: &mut Frame, app_state: &mut AppState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    Navbar::render(frame, layout[0], app_state.session(), &app_state.route);

    match app_state.route.clone() {
        Route::Home => app_state.home.render(frame, layout[1]),
        Route::Dashboard => app_state.dashboard.render(frame, layout[1]),
        Route::Login => app_state.login.render(frame, layout[1]),
        Route::Register => app_state.register.render(frame, layout[1]),
        Route::Analyzer => app_state.analyzer.render(frame, layout[1]),
        Route::Chat(_) => render_chat(frame, layout[1], app_state),
    }

    let mut status = format!("{} | CTRL+C exit", app_state.route.path());
    if app_state.session().is_guest() {
        status = format!("{status} | guest session");
    }
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
        layout[2],
    );
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    mut events: EventsService,
) -> Result<()> {
    #[cfg(feature = "dev")]
    {
        use crate::domain::models::TextArea;
        let test_str = "Give me three behavioral interview questions for a staff engineer role, with a STAR outline for each.";
        TextArea::paste(&mut app_state.chat_input, test_str);
    }

    loop {
        terminal.draw(|frame| {
            render(frame, app_state);
        })?;

        let event = events.next().await?;
        for action in app_state.handle_event(event).await {
            tx.send(action)?;
        }

        if app_state.should_quit {
            break;
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let theme = Themes::get(&Config::get(ConfigKey::Theme))?;
    let session_store =
        SessionStore::load(path::PathBuf::from(Config::get(ConfigKey::SessionFile))).await;
    let mut app_state = AppState::new(session_store, theme);
    for action in app_state.navigate(Route::Home) {
        tx.send(action)?;
    }

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    start_loop(&mut terminal, &mut app_state, tx, EventsService::new(rx)).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
