use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tokio::time::{self, Duration};
use tracing::info;

use crate::app::state::{App, InputMode, Page};
use crate::ui::views::draw;

pub async fn run_app(app: &mut App) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(app, &mut terminal).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    info!("session closed");
    res
}

async fn run_loop(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
) -> io::Result<()> {
    // Redraws keep the sidebar clock current.
    let mut tick = time::interval(Duration::from_millis(250));

    loop {
        terminal.draw(|f| draw(f, app))?;

        tokio::select! {
            _ = tick.tick() => {}
            Ok(should_quit) = handle_event(app) => {
                if should_quit { break; }
            }
        }
    }
    Ok(())
}

async fn handle_event(app: &mut App) -> io::Result<bool> {
    if event::poll(std::time::Duration::from_millis(16))?
        && let Event::Key(key) = event::read()?
        && key.kind == KeyEventKind::Press
    {
        // Global quit
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        return Ok(match app.mode {
            InputMode::Amount => {
                handle_amount_input(app, key);
                false
            }
            InputMode::Normal => handle_normal_input(app, key),
        });
    }
    Ok(false)
}

fn handle_amount_input(app: &mut App, key: event::KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_amount(),
        KeyCode::Enter => {
            app.confirm_buy();
        }
        KeyCode::Backspace => app.on_amount_backspace(),
        KeyCode::Char(ch) => app.on_amount_char(ch),
        _ => {}
    }
}

fn handle_normal_input(app: &mut App, key: event::KeyEvent) -> bool {
    let on_item = app.nav.item.is_some();
    let on_front = app.nav.page == Page::Bazaar && app.nav.section.is_none();

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Esc | KeyCode::Backspace => return app.back() && key.code == KeyCode::Esc,
        KeyCode::Up => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                app.jump_to_top();
            } else {
                app.move_selection(-1);
            }
        }
        KeyCode::Down => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                app.jump_to_bottom();
            } else {
                app.move_selection(1);
            }
        }
        KeyCode::PageUp => app.move_selection(-10),
        KeyCode::PageDown => app.move_selection(10),
        KeyCode::Home => app.jump_to_top(),
        KeyCode::End => app.jump_to_bottom(),
        KeyCode::Left => app.cycle_category(-1),
        KeyCode::Right | KeyCode::Tab => app.cycle_category(1),
        KeyCode::Enter => app.enter(),
        KeyCode::Char('o') => app.open_orders(),
        KeyCode::Char('b') if on_item => app.begin_buy(),
        KeyCode::Char('s') if on_item => {
            app.sell_held();
        }
        KeyCode::Char('S') if on_front => {
            app.sell_inventory();
        }
        _ => {}
    }
    false
}
