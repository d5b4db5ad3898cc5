use std::io::stdout;
use std::time::{Duration, Instant};

use algoscope_core::model::{Algorithm, Session};
use algoscope_protocol::{RenderCommand, ThemeToken, Viewport};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Paragraph},
};

/// Poll interval while no auto-advance is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Rows above the bars: title, status, message.
const HEADER_ROWS: u16 = 3;

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::BarDefault => Color::Gray,
        ThemeToken::BarComparing => Color::Yellow,
        ThemeToken::BarSwapping => Color::Red,
        ThemeToken::BarPivot => Color::Magenta,
        ThemeToken::BarActiveRange => Color::Cyan,
        ThemeToken::BarResolved => Color::Green,
        ThemeToken::BarFound => Color::LightGreen,
        ThemeToken::BarNotFound => Color::Rgb(120, 60, 60),
        ThemeToken::BarEliminated => Color::Rgb(60, 60, 60),
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextSecondary => Color::Gray,
        ThemeToken::TextMuted => Color::DarkGray,
        ThemeToken::Background => Color::Black,
        ThemeToken::StatusBar => Color::DarkGray,
    }
}

/// Take over the terminal and play `session` until the user quits.
pub fn run(session: &mut Session) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, session);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, session: &mut Session) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, session))?;

        let timeout = session
            .playback()
            .time_until_tick(Instant::now())
            .map_or(IDLE_POLL, |t| t.min(IDLE_POLL));
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let now = Instant::now();
            let playback = session.playback_mut();
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char(' ') => playback.toggle(now),
                KeyCode::Left => {
                    playback.prev();
                }
                KeyCode::Right => {
                    playback.next();
                }
                KeyCode::Home => playback.first(),
                KeyCode::End => playback.last(),
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    let speed = playback.speed().faster();
                    playback.set_speed(speed, now);
                }
                KeyCode::Char('-') => {
                    let speed = playback.speed().slower();
                    playback.set_speed(speed, now);
                }
                KeyCode::Char('r') => {
                    let size = session.input().len();
                    session.reset(size)?;
                }
                KeyCode::Char(']') => session.resize(true)?,
                KeyCode::Char('[') => session.resize(false)?,
                KeyCode::Tab => {
                    let next = next_algorithm(session.algorithm());
                    session.set_algorithm(next)?;
                }
                _ => {}
            }
        }

        session.playback_mut().tick(Instant::now());
    }
    Ok(())
}

fn next_algorithm(current: Algorithm) -> Algorithm {
    let index = Algorithm::ALL
        .iter()
        .position(|&a| a == current)
        .map_or(0, |i| (i + 1) % Algorithm::ALL.len());
    Algorithm::ALL[index]
}

fn draw(frame: &mut Frame, session: &Session) {
    let area = frame.area();
    let playback = session.playback();
    let bar_style = Style::default()
        .fg(theme_to_color(ThemeToken::TextPrimary))
        .bg(theme_to_color(ThemeToken::StatusBar));

    let title = format!(
        " algoscope | {} | space play/pause | \u{2190}\u{2192} step | +/- speed | r new input | tab algorithm | q quit ",
        session.algorithm()
    );
    frame.render_widget(
        Block::default().title(title).style(bar_style),
        Rect::new(area.x, area.y, area.width, 1),
    );

    let status = format!(
        " step {}/{} | {} | speed {} | {}",
        playback.index() + 1,
        playback.len(),
        playback.state().label(),
        playback.speed().level(),
        session.summary()
    );
    frame.render_widget(
        Paragraph::new(status)
            .style(Style::default().fg(theme_to_color(ThemeToken::TextSecondary))),
        Rect::new(area.x, area.y + 1, area.width, 1),
    );
    frame.render_widget(
        Paragraph::new(format!(" {}", session.message()))
            .style(Style::default().fg(theme_to_color(ThemeToken::TextPrimary))),
        Rect::new(area.x, area.y + 2, area.width, 1),
    );

    // Bars above a one-row label strip.
    let content = Rect::new(
        area.x,
        area.y + HEADER_ROWS,
        area.width,
        area.height.saturating_sub(HEADER_ROWS + 1),
    );
    let labels_y = content.y + content.height;
    frame.render_widget(
        Block::default().style(Style::default().bg(theme_to_color(ThemeToken::Background))),
        content,
    );
    if content.width == 0 || content.height == 0 {
        return;
    }

    let viewport = Viewport::new(f64::from(content.width), f64::from(content.height));
    let commands = session.render(&viewport);
    let buf = frame.buffer_mut();
    for cmd in &commands {
        let RenderCommand::DrawRect {
            rect, color, label, ..
        } = cmd
        else {
            continue;
        };

        let col = rect.x.round() as u16;
        let width = (rect.w.round() as u16).max(1);
        let top = rect.y.round() as u16;
        if col >= content.width {
            continue;
        }
        let width = width.min(content.width - col);
        let fg = theme_to_color(*color);

        for dy in top..content.height {
            for dx in 0..width {
                buf[(content.x + col + dx, content.y + dy)]
                    .set_char('\u{2588}')
                    .set_fg(fg)
                    .set_bg(Color::Black);
            }
        }

        let label = label.as_deref().unwrap_or("");
        if labels_y < area.y + area.height && label.len() <= usize::from(width) {
            for (i, ch) in label.chars().enumerate() {
                buf[(content.x + col + i as u16, labels_y)]
                    .set_char(ch)
                    .set_fg(theme_to_color(ThemeToken::TextMuted));
            }
        }
    }
}
