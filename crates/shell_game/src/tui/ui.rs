//! Stateless UI rendering for the shell game.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use shell_game_logic::{GameState, GameStatus, Shell};

use super::app::App;

const CUP: [&str; 3] = ["  _____  ", " /     \\ ", "/_______\\"];
const BALL: &str = "(●)";

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, state: &GameState, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Shells
            Constraint::Length(3), // Stake and Go
            Constraint::Length(3), // Status
        ])
        .split(area);

    draw_header(frame, chunks[0], state);
    draw_shells(frame, chunks[1], state, app.cursor());
    draw_footer(frame, chunks[2], state);

    let status = Paragraph::new(app.message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);

    if state.status() == GameStatus::GameOver {
        draw_result(frame, area, state);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, state: &GameState) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        Span::styled(format!("Score: {}", state.score()), bold),
        Span::raw("    "),
        Span::styled(
            format!("Best: {}", state.high_score()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("    "),
        Span::styled(format!("● {}", state.balls_amount()), bold.fg(Color::Cyan)),
    ]);

    let header = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Shell Game"));
    frame.render_widget(header, area);
}

fn draw_shells(frame: &mut Frame, area: Rect, state: &GameState, cursor: usize) {
    let shells = state.shells();
    let constraints: Vec<Constraint> = shells.iter().map(|_| Constraint::Length(13)).collect();

    let row = center_rect(area, 13 * shells.len() as u16, 6);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(row);

    let choosing = state.status() == GameStatus::WaitForChoose;
    for (slot, (shell, col)) in shells.iter().zip(cols.iter()).enumerate() {
        let highlighted = choosing && slot == cursor;
        let cup = Paragraph::new(cup_lines(shell, highlighted)).alignment(Alignment::Center);
        frame.render_widget(cup, *col);
    }
}

/// A lowered cup hides the ball; a lifted cup floats two rows higher and
/// shows what is under it.
fn cup_lines(shell: &Shell, highlighted: bool) -> Vec<Line<'static>> {
    let style = if highlighted {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    };
    let cup = CUP.iter().map(|row| Line::from(Span::styled(*row, style)));

    if shell.is_up() {
        let under = if shell.has_ball() { BALL } else { "" };
        cup.chain([
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(under, Style::default().fg(Color::White))),
        ])
        .collect()
    } else {
        [Line::from(""), Line::from("")]
            .into_iter()
            .chain(cup)
            .chain([Line::from("‾‾‾‾‾‾‾‾‾")])
            .collect()
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, state: &GameState) {
    let enabled = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
    let disabled = Style::default().fg(Color::DarkGray);
    let pick = |on: bool| if on { enabled } else { disabled };

    let line = Line::from(vec![
        Span::raw("Stake: "),
        Span::styled("◀ ", pick(state.can_decrease_stake())),
        Span::styled(
            state.balls_selected().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", pick(state.can_increase_stake())),
        Span::raw("        "),
        Span::styled("[ Go! ]", pick(state.status() == GameStatus::WaitForStart)),
    ]);

    let footer = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn draw_result(frame: &mut Frame, area: Rect, state: &GameState) {
    let popup = center_rect(area, 36, 9);
    let text = vec![
        Line::from(Span::styled(
            "Game Over",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Score: {}", state.score())),
        Line::from(format!("High score: {}", state.high_score())),
        Line::from(""),
        Line::from("Enter / r: play again   q: quit"),
    ];

    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Result"));
    frame.render_widget(Clear, popup);
    frame.render_widget(dialog, popup);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
