#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::app::App;
use crate::components::{Piece, ShapeKind};
use crate::controller::{GameState, GameView};
use crate::input::InputEvent;
use crate::touch::{Button, ButtonAction};
use ratatui::{
    prelude::*,
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Circle},
    },
};

const CELL_WIDTH: u16 = 2; // Each cell is 2 characters wide
const INFO_WIDTH: u16 = 24;
const BUTTONS_HEIGHT: u16 = 12;

#[must_use]
pub fn shape_color(kind: ShapeKind) -> Color {
    match kind {
        ShapeKind::A => Color::Cyan,
        ShapeKind::B => Color::Blue,
        ShapeKind::C => Color::LightYellow,
        ShapeKind::D => Color::Yellow,
        ShapeKind::E => Color::Green,
        ShapeKind::F => Color::Magenta,
        ShapeKind::G => Color::Red,
    }
}

pub fn render(f: &mut Frame, app: &mut App) {
    let (board_cols, board_rows) = {
        let board = app.game.board();
        (
            u16::try_from(board.width()).unwrap_or(u16::MAX),
            u16::try_from(board.height()).unwrap_or(u16::MAX),
        )
    };
    let board_width = board_cols.saturating_mul(CELL_WIDTH).saturating_add(2); // +2 for borders
    let board_height = board_rows.saturating_add(2);

    let area = f.area();
    if area.width < board_width.saturating_add(INFO_WIDTH) || area.height < board_height {
        let warning_text = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Paused"));
        f.render_widget(warning_text, centered_rect(50, 30, area));
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Min(INFO_WIDTH)])
        .split(area);

    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Score
            Constraint::Length(6), // Next piece
            Constraint::Min(3),    // Status
            Constraint::Length(BUTTONS_HEIGHT),
        ])
        .split(main_layout[1]);

    // The pad is laid out from its width, so keep it no wider than twice
    // its height. Hit regions follow what is drawn.
    let panel = info_layout[3];
    let buttons_area = Rect {
        width: panel.width.min(panel.height.saturating_mul(2)),
        ..panel
    };
    app.game.touch_mut().set_area(
        f32::from(buttons_area.x),
        f32::from(buttons_area.y),
        f32::from(buttons_area.width),
        f32::from(buttons_area.height),
    );

    let view = app.game.view();
    render_board(f, &view, main_layout[0]);
    render_score(f, &view, info_layout[0]);
    render_next_piece(f, view.next, info_layout[1]);
    render_status(f, &view, info_layout[2]);
    render_buttons(f, app.game.touch().buttons(), buttons_area);
}

fn render_board(f: &mut Frame, view: &GameView<'_>, area: Rect) {
    let (width, height) = (view.board.width(), view.board.height());
    let mut grid = vec![vec![None; width]; height];
    for (position, kind) in view.blocks() {
        if position.x >= 0 && position.y >= 0 {
            if let Some(cell) = grid
                .get_mut(position.y as usize)
                .and_then(|row| row.get_mut(position.x as usize))
            {
                *cell = Some(kind);
            }
        }
    }

    let lines: Vec<Line> = grid.iter().map(|row| cells_line(row)).collect();
    let board = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(board, area);
}

fn cells_line(row: &[Option<ShapeKind>]) -> Line<'static> {
    Line::from(
        row.iter()
            .map(|cell| match cell {
                Some(kind) => Span::styled("██", Style::default().fg(shape_color(*kind))),
                None => Span::styled(" .", Style::default().fg(Color::DarkGray)),
            })
            .collect::<Vec<_>>(),
    )
}

fn render_score(f: &mut Frame, view: &GameView<'_>, area: Rect) {
    let score = Paragraph::new(format!("{:08}", view.score))
        .block(Block::default().borders(Borders::ALL).title("Score"));
    f.render_widget(score, area);
}

pub fn render_next_piece(f: &mut Frame, next: Option<&Piece>, area: Rect) {
    let lines: Vec<Line> = next
        .map(|piece| {
            piece
                .blocks()
                .iter()
                .map(|row| {
                    let cells: Vec<_> = row.iter().map(|&b| b.then_some(piece.kind())).collect();
                    cells_line(&cells)
                })
                .collect()
        })
        .unwrap_or_default();

    let preview =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Next"));
    f.render_widget(preview, area);
}

fn render_status(f: &mut Frame, view: &GameView<'_>, area: Rect) {
    let mut lines = Vec::new();
    if view.state == GameState::GameOver {
        lines.push(Line::styled("GAME OVER", Style::default().fg(Color::Red)));
        lines.push(Line::from("Press confirm"));
    }
    if view.attract_mode {
        lines.push(Line::styled("DEMO", Style::default().fg(Color::Yellow)));
        lines.push(Line::from("Press confirm to play..."));
    }
    lines.push(Line::from("←/→ move  ↑ rotate"));
    lines.push(Line::from("↓ drop  space confirm"));

    let status = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

fn button_label(action: ButtonAction) -> &'static str {
    match action {
        ButtonAction::Event(InputEvent::MoveLeft) => "<",
        ButtonAction::Event(InputEvent::MoveRight) => ">",
        ButtonAction::Event(InputEvent::Rotate) => "^",
        ButtonAction::Event(InputEvent::SoftDrop) => "v",
        ButtonAction::Confirm => "OK",
    }
}

fn render_buttons(f: &mut Frame, buttons: &[Button], area: Rect) {
    let (left, top) = (f64::from(area.x), f64::from(area.y));
    let (width, height) = (f64::from(area.width), f64::from(area.height));

    let canvas = Canvas::default()
        .x_bounds([left, left + width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            for button in buttons {
                // Canvas y grows upwards
                let x = f64::from(button.x);
                let y = top + height - f64::from(button.y);
                let color = if button.is_pressed() {
                    Color::White
                } else {
                    Color::Yellow
                };
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: f64::from(button.radius),
                    color,
                });
                let label =
                    Span::styled(button_label(button.action), Style::default().fg(color));
                ctx.print(x, y, label);
            }
        });
    f.render_widget(canvas, area);
}

/// Helper function to create a centered rect using up certain percentage of the available rect `r`
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
