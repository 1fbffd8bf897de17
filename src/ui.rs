//! Terminal UI rendering with ratatui

use crate::board::{Cell, Tile};
use crate::game::GameModeSurvival;
use crate::menu::{Menu, MenuItem, MenuItemType};
use crate::tetromino::{Rotation, TetrominoType};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Duration;

const EMPTY: &str = "  ";
const BLOCK: &str = "██";
const GHOST: &str = "░░";
/// Rows about to be cleared
const FLASH: &str = "▓▓";

const HOLD_WIDTH: u16 = 12;
const SIDE_WIDTH: u16 = 20;
/// Upcoming pieces drawn in the next box
const MAX_PREVIEW: usize = 5;

/// Render the main menu
pub fn render_menu(frame: &mut Frame, menu: &Menu) {
    let area = frame.area();
    let menu_area = center_rect(area, 40, 20);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(8)])
        .split(menu_area);

    let title = Paragraph::new(vec![
        Line::raw(""),
        Line::styled("Y E T R S", Style::default().fg(Color::Cyan).bold()),
        Line::styled("survival", Style::default().fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, layout[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(layout[1]);
    frame.render_widget(block, layout[1]);

    let mut lines = vec![Line::raw("")];
    for (i, item) in menu.items.iter().enumerate() {
        lines.push(render_menu_item(item, i == menu.selected));
        lines.push(Line::raw(""));
    }
    lines.push(Line::styled(
        "↑↓ Select  ←→ Toggle  Enter Confirm  Esc Quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Render a single menu item based on its type
fn render_menu_item(item: &MenuItem, is_selected: bool) -> Line<'static> {
    let prefix = if is_selected { "▶ " } else { "  " };

    let base_style = if is_selected {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().fg(Color::White)
    };

    match &item.item_type {
        MenuItemType::Button(_) => Line::styled(format!("{}{}", prefix, item.label), base_style),
        MenuItemType::Toggle { value, .. } => {
            let value_str = if *value { "ON" } else { "OFF" };
            let value_color = if *value { Color::Green } else { Color::Red };
            Line::from(vec![
                Span::styled(format!("{}{}: ", prefix, item.label), base_style),
                Span::styled(format!("< {} >", value_str), Style::default().fg(value_color).bold()),
            ])
        }
    }
}

/// Render the entire game UI
pub fn render_game(frame: &mut Frame, game: &GameModeSurvival) {
    let area = frame.area();
    let board = game.board();
    let board_width = board.width() as u16 * 2 + 2;
    let board_height = board.height() as u16 + 2;

    let game_area = center_rect(area, HOLD_WIDTH + board_width + SIDE_WIDTH, board_height);

    // hold | board | next + stats
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(HOLD_WIDTH),
            Constraint::Length(board_width),
            Constraint::Length(SIDE_WIDTH),
        ])
        .split(game_area);

    render_hold(frame, main_layout[0], game);
    render_board(frame, main_layout[1], game);

    let preview = game.next_pieces().take(MAX_PREVIEW).count() as u16;
    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(preview * 3 + 2), Constraint::Min(6)])
        .split(main_layout[2]);

    render_next_queue(frame, right_layout[0], game);
    render_stats(frame, right_layout[1], game);

    if game.is_over() {
        render_overlay(frame, area, "GAME OVER", "Press any key");
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the hold piece box, greyed out while holding is unavailable
fn render_hold(frame: &mut Frame, area: Rect, game: &GameModeSurvival) {
    let border = if game.can_hold() && game.config().can_hold {
        Color::Gray
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(" HOLD ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(piece) = game.held_piece() {
        // Held pieces sit at the origin; only rows are normalized so the
        // display nudge on the O piece shows through
        let top = piece.cells().iter().map(|&(_, y)| y).min().unwrap_or(0);
        let cells = piece.cells().map(|(x, y)| (x, y - top));
        render_mini_piece(frame, inner, &cells, piece.kind().color());
    }
}

/// Render the next piece queue
fn render_next_queue(frame: &mut Frame, area: Rect, game: &GameModeSurvival) {
    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let queue: Vec<TetrominoType> = game.next_pieces().take(MAX_PREVIEW).collect();
    if queue.is_empty() {
        return;
    }

    let piece_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3); queue.len()])
        .split(inner);

    for (kind, piece_area) in queue.iter().zip(piece_areas.iter()) {
        let shape = kind.shape(Rotation::Spawn);
        let left = shape.iter().map(|&(x, _)| x).min().unwrap_or(0);
        let top = shape.iter().map(|&(_, y)| y).min().unwrap_or(0);
        let cells = shape.map(|(x, y)| (x - left, y - top));
        render_mini_piece(frame, *piece_area, &cells, kind.color());
    }
}

/// Render a small piece preview (for hold and next queue)
fn render_mini_piece(frame: &mut Frame, area: Rect, cells: &[(i32, i32)], color: Color) {
    if area.height < 1 || area.width < 4 {
        return;
    }

    // Exactly 2 lines of 4 cells, every piece fits at spawn rotation
    let lines: Vec<Line> = (0..2)
        .map(|y| {
            let spans: Vec<Span> = (0..4)
                .map(|x| {
                    if cells.contains(&(x, y)) {
                        Span::styled(BLOCK, Style::default().fg(color))
                    } else {
                        Span::raw(EMPTY)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Render the game board
fn render_board(frame: &mut Frame, area: Rect, game: &GameModeSurvival) {
    let board = game.board();
    let block = Block::default()
        .title(" SURVIVAL ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let current = game.current_piece();
    let current_cells = current.cells();
    let ghost_cells = game.ghost_piece().cells();
    let piece_style = Style::default().fg(current.kind().color());

    let lines: Vec<Line> = (0..board.height())
        .map(|row| {
            let marked = board.is_row_marked(row);
            let spans: Vec<Span> = (0..board.width())
                .map(|col| {
                    let pos = (col as i32, row as i32);
                    let cell = board.get(pos.0, pos.1).unwrap_or_default();

                    if current_cells.contains(&pos) && !game.is_over() {
                        Span::styled(BLOCK, piece_style)
                    } else if marked {
                        Span::styled(FLASH, Style::default().fg(Color::White).bold())
                    } else if let Cell::Filled(tile) = cell {
                        match tile {
                            Tile::Invisible if board.is_invisible() => Span::raw(EMPTY),
                            tile => Span::styled(BLOCK, Style::default().fg(tile.color())),
                        }
                    } else if ghost_cells.contains(&pos) && !game.is_over() {
                        Span::styled(GHOST, piece_style.dim())
                    } else {
                        Span::raw(EMPTY)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Format a play time as MM:SS
fn format_time(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, game: &GameModeSurvival) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let score = game.score();
    let stats = game.statistics();
    let label = |text: &'static str| Line::from(Span::styled(text, Style::default().fg(Color::Gray)));

    let mut lines = vec![
        label("SCORE"),
        Line::from(Span::styled(
            score.points.to_string(),
            Style::default().fg(Color::Yellow).bold(),
        )),
        label("LEVEL"),
        Line::from(Span::styled(score.level.to_string(), Style::default().fg(Color::Cyan))),
        label("LINES"),
        Line::from(Span::styled(score.lines.to_string(), Style::default().fg(Color::Green))),
        label("TIME"),
        Line::raw(format_time(game.play_time())),
        Line::raw(""),
        Line::raw(format!(
            "1:{} 2:{} 3:{} 4:{}",
            stats.singles, stats.doubles, stats.triples, stats.tetris
        )),
    ];

    let per_type: Vec<Span> = TetrominoType::all()
        .iter()
        .map(|kind| {
            Span::styled(
                format!("{}{} ", kind.name(), stats.count(*kind)),
                Style::default().fg(kind.color()),
            )
        })
        .collect();
    lines.push(Line::from(per_type));
    lines.push(Line::raw(format!("pieces {}", stats.pieces)));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render an overlay (for game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_area = center_rect(area, 24, 5);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title.to_string(), Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle.to_string(), Style::default().fg(Color::Gray)),
    ];

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}
