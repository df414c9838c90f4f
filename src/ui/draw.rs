//! Drawing functions for the TUI
//!
//! One branch per gallery status:
//! - Loading: centered indicator, no cards
//! - Error: message with retry hint; cards underneath when the variant keeps them
//! - Ready: card grid

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::layout::{page_of_rows, CARD_GAP};
use super::poem_card::{card_height, PoemCard};
use super::theme::Theme;
use crate::app::App;
use crate::gallery::Status;
use crate::poem::PoemRecord;

/// Height of the error banner shown above fallback cards
const ERROR_BANNER_HEIGHT: u16 = 4;

/// Main draw function
pub fn draw(f: &mut Frame, app: &App) {
    let theme = app.theme();
    let area = f.area();
    let bg_block = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(bg_block, area);

    let header_height = app.config().appearance.headings.len() as u16 + 1;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height), // Headings
            Constraint::Min(1),                // Gallery body
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    draw_header(f, app, chunks[0], theme);
    match app.gallery().status() {
        Status::Loading => draw_loading(f, app, chunks[1], theme),
        Status::Error(message) => draw_error(f, app, message, chunks[1], theme),
        Status::Ready => draw_cards(f, app, chunks[1], theme),
    }
    draw_status_bar(f, app, chunks[2], theme);
}

/// Draw the gallery headings
fn draw_header(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let style = Style::default()
        .fg(theme.accent)
        .bg(theme.background)
        .add_modifier(Modifier::BOLD);
    let lines: Vec<Line> = app
        .config()
        .appearance
        .headings
        .iter()
        .map(|h| Line::from(Span::styled(h.as_str(), style)))
        .collect();

    let header = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.dimmed_alt))
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(header, area);
}

/// Draw the loading indicator
fn draw_loading(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let loading = Paragraph::new(app.labels().loading)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.dimmed).bg(theme.background));
    f.render_widget(loading, centered(area, area.width, 1));
}

/// Draw the error branch
fn draw_error(f: &mut Frame, app: &App, message: &str, area: Rect, theme: &Theme) {
    if app.visible_cards().is_empty() {
        // Panel on its own, centered
        let width = area.width.min(60);
        draw_error_panel(f, app, message, centered(area, width, ERROR_BANNER_HEIGHT + 1), theme);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(ERROR_BANNER_HEIGHT), // Banner
            Constraint::Min(1),                      // Fallback cards
        ])
        .split(area);
    draw_error_panel(f, app, message, chunks[0], theme);
    draw_cards(f, app, chunks[1], theme);
}

fn draw_error_panel(f: &mut Frame, app: &App, message: &str, area: Rect, theme: &Theme) {
    let labels = app.labels();
    let lines = vec![
        Line::from(Span::styled(
            format!("{}: {}", labels.error, message),
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("[r] ", Style::default().fg(theme.dimmed)),
            Span::styled(
                labels.retry,
                Style::default().fg(theme.foreground).add_modifier(Modifier::REVERSED),
            ),
        ]),
    ];

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.error))
                .style(Style::default().bg(theme.background)),
        );
    f.render_widget(panel, area);
}

/// Draw the visible page of the card grid
fn draw_cards(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let cards = app.visible_cards();
    if cards.is_empty() {
        let empty = Paragraph::new(app.labels().empty)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.dimmed).bg(theme.background));
        f.render_widget(empty, centered(area, area.width, 1));
        return;
    }
    if area.width == 0 || area.height == 0 {
        return;
    }

    let grid = app.grid_layout();
    let columns = grid.columns as usize;
    let column_width = grid.column_width(area.width);

    // Each row is as tall as its tallest card
    let rows: Vec<&[PoemRecord]> = cards.chunks(columns).collect();
    let row_heights: Vec<u16> = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|poem| card_height(poem, column_width))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let selected = app.selected_index();
    let (selected_row, _) = grid.index_to_position(selected);
    let page = page_of_rows(&row_heights, selected_row, area.height);

    let bottom = area.y + area.height;
    let mut y = area.y;
    for row in page {
        if y >= bottom {
            break;
        }
        let height = row_heights[row].min(bottom - y);

        for (col, poem) in rows[row].iter().enumerate() {
            let card_area = Rect {
                x: area.x + col as u16 * (column_width + CARD_GAP),
                y,
                width: column_width,
                height,
            };
            let card = PoemCard::new(poem, theme, app.labels())
                .selected(row * columns + col == selected);
            f.render_widget(card, card_area);
        }

        y = y.saturating_add(row_heights[row].saturating_add(CARD_GAP));
    }
}

/// Draw the status bar
fn draw_status_bar(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let labels = app.labels();
    let gallery = app.gallery();
    let total = app.visible_cards().len();

    let status = match gallery.status() {
        Status::Loading => format!(" GET {} | q: {}", app.endpoint(), labels.quit),
        Status::Error(_) if total == 0 => {
            format!(" r: {} | q: {}", labels.retry, labels.quit)
        }
        Status::Error(_) => format!(
            " {}/{} | ←↑↓→/hjkl | c: {} | r: {} | q: {}",
            app.selected_index() + 1,
            total,
            labels.change_color,
            labels.retry,
            labels.quit
        ),
        Status::Ready if total == 0 => format!(" {} | q: {}", app.endpoint(), labels.quit),
        Status::Ready => format!(
            " {}/{} | ←↑↓→/hjkl | Tab | c: {} | q: {}",
            app.selected_index() + 1,
            total,
            labels.change_color,
            labels.quit
        ),
    };

    let status_bar = Paragraph::new(status)
        .style(Style::default().fg(theme.dimmed).bg(theme.background));
    f.render_widget(status_bar, area);
}

/// Rect of `width` x `height` centered in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Variant};
    use ratatui::{backend::TestBackend, Terminal};

    const UNREACHABLE: &str = "http://127.0.0.1:1/api";

    fn app(variant: Variant, url: &str) -> App {
        let mut config = Config::default();
        config.api.url = Some(url.to_string());
        config.gallery.variant = variant;
        let mut app = App::new(config).unwrap();
        app.fit_to_width(100);
        app
    }

    fn render(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_centered() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered(area, 10, 2), Rect::new(5, 4, 10, 2));
        assert_eq!(centered(area, 40, 20), area);
    }

    #[tokio::test]
    async fn test_loading_shows_no_cards() {
        let app = app(Variant::Evolved, UNREACHABLE);
        let screen = render(&app, 100, 30);
        assert!(screen.contains("Bienvenidos"));
        assert!(screen.contains("Cargando poemas..."));
        assert!(!screen.contains("Cambiar Color"));
    }

    #[tokio::test]
    async fn test_error_original_hides_cards() {
        let mut app = app(Variant::Original, UNREACHABLE);
        app.fetch_poems();
        app.settle().await;

        let screen = render(&app, 100, 30);
        assert!(screen.contains("Error:"));
        assert!(screen.contains("Reintentar"));
        assert!(!screen.contains("Cambiar Color"));
    }

    #[tokio::test]
    async fn test_error_evolved_shows_fallback_cards() {
        let mut app = app(Variant::Evolved, UNREACHABLE);
        app.fetch_poems();
        app.settle().await;

        let screen = render(&app, 100, 40);
        assert!(screen.contains("Reintentar"));
        assert!(screen.contains("Siempre tú"));
        assert!(screen.contains("Odisea"));
        assert!(screen.contains("Ausencia"));
        assert!(screen.contains("Cambiar Color"));
    }

    #[tokio::test]
    async fn test_ready_renders_card() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/poems")
            .with_status(200)
            .with_body(r#"[{"id":1,"title":"T","content":"L1\nL2","author":"X","color":"red"}]"#)
            .create_async()
            .await;

        let mut app = app(Variant::Original, &format!("{}/api/poems", server.url()));
        app.fetch_poems();
        app.settle().await;

        let screen = render(&app, 100, 30);
        assert!(screen.contains("L1"));
        assert!(screen.contains("L2"));
        assert!(screen.contains("— X"));
        assert!(screen.contains("1/1"));
        assert!(!screen.contains("Reintentar"));
    }

    #[tokio::test]
    async fn test_ready_empty_list() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/poems")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let mut app = app(Variant::Original, &format!("{}/api/poems", server.url()));
        app.fetch_poems();
        app.settle().await;

        let screen = render(&app, 100, 20);
        assert!(screen.contains("No hay poemas"));
    }
}
