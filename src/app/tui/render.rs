use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState, Wrap};

use super::form::FormField;
use super::{Busy, TuiView};

const ACCENT: Color = Color::Rgb(110, 170, 255);
const MUTED: Color = Color::Rgb(185, 195, 210);
const TEXT: Color = Color::Rgb(230, 235, 242);

pub(super) fn draw_tui(frame: &mut Frame, view: &TuiView<'_>) {
    let bg = Block::default().style(Style::default().bg(Color::Black));
    frame.render_widget(bg, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(9),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let count_text = if view.items_loaded {
        format!("{} videos", view.form.total())
    } else {
        "loading...".to_string()
    };
    let mut header_spans = vec![
        Span::styled(
            "PLTIME",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   ", Style::default()),
        Span::styled(
            format!("playlist {}", view.playlist_id),
            Style::default().fg(MUTED),
        ),
        Span::styled("   ", Style::default()),
        Span::styled(count_text, Style::default().fg(MUTED)),
    ];
    if let Some(label) = busy_label(view.busy) {
        header_spans.push(Span::styled("   ", Style::default()));
        header_spans.push(Span::styled(label, Style::default().fg(Color::Yellow)));
    }
    let header = Paragraph::new(Line::from(header_spans))
        .alignment(Alignment::Center)
        .block(panel_block("Playlist"));
    frame.render_widget(header, chunks[0]);

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    let rows: Vec<Row> = FormField::ALL
        .iter()
        .map(|field| {
            Row::new(vec![
                Cell::from(field.label()),
                Cell::from(format!("‹ {} ›", view.form.value_text(*field))),
            ])
        })
        .collect();
    let mut table_state = TableState::default();
    table_state.select(FormField::ALL.iter().position(|field| *field == view.form.field));
    let table = Table::new(rows, [Constraint::Length(8), Constraint::Min(12)])
        .block(panel_block("Range"))
        .row_highlight_style(
            Style::default()
                .bg(ACCENT)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");
    frame.render_stateful_widget(table, body_chunks[0], &mut table_state);

    let stats_lines: Vec<Line> = match view.stats {
        Some(stats) => stats
            .summary_rows()
            .into_iter()
            .flat_map(|(label, value)| {
                [
                    Line::from(Span::styled(label, Style::default().fg(MUTED))),
                    Line::from(Span::styled(
                        value,
                        Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                ]
            })
            .collect(),
        None => vec![
            Line::from(Span::styled("No stats yet.", Style::default().fg(TEXT))),
            Line::from(""),
            Line::from(Span::styled(
                "Pick a range and press Enter.",
                Style::default().fg(MUTED),
            )),
        ],
    };
    let stats_widget = Paragraph::new(stats_lines)
        .wrap(Wrap { trim: true })
        .block(panel_block("Stats"));
    frame.render_widget(stats_widget, body_chunks[1]);

    let controls = Paragraph::new(Line::from(Span::styled(
        "↑/↓ field  ←/→ change  PgUp/PgDn ±10  Home/End bounds  Enter stats  r reload  q quit",
        Style::default().fg(MUTED),
    )))
    .alignment(Alignment::Center)
    .block(panel_block("Controls"));
    frame.render_widget(controls, chunks[2]);

    let status_widget = Paragraph::new(view.status.to_string())
        .style(status_style(view.status))
        .block(panel_block("Status"));
    frame.render_widget(status_widget, chunks[3]);
}

fn busy_label(busy: Busy) -> Option<&'static str> {
    match busy {
        Busy::Idle => None,
        Busy::LoadingItems => Some("LOADING"),
        Busy::ComputingStats => Some("COMPUTING"),
    }
}

fn panel_block(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(125, 135, 150)))
        .title(title)
}

fn status_style(status: &str) -> Style {
    if status.starts_with("ERROR:") {
        Style::default()
            .fg(Color::Rgb(255, 145, 120))
            .add_modifier(Modifier::BOLD)
    } else if status.starts_with("INFO:") {
        Style::default().fg(Color::Rgb(205, 165, 255))
    } else {
        Style::default().fg(TEXT)
    }
}
