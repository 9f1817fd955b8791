use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};
use tally_core::{Polarity, display_date, format_money, summary_bars, totals_banner};

use crate::app::{App, Mode};

const BAR_COLORS: [Color; 3] = [Color::Green, Color::Red, Color::Blue];

pub fn draw(f: &mut Frame, app: &App) {
    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Min(6),
    ];
    if app.graph_visible {
        constraints.push(Constraint::Length(14));
    }
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    draw_controls(f, app, chunks[0]);
    draw_summary(f, app, chunks[1]);
    draw_table(f, app, chunks[2]);
    if app.graph_visible {
        draw_chart(f, app, chunks[3]);
    }
    draw_footer(f, app, chunks[chunks.len() - 1]);

    if let Some(note) = app.notifications.front() {
        draw_notification(f, &note.title, &note.body);
    }
}

fn key_hint(key: &str, label: &str) -> Vec<Span<'static>> {
    vec![
        Span::styled(
            format!("[{key}] "),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("{label}   ")),
    ]
}

fn draw_controls(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    spans.extend(key_hint("o", "Select PDF Files"));
    spans.extend(key_hint("g", app.graph_toggle_label()));
    spans.extend(key_hint("s", &format!("Sort: {}", app.sort.label())));
    spans.extend(key_hint("q", "Quit"));

    let controls = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Bank Statements Analyzer"));
    f.render_widget(controls, area);
}

fn draw_summary(f: &mut Frame, app: &App, area: Rect) {
    let summary = Paragraph::new(Text::from(vec![
        Line::raw(app.files_label()),
        Line::from(Span::styled(
            totals_banner(&app.summary),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ]))
    .block(Block::default().borders(Borders::ALL).title("summary"))
    .wrap(Wrap { trim: true });
    f.render_widget(summary, area);
}

fn row_style(polarity: Polarity) -> Style {
    match polarity {
        Polarity::Deposit => Style::default().fg(Color::Green),
        Polarity::Withdrawal => Style::default().fg(Color::Red),
    }
}

fn draw_table(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec!["Date", "Description", "Amount"])
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

    let rows = app.rows.iter().map(|t| {
        Row::new(vec![
            Cell::from(display_date(&t.trans_date)),
            Cell::from(t.description.clone()),
            Cell::from(Line::from(format_money(t.amount)).alignment(Alignment::Right)),
        ])
        .style(row_style(t.polarity()))
    });

    let title = format!("transactions ({})", app.rows.len());
    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Min(20),
            Constraint::Length(16),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title))
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select(app.selected_row);
    f.render_stateful_widget(table, area, &mut state);
}

/// Bar heights are in cents; negative balances draw as an empty bar but keep
/// their annotated value.
fn draw_chart(f: &mut Frame, app: &App, area: Rect) {
    let bars: Vec<Bar> = summary_bars(&app.summary)
        .iter()
        .zip(BAR_COLORS)
        .map(|(bar, color)| {
            Bar::default()
                .value((bar.value.max(0.0) * 100.0).round() as u64)
                .text_value(bar.annotation())
                .label(Line::from(bar.label))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::White).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title("Transaction Summary"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(14)
        .bar_gap(4);
    f.render_widget(chart, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let widget = match &app.mode {
        Mode::SelectFiles { input } => Paragraph::new(input.as_str())
            .style(Style::default().fg(Color::White))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("PDF files (space-separated, folders import every .pdf) | Enter=import, Esc=cancel"),
            ),
        Mode::Browse => Paragraph::new(app.status.as_str())
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL).title("status")),
    };
    f.render_widget(widget, area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn draw_notification(f: &mut Frame, title: &str, body: &str) {
    let area = centered_rect(60, 9, f.area());
    let mut lines: Vec<Line> = body.lines().map(|l| Line::raw(l.to_string())).collect();
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "press any key",
        Style::default().fg(Color::Gray),
    )));

    let popup = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}
