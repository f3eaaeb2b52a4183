// File: src/tui/view.rs
use crate::model::display::{GoalsDisplay, NO_GOALS_PLACEHOLDER};
use crate::model::{DayKind, WEEKEND_SENTINEL};
use crate::tui::state::{AppState, Focus, InputMode};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let full_help_text = vec![
        Line::from(vec![
            Span::styled(
                " GLOBAL ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Tab:Switch Focus  ?:Toggle Help  q/Esc:Quit"),
        ]),
        Line::from(vec![
            Span::styled(
                " NAVIGATION ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" j/k:Up/Down  PgUp/PgDn:Week  Wheel:Scroll"),
        ]),
        Line::from(vec![
            Span::styled(
                " REPORT ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" o:Open File  n:Name  g/Enter:Generate  e:Export CSV"),
        ]),
    ];

    let footer_height = if state.show_full_help && state.mode == InputMode::Normal {
        Constraint::Length(full_help_text.len() as u16 + 2)
    } else {
        Constraint::Length(3)
    };

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), footer_height])
        .split(f.area());

    // --- Header Strip ---
    let mut header_spans = vec![Span::styled(
        " Accompli ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if !state.name.is_empty() {
        header_spans.push(Span::raw(format!(" {}", state.name)));
    }
    if let Some(first) = state.report.first() {
        header_spans.push(Span::styled(
            format!("  {}", first.date.format("%Y/%m")),
            Style::default().fg(Color::Yellow),
        ));
    }
    if let Some(path) = &state.document_path {
        header_spans.push(Span::styled(
            format!("  {}", path),
            Style::default().fg(Color::DarkGray),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(header_spans)), v_chunks[0]);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(v_chunks[1]);

    // --- 1. Prepare Detail Text ---
    // Built before the stateful list render below borrows the list state.
    let (detail_title, detail_lines): (String, Vec<Line>) = match state.selected_day() {
        Some(day) => {
            let title = format!(" {} ", day.date_label());
            let lines = match day.kind() {
                DayKind::Weekend => vec![Line::from(Span::styled(
                    WEEKEND_SENTINEL,
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ))],
                DayKind::Empty => vec![Line::from(Span::styled(
                    NO_GOALS_PLACEHOLDER,
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ))],
                DayKind::Goals(goals) => goals
                    .iter()
                    .map(|goal| {
                        Line::from(vec![
                            Span::styled("- ", Style::default().fg(Color::Green)),
                            Span::raw(goal.clone()),
                        ])
                    })
                    .collect(),
            };
            (title, lines)
        }
        None => (
            " Detail ".to_string(),
            vec![Line::from("No report generated yet.")],
        ),
    };

    // --- Day List ---
    let day_items: Vec<ListItem> = state
        .report
        .iter()
        .map(|day| {
            let summary_style = match day.kind() {
                DayKind::Weekend | DayKind::Empty => Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
                DayKind::Goals(_) => Style::default(),
            };
            let spans = vec![
                Span::styled(
                    format!("{}  ", day.date_label()),
                    Style::default().fg(Color::Blue),
                ),
                Span::styled(day.summary_line(), summary_style),
            ];
            ListItem::new(Line::from(spans))
        })
        .collect();

    let recorded = state
        .report
        .iter()
        .filter(|d| matches!(d.kind(), DayKind::Goals(_)))
        .count();
    let days_title = if state.report.is_empty() {
        " Days ".to_string()
    } else {
        format!(" Days ({} recorded) ", recorded)
    };

    let days_style = if state.active_focus == Focus::Days {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let day_list = List::new(day_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(days_title)
                .border_style(days_style),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::Green)
                .fg(Color::Black),
        );
    f.render_stateful_widget(day_list, h_chunks[0], &mut state.list_state);

    // --- Detail Pane ---
    let detail_style = if state.active_focus == Focus::Detail {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let detail = Paragraph::new(detail_lines)
        .wrap(Wrap { trim: true })
        .scroll((state.detail_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(detail_title)
                .border_style(detail_style),
        );
    f.render_widget(detail, h_chunks[1]);

    // --- Footer ---
    let footer_area = v_chunks[2];
    f.render_widget(Clear, footer_area);

    match state.mode {
        InputMode::EditingName | InputMode::EditingPath => {
            let (title_str, prefix, color) = match state.mode {
                InputMode::EditingPath => (" Open Report ", "> ", Color::Green),
                _ => (" Name ", "> ", Color::Yellow),
            };

            let input_text = Line::from(vec![
                Span::styled(prefix, Style::default().fg(color)),
                Span::raw(&state.input_buffer),
            ]);

            let input = Paragraph::new(input_text)
                .style(Style::default())
                .block(Block::default().borders(Borders::ALL).title(title_str))
                .wrap(Wrap { trim: false });

            f.render_widget(input, footer_area);

            // Cursor rendering
            let cursor_x =
                footer_area.x + 1 + prefix.chars().count() as u16 + state.cursor_position as u16;
            f.set_cursor_position((
                cursor_x.min(footer_area.x + footer_area.width - 2),
                footer_area.y + 1,
            ));
        }
        InputMode::Normal => {
            if state.show_full_help {
                let p = Paragraph::new(full_help_text)
                    .block(Block::default().borders(Borders::ALL).title(" Help "))
                    .wrap(Wrap { trim: false });
                f.render_widget(p, footer_area);
            } else {
                let status = Paragraph::new(state.message.clone())
                    .style(Style::default().fg(Color::Cyan))
                    .block(
                        Block::default()
                            .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                            .title(" Status "),
                    );
                let help_str = match state.active_focus {
                    Focus::Days => "?:Help q:Quit Tab:Detail o:Open n:Name g:Generate e:Export",
                    Focus::Detail => "?:Help q:Quit Tab:Days j/k:Scroll",
                };
                let help = Paragraph::new(help_str).alignment(Alignment::Right).block(
                    Block::default()
                        .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                        .title(" Actions "),
                );

                let chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                    .split(footer_area);
                f.render_widget(status, chunks[0]);
                f.render_widget(help, chunks[1]);
            }
        }
    }
}
