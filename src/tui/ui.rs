use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table};

use crate::scanner::{CheckStatus, ScanResult};
use crate::tui::app::{App, InputMode};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 14 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Checks(7 rows + header) + Result(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(9),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_checks(frame, chunks[1], app);
    render_result(frame, chunks[2], app);
    render_status_bar(frame, chunks[3], app);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, app);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let left = "posture-scan";
    let mut spans = vec![
        Span::styled(left, theme.title_style),
        Span::styled(format!("  {}", app.source), Style::default().fg(theme.muted)),
    ];

    if app.scanner.is_scanning() {
        let right = format!("{} SCANNING", SPINNER[app.spinner_frame % SPINNER.len()]);
        let used = left.chars().count() + 2 + app.source.chars().count() + right.chars().count();
        let padding_len = (area.width as usize).saturating_sub(used);
        spans.push(Span::raw(" ".repeat(padding_len)));
        spans.push(Span::styled(right, Style::default().fg(theme.running)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn status_icon(status: CheckStatus, spinner_frame: usize) -> &'static str {
    match status {
        CheckStatus::Pending => "○",
        CheckStatus::Running => SPINNER[spinner_frame % SPINNER.len()],
        CheckStatus::Passed => "✓",
        CheckStatus::Warning => "!",
        CheckStatus::Failed => "✗",
    }
}

fn render_checks(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let rows: Vec<Row> = app
        .scanner
        .checks()
        .iter()
        .map(|check| {
            let color = theme.status_color(check.status);
            let icon = status_icon(check.status, app.spinner_frame);

            let score = if check.status.is_terminal() {
                format!("{}/{}", check.score, check.max_score)
            } else {
                String::new()
            };

            // Resolved checks show their finding unless details are hidden
            let text = match (&check.details, app.show_details) {
                (Some(details), true) => details.clone(),
                _ => check.description().to_string(),
            };

            let row = Row::new(vec![
                Cell::from(Span::styled(icon, Style::default().fg(color))),
                Cell::from(check.name()),
                Cell::from(Span::styled(score, Style::default().fg(color))),
                Cell::from(Span::styled(text, Style::default().fg(theme.muted))),
            ]);

            if check.status == CheckStatus::Running {
                row.style(theme.row_active)
            } else {
                row
            }
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Length(18),
        Constraint::Length(6),
        Constraint::Fill(1),
    ];

    let table = Table::new(rows, widths).header(
        Row::new(vec!["", "Check", "Score", "Finding"])
            .style(theme.header_style)
            .bottom_margin(1),
    );

    frame.render_widget(table, area);
}

fn render_result(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::bordered()
        .border_style(Style::default().fg(theme.muted))
        .title(" Result ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match app.result() {
        Some(result) => result_lines(result, app),
        None if app.scanner.is_scanning() => vec![Line::from(Span::styled(
            format!("Executing security analysis... {}/{} complete", app.scanner.completed_count(), app.scanner.checks().len()),
            Style::default().fg(theme.running),
        ))],
        None => vec![Line::from(Span::styled(
            "Ready to scan. Press r to start.",
            Style::default().fg(theme.muted),
        ))],
    };

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn result_lines<'a>(result: &ScanResult, app: &App) -> Vec<Line<'a>> {
    let theme = &app.theme;
    let grade = result.grade();
    let summary = result.summary();
    let grade_style = Style::default().fg(theme.grade_color(grade)).bold();

    vec![
        Line::from(vec![
            Span::raw("Grade "),
            Span::styled(format!(" {} ", grade), grade_style.reversed()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("Security Score: "),
            Span::styled(result.total_score.to_string(), Style::default().fg(theme.accent).bold()),
            Span::raw(format!("/{} ({:.0}%)", result.max_score, result.percentage())),
        ]),
        Line::from(vec![
            Span::styled(format!("{} passed", summary.passed), Style::default().fg(theme.passed)),
            Span::raw("  "),
            Span::styled(format!("{} warnings", summary.warnings), Style::default().fg(theme.warning)),
            Span::raw("  "),
            Span::styled(format!("{} failed", summary.failed), Style::default().fg(theme.failed)),
        ]),
        Line::from(Span::styled(
            format!(
                "Scan {} completed at {}",
                result.run_id,
                result.timestamp.with_timezone(&chrono::Local).format("%H:%M:%S")
            ),
            Style::default().fg(theme.muted),
        )),
    ]
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let line = if let Some((ref msg, _)) = app.flash_message {
        Line::from(Span::styled(msg.clone(), Style::default().fg(theme.accent)))
    } else {
        let progress = format!(
            "{}/{} COMPLETE",
            app.scanner.completed_count(),
            app.scanner.checks().len()
        );

        let hints = [
            ("r", ":rescan "),
            ("x", ":reset "),
            ("d", ":details "),
            ("?", ":help "),
            ("q", ":quit"),
        ];

        let mut spans = vec![
            Span::styled(progress, Style::default().fg(theme.muted)),
            Span::raw("  "),
        ];
        for (key, label) in hints {
            spans.push(Span::styled(key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_help_popup(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let popup_area = centered_rect_fixed(44, 10, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .border_style(Style::default().fg(theme.popup_border))
        .title(Span::styled(" Keyboard Shortcuts ", theme.popup_title));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(theme.status_key_color).bold();
    let entries = [
        ("r             ", "Rescan (supersedes a running scan)"),
        ("x             ", "Reset to pending"),
        ("d             ", "Show/hide findings"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, label)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*label)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}
