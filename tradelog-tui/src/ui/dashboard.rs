//! Dashboard — metric cards over the recent trades table.

use ratatui::layout::{Constraint, Direction as LayoutDirection, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use tradelog_core::trade::DATE_FORMAT;
use tradelog_core::{DashboardView, Summary, TradeRecord};

use crate::app::{AppState, Focus};
use crate::theme;
use crate::ui::truncate;

const CARD_HEIGHT: u16 = 3;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.dashboard.view {
        DashboardView::Trades { records, summary } => {
            let rows = Layout::default()
                .direction(LayoutDirection::Vertical)
                .constraints([Constraint::Length(CARD_HEIGHT), Constraint::Min(3)])
                .split(area);
            render_cards(f, rows[0], summary, &app.currency);
            render_table(f, rows[1], app, records);
        }
        DashboardView::Empty => {
            let inner = table_block(f, area, app);
            let text = Paragraph::new(Span::styled(DashboardView::EMPTY_MESSAGE, theme::muted()));
            f.render_widget(text, inner);
        }
        DashboardView::Error(detail) => {
            let inner = table_block(f, area, app);
            let lines = vec![
                Line::from(Span::styled(DashboardView::ERROR_MESSAGE, theme::negative())),
                Line::from(""),
                Line::from(Span::styled(detail.as_str(), theme::muted())),
                Line::from(""),
                Line::from(Span::styled("[r] reload once the file is fixed", theme::muted())),
            ];
            f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
        }
    }
}

fn render_cards(f: &mut Frame, area: Rect, summary: &Summary, currency: &str) {
    let cards = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    metric_card(
        f,
        cards[0],
        "Total PnL",
        summary.total_pnl_display(currency),
        theme::pnl(summary.total_pnl),
    );
    metric_card(
        f,
        cards[1],
        "Total Trades",
        summary.total_trades.to_string(),
        theme::accent(),
    );
    metric_card(
        f,
        cards[2],
        "Win Rate",
        summary.win_rate_display(),
        theme::win_rate(summary.win_rate),
    );
}

fn metric_card(f: &mut Frame, area: Rect, label: &str, value: String, style: Style) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(format!(" {label} "))
        .title_style(theme::muted());
    let para = Paragraph::new(Span::styled(value, style.add_modifier(Modifier::BOLD))).block(block);
    f.render_widget(para, area);
}

/// Draw the "Recent Trades" frame and return its inner area.
fn table_block(f: &mut Frame, area: Rect, app: &AppState) -> Rect {
    let active = app.focus == Focus::Trades;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(active))
        .title(" Recent Trades ")
        .title_style(theme::panel_title(active));
    let inner = block.inner(area);
    f.render_widget(block, area);
    inner
}

fn render_table(f: &mut Frame, area: Rect, app: &AppState, records: &[TradeRecord]) {
    let inner = table_block(f, area, app);
    let active = app.focus == Focus::Trades;

    let notes_width = (inner.width as usize).saturating_sub(56).max(5);
    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        format!(
            "{:<10} {:<8} {:<5} {:>9} {:>9} {:>9} {}",
            "Date", "Symbol", "Dir", "Entry", "Exit", "PnL", "Notes"
        ),
        theme::accent_bold(),
    ))];

    let visible_height = (inner.height as usize).saturating_sub(1);
    let start = app.dashboard.scroll.min(records.len().saturating_sub(1));
    let end = (start + visible_height).min(records.len());

    for (i, record) in records.iter().enumerate().take(end).skip(start) {
        let is_cursor = active && i == app.dashboard.scroll;
        let base = if is_cursor {
            theme::focused()
        } else {
            theme::text()
        };
        let pick = |style: Style| if is_cursor { base } else { style };

        // Only the first line of a multi-line note fits in a row.
        let note = record.notes.lines().next().unwrap_or("");
        lines.push(Line::from(vec![
            Span::styled(format!("{:<10} ", record.date.format(DATE_FORMAT)), base),
            Span::styled(format!("{:<8} ", truncate(&record.symbol, 8)), base),
            Span::styled(
                format!("{:<5} ", record.direction.as_str()),
                pick(theme::direction(record.direction)),
            ),
            Span::styled(format!("{:>9} ", record.entry), base),
            Span::styled(format!("{:>9} ", record.exit), base),
            Span::styled(format!("{:>9} ", record.pnl), pick(theme::pnl(record.pnl))),
            Span::styled(truncate(note, notes_width), pick(theme::muted())),
        ]));
    }

    f.render_widget(Paragraph::new(lines), inner);
}
