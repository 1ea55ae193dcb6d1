//! Ratatui-based terminal dashboard.
//!
//! One line chart per registry indicator, laid out two columns per page, with
//! key bindings for the range presets (1W/1M/3M/1Y/All), master-range mode,
//! paging, and refetch. Failed series render a "could not fetch" panel
//! instead of a chart; the rest of the dashboard keeps working.

use std::io;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::pipeline::{self, DashboardData, PanelView};
use crate::data::FredClient;
use crate::domain::{RangeMode, RangeSelection, ResolvedRange, Series, SeriesDescriptor};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::IndicatorChart;

/// Charts per page: two columns, two rows.
const PANELS_PER_PAGE: usize = 4;

/// Start the TUI.
pub fn run(
    descriptors: Vec<SeriesDescriptor>,
    selection: RangeSelection,
    mode: RangeMode,
) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(descriptors, selection, mode)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    client: FredClient,
    descriptors: Vec<SeriesDescriptor>,
    selection: RangeSelection,
    mode: RangeMode,
    data: Option<DashboardData>,
    page: usize,
    status: String,
}

impl App {
    fn new(
        descriptors: Vec<SeriesDescriptor>,
        selection: RangeSelection,
        mode: RangeMode,
    ) -> Result<Self, AppError> {
        let client = FredClient::from_env()?;
        let mut app = Self {
            client,
            descriptors,
            selection,
            mode,
            data: None,
            page: 0,
            status: "Fetching FRED data...".to_string(),
        };
        app.refresh();
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('1') => self.set_selection(RangeSelection::WEEK),
            KeyCode::Char('2') => self.set_selection(RangeSelection::MONTH),
            KeyCode::Char('3') => self.set_selection(RangeSelection::QUARTER),
            KeyCode::Char('4') => self.set_selection(RangeSelection::YEAR),
            KeyCode::Char('a') | KeyCode::Char('0') => self.set_selection(RangeSelection::AllTime),
            KeyCode::Char('m') => {
                self.mode = match self.mode {
                    RangeMode::PerSeries => RangeMode::Master,
                    RangeMode::Master => RangeMode::PerSeries,
                };
                self.status = format!(
                    "mode: {}",
                    match self.mode {
                        RangeMode::PerSeries => "per-series",
                        RangeMode::Master => "master",
                    }
                );
            }
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Left | KeyCode::PageUp => {
                self.page = self.page.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::PageDown => {
                if (self.page + 1) * PANELS_PER_PAGE < self.descriptors.len() {
                    self.page += 1;
                }
            }
            _ => {}
        }
        false
    }

    fn set_selection(&mut self, selection: RangeSelection) {
        self.selection = selection;
        self.status = format!("range: {}", selection.label());
    }

    /// Refetch every series, sequentially. The fetch itself never aborts on a
    /// single bad indicator; failures surface per panel.
    fn refresh(&mut self) {
        self.status = "Fetching FRED data...".to_string();
        let data = pipeline::fetch_all(&self.client, &self.descriptors);
        let failed = data.panels.iter().filter(|p| p.failure().is_some()).count();
        self.status = if failed == 0 {
            format!("Fetched {} series.", data.panels.len())
        } else {
            format!("Fetched {} series ({failed} failed).", data.panels.len())
        };
        self.data = Some(data);
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_panels(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let pages = self.page_count();
        let line = Line::from(vec![
            Span::styled("edash", Style::default().fg(Color::Cyan)),
            Span::raw(" — Economic Indicators Dashboard (FRED)  "),
            Span::styled(
                format!(
                    "range: {} | mode: {} | page {}/{pages}",
                    self.selection.label(),
                    match self.mode {
                        RangeMode::PerSeries => "per-series",
                        RangeMode::Master => "master",
                    },
                    self.page + 1,
                ),
                Style::default().fg(Color::Gray),
            ),
        ]);
        let p = Paragraph::new(Text::from(line)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_panels(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(data) = &self.data else {
            let msg = Paragraph::new("Waiting for data...")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(msg, area);
            return;
        };

        let views = pipeline::resolve_views(data, self.selection, self.mode);
        let start = self.page * PANELS_PER_PAGE;
        let page_views: Vec<&PanelView<'_>> =
            views.iter().skip(start).take(PANELS_PER_PAGE).collect();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        for (row_idx, row) in rows.iter().enumerate() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(*row);
            for (col_idx, cell) in cols.iter().enumerate() {
                if let Some(view) = page_views.get(row_idx * 2 + col_idx) {
                    self.draw_panel(frame, *cell, view);
                }
            }
        }
    }

    fn draw_panel(&self, frame: &mut ratatui::Frame<'_>, area: Rect, view: &PanelView<'_>) {
        let d = &view.panel.descriptor;
        let block = Block::default()
            .title(format!("{} [{}]", d.name, d.series_id))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        if let Some(reason) = view.panel.failure() {
            let msg = Paragraph::new(format!("could not fetch: {reason}"))
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        }

        let (Some(series), Some(range)) = (view.panel.series(), view.range) else {
            let msg = Paragraph::new("no window available")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let (line, x_bounds, y_bounds) = chart_series(series, &range);
        if line.is_empty() {
            let msg = Paragraph::new("no data in window").style(Style::default().fg(Color::Gray));
            frame.render_widget(msg, inner);
            return;
        }

        let chart = IndicatorChart {
            line: &line,
            x_bounds,
            y_bounds,
            fmt_x: fmt_axis_date,
            fmt_y: fmt_axis_value,
        };
        frame.render_widget(chart, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "1/2/3/4 range  a all  m master  ←/→ page  r refresh  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn page_count(&self) -> usize {
        self.descriptors.len().div_ceil(PANELS_PER_PAGE).max(1)
    }
}

/// Build the Plotters line series and bounds for one panel.
///
/// Dates map to days-from-CE on the X axis. The resolved window fixes the X
/// bounds; Y bounds come from the resolver when available and otherwise
/// auto-scale over the visible points with a small pad.
fn chart_series(series: &Series, range: &ResolvedRange) -> (Vec<(f64, f64)>, [f64; 2], [f64; 2]) {
    let line: Vec<(f64, f64)> = series
        .visible(&range.window)
        .filter_map(|o| o.value.map(|v| (date_to_x(o.date), v)))
        .collect();

    let mut x0 = date_to_x(range.window.start);
    let mut x1 = date_to_x(range.window.end);
    if x1 <= x0 {
        // Single-day window: widen so Plotters accepts the axis.
        x0 -= 0.5;
        x1 += 0.5;
    }

    let (mut y0, mut y1) = match range.y_bounds {
        Some(b) => (b.min, b.max),
        None => {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for &(_, y) in &line {
                min = min.min(y);
                max = max.max(y);
            }
            (min, max)
        }
    };

    if !y0.is_finite() || !y1.is_finite() {
        y0 = 0.0;
        y1 = 1.0;
    }
    if y1 <= y0 {
        let pad = (y0.abs() * 0.05).max(0.5);
        y0 -= pad;
        y1 += pad;
    }

    (line, [x0, x1], [y0, y1])
}

fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn fmt_axis_date(v: f64) -> String {
    match NaiveDate::from_num_days_from_ce_opt(v.round() as i32) {
        Some(date) => date.format("%Y-%m").to_string(),
        None => "-".to_string(),
    }
}

fn fmt_axis_value(v: f64) -> String {
    if v.abs() >= 1000.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}
