//! Ratatui-based terminal UI.
//!
//! The TUI provides a sector multi-select and a display-mode toggle, then
//! renders one wage chart panel per selected sector with a vertical reference
//! line at the base year.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};

use crate::app::pipeline::{run_adjust, RunOutput};
use crate::cli::AdjustArgs;
use crate::domain::{RunConfig, TableFile, TableSector};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::WageChart;

/// Start the TUI.
pub fn run(args: AdjustArgs) -> Result<(), AppError> {
    let config = crate::app::run_config_from_args(&args);

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
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
    config: RunConfig,
    run: Option<RunOutput>,
    /// Sector rows shown in the selection list. Taken from `--sector` flags
    /// when given (unknown names included, so their panels can report missing
    /// data), otherwise from the loaded table.
    sector_names: Vec<String>,
    selected: Vec<bool>,
    cursor: usize,
    status: String,
}

impl App {
    fn new(config: RunConfig) -> Result<Self, AppError> {
        let run = run_adjust(&config)?;

        let sector_names: Vec<String> = if config.sectors.is_empty() {
            run.table.sectors.iter().map(|s| s.name.clone()).collect()
        } else {
            config.sectors.clone()
        };

        // Default selection: the first sector.
        let mut selected = vec![false; sector_names.len()];
        if let Some(first) = selected.first_mut() {
            *first = true;
        }

        let status = run.inputs.clone();
        Ok(Self {
            config,
            run: Some(run),
            sector_names,
            selected,
            cursor: 0,
            status,
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
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

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
            }
            KeyCode::Down => {
                if self.cursor + 1 < self.sector_names.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(flag) = self.selected.get_mut(self.cursor) {
                    *flag = !*flag;
                }
            }
            KeyCode::Char('a') => {
                let all = self.selected.iter().all(|&s| s);
                for flag in &mut self.selected {
                    *flag = !all;
                }
            }
            KeyCode::Char('m') => {
                self.config.mode = self.config.mode.next();
                self.status = format!("display: {}", self.config.mode.display_name());
            }
            KeyCode::Left => self.shift_base_year(-1),
            KeyCode::Right => self.shift_base_year(1),
            KeyCode::Char('r') => {
                self.reload();
                self.status = format!("reloaded | {}", self.status);
            }
            _ => {}
        }
        false
    }

    /// Move the base year and recompute.
    ///
    /// A base year with no inflation observation fails index construction;
    /// in that case we keep the previous run and show the error in the
    /// status line instead of tearing the UI down.
    fn shift_base_year(&mut self, delta: i32) {
        let previous = self.config.base_year;
        self.config.base_year += delta;
        match run_adjust(&self.config) {
            Ok(run) => {
                self.status = format!("base year: {}", self.config.base_year);
                self.install_run(run);
            }
            Err(err) => {
                self.config.base_year = previous;
                self.status = err.to_string();
            }
        }
    }

    fn reload(&mut self) {
        match run_adjust(&self.config) {
            Ok(run) => {
                self.status = run.inputs.clone();
                self.install_run(run);
            }
            Err(err) => {
                self.status = err.to_string();
            }
        }
    }

    fn install_run(&mut self, run: RunOutput) {
        if self.config.sectors.is_empty() {
            let names: Vec<String> = run.table.sectors.iter().map(|s| s.name.clone()).collect();
            // Preserve the current selection by name across reloads.
            let kept: Vec<bool> = names
                .iter()
                .map(|name| {
                    self.sector_names
                        .iter()
                        .position(|n| n == name)
                        .map(|i| self.selected[i])
                        .unwrap_or(false)
                })
                .collect();
            self.sector_names = names;
            self.selected = kept;
            if self.cursor >= self.sector_names.len() {
                self.cursor = self.sector_names.len().saturating_sub(1);
            }
        }
        self.run = Some(run);
    }

    fn selected_sectors(&self) -> Vec<&str> {
        self.sector_names
            .iter()
            .zip(self.selected.iter())
            .filter(|&(_, &on)| on)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("rw", Style::default().fg(Color::Cyan)),
            Span::raw(" — real wage series (CPI-deflated)"),
        ]));

        let coverage = self
            .run
            .as_ref()
            .map(|r| {
                format!(
                    "{} years [{} .. {}]",
                    r.table.years.len(),
                    r.table.first_year().map_or("-".to_string(), |y| y.to_string()),
                    r.table.last_year().map_or("-".to_string(), |y| y.to_string()),
                )
            })
            .unwrap_or_else(|| "-".to_string());

        lines.push(Line::from(Span::styled(
            format!(
                "base: {} | cutoff: {} | display: {} | joined: {coverage}",
                self.config.base_year,
                self.config.min_year,
                self.config.mode.display_name(),
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(30)])
            .split(area);

        self.draw_charts(frame, chunks[0]);
        self.draw_sector_list(frame, chunks[1]);
    }

    fn draw_charts(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let selected = self.selected_sectors();

        if selected.is_empty() {
            let msg = Paragraph::new("No sectors selected (space toggles the highlighted sector).")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(msg, area);
            return;
        }

        let Some(run) = &self.run else {
            let msg = Paragraph::new("Waiting for data...")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(msg, area);
            return;
        };

        let n = selected.len() as u32;
        let constraints: Vec<Constraint> = (0..n).map(|_| Constraint::Ratio(1, n)).collect();
        let panels = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (panel, name) in panels.iter().zip(selected) {
            self.draw_sector_panel(frame, *panel, &run.table, name);
        }
    }

    fn draw_sector_panel(
        &self,
        frame: &mut ratatui::Frame<'_>,
        area: Rect,
        table: &TableFile,
        name: &str,
    ) {
        let block = Block::default().title(name.to_string()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        // A requested sector may be absent from the adjusted table; render a
        // placeholder panel rather than crashing the whole view.
        let Some(sector) = table.sector(name) else {
            let msg = Paragraph::new(format!("No data for '{name}'."))
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let Some(series) = chart_series(table, sector, self.config.mode) else {
            let msg = Paragraph::new(format!("No data for '{name}'."))
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let widget = WageChart {
            nominal: &series.nominal,
            real: &series.real,
            base_year: Some(f64::from(table.base_year)),
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            x_label: "year",
            y_label: "wage",
        };
        frame.render_widget(widget, inner);
    }

    fn draw_sector_list(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .sector_names
            .iter()
            .zip(self.selected.iter())
            .map(|(name, &on)| {
                let mark = if on { "[x]" } else { "[ ]" };
                ListItem::new(format!("{mark} {name}"))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Sectors").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.cursor));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  space toggle  a all/none  m display  ←/→ base year  r reload  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Per-panel series and bounds, ready for the Plotters widget.
struct PanelSeries {
    nominal: Vec<(f64, f64)>,
    real: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

/// Build chart series for one sector.
///
/// Returns `None` when the display mode leaves nothing to draw (e.g. a
/// sector whose columns are all gaps).
fn chart_series(
    table: &TableFile,
    sector: &TableSector,
    mode: crate::domain::DisplayMode,
) -> Option<PanelSeries> {
    let points = |values: &[Option<f64>]| -> Vec<(f64, f64)> {
        table
            .years
            .iter()
            .zip(values.iter())
            .filter_map(|(&year, &value)| value.map(|v| (f64::from(year), v)))
            .collect()
    };

    let nominal = if mode.shows_nominal() {
        points(&sector.nominal)
    } else {
        Vec::new()
    };
    let real = if mode.shows_real() {
        points(&sector.real)
    } else {
        Vec::new()
    };

    if nominal.is_empty() && real.is_empty() {
        return None;
    }

    let mut x0 = f64::INFINITY;
    let mut x1 = f64::NEG_INFINITY;
    let mut y0 = f64::INFINITY;
    let mut y1 = f64::NEG_INFINITY;
    for &(x, y) in nominal.iter().chain(real.iter()) {
        x0 = x0.min(x);
        x1 = x1.max(x);
        y0 = y0.min(y);
        y1 = y1.max(y);
    }

    if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) {
        return None;
    }
    if x1 <= x0 {
        x0 -= 0.5;
        x1 += 0.5;
    }

    let pad = ((y1 - y0).abs() * 0.05).max(1e-9);
    Some(PanelSeries {
        nominal,
        real,
        x_bounds: [x0, x1],
        y_bounds: [y0 - pad, y1 + pad],
    })
}
