//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for choosing countries, the visible year
//! range, metric, language and growth rate, then renders the trend chart and
//! the ranking for the last visible year.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};
use tracing::warn;

use crate::app::pipeline::{Pipeline, RunOutput};
use crate::domain::{Metric, Record, RecordSource, RunConfig};
use crate::error::AppError;
use crate::i18n::{country_label, metric_label, texts};
use crate::view::{available_countries, country_series, rank_at_year};

mod plotters_chart;

use plotters_chart::{TrendChart, series_color};

const GROWTH_STEP: f64 = 0.005;

/// Start the TUI.
pub fn run(config: RunConfig, pipeline: Pipeline) -> Result<(), AppError> {
    let mut app = App::new(config, pipeline)?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Countries,
    From,
    To,
    Metric,
    Lang,
    Growth,
}

impl Field {
    const ALL: [Field; 6] = [
        Field::Countries,
        Field::From,
        Field::To,
        Field::Metric,
        Field::Lang,
        Field::Growth,
    ];
}

struct App {
    pipeline: Pipeline,
    config: RunConfig,
    /// Every country in the dataset, first-seen order.
    countries: Vec<String>,
    selected: Vec<bool>,
    country_cursor: usize,
    selected_field: usize,
    status: String,
    run: Option<RunOutput>,
}

impl App {
    fn new(config: RunConfig, mut pipeline: Pipeline) -> Result<Self, AppError> {
        let recon = pipeline.reconstruction(&config.reconstruct)?;
        let countries = available_countries(&recon.records);

        for wanted in &config.countries {
            if !countries.contains(wanted) {
                warn!(country = %wanted, "country not in dataset, ignored");
            }
        }
        let selected = countries
            .iter()
            .map(|c| config.countries.is_empty() || config.countries.contains(c))
            .collect();

        let mut app = Self {
            pipeline,
            config,
            countries,
            selected,
            country_cursor: 0,
            selected_field: 0,
            status: String::new(),
            run: None,
        };
        app.recompute();
        Ok(app)
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
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
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

    fn field(&self) -> Field {
        Field::ALL[self.selected_field]
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field + 1 < Field::ALL.len() {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Char(' ') | KeyCode::Enter => {
                if self.field() == Field::Countries {
                    self.toggle_country();
                }
            }
            KeyCode::Char('a') => {
                let all = self.selected.iter().all(|s| *s);
                self.selected.iter_mut().for_each(|s| *s = !all);
                self.recompute();
            }
            KeyCode::Char('m') => {
                self.config.metric = self.config.metric.next();
                self.recompute();
            }
            KeyCode::Char('l') => {
                self.config.lang = self.config.lang.toggle();
                self.recompute();
            }
            _ => {}
        }
        false
    }

    fn adjust_field(&mut self, delta: i32) {
        let rc = self.config.reconstruct;
        match self.field() {
            Field::Countries => {
                let n = self.countries.len();
                if n > 0 {
                    self.country_cursor = if delta >= 0 {
                        (self.country_cursor + 1) % n
                    } else {
                        (self.country_cursor + n - 1) % n
                    };
                }
                return;
            }
            Field::From => {
                self.config.from_year = self.config.from_year.saturating_add(delta).min(self.config.to_year).max(rc.year_min);
            }
            Field::To => {
                self.config.to_year = self.config.to_year.saturating_add(delta).max(self.config.from_year).min(rc.year_max);
            }
            Field::Metric => {
                self.config.metric = if delta >= 0 {
                    self.config.metric.next()
                } else {
                    self.config.metric.prev()
                };
            }
            Field::Lang => self.config.lang = self.config.lang.toggle(),
            Field::Growth => {
                let next = self.config.reconstruct.growth_rate + f64::from(delta) * GROWTH_STEP;
                // Round to thousandths so repeated presses hit the same cache keys.
                let next = (next * 1000.0).round() / 1000.0;
                if next > 0.0 {
                    self.config.reconstruct.growth_rate = next;
                }
            }
        }
        self.recompute();
    }

    fn toggle_country(&mut self) {
        if let Some(flag) = self.selected.get_mut(self.country_cursor) {
            *flag = !*flag;
            self.recompute();
        }
    }

    fn selected_countries(&self) -> Vec<String> {
        self.countries
            .iter()
            .zip(&self.selected)
            .filter(|(_, s)| **s)
            .map(|(c, _)| c.clone())
            .collect()
    }

    /// Re-run the (memoized) pipeline for the current settings.
    fn recompute(&mut self) {
        let countries = self.selected_countries();
        if countries.is_empty() {
            self.run = None;
            self.status = texts(self.config.lang).empty_selection.to_string();
            return;
        }
        self.config.countries = countries;

        match self.pipeline.run(&self.config) {
            Ok(run) => {
                self.status = format!(
                    "{} rows | {} issues | cached configs: {}",
                    run.view.len(),
                    run.issues.len(),
                    self.pipeline.cached_len()
                );
                self.run = Some(run);
            }
            Err(err) => {
                self.run = None;
                self.status = err.to_string();
            }
        }
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
        let t = texts(self.config.lang);
        let rc = &self.config.reconstruct;
        let lines = vec![
            Line::from(vec![
                Span::styled(t.title, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                Span::raw(format!(" | {}", t.subtitle)),
            ]),
            Line::from(Span::styled(
                format!(
                    "range: {}-{} | anchor: {} | growth: {:.3}/yr | data: {}",
                    rc.year_min,
                    rc.year_max,
                    rc.anchor_year,
                    rc.growth_rate,
                    self.pipeline.dataset().source,
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(Field::ALL.len() as u16 + 2)])
            .split(area);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(rows[0]);

        self.draw_chart(frame, top[0]);
        self.draw_ranking(frame, top[1]);
        self.draw_settings(frame, rows[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lang = self.config.lang;
        let title = format!(
            "{} - {}",
            texts(lang).evolution_title,
            metric_label(self.config.metric, lang)
        );
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new(texts(lang).empty_selection)
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let chart_data = chart_series(run, self.config.metric, self.config.from_year, self.config.to_year);

        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let widget = TrendChart {
            series: &chart_data.series,
            anchor_year: Some(f64::from(self.config.reconstruct.anchor_year)),
            x_bounds: chart_data.x_bounds,
            y_bounds: chart_data.y_bounds,
            x_label: if lang == crate::domain::Lang::Es { "año" } else { "year" },
            y_label: metric_label(self.config.metric, lang),
            fmt_y: match self.config.metric {
                Metric::Graduates => fmt_axis_count,
                Metric::WomenPct | Metric::GdpSpendPct => fmt_axis_pct,
            },
        };
        frame.render_widget(widget, split[0]);

        let legend: Vec<Span> = chart_data
            .countries
            .iter()
            .enumerate()
            .flat_map(|(idx, c)| {
                [
                    Span::styled("■ ", Style::default().fg(series_color(idx))),
                    Span::raw(format!("{}  ", country_label(c, lang))),
                ]
            })
            .collect();
        frame.render_widget(
            Paragraph::new(Line::from(legend)).alignment(Alignment::Center),
            split[1],
        );
    }

    fn draw_ranking(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lang = self.config.lang;
        let year = self.config.to_year;
        let block = Block::default()
            .title(format!("{} {year}", texts(lang).ranking_title))
            .borders(Borders::ALL);

        let items: Vec<ListItem> = match &self.run {
            Some(run) => {
                let mut items: Vec<ListItem> = rank_at_year(&run.view, year, self.config.metric)
                    .into_iter()
                    .map(|e| {
                        ListItem::new(format!(
                            "{:>2}. {:<12} {}",
                            e.rank,
                            country_label(&e.country, lang),
                            crate::report::fmt_metric(e.value, self.config.metric).trim()
                        ))
                    })
                    .collect();
                if let Some(note) = ranking_note(&run.view, year) {
                    items.push(ListItem::new(Line::from(Span::styled(
                        note,
                        Style::default().fg(Color::Gray),
                    ))));
                }
                items
            }
            None => Vec::new(),
        };

        frame.render_widget(List::new(items).block(block), area);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lang = self.config.lang;
        let t = texts(lang);

        let mut country_spans = vec![Span::raw(format!("{} ", t.countries))];
        for (idx, (country, on)) in self.countries.iter().zip(&self.selected).enumerate() {
            let mark = if *on { "[x]" } else { "[ ]" };
            let mut style = Style::default();
            if idx == self.country_cursor && self.field() == Field::Countries {
                style = style.add_modifier(Modifier::REVERSED);
            }
            country_spans.push(Span::styled(format!("{mark} {}", country_label(country, lang)), style));
            country_spans.push(Span::raw(" "));
        }

        let items = vec![
            ListItem::new(Line::from(country_spans)),
            ListItem::new(format!("{} {} {}", t.year_range, t.from, self.config.from_year)),
            ListItem::new(format!("{} {} {}", t.year_range, t.to, self.config.to_year)),
            ListItem::new(format!("{} {}", t.metric, metric_label(self.config.metric, lang))),
            ListItem::new(format!("{} {}", t.language, lang.code())),
            ListItem::new(format!("{} {:.3}", t.growth, self.config.reconstruct.growth_rate)),
        ];

        let list = List::new(items)
            .block(Block::default().title(t.settings).borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  space toggle  a all  m metric  l lang  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Source labels of the rows ranked at `year`, e.g. `(interp)` or
/// `(obs/proj)`. `None` when nothing is ranked.
fn ranking_note(view: &[Record], year: i32) -> Option<String> {
    let mut sources: Vec<RecordSource> = Vec::new();
    for r in view.iter().filter(|r| r.year == year) {
        if !sources.contains(&r.source) {
            sources.push(r.source);
        }
    }
    if sources.is_empty() {
        return None;
    }
    let labels: Vec<&str> = sources.iter().map(|s| s.label()).collect();
    Some(format!("({})", labels.join("/")))
}

struct ChartData {
    countries: Vec<String>,
    series: Vec<Vec<(f64, f64)>>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

/// Build chart series for Plotters.
fn chart_series(run: &RunOutput, metric: Metric, from_year: i32, to_year: i32) -> ChartData {
    let per_country = country_series(&run.view, metric);

    let mut countries = Vec::with_capacity(per_country.len());
    let mut series = Vec::with_capacity(per_country.len());
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for (country, points) in per_country {
        for &(_, y) in &points {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        countries.push(country);
        series.push(points.into_iter().map(|(x, y)| (f64::from(x), y)).collect());
    }

    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        let mid = if y_min.is_finite() { y_min } else { 0.5 };
        y_min = mid - 0.5;
        y_max = mid + 0.5;
    }
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);

    let (mut x0, mut x1) = (f64::from(from_year), f64::from(to_year));
    if x1 <= x0 {
        x0 -= 0.5;
        x1 += 0.5;
    }

    ChartData {
        countries,
        series,
        x_bounds: [x0, x1],
        y_bounds: [y_min - pad, y_max + pad],
    }
}

fn fmt_axis_count(v: f64) -> String {
    if v.abs() >= 1000.0 {
        format!("{:.0}k", v / 1000.0)
    } else {
        format!("{v:.0}")
    }
}

fn fmt_axis_pct(v: f64) -> String {
    format!("{v:.1}%")
}
