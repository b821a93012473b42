use anyhow::Result;
use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use health_log::series::{date_from_x, series_for, ChartBounds, ChartMetric};
use health_log::{
    BmiStatus, FieldId, FormDefaults, NoticeLevel, Session, EMPTY_STATE_MESSAGE, NORMAL_RANGE_LABEL,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Cell, Chart, Clear, Dataset, GraphType, List, ListItem, ListState,
        Paragraph, Row, Table, Tabs,
    },
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Records,
    Charts,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Records => Page::Charts,
            Page::Charts => Page::Records,
        }
    }

    pub fn previous(&self) -> Self {
        // Two pages: previous and next coincide
        self.next()
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Records => "Records",
            Page::Charts => "Charts",
        }
    }
}

pub struct App {
    pub session: Session,
    pub current_page: Page,
    pub chart: ChartMetric,
}

impl App {
    pub fn new(date: NaiveDate, defaults: &FormDefaults) -> Self {
        Self {
            session: Session::new(date, defaults),
            current_page: Page::Records,
            chart: ChartMetric::Weight,
        }
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    pub fn show_chart(&mut self, metric: ChartMetric) {
        self.chart = metric;
        self.current_page = Page::Charts;
    }

    /// Dispatch one key press. Returns true when the user wants to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        // A pending clear-all claims y/n/Esc; every other key works as usual
        if self.session.clear_state().is_pending() {
            match key.code {
                KeyCode::Char('y') => {
                    self.session.confirm_clear();
                    return false;
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.session.cancel_clear();
                    return false;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => {
                if self.session.form.is_editing() {
                    self.session.form.cancel_edit();
                } else {
                    return true;
                }
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.previous_page();
                } else {
                    self.next_page();
                }
            }
            KeyCode::BackTab => self.previous_page(),
            KeyCode::Left => self.session.form.focus_previous(),
            KeyCode::Right => self.session.form.focus_next(),
            KeyCode::Up => self.session.form.step_up(),
            KeyCode::Down => self.session.form.step_down(),
            KeyCode::Enter => {
                self.session.form.commit_edit();
            }
            KeyCode::Backspace => self.session.form.backspace(),
            KeyCode::Char('s') => self.session.save(),
            KeyCode::Char('u') => self.session.remove_last(),
            KeyCode::Char('x') => self.session.request_clear(),
            KeyCode::Char('d') => self.session.delete_selected(),
            KeyCode::Char('j') => self.session.select_next(),
            KeyCode::Char('k') => self.session.select_previous(),
            KeyCode::Char('w') => self.show_chart(ChartMetric::Weight),
            KeyCode::Char('b') => self.show_chart(ChartMetric::Bmi),
            KeyCode::Char('p') => self.show_chart(ChartMetric::BloodPressure),
            KeyCode::Char(c) => {
                self.session.form.push_char(c);
            }
            _ => {}
        }

        false
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(%err, "ui loop failed");
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Length(3), // Entry form
            Constraint::Length(3), // Live BMI
            Constraint::Length(1), // Notice
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_form(f, chunks[1], app);
    render_metrics(f, chunks[2], app);
    render_notice(f, chunks[3], app);

    if app.session.store.is_empty() {
        render_empty_state(f, chunks[4]);
    } else {
        match app.current_page {
            Page::Records => render_records(f, chunks[4], app),
            Page::Charts => render_charts(f, chunks[4], app),
        }
    }

    render_status_bar(f, chunks[5], app);

    if app.session.clear_state().is_pending() {
        let area = f.size();
        render_clear_confirmation(f, area);
    }
}

fn status_color(status: BmiStatus) -> Color {
    match status {
        BmiStatus::Underweight => Color::Blue,
        BmiStatus::Normal => Color::Green,
        BmiStatus::Overweight => Color::Yellow,
        BmiStatus::Obese => Color::LightRed,
        BmiStatus::SeverelyObese => Color::Red,
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [Page::Records, Page::Charts];

    let mut tab_spans = vec![Span::styled(
        "❤️ Health Log  ",
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Records: {}", app.session.store.len()),
        Style::default().fg(Color::White),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.session.form;
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    for (field, cell) in FieldId::ALL.iter().zip(cells.iter()) {
        let focused = *field == form.focus();
        let border = if focused { Color::Yellow } else { Color::White };

        let mut value = form.display(*field);
        if focused && form.is_editing() {
            value.push('▏');
        }

        let widget = Paragraph::new(value).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(format!(" {} ", field.title())),
        );
        f.render_widget(widget, *cell);
    }
}

fn render_metrics(f: &mut Frame, area: Rect, app: &App) {
    let reading = app.session.live_reading();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    let boxed = |title: &'static str| {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title)
    };

    let bmi = Paragraph::new(Span::styled(
        reading.display_value(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .block(boxed(" BMI "));

    let status = Paragraph::new(Span::styled(
        format!("{} {}", reading.status.indicator(), reading.status),
        Style::default().fg(status_color(reading.status)),
    ))
    .block(boxed(" Status "));

    let range = Paragraph::new(NORMAL_RANGE_LABEL).block(boxed(" Normal range "));

    f.render_widget(bmi, cells[0]);
    f.render_widget(status, cells[1]);
    f.render_widget(range, cells[2]);
}

fn render_notice(f: &mut Frame, area: Rect, app: &App) {
    let Some(notice) = app.session.notice() else {
        return;
    };

    let color = match notice.level {
        NoticeLevel::Info => Color::Cyan,
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Warning => Color::Yellow,
        NoticeLevel::Error => Color::Red,
    };

    let line = Paragraph::new(Span::styled(format!(" {}", notice.message), Style::default().fg(color)));
    f.render_widget(line, area);
}

fn render_empty_state(f: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", EMPTY_STATE_MESSAGE),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
        )),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" History "),
    );
    f.render_widget(paragraph, area);
}

fn render_records(f: &mut Frame, area: Rect, app: &App) {
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(65), // Sorted history
            Constraint::Percentage(35), // Selector
        ])
        .split(area);

    render_table(f, content_chunks[0], app);
    render_selector(f, content_chunks[1], app);
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    let header_cells = ["Date", "Height", "Weight", "BMI", "Systolic", "Diastolic"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let view = app.session.view();
    let rows = view.iter().map(|record| {
        let color = status_color(record.status());

        let cells = vec![
            Cell::from(record.date.format("%Y-%m-%d").to_string()),
            Cell::from(format!("{:.1}", record.height_cm)),
            Cell::from(format!("{:.1}", record.weight_kg)),
            Cell::from(format!("{:.1}", record.bmi)).style(Style::default().fg(color)),
            Cell::from(record.systolic.to_string()),
            Cell::from(record.diastolic.to_string()),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(9),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" History (by date) "),
    );

    f.render_widget(table, area);
}

fn render_selector(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .session
        .store
        .selector_options()
        .into_iter()
        .map(|(_, label)| ListItem::new(label))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Delete record (j/k, d) "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    let mut state = ListState::default();
    state.select(app.session.selected());
    f.render_stateful_widget(list, area, &mut state);
}

fn render_charts(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let titles: Vec<&str> = ChartMetric::ALL.iter().map(|m| m.title()).collect();
    let tabs = Tabs::new(titles)
        .select(app.chart.index())
        .block(Block::default().borders(Borders::ALL).title(" w / b / p "))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    f.render_widget(tabs, chunks[0]);

    let view = app.session.view();
    let series = series_for(app.chart, &view);
    let Some(bounds) = ChartBounds::from_series(&series) else {
        render_empty_state(f, chunks[1]);
        return;
    };

    let colors = [Color::Cyan, Color::Magenta];
    let datasets: Vec<Dataset> = series
        .iter()
        .zip(colors.iter().cycle())
        .map(|(s, color)| {
            Dataset::default()
                .name(s.name)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(*color))
                .data(&s.points)
        })
        .collect();

    let date_label = |x: f64| {
        Span::raw(
            date_from_x(x)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        )
    };

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} over time ", app.chart.title())),
        )
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Style::default().fg(Color::DarkGray))
                .bounds(bounds.x)
                .labels(vec![date_label(bounds.x[0]), date_label(bounds.x[1])]),
        )
        .y_axis(
            Axis::default()
                .title(app.chart.unit())
                .style(Style::default().fg(Color::DarkGray))
                .bounds(bounds.y)
                .labels(vec![
                    Span::raw(format!("{:.1}", bounds.y[0])),
                    Span::raw(format!("{:.1}", (bounds.y[0] + bounds.y[1]) / 2.0)),
                    Span::raw(format!("{:.1}", bounds.y[1])),
                ]),
        );

    f.render_widget(chart, chunks[1]);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![Span::styled(
        format!(" Field: {} ", app.session.form.focus().title()),
        Style::default().fg(Color::Cyan),
    )];

    let hints = [
        ("s", " Save | "),
        ("u", " Undo last | "),
        ("x", " Clear all | "),
        ("←/→", " Field | "),
        ("↑/↓", " Adjust | "),
        ("Tab", " Page | "),
    ];
    status_spans.push(Span::raw(" | "));
    for (key, label) in hints {
        status_spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(label));
    }
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_clear_confirmation(f: &mut Frame, area: Rect) {
    let popup = centered_rect(50, 7, area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  ⚠️ Delete ALL records? This cannot be undone.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("y", Style::default().fg(Color::Yellow)),
            Span::raw(" Yes, delete   "),
            Span::styled("n", Style::default().fg(Color::Yellow)),
            Span::raw(" Cancel"),
        ]),
    ];

    let dialog = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Clear all "),
    );

    f.render_widget(Clear, popup);
    f.render_widget(dialog, popup);
}

/// `width` percent of the area, `height` rows, centred
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = (u32::from(area.width) * u32::from(width.min(100)) / 100) as u16;
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}
