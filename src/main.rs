use std::io;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph,
};

use scout_terminal::dataset::PlayerTable;
use scout_terminal::export;
use scout_terminal::persist;
use scout_terminal::pizza::{PizzaChart, StatCategory};
use scout_terminal::rankings::RankConfig;
use scout_terminal::sample_data;
use scout_terminal::scatter::{Highlight, Overlay, ScatterPlot, team_colour_hex};
use scout_terminal::state::{AppState, Screen};

struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    fn new(state: AppState) -> Self {
        Self {
            state,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        // Annotation editing captures the keyboard until commit/cancel.
        if self.state.annotation_edit.is_some() {
            match key.code {
                KeyCode::Enter => self.state.annotation_commit(),
                KeyCode::Esc => self.state.annotation_cancel(),
                KeyCode::Backspace => self.state.annotation_backspace(),
                KeyCode::Char(ch) => self.state.annotation_push(ch),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.screen = Screen::Pizza,
            KeyCode::Char('2') => self.state.screen = Screen::Scatter,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Char('x') => self.export_current(),
            KeyCode::Char('w') => match persist::save_from_state(&self.state) {
                Ok(()) => self.state.push_log("[INFO] Snapshot saved"),
                Err(err) => self.state.push_log(format!("[WARN] Snapshot save: {err}")),
            },
            _ => match self.state.screen {
                Screen::Pizza => self.on_pizza_key(key),
                Screen::Scatter => self.on_scatter_key(key),
            },
        }
    }

    fn on_pizza_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('t') => self.state.cycle_team(1),
            KeyCode::Char('T') => self.state.cycle_team(-1),
            KeyCode::Char('p') => self.state.cycle_player(1),
            KeyCode::Char('P') => self.state.cycle_player(-1),
            KeyCode::Tab => self.state.category_tab = self.state.category_tab.next(),
            KeyCode::BackTab => self.state.category_tab = self.state.category_tab.prev(),
            KeyCode::Char('j') | KeyCode::Down => self.state.stat_cursor_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.stat_cursor_prev(),
            KeyCode::Char(' ') => self.state.toggle_stat_under_cursor(),
            KeyCode::Char(']') => self.state.rank_scroll = self.state.rank_scroll.saturating_add(1),
            KeyCode::Char('[') => self.state.rank_scroll = self.state.rank_scroll.saturating_sub(1),
            _ => {}
        }
    }

    fn on_scatter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('l') | KeyCode::Right => self.state.cycle_x_stat(1),
            KeyCode::Char('h') | KeyCode::Left => self.state.cycle_x_stat(-1),
            KeyCode::Char('j') | KeyCode::Down => self.state.cycle_y_stat(1),
            KeyCode::Char('k') | KeyCode::Up => self.state.cycle_y_stat(-1),
            KeyCode::Char('o') => self.state.overlay = self.state.overlay.toggled(),
            KeyCode::Char('z') => self.state.zone_kind = self.state.zone_kind.toggled(),
            KeyCode::Char('[') => self.state.adjust_nineties_lo(-1),
            KeyCode::Char(']') => self.state.adjust_nineties_lo(1),
            KeyCode::Char('{') => self.state.adjust_nineties_hi(-1),
            KeyCode::Char('}') => self.state.adjust_nineties_hi(1),
            KeyCode::Char('t') => self.state.cycle_scatter_team(1),
            KeyCode::Char('T') => self.state.cycle_scatter_team(-1),
            KeyCode::Char('m') => self.state.toggle_highlight_team(),
            KeyCode::Char('p') => self.state.cycle_scatter_player(1),
            KeyCode::Char('P') => self.state.cycle_scatter_player(-1),
            KeyCode::Char(' ') => self.state.toggle_highlight_player(),
            KeyCode::Char('a') => self.state.start_annotation_edit(),
            KeyCode::Char('3') => self.state.apply_preset(0),
            KeyCode::Char('4') => self.state.apply_preset(1),
            KeyCode::Char('5') => self.state.apply_preset(2),
            _ => {}
        }
    }

    fn export_current(&mut self) {
        match self.state.screen {
            Screen::Pizza => match self.state.pizza_chart() {
                Ok(chart) => {
                    let path = export::default_export_path("ranks");
                    match export::export_ranks(&path, &chart, &self.state.config) {
                        Ok(report) => self.state.push_log(format!(
                            "[INFO] Exported {} rank rows to {}",
                            report.rows,
                            report.path.display()
                        )),
                        Err(err) => self.state.push_log(format!("[WARN] Export: {err}")),
                    }
                }
                Err(err) => self.state.push_log(format!("[WARN] Export: {err}")),
            },
            Screen::Scatter => match self.state.scatter_plot() {
                Ok(plot) => {
                    let path = export::default_export_path("scatter");
                    match export::export_scatter(&path, &plot) {
                        Ok(report) => self.state.push_log(format!(
                            "[INFO] Exported {} points to {}",
                            report.rows,
                            report.path.display()
                        )),
                        Err(err) => self.state.push_log(format!("[WARN] Export: {err}")),
                    }
                }
                Err(err) => self.state.push_log(format!("[WARN] Export: {err}")),
            },
        }
    }
}

fn load_table() -> (PlayerTable, Option<persist::ViewSettings>, String) {
    if let Ok(path) = std::env::var("SCOUT_DATASET") {
        match persist::load_table_from_path(std::path::Path::new(&path)) {
            Ok(table) => {
                let note = format!("[INFO] Dataset loaded from {path}");
                return (table, None, note);
            }
            Err(err) => {
                let table = sample_data::demo_table();
                let note = format!("[WARN] {err}; using demo league");
                return (table, None, note);
            }
        }
    }

    if let Some(snapshot) = persist::load_snapshot() {
        let note = match snapshot.saved_at {
            Some(at) => format!(
                "[INFO] Snapshot restored (saved {})",
                DateTime::<Local>::from(at).format("%Y-%m-%d %H:%M")
            ),
            None => "[INFO] Snapshot restored".to_string(),
        };
        return (snapshot.table, snapshot.view, note);
    }

    (
        sample_data::demo_table(),
        None,
        "[INFO] No snapshot found; using demo league".to_string(),
    )
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let (table, view, load_note) = load_table();
    let mut state = AppState::new(table, RankConfig::from_env());
    if let Some(view) = view {
        persist::apply_view_settings(&mut state, view);
    }
    state.push_log(load_note);
    state.push_log(format!(
        "[INFO] {} players, {} stats, min 90s = {}",
        state.table.rows.len(),
        state.table.columns.len(),
        state.config.min_nineties
    ));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(state);
    let res = run_app(&mut terminal, &mut app);

    let save_res = persist::save_from_state(&app.state);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    if let Err(err) = save_res {
        eprintln!("snapshot save failed: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Pizza => render_pizza(frame, chunks[1], &app.state),
        Screen::Scatter => render_scatter(frame, chunks[1], &app.state),
    }

    let footer =
        Paragraph::new(footer_text(&app.state)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let as_of = state
        .table
        .as_of
        .map(|at| {
            format!(
                " | as of {}",
                DateTime::<Local>::from(at).format("%Y-%m-%d %H:%M")
            )
        })
        .unwrap_or_default();
    let title = match state.screen {
        Screen::Pizza => format!(
            "SCOUT PIZZA | {} | Tab: {}{as_of}",
            state
                .selected_player()
                .unwrap_or_else(|| "-".to_string()),
            state.category_tab.label()
        ),
        Screen::Scatter => format!(
            "SCOUT SCATTER | {} vs {} | {}{as_of}",
            state.y_stat(),
            state.x_stat(),
            overlay_label(state)
        ),
    };
    let line1 = format!("  __  {title}");
    let line2 = " (__)".to_string();
    let line3 = "  ||".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn overlay_label(state: &AppState) -> String {
    match state.overlay {
        Overlay::TrendLine => "Trend line".to_string(),
        Overlay::Zones => format!("Zones ({})", state.zone_kind.label()),
    }
}

fn footer_text(state: &AppState) -> String {
    if state.annotation_edit.is_some() {
        return "Type tag text | Enter Commit | Esc Cancel | Backspace Delete".to_string();
    }
    match state.screen {
        Screen::Pizza => {
            "1 Pizza | 2 Scatter | t/T Team | p/P Player | Tab Category | j/k Move | Space Pick | [/] Table | x Export | w Save | ? Help | q Quit"
                .to_string()
        }
        Screen::Scatter => {
            "1 Pizza | 2 Scatter | h/l X | j/k Y | o Overlay | z Zone | [/]{/} 90s | t/T+m Team | p/P+Space Player | a Tag | 3-5 Presets | x Export | ? Help | q Quit"
                .to_string()
        }
    }
}

// ----- pizza page -----

fn render_pizza(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(40)])
        .split(area);

    render_pizza_sidebar(frame, columns[0], state);

    match state.pizza_chart() {
        Ok(chart) => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(10), Constraint::Length(14)])
                .split(columns[1]);
            render_pizza_chart(frame, rows[0], state, &chart);
            render_rank_table(frame, rows[1], state, &chart);
        }
        Err(err) => {
            let placeholder = Paragraph::new(format!("No chart: {err}"))
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().title("Percentile Pizza").borders(Borders::ALL));
            frame.render_widget(placeholder, columns[1]);
        }
    }
}

fn render_pizza_sidebar(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Min(5),
            Constraint::Length(5),
        ])
        .split(area);

    let player_lines = match state.team_players().get(state.player_index) {
        Some(row) => format!(
            "Team: {}\nPlayer: {}\n90s: {:.1}",
            row.team, row.player, row.nineties
        ),
        None => "No player selected".to_string(),
    };
    let player = Paragraph::new(player_lines)
        .block(Block::default().title("Player").borders(Borders::ALL));
    frame.render_widget(player, chunks[0]);

    let mut category_lines = Vec::new();
    for category in StatCategory::ORDER {
        let marker = if category == state.category_tab { ">" } else { " " };
        category_lines.push(format!(
            "{marker} {} ({})",
            category.label(),
            state.selection.stats_for(category).len()
        ));
    }
    let categories = Paragraph::new(category_lines.join("\n"))
        .block(Block::default().title("Categories").borders(Borders::ALL));
    frame.render_widget(categories, chunks[1]);

    render_stat_picker(frame, chunks[2], state);

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[3]);
}

fn render_stat_picker(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(format!("Stats: {}", state.category_tab.label()))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let names = state.table.stat_names();
    let visible = inner.height as usize;
    let (start, end) = visible_range(state.stat_cursor, names.len(), visible);

    let mut lines = Vec::new();
    for (offset, name) in names[start..end].iter().enumerate() {
        let cursor = if start + offset == state.stat_cursor { ">" } else { " " };
        let picked = if state.stat_is_selected(name) { "[x]" } else { "[ ]" };
        lines.push(format!("{cursor}{picked} {name}"));
    }
    let list = Paragraph::new(lines.join("\n"));
    frame.render_widget(list, inner);
}

fn render_pizza_chart(frame: &mut Frame, area: Rect, state: &AppState, chart: &PizzaChart) {
    if chart.slices.is_empty() {
        let empty = Paragraph::new("No stats selected")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title("Percentile Pizza").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let title = format!("Percentile Pizza - {} ({})", chart.player, chart.team);
    let mut bar_chart = BarChart::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .group_gap(1)
        .max(100);

    // Wedge order is part of the contract: Defense, Possession, Playmaking,
    // Attack, each group coloured to match its category.
    for category in StatCategory::ORDER {
        let slices = chart.slices_for(category);
        if slices.is_empty() {
            continue;
        }
        let bars: Vec<Bar> = slices
            .iter()
            .map(|slice| {
                let style = Style::default().fg(category.colour());
                let text = if slice.outcome.is_eligible() || state.config.legacy_zero_ranks {
                    format!("{:5.1}", slice.outcome.value_or_zero())
                } else {
                    "  n/a".to_string()
                };
                Bar::default()
                    .value(slice.outcome.value_or_zero().round() as u64)
                    .label(Line::from(slice.label.clone()))
                    .text_value(text)
                    .style(style)
            })
            .collect();
        bar_chart = bar_chart.data(
            BarGroup::default()
                .label(Line::styled(
                    category.label(),
                    Style::default().fg(category.colour()),
                ))
                .bars(&bars),
        );
    }

    frame.render_widget(bar_chart, area);
}

fn render_rank_table(frame: &mut Frame, area: Rect, state: &AppState, chart: &PizzaChart) {
    let block = Block::default().title("Ranks (all players)").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 {
        return;
    }

    let stats = state.selection.stats_for(state.category_tab);
    let mut widths = vec![Constraint::Length(16), Constraint::Length(16), Constraint::Length(6)];
    widths.extend(stats.iter().map(|_| Constraint::Length(10)));

    let header_area = Rect { height: 1, ..inner };
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths.clone())
        .split(header_area);
    let style = Style::default().add_modifier(Modifier::BOLD);
    render_cell_text(frame, cols[0], "Player", style);
    render_cell_text(frame, cols[1], "Team", style);
    render_cell_text(frame, cols[2], "90s", style);
    for (i, stat) in stats.iter().enumerate() {
        if let Some(col) = cols.get(3 + i) {
            render_cell_text(frame, *col, stat, style);
        }
    }

    let visible = (inner.height - 1) as usize;
    let total = chart.table.rows.len();
    let start = (state.rank_scroll as usize).min(total.saturating_sub(visible));
    let end = (start + visible).min(total);

    for (i, row) in chart.table.rows[start..end].iter().enumerate() {
        let row_area = Rect {
            x: inner.x,
            y: inner.y + 1 + i as u16,
            width: inner.width,
            height: 1,
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths.clone())
            .split(row_area);
        render_cell_text(frame, cols[0], &row.player, Style::default());
        render_cell_text(frame, cols[1], &row.team, Style::default());
        render_cell_text(frame, cols[2], &format!("{:.1}", row.nineties), Style::default());
        for (j, stat) in stats.iter().enumerate() {
            let Some(col) = cols.get(3 + j) else { continue };
            let text = chart
                .table
                .stats
                .iter()
                .position(|s| s == stat)
                .and_then(|idx| row.ranks.get(idx).copied().flatten())
                .map(|rank| format!("{rank:.2}"))
                .unwrap_or_else(|| "-".to_string());
            render_cell_text(frame, *col, &text, Style::default());
        }
    }
}

// ----- scatter page -----

fn render_scatter(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(40)])
        .split(area);

    match state.scatter_plot() {
        Ok(plot) => {
            render_scatter_sidebar(frame, columns[0], state, &plot);
            render_scatter_chart(frame, columns[1], state, &plot);
        }
        Err(err) => {
            let placeholder = Paragraph::new(format!("No plot: {err}"))
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().title("Scatter").borders(Borders::ALL));
            frame.render_widget(placeholder, columns[1]);

            let console = Paragraph::new(console_text(state))
                .block(Block::default().title("Console").borders(Borders::ALL));
            frame.render_widget(console, columns[0]);
        }
    }
}

fn render_scatter_sidebar(frame: &mut Frame, area: Rect, state: &AppState, plot: &ScatterPlot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Min(4),
            Constraint::Length(5),
        ])
        .split(area);

    let axes_lines = format!(
        "X: {}\nY: {}\nOverlay: {}\n90s: {:.1} - {:.1}\nPlotted: {}",
        plot.x_stat,
        plot.y_stat,
        overlay_label(state),
        state.nineties_lo(),
        state.nineties_hi(),
        plot.points.len()
    );
    let axes = Paragraph::new(axes_lines).block(Block::default().title("Axes").borders(Borders::ALL));
    frame.render_widget(axes, chunks[0]);

    let team_cursor = state
        .teams()
        .get(state.scatter_team_cursor)
        .cloned()
        .unwrap_or_else(|| "-".to_string());
    let player_cursor = state
        .scatter_player()
        .map(|r| format!("{} ({})", r.player, r.team))
        .unwrap_or_else(|| "-".to_string());
    let mut highlight_lines = vec![
        format!("Team > {team_cursor}"),
        format!("Player > {player_cursor}"),
    ];
    if !state.highlight_teams.is_empty() {
        highlight_lines.push(format!("Teams: {}", state.highlight_teams.join(", ")));
    }
    if !state.highlight_players.is_empty() {
        highlight_lines.push(format!("Players: {}", state.highlight_players.join(", ")));
    }
    let highlights = Paragraph::new(highlight_lines.join("\n"))
        .block(Block::default().title("Highlights").borders(Borders::ALL));
    frame.render_widget(highlights, chunks[1]);

    render_tags(frame, chunks[2], state, plot);

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[3]);
}

fn render_tags(frame: &mut Frame, area: Rect, state: &AppState, plot: &ScatterPlot) {
    let mut lines = Vec::new();
    if let Some(player) = &state.annotation_edit {
        lines.push(format!("edit {player}: {}_", state.annotation_input));
    }
    for player in &state.highlight_players {
        let tag = state
            .annotations
            .get(player)
            .cloned()
            .unwrap_or_else(|| player.clone());
        match plot.point_for(player) {
            Ok(point) => lines.push(format!("{tag} ({:.2}, {:.2})", point.x, point.y)),
            Err(_) => lines.push(format!("{tag} (filtered out)")),
        }
    }
    if lines.is_empty() {
        lines.push("No player tags".to_string());
    }
    let tags =
        Paragraph::new(lines.join("\n")).block(Block::default().title("Tags").borders(Borders::ALL));
    frame.render_widget(tags, area);
}

fn render_scatter_chart(frame: &mut Frame, area: Rect, state: &AppState, plot: &ScatterPlot) {
    let Some((x_bounds, y_bounds)) = plot.bounds() else {
        let empty = Paragraph::new("No players in the 90s range")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title("Scatter").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    };

    let others: Vec<(f64, f64)> = plot
        .points
        .iter()
        .filter(|p| p.highlight == Highlight::None)
        .map(|p| (p.x, p.y))
        .collect();

    let mut team_sets: Vec<(String, Color, Vec<(f64, f64)>)> = Vec::new();
    for team in &state.highlight_teams {
        let points: Vec<(f64, f64)> = plot
            .points
            .iter()
            .filter(|p| p.highlight == Highlight::Team && &p.team == team)
            .map(|p| (p.x, p.y))
            .collect();
        if points.is_empty() {
            continue;
        }
        let colour = team_colour_hex(team)
            .and_then(colour_from_hex)
            .unwrap_or(Color::Cyan);
        team_sets.push((team.clone(), colour, points));
    }

    let players: Vec<(f64, f64)> = plot
        .points
        .iter()
        .filter(|p| p.highlight == Highlight::Player)
        .map(|p| (p.x, p.y))
        .collect();

    let trend_points: Vec<(f64, f64)> = plot
        .trend
        .as_ref()
        .map(|trend| {
            vec![
                (x_bounds[0], trend.predict(x_bounds[0])),
                (x_bounds[1], trend.predict(x_bounds[1])),
            ]
        })
        .unwrap_or_default();

    let (hline, vline) = plot
        .zones
        .map(|zones| {
            (
                vec![(x_bounds[0], zones.h), (x_bounds[1], zones.h)],
                vec![(zones.v, y_bounds[0]), (zones.v, y_bounds[1])],
            )
        })
        .unwrap_or_default();

    let mut datasets = vec![
        Dataset::default()
            .name("players")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Gray))
            .data(&others),
    ];
    for (team, colour, points) in &team_sets {
        datasets.push(
            Dataset::default()
                .name(team.clone())
                .marker(symbols::Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(*colour))
                .data(points),
        );
    }
    if !players.is_empty() {
        datasets.push(
            Dataset::default()
                .name("tagged")
                .marker(symbols::Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::White))
                .data(&players),
        );
    }
    if !trend_points.is_empty() {
        datasets.push(
            Dataset::default()
                .name("trend")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Blue))
                .data(&trend_points),
        );
    }
    if !hline.is_empty() {
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::DarkGray))
                .data(&hline),
        );
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::DarkGray))
                .data(&vline),
        );
    }

    let title = match &plot.trend {
        Some(trend) => format!(
            "{} vs {} | y = {:.3}x + {:.3}, R2 {:.2}",
            plot.y_stat, plot.x_stat, trend.slope, trend.intercept, trend.r_squared
        ),
        None => format!("{} vs {}", plot.y_stat, plot.x_stat),
    };

    let chart = Chart::new(datasets)
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title(plot.x_stat.clone())
                .style(Style::default().fg(Color::DarkGray))
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title(plot.y_stat.clone())
                .style(Style::default().fg(Color::DarkGray))
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds)),
        );
    frame.render_widget(chart, area);
}

fn axis_labels(bounds: [f64; 2]) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    vec![
        Span::from(format!("{:.2}", bounds[0])),
        Span::from(format!("{mid:.2}")),
        Span::from(format!("{:.2}", bounds[1])),
    ]
}

fn colour_from_hex(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

// ----- shared chrome -----

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let text_area = Rect {
        x: area.x,
        y: area.y + (area.height / 2),
        width: area.width,
        height: 1,
    };
    let paragraph = Paragraph::new(text.to_string()).style(style);
    frame.render_widget(paragraph, text_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(64, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Scout Terminal - Help",
        "",
        "Global:",
        "  1 / 2        Pizza / Scatter page",
        "  x            Export current page to xlsx",
        "  w            Save snapshot",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Pizza:",
        "  t/T p/P      Cycle team / player",
        "  Tab          Cycle category tab",
        "  j/k + Space  Pick stats for the tab",
        "  [/]          Scroll rank table",
        "",
        "Scatter:",
        "  h/l j/k      Cycle x / y stat",
        "  o z          Overlay, zone line kind",
        "  [/] {/}      90s filter low / high bound",
        "  t/T + m      Team cursor, mark team",
        "  p/P + Space  Player cursor, mark player",
        "  a            Edit tag for marked player",
        "  3 4 5        Preset x/y pairs",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
