use std::collections::{HashMap, VecDeque};

use crate::dataset::{PlayerRow, PlayerTable, StatsError};
use crate::pizza::{self, PizzaChart, PizzaSelection, StatCategory};
use crate::rankings::RankConfig;
use crate::scatter::{self, Overlay, PRESETS, ScatterConfig, ScatterPlot, ZoneKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Pizza,
    Scatter,
}

const DEFAULT_TEAM: &str = "Manchester City";
const DEFAULT_PLAYER: &str = "Rodri";

pub struct AppState {
    pub table: PlayerTable,
    pub config: RankConfig,
    pub screen: Screen,
    pub help_overlay: bool,
    pub logs: VecDeque<String>,

    // Pizza page.
    pub category_tab: StatCategory,
    pub selection: PizzaSelection,
    pub stat_cursor: usize,
    pub team_index: usize,
    pub player_index: usize,
    pub rank_scroll: u16,

    // Scatter page.
    pub x_index: usize,
    pub y_index: usize,
    pub overlay: Overlay,
    pub zone_kind: ZoneKind,
    pub nineties_lo_idx: usize,
    pub nineties_hi_idx: usize,
    pub scatter_team_cursor: usize,
    pub scatter_player_cursor: usize,
    pub highlight_teams: Vec<String>,
    pub highlight_players: Vec<String>,
    pub annotations: HashMap<String, String>,
    pub annotation_edit: Option<String>,
    pub annotation_input: String,
}

impl AppState {
    pub fn new(table: PlayerTable, config: RankConfig) -> Self {
        let mut selection = PizzaSelection::default();
        selection.retain_known(&table);

        let teams = table.teams();
        let team_index = teams.iter().position(|t| t == DEFAULT_TEAM).unwrap_or(0);
        let player_index = teams
            .get(team_index)
            .map(|team| {
                table
                    .players_for_team(team)
                    .iter()
                    .position(|r| r.player == DEFAULT_PLAYER)
                    .unwrap_or(0)
            })
            .unwrap_or(0);

        let x_index = table.stat_index(PRESETS[0].x).unwrap_or(0);
        let y_index = table
            .stat_index(PRESETS[0].y)
            .unwrap_or(if table.columns.len() > 1 { 1 } else { 0 });

        let steps = table.nineties_steps();
        // Range filter opens at [median step, max], mirroring the original
        // slider default.
        let nineties_lo_idx = if steps.is_empty() { 0 } else { steps.len() / 2 };
        let nineties_hi_idx = steps.len().saturating_sub(1);

        Self {
            table,
            config,
            screen: Screen::Pizza,
            help_overlay: false,
            logs: VecDeque::new(),
            category_tab: StatCategory::Defense,
            selection,
            stat_cursor: 0,
            team_index,
            player_index,
            rank_scroll: 0,
            x_index,
            y_index,
            overlay: Overlay::Zones,
            zone_kind: ZoneKind::Average,
            nineties_lo_idx,
            nineties_hi_idx,
            scatter_team_cursor: 0,
            scatter_player_cursor: 0,
            highlight_teams: Vec::new(),
            highlight_players: Vec::new(),
            annotations: HashMap::new(),
            annotation_edit: None,
            annotation_input: String::new(),
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    // ----- pizza page -----

    pub fn teams(&self) -> Vec<String> {
        self.table.teams()
    }

    pub fn selected_team(&self) -> Option<String> {
        self.teams().get(self.team_index).cloned()
    }

    pub fn team_players(&self) -> Vec<&PlayerRow> {
        match self.teams().get(self.team_index) {
            Some(team) => self.table.players_for_team(team),
            None => Vec::new(),
        }
    }

    pub fn selected_player(&self) -> Option<String> {
        self.team_players()
            .get(self.player_index)
            .map(|r| r.player.clone())
    }

    pub fn cycle_team(&mut self, step: isize) {
        let teams = self.teams();
        if teams.is_empty() {
            return;
        }
        self.team_index = wrap_index(self.team_index, step, teams.len());
        self.player_index = 0;
    }

    pub fn cycle_player(&mut self, step: isize) {
        let count = self.team_players().len();
        if count == 0 {
            return;
        }
        self.player_index = wrap_index(self.player_index, step, count);
    }

    pub fn stat_cursor_next(&mut self) {
        let count = self.table.columns.len();
        if count > 0 {
            self.stat_cursor = wrap_index(self.stat_cursor, 1, count);
        }
    }

    pub fn stat_cursor_prev(&mut self) {
        let count = self.table.columns.len();
        if count > 0 {
            self.stat_cursor = wrap_index(self.stat_cursor, -1, count);
        }
    }

    /// Toggle the stat under the cursor in the current category tab.
    pub fn toggle_stat_under_cursor(&mut self) {
        let Some(column) = self.table.columns.get(self.stat_cursor) else {
            return;
        };
        let name = column.name.clone();
        self.selection.toggle(self.category_tab, &name);
    }

    pub fn stat_is_selected(&self, stat: &str) -> bool {
        self.selection
            .stats_for(self.category_tab)
            .iter()
            .any(|s| s == stat)
    }

    pub fn pizza_chart(&self) -> Result<PizzaChart, StatsError> {
        let player = self.selected_player().unwrap_or_default();
        let team = self.selected_team().unwrap_or_default();
        pizza::build_pizza(&self.table, &self.selection, &player, &team, &self.config)
    }

    // ----- scatter page -----

    pub fn x_stat(&self) -> String {
        self.table
            .columns
            .get(self.x_index)
            .map(|c| c.name.clone())
            .unwrap_or_default()
    }

    pub fn y_stat(&self) -> String {
        self.table
            .columns
            .get(self.y_index)
            .map(|c| c.name.clone())
            .unwrap_or_default()
    }

    pub fn cycle_x_stat(&mut self, step: isize) {
        let count = self.table.columns.len();
        if count > 0 {
            self.x_index = wrap_index(self.x_index, step, count);
        }
    }

    pub fn cycle_y_stat(&mut self, step: isize) {
        let count = self.table.columns.len();
        if count > 0 {
            self.y_index = wrap_index(self.y_index, step, count);
        }
    }

    /// Apply a preset x/y pair; unknown columns leave the axes unchanged.
    pub fn apply_preset(&mut self, preset_index: usize) {
        let Some(preset) = PRESETS.get(preset_index) else {
            return;
        };
        match (
            self.table.stat_index(preset.x),
            self.table.stat_index(preset.y),
        ) {
            (Ok(x), Ok(y)) => {
                self.x_index = x;
                self.y_index = y;
                self.push_log(format!("[INFO] Preset: {}", preset.name));
            }
            _ => {
                self.push_log(format!("[WARN] Preset {} not in dataset", preset.name));
            }
        }
    }

    pub fn nineties_lo(&self) -> f64 {
        self.table
            .nineties_steps()
            .get(self.nineties_lo_idx)
            .copied()
            .unwrap_or(0.0)
    }

    pub fn nineties_hi(&self) -> f64 {
        let steps = self.table.nineties_steps();
        steps
            .get(self.nineties_hi_idx)
            .or(steps.last())
            .copied()
            .unwrap_or(f64::MAX)
    }

    pub fn adjust_nineties_lo(&mut self, step: isize) {
        if self.table.nineties_steps().is_empty() {
            return;
        }
        let next = self.nineties_lo_idx.saturating_add_signed(step);
        self.nineties_lo_idx = next.min(self.nineties_hi_idx);
    }

    pub fn adjust_nineties_hi(&mut self, step: isize) {
        let count = self.table.nineties_steps().len();
        if count == 0 {
            return;
        }
        let next = self
            .nineties_hi_idx
            .saturating_add_signed(step)
            .min(count - 1);
        self.nineties_hi_idx = next.max(self.nineties_lo_idx);
    }

    pub fn cycle_scatter_team(&mut self, step: isize) {
        let count = self.teams().len();
        if count > 0 {
            self.scatter_team_cursor = wrap_index(self.scatter_team_cursor, step, count);
        }
    }

    pub fn toggle_highlight_team(&mut self) {
        let Some(team) = self.teams().get(self.scatter_team_cursor).cloned() else {
            return;
        };
        match self.highlight_teams.iter().position(|t| *t == team) {
            Some(index) => {
                self.highlight_teams.remove(index);
            }
            None => self.highlight_teams.push(team),
        }
    }

    pub fn cycle_scatter_player(&mut self, step: isize) {
        let count = self.table.rows.len();
        if count > 0 {
            self.scatter_player_cursor = wrap_index(self.scatter_player_cursor, step, count);
        }
    }

    pub fn scatter_player(&self) -> Option<&PlayerRow> {
        self.table.rows.get(self.scatter_player_cursor)
    }

    pub fn toggle_highlight_player(&mut self) {
        let Some(player) = self.scatter_player().map(|r| r.player.clone()) else {
            return;
        };
        match self.highlight_players.iter().position(|p| *p == player) {
            Some(index) => {
                self.highlight_players.remove(index);
                self.annotations.remove(&player);
            }
            None => {
                // A fresh tag defaults to the player's own name.
                self.annotations
                    .entry(player.clone())
                    .or_insert_with(|| player.clone());
                self.highlight_players.push(player);
            }
        }
    }

    // ----- annotation editing -----

    pub fn start_annotation_edit(&mut self) {
        let Some(player) = self.scatter_player().map(|r| r.player.clone()) else {
            return;
        };
        if !self.highlight_players.contains(&player) {
            self.push_log(format!("[INFO] Highlight {player} before tagging"));
            return;
        }
        self.annotation_input = self
            .annotations
            .get(&player)
            .cloned()
            .unwrap_or_else(|| player.clone());
        self.annotation_edit = Some(player);
    }

    pub fn annotation_push(&mut self, ch: char) {
        if self.annotation_edit.is_some() {
            self.annotation_input.push(ch);
        }
    }

    pub fn annotation_backspace(&mut self) {
        if self.annotation_edit.is_some() {
            self.annotation_input.pop();
        }
    }

    pub fn annotation_commit(&mut self) {
        if let Some(player) = self.annotation_edit.take() {
            self.annotations
                .insert(player, self.annotation_input.clone());
            self.annotation_input.clear();
        }
    }

    pub fn annotation_cancel(&mut self) {
        self.annotation_edit = None;
        self.annotation_input.clear();
    }

    pub fn scatter_config(&self) -> ScatterConfig {
        ScatterConfig {
            x_stat: self.x_stat(),
            y_stat: self.y_stat(),
            nineties_lo: self.nineties_lo(),
            nineties_hi: self.nineties_hi(),
            overlay: self.overlay,
            zone_kind: self.zone_kind,
            highlight_teams: self.highlight_teams.clone(),
            highlight_players: self.highlight_players.clone(),
        }
    }

    pub fn scatter_plot(&self) -> Result<ScatterPlot, StatsError> {
        scatter::build_scatter(&self.table, &self.scatter_config())
    }
}

fn wrap_index(current: usize, step: isize, count: usize) -> usize {
    debug_assert!(count > 0);
    let count = count as isize;
    (current as isize + step).rem_euclid(count) as usize
}
