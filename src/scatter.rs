//! Scatter explorer model: two per-90 stats with trend or zone overlays.

use std::collections::HashMap;

use linregress::fit_low_level_regression_model;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::dataset::{PlayerTable, StatsError};
use crate::normalize::per90_for_rows;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneKind {
    Median,
    Average,
}

impl ZoneKind {
    pub fn label(self) -> &'static str {
        match self {
            ZoneKind::Median => "Median",
            ZoneKind::Average => "Average",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ZoneKind::Median => ZoneKind::Average,
            ZoneKind::Average => ZoneKind::Median,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overlay {
    TrendLine,
    Zones,
}

impl Overlay {
    pub fn label(self) -> &'static str {
        match self {
            Overlay::TrendLine => "Trend line",
            Overlay::Zones => "Zones",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Overlay::TrendLine => Overlay::Zones,
            Overlay::Zones => Overlay::TrendLine,
        }
    }
}

pub struct ScatterPreset {
    pub name: &'static str,
    pub x: &'static str,
    pub y: &'static str,
}

/// Predefined x/y pairs offered on the scatter page.
pub const PRESETS: [ScatterPreset; 3] = [
    ScatterPreset {
        name: "Goalscoring Efficiency",
        x: "npxG",
        y: "npG-xG",
    },
    ScatterPreset {
        name: "Assisting Efficiency",
        x: "SCAPassLive",
        y: "xAG",
    },
    ScatterPreset {
        name: "Progressive Actions",
        x: "ProgPasses",
        y: "ProgCarries",
    },
];

/// Primary/secondary marker colours per club, used when a team is
/// highlighted. Anything not listed falls back to the default marker style.
pub static TEAM_COLOURS: Lazy<HashMap<&'static str, (&'static str, &'static str)>> =
    Lazy::new(|| {
        HashMap::from([
            ("Arsenal", ("#FFFFFF", "#EF0107")),
            ("Aston Villa", ("#95BFE5", "#670E36")),
            ("Bournemouth", ("#DA291C", "#000000")),
            ("Brentford", ("#FFFFFF", "#E30613")),
            ("Brighton", ("#0057B8", "#FFCD00")),
            ("Chelsea", ("#034694", "#034694")),
            ("Crystal Palace", ("#1B458F", "#A7A5A6")),
            ("Everton", ("#003399", "#FFFFFF")),
            ("Fulham", ("#000000", "#CC0000")),
            ("Leeds United", ("#FFCD00", "#1D428A")),
            ("Leicester City", ("#003090", "#FDBE11")),
            ("Liverpool", ("#CE1317", "#9A1310")),
            ("Manchester Utd", ("#000000", "#DA291C")),
            ("Manchester City", ("#6CABDD", "#6CABDD")),
            ("Newcastle Utd", ("#241F20", "#FFFFFF")),
            ("Nott'ham Forest", ("#FF0000", "#FF0000")),
            ("Southampton", ("#D71920", "#130C0E")),
            ("Tottenham", ("#132257", "#FFFFFF")),
            ("West Ham", ("#7A263A", "#1BB1E7")),
            ("Wolves", ("#FDB913", "#231F20")),
        ])
    });

pub fn team_colour_hex(team: &str) -> Option<&'static str> {
    TEAM_COLOURS.get(team).map(|(primary, _)| *primary)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScatterConfig {
    pub x_stat: String,
    pub y_stat: String,
    pub nineties_lo: f64,
    pub nineties_hi: f64,
    pub overlay: Overlay,
    pub zone_kind: ZoneKind,
    pub highlight_teams: Vec<String>,
    pub highlight_players: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Highlight {
    None,
    Team,
    Player,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub player: String,
    pub team: String,
    pub x: f64,
    pub y: f64,
    pub highlight: Highlight,
}

/// Ordinary least-squares fit of y on x, with intercept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl TrendLine {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Quadrant dividers at the median or mean of each axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ZoneLines {
    pub kind: ZoneKind,
    pub h: f64,
    pub v: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScatterPlot {
    pub x_stat: String,
    pub y_stat: String,
    pub points: Vec<ScatterPoint>,
    pub trend: Option<TrendLine>,
    pub zones: Option<ZoneLines>,
}

impl ScatterPlot {
    /// First plotted point for a player, by exact name match. A player can
    /// be tagged yet absent here when the range filter dropped them.
    pub fn point_for(&self, player: &str) -> Result<&ScatterPoint, StatsError> {
        self.points
            .iter()
            .find(|p| p.player == player)
            .ok_or_else(|| StatsError::LookupMiss {
                player: player.to_string(),
            })
    }

    /// Axis bounds padded by 5% of the data span on each side.
    pub fn bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        if self.points.is_empty() {
            return None;
        }
        let xs: Vec<f64> = self.points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = self.points.iter().map(|p| p.y).collect();
        Some((padded_bounds(&xs), padded_bounds(&ys)))
    }
}

fn padded_bounds(values: &[f64]) -> [f64; 2] {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(*v);
        max = max.max(*v);
    }
    let margin = (max - min) * 0.05;
    // A flat axis still needs visible height.
    let margin = if margin > 0.0 { margin } else { 1.0 };
    [min - margin, max + margin]
}

/// Build the scatter model: filter by playing time, normalize both axes, tag
/// highlights, and attach the requested overlay.
pub fn build_scatter(table: &PlayerTable, config: &ScatterConfig) -> Result<ScatterPlot, StatsError> {
    let x_index = table.stat_index(&config.x_stat)?;
    let y_index = table.stat_index(&config.y_stat)?;
    let x_role = table.columns[x_index].role;
    let y_role = table.columns[y_index].role;

    let rows = table.rows_in_nineties_range(config.nineties_lo, config.nineties_hi);
    let xs = per90_for_rows(&rows, x_index, x_role)?;
    let ys = per90_for_rows(&rows, y_index, y_role)?;

    let points: Vec<ScatterPoint> = rows
        .iter()
        .zip(xs.iter().zip(&ys))
        .map(|(row, (x, y))| {
            let highlight = if config.highlight_players.iter().any(|p| *p == row.player) {
                Highlight::Player
            } else if config.highlight_teams.iter().any(|t| *t == row.team) {
                Highlight::Team
            } else {
                Highlight::None
            };
            ScatterPoint {
                player: row.player.clone(),
                team: row.team.clone(),
                x: *x,
                y: *y,
                highlight,
            }
        })
        .collect();

    let (trend, zones) = match config.overlay {
        Overlay::TrendLine => (fit_trend(&xs, &ys), None),
        Overlay::Zones => (None, zone_lines(&xs, &ys, config.zone_kind)),
    };

    Ok(ScatterPlot {
        x_stat: config.x_stat.clone(),
        y_stat: config.y_stat.clone(),
        points,
        trend,
        zones,
    })
}

/// OLS fit of y on x with an intercept column. Returns `None` when the fit
/// is degenerate (fewer than two points, or no variance in x).
pub fn fit_trend(xs: &[f64], ys: &[f64]) -> Option<TrendLine> {
    if xs.len() < 2 || xs.len() != ys.len() {
        return None;
    }
    if xs.iter().all(|x| *x == xs[0]) {
        return None;
    }

    // Row-major [response, intercept, x] per observation.
    let mut data = Vec::with_capacity(xs.len() * 3);
    for (x, y) in xs.iter().zip(ys) {
        data.push(*y);
        data.push(1.0);
        data.push(*x);
    }

    let model = fit_low_level_regression_model(&data, xs.len(), 3).ok()?;
    let params = model.parameters();
    if params.len() < 2 {
        return None;
    }
    Some(TrendLine {
        intercept: params[0],
        slope: params[1],
        r_squared: model.rsquared(),
    })
}

fn zone_lines(xs: &[f64], ys: &[f64], kind: ZoneKind) -> Option<ZoneLines> {
    if xs.is_empty() {
        return None;
    }
    let (v, h) = match kind {
        ZoneKind::Median => (median(xs), median(ys)),
        ZoneKind::Average => (mean(xs), mean(ys)),
    };
    Some(ZoneLines { kind, h, v })
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}
