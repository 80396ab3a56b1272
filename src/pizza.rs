//! Pizza chart model: four fixed category wedges of percentile ranks.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::dataset::{PlayerTable, StatsError};
use crate::rankings::{self, RankConfig, RankOutcome, RankTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatCategory {
    Defense,
    Possession,
    Playmaking,
    Attack,
}

impl StatCategory {
    /// Wedge order is fixed: Defense, Possession, Playmaking, Attack.
    pub const ORDER: [StatCategory; 4] = [
        StatCategory::Defense,
        StatCategory::Possession,
        StatCategory::Playmaking,
        StatCategory::Attack,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatCategory::Defense => "Defense",
            StatCategory::Possession => "Possession",
            StatCategory::Playmaking => "Playmaking",
            StatCategory::Attack => "Attack",
        }
    }

    pub fn colour(self) -> Color {
        match self {
            StatCategory::Defense => Color::Rgb(0x1a, 0x78, 0xcf),
            StatCategory::Possession => Color::Rgb(0xff, 0x93, 0x00),
            StatCategory::Playmaking => Color::Rgb(0x2b, 0xa0, 0x2b),
            StatCategory::Attack => Color::Rgb(0xd7, 0x02, 0x32),
        }
    }

    pub fn next(self) -> Self {
        match self {
            StatCategory::Defense => StatCategory::Possession,
            StatCategory::Possession => StatCategory::Playmaking,
            StatCategory::Playmaking => StatCategory::Attack,
            StatCategory::Attack => StatCategory::Defense,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            StatCategory::Defense => StatCategory::Attack,
            StatCategory::Possession => StatCategory::Defense,
            StatCategory::Playmaking => StatCategory::Possession,
            StatCategory::Attack => StatCategory::Playmaking,
        }
    }
}

/// Short display labels for stats whose column names read poorly on a chart.
static STAT_LABELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Tkl+Int", "Tackles + Int"),
        ("TklWinPoss", "Tkl Win Poss"),
        ("DrbTkl%", "Succ. Challenge %"),
        ("AerialWin%", "Aerial Win %"),
        ("Clr", "Clearances"),
        ("PassesAttempted", "Passes Att"),
        ("TotCmp%", "Pass Cmp %"),
        ("LiveTouch", "Live Touches"),
        ("ProgCarries", "Prog Carries"),
        ("CarriesToFinalThird", "Carries to 1/3"),
        ("ProgPasses", "Prog Passes"),
        ("SuccDrb", "Succ. Dribbles"),
        ("KeyPasses", "Key Passes"),
        ("ProgPassesRec", "Prog Passes Rec"),
        ("SoT%", "SoT %"),
        ("npG-xG", "npG - xG"),
    ])
});

/// Display label for a stat: the mapping above wins, then the column's own
/// label, then the raw name.
pub fn display_label(table: &PlayerTable, stat: &str) -> String {
    if let Some(mapped) = STAT_LABELS.get(stat) {
        return (*mapped).to_string();
    }
    table
        .column(stat)
        .ok()
        .and_then(|c| c.label.clone())
        .unwrap_or_else(|| stat.to_string())
}

/// Stat picks per category tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PizzaSelection {
    pub defense: Vec<String>,
    pub possession: Vec<String>,
    pub playmaking: Vec<String>,
    pub attack: Vec<String>,
}

impl Default for PizzaSelection {
    fn default() -> Self {
        let owned = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        Self {
            defense: owned(&["Tkl+Int", "TklWinPoss", "DrbTkl%", "AerialWin%", "Clr"]),
            possession: owned(&[
                "PassesAttempted",
                "TotCmp%",
                "LiveTouch",
                "ProgCarries",
                "Switches",
            ]),
            playmaking: owned(&[
                "CarriesToFinalThird",
                "ProgPasses",
                "SuccDrb",
                "KeyPasses",
                "SCA90",
            ]),
            attack: owned(&["npxG", "Shots", "SoT%", "npG-xG", "ProgPassesRec"]),
        }
    }
}

impl PizzaSelection {
    pub fn stats_for(&self, category: StatCategory) -> &Vec<String> {
        match category {
            StatCategory::Defense => &self.defense,
            StatCategory::Possession => &self.possession,
            StatCategory::Playmaking => &self.playmaking,
            StatCategory::Attack => &self.attack,
        }
    }

    pub fn stats_for_mut(&mut self, category: StatCategory) -> &mut Vec<String> {
        match category {
            StatCategory::Defense => &mut self.defense,
            StatCategory::Possession => &mut self.possession,
            StatCategory::Playmaking => &mut self.playmaking,
            StatCategory::Attack => &mut self.attack,
        }
    }

    pub fn toggle(&mut self, category: StatCategory, stat: &str) {
        let stats = self.stats_for_mut(category);
        match stats.iter().position(|s| s == stat) {
            Some(index) => {
                stats.remove(index);
            }
            None => stats.push(stat.to_string()),
        }
    }

    /// Drop picks that are not present in the table (a stale snapshot or a
    /// regenerated demo dataset can invalidate old selections).
    pub fn retain_known(&mut self, table: &PlayerTable) {
        for category in StatCategory::ORDER {
            self.stats_for_mut(category)
                .retain(|s| table.stat_index(s).is_ok());
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PizzaSlice {
    pub stat: String,
    pub label: String,
    pub category: StatCategory,
    pub outcome: RankOutcome,
}

/// Ranked pizza for one player: slices concatenated in category order plus
/// the merged audit table across all four categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PizzaChart {
    pub player: String,
    pub team: String,
    pub slices: Vec<PizzaSlice>,
    pub table: RankTable,
}

impl PizzaChart {
    pub fn slices_for(&self, category: StatCategory) -> Vec<&PizzaSlice> {
        self.slices
            .iter()
            .filter(|s| s.category == category)
            .collect()
    }

    /// One colour per slice, in slice order. Sized to the slice list by
    /// construction, which is what the radial renderer requires.
    pub fn slice_colours(&self) -> Vec<Color> {
        self.slices.iter().map(|s| s.category.colour()).collect()
    }
}

/// Rank every selected stat, one ranking call per category in wedge order,
/// and concatenate the results.
pub fn build_pizza(
    table: &PlayerTable,
    selection: &PizzaSelection,
    player: &str,
    team: &str,
    config: &RankConfig,
) -> Result<PizzaChart, StatsError> {
    let mut slices = Vec::new();
    let mut audit: Option<RankTable> = None;

    for category in StatCategory::ORDER {
        let stats = selection.stats_for(category);
        let ranked = rankings::rank_statistics(table, stats, player, config)?;

        for (stat, outcome) in ranked.stats.iter().zip(&ranked.target) {
            slices.push(PizzaSlice {
                stat: stat.clone(),
                label: display_label(table, stat),
                category,
                outcome: *outcome,
            });
        }

        match &mut audit {
            Some(merged) => merged.merge(&ranked.table),
            None => audit = Some(ranked.table),
        }
    }

    Ok(PizzaChart {
        player: player.to_string(),
        team: team.to_string(),
        slices,
        table: audit.unwrap_or_default(),
    })
}
