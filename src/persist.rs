use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::dataset::PlayerTable;
use crate::pizza::PizzaSelection;
use crate::rankings::RankConfig;
use crate::scatter::{Overlay, ZoneKind};
use crate::state::AppState;

const CACHE_DIR: &str = "scout_terminal";
const CACHE_FILE: &str = "snapshot.json";
const CACHE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotFile {
    version: u32,
    #[serde(default)]
    saved_at: Option<u64>,
    table: PlayerTable,
    #[serde(default)]
    view: Option<ViewSettings>,
}

/// The slice of session state worth keeping between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewSettings {
    pub selection: PizzaSelection,
    pub overlay: Overlay,
    pub zone_kind: ZoneKind,
    pub highlight_teams: Vec<String>,
    pub highlight_players: Vec<String>,
    pub annotations: HashMap<String, String>,
    pub config: RankConfig,
}

pub struct Snapshot {
    pub table: PlayerTable,
    pub view: Option<ViewSettings>,
    pub saved_at: Option<SystemTime>,
}

pub fn load_snapshot() -> Option<Snapshot> {
    let path = cache_path()?;
    let raw = fs::read_to_string(&path).ok()?;
    let file = serde_json::from_str::<SnapshotFile>(&raw).ok()?;
    if file.version != CACHE_VERSION {
        return None;
    }
    Some(Snapshot {
        table: file.table,
        view: file.view,
        saved_at: file.saved_at.and_then(system_time_from_secs),
    })
}

pub fn save_from_state(state: &AppState) -> Result<()> {
    let Some(path) = cache_path() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }

    let file = SnapshotFile {
        version: CACHE_VERSION,
        saved_at: system_time_to_secs(SystemTime::now()),
        table: state.table.clone(),
        view: Some(ViewSettings {
            selection: state.selection.clone(),
            overlay: state.overlay,
            zone_kind: state.zone_kind,
            highlight_teams: state.highlight_teams.clone(),
            highlight_players: state.highlight_players.clone(),
            annotations: state.annotations.clone(),
            config: state.config.clone(),
        }),
    };

    let json = serde_json::to_string(&file).context("serialize snapshot")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).context("write snapshot")?;
    fs::rename(&tmp, &path).context("swap snapshot")?;
    Ok(())
}

pub fn apply_view_settings(state: &mut AppState, view: ViewSettings) {
    state.selection = view.selection;
    state.selection.retain_known(&state.table);
    state.overlay = view.overlay;
    state.zone_kind = view.zone_kind;
    state.highlight_teams = view.highlight_teams;
    state.highlight_players = view.highlight_players;
    state.annotations = view.annotations;
    state.config = view.config;
}

/// Load a dataset from an explicit JSON file (the `SCOUT_DATASET` override).
pub fn load_table_from_path(path: &Path) -> Result<PlayerTable> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read dataset {}", path.display()))?;
    let table = serde_json::from_str::<PlayerTable>(&raw)
        .with_context(|| format!("parse dataset {}", path.display()))?;
    Ok(table)
}

fn cache_path() -> Option<PathBuf> {
    // Prefer XDG cache.
    if let Ok(base) = std::env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(CACHE_DIR).join(CACHE_FILE));
        }
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".cache")
            .join(CACHE_DIR)
            .join(CACHE_FILE),
    )
}

fn system_time_to_secs(time: SystemTime) -> Option<u64> {
    time.duration_since(UNIX_EPOCH).ok().map(|d| d.as_secs())
}

fn system_time_from_secs(secs: u64) -> Option<SystemTime> {
    UNIX_EPOCH.checked_add(std::time::Duration::from_secs(secs))
}
