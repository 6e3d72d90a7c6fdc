//! Session snapshot and its JSON encoding
//!
//! The persisted record keeps the shape the browser version of the game stored
//! under its local-storage key, so existing saves load unchanged:
//!
//! ```text
//! {"grid":[[{"value":2,"meta":{"id":1,"position":{"row":0,"col":0},"merged":false,"isNew":false}},...],...],
//!  "score":0,"gameState":"intialized"}
//! ```
//!
//! Tile ids are not read back; loading mints fresh ones. Positions are taken
//! from where a tile sits in the nested arrays, not from its `position` field.

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::types::{Position, SessionState, GRID_SIZE};

#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("grid must have 4 rows, found {0}")]
    Rows(usize),
    #[error("grid row {row} must have 4 tiles, found {len}")]
    Columns { row: usize, len: usize },
    #[error("tile value {0} is neither 0 nor a power of two")]
    TileValue(u32),
    #[error("unknown game state {0:?}")]
    GameState(String),
}

/// Everything needed to resume a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub grid: Grid,
    pub score: u32,
    pub state: SessionState,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(&SnapshotRecord::from(self))?)
    }

    /// Decode and validate a persisted record
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let record: SnapshotRecord = serde_json::from_str(raw)?;
        record.try_into()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotRecord {
    grid: Vec<Vec<TileRecord>>,
    score: u32,
    #[serde(rename = "gameState")]
    game_state: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct TileRecord {
    value: u32,
    meta: TileMetaRecord,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TileMetaRecord {
    #[serde(skip_deserializing)]
    id: u64,
    #[serde(default)]
    position: PositionRecord,
    #[serde(default)]
    merged: bool,
    #[serde(default)]
    is_new: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PositionRecord {
    row: u8,
    col: u8,
}

impl From<&SessionSnapshot> for SnapshotRecord {
    fn from(snap: &SessionSnapshot) -> Self {
        let grid = (0..GRID_SIZE)
            .map(|row| {
                (0..GRID_SIZE)
                    .map(|col| {
                        let index = Position::new(row as u8, col as u8).index();
                        let tile = snap.grid.cells()[index];
                        TileRecord {
                            value: tile.value(),
                            meta: TileMetaRecord {
                                id: tile.id().0,
                                position: PositionRecord {
                                    row: tile.position().row,
                                    col: tile.position().col,
                                },
                                merged: tile.merged(),
                                is_new: tile.is_new(),
                            },
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            grid,
            score: snap.score,
            game_state: snap.state.as_str().to_string(),
        }
    }
}

impl TryFrom<SnapshotRecord> for SessionSnapshot {
    type Error = SnapshotError;

    fn try_from(record: SnapshotRecord) -> Result<Self, Self::Error> {
        if record.grid.len() != GRID_SIZE {
            return Err(SnapshotError::Rows(record.grid.len()));
        }

        let mut grid = Grid::empty();
        for (row, tiles) in record.grid.iter().enumerate() {
            if tiles.len() != GRID_SIZE {
                return Err(SnapshotError::Columns {
                    row,
                    len: tiles.len(),
                });
            }
            for (col, t) in tiles.iter().enumerate() {
                if !is_tile_value(t.value) {
                    return Err(SnapshotError::TileValue(t.value));
                }
                if t.value == 0 {
                    continue;
                }
                let position = Position::new(row as u8, col as u8);
                if let Some(mut tile) = grid.place(t.value, position) {
                    if t.meta.merged {
                        tile = tile.with_merged();
                    }
                    if t.meta.is_new {
                        tile = tile.with_new();
                    }
                    grid.replace(tile);
                }
            }
        }

        let state = SessionState::from_str(&record.game_state)
            .ok_or(SnapshotError::GameState(record.game_state))?;

        Ok(Self {
            grid,
            score: record.score,
            state,
        })
    }
}

/// 0 (empty) or a power of two of at least 2
fn is_tile_value(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}
