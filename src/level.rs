//! Static level geometry
//!
//! Supplied once by the level loader: canvas bounds, player start, terrain
//! and the spawn points registered for each level band.

use std::collections::BTreeMap;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{LEVEL_BAND_HEIGHT, TILE_SIZE};
use crate::error::{Error, Result};
use crate::sim::{ObstacleKind, Rect, WorldBounds};

/// One terrain tile as authored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub kind: ObstacleKind,
    pub rect: Rect,
}

/// A complete level description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelLayout {
    pub bounds: WorldBounds,
    /// Player hull centre at the start of a run
    pub player_start: Vec2,
    pub obstacles: Vec<ObstacleSpec>,
    /// Spawn points keyed by level band, in registration order
    #[serde(default)]
    pub spawn_points: BTreeMap<u32, Vec<Vec2>>,
}

impl LevelLayout {
    pub fn from_json(json: &str) -> Result<Self> {
        let layout: Self = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        let WorldBounds { width, height } = self.bounds;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(Error::InvalidLayout(format!(
                "bounds must be positive, got {width}x{height}"
            )));
        }
        let start = self.player_start;
        if !(0.0..=width).contains(&start.x) || !(0.0..=height).contains(&start.y) {
            return Err(Error::InvalidLayout(format!(
                "player start ({}, {}) is outside the canvas",
                start.x, start.y
            )));
        }
        if let Some(spec) = self
            .obstacles
            .iter()
            .find(|spec| !(spec.rect.size.x > 0.0 && spec.rect.size.y > 0.0))
        {
            return Err(Error::InvalidLayout(format!(
                "{:?} obstacle at ({}, {}) has no area",
                spec.kind, spec.rect.origin.x, spec.rect.origin.y
            )));
        }
        for (level, points) in &self.spawn_points {
            if points.is_empty() {
                log::warn!("level {level} registers an empty spawn point list");
            }
        }
        Ok(())
    }

    /// Three-band practice arena used by the headless runner
    pub fn demo() -> Self {
        const BANDS: u32 = 3;
        let width = 1200.0;
        let height = LEVEL_BAND_HEIGHT * BANDS as f32;
        let tile = Vec2::splat(TILE_SIZE);

        let mut obstacles = Vec::new();
        let mut spawn_points = BTreeMap::new();
        let mut add = |kind, x: f32, y: f32| {
            obstacles.push(ObstacleSpec {
                kind,
                rect: Rect::new(Vec2::new(x, y), tile),
            });
        };

        for band in 0..BANDS {
            let top = height - (band + 1) as f32 * LEVEL_BAND_HEIGHT;

            let points: Vec<Vec2> = (0..5)
                .map(|i| Vec2::new(150.0 + i as f32 * 225.0, top + 100.0))
                .collect();
            for point in &points {
                add(ObstacleKind::SpawnMarker, point.x, point.y);
            }
            spawn_points.insert(band, points);

            // Brick wall with a gap in the middle
            let mut x = 90.0;
            while x < 1110.0 {
                if !(540.0..660.0).contains(&x) {
                    add(ObstacleKind::Destructible, x, top + 600.0);
                }
                x += TILE_SIZE;
            }

            for x in [300.0, 330.0, 870.0, 900.0] {
                add(ObstacleKind::Barrier, x, top + 1000.0);
            }

            for i in 0..4 {
                let offset = i as f32 * TILE_SIZE;
                add(ObstacleKind::Hazard, 150.0 + offset, top + 1300.0);
                add(ObstacleKind::Hazard, 930.0 + offset, top + 1300.0);
            }
        }

        Self {
            bounds: WorldBounds::new(width, height),
            player_start: Vec2::new(width / 2.0, height - 80.0),
            obstacles,
            spawn_points,
        }
    }
}
