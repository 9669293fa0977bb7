//! Wave spawn scheduling
//!
//! The world is cut into horizontal level bands. Every band the player has
//! reached keeps its own wave clock; when a clock runs out the band queues a
//! wave of hostiles on randomly chosen spawn points. Each wave is one hull
//! bigger than the last and the clock tightens by a second, down to a floor.
//!
//! Queued hostiles wait as pending spawns until their placement rectangle is
//! clear of active hostiles and the player. There is no retry limit.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::{GameEvent, HostileUnit, WorldBounds};
use crate::consts::{
    FIRST_SPAWN_OFFSET, INITIAL_WAVE_INTERVAL, INITIAL_WAVE_SIZE, SPAWN_TURN_LIMIT_MAX,
    SPAWN_TURN_LIMIT_MIN, WAVE_INTERVAL_FLOOR, WAVE_INTERVAL_STEP,
};
use crate::error::{Error, Result};
use crate::tuning::Tuning;

/// Wave clock for one level band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelWaveState {
    /// Hostiles in the next wave
    pub wave_size: usize,
    /// Seconds since the last wave
    pub elapsed: f32,
    /// Seconds between waves
    pub interval: f32,
}

impl Default for LevelWaveState {
    fn default() -> Self {
        Self {
            wave_size: INITIAL_WAVE_SIZE,
            elapsed: 0.0,
            interval: INITIAL_WAVE_INTERVAL,
        }
    }
}

impl LevelWaveState {
    pub fn is_due(&self) -> bool {
        self.elapsed >= self.interval
    }

    /// Reset the clock and tighten the interval
    fn restart_clock(&mut self) {
        self.interval = (self.interval - WAVE_INTERVAL_STEP).max(WAVE_INTERVAL_FLOOR);
        self.elapsed = 0.0;
    }
}

/// Band index for a vertical position: distance up from the canvas bottom over band height
pub fn level_index(player_y: f32, bounds: WorldBounds, band_height: f32) -> u32 {
    let depth = bounds.height - player_y;
    if !(depth.is_finite() && band_height > 0.0) || depth <= 0.0 {
        return 0;
    }
    (depth / band_height).floor() as u32
}

/// Pick `count` distinct indices into `available` spawn points, uniformly at random
pub fn select_spawn_indices<R: Rng + ?Sized>(
    rng: &mut R,
    level: u32,
    available: usize,
    count: usize,
) -> Result<Vec<usize>> {
    if available == 0 {
        return Err(Error::NoSpawnPoints { level });
    }
    let amount = if count > available {
        log::warn!(
            "level {level}: wave of {count} exceeds {available} spawn points, capping"
        );
        available
    } else {
        count
    };
    Ok(index::sample(rng, available, amount).into_vec())
}

/// Per-band wave clocks plus the pending spawn queue
#[derive(Debug, Clone, Default)]
pub struct WaveScheduler {
    levels: BTreeMap<u32, LevelWaveState>,
    current_level: u32,
    highest_level: u32,
    pending: Vec<HostileUnit>,
}

impl WaveScheduler {
    pub fn new() -> Self {
        let mut levels = BTreeMap::new();
        levels.insert(0, LevelWaveState::default());
        Self {
            levels,
            ..Default::default()
        }
    }

    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    pub fn highest_level(&self) -> u32 {
        self.highest_level
    }

    /// Wave state for a band, if it has been visited
    pub fn level(&self, level: u32) -> Option<&LevelWaveState> {
        self.levels.get(&level)
    }

    pub fn level_mut(&mut self, level: u32) -> &mut LevelWaveState {
        self.levels.entry(level).or_default()
    }

    /// Hostiles queued but not yet placed
    pub fn pending(&self) -> &[HostileUnit] {
        &self.pending
    }

    /// Record the band the player is in. Returns the new band on a change.
    ///
    /// Entering any band above the first copies the interval of the band
    /// below, so difficulty carries over.
    pub fn observe_level(&mut self, level: u32) -> Option<u32> {
        if level == self.current_level {
            return None;
        }
        self.current_level = level;
        if level > self.highest_level {
            self.highest_level = level;
        }
        if level > 0 {
            let inherited = self.level_mut(level - 1).interval;
            self.level_mut(level).interval = inherited;
        }
        log::info!(
            "Entered level {} (highest {})",
            level,
            self.highest_level
        );
        Some(level)
    }

    /// Advance every reached band's clock and queue any waves that fall due
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        spawn_points: &BTreeMap<u32, Vec<Vec2>>,
        tuning: &Tuning,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        for level in 0..=self.highest_level {
            let state = self.levels.entry(level).or_default();
            state.elapsed += dt;
            if !state.is_due() {
                continue;
            }
            state.restart_clock();

            let points = spawn_points.get(&level).map(Vec::as_slice).unwrap_or(&[]);
            if let Err(err) = self.queue_wave(level, points, tuning, rng, events) {
                log::error!("Skipping wave: {err}");
            }
        }
    }

    /// Queue one wave for `level` on its registered spawn points
    pub fn queue_wave<R: Rng + ?Sized>(
        &mut self,
        level: u32,
        points: &[Vec2],
        tuning: &Tuning,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) -> Result<usize> {
        let wave_size = self.level_mut(level).wave_size;
        let chosen = select_spawn_indices(rng, level, points.len(), wave_size)?;

        for &point_index in &chosen {
            let Some(&point) = points.get(point_index) else {
                continue;
            };
            let nudge = if point_index == 0 { FIRST_SPAWN_OFFSET } else { 0.0 };
            let pos = point + Vec2::new(nudge, tuning.hostile_size.y / 5.0);
            let turn_limit = rng.random_range(SPAWN_TURN_LIMIT_MIN..=SPAWN_TURN_LIMIT_MAX) as f32;
            self.pending.push(HostileUnit::new(
                pos,
                tuning.hostile_size,
                tuning.hostile_speed,
                turn_limit,
            ));
        }

        let state = self.level_mut(level);
        state.wave_size += 1;
        log::info!(
            "Level {}: queued wave of {}, next wave {} in {}s",
            level,
            chosen.len(),
            state.wave_size,
            state.interval
        );
        events.push(GameEvent::WaveQueued {
            level,
            count: chosen.len(),
        });
        Ok(chosen.len())
    }

    /// Move pending spawns whose footprint is clear into the active set.
    /// Returns how many were placed.
    pub fn promote(
        &mut self,
        active: &mut Vec<HostileUnit>,
        player_rect: &Rect,
        events: &mut Vec<GameEvent>,
    ) -> usize {
        let before = active.len();
        let mut waiting = Vec::with_capacity(self.pending.len());
        for unit in self.pending.drain(..) {
            let rect = unit.rect();
            let blocked = rect.overlaps(player_rect)
                || active.iter().any(|other| rect.overlaps(&other.rect()));
            if blocked {
                waiting.push(unit);
            } else {
                events.push(GameEvent::HostileSpawned { pos: unit.pos });
                active.push(unit);
            }
        }
        self.pending = waiting;
        active.len() - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: WorldBounds = WorldBounds::new(1200.0, 4680.0);

    fn points(count: usize) -> Vec<Vec2> {
        (0..count)
            .map(|i| Vec2::new(100.0 + i as f32 * 150.0, 300.0))
            .collect()
    }

    fn far_player() -> Rect {
        Rect::new(Vec2::new(5000.0, 5000.0), Vec2::new(50.0, 53.0))
    }

    #[test]
    fn test_level_index() {
        assert_eq!(level_index(4680.0, BOUNDS, 1560.0), 0);
        assert_eq!(level_index(4000.0, BOUNDS, 1560.0), 0);
        assert_eq!(level_index(3120.0, BOUNDS, 1560.0), 1);
        assert_eq!(level_index(100.0, BOUNDS, 1560.0), 2);
        assert_eq!(level_index(5000.0, BOUNDS, 1560.0), 0);
    }

    #[test]
    fn test_wave_due_queues_distinct_points() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut scheduler = WaveScheduler::new();
        let mut spawn_points = BTreeMap::new();
        spawn_points.insert(0, points(5));
        let mut events = Vec::new();

        scheduler.level_mut(0).elapsed = 59.99;
        scheduler.update(0.02, &spawn_points, &Tuning::default(), &mut rng, &mut events);

        assert_eq!(scheduler.pending().len(), 3);
        let mut xs: Vec<i32> = scheduler.pending().iter().map(|h| h.pos.x as i32).collect();
        xs.sort_unstable();
        xs.dedup();
        assert_eq!(xs.len(), 3);

        let state = scheduler.level(0).unwrap();
        assert_eq!(state.wave_size, 4);
        assert_eq!(state.interval, 59.0);
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(events, vec![GameEvent::WaveQueued { level: 0, count: 3 }]);
    }

    #[test]
    fn test_spawn_placement_offsets() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut scheduler = WaveScheduler::new();
        let tuning = Tuning::default();
        scheduler.level_mut(0).wave_size = 2;
        let pts = points(2);
        let mut events = Vec::new();

        let queued = scheduler
            .queue_wave(0, &pts, &tuning, &mut rng, &mut events)
            .unwrap();
        assert_eq!(queued, 2);

        let lift = tuning.hostile_size.y / 5.0;
        let pending = scheduler.pending();
        assert!(pending.iter().any(|h| h.pos == pts[0] + Vec2::new(FIRST_SPAWN_OFFSET, lift)));
        assert!(pending.iter().any(|h| h.pos == pts[1] + Vec2::new(0.0, lift)));
        for unit in pending {
            assert!((1.0..=5.0).contains(&unit.turn_limit));
        }
    }

    #[test]
    fn test_interval_floor() {
        let mut state = LevelWaveState {
            interval: 10.5,
            ..Default::default()
        };
        state.restart_clock();
        assert_eq!(state.interval, 10.0);
        state.restart_clock();
        assert_eq!(state.interval, 10.0);
    }

    #[test]
    fn test_missing_spawn_points_skip_wave() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut scheduler = WaveScheduler::new();
        let mut events = Vec::new();
        scheduler.level_mut(0).elapsed = 60.0;

        scheduler.update(0.0, &BTreeMap::new(), &Tuning::default(), &mut rng, &mut events);

        assert!(scheduler.pending().is_empty());
        assert!(events.is_empty());
        let state = scheduler.level(0).unwrap();
        assert_eq!(state.wave_size, 3);
        assert_eq!(state.interval, 59.0);
    }

    #[test]
    fn test_select_rejects_empty() {
        let mut rng = Pcg32::seed_from_u64(2);
        let err = select_spawn_indices(&mut rng, 4, 0, 3).unwrap_err();
        assert!(matches!(err, Error::NoSpawnPoints { level: 4 }));
    }

    #[test]
    fn test_select_caps_to_available() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut chosen = select_spawn_indices(&mut rng, 0, 2, 5).unwrap();
        chosen.sort_unstable();
        assert_eq!(chosen, vec![0, 1]);
    }

    #[test]
    fn test_level_change_inherits_interval() {
        let mut scheduler = WaveScheduler::new();
        scheduler.level_mut(0).interval = 42.0;
        assert_eq!(scheduler.observe_level(1), Some(1));
        assert_eq!(scheduler.level(1).unwrap().interval, 42.0);
        assert_eq!(scheduler.highest_level(), 1);

        assert_eq!(scheduler.observe_level(1), None);
        assert_eq!(scheduler.observe_level(0), Some(0));
        assert_eq!(scheduler.highest_level(), 1);
    }

    #[test]
    fn test_reached_levels_all_tick() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut scheduler = WaveScheduler::new();
        scheduler.observe_level(2);
        scheduler.observe_level(0);
        let mut events = Vec::new();
        scheduler.update(1.5, &BTreeMap::new(), &Tuning::default(), &mut rng, &mut events);
        for level in 0..=2 {
            assert_eq!(scheduler.level(level).unwrap().elapsed, 1.5);
        }
        assert!(scheduler.level(3).is_none());
    }

    #[test]
    fn test_promotion_waits_for_clear_footprint() {
        let mut scheduler = WaveScheduler::new();
        let size = Vec2::new(40.0, 40.0);
        scheduler.pending.push(HostileUnit::new(Vec2::new(100.0, 100.0), size, 100.0, 2.0));
        scheduler.pending.push(HostileUnit::new(Vec2::new(500.0, 100.0), size, 100.0, 2.0));
        let mut active = vec![HostileUnit::new(Vec2::new(110.0, 110.0), size, 100.0, 2.0)];
        let mut events = Vec::new();

        assert_eq!(scheduler.promote(&mut active, &far_player(), &mut events), 1);
        assert_eq!(active.len(), 2);
        assert_eq!(scheduler.pending().len(), 1);
        assert_eq!(events, vec![GameEvent::HostileSpawned { pos: Vec2::new(500.0, 100.0) }]);

        // Still blocked: stays pending indefinitely
        for _ in 0..100 {
            scheduler.promote(&mut active, &far_player(), &mut events);
        }
        assert_eq!(scheduler.pending().len(), 1);

        active.remove(0);
        assert_eq!(scheduler.promote(&mut active, &far_player(), &mut events), 1);
        assert!(scheduler.pending().is_empty());
    }

    #[test]
    fn test_promotion_blocked_by_player() {
        let mut scheduler = WaveScheduler::new();
        scheduler
            .pending
            .push(HostileUnit::new(Vec2::new(100.0, 100.0), Vec2::new(40.0, 40.0), 100.0, 2.0));
        let player = Rect::new(Vec2::new(120.0, 120.0), Vec2::new(50.0, 53.0));
        let mut active = Vec::new();
        assert_eq!(scheduler.promote(&mut active, &player, &mut Vec::new()), 0);
        assert_eq!(scheduler.pending().len(), 1);
    }
}
