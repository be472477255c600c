//! Tuning knobs for level generation.

/// Aggregated tuning knobs controlling every adjustable aspect of maze generation.
#[derive(Clone, Debug)]
pub struct GeneratorTuning {
    /// Grid dimensions and their per-level growth.
    pub grid: GridTuning,
    /// Wall probability model.
    pub density: DensityTuning,
    /// Special-tile counts per level.
    pub tiles: TileTuning,
    /// Countdown length per level.
    pub time: TimeTuning,
    /// Rejection-sampling draws allowed per grid cell when placing one tile.
    pub placement_attempts_per_cell: u32,
    /// Factor applied to the wall density after special-tile placement runs out of draws.
    pub density_relief: f64,
    /// Upper bound on discarded generation attempts before giving up.
    pub max_attempts: u32,
    /// Largest grid, in cells, the generator will allocate.
    pub max_cells: u64,
    /// How the start-to-goal path is guaranteed.
    pub repair: ConnectivityRepair,
    /// What happens when a generated grid leaves the goal unreachable.
    pub fallback: FallbackPolicy,
}

impl Default for GeneratorTuning {
    fn default() -> Self {
        Self {
            grid: GridTuning::default(),
            density: DensityTuning::default(),
            tiles: TileTuning::default(),
            time: TimeTuning::default(),
            placement_attempts_per_cell: 16,
            density_relief: 0.5,
            max_attempts: 32,
            max_cells: 1 << 20,
            repair: ConnectivityRepair::default(),
            fallback: FallbackPolicy::default(),
        }
    }
}

impl GeneratorTuning {
    /// Grid dimensions for `level` as `(columns, rows)`, or `None` when they overflow `u32`.
    #[must_use]
    pub fn dimensions(&self, level: u32) -> Option<(u32, u32)> {
        let growth = self.grid.growth_per_level.checked_mul(level)?;
        Some((
            self.grid.base_columns.checked_add(growth)?,
            self.grid.base_rows.checked_add(growth)?,
        ))
    }

    /// Probability that the cell at `(row, column)` becomes a wall on `level`.
    ///
    /// The result is clamped into `[0, 1]`.
    #[must_use]
    pub fn wall_probability(&self, level: u32, row: u32, column: u32) -> f64 {
        let density = &self.density;
        let wave = (f64::from(row) * f64::from(column) * density.wave_frequency).sin();
        let probability =
            density.base + density.per_level * f64::from(level) + density.wave_amplitude * wave;
        probability.clamp(0.0, 1.0)
    }

    /// Special-tile counts for `level`.
    #[must_use]
    pub fn tile_counts(&self, level: u32) -> TileCounts {
        let tiles = &self.tiles;
        TileCounts {
            traps: tiles.traps_per_level.saturating_mul(level),
            teleporter_pairs: scaled(
                level,
                tiles.teleporter_pairs_divisor,
                tiles.teleporter_pairs_base,
            ),
            key_lock_pairs: scaled(level, tiles.key_lock_pairs_divisor, tiles.key_lock_pairs_base),
        }
    }

    /// Countdown for `level`, in seconds.
    #[must_use]
    pub fn time_limit(&self, level: u32) -> u32 {
        self.time
            .base_seconds
            .saturating_add(self.time.seconds_per_level.saturating_mul(level))
    }

    /// Draws allowed when placing a single tile on a grid with `area` cells.
    #[must_use]
    pub fn placement_budget(&self, area: usize) -> usize {
        usize::try_from(self.placement_attempts_per_cell)
            .unwrap_or(usize::MAX)
            .saturating_mul(area)
    }
}

fn scaled(level: u32, divisor: u32, base: u32) -> u32 {
    level.checked_div(divisor).unwrap_or(0).saturating_add(base)
}

/// Grid size parameters.
#[derive(Clone, Debug)]
pub struct GridTuning {
    /// Rows on a hypothetical level zero.
    pub base_rows: u32,
    /// Columns on a hypothetical level zero.
    pub base_columns: u32,
    /// Rows and columns added per level.
    pub growth_per_level: u32,
}

impl Default for GridTuning {
    fn default() -> Self {
        Self {
            base_rows: 15,
            base_columns: 20,
            growth_per_level: 2,
        }
    }
}

/// Wall density model `base + per_level * level + wave_amplitude * sin(row * column * wave_frequency)`.
#[derive(Clone, Debug)]
pub struct DensityTuning {
    /// Constant term.
    pub base: f64,
    /// Increase per level; higher values make later levels denser.
    pub per_level: f64,
    /// Amplitude of the positional sine ripple.
    pub wave_amplitude: f64,
    /// Frequency applied to `row * column` inside the ripple.
    pub wave_frequency: f64,
}

impl Default for DensityTuning {
    fn default() -> Self {
        Self {
            base: 0.2,
            per_level: 0.015,
            wave_amplitude: 0.1,
            wave_frequency: 0.1,
        }
    }
}

/// Special-tile count formulas.
///
/// Pair counts follow `level / divisor + base`; a zero divisor drops the level term.
#[derive(Clone, Debug)]
pub struct TileTuning {
    /// Traps added per level.
    pub traps_per_level: u32,
    /// Teleporter pairs present on every level.
    pub teleporter_pairs_base: u32,
    /// Levels per additional teleporter pair.
    pub teleporter_pairs_divisor: u32,
    /// Key/lock pairs present on every level.
    pub key_lock_pairs_base: u32,
    /// Levels per additional key/lock pair.
    pub key_lock_pairs_divisor: u32,
}

impl Default for TileTuning {
    fn default() -> Self {
        Self {
            traps_per_level: 3,
            teleporter_pairs_base: 1,
            teleporter_pairs_divisor: 2,
            key_lock_pairs_base: 1,
            key_lock_pairs_divisor: 3,
        }
    }
}

/// Countdown parameters.
#[derive(Clone, Debug)]
pub struct TimeTuning {
    /// Seconds granted on a hypothetical level zero.
    pub base_seconds: u32,
    /// Seconds added per level.
    pub seconds_per_level: u32,
}

impl Default for TimeTuning {
    fn default() -> Self {
        Self {
            base_seconds: 60,
            seconds_per_level: 30,
        }
    }
}

/// Special-tile demand for a single level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileCounts {
    /// Number of traps.
    pub traps: u32,
    /// Number of teleporter pairs.
    pub teleporter_pairs: u32,
    /// Number of key/lock pairs.
    pub key_lock_pairs: u32,
}

impl TileCounts {
    /// Cells the tiles occupy once placed.
    #[must_use]
    pub fn cells(&self) -> u64 {
        u64::from(self.traps)
            + 2 * u64::from(self.teleporter_pairs)
            + 2 * u64::from(self.key_lock_pairs)
    }
}

/// Strategy used to guarantee a path between start and goal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectivityRepair {
    /// Depth-first search that clears every wall it steps into.
    #[default]
    Carve,
    /// Depth-first search over open cells only; fails when the goal is sealed off.
    Verify,
}

/// Reaction to a grid whose goal could not be connected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Regenerate at level 1.
    #[default]
    RestartAtLevelOne,
    /// Regenerate at the level that failed.
    RetrySameLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_grow_with_level() {
        let tuning = GeneratorTuning::default();
        assert_eq!(tuning.dimensions(1), Some((22, 17)));
        assert_eq!(tuning.dimensions(5), Some((30, 25)));
    }

    #[test]
    fn overflowing_dimensions_are_reported() {
        let tuning = GeneratorTuning::default();
        assert_eq!(tuning.dimensions(u32::MAX), None);
        assert_eq!(tuning.dimensions(u32::MAX / 2), None);
    }

    #[test]
    fn tile_counts_follow_level_formulas() {
        let tuning = GeneratorTuning::default();
        assert_eq!(
            tuning.tile_counts(1),
            TileCounts {
                traps: 3,
                teleporter_pairs: 1,
                key_lock_pairs: 1,
            }
        );
        assert_eq!(
            tuning.tile_counts(6),
            TileCounts {
                traps: 18,
                teleporter_pairs: 4,
                key_lock_pairs: 3,
            }
        );
        assert_eq!(tuning.tile_counts(6).cells(), 32);
    }

    #[test]
    fn time_limit_scales_per_level() {
        let tuning = GeneratorTuning::default();
        assert_eq!(tuning.time_limit(1), 90);
        assert_eq!(tuning.time_limit(4), 180);
    }

    #[test]
    fn wall_probability_matches_density_model() {
        let tuning = GeneratorTuning::default();
        let origin = tuning.wall_probability(2, 0, 7);
        assert!((origin - 0.23).abs() < 1e-12);

        let rippled = tuning.wall_probability(1, 3, 5);
        let expected = 0.2 + 0.015 + 0.1 * (1.5_f64).sin();
        assert!((rippled - expected).abs() < 1e-12);
    }

    #[test]
    fn wall_probability_is_clamped() {
        let mut tuning = GeneratorTuning::default();
        tuning.density.base = 2.0;
        assert_eq!(tuning.wall_probability(1, 1, 1), 1.0);
        tuning.density.base = -2.0;
        assert_eq!(tuning.wall_probability(1, 1, 1), 0.0);
    }

    #[test]
    fn zero_divisor_drops_level_term() {
        let mut tuning = GeneratorTuning::default();
        tuning.tiles.key_lock_pairs_divisor = 0;
        assert_eq!(tuning.tile_counts(9).key_lock_pairs, 1);
    }
}
