//! The bounded 2D habitat: geometry, capacity, and density.
//!
//! The habitat owns no agents -- it is pure geometry plus the capacity
//! ceiling that turns an agent count into a density. Movement is
//! validated here: a step outside the bounds is rejected and the mover
//! stays put, which keeps every position invariantly inside the grid.

use rand::Rng;
use universe_types::Position;

use crate::config::HabitatConfig;
use crate::error::WorldError;

/// The eight grid directions, in a fixed scan order so that ties in
/// crowding resolve deterministically.
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Bounded 2D space with a fixed capacity ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Habitat {
    width: i32,
    height: i32,
    capacity: u32,
    interaction_radius: u32,
}

impl Habitat {
    /// Build a habitat from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidConfig`] if the configuration fails
    /// validation or the grid dimensions overflow coordinate space.
    pub fn new(config: &HabitatConfig) -> Result<Self, WorldError> {
        config.validate()?;
        let width = i32::try_from(config.width).map_err(|_| WorldError::InvalidConfig {
            field: "width",
            reason: format!("{} exceeds the coordinate range", config.width),
        })?;
        let height = i32::try_from(config.height).map_err(|_| WorldError::InvalidConfig {
            field: "height",
            reason: format!("{} exceeds the coordinate range", config.height),
        })?;
        Ok(Self {
            width,
            height,
            capacity: config.capacity,
            interaction_radius: config.interaction_radius,
        })
    }

    /// The population ceiling used for density computation.
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Chebyshev radius of the interaction neighborhood.
    pub const fn interaction_radius(&self) -> u32 {
        self.interaction_radius
    }

    /// Whether a position lies within the grid.
    pub const fn contains(&self, position: Position) -> bool {
        position.x >= 0 && position.x < self.width && position.y >= 0 && position.y < self.height
    }

    /// Global density: `alive / capacity`, in `[0, 1]` whenever the
    /// admission cap holds.
    pub fn density(&self, alive: u32) -> f64 {
        f64::from(alive) / f64::from(self.capacity)
    }

    /// Local density for a neighborhood of `neighbor_count` agents.
    ///
    /// Normalizes the neighbor count by the neighborhood's share of the
    /// capacity, so that a radius covering the whole grid reproduces the
    /// global density scale.
    pub fn local_density(&self, neighbor_count: u32) -> f64 {
        let cells_total = f64::from(self.width.unsigned_abs()) * f64::from(self.height.unsigned_abs());
        let side = f64::from(self.interaction_radius).mul_add(2.0, 1.0);
        let local_cells = (side * side).min(cells_total);
        let local_capacity = f64::from(self.capacity) * local_cells / cells_total;
        (f64::from(neighbor_count) / local_capacity).clamp(0.0, 1.0)
    }

    /// Two positions within interaction range of each other.
    pub const fn within_interaction(&self, a: Position, b: Position) -> bool {
        a.chebyshev_distance(b) <= self.interaction_radius
    }

    /// Attempt a step from `from` by `(dx, dy)`; an out-of-bounds step
    /// leaves the mover where it is.
    pub const fn step_or_stay(&self, from: Position, dx: i32, dy: i32) -> Position {
        let candidate = Position::new(from.x.saturating_add(dx), from.y.saturating_add(dy));
        if self.contains(candidate) { candidate } else { from }
    }

    /// A uniformly random cell.
    pub fn random_position(&self, rng: &mut impl Rng) -> Position {
        Position::new(
            rng.random_range(0..self.width),
            rng.random_range(0..self.height),
        )
    }

    /// A random one-cell step (possibly staying in place), clamped to
    /// the grid.
    pub fn random_step(&self, from: Position, rng: &mut impl Rng) -> Position {
        let dx = rng.random_range(-1..=1);
        let dy = rng.random_range(-1..=1);
        self.step_or_stay(from, dx, dy)
    }

    /// One step from `from` toward `target` along both axes.
    pub const fn step_toward(&self, from: Position, target: Position) -> Position {
        let dx = target.x.saturating_sub(from.x).signum();
        let dy = target.y.saturating_sub(from.y).signum();
        self.step_or_stay(from, dx, dy)
    }

    /// The adjacent cell with the fewest occupants, given the positions
    /// of all living agents. Returns `from` when boxed in on all sides.
    pub fn least_crowded_step(&self, from: Position, occupied: &[Position]) -> Position {
        let mut best = from;
        let mut best_count = u32::MAX;
        for (dx, dy) in DIRECTIONS {
            let candidate =
                Position::new(from.x.saturating_add(dx), from.y.saturating_add(dy));
            if !self.contains(candidate) {
                continue;
            }
            let count = occupied
                .iter()
                .filter(|p| **p == candidate)
                .count()
                .try_into()
                .unwrap_or(u32::MAX);
            if count < best_count {
                best_count = count;
                best = candidate;
            }
        }
        best
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn habitat() -> Habitat {
        Habitat::new(&HabitatConfig::default()).unwrap()
    }

    #[test]
    fn density_is_alive_over_capacity() {
        let h = habitat();
        assert!((h.density(0) - 0.0).abs() < f64::EPSILON);
        assert!((h.density(480) - 0.5).abs() < f64::EPSILON);
        assert!((h.density(960) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn out_of_bounds_step_stays_put() {
        let h = habitat();
        let corner = Position::new(0, 0);
        assert_eq!(h.step_or_stay(corner, -1, 0), corner);
        assert_eq!(h.step_or_stay(corner, 0, -1), corner);
        assert_eq!(h.step_or_stay(corner, 1, 1), Position::new(1, 1));
    }

    #[test]
    fn random_positions_always_in_bounds() {
        let h = habitat();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            assert!(h.contains(h.random_position(&mut rng)));
        }
    }

    #[test]
    fn random_steps_never_escape() {
        let h = habitat();
        let mut rng = StdRng::seed_from_u64(12);
        let mut pos = Position::new(0, 0);
        for _ in 0..500 {
            pos = h.random_step(pos, &mut rng);
            assert!(h.contains(pos));
        }
    }

    #[test]
    fn step_toward_closes_distance() {
        let h = habitat();
        let from = Position::new(3, 3);
        let target = Position::new(10, 1);
        let stepped = h.step_toward(from, target);
        assert_eq!(stepped, Position::new(4, 2));
        assert!(stepped.chebyshev_distance(target) < from.chebyshev_distance(target));
    }

    #[test]
    fn least_crowded_step_avoids_the_crowd() {
        let h = habitat();
        let from = Position::new(5, 5);
        // Crowd everything above the mover.
        let occupied: Vec<Position> = vec![
            Position::new(4, 4),
            Position::new(5, 4),
            Position::new(6, 4),
            Position::new(4, 4),
        ];
        let step = h.least_crowded_step(from, &occupied);
        assert!(h.contains(step));
        assert!(!occupied.contains(&step));
    }

    #[test]
    fn full_radius_local_density_matches_global_scale() {
        let config = HabitatConfig {
            width: 5,
            height: 5,
            capacity: 25,
            interaction_radius: 5,
        };
        let h = Habitat::new(&config).unwrap();
        // Radius covers the whole grid: 10 neighbors out of capacity 25.
        assert!((h.local_density(10) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn local_density_clamped_to_unit_interval() {
        let h = habitat();
        assert!((h.local_density(0) - 0.0).abs() < f64::EPSILON);
        assert!((h.local_density(10_000) - 1.0).abs() < f64::EPSILON);
    }
}
