//! Bounded random placement for vertices that have no layout yet

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::CanvasConfig;
use crate::model::Position;

/// Draws default vertex positions uniformly over the canvas.
///
/// Use [`Scatter::seeded`] where placement has to be reproducible, e.g. in tests.
#[derive(Debug, Clone)]
pub struct Scatter {
    rng: StdRng,
    width: f64,
    height: f64,
}

impl Scatter {
    pub fn from_entropy(canvas: &CanvasConfig) -> Self {
        Self::with_rng(StdRng::from_entropy(), canvas)
    }

    pub fn seeded(seed: u64, canvas: &CanvasConfig) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), canvas)
    }

    /// Seeded when `seed` is given, entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>, canvas: &CanvasConfig) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed, canvas),
            None => Self::from_entropy(canvas),
        }
    }

    fn with_rng(rng: StdRng, canvas: &CanvasConfig) -> Self {
        Scatter {
            rng,
            width: canvas.width.max(0.0),
            height: canvas.height.max(0.0),
        }
    }

    /// Next position in `[0, width) x [0, height)`.
    pub fn place(&mut self) -> Position {
        let x = self.rng.r#gen::<f64>() * self.width;
        let y = self.rng.r#gen::<f64>() * self.height;
        Position::new(x, y)
    }
}

impl Default for Scatter {
    fn default() -> Self {
        Self::from_entropy(&CanvasConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_stay_on_canvas() {
        let canvas = CanvasConfig { width: 800.0, height: 600.0 };
        let mut scatter = Scatter::seeded(7, &canvas);
        for _ in 0..500 {
            let p = scatter.place();
            assert!((0.0..800.0).contains(&p.x));
            assert!((0.0..600.0).contains(&p.y));
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let canvas = CanvasConfig::default();
        let mut a = Scatter::seeded(42, &canvas);
        let mut b = Scatter::seeded(42, &canvas);
        for _ in 0..10 {
            assert_eq!(a.place(), b.place());
        }
    }

    #[test]
    fn test_consecutive_draws_differ() {
        let mut scatter = Scatter::seeded(1, &CanvasConfig::default());
        assert_ne!(scatter.place(), scatter.place());
    }
}
