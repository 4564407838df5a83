use super::particle::Rgba;

pub const PEAKS: usize = 6;

const BASE_FRACTION: f64 = 0.96;
const TOP_FRACTION: f64 = 0.88;
const MARGIN_FRACTION: f64 = 0.05;
const FLICKER_PERIOD_MS: f64 = 120.0;
const FLICKER_DROP_PX: f64 = 8.0;
const PEAK_AMPLITUDE_PX: f64 = 6.0;

/// Gradient stops from the flame tips down to the base.
pub const FLAME_STOPS: [(f64, Rgba); 3] = [
    (0.0, Rgba::new(255, 240, 180, 0.18)),
    (0.6, Rgba::new(255, 180, 80, 0.14)),
    (1.0, Rgba::new(255, 100, 20, 0.06)),
];

/// Translucent flickering band along the bottom of the canvas, as a closed
/// polygon from the bottom-left corner through the peaks to the bottom-right.
#[derive(Debug, Clone, PartialEq)]
pub struct FlameBand {
    pub left: f64,
    pub right: f64,
    pub base_y: f64,
    /// Top of the gradient for this frame.
    pub top_y: f64,
    pub peaks: Vec<(f64, f64)>,
}

impl FlameBand {
    pub fn compute(width: f64, height: f64, time_ms: f64, rng: &mut fastrand::Rng) -> Self {
        let base_y = height * BASE_FRACTION;
        let left = width * MARGIN_FRACTION;
        let span = width * (1.0 - 2.0 * MARGIN_FRACTION);
        let flicker = ((time_ms / FLICKER_PERIOD_MS).sin() + 1.0) * 0.5;
        let top_y = height * TOP_FRACTION + (1.0 - flicker) * FLICKER_DROP_PX;
        let peaks = (0..=PEAKS)
            .map(|i| {
                let x = left + span / PEAKS as f64 * i as f64;
                let jitter = rng.f64() * 2.0 - 1.0;
                let y = top_y + ((i as f64 + flicker) * 1.7).sin() * PEAK_AMPLITUDE_PX + jitter;
                (x, y)
            })
            .collect();
        Self {
            left,
            right: left + span,
            base_y,
            top_y,
            peaks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_hugs_the_bottom() {
        let mut rng = fastrand::Rng::with_seed(3);
        for step in 0..50 {
            let band = FlameBand::compute(500.0, 400.0, step as f64 * 37.0, &mut rng);
            assert_eq!(band.peaks.len(), PEAKS + 1);
            assert!((band.base_y - 384.0).abs() < 1e-9);
            assert!(band.top_y > 351.9 && band.top_y < 360.1);
            for &(x, y) in &band.peaks {
                assert!(x >= band.left - 1e-9 && x <= band.right + 1e-9);
                assert!((y - band.top_y).abs() <= PEAK_AMPLITUDE_PX + 1.0);
            }
        }
    }
}
