/// Golden angle in degrees; consecutive hues land far apart on the wheel.
const GOLDEN_ANGLE: f64 = 137.508;

/// Seeded color source for pie slices.
///
/// The same seed and slice index always produce the same color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    base_hue: f64,
}

impl Palette {
    pub fn seeded(seed: u64) -> Self {
        Palette {
            base_hue: (seed % 360) as f64,
        }
    }

    /// CSS color for slice `index`
    pub fn color(&self, index: usize) -> String {
        let hue = (self.base_hue + index as f64 * GOLDEN_ANGLE).rem_euclid(360.0);
        format!("hsl({}, 70%, 50%)", hue.round() as u32 % 360)
    }

    pub fn colors(&self, count: usize) -> Vec<String> {
        (0..count).map(|i| self.color(i)).collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::seeded(0)
    }
}
