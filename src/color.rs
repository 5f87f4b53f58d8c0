// Simple color struct for the warm pink/red band the particles use,
// kept as HSL so it can be handed to the canvas as a CSS string.

use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Color {
    /// Hue band sampled at particle construction.
    pub const HUE_BASE: f64 = 340.0;
    pub const HUE_SPAN: f64 = 40.0;

    pub fn sample_warm<R: Rng>(rng: &mut R) -> Color {
        Color {
            hue: Color::HUE_BASE + rng.gen::<f64>() * Color::HUE_SPAN,
            saturation: 100.0,
            lightness: 50.0 + rng.gen::<f64>() * 30.0,
        }
    }

    pub fn to_css(&self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn warm_band() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let color = Color::sample_warm(&mut rng);
            assert!(color.hue >= 340.0 && color.hue < 380.0);
            assert_eq!(color.saturation, 100.0);
            assert!(color.lightness >= 50.0 && color.lightness < 80.0);
        }
    }

    #[test]
    fn css_form() {
        let color = Color {
            hue: 350.0,
            saturation: 100.0,
            lightness: 60.0,
        };
        assert_eq!(color.to_css(), "hsl(350, 100%, 60%)");
    }
}
