// Button-flow state machine: idle until the no-button is first provoked,
// dodging while the taunts cycle, celebrating once the accept fires. Pure
// data in and out; the DOM glue applies the result.

use rand::Rng;

pub const PHRASES: [&str; 10] = [
    "No",
    "Are you sure?",
    "Really?",
    "Think again!",
    "Last chance!",
    "Don't break my heart",
    "Pls?",
    "I have snacks!",
    "Look at the other button ->",
    "Error 404: No not found",
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dodging,
    Celebrating,
}

/// Where and how the dodge button should land after a provocation.
#[derive(Clone, Debug, PartialEq)]
pub struct Dodge {
    pub phrase: &'static str,
    pub offset_x: f64,
    pub offset_y: f64,
    pub opacity: f64,
    pub accept_scale: f64,
}

pub struct Interaction {
    phase: Phase,
    phrase_index: usize,
    accept_scale: f64,
}

impl Interaction {
    pub const SCALE_STEP: f64 = 0.15;
    /// Fraction of the viewport the dodge button roams over, per axis.
    pub const DODGE_SPAN: f64 = 0.8;
    pub const OPACITY_FLOOR: f64 = 0.5;

    pub fn new() -> Interaction {
        Interaction {
            phase: Phase::Idle,
            phrase_index: 0,
            accept_scale: 1.0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The no-button was hovered, clicked, or touched. Grows the accept
    /// button, advances the taunt, and picks a fresh random spot inside
    /// the roaming bound. Ignored once celebrating.
    pub fn provoke<R: Rng>(&mut self, viewport: (f64, f64), rng: &mut R) -> Option<Dodge> {
        if self.phase == Phase::Celebrating {
            return None;
        }
        self.phase = Phase::Dodging;
        self.accept_scale += Interaction::SCALE_STEP;
        self.phrase_index = (self.phrase_index + 1) % PHRASES.len();

        let span_x = viewport.0 * Interaction::DODGE_SPAN;
        let span_y = viewport.1 * Interaction::DODGE_SPAN;
        Some(Dodge {
            phrase: PHRASES[self.phrase_index],
            offset_x: rng.gen::<f64>() * span_x - span_x / 2.0,
            offset_y: rng.gen::<f64>() * span_y - span_y / 2.0,
            opacity: (1.0 - self.phrase_index as f64 * 0.1).max(Interaction::OPACITY_FLOOR),
            accept_scale: self.accept_scale,
        })
    }

    /// One-way accept. True only the first time.
    pub fn accept(&mut self) -> bool {
        if self.phase == Phase::Celebrating {
            return false;
        }
        self.phase = Phase::Celebrating;
        true
    }

    pub fn reset(&mut self) {
        *self = Interaction::new();
    }
}

impl Default for Interaction {
    fn default() -> Self {
        Interaction::new()
    }
}
