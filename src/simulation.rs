// Scene state: the particle field plus the clock, beat, rotation, and
// pointer influence that drive it. All mutation flows through step(),
// point_at(), celebrate(), and reset(), so the whole simulation is
// deterministic under a seeded rng.

use crate::particle::Particle;
use rand::Rng;

pub struct Simulation {
    particles: Vec<Particle>,
    time: f64,
    rot_x: f64,
    rot_y: f64,
    target_rot_y: f64,
    pointer: (f64, f64),
    glow: f64,
    glow_target: f64,
    celebrated: bool,
}

impl Simulation {
    pub const PARTICLE_COUNT: usize = 3500;
    pub const TIME_STEP: f64 = 0.02;
    pub const SPIN_RATE: f64 = 0.003;
    pub const EASE_RATE: f64 = 0.05;
    pub const POINTER_INFLUENCE: f64 = 0.001;
    pub const PULSE_GAIN: f64 = 0.1;

    pub fn new<R: Rng>(rng: &mut R) -> Simulation {
        Simulation::with_count(Simulation::PARTICLE_COUNT, rng)
    }

    pub fn with_count<R: Rng>(count: usize, rng: &mut R) -> Simulation {
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(Particle::new(rng));
        }
        Simulation {
            particles,
            time: 0.0,
            rot_x: 0.0,
            rot_y: 0.0,
            target_rot_y: 0.0,
            pointer: (0.0, 0.0),
            glow: 0.0,
            glow_target: 0.0,
            celebrated: false,
        }
    }

    /// Sharp once-per-cycle pulse. The high power narrows the peak so the
    /// heart reads as beating rather than breathing; the small secondary
    /// term adds a soft echo around it.
    pub fn beat(&self) -> f64 {
        (self.time * 3.0).sin().powi(60) * 0.5 + (self.time * 3.0 + 0.5).sin() * 0.1
    }

    /// Record the cursor position. `x`/`y` are client coordinates,
    /// `viewport` the window size; offsets from center feed the tilt and
    /// the proximity glow.
    pub fn point_at(&mut self, x: f64, y: f64, viewport: (f64, f64)) {
        let dx = x - viewport.0 / 2.0;
        let dy = y - viewport.1 / 2.0;
        self.pointer = (
            dx * Simulation::POINTER_INFLUENCE,
            dy * Simulation::POINTER_INFLUENCE,
        );
        let radius = viewport.0.min(viewport.1) / 2.0;
        if radius > 0.0 {
            let dist = (dx * dx + dy * dy).sqrt();
            self.glow_target = (1.0 - dist / radius).max(0.0);
        }
    }

    /// Advance one frame: clock, rotation easing, glow easing, then every
    /// particle under whichever physics regime is active.
    pub fn step<R: Rng>(&mut self, rng: &mut R) {
        self.time += Simulation::TIME_STEP;
        self.target_rot_y += Simulation::SPIN_RATE;
        self.rot_y += (self.target_rot_y + self.pointer.0 - self.rot_y) * Simulation::EASE_RATE;
        self.rot_x += (self.pointer.1 - self.rot_x) * Simulation::EASE_RATE;
        self.glow += (self.glow_target - self.glow) * Simulation::EASE_RATE;

        if self.celebrated {
            for p in &mut self.particles {
                p.drift();
            }
        } else {
            let pulse = 1.0 + self.beat() * Simulation::PULSE_GAIN;
            for p in &mut self.particles {
                p.orbit(pulse, rng);
            }
        }
    }

    /// One-way transition into the explosion regime. Velocities are
    /// randomized only on the first call; later calls are no-ops.
    pub fn celebrate<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.celebrated {
            return false;
        }
        self.celebrated = true;
        for p in &mut self.particles {
            p.burst(rng);
        }
        true
    }

    /// Rebuild the whole field in the orbiting state, same particle count.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        *self = Simulation::with_count(self.particles.len(), rng);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn rotation(&self) -> (f64, f64) {
        (self.rot_x, self.rot_y)
    }

    pub fn glow(&self) -> f64 {
        self.glow
    }

    pub fn celebrated(&self) -> bool {
        self.celebrated
    }

    pub fn time(&self) -> f64 {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heart;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use vecmath::{vec3_len, vec3_sub};

    fn small_sim(rng: &mut StdRng) -> Simulation {
        Simulation::with_count(64, rng)
    }

    #[test]
    fn beat_stays_bounded_and_peaks_sharply() {
        let mut rng = StdRng::seed_from_u64(29);
        let mut sim = small_sim(&mut rng);
        let mut peak: f64 = 0.0;
        let mut hot = 0;
        let total = 2_000;
        for _ in 0..total {
            sim.step(&mut rng);
            let beat = sim.beat();
            assert!(beat > -0.2 && beat < 0.7, "beat out of range: {}", beat);
            peak = peak.max(beat);
            if beat > 0.3 {
                hot += 1;
            }
        }
        assert!(peak > 0.4, "never pulsed, peak {}", peak);
        // The pulse is narrow: only a small slice of frames sit near the peak.
        assert!(hot < total / 10, "pulse too wide: {} of {}", hot, total);
    }

    #[test]
    fn depth_stays_bounded_before_celebration() {
        let mut rng = StdRng::seed_from_u64(31);
        let mut sim = small_sim(&mut rng);
        for _ in 0..500 {
            sim.step(&mut rng);
        }
        let bound = heart::DEPTH * heart::HEART_SIZE * 1.5;
        for p in sim.particles() {
            assert!(p.pos[2].abs() < bound, "z drifted to {}", p.pos[2]);
        }
    }

    #[test]
    fn celebrate_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(37);
        let mut sim = small_sim(&mut rng);
        assert!(sim.celebrate(&mut rng));
        let velocities: Vec<_> = sim.particles().iter().map(|p| p.vel).collect();
        assert!(velocities.iter().any(|v| vec3_len(*v) > 0.0));

        assert!(!sim.celebrate(&mut rng));
        let after: Vec<_> = sim.particles().iter().map(|p| p.vel).collect();
        assert_eq!(velocities, after);
    }

    #[test]
    fn explosion_displacement_is_non_decreasing() {
        let mut rng = StdRng::seed_from_u64(41);
        let mut sim = small_sim(&mut rng);
        sim.celebrate(&mut rng);
        let origin: Vec<_> = sim.particles().iter().map(|p| p.pos).collect();
        let mut last = vec![0.0; origin.len()];
        for _ in 0..50 {
            sim.step(&mut rng);
            for (i, p) in sim.particles().iter().enumerate() {
                let d = vec3_len(vec3_sub(p.pos, origin[i]));
                assert!(d + 1e-12 >= last[i], "particle {} pulled back", i);
                last[i] = d;
            }
        }
    }

    #[test]
    fn reset_restores_a_fresh_field() {
        let mut rng = StdRng::seed_from_u64(43);
        let mut sim = small_sim(&mut rng);
        let count = sim.particles().len();
        sim.celebrate(&mut rng);
        for _ in 0..10 {
            sim.step(&mut rng);
        }
        sim.reset(&mut rng);
        assert!(!sim.celebrated());
        assert_eq!(sim.particles().len(), count);
        assert_eq!(sim.time(), 0.0);
        for p in sim.particles() {
            assert_eq!(p.vel, [0.0; 3]);
            assert_eq!(p.pos, p.sample.target);
        }
    }

    #[test]
    fn pointer_tilts_rotation_and_feeds_glow() {
        let mut rng = StdRng::seed_from_u64(47);
        let mut sim = small_sim(&mut rng);
        // Cursor dead center: full glow target, no tilt.
        sim.point_at(400.0, 300.0, (800.0, 600.0));
        for _ in 0..200 {
            sim.step(&mut rng);
        }
        assert!(sim.glow() > 0.9);
        let (rot_x, _) = sim.rotation();
        assert!(rot_x.abs() < 1e-6);

        // Cursor below center pitches the heart.
        sim.point_at(400.0, 600.0, (800.0, 600.0));
        for _ in 0..200 {
            sim.step(&mut rng);
        }
        let (rot_x, _) = sim.rotation();
        assert!((rot_x - 300.0 * Simulation::POINTER_INFLUENCE).abs() < 1e-3);
        assert!(sim.glow() < 0.1);
    }
}
