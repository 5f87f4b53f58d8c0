// Individual heart particle: a fixed target sampled on the heart shape, a
// current position, and the two physics regimes it moves under.

use crate::color::Color;
use crate::heart::HeartSample;
use rand::Rng;
use vecmath::{vec3_add, vec3_scale, Vector3};

#[derive(Copy, Clone, Debug)]
pub struct Particle {
    pub sample: HeartSample,
    pub pos: Vector3<f64>,
    pub vel: Vector3<f64>,
    pub size: f64,
    pub friction: f64,
    pub color: Color,
}

impl Particle {
    pub const ORBIT_FRICTION: f64 = 0.92;
    pub const BURST_FRICTION: f64 = 0.96;
    pub const BURST_SPEED: f64 = 15.0;
    pub const EASE_RATE: f64 = 0.1;
    pub const JITTER: f64 = 0.5;
    pub const SHRINK_RATE: f64 = 0.99;
    pub const MAX_SIZE: f64 = 2.0;

    pub fn new<R: Rng>(rng: &mut R) -> Particle {
        let sample = HeartSample::random(rng);
        Particle {
            sample,
            pos: sample.target,
            vel: [0.0; 3],
            size: rng.gen::<f64>() * Particle::MAX_SIZE,
            friction: Particle::ORBIT_FRICTION,
            color: Color::sample_warm(rng),
        }
    }

    /// Pre-celebration motion: exponential ease toward the pulsed target,
    /// plus a little independent jitter per axis for shimmer.
    pub fn orbit<R: Rng>(&mut self, pulse: f64, rng: &mut R) {
        let target = vec3_scale(self.sample.target, pulse);
        for axis in 0..3 {
            self.pos[axis] += (target[axis] - self.pos[axis]) * Particle::EASE_RATE;
            self.pos[axis] += (rng.gen::<f64>() - 0.5) * Particle::JITTER;
        }
    }

    /// Post-celebration motion: free flight with decaying velocity and a
    /// shrinking render radius.
    pub fn drift(&mut self) {
        self.pos = vec3_add(self.pos, self.vel);
        self.vel = vec3_scale(self.vel, self.friction);
        self.size *= Particle::SHRINK_RATE;
    }

    /// Kick into explosion flight. Called once per particle, from the
    /// accept transition.
    pub fn burst<R: Rng>(&mut self, rng: &mut R) {
        self.friction = Particle::BURST_FRICTION;
        for axis in 0..3 {
            self.vel[axis] = (rng.gen::<f64>() - 0.5) * Particle::BURST_SPEED;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use vecmath::{vec3_len, vec3_sub};

    #[test]
    fn starts_at_rest_on_target() {
        let mut rng = StdRng::seed_from_u64(17);
        let p = Particle::new(&mut rng);
        assert_eq!(p.pos, p.sample.target);
        assert_eq!(p.vel, [0.0; 3]);
        assert_eq!(p.friction, Particle::ORBIT_FRICTION);
        assert!(p.size >= 0.0 && p.size < Particle::MAX_SIZE);
    }

    #[test]
    fn orbit_pulls_back_to_target() {
        let mut rng = StdRng::seed_from_u64(19);
        let mut p = Particle::new(&mut rng);
        p.pos = vec3_add(p.pos, [40.0, -40.0, 40.0]);
        for _ in 0..200 {
            p.orbit(1.0, &mut rng);
        }
        // Equilibrium is the target give or take the jitter amplitude.
        let err = vec3_len(vec3_sub(p.pos, p.sample.target));
        assert!(err < 3.0, "still {} away from target", err);
    }

    #[test]
    fn burst_then_drift_decays() {
        let mut rng = StdRng::seed_from_u64(23);
        let mut p = Particle::new(&mut rng);
        p.burst(&mut rng);
        assert_eq!(p.friction, Particle::BURST_FRICTION);
        let speed = vec3_len(p.vel);
        assert!(speed > 0.0);
        for axis in 0..3 {
            assert!(p.vel[axis].abs() <= Particle::BURST_SPEED / 2.0);
        }

        let size_before = p.size;
        p.drift();
        assert!(vec3_len(p.vel) < speed);
        assert!(p.size <= size_before);
        assert!(p.size >= 0.0);
    }
}
