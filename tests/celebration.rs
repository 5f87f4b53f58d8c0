// Cross-module flow: a fresh session through dodge, accept, and reset.

use rand::rngs::StdRng;
use rand::SeedableRng;
use vecmath::vec3_len;

use rust_canvas_heart_backend::interaction::{Interaction, Phase, PHRASES};
use rust_canvas_heart_backend::simulation::Simulation;

const VIEWPORT: (f64, f64) = (1280.0, 720.0);

#[test]
fn accept_once_then_reset_restores_the_session() {
    let mut rng = StdRng::seed_from_u64(101);
    let mut simulation = Simulation::with_count(256, &mut rng);
    let mut interaction = Interaction::new();
    let original_count = simulation.particles().len();

    // A little idle time first; nothing should be celebrating yet.
    for _ in 0..30 {
        simulation.step(&mut rng);
    }
    assert!(!simulation.celebrated());
    assert!(simulation.particles().iter().all(|p| vec3_len(p.vel) == 0.0));

    // Some dodging before giving in.
    for _ in 0..4 {
        assert!(interaction.provoke(VIEWPORT, &mut rng).is_some());
    }

    // Accept fires exactly once.
    assert!(interaction.accept());
    assert!(simulation.celebrate(&mut rng));
    assert!(simulation.celebrated());
    assert!(simulation.particles().iter().any(|p| vec3_len(p.vel) > 0.0));

    // A second accept is a no-op end to end.
    assert!(!interaction.accept());
    assert!(!simulation.celebrate(&mut rng));
    assert!(interaction.provoke(VIEWPORT, &mut rng).is_none());

    for _ in 0..60 {
        simulation.step(&mut rng);
    }

    // Reset brings back a fresh field of the original size.
    simulation.reset(&mut rng);
    interaction.reset();
    assert!(!simulation.celebrated());
    assert_eq!(simulation.particles().len(), original_count);
    assert!(simulation.particles().iter().all(|p| vec3_len(p.vel) == 0.0));
    assert_eq!(interaction.phase(), Phase::Idle);

    // And the session plays again from the top.
    let dodge = interaction.provoke(VIEWPORT, &mut rng).unwrap();
    assert_eq!(dodge.phrase, PHRASES[1]);
}

#[test]
fn default_session_size() {
    let mut rng = StdRng::seed_from_u64(103);
    let simulation = Simulation::new(&mut rng);
    assert_eq!(simulation.particles().len(), Simulation::PARTICLE_COUNT);
}
