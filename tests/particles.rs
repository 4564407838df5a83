#![cfg(not(target_arch = "wasm32"))]

use costume_wasm::config::EffectConfig;
use costume_wasm::effects::{EffectSurface, EmberEffect, EmberShade, FlameBand, Particle};
use proptest::prelude::*;

struct Blank;

impl EffectSurface for Blank {
    fn size(&self) -> (f64, f64) {
        (300.0, 200.0)
    }
    fn begin_frame(&mut self, _corner_radius: f64) {}
    fn fill_flame(&mut self, _band: &FlameBand) {}
    fn draw_smoke(&mut self, _puff: &Particle, _alpha: f64) {}
    fn draw_ember(&mut self, _ember: &Particle, _shade: &EmberShade) {}
    fn end_frame(&mut self) {}
}

fn same_particle(a: &Particle, b: &Particle) -> bool {
    a.vx == b.vx && a.vy == b.vy && a.lifetime == b.lifetime && a.size == b.size
}

/// Every particle that survives a frame must have aged.
fn assert_aged(before: &[Particle], after: &[Particle]) {
    for particle in after {
        assert!(particle.age > 0.0);
        assert!(particle.age <= particle.lifetime);
        if let Some(prior) = before.iter().find(|p| same_particle(p, particle)) {
            assert!(particle.age > prior.age);
        }
    }
}

fn config(max_embers: usize, max_smoke: usize) -> EffectConfig {
    EffectConfig {
        max_embers,
        max_smoke,
        ..EffectConfig::default()
    }
}

proptest! {
    #[test]
    fn pools_respect_caps_and_particles_age(
        seed in any::<u64>(),
        max_embers in 0usize..48,
        max_smoke in 0usize..12,
        gaps in prop::collection::vec(0.0f64..250.0, 1..150),
    ) {
        let mut effect = EmberEffect::new(config(max_embers, max_smoke), seed);
        let mut surface = Blank;
        effect.start(300.0, 200.0);

        let mut timestamp = 1_000.0;
        for gap in gaps {
            timestamp += gap;
            let embers = effect.embers().to_vec();
            let smoke = effect.smoke().to_vec();

            prop_assert!(effect.frame(timestamp, &mut surface));
            prop_assert!(effect.embers().len() <= max_embers);
            prop_assert!(effect.smoke().len() <= max_smoke);
            assert_aged(&embers, effect.embers());
            assert_aged(&smoke, effect.smoke());
        }
    }

    #[test]
    fn restart_reseeds_fresh_pools(
        seed in any::<u64>(),
        frames in 1usize..60,
    ) {
        let config = EffectConfig::default();
        let mut effect = EmberEffect::new(config, seed);
        let mut surface = Blank;
        effect.start(300.0, 200.0);
        for i in 0..frames {
            effect.frame(i as f64 * 16.0, &mut surface);
        }

        effect.stop();
        prop_assert!(effect.embers().is_empty());
        prop_assert!(effect.smoke().is_empty());
        prop_assert!(!effect.frame(frames as f64 * 16.0, &mut surface));

        effect.start(300.0, 200.0);
        prop_assert_eq!(effect.embers().len(), config.max_embers / 2);
        prop_assert_eq!(effect.smoke().len(), config.max_smoke / 2);
        prop_assert!(effect.embers().iter().chain(effect.smoke()).all(|p| p.age == 0.0));
    }
}
