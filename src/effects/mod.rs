//! Ember, smoke and flame overlay drawn over a result image.
//!
//! [`EmberEffect`] owns the particle pools and the frame clock; it never
//! touches a canvas directly. Each frame is painted through an
//! [`EffectSurface`], which the browser backs with a 2D canvas context.

mod flame;
mod particle;
mod surface;

pub use flame::{FlameBand, FLAME_STOPS, PEAKS};
pub use particle::{
    smoke_alpha, EmberShade, Particle, ParticleKind, Rgba, SpawnRanges, SMOKE_PEAK_ALPHA,
};
pub use surface::EffectSurface;

use crate::config::EffectConfig;

pub const LABEL_ACTIVATE: &str = "Activar brasas ✨🔥";
pub const LABEL_DEACTIVATE: &str = "Desactivar brasas ✨🔥";

/// Step used for the first frame after a start, before a previous timestamp
/// exists.
pub const NOMINAL_DT: f64 = 1.0 / 60.0;
const MIN_DT: f64 = 0.001;
const SMOKE_SPAWN_CHANCE: f64 = 0.5;

pub struct EmberEffect {
    config: EffectConfig,
    running: bool,
    embers: Vec<Particle>,
    smoke: Vec<Particle>,
    last_timestamp: Option<f64>,
    rng: fastrand::Rng,
}

impl EmberEffect {
    pub fn new(config: EffectConfig, seed: u64) -> Self {
        Self {
            config,
            running: false,
            embers: Vec::with_capacity(config.max_embers),
            smoke: Vec::with_capacity(config.max_smoke),
            last_timestamp: None,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn embers(&self) -> &[Particle] {
        &self.embers
    }

    pub fn smoke(&self) -> &[Particle] {
        &self.smoke
    }

    pub fn label(&self) -> &'static str {
        if self.running {
            LABEL_DEACTIVATE
        } else {
            LABEL_ACTIVATE
        }
    }

    /// Starts with fresh pools seeded to half their caps.
    pub fn start(&mut self, width: f64, height: f64) {
        self.running = true;
        self.last_timestamp = None;
        self.embers.clear();
        self.smoke.clear();
        for _ in 0..self.config.max_embers / 2 {
            self.embers
                .push(Particle::spawn(ParticleKind::Ember, width, height, &mut self.rng));
        }
        for _ in 0..self.config.max_smoke / 2 {
            self.smoke
                .push(Particle::spawn(ParticleKind::Smoke, width, height, &mut self.rng));
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.last_timestamp = None;
        self.embers.clear();
        self.smoke.clear();
    }

    /// Returns the new running state.
    pub fn toggle(&mut self, width: f64, height: f64) -> bool {
        if self.running {
            self.stop();
        } else {
            self.start(width, height);
        }
        self.running
    }

    /// Seconds to advance for a frame at `timestamp_ms`.
    fn frame_dt(&mut self, timestamp_ms: f64) -> f64 {
        let dt = match self.last_timestamp {
            Some(last) => ((timestamp_ms - last) / 1000.0).clamp(MIN_DT, self.config.max_dt),
            None => NOMINAL_DT,
        };
        self.last_timestamp = Some(timestamp_ms);
        dt
    }

    fn spawn(&mut self, width: f64, height: f64) {
        if self.embers.len() < self.config.max_embers {
            self.embers
                .push(Particle::spawn(ParticleKind::Ember, width, height, &mut self.rng));
        }
        if self.smoke.len() < self.config.max_smoke && self.rng.f64() < SMOKE_SPAWN_CHANCE {
            self.smoke
                .push(Particle::spawn(ParticleKind::Smoke, width, height, &mut self.rng));
        }
    }

    /// Runs one frame onto `surface`. Returns whether another frame should be
    /// scheduled.
    pub fn frame<S: EffectSurface>(&mut self, timestamp_ms: f64, surface: &mut S) -> bool {
        if !self.running {
            return false;
        }
        let dt = self.frame_dt(timestamp_ms);
        let (width, height) = surface.size();

        surface.begin_frame(self.config.corner_radius);
        self.spawn(width, height);
        surface.fill_flame(&FlameBand::compute(width, height, timestamp_ms, &mut self.rng));

        self.smoke.retain_mut(|puff| puff.advance(dt));
        for puff in &self.smoke {
            surface.draw_smoke(puff, smoke_alpha(puff.fade()));
        }

        self.embers.retain_mut(|ember| ember.advance(dt));
        for ember in &self.embers {
            surface.draw_ember(ember, &EmberShade::at(ember.fade()));
        }

        surface.end_frame();
        true
    }
}
