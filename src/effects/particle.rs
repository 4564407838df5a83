use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Ember,
    Smoke,
}

/// Uniform spawn ranges. Positions are fractions of the canvas size,
/// velocities are in px/s, lifetimes in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRanges {
    pub x: Range<f64>,
    pub y: Range<f64>,
    pub vx: Range<f64>,
    pub vy: Range<f64>,
    pub lifetime: Range<f64>,
    pub size: Range<f64>,
}

impl ParticleKind {
    pub fn ranges(self) -> SpawnRanges {
        match self {
            Self::Ember => SpawnRanges {
                x: 0.08..0.92,
                y: 0.68..0.98,
                vx: -15.0..15.0,
                vy: -72.0..-21.0,
                lifetime: 1.1..2.6,
                size: 2.5..6.0,
            },
            Self::Smoke => SpawnRanges {
                x: 0.10..0.90,
                y: 0.70..0.98,
                vx: -4.8..4.8,
                vy: -21.0..-9.0,
                lifetime: 1.8..3.6,
                size: 14.0..28.0,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub age: f64,
    pub lifetime: f64,
    pub size: f64,
}

pub(crate) fn uniform(rng: &mut fastrand::Rng, range: &Range<f64>) -> f64 {
    range.start + (range.end - range.start) * rng.f64()
}

impl Particle {
    pub fn spawn(kind: ParticleKind, width: f64, height: f64, rng: &mut fastrand::Rng) -> Self {
        let ranges = kind.ranges();
        Self {
            x: width * uniform(rng, &ranges.x),
            y: height * uniform(rng, &ranges.y),
            vx: uniform(rng, &ranges.vx),
            vy: uniform(rng, &ranges.vy),
            age: 0.0,
            lifetime: uniform(rng, &ranges.lifetime),
            size: uniform(rng, &ranges.size),
        }
    }

    /// Ages and moves the particle. Returns `false` once it has outlived its
    /// lifetime.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.age += dt;
        if self.age > self.lifetime {
            return false;
        }
        self.x += self.vx * dt;
        self.y += self.vy * dt;
        true
    }

    /// Remaining life fraction, 1 at spawn and 0 at expiry.
    pub fn fade(&self) -> f64 {
        (1.0 - self.age / self.lifetime).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// Radial gradient stops for one ember: a pale core, a warm body at 40% and a
/// transparent orange rim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmberShade {
    pub core: Rgba,
    pub body: Rgba,
    pub edge: Rgba,
}

impl EmberShade {
    pub const BODY_STOP: f64 = 0.4;

    pub fn at(fade: f64) -> Self {
        let fade = fade.clamp(0.0, 1.0);
        let alpha = 0.75 * fade;
        let g = (140.0 + 100.0 * fade).floor() as u8;
        let b = (40.0 * fade).floor() as u8;
        Self {
            core: Rgba::new(255, 255, 200, alpha),
            body: Rgba::new(255, g, b, alpha),
            edge: Rgba::new(255, g - 40, b, 0.0),
        }
    }
}

pub const SMOKE_PEAK_ALPHA: f64 = 0.18;

pub fn smoke_alpha(fade: f64) -> f64 {
    SMOKE_PEAK_ALPHA * fade.clamp(0.0, 1.0)
}
