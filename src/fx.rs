// FX: confetti burst, fully software-drawn on top of the frame.
// Visual outcomes:
// - On reveal, ~100 colored paper bits shoot upward from the lower part of the window,
//   fan out inside a 70° cone, slow down, fall, flutter and fade.

use crate::types::{blend_over, rgba_from_u32, FrameBuffer};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation runs in fixed 60 Hz ticks regardless of the frame rate.
const TICKS_PER_SEC: f32 = 60.0;

/// Classic confetti palette (cyan, violet, pink, green, yellow, orange, magenta).
const PALETTE: [u32; 7] = [
    0x00_26_CC_FF, 0x00_A2_5A_FD, 0x00_FF_5E_7E, 0x00_88_FF_5A,
    0x00_FC_FF_42, 0x00_FF_A6_2D, 0x00_FF_36_FF,
];

/// Parameters of one burst. Origin is a fraction of the viewport (0..1 each axis).
#[derive(Debug, Clone, PartialEq)]
pub struct Burst {
    pub particle_count: usize,
    pub spread_deg: f32,
    pub origin: (f32, f32),
    pub start_velocity: f32, // px per tick
    pub decay: f32,          // velocity multiplier per tick
    pub gravity: f32,
    pub ticks: u32,          // lifetime
}

impl Burst {
    /// The celebration played when a card is revealed.
    pub fn reveal() -> Self {
        Self {
            particle_count: 100,
            spread_deg: 70.0,
            origin: (0.5, 0.6),
            ..Self::default()
        }
    }
}

impl Default for Burst {
    fn default() -> Self {
        Self {
            particle_count: 50,
            spread_deg: 45.0,
            origin: (0.5, 0.5),
            // Tuned for a 400px window; browsers use ~45 on a full page.
            start_velocity: 20.0,
            decay: 0.9,
            gravity: 1.0,
            ticks: 200,
        }
    }
}

/// Fire-and-forget celebration sink.
pub trait Celebrate {
    fn celebrate(&mut self, burst: &Burst);
}

/// One paper bit. Visual: a small rect that flips (wobbles) while it falls.
pub struct Particle {
    pub x: f32, pub y: f32,  // position in pixels
    pub angle: f32,          // direction of travel (radians, screen space)
    pub velocity: f32,       // px per tick
    pub decay: f32,
    pub gravity: f32,
    pub wobble: f32,         // phase of the flip animation
    pub wobble_speed: f32,
    pub tick: u32,
    pub total_ticks: u32,
    pub color: u32,
}

impl Particle {
    #[inline] fn alive(&self) -> bool { self.tick < self.total_ticks }

    fn step(&mut self) {
        self.x += self.angle.cos() * self.velocity;
        self.y += self.angle.sin() * self.velocity + self.gravity * 3.0;
        self.velocity *= self.decay;
        self.wobble += self.wobble_speed;
        self.tick += 1;
    }

    /// 1.0 at spawn → 0.0 at end of life.
    fn opacity(&self) -> f32 {
        1.0 - self.tick as f32 / self.total_ticks.max(1) as f32
    }
}

/// Confetti container. Visual: keeps everything that flutters on screen.
pub struct Confetti {
    rng: SmallRng,
    particles: Vec<Particle>,
    max_particles: usize,
    viewport: (f32, f32),
    pending_ticks: f32,
}

impl Confetti {
    /// Create with capacity for N particles in a viewport of the given size.
    pub fn new(max_particles: usize, viewport: (usize, usize)) -> Self {
        Self::with_rng(SmallRng::from_os_rng(), max_particles, viewport)
    }

    fn with_rng(rng: SmallRng, max_particles: usize, viewport: (usize, usize)) -> Self {
        Self {
            rng,
            particles: Vec::with_capacity(max_particles),
            max_particles,
            viewport: (viewport.0 as f32, viewport.1 as f32),
            pending_ticks: 0.0,
        }
    }

    pub fn active(&self) -> usize {
        self.particles.len()
    }

    /// Spawn one burst. Particles beyond the capacity are dropped.
    pub fn spawn(&mut self, burst: &Burst) {
        let ox = burst.origin.0 * self.viewport.0;
        let oy = burst.origin.1 * self.viewport.1;
        let spread = burst.spread_deg.to_radians();
        let up = -std::f32::consts::FRAC_PI_2;

        for _ in 0..burst.particle_count {
            if self.particles.len() >= self.max_particles { break; }
            let angle = up + (0.5 * spread - self.rng.random::<f32>() * spread);
            let velocity = burst.start_velocity * 0.5 + self.rng.random::<f32>() * burst.start_velocity;
            let color = PALETTE[self.rng.random_range(0..PALETTE.len())];
            self.particles.push(Particle {
                x: ox,
                y: oy,
                angle,
                velocity,
                decay: burst.decay,
                gravity: burst.gravity,
                wobble: self.rng.random::<f32>() * 10.0,
                wobble_speed: 0.05 + self.rng.random::<f32>() * 0.1,
                tick: 0,
                total_ticks: burst.ticks,
                color,
            });
        }
    }

    /// Advance the simulation by `dt` seconds (whole ticks only).
    pub fn update(&mut self, dt: f32) {
        self.pending_ticks += dt.max(0.0) * TICKS_PER_SEC;
        while self.pending_ticks >= 1.0 {
            self.pending_ticks -= 1.0;
            for p in &mut self.particles {
                p.step();
            }
            // Remove dead particles (swap-remove, O(1))
            let mut i = 0;
            while i < self.particles.len() {
                if self.particles[i].alive() { i += 1; } else { self.particles.swap_remove(i); }
            }
        }
        if self.particles.is_empty() {
            self.pending_ticks = 0.0;
        }
    }

    /// Draw all particles on top of `fb`, fading with age.
    pub fn render(&self, fb: &mut FrameBuffer) {
        for p in &self.particles {
            let alpha = (p.opacity() * 255.0).round().clamp(0.0, 255.0) as u8;
            let mut src = rgba_from_u32(p.color);
            src[3] = alpha;

            // Flip: width shrinks and grows with the wobble phase.
            let half_w = (3.0 * p.wobble.cos().abs()).round().max(1.0) as i32;
            let half_h = 2;
            let (cx, cy) = (p.x as i32, p.y as i32);
            for y in (cy - half_h)..=(cy + half_h) {
                if y < 0 || y >= fb.height as i32 { continue; }
                for x in (cx - half_w)..=(cx + half_w) {
                    if x < 0 || x >= fb.width as i32 { continue; }
                    let idx = y as usize * fb.width + x as usize;
                    fb.pixels[idx] = blend_over(fb.pixels[idx], src);
                }
            }
        }
    }
}

impl Celebrate for Confetti {
    fn celebrate(&mut self, burst: &Burst) {
        log::debug!("confetti: {} particles, {}° spread", burst.particle_count, burst.spread_deg);
        self.spawn(burst);
    }
}
