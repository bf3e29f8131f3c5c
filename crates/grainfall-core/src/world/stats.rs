//! Simulation statistics collection trait

/// Trait for collecting per-frame simulation statistics
///
/// The update rules report events through this trait so front ends can
/// count them without the core owning any particular collector.
pub trait SimStats {
    /// A particle changed position
    fn record_particle_moved(&mut self);

    /// A wood cell caught fire
    fn record_ignition(&mut self);

    /// A fire cell burned out
    fn record_extinguished(&mut self);

    /// A smoke cell vanished
    fn record_dissipated(&mut self);
}

/// A no-op implementation for when stats collection is not needed
#[derive(Default)]
pub struct NoopStats;

impl SimStats for NoopStats {
    fn record_particle_moved(&mut self) {}
    fn record_ignition(&mut self) {}
    fn record_extinguished(&mut self) {}
    fn record_dissipated(&mut self) {}
}

/// Event counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles_moved: u64,
    pub ignitions: u64,
    pub extinguished: u64,
    pub dissipated: u64,
}

impl FrameStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Add another set of counters into this one
    pub fn merge(&mut self, other: &FrameStats) {
        self.particles_moved += other.particles_moved;
        self.ignitions += other.ignitions;
        self.extinguished += other.extinguished;
        self.dissipated += other.dissipated;
    }
}

impl SimStats for FrameStats {
    fn record_particle_moved(&mut self) {
        self.particles_moved += 1;
    }

    fn record_ignition(&mut self) {
        self.ignitions += 1;
    }

    fn record_extinguished(&mut self) {
        self.extinguished += 1;
    }

    fn record_dissipated(&mut self) {
        self.dissipated += 1;
    }
}
