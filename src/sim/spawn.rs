//! Droplet spawning and the live droplet set
//!
//! The spawner owns every live droplet from spawn until its terminal event.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::droplet::{Droplet, DropletId, DropletKind};
use crate::tuning::Tuning;

/// Seeded droplet generator plus the set of droplets still in play
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    /// Live droplets (sorted by id for determinism)
    live: Vec<Droplet>,
    next_id: DropletId,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            live: Vec::new(),
            next_id: 1,
        }
    }

    /// Create one droplet with randomized kind, size and column and add it to the live set
    pub fn spawn(&mut self, now: u64, tuning: &Tuning) -> &Droplet {
        let kind = if self.rng.random_bool(tuning.penalty_chance) {
            DropletKind::Penalty
        } else {
            DropletKind::Regular
        };
        let factor = self
            .rng
            .random_range(tuning.size_min_factor..=tuning.size_max_factor);
        let x = self.rng.random_range(0.0..=tuning.spawn_max_x());

        let id = self.next_id;
        self.next_id += 1;

        let drop = Droplet::new(
            id,
            kind,
            x,
            tuning.base_drop_size * factor,
            now,
            tuning.fall_duration_ms,
        );
        log::debug!("Spawned {:?} droplet {} at x={:.1}", kind, id, x);

        // Ids are monotonic, so pushing keeps the set sorted
        self.live.push(drop);
        &self.live[self.live.len() - 1]
    }

    pub fn get(&self, id: DropletId) -> Option<&Droplet> {
        self.live.iter().find(|d| d.id == id)
    }

    pub fn get_mut(&mut self, id: DropletId) -> Option<&mut Droplet> {
        self.live.iter_mut().find(|d| d.id == id)
    }

    /// Remove a droplet from play. Returns `None` if it already ended.
    pub fn take(&mut self, id: DropletId) -> Option<Droplet> {
        let idx = self.live.iter().position(|d| d.id == id)?;
        Some(self.live.remove(idx))
    }

    pub fn live(&self) -> &[Droplet] {
        &self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
