//! Arena of live generators addressed by [`HandleId`].
//!
//! Every operation of the handle API takes an id, looks up the live
//! generator, and forwards to `sandy_rng`. Freed slots are recycled through a
//! free list; their generation is bumped so old ids stay invalid.
//!
//! The registry itself is not synchronised. Wrap it in a lock to share it
//! between threads, or give each thread its own registry.

use sandy_rng::gaussian;
use sandy_rng::{descriptor, AlgorithmDescriptor, Generator};
use tracing::{debug, trace, warn};

use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::handle::HandleId;

/// One arena entry.
#[derive(Debug)]
struct Slot {
    generation: u32,
    generator: Option<Generator>,
}

/// Registry of generators exposed through opaque handles.
///
/// # Examples
///
/// ```rust
/// use sandy_registry::{GeneratorRegistry, RegistryConfig};
///
/// let mut registry = GeneratorRegistry::new(RegistryConfig::default()).unwrap();
/// let a = registry.allocate_default().unwrap();
/// let b = registry.allocate_default().unwrap();
///
/// // Fresh generators share the configured default seed
/// assert_eq!(registry.next_raw(a).unwrap(), registry.next_raw(b).unwrap());
/// assert_eq!(registry.name(a).unwrap(), "ranlxd2");
/// ```
#[derive(Debug)]
pub struct GeneratorRegistry {
    config: RegistryConfig,
    default_descriptor: &'static AlgorithmDescriptor,
    slots: Vec<Slot>,
    /// Indices of empty slots. Capacity always covers every slot, so pushing
    /// during `free` never reallocates.
    free_list: Vec<u32>,
    live: usize,
}

impl GeneratorRegistry {
    /// Creates an empty registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Config`] if the default algorithm is unknown,
    /// or [`RegistryError::Allocation`] if `capacity_hint` slots cannot be
    /// reserved.
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        let default_descriptor = config
            .default_descriptor()
            .map_err(|e| RegistryError::Config(e.to_string()))?;

        let mut slots = Vec::new();
        let mut free_list = Vec::new();
        if config.capacity_hint > 0 {
            slots
                .try_reserve_exact(config.capacity_hint)
                .map_err(RegistryError::Allocation)?;
            free_list
                .try_reserve_exact(config.capacity_hint)
                .map_err(RegistryError::Allocation)?;
        }

        debug!(
            algorithm = default_descriptor.name(),
            seed = config.default_seed,
            capacity = config.capacity_hint,
            "created generator registry"
        );

        Ok(Self {
            config,
            default_descriptor,
            slots,
            free_list,
            live: 0,
        })
    }

    /// Configuration the registry was built with.
    #[inline]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Number of live generators.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    /// True if no generator is live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// True if `id` refers to a live generator.
    pub fn contains(&self, id: HandleId) -> bool {
        self.slots
            .get(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .is_some_and(|slot| slot.generator.is_some())
    }

    /// Ids of all live generators, in slot order.
    pub fn handles(&self) -> impl Iterator<Item = HandleId> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.generator
                .as_ref()
                .map(|_| HandleId::new(index as u32, slot.generation))
        })
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Allocates a generator of the named algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Rng`] for an unknown name or a failed state
    /// allocation, and [`RegistryError::Allocation`] if the slot table cannot
    /// grow.
    pub fn allocate(&mut self, algorithm: &str) -> Result<HandleId, RegistryError> {
        let descriptor = descriptor::lookup(algorithm)?;
        self.allocate_with(descriptor)
    }

    /// Allocates a generator of the configured default algorithm.
    ///
    /// # Errors
    ///
    /// As [`allocate`](Self::allocate).
    pub fn allocate_default(&mut self) -> Result<HandleId, RegistryError> {
        self.allocate_with(self.default_descriptor)
    }

    /// Allocates a generator for `descriptor`, seeded with the configured
    /// default seed. With the default configuration this is the same stream
    /// as `Generator::allocate`.
    ///
    /// Either a fully built generator is registered or nothing is.
    ///
    /// # Errors
    ///
    /// As [`allocate`](Self::allocate).
    pub fn allocate_with(
        &mut self,
        descriptor: &'static AlgorithmDescriptor,
    ) -> Result<HandleId, RegistryError> {
        let seed = self.config.default_seed;
        let generator = Generator::allocate_seeded(descriptor, seed)?;

        let id = match self.free_list.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.generator = Some(generator);
                HandleId::new(index, slot.generation)
            }
            None => {
                let index = u32::try_from(self.slots.len())
                    .map_err(|_| RegistryError::Config("slot table exhausted".to_string()))?;
                self.slots
                    .try_reserve(1)
                    .map_err(RegistryError::Allocation)?;
                self.free_list
                    .try_reserve(self.slots.len() + 1 - self.free_list.len())
                    .map_err(RegistryError::Allocation)?;
                self.slots.push(Slot {
                    generation: 0,
                    generator: Some(generator),
                });
                HandleId::new(index, 0)
            }
        };

        self.live += 1;
        debug!(handle = %id, algorithm = descriptor.name(), seed, "allocated generator");
        Ok(id)
    }

    /// Releases the generator behind `id`.
    ///
    /// Returns `false` without touching any other generator if `id` is stale
    /// (never allocated, or already freed).
    ///
    /// Each free bumps the slot's 32-bit generation, wrapping at `u32::MAX`.
    /// After 2^32 reuses of one slot a stale id matches again and reaches the
    /// slot's current generator.
    pub fn free(&mut self, id: HandleId) -> bool {
        if !self.contains(id) {
            warn!(handle = %id, "ignoring free of stale generator handle");
            return false;
        }

        let slot = &mut self.slots[id.index() as usize];
        let released = slot.generator.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.index());
        self.live -= 1;

        debug!(
            handle = %id,
            algorithm = released.as_ref().map(Generator::name),
            "freed generator"
        );
        true
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Borrows the generator behind `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StaleHandle`] if `id` is not live.
    pub fn get(&self, id: HandleId) -> Result<&Generator, RegistryError> {
        self.slots
            .get(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.generator.as_ref())
            .ok_or_else(|| stale(id))
    }

    /// Mutably borrows the generator behind `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StaleHandle`] if `id` is not live.
    pub fn get_mut(&mut self, id: HandleId) -> Result<&mut Generator, RegistryError> {
        self.slots
            .get_mut(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.generator.as_mut())
            .ok_or_else(|| stale(id))
    }

    /// Runs `f` with the generator behind `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StaleHandle`] if `id` is not live.
    pub fn with_generator<R>(
        &mut self,
        id: HandleId,
        f: impl FnOnce(&mut Generator) -> R,
    ) -> Result<R, RegistryError> {
        self.get_mut(id).map(f)
    }

    // ========================================================================
    // Seeding & Queries
    // ========================================================================

    /// Reseeds the generator behind `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StaleHandle`] if `id` is not live.
    pub fn seed(&mut self, id: HandleId, seed: u64) -> Result<(), RegistryError> {
        self.get_mut(id)?.seed(seed);
        trace!(handle = %id, seed, "reseeded generator");
        Ok(())
    }

    /// Algorithm name of the generator behind `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StaleHandle`] if `id` is not live.
    pub fn name(&self, id: HandleId) -> Result<&'static str, RegistryError> {
        self.get(id).map(Generator::name)
    }

    /// State size in bytes of the generator behind `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StaleHandle`] if `id` is not live.
    pub fn size(&self, id: HandleId) -> Result<usize, RegistryError> {
        self.get(id).map(Generator::size)
    }

    /// Smallest raw value of the generator behind `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StaleHandle`] if `id` is not live.
    pub fn min(&self, id: HandleId) -> Result<u64, RegistryError> {
        self.get(id).map(Generator::min)
    }

    /// Largest raw value of the generator behind `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StaleHandle`] if `id` is not live.
    pub fn max(&self, id: HandleId) -> Result<u64, RegistryError> {
        self.get(id).map(Generator::max)
    }

    // ========================================================================
    // Draws
    // ========================================================================

    /// Raw integer draw.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StaleHandle`] if `id` is not live.
    pub fn next_raw(&mut self, id: HandleId) -> Result<u64, RegistryError> {
        self.get_mut(id).map(Generator::next_raw)
    }

    /// Uniform draw in `[0, 1)`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StaleHandle`] if `id` is not live.
    pub fn next_uniform(&mut self, id: HandleId) -> Result<f64, RegistryError> {
        self.get_mut(id).map(Generator::next_uniform)
    }

    /// Uniform draw in `(0, 1)`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StaleHandle`] if `id` is not live.
    pub fn next_uniform_positive(&mut self, id: HandleId) -> Result<f64, RegistryError> {
        self.get_mut(id).map(Generator::next_uniform_positive)
    }

    /// Normal deviate with standard deviation `sigma` (polar method).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StaleHandle`] if `id` is not live.
    pub fn gaussian(&mut self, id: HandleId, sigma: f64) -> Result<f64, RegistryError> {
        self.get_mut(id).map(|g| gaussian::gaussian(g, sigma))
    }

    /// Standard normal deviate (polar method).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StaleHandle`] if `id` is not live.
    pub fn ugaussian(&mut self, id: HandleId) -> Result<f64, RegistryError> {
        self.gaussian(id, 1.0)
    }

    /// Normal deviate with standard deviation `sigma` (ratio of uniforms).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StaleHandle`] if `id` is not live.
    pub fn gaussian_ratio_method(
        &mut self,
        id: HandleId,
        sigma: f64,
    ) -> Result<f64, RegistryError> {
        self.get_mut(id)
            .map(|g| gaussian::gaussian_ratio_method(g, sigma))
    }

    /// Standard normal deviate (ratio of uniforms).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::StaleHandle`] if `id` is not live.
    pub fn ugaussian_ratio_method(&mut self, id: HandleId) -> Result<f64, RegistryError> {
        self.gaussian_ratio_method(id, 1.0)
    }
}

fn stale(id: HandleId) -> RegistryError {
    warn!(handle = %id, "use of stale generator handle");
    RegistryError::StaleHandle(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandy_rng::DEFAULT_SEED;

    fn registry() -> GeneratorRegistry {
        GeneratorRegistry::new(RegistryConfig::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_unknown_default() {
        let config = RegistryConfig {
            default_algorithm: "missing".to_string(),
            ..RegistryConfig::default()
        };
        let err = GeneratorRegistry::new(config).unwrap_err();
        assert!(matches!(err, RegistryError::Config(_)));
    }

    #[test]
    fn test_allocate_and_free_counts() {
        let mut reg = registry();
        assert!(reg.is_empty());

        let a = reg.allocate("ranlxd1").unwrap();
        let b = reg.allocate("mt19937").unwrap();
        assert_eq!(reg.len(), 2);
        assert!(reg.contains(a) && reg.contains(b));

        assert!(reg.free(a));
        assert_eq!(reg.len(), 1);
        assert!(!reg.contains(a));
        assert!(reg.contains(b));
    }

    #[test]
    fn test_slot_reuse_bumps_generation() {
        let mut reg = registry();
        let a = reg.allocate_default().unwrap();
        reg.free(a);
        let b = reg.allocate_default().unwrap();

        assert_eq!(a.index(), b.index());
        assert_eq!(b.generation(), a.generation() + 1);
        assert_eq!(reg.next_raw(a), Err(RegistryError::StaleHandle(a)));
        assert!(reg.next_raw(b).is_ok());
    }

    #[test]
    fn test_free_list_capacity_covers_slots() {
        let mut reg = registry();
        let ids: Vec<HandleId> = (0..10).map(|_| reg.allocate_default().unwrap()).collect();
        assert!(reg.free_list.capacity() >= reg.slots.len());
        for id in ids {
            assert!(reg.free(id));
        }
        assert!(reg.is_empty());
        assert_eq!(reg.free_list.len(), 10);
    }

    #[test]
    fn test_unknown_algorithm() {
        let mut reg = registry();
        let err = reg.allocate("taus").unwrap_err();
        assert!(matches!(err, RegistryError::Rng(_)));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_queries() {
        let mut reg = registry();
        let id = reg.allocate("mt19937").unwrap();
        assert_eq!(reg.name(id).unwrap(), "mt19937");
        assert_eq!(reg.size(id).unwrap(), descriptor::MT19937.size());
        assert_eq!(reg.min(id).unwrap(), 0);
        assert_eq!(reg.max(id).unwrap(), 0xffff_ffff);
    }

    #[test]
    fn test_configured_seed_applies() {
        let config = RegistryConfig {
            default_algorithm: "mt19937".to_string(),
            default_seed: 5489,
            capacity_hint: 4,
        };
        let mut reg = GeneratorRegistry::new(config).unwrap();
        let id = reg.allocate_default().unwrap();
        assert_eq!(reg.next_raw(id).unwrap(), 3_499_211_612);
    }

    #[test]
    fn test_default_config_matches_plain_allocate() {
        let mut reg = registry();
        let id = reg.allocate("mt19937").unwrap();
        let mut direct = Generator::allocate(&descriptor::MT19937).unwrap();
        for _ in 0..100 {
            assert_eq!(reg.next_raw(id).unwrap(), direct.next_raw());
        }
    }

    #[test]
    fn test_non_default_seed_departs_from_plain_allocate() {
        let config = RegistryConfig {
            default_seed: DEFAULT_SEED + 1,
            ..RegistryConfig::default()
        };
        let mut reg = GeneratorRegistry::new(config).unwrap();
        let id = reg.allocate_default().unwrap();
        let mut direct = Generator::allocate(&descriptor::RANLXD2).unwrap();
        let ours: Vec<u64> = (0..8).map(|_| reg.next_raw(id).unwrap()).collect();
        let plain: Vec<u64> = (0..8).map(|_| direct.next_raw()).collect();
        assert_ne!(ours, plain);
    }

    #[test]
    fn test_generation_wraps_after_u32_max_reuses() {
        let mut reg = registry();
        let old = reg.allocate_default().unwrap();
        assert_eq!(old.generation(), 0);
        assert!(reg.free(old));

        // Fast-forward the freed slot to its last generation.
        reg.slots[old.index() as usize].generation = u32::MAX;

        let last = reg.allocate_default().unwrap();
        assert_eq!(last.index(), old.index());
        assert_eq!(last.generation(), u32::MAX);
        assert!(!reg.contains(old));
        assert!(reg.free(last));

        // The generation has wrapped, so the oldest id is live again.
        let reused = reg.allocate_default().unwrap();
        assert_eq!(reused, old);
        assert!(reg.contains(old));
    }

    #[test]
    fn test_handles_lists_live_ids() {
        let mut reg = registry();
        let a = reg.allocate_default().unwrap();
        let b = reg.allocate_default().unwrap();
        let c = reg.allocate_default().unwrap();
        reg.free(b);
        let live: Vec<HandleId> = reg.handles().collect();
        assert_eq!(live, vec![a, c]);
    }

    #[test]
    fn test_with_generator() {
        let mut reg = registry();
        let id = reg.allocate_default().unwrap();
        let name = reg.with_generator(id, |g| g.name()).unwrap();
        assert_eq!(name, "ranlxd2");
        reg.free(id);
        assert!(reg.with_generator(id, |g| g.next_raw()).is_err());
    }
}
