//! Many independent generators ticked together.

use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

use crate::base::GenerationReport;
use crate::config::GenerationConfig;
use crate::generator::Generator;
use crate::periodic::GenerationController;

new_key_type! {
    pub struct GeneratorKey;
}

/// Each entry owns its own sequence, curve and periodic task; nothing is
/// shared between entries.
#[derive(Default)]
pub struct GeneratorPool {
    controllers: SlotMap<GeneratorKey, GenerationController<Generator>>,
}

impl GeneratorPool {
    pub fn new() -> Self {
        Self {
            controllers: SlotMap::with_key(),
        }
    }

    /// Build, initialize and store a generator.
    pub fn insert(&mut self, config: GenerationConfig) -> GeneratorKey {
        let mut controller = GenerationController::new(Generator::from_config(config));
        controller.initialize();
        self.controllers.insert(controller)
    }

    pub fn remove(&mut self, key: GeneratorKey) -> Option<GenerationController<Generator>> {
        self.controllers.remove(key)
    }

    pub fn get(&self, key: GeneratorKey) -> Option<&GenerationController<Generator>> {
        self.controllers.get(key)
    }

    pub fn get_mut(&mut self, key: GeneratorKey) -> Option<&mut GenerationController<Generator>> {
        self.controllers.get_mut(key)
    }

    /// Tick every generator, collecting the batches that closed.
    pub fn tick_all(&mut self, dt: Duration) -> Vec<(GeneratorKey, GenerationReport)> {
        self.controllers
            .iter_mut()
            .filter_map(|(key, controller)| controller.tick(dt).map(|report| (key, report)))
            .collect()
    }

    pub fn keys(&self) -> impl Iterator<Item = GeneratorKey> + '_ {
        self.controllers.keys()
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}
