//! Engine configuration (C6 ambient addition): the capacities, thresholds,
//! and rates the data-model components leave as parameters, gathered
//! behind one constructible, validated surface in the teacher's builder
//! idiom (`TaskBuilder`, `ConceptBuilder`).

use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct KernelConfig {
    pub concept_bag_capacity: usize,
    pub concept_bag_levels: usize,
    pub novel_task_bag_capacity: usize,
    pub novel_task_bag_levels: usize,
    pub term_link_capacity: usize,
    pub task_link_capacity: usize,
    pub max_evidential_base: usize,
    pub max_derivation_chain: usize,
    pub forgetting_rate: f32,
    pub durability_decay: f32,
    pub admission_threshold: f32,
    pub novel_task_expectation_threshold: f32,
    pub reliance: f32,
    pub evidential_horizon: f32,
    pub output_noise_level: f32,
    pub rng_seed: u64,
}

impl Default for KernelConfig {
    fn default() -> Self {
        KernelConfig {
            concept_bag_capacity: 10_000,
            concept_bag_levels: 100,
            novel_task_bag_capacity: 1_000,
            novel_task_bag_levels: 100,
            term_link_capacity: 10,
            task_link_capacity: 10,
            max_evidential_base: 20,
            max_derivation_chain: 10,
            forgetting_rate: 0.95,
            durability_decay: 0.9,
            admission_threshold: 0.01,
            novel_task_expectation_threshold: 0.66,
            reliance: 0.9,
            evidential_horizon: 1.0,
            output_noise_level: 0.0,
            rng_seed: 1,
        }
    }
}

#[derive(Default)]
pub struct KernelConfigBuilder {
    config: KernelConfig,
}

impl KernelConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn concept_bag(mut self, capacity: usize, levels: usize) -> Self {
        self.config.concept_bag_capacity = capacity;
        self.config.concept_bag_levels = levels;
        self
    }

    pub fn novel_task_bag(mut self, capacity: usize, levels: usize) -> Self {
        self.config.novel_task_bag_capacity = capacity;
        self.config.novel_task_bag_levels = levels;
        self
    }

    pub fn link_capacities(mut self, term_links: usize, task_links: usize) -> Self {
        self.config.term_link_capacity = term_links;
        self.config.task_link_capacity = task_links;
        self
    }

    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.config.rng_seed = seed;
        self
    }

    pub fn admission_threshold(mut self, threshold: f32) -> Self {
        self.config.admission_threshold = threshold;
        self
    }

    pub fn build(self) -> Result<KernelConfig, ConfigError> {
        let c = self.config;
        if c.concept_bag_levels == 0 || c.novel_task_bag_levels == 0 {
            return Err(ConfigError::InvalidLevels);
        }
        if !(0.0..=1.0).contains(&c.admission_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(c.admission_threshold.into()));
        }
        if !(0.0..=1.0).contains(&c.forgetting_rate) || !(0.0..=1.0).contains(&c.durability_decay) {
            return Err(ConfigError::RateOutOfRange);
        }
        Ok(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(KernelConfigBuilder::new().build().is_ok());
    }

    #[test]
    fn rejects_zero_levels() {
        let result = KernelConfigBuilder::new().concept_bag(100, 0).build();
        assert!(matches!(result, Err(ConfigError::InvalidLevels)));
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        let result = KernelConfigBuilder::new().admission_threshold(1.5).build();
        assert!(result.is_err());
    }
}
