//! Published fee schedule
//!
//! Holds the current [`FeeConfig`] snapshot. Readers clone the `Arc` and
//! keep using it for the whole calculation; a reconfiguration replaces the
//! snapshot in one step, so in-flight calculations never observe a
//! half-updated config.

use std::sync::Arc;

use parking_lot::RwLock;
use ridefare_common::{FeeConfig, Result};
use tracing::info;

/// Atomically replaceable fee configuration
#[derive(Debug)]
pub struct FeeSchedule {
    current: RwLock<Arc<FeeConfig>>,
}

impl FeeSchedule {
    /// Create a schedule from a validated config
    pub fn new(config: FeeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            current: RwLock::new(Arc::new(config)),
        })
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<FeeConfig> {
        Arc::clone(&self.current.read())
    }

    /// Validate and publish a new snapshot, returning the one it replaced
    pub fn publish(&self, config: FeeConfig) -> Result<Arc<FeeConfig>> {
        config.validate()?;
        let next = Arc::new(config);
        let previous = std::mem::replace(&mut *self.current.write(), next);
        info!("Published new fee schedule");
        Ok(previous)
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            current: RwLock::new(Arc::new(FeeConfig::default())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_snapshot_survives_publish() {
        let schedule = FeeSchedule::default();
        let before = schedule.snapshot();

        let updated = FeeConfig {
            stop_fee: dec!(3.00),
            ..FeeConfig::default()
        };
        let previous = schedule.publish(updated).unwrap();

        assert_eq!(before.stop_fee, dec!(2.00));
        assert!(Arc::ptr_eq(&before, &previous));
        assert_eq!(schedule.snapshot().stop_fee, dec!(3.00));
    }

    #[test]
    fn test_publish_rejects_invalid_config() {
        let schedule = FeeSchedule::default();
        let invalid = FeeConfig::default().with_price_bounds(dec!(1), dec!(0));

        assert!(schedule.publish(invalid).is_err());
        assert_eq!(*schedule.snapshot(), FeeConfig::default());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let invalid = FeeConfig {
            recurring_discount_rate: dec!(-0.1),
            ..FeeConfig::default()
        };
        assert!(FeeSchedule::new(invalid).is_err());
    }
}
