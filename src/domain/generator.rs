//! Stateful value generators bound into scaffold positions.
//!
//! Placement is identity-sharing: one generator instance may be written into
//! several positions of the scaffold, and every position observes the same
//! mutable state. Instances are therefore handled as [`SharedGenerator`]
//! (`Arc`) with interior `Mutex` state, so the handles stay `Send` when the
//! surrounding tool embeds them in an async host. Nothing in this crate
//! contends on the locks; all writes happen during the synchronous placement
//! pass and all reads happen afterwards during value synthesis.

use std::sync::{Arc, Mutex};

use rand::Rng;
use serde_json::{json, Value};

use crate::domain::error::GenerationError;

/// Shared handle to one generator instance
pub type SharedGenerator = Arc<Generator>;

/// The four generator variants
#[derive(Debug)]
pub enum Generator {
    /// Holds an externally assigned value; allocated by placement, assigned
    /// by a later stage, read during synthesis
    Static(Mutex<Option<Value>>),
    /// A counter returning its current value then incrementing by one
    Incremental(Mutex<i64>),
    /// A budget drained by uniform random draws in `[0, remaining]`
    Sum(Mutex<i64>),
    /// A fixed numeric value; only used to seed a derived [`Generator::Sum`]
    Value(i64),
}

impl Generator {
    /// A static generator with no value assigned yet
    pub fn unassigned() -> SharedGenerator {
        Arc::new(Generator::Static(Mutex::new(None)))
    }

    /// A counter starting at `start` (the conventional start is 0)
    pub fn counter(start: i64) -> SharedGenerator {
        Arc::new(Generator::Incremental(Mutex::new(start)))
    }

    /// A sum-to-n generator with `total` remaining budget
    pub fn sum(total: i64) -> SharedGenerator {
        Arc::new(Generator::Sum(Mutex::new(total)))
    }

    /// A value holder producing `value` verbatim
    pub fn fixed(value: i64) -> SharedGenerator {
        Arc::new(Generator::Value(value))
    }

    /// Derive a sum-to-n generator seeded with this holder's value.
    /// Only meaningful on [`Generator::Value`].
    pub fn derive_sum(&self) -> Result<SharedGenerator, GenerationError> {
        match self {
            Generator::Value(total) => Ok(Generator::sum(*total)),
            _ => Err(GenerationError::Engine(
                "sum generators can only be derived from a value holder".to_string(),
            )),
        }
    }

    /// Assign the value a static generator will produce. A no-op on the
    /// other variants, whose state is fixed at construction.
    pub fn assign(&self, value: Value) {
        if let Generator::Static(slot) = self {
            *slot.lock().unwrap() = Some(value);
        }
    }

    /// True for static generators still waiting for an assignment
    pub fn is_unassigned_static(&self) -> bool {
        match self {
            Generator::Static(slot) => slot.lock().unwrap().is_none(),
            _ => false,
        }
    }

    /// Produce the next value according to the variant's read semantics.
    pub fn read(&self) -> Result<Value, GenerationError> {
        match self {
            Generator::Static(slot) => slot
                .lock()
                .unwrap()
                .clone()
                .ok_or(GenerationError::UnassignedStatic),
            Generator::Incremental(counter) => {
                let mut counter = counter.lock().unwrap();
                let current = *counter;
                *counter += 1;
                Ok(json!(current))
            }
            Generator::Sum(remaining) => {
                let mut remaining = remaining.lock().unwrap();
                let drawn = if *remaining > 0 {
                    rand::thread_rng().gen_range(0..=*remaining)
                } else {
                    0
                };
                *remaining -= drawn;
                Ok(json!(drawn))
            }
            Generator::Value(value) => Ok(json!(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_read_before_assignment() {
        let generator = Generator::unassigned();
        assert!(matches!(
            generator.read(),
            Err(GenerationError::UnassignedStatic)
        ));
        assert!(generator.is_unassigned_static());
    }

    #[test]
    fn test_static_read_after_assignment() {
        let generator = Generator::unassigned();
        generator.assign(json!("recorded"));
        assert_eq!(generator.read().unwrap(), json!("recorded"));
        // Reads do not consume the value
        assert_eq!(generator.read().unwrap(), json!("recorded"));
    }

    #[test]
    fn test_counter_contiguous_sequence() {
        let generator = Generator::counter(0);
        for expected in 0..5 {
            assert_eq!(generator.read().unwrap(), json!(expected));
        }
    }

    #[test]
    fn test_counter_shared_handles_observe_one_state() {
        let generator = Generator::counter(0);
        let alias = generator.clone();
        assert_eq!(generator.read().unwrap(), json!(0));
        assert_eq!(alias.read().unwrap(), json!(1));
        assert_eq!(generator.read().unwrap(), json!(2));
    }

    #[test]
    fn test_sum_draws_within_budget() {
        let generator = Generator::sum(100);
        let mut drawn_total = 0;
        for _ in 0..10 {
            let drawn = generator.read().unwrap().as_i64().unwrap();
            assert!((0..=100).contains(&drawn));
            drawn_total += drawn;
        }
        // The budget drains toward zero but is never overdrawn
        assert!(drawn_total <= 100);
    }

    #[test]
    fn test_sum_exhausted_budget_draws_zero() {
        let generator = Generator::sum(0);
        assert_eq!(generator.read().unwrap(), json!(0));
        assert_eq!(generator.read().unwrap(), json!(0));
    }

    #[test]
    fn test_value_holder_produces_seed() {
        let holder = Generator::fixed(42);
        assert_eq!(holder.read().unwrap(), json!(42));

        let sum = holder.derive_sum().unwrap();
        let drawn = sum.read().unwrap().as_i64().unwrap();
        assert!((0..=42).contains(&drawn));
    }

    #[test]
    fn test_derive_sum_rejects_other_variants() {
        assert!(Generator::counter(0).derive_sum().is_err());
    }
}
