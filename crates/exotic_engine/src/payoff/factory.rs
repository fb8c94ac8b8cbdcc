//! Name-based payoff construction.
//!
//! The engine consumes payoffs through [`PayoffFactory`]; it never maps names
//! itself. [`PayoffRegistry`] is an explicit, caller-owned implementation with
//! no global state.

use std::collections::HashMap;

use super::contract::Payoff;
use super::error::PayoffError;

/// Creates payoffs from a name and numeric arguments.
pub trait PayoffFactory {
    /// Builds the payoff registered under `name`.
    ///
    /// # Errors
    ///
    /// Implementations return [`PayoffError`] for an unknown name, the wrong
    /// number of arguments, or invalid terms.
    fn create(&self, name: &str, args: &[f64]) -> Result<Payoff, PayoffError>;
}

/// Builder function taking exactly `arity` arguments.
pub type PayoffBuilder = fn(&[f64]) -> Payoff;

#[derive(Clone, Copy)]
struct Entry {
    arity: usize,
    build: PayoffBuilder,
}

/// Registry of payoff builders keyed by case-insensitive name.
///
/// # Examples
///
/// ```rust
/// use exotic_engine::payoff::{Payoff, PayoffFactory, PayoffRegistry};
///
/// let registry = PayoffRegistry::standard();
/// let payoff = registry.create("Double-Digital", &[90.0, 110.0, 1.0]).unwrap();
/// assert_eq!(payoff, Payoff::double_digital(90.0, 110.0, 1.0));
/// assert!(registry.create("lookback", &[100.0]).is_err());
/// ```
#[derive(Clone, Default)]
pub struct PayoffRegistry {
    entries: HashMap<String, Entry>,
}

impl PayoffRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in payoffs.
    ///
    /// | Name | Arguments |
    /// |------|-----------|
    /// | `call` | strike |
    /// | `put` | strike |
    /// | `double-digital` | lower, upper, payout |
    /// | `asian-call` | strike |
    /// | `asian-put` | strike |
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("call", 1, |args| Payoff::call(args[0]));
        registry.register("put", 1, |args| Payoff::put(args[0]));
        registry.register("double-digital", 3, |args| {
            Payoff::double_digital(args[0], args[1], args[2])
        });
        registry.register("asian-call", 1, |args| Payoff::asian_call(args[0]));
        registry.register("asian-put", 1, |args| Payoff::asian_put(args[0]));
        registry
    }

    /// Registers `build` under `name`, replacing any previous entry.
    ///
    /// `build` is only ever called with exactly `arity` arguments.
    pub fn register(&mut self, name: &str, arity: usize, build: PayoffBuilder) {
        self.entries
            .insert(name.to_lowercase(), Entry { arity, build });
    }

    /// Whether a builder is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_lowercase())
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered builders.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PayoffFactory for PayoffRegistry {
    fn create(&self, name: &str, args: &[f64]) -> Result<Payoff, PayoffError> {
        let entry = self
            .entries
            .get(&name.to_lowercase())
            .ok_or_else(|| PayoffError::UnknownPayoff(name.to_string()))?;

        if args.len() != entry.arity {
            return Err(PayoffError::WrongArity {
                name: name.to_string(),
                expected: entry.arity,
                actual: args.len(),
            });
        }

        let payoff = (entry.build)(args);
        payoff.validate()?;
        Ok(payoff)
    }
}

impl std::fmt::Debug for PayoffRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayoffRegistry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_names() {
        let registry = PayoffRegistry::standard();
        assert_eq!(
            registry.names(),
            vec!["asian-call", "asian-put", "call", "double-digital", "put"]
        );
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = PayoffRegistry::standard();
        assert!(registry.contains("CALL"));
        assert_eq!(registry.create("Put", &[95.0]).unwrap(), Payoff::put(95.0));
    }

    #[test]
    fn test_unknown_name() {
        let registry = PayoffRegistry::standard();
        assert_eq!(
            registry.create("lookback", &[100.0]),
            Err(PayoffError::UnknownPayoff("lookback".to_string()))
        );
    }

    #[test]
    fn test_wrong_arity() {
        let registry = PayoffRegistry::standard();
        let result = registry.create("double-digital", &[90.0, 110.0]);
        assert!(matches!(
            result,
            Err(PayoffError::WrongArity {
                expected: 3,
                actual: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_created_payoff_is_validated() {
        let registry = PayoffRegistry::standard();
        let result = registry.create("double-digital", &[110.0, 90.0, 1.0]);
        assert!(matches!(result, Err(PayoffError::InvalidTerms { .. })));
    }

    #[test]
    fn test_custom_registration_replaces() {
        let mut registry = PayoffRegistry::new();
        assert!(registry.is_empty());
        registry.register("atm", 0, |_| Payoff::call(100.0));
        assert_eq!(registry.create("atm", &[]).unwrap(), Payoff::call(100.0));
        registry.register("ATM", 0, |_| Payoff::put(100.0));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.create("atm", &[]).unwrap(), Payoff::put(100.0));
    }
}
