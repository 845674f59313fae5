//! Built-in rules.
//!
//! Each rule is a small predicate over one block (or one block plus its
//! module). Providers are gated by cargo features; [`register_all`] adds every
//! enabled rule to a registry.

#![forbid(unsafe_code)]

pub mod ids;

#[cfg(feature = "aws")]
mod aws;
#[cfg(feature = "azure")]
mod azure;
#[cfg(feature = "digitalocean")]
mod digitalocean;
#[cfg(feature = "google")]
mod google;

#[cfg(test)]
mod test_support;

use infraguard_rules::{RegistryError, Rule, RuleRegistry};

/// Every rule compiled into this build.
pub fn builtin_rules() -> Vec<Rule> {
    #[allow(unused_mut)]
    let mut rules = Vec::new();

    #[cfg(feature = "aws")]
    rules.extend(aws::rules());
    #[cfg(feature = "azure")]
    rules.extend(azure::rules());
    #[cfg(feature = "digitalocean")]
    rules.extend(digitalocean::rules());
    #[cfg(feature = "google")]
    rules.extend(google::rules());

    rules
}

pub fn register_all(registry: &mut RuleRegistry) -> Result<(), RegistryError> {
    for rule in builtin_rules() {
        registry.register(rule)?;
    }
    Ok(())
}
