// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Registry of generator types that can be instantiated on demand.
//! Every type supplies two constructors at registration time,
//! one taking a seed and one taking no arguments.

use std::any::TypeId;

use tracing::debug;

use crate::error::LabError;
use crate::rngs::{RandomGenerator, SeededGenerator};

type SeededConstructor = Box<dyn Fn(i32) -> Box<dyn RandomGenerator>>;
type DefaultConstructor = Box<dyn Fn() -> Box<dyn RandomGenerator>>;

/// Builder collecting the constructors of generator type `T`.
pub struct GeneratorRegistration<T> {
    name: &'static str,
    seeded: Option<Box<dyn Fn(i32) -> T>>,
    default: Option<Box<dyn Fn() -> T>>,
}

impl<T: RandomGenerator + 'static> GeneratorRegistration<T> {
    pub fn new(name: &'static str) -> Self {
        GeneratorRegistration {
            name,
            seeded: None,
            default: None,
        }
    }

    /// Constructor taking exactly one integer seed.
    pub fn seeded(mut self, constructor: impl Fn(i32) -> T + 'static) -> Self {
        self.seeded = Some(Box::new(constructor));
        self
    }

    /// Constructor taking no arguments.
    pub fn default_constructor(mut self, constructor: impl Fn() -> T + 'static) -> Self {
        self.default = Some(Box::new(constructor));
        self
    }
}

/// A registered generator type.
pub struct RegisteredGenerator {
    type_id: TypeId,
    name: &'static str,
    seeded: SeededConstructor,
    default: DefaultConstructor,
}

impl RegisteredGenerator {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fresh generator initialized with `seed`.
    pub fn instantiate(&self, seed: i32) -> Box<dyn RandomGenerator> {
        (self.seeded)(seed)
    }

    /// Fresh generator built by the no argument constructor.
    pub fn instantiate_default(&self) -> Box<dyn RandomGenerator> {
        (self.default)()
    }
}

/// Generator types keyed by type identity.
/// Iteration follows first registration order.
#[derive(Default)]
pub struct GeneratorRegistry {
    generators: Vec<RegisteredGenerator>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` with explicitly supplied constructors.
    /// Fails without touching the registry if either constructor is missing.
    /// Registering the same type again replaces the earlier entry.
    pub fn register<T: RandomGenerator + 'static>(
        &mut self,
        registration: GeneratorRegistration<T>,
    ) -> Result<(), LabError> {
        let name = registration.name;
        let seeded = registration
            .seeded
            .ok_or(LabError::InvalidConstructorShape {
                generator: name,
                missing: "seeded",
            })?;
        let default = registration
            .default
            .ok_or(LabError::InvalidConstructorShape {
                generator: name,
                missing: "default",
            })?;
        let entry = RegisteredGenerator {
            type_id: TypeId::of::<T>(),
            name,
            seeded: Box::new(move |seed| Box::new(seeded(seed)) as Box<dyn RandomGenerator>),
            default: Box::new(move || Box::new(default()) as Box<dyn RandomGenerator>),
        };
        match self
            .generators
            .iter_mut()
            .find(|g| g.type_id == entry.type_id)
        {
            Some(existing) => {
                debug!(generator = name, "replacing registration");
                *existing = entry;
            }
            None => {
                debug!(generator = name, "registered generator");
                self.generators.push(entry);
            }
        }
        Ok(())
    }

    /// Register a generator using the constructors of its SeededGenerator impl.
    pub fn register_generator<T: SeededGenerator>(&mut self) -> Result<(), LabError> {
        self.register(
            GeneratorRegistration::new(T::NAME)
                .seeded(T::new)
                .default_constructor(T::from_entropy),
        )
    }

    pub fn get<T: 'static>(&self) -> Option<&RegisteredGenerator> {
        let type_id = TypeId::of::<T>();
        self.generators.iter().find(|g| g.type_id == type_id)
    }

    /// Fresh instance of `T` initialized with `seed`, if `T` is registered.
    pub fn instantiate<T: 'static>(&self, seed: i32) -> Option<Box<dyn RandomGenerator>> {
        self.get::<T>().map(|g| g.instantiate(seed))
    }

    /// Fresh default-constructed instance of `T`, if `T` is registered.
    pub fn instantiate_default<T: 'static>(&self) -> Option<Box<dyn RandomGenerator>> {
        self.get::<T>().map(|g| g.instantiate_default())
    }

    pub fn generators(&self) -> impl Iterator<Item = &RegisteredGenerator> {
        self.generators.iter()
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rngs::lcg::LinearCongruentialGenerator;
    use crate::rngs::SystemGenerator;

    struct Constant(i32);

    impl RandomGenerator for Constant {
        fn next(&mut self) -> i32 {
            self.0
        }
    }

    #[test]
    fn instances_are_fresh_and_independent() {
        let mut registry = GeneratorRegistry::new();
        registry
            .register_generator::<LinearCongruentialGenerator>()
            .unwrap();
        let mut a = registry
            .instantiate::<LinearCongruentialGenerator>(0)
            .unwrap();
        assert_eq!(a.next(), 2147483587);
        let mut b = registry
            .instantiate::<LinearCongruentialGenerator>(0)
            .unwrap();
        assert_eq!(b.next(), 2147483587);
        assert!(registry.instantiate::<SystemGenerator>(0).is_none());
    }

    #[test]
    fn default_constructor_is_used() {
        let mut registry = GeneratorRegistry::new();
        registry
            .register(
                GeneratorRegistration::new("Constant")
                    .seeded(Constant)
                    .default_constructor(|| Constant(7)),
            )
            .unwrap();
        let mut r = registry.instantiate_default::<Constant>().unwrap();
        assert_eq!(r.next(), 7);
        let mut r = registry.instantiate::<Constant>(3).unwrap();
        assert_eq!(r.next(), 3);
    }

    #[test]
    fn missing_seeded_constructor_is_rejected() {
        let mut registry = GeneratorRegistry::new();
        registry.register_generator::<SystemGenerator>().unwrap();
        let err = registry
            .register(GeneratorRegistration::new("Constant").default_constructor(|| Constant(1)))
            .unwrap_err();
        assert!(matches!(
            err,
            LabError::InvalidConstructorShape {
                generator: "Constant",
                missing: "seeded"
            }
        ));
        assert!(registry.get::<Constant>().is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn missing_default_constructor_is_rejected() {
        let mut registry = GeneratorRegistry::new();
        let err = registry
            .register(GeneratorRegistration::new("Constant").seeded(Constant))
            .unwrap_err();
        assert!(matches!(
            err,
            LabError::InvalidConstructorShape {
                missing: "default",
                ..
            }
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn reregistering_replaces_entry() {
        let mut registry = GeneratorRegistry::new();
        registry
            .register(
                GeneratorRegistration::new("Constant")
                    .seeded(Constant)
                    .default_constructor(|| Constant(1)),
            )
            .unwrap();
        registry.register_generator::<SystemGenerator>().unwrap();
        registry
            .register(
                GeneratorRegistration::new("Constant")
                    .seeded(|s| Constant(s + 100))
                    .default_constructor(|| Constant(2)),
            )
            .unwrap();
        assert_eq!(registry.len(), 2);
        let names: Vec<_> = registry.generators().map(|g| g.name()).collect();
        assert_eq!(names, ["Constant", "SystemGenerator"]);
        let mut r = registry.instantiate::<Constant>(1).unwrap();
        assert_eq!(r.next(), 101);
    }
}
