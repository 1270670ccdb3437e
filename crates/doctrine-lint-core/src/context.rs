//! Context type for rule execution.

use crate::capability::{Capability, CapabilityRegistry, Classification};
use crate::descriptor::RuleDescriptor;
use crate::model::{PropertyDescriptor, TypeDescriptor, TypeRef};
use crate::types::{Location, Violation};

/// Context provided to rules for one type.
///
/// Borrows the descriptor, its classification and the shared registry;
/// rules read from it and build violations through its helpers.
#[derive(Debug, Clone, Copy)]
pub struct TypeContext<'a> {
    /// The type under evaluation.
    pub ty: &'a TypeDescriptor,
    /// Capabilities and categories of the type.
    pub classification: &'a Classification,
    /// Registry used for return-type classification.
    pub registry: &'a CapabilityRegistry,
}

impl<'a> TypeContext<'a> {
    /// Creates a new type context.
    #[must_use]
    pub fn new(
        ty: &'a TypeDescriptor,
        classification: &'a Classification,
        registry: &'a CapabilityRegistry,
    ) -> Self {
        Self {
            ty,
            classification,
            registry,
        }
    }

    /// Returns true if the type has `capability`.
    #[must_use]
    pub fn has(&self, capability: Capability) -> bool {
        self.classification.has(capability)
    }

    /// Finds a property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&'a PropertyDescriptor> {
        self.ty.find_property(name)
    }

    /// Returns true if `type_ref` classifies under `capability`, either
    /// directly or through one of its interfaces.
    #[must_use]
    pub fn type_ref_has(&self, type_ref: &TypeRef, capability: Capability) -> bool {
        self.registry.capabilities_of(&type_ref.name).contains(&capability)
            || type_ref
                .interfaces
                .iter()
                .any(|i| self.registry.capabilities_of(i).contains(&capability))
    }

    /// Creates a violation located at the type declaration.
    #[must_use]
    pub fn at_type(&self, descriptor: &RuleDescriptor, arguments: Vec<String>) -> Violation {
        Violation::from_descriptor(descriptor, self.ty.location.clone(), arguments)
    }

    /// Creates a violation located at a member declaration.
    #[must_use]
    pub fn at(
        &self,
        descriptor: &RuleDescriptor,
        location: &Location,
        arguments: Vec<String>,
    ) -> Violation {
        Violation::from_descriptor(descriptor, location.clone(), arguments)
    }
}
