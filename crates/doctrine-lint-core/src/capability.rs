//! Capability markers and doctrine classification.
//!
//! A type is subject to a doctrine because it implements a *capability
//! marker* interface. The [`CapabilityRegistry`] maps interface display names
//! to [`Capability`] tags; [`Classification`] adds the derived
//! [`DoctrineCategory`] set that rules select on.
//!
//! Matching strips generic arguments (`IResult<int>`) and metadata arity
//! suffixes (``IResult`1``) before comparing qualified names, so the
//! generic arity of a marker can be pinned explicitly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::model::TypeDescriptor;

/// A capability signalled by implementing a marker interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// `IResult`.
    Result,
    /// `IResult<TValue>`.
    ResultOfValue,
    /// `IEnvelope<TCode, TError>`.
    Envelope,
    /// `IEnvelope<TCode, TError, TValue>`.
    EnvelopeOfValue,
    /// `IHeaderedEnvelope<...>`.
    HeaderedEnvelope,
    /// `IStreamableEnvelope<...>`.
    StreamableEnvelope,
    /// `IMetadata`.
    Metadata,
    /// `IErrorInfo<TErrorDefinition>`.
    ErrorInfo,
    /// `ICode<TCodeDefinition>`.
    Code,
    /// `IValidationContext`.
    ValidationContext,
    /// `IErrorInfoBuilder<...>`.
    ErrorInfoBuilder,
    /// `IMetadataBuilder`.
    MetadataBuilder,
    /// `IEnvelopeBuilder<TCode, TError>`.
    EnvelopeBuilder,
    /// `IHandler<...>`.
    Handler,
    /// `IPolicy<...>`.
    Policy,
}

impl Capability {
    /// Doctrine categories implied by this capability.
    #[must_use]
    pub fn categories(self) -> &'static [DoctrineCategory] {
        use DoctrineCategory::{
            BuilderContract, EnvelopeContract, ErrorContract, ImmutableContract, MetadataContract,
            ResultContract, StatelessComponent, ValidationContract,
        };
        match self {
            Self::Result | Self::ResultOfValue => &[ImmutableContract, ResultContract],
            Self::Envelope
            | Self::EnvelopeOfValue
            | Self::HeaderedEnvelope
            | Self::StreamableEnvelope => &[ImmutableContract, EnvelopeContract],
            Self::Metadata => &[ImmutableContract, MetadataContract],
            Self::ErrorInfo => &[ImmutableContract, ErrorContract],
            Self::Code => &[ImmutableContract],
            Self::ValidationContext => &[ImmutableContract, ValidationContract],
            Self::ErrorInfoBuilder => &[ErrorContract, BuilderContract],
            Self::MetadataBuilder => &[MetadataContract, BuilderContract],
            Self::EnvelopeBuilder => &[BuilderContract],
            Self::Handler | Self::Policy => &[StatelessComponent],
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Result => "IResult",
            Self::ResultOfValue => "IResult<T>",
            Self::Envelope => "IEnvelope",
            Self::EnvelopeOfValue => "IEnvelope<T>",
            Self::HeaderedEnvelope => "IHeaderedEnvelope",
            Self::StreamableEnvelope => "IStreamableEnvelope",
            Self::Metadata => "IMetadata",
            Self::ErrorInfo => "IErrorInfo",
            Self::Code => "ICode",
            Self::ValidationContext => "IValidationContext",
            Self::ErrorInfoBuilder => "IErrorInfoBuilder",
            Self::MetadataBuilder => "IMetadataBuilder",
            Self::EnvelopeBuilder => "IEnvelopeBuilder",
            Self::Handler => "IHandler",
            Self::Policy => "IPolicy",
        };
        f.write_str(name)
    }
}

/// A doctrine category a type can be subject to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DoctrineCategory {
    /// Sealed, get-only, no public constructors.
    ImmutableContract,
    /// Result shape and success derivation.
    ResultContract,
    /// Envelope shape and success derivation.
    EnvelopeContract,
    /// Error info shape and error builders.
    ErrorContract,
    /// Validation context factories and success flag.
    ValidationContract,
    /// Metadata and metadata builders.
    MetadataContract,
    /// Fluent builders.
    BuilderContract,
    /// Handlers and policies that must not hold mutable state.
    StatelessComponent,
}

impl std::fmt::Display for DoctrineCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ImmutableContract => "immutable-contract",
            Self::ResultContract => "result-contract",
            Self::EnvelopeContract => "envelope-contract",
            Self::ErrorContract => "error-contract",
            Self::ValidationContract => "validation-contract",
            Self::MetadataContract => "metadata-contract",
            Self::BuilderContract => "builder-contract",
            Self::StatelessComponent => "stateless-component",
        };
        f.write_str(name)
    }
}

/// A marker interface known to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// Fully qualified interface name without generic arguments.
    pub name: String,
    /// Required generic arity; `None` matches any arity.
    #[serde(default)]
    pub arity: Option<usize>,
    /// Capabilities granted by implementing this marker.
    pub capabilities: Vec<Capability>,
}

impl Marker {
    /// Creates a marker matching any generic arity.
    #[must_use]
    pub fn new(name: impl Into<String>, capabilities: &[Capability]) -> Self {
        Self {
            name: name.into(),
            arity: None,
            capabilities: capabilities.to_vec(),
        }
    }

    /// Pins the generic arity this marker matches.
    #[must_use]
    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }

    fn matches(&self, name: &str, arity: usize) -> bool {
        self.name == name && self.arity.map_or(true, |a| a == arity)
    }
}

const RESULTS: &str = "Zentient.Abstractions.Results";
const ENVELOPES: &str = "Zentient.Abstractions.Envelopes";

/// Registry of known capability markers.
///
/// Immutable once built; shared by reference across worker threads.
#[derive(Debug, Clone)]
pub struct CapabilityRegistry {
    markers: Vec<Marker>,
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::zentient()
    }
}

impl CapabilityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            markers: Vec::new(),
        }
    }

    /// The registry of Zentient abstraction markers.
    #[must_use]
    pub fn zentient() -> Self {
        use Capability::{
            Code, Envelope, EnvelopeBuilder, EnvelopeOfValue, ErrorInfo, ErrorInfoBuilder,
            Handler, HeaderedEnvelope, Metadata, MetadataBuilder, Policy, Result, ResultOfValue,
            StreamableEnvelope, ValidationContext,
        };

        let mut markers = vec![
            Marker::new(format!("{RESULTS}.IResult"), &[Result]).with_arity(0),
            Marker::new(format!("{RESULTS}.IResult"), &[Result, ResultOfValue]).with_arity(1),
            Marker::new(format!("{ENVELOPES}.IEnvelope"), &[Envelope]).with_arity(2),
            Marker::new(format!("{ENVELOPES}.IEnvelope"), &[Envelope, EnvelopeOfValue])
                .with_arity(3),
        ];
        for (iface, extra) in [
            ("IHeaderedEnvelope", HeaderedEnvelope),
            ("IStreamableEnvelope", StreamableEnvelope),
        ] {
            let name = format!("{ENVELOPES}.{iface}");
            markers.push(Marker::new(name.clone(), &[Envelope, extra]).with_arity(2));
            markers.push(Marker::new(name, &[Envelope, EnvelopeOfValue, extra]).with_arity(3));
        }
        markers.extend([
            Marker::new("Zentient.Abstractions.Metadata.IMetadata", &[Metadata]),
            Marker::new("Zentient.Abstractions.Errors.IErrorInfo", &[ErrorInfo]),
            Marker::new("Zentient.Abstractions.Codes.ICode", &[Code]),
            Marker::new(
                "Zentient.Abstractions.Validation.IValidationContext",
                &[ValidationContext],
            ),
            Marker::new(
                "Zentient.Abstractions.Errors.Builders.IErrorInfoBuilder",
                &[ErrorInfoBuilder],
            ),
            Marker::new(
                "Zentient.Abstractions.Metadata.Builders.IMetadataBuilder",
                &[MetadataBuilder],
            ),
            Marker::new(format!("{ENVELOPES}.Builders.IEnvelopeBuilder"), &[EnvelopeBuilder]),
            Marker::new("Zentient.Abstractions.Handlers.IHandler", &[Handler]),
            Marker::new("Zentient.Abstractions.Policies.IPolicy", &[Policy]),
        ]);

        Self { markers }
    }

    /// Adds a marker to the registry.
    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    /// Adds several markers to the registry.
    #[must_use]
    pub fn with_markers<I: IntoIterator<Item = Marker>>(mut self, markers: I) -> Self {
        self.markers.extend(markers);
        self
    }

    /// Returns the registered markers.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Capabilities granted by a single interface display name.
    ///
    /// Unknown names yield an empty set.
    #[must_use]
    pub fn capabilities_of(&self, interface: &str) -> BTreeSet<Capability> {
        let (name, arity) = split_generic_arity(interface);
        self.markers
            .iter()
            .filter(|m| m.matches(name, arity))
            .flat_map(|m| m.capabilities.iter().copied())
            .collect()
    }

    /// Classifies a set of implemented interfaces.
    #[must_use]
    pub fn classify_interfaces<I, S>(&self, interfaces: I) -> Classification
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let capabilities = interfaces
            .into_iter()
            .flat_map(|i| self.capabilities_of(i.as_ref()))
            .collect();
        Classification::from_capabilities(capabilities)
    }

    /// Classifies a type by its implemented interfaces.
    #[must_use]
    pub fn classify(&self, ty: &TypeDescriptor) -> Classification {
        self.classify_interfaces(&ty.interfaces)
    }
}

/// Splits a display name into its base name and generic arity.
///
/// Handles both `Ns.IFoo<A, B<C>>` and metadata-style ``Ns.IFoo`2`` names.
#[must_use]
pub fn split_generic_arity(display_name: &str) -> (&str, usize) {
    let trimmed = display_name.trim().trim_start_matches("global::");

    if let Some(open) = trimmed.find('<') {
        let args = trimmed[open + 1..].trim_end_matches('>');
        // Open generics (`IResult<>`, `IEnvelope<,>`) count one slot per comma too.
        let mut depth = 0usize;
        let mut arity = 1usize;
        for c in args.chars() {
            match c {
                '<' => depth += 1,
                '>' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => arity += 1,
                _ => {}
            }
        }
        return (trimmed[..open].trim_end(), arity);
    }

    if let Some((base, suffix)) = trimmed.rsplit_once('`') {
        if let Ok(arity) = suffix.parse::<usize>() {
            return (base, arity);
        }
    }

    (trimmed, 0)
}

/// The capabilities and doctrine categories a type is subject to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    capabilities: BTreeSet<Capability>,
    categories: BTreeSet<DoctrineCategory>,
}

impl Classification {
    /// Builds a classification from a capability set.
    #[must_use]
    pub fn from_capabilities(capabilities: BTreeSet<Capability>) -> Self {
        let categories = capabilities
            .iter()
            .flat_map(|c| c.categories().iter().copied())
            .collect();
        Self {
            capabilities,
            categories,
        }
    }

    /// Returns true if no known marker matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    /// Returns true if the type has `capability`.
    #[must_use]
    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Returns true if the type has any of `capabilities`.
    #[must_use]
    pub fn has_any(&self, capabilities: &[Capability]) -> bool {
        capabilities.iter().any(|c| self.has(*c))
    }

    /// Returns true if the type is subject to `category`.
    #[must_use]
    pub fn in_category(&self, category: DoctrineCategory) -> bool {
        self.categories.contains(&category)
    }

    /// Iterates over the capabilities in stable order.
    pub fn capabilities(&self) -> impl Iterator<Item = Capability> + '_ {
        self.capabilities.iter().copied()
    }

    /// Iterates over the doctrine categories in stable order.
    pub fn categories(&self) -> impl Iterator<Item = DoctrineCategory> + '_ {
        self.categories.iter().copied()
    }
}
