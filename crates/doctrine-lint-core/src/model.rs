//! Type descriptor model.
//!
//! The host (a compiler integration, or a test) builds these descriptors
//! from whatever symbol model it has. They carry just enough structure for
//! the doctrine rules: kind and sealing, implemented interfaces, and the
//! shape of properties, constructors and methods.

use serde::{Deserialize, Serialize};

use crate::syntax;
use crate::types::Location;

/// Kind of a declared type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// `class Foo`
    #[default]
    Class,
    /// `interface IFoo`
    Interface,
    /// `struct Foo`
    Struct,
}

/// Declared accessibility of a member or accessor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Accessibility {
    /// `public`
    #[default]
    Public,
    /// `protected internal`
    ProtectedInternal,
    /// `internal`
    Internal,
    /// `protected`
    Protected,
    /// `private protected`
    PrivateProtected,
    /// `private`
    Private,
}

impl Accessibility {
    /// Callable from anywhere in the declaring assembly.
    ///
    /// The setter, constructor and factory rules all share this one notion
    /// of visibility, so `protected internal` counts as visible everywhere.
    #[must_use]
    pub fn is_externally_visible(self) -> bool {
        matches!(self, Self::Public | Self::Internal | Self::ProtectedInternal)
    }
}

/// Body of a property getter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GetterBody {
    /// Auto-implemented accessor backed by a compiler-synthesized field.
    #[default]
    Auto,
    /// Block or expression body.
    Computed {
        /// Identifiers referenced by the body.
        referenced_members: Vec<String>,
    },
}

impl GetterBody {
    /// A computed body referencing the given identifiers.
    #[must_use]
    pub fn computed<I, S>(referenced_members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Computed {
            referenced_members: referenced_members.into_iter().map(Into::into).collect(),
        }
    }

    /// A computed body built from its source text (e.g. `!Errors.Any()`).
    #[must_use]
    pub fn from_source(source: &str) -> Self {
        Self::Computed {
            referenced_members: syntax::referenced_identifiers(source),
        }
    }

    /// Returns true for block or expression bodies.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Computed { .. })
    }

    /// Returns true if the body references `member`.
    #[must_use]
    pub fn references(&self, member: &str) -> bool {
        match self {
            Self::Auto => false,
            Self::Computed { referenced_members } => {
                referenced_members.iter().any(|m| m == member)
            }
        }
    }
}

/// A property getter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Getter {
    /// Accessibility of the getter.
    #[serde(default)]
    pub accessibility: Accessibility,
    /// Getter body.
    #[serde(default)]
    pub body: GetterBody,
}

/// One declared property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    /// Property name.
    pub name: String,
    /// Display name of the property type.
    #[serde(default)]
    pub type_name: String,
    /// Whether the type carries a nullable annotation.
    #[serde(default)]
    pub is_nullable: bool,
    /// Getter, if declared.
    #[serde(default)]
    pub getter: Option<Getter>,
    /// Setter accessibility, if a setter (or `init`) is declared.
    #[serde(default)]
    pub setter: Option<Accessibility>,
    /// Initializer expression source text, if any.
    #[serde(default)]
    pub initializer: Option<String>,
    /// Declaration location.
    #[serde(default)]
    pub location: Location,
}

impl PropertyDescriptor {
    /// A public auto-implemented get-only property (`{ get; }`).
    #[must_use]
    pub fn get_only(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            getter: Some(Getter::default()),
            ..Self::default()
        }
    }

    /// A public computed property (`=> expr`) built from its body source.
    #[must_use]
    pub fn computed(name: impl Into<String>, body_source: &str) -> Self {
        Self {
            name: name.into(),
            getter: Some(Getter {
                accessibility: Accessibility::Public,
                body: GetterBody::from_source(body_source),
            }),
            ..Self::default()
        }
    }

    /// Sets the property type.
    #[must_use]
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    /// Marks the property type as nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    /// Sets the getter.
    #[must_use]
    pub fn with_getter(mut self, accessibility: Accessibility, body: GetterBody) -> Self {
        self.getter = Some(Getter {
            accessibility,
            body,
        });
        self
    }

    /// Removes the getter.
    #[must_use]
    pub fn without_getter(mut self) -> Self {
        self.getter = None;
        self
    }

    /// Adds a setter with the given accessibility.
    #[must_use]
    pub fn with_setter(mut self, accessibility: Accessibility) -> Self {
        self.setter = Some(accessibility);
        self
    }

    /// Sets the initializer expression text.
    #[must_use]
    pub fn with_initializer(mut self, initializer: impl Into<String>) -> Self {
        self.initializer = Some(initializer.into());
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Returns true if a setter exists and is externally visible.
    #[must_use]
    pub fn has_visible_setter(&self) -> bool {
        self.setter.is_some_and(Accessibility::is_externally_visible)
    }

    /// Returns true if a getter exists and is externally visible.
    #[must_use]
    pub fn is_readable(&self) -> bool {
        self.getter
            .as_ref()
            .is_some_and(|g| g.accessibility.is_externally_visible())
    }

    /// Returns true if the getter has a block or expression body.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        self.getter.as_ref().is_some_and(|g| g.body.is_computed())
    }
}

/// One declared constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorDescriptor {
    /// Constructor accessibility.
    #[serde(default)]
    pub accessibility: Accessibility,
    /// Number of parameters.
    #[serde(default)]
    pub parameter_count: usize,
    /// Declaration location.
    #[serde(default)]
    pub location: Location,
}

impl ConstructorDescriptor {
    /// Creates a constructor with the given accessibility.
    #[must_use]
    pub fn new(accessibility: Accessibility) -> Self {
        Self {
            accessibility,
            ..Self::default()
        }
    }

    /// Sets the location.
    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}

/// One declared field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Whether the field is `readonly`.
    #[serde(default)]
    pub is_readonly: bool,
    /// Whether the field is `const`.
    #[serde(default)]
    pub is_const: bool,
    /// Whether the field is `static`.
    #[serde(default)]
    pub is_static: bool,
    /// Declaration location.
    #[serde(default)]
    pub location: Location,
}

impl FieldDescriptor {
    /// A mutable instance field.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Marks the field `readonly`.
    #[must_use]
    pub fn readonly(mut self) -> Self {
        self.is_readonly = true;
        self
    }

    /// Marks the field `const`.
    #[must_use]
    pub fn constant(mut self) -> Self {
        self.is_const = true;
        self
    }

    /// Marks the field `static`.
    #[must_use]
    pub fn static_field(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Instance state that can change after construction.
    #[must_use]
    pub fn is_mutable_instance_state(&self) -> bool {
        !(self.is_static || self.is_const || self.is_readonly)
    }
}

/// A reference to a type, as seen from a method signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Display name of the type.
    pub name: String,
    /// Interfaces the referenced type implements (or the type itself when
    /// it is an interface).
    #[serde(default)]
    pub interfaces: Vec<String>,
}

impl TypeRef {
    /// Creates a type reference by name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interfaces: Vec::new(),
        }
    }

    /// Adds an implemented interface.
    #[must_use]
    pub fn implementing(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }
}

/// Body of a method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBody {
    /// Identifiers referenced by the body.
    pub referenced_members: Vec<String>,
}

impl MethodBody {
    /// Builds a body from its source text.
    #[must_use]
    pub fn from_source(source: &str) -> Self {
        Self {
            referenced_members: syntax::referenced_identifiers(source),
        }
    }
}

/// One declared method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Method name.
    pub name: String,
    /// Whether the method is `static`.
    #[serde(default)]
    pub is_static: bool,
    /// Method accessibility.
    #[serde(default)]
    pub accessibility: Accessibility,
    /// Number of parameters.
    #[serde(default)]
    pub parameter_count: usize,
    /// Return type.
    #[serde(default)]
    pub return_type: TypeRef,
    /// Body, if the host provides it.
    #[serde(default)]
    pub body: Option<MethodBody>,
    /// Declaration location.
    #[serde(default)]
    pub location: Location,
}

impl MethodDescriptor {
    /// A public instance method returning `return_type`.
    #[must_use]
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            return_type,
            ..Self::default()
        }
    }

    /// Marks the method `static`.
    #[must_use]
    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Sets the accessibility.
    #[must_use]
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Sets the parameter count.
    #[must_use]
    pub fn with_parameters(mut self, count: usize) -> Self {
        self.parameter_count = count;
        self
    }

    /// Sets the body from source text.
    #[must_use]
    pub fn with_body(mut self, source: &str) -> Self {
        self.body = Some(MethodBody::from_source(source));
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}

/// A rule suppression declared on a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suppression {
    /// Rule ID or name, or `all`.
    pub rule: String,
    /// Why the rule does not apply.
    #[serde(default)]
    pub justification: Option<String>,
}

impl Suppression {
    /// Returns true if this suppression covers the given rule.
    #[must_use]
    pub fn covers(&self, code: &str, name: &str) -> bool {
        self.rule == "all" || self.rule.eq_ignore_ascii_case(code) || self.rule == name
    }
}

/// One declared type under evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Simple type name (e.g., `OkResult`).
    pub name: String,
    /// Fully qualified name, if known.
    #[serde(default)]
    pub qualified_name: Option<String>,
    /// Type kind.
    #[serde(default)]
    pub kind: TypeKind,
    /// Whether the type is `abstract`.
    #[serde(default)]
    pub is_abstract: bool,
    /// Whether the type is `sealed`.
    #[serde(default)]
    pub is_sealed: bool,
    /// Display names of all implemented interfaces.
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// Declared properties, in declaration order.
    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,
    /// Declared constructors, in declaration order.
    #[serde(default)]
    pub constructors: Vec<ConstructorDescriptor>,
    /// Declared methods, in declaration order.
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
    /// Declared fields, in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    /// Rule suppressions declared on the type.
    #[serde(default)]
    pub suppressions: Vec<Suppression>,
    /// Declaration location.
    #[serde(default)]
    pub location: Location,
}

impl TypeDescriptor {
    /// A non-sealed, non-abstract class.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the kind.
    #[must_use]
    pub fn with_kind(mut self, kind: TypeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Marks the type `sealed`.
    #[must_use]
    pub fn sealed(mut self) -> Self {
        self.is_sealed = true;
        self
    }

    /// Marks the type `abstract`.
    #[must_use]
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Sets the fully qualified name.
    #[must_use]
    pub fn with_qualified_name(mut self, name: impl Into<String>) -> Self {
        self.qualified_name = Some(name.into());
        self
    }

    /// Adds an implemented interface.
    #[must_use]
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Adds a property.
    #[must_use]
    pub fn property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    /// Adds a constructor.
    #[must_use]
    pub fn constructor(mut self, constructor: ConstructorDescriptor) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Adds a method.
    #[must_use]
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Adds a field.
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds a suppression.
    #[must_use]
    pub fn suppress(mut self, rule: impl Into<String>, justification: Option<&str>) -> Self {
        self.suppressions.push(Suppression {
            rule: rule.into(),
            justification: justification.map(String::from),
        });
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Non-abstract class: the only shape rules evaluate.
    #[must_use]
    pub fn is_concrete_class(&self) -> bool {
        self.kind == TypeKind::Class && !self.is_abstract
    }

    /// Finds a property by name.
    #[must_use]
    pub fn find_property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Finds the first method with the given name.
    #[must_use]
    pub fn find_method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Returns true if `type_ref` names this type.
    ///
    /// Compares against the simple and the qualified name, ignoring
    /// generic arguments.
    #[must_use]
    pub fn is_named_by(&self, type_ref: &TypeRef) -> bool {
        let (referenced, _) = crate::capability::split_generic_arity(&type_ref.name);
        let (own, _) = crate::capability::split_generic_arity(&self.name);
        referenced == own
            || self
                .qualified_name
                .as_deref()
                .is_some_and(|q| crate::capability::split_generic_arity(q).0 == referenced)
    }
}
