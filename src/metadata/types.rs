//! Type metadata model
//!
//! References ([`TypeRef`]) are what instructions, signatures and type
//! definitions point at; definitions ([`TypeDef`]) are what a
//! [`TypeProvider`](super::TypeProvider) resolves them to.

use crate::il::InstructionStream;
use serde::Deserialize;

/// Reference to a type
///
/// In JSON a named type is a plain string (`"System.IDisposable"`); a generic
/// parameter is an object (`{ "name": "T", "constraints": ["System.IDisposable"] }`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    /// A type named by its full name
    Named(String),
    /// A generic parameter and its declared constraints
    GenericParameter {
        /// Parameter name, e.g. `T`
        name: String,
        /// Constraint types, in declaration order
        #[serde(default)]
        constraints: Vec<TypeRef>,
    },
}

impl TypeRef {
    /// Reference to a type by full name
    pub fn named(full_name: impl Into<String>) -> Self {
        TypeRef::Named(full_name.into())
    }

    /// Reference to a generic parameter
    pub fn generic_parameter(name: impl Into<String>, constraints: Vec<TypeRef>) -> Self {
        TypeRef::GenericParameter {
            name: name.into(),
            constraints,
        }
    }

    /// Full name; a generic parameter's full name is its own name
    pub fn full_name(&self) -> &str {
        match self {
            TypeRef::Named(full_name) => full_name,
            TypeRef::GenericParameter { name, .. } => name,
        }
    }

    /// Simple name, without namespace or declaring type
    pub fn name(&self) -> &str {
        simple_name(self.full_name())
    }

    /// Whether this is a generic parameter
    pub fn is_generic_parameter(&self) -> bool {
        matches!(self, TypeRef::GenericParameter { .. })
    }

    /// Constraints of a generic parameter; empty for named types
    pub fn constraints(&self) -> &[TypeRef] {
        match self {
            TypeRef::GenericParameter { constraints, .. } => constraints,
            TypeRef::Named(_) => &[],
        }
    }
}

impl From<&str> for TypeRef {
    fn from(full_name: &str) -> Self {
        TypeRef::named(full_name)
    }
}

fn simple_name(full_name: &str) -> &str {
    // Strip generic arguments before looking for separators inside them
    let head = full_name
        .find('<')
        .map(|i| &full_name[..i])
        .unwrap_or(full_name);
    let start = head.rfind(|c: char| c == '.' || c == '/').map(|i| i + 1).unwrap_or(0);
    &full_name[start..]
}

/// Custom attribute applied to a type or member
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomAttribute {
    /// Attribute class
    pub attribute_type: TypeRef,
}

impl CustomAttribute {
    /// Attribute of the given class
    pub fn new(attribute_type: impl Into<TypeRef>) -> Self {
        Self {
            attribute_type: attribute_type.into(),
        }
    }
}

/// Method body
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MethodBody {
    /// Instructions, offset-ordered
    #[serde(default)]
    pub instructions: InstructionStream,
}

/// Method definition
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MethodDef {
    /// Method name
    pub name: String,
    /// Abstract methods have no body
    #[serde(default)]
    pub is_abstract: bool,
    /// Body; absent for abstract, extern and runtime-provided methods
    #[serde(default)]
    pub body: Option<MethodBody>,
    /// Custom attributes
    #[serde(default)]
    pub custom_attributes: Vec<CustomAttribute>,
}

impl MethodDef {
    /// Concrete method with an empty body
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_abstract: false,
            body: Some(MethodBody::default()),
            custom_attributes: Vec::new(),
        }
    }

    /// Abstract method, no body
    pub fn abstract_method(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_abstract: true,
            body: None,
            custom_attributes: Vec::new(),
        }
    }

    /// Adds a custom attribute
    pub fn with_attribute(mut self, attribute: CustomAttribute) -> Self {
        self.custom_attributes.push(attribute);
        self
    }
}

/// Property definition
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PropertyDef {
    /// Property name
    pub name: String,
    /// Getter
    #[serde(default)]
    pub get_method: Option<MethodDef>,
    /// Setter
    #[serde(default)]
    pub set_method: Option<MethodDef>,
}

/// Resolved type definition
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeDef {
    /// Full name, namespace included
    pub full_name: String,
    /// Base type; absent for hierarchy roots and interfaces
    #[serde(default)]
    pub base_type: Option<TypeRef>,
    /// Directly implemented interfaces
    #[serde(default)]
    pub interfaces: Vec<TypeRef>,
    /// Methods
    #[serde(default)]
    pub methods: Vec<MethodDef>,
    /// Properties
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
    /// Custom attributes
    #[serde(default)]
    pub custom_attributes: Vec<CustomAttribute>,
}

impl TypeDef {
    /// Empty type definition with no base type
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            base_type: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            custom_attributes: Vec::new(),
        }
    }

    /// Sets the base type
    pub fn with_base(mut self, base: impl Into<TypeRef>) -> Self {
        self.base_type = Some(base.into());
        self
    }

    /// Adds a directly implemented interface
    pub fn with_interface(mut self, interface: impl Into<TypeRef>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Adds a method
    pub fn with_method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    /// Adds a property
    pub fn with_property(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }

    /// Adds a custom attribute
    pub fn with_attribute(mut self, attribute: CustomAttribute) -> Self {
        self.custom_attributes.push(attribute);
        self
    }

    /// Simple name, without namespace
    pub fn name(&self) -> &str {
        simple_name(&self.full_name)
    }
}
