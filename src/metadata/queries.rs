//! Member and attribute queries used when picking weaving targets

use super::types::{CustomAttribute, MethodDef, PropertyDef, TypeDef};
use crate::config::WeaveOptions;

/// Anything that can carry custom attributes
pub trait CustomAttributeProvider {
    /// Attributes applied to this item
    fn custom_attributes(&self) -> &[CustomAttribute];

    /// Whether an attribute with this simple class name is present
    fn has_attribute(&self, attribute_name: &str) -> bool {
        self.custom_attributes()
            .iter()
            .any(|a| a.attribute_type.name() == attribute_name)
    }

    /// Whether the compiler marked this as the entry of an async state machine
    fn is_async_state_machine(&self, options: &WeaveOptions) -> bool {
        self.has_attribute(&options.async_state_machine_attribute)
    }
}

impl CustomAttributeProvider for TypeDef {
    fn custom_attributes(&self) -> &[CustomAttribute] {
        &self.custom_attributes
    }
}

impl CustomAttributeProvider for MethodDef {
    fn custom_attributes(&self) -> &[CustomAttribute] {
        &self.custom_attributes
    }
}

impl TypeDef {
    /// Methods that have a body to weave into
    pub fn methods_with_body(&self) -> impl Iterator<Item = &MethodDef> {
        self.methods.iter().filter(|m| m.body.is_some())
    }

    /// Properties with no abstract accessor
    pub fn concrete_properties(&self) -> impl Iterator<Item = &PropertyDef> {
        self.properties.iter().filter(|p| {
            let concrete = |accessor: &Option<MethodDef>| {
                accessor.as_ref().map_or(true, |m| !m.is_abstract)
            };
            concrete(&p.get_method) && concrete(&p.set_method)
        })
    }

    /// Whether this type is a compiler-generated async state machine
    ///
    /// Only direct interfaces are checked, by simple name.
    pub fn is_iasync_state_machine(&self, options: &WeaveOptions) -> bool {
        self.interfaces
            .iter()
            .any(|i| i.name() == options.async_state_machine_interface)
    }
}
