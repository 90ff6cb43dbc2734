//! # Interface Resolution
//!
//! Decides whether a type implements an interface by walking, in order:
//!
//! 1. a generic parameter's constraints (any one of them is enough),
//! 2. the resolved type's direct interfaces,
//! 3. the resolved type's base type, recursively.
//!
//! Anything that cannot be resolved implements nothing.

use super::provider::TypeProvider;
use super::types::TypeRef;

/// Whether `ty` implements the interface named `interface_full_name`
///
/// Names are compared exactly: case-sensitive, no namespace normalisation.
/// A missing type (`None`) implements nothing.
pub fn implements_interface<P>(provider: &P, ty: Option<&TypeRef>, interface_full_name: &str) -> bool
where
    P: TypeProvider + ?Sized,
{
    let Some(ty) = ty else {
        return false;
    };

    if let TypeRef::GenericParameter { constraints, .. } = ty {
        return constraints
            .iter()
            .any(|constraint| implements_interface(provider, Some(constraint), interface_full_name));
    }

    let Some(def) = provider.resolve(ty) else {
        tracing::trace!("Unresolved type {} implements nothing", ty.full_name());
        return false;
    };

    def.interfaces
        .iter()
        .any(|interface| interface.full_name() == interface_full_name)
        || implements_interface(provider, def.base_type.as_ref(), interface_full_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{MetadataStore, TypeDef};

    const DISPOSABLE: &str = "System.IDisposable";

    fn store() -> MetadataStore {
        vec![
            TypeDef::new("System.Object"),
            TypeDef::new("App.Resource")
                .with_base("System.Object")
                .with_interface(DISPOSABLE),
            TypeDef::new("App.FileResource").with_base("App.Resource"),
            TypeDef::new("App.Plain").with_base("System.Object"),
            TypeDef::new("App.Orphan").with_base("Missing.Base"),
        ]
        .into_iter()
        .collect()
    }

    fn check(store: &MetadataStore, ty: &TypeRef) -> bool {
        implements_interface(store, Some(ty), DISPOSABLE)
    }

    #[test]
    fn test_missing_type() {
        assert!(!implements_interface(&store(), None, DISPOSABLE));
    }

    #[test]
    fn test_direct_interface() {
        assert!(check(&store(), &TypeRef::named("App.Resource")));
    }

    #[test]
    fn test_inherited_interface() {
        assert!(check(&store(), &TypeRef::named("App.FileResource")));
    }

    #[test]
    fn test_root_without_interface() {
        assert!(!check(&store(), &TypeRef::named("System.Object")));
        assert!(!check(&store(), &TypeRef::named("App.Plain")));
    }

    #[test]
    fn test_unresolvable() {
        let store = store();
        assert!(!check(&store, &TypeRef::named("Nowhere.Type")));
        // Base type that cannot be resolved stops the walk quietly
        assert!(!check(&store, &TypeRef::named("App.Orphan")));
    }

    #[test]
    fn test_name_match_is_exact() {
        let store = store();
        let resource = TypeRef::named("App.Resource");
        assert!(!implements_interface(&store, Some(&resource), "system.idisposable"));
        assert!(!implements_interface(&store, Some(&resource), "IDisposable"));
    }

    #[test]
    fn test_generic_parameter_constraints_are_or_combined() {
        let store = store();
        let t = TypeRef::generic_parameter(
            "T",
            vec![TypeRef::named("App.Plain"), TypeRef::named("App.FileResource")],
        );
        assert!(check(&store, &t));

        let u = TypeRef::generic_parameter("U", vec![TypeRef::named("App.Plain")]);
        assert!(!check(&store, &u));

        let unconstrained = TypeRef::generic_parameter("V", vec![]);
        assert!(!check(&store, &unconstrained));
    }

    #[test]
    fn test_nested_generic_constraint() {
        let store = store();
        let inner = TypeRef::generic_parameter("TInner", vec![TypeRef::named("App.Resource")]);
        let outer = TypeRef::generic_parameter("TOuter", vec![inner]);
        assert!(check(&store, &outer));
    }
}
