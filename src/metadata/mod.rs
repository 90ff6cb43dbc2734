//! # Type Metadata
//!
//! Type references and definitions, the provider that resolves one to the
//! other, and the relationship queries built on top.
//!
//! ```
//! use ilweave::metadata::{implements_interface, MetadataStore, TypeDef, TypeRef};
//!
//! let store: MetadataStore = vec![
//!     TypeDef::new("App.Base").with_interface("System.IDisposable"),
//!     TypeDef::new("App.Derived").with_base("App.Base"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let derived = TypeRef::named("App.Derived");
//! assert!(implements_interface(&store, Some(&derived), "System.IDisposable"));
//! ```

mod provider;
mod queries;
mod resolver;
mod types;

pub use provider::{MetadataStore, TypeProvider};
pub use queries::CustomAttributeProvider;
pub use resolver::implements_interface;
pub use types::{CustomAttribute, MethodBody, MethodDef, PropertyDef, TypeDef, TypeRef};
