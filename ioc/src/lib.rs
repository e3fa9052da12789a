//! # Weft IoC
//!
//! A thread-safe Inversion of Control (IoC) container for Rust.
//!
//! The container maps abstract identifiers (string keys or types, including
//! trait objects) to concrete producers: literal values, factories, other
//! identifiers, or the identifier's own constructor. Types that describe their
//! constructor through [`Injectable`] are built automatically, dependencies
//! first, without any registration at all.
//!
//! ## Core Concepts
//!
//! - **Binding**: `abstract -> concrete`, either transient (built on every
//!   resolution) or shared (built once and cached).
//! - **Instance**: a value placed directly in the cache. Cached values always
//!   win over bindings.
//! - **Alias**: another name for an identifier. Chains are followed to the end.
//! - **Auto-construction**: an identifier with no binding is built from its
//!   constructor, resolving every declared dependency through the container,
//!   so overrides anywhere in the graph are honoured.
//! - **Global Container**: a lazily created process-wide container, accessible
//!   via [`global()`].
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use weft_ioc::{Arguments, Concrete, Container, Id, Injectable, Parameter, Result};
//!
//! trait Mailer: Send + Sync {
//!     fn send(&self, to: &str) -> String;
//! }
//!
//! struct SmtpMailer;
//! impl Mailer for SmtpMailer {
//!     fn send(&self, to: &str) -> String {
//!         format!("mail to {to}")
//!     }
//! }
//!
//! struct Signup {
//!     mailer: Arc<dyn Mailer>,
//!     sender: String,
//! }
//!
//! impl Injectable for Signup {
//!     fn parameters() -> Vec<Parameter> {
//!         vec![
//!             Parameter::service("mailer", Id::of::<dyn Mailer>()),
//!             Parameter::value("sender").with_default(String::from("noreply")),
//!         ]
//!     }
//!
//!     fn construct(args: &mut Arguments) -> Result<Self> {
//!         Ok(Signup { mailer: args.next_trait()?, sender: args.next_value()? })
//!     }
//! }
//!
//! let container = Container::new();
//! container.singleton(
//!     Id::of::<dyn Mailer>(),
//!     Concrete::factory(|_| Ok(Arc::new(SmtpMailer) as Arc<dyn Mailer>)),
//! );
//!
//! let signup = container.get::<Signup>().unwrap();
//! assert_eq!(signup.mailer.send("ada"), "mail to ada");
//! assert_eq!(signup.sender, "noreply");
//! ```

mod alias;
mod config;
mod container;
mod core;
mod error;
mod global;
mod id;
mod introspect;
mod macros;
mod registry;

pub use crate::core::{Concrete, Instance};
pub use config::{ContainerBuilder, ContainerConfig};
pub use container::Container;
pub use error::{BoxError, BuildError, Error, Result};
pub use global::{global, reset_global, set_global};
pub use id::{Id, TypeKey};
pub use introspect::{Arguments, Constructor, Injectable, Parameter, TypeCatalog, TypeIntrospector};
