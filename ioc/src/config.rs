//! Container configuration and the builder that applies it.

use crate::container::Container;
use crate::error::BuildError;
use crate::introspect::{TypeCatalog, TypeIntrospector};
use std::fmt;
use std::sync::Arc;

/// Tunables for a [`Container`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContainerConfig {
  /// Whether `bind` caches what it builds. `singleton` always does.
  pub shared_by_default: bool,
  /// How deeply resolutions may nest before failing with `DepthExceeded`.
  pub max_depth: usize,
}

impl Default for ContainerConfig {
  fn default() -> Self {
    Self {
      shared_by_default: false,
      max_depth: 128,
    }
  }
}

/// A builder for [`Container`] instances.
///
/// ```
/// use weft_ioc::{Container, Id};
///
/// let container = Container::builder().shared_by_default(true).build().unwrap();
/// container.bind("answer", weft_ioc::Concrete::factory(|_| Ok(42_u32)));
/// assert!(container.is_shared(&Id::named("answer")));
/// ```
#[derive(Default)]
pub struct ContainerBuilder {
  config: ContainerConfig,
  introspector: Option<Arc<dyn TypeIntrospector>>,
}

impl fmt::Debug for ContainerBuilder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ContainerBuilder")
      .field("config", &self.config)
      .field("has_introspector", &self.introspector.is_some())
      .finish()
  }
}

impl ContainerBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Replaces the whole configuration.
  pub fn config(mut self, config: ContainerConfig) -> Self {
    self.config = config;
    self
  }

  /// Makes `bind` register shared bindings unless told otherwise.
  pub fn shared_by_default(mut self, shared: bool) -> Self {
    self.config.shared_by_default = shared;
    self
  }

  /// Sets the maximum nesting depth of a single resolution.
  pub fn max_depth(mut self, depth: usize) -> Self {
    self.config.max_depth = depth;
    self
  }

  /// Sets the type introspector used for automatic construction.
  ///
  /// By default each container gets its own empty [`TypeCatalog`].
  pub fn introspector<I>(mut self, introspector: I) -> Self
  where
    I: TypeIntrospector + 'static,
  {
    self.introspector = Some(Arc::new(introspector));
    self
  }

  pub fn build(self) -> Result<Container, BuildError> {
    if self.config.max_depth == 0 {
      return Err(BuildError::ZeroDepth);
    }
    let introspector = self
      .introspector
      .unwrap_or_else(|| Arc::new(TypeCatalog::new()));
    Ok(Container::from_parts(self.config, introspector))
  }
}
