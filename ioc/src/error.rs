//! Error types raised by the container.

use crate::id::Id;
use std::fmt;
use thiserror::Error;

/// A boxed error produced by user code (factories and constructors).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type for every fallible container operation.
///
/// Errors are raised synchronously and abort the whole resolution: no partial
/// object graph is returned and nothing built during a failed resolution is
/// cached.
#[derive(Debug, Error)]
pub enum Error {
  /// The identifier has no binding and does not name a constructible type.
  #[error("target [{id}] is not instantiable")]
  NotInstantiable { id: Id },

  /// A constructor parameter declares neither a dependency nor a default.
  #[error(
    "unresolvable parameter [{parameter}] in {owner}: no dependency type and no default value"
  )]
  NoDefaultValue { parameter: String, owner: String },

  /// An identifier was aliased to itself.
  #[error("[{alias}] cannot be aliased to itself")]
  InvalidAlias { alias: Id },

  /// Following an alias chain revisited an identifier.
  #[error("alias chain loops back on itself: {chain}")]
  CyclicAlias { chain: String },

  /// An identifier was requested again while it was still being built.
  #[error("circular dependency detected: {path}")]
  CyclicDependency { path: String },

  /// The dependency graph nested deeper than the configured limit.
  #[error("resolving [{id}] exceeded the maximum depth of {limit}")]
  DepthExceeded { id: Id, limit: usize },

  /// A resolved value did not have the requested type.
  #[error("[{id}] did not resolve to a value of type {expected}")]
  TypeMismatch { id: String, expected: &'static str },

  /// A constructor asked for more arguments than it declared.
  #[error("{owner} requested argument #{position} but declared only {declared}")]
  MissingArgument {
    owner: String,
    position: usize,
    declared: usize,
  },

  /// A factory or constructor failed.
  #[error("failed to construct {owner}: {source}")]
  Construction {
    owner: String,
    #[source]
    source: BoxError,
  },
}

impl Error {
  /// Wraps an error raised while constructing `owner`.
  ///
  /// Factories and [`Injectable`](crate::Injectable) implementations use this
  /// to report their own failures through the container.
  pub fn construction(owner: impl Into<String>, source: impl Into<BoxError>) -> Self {
    Error::Construction {
      owner: owner.into(),
      source: source.into(),
    }
  }
}

/// A specialized `Result` type for container operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur when building a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
  /// The container was configured with a maximum resolution depth of zero,
  /// which would reject every resolution that has to build something.
  ZeroDepth,
}

impl fmt::Display for BuildError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BuildError::ZeroDepth => write!(f, "maximum resolution depth cannot be zero"),
    }
  }
}

impl std::error::Error for BuildError {}
