//! Identifiers naming the things a container can produce.

use crate::introspect::{Constructor, Injectable};
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

pub(crate) type ConstructorFn = fn() -> Constructor;

/// A handle to a Rust type used as an identifier.
///
/// Two keys are equal when they name the same `TypeId`. The type name and the
/// optional constructor are carried along for diagnostics and for automatic
/// construction, but never take part in comparisons.
#[derive(Clone)]
pub struct TypeKey {
  type_id: TypeId,
  name: &'static str,
  constructor: Option<ConstructorFn>,
}

impl TypeKey {
  pub fn type_id(&self) -> TypeId {
    self.type_id
  }

  pub fn type_name(&self) -> &'static str {
    self.name
  }
}

impl PartialEq for TypeKey {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id
  }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.type_id.hash(state);
  }
}

/// An abstract identifier: either a plain name or a type handle.
///
/// The registry and the resolver treat both shapes the same way, so a string
/// key can be aliased to a type and a type can be bound to a named service.
///
/// ```
/// use weft_ioc::Id;
///
/// trait Mailer {}
///
/// let by_name = Id::named("mailer");
/// let by_type = Id::of::<dyn Mailer>();
///
/// assert_eq!(by_name, Id::from("mailer"));
/// assert_ne!(by_name, by_type);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Id {
  Name(Arc<str>),
  Type(TypeKey),
}

impl Id {
  /// An identifier for a plain string key.
  pub fn named(name: impl Into<Arc<str>>) -> Self {
    Id::Name(name.into())
  }

  /// An identifier for any `'static` type, including trait objects.
  ///
  /// The container can only auto-construct such an identifier if its type
  /// introspector knows the type. Use [`Id::constructible`] for types that
  /// implement [`Injectable`].
  pub fn of<T: ?Sized + Any>() -> Self {
    Id::Type(TypeKey {
      type_id: TypeId::of::<T>(),
      name: type_name::<T>(),
      constructor: None,
    })
  }

  /// An identifier for an [`Injectable`] type that also knows how to build it.
  ///
  /// Equal to `Id::of::<T>()`.
  pub fn constructible<T: Injectable>() -> Self {
    Id::Type(TypeKey {
      type_id: TypeId::of::<T>(),
      name: type_name::<T>(),
      constructor: Some(Constructor::of::<T>),
    })
  }

  pub fn as_name(&self) -> Option<&str> {
    match self {
      Id::Name(name) => Some(name),
      Id::Type(_) => None,
    }
  }

  pub fn type_id(&self) -> Option<TypeId> {
    match self {
      Id::Name(_) => None,
      Id::Type(key) => Some(key.type_id),
    }
  }

  /// The constructor carried by this identifier, if it was created with
  /// [`Id::constructible`].
  pub(crate) fn constructor(&self) -> Option<Constructor> {
    match self {
      Id::Type(TypeKey {
        constructor: Some(constructor),
        ..
      }) => Some(constructor()),
      _ => None,
    }
  }

  pub(crate) fn carries_constructor(&self) -> bool {
    matches!(
      self,
      Id::Type(TypeKey {
        constructor: Some(_),
        ..
      })
    )
  }
}

impl fmt::Debug for Id {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Id::Name(name) => write!(f, "Id::Name({})", name),
      Id::Type(key) => write!(f, "Id::Type({})", key.name),
    }
  }
}

impl fmt::Display for Id {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Id::Name(name) => f.write_str(name),
      Id::Type(key) => f.write_str(key.name),
    }
  }
}

impl From<&str> for Id {
  fn from(name: &str) -> Self {
    Id::named(name)
  }
}

impl From<String> for Id {
  fn from(name: String) -> Self {
    Id::named(name)
  }
}

impl From<&String> for Id {
  fn from(name: &String) -> Self {
    Id::named(name.as_str())
  }
}

impl From<&Id> for Id {
  fn from(id: &Id) -> Self {
    id.clone()
  }
}
