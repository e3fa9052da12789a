//! Constructor introspection: what a type needs in order to be built.
//!
//! Rust has no runtime reflection, so every constructible type describes its
//! own constructor instead. A [`Constructor`] lists the ordered parameters a
//! type declares and holds the function that instantiates it from resolved
//! arguments. The container asks a [`TypeIntrospector`] for that description
//! whenever it has to build a value nobody registered explicitly.

use crate::core::Instance;
use crate::error::{Error, Result};
use crate::id::Id;
use dashmap::DashMap;
use std::any::{type_name, Any};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A type the container can build on its own.
///
/// `parameters` declares the constructor's inputs in order; `construct`
/// receives them resolved, in the same order.
///
/// ```
/// use std::sync::Arc;
/// use weft_ioc::{Arguments, Container, Injectable, Parameter, Result};
///
/// #[derive(Default)]
/// struct Clock;
///
/// impl Injectable for Clock {
///   fn construct(_args: &mut Arguments) -> Result<Self> {
///     Ok(Clock)
///   }
/// }
///
/// struct Scheduler {
///   clock: Arc<Clock>,
///   workers: usize,
/// }
///
/// impl Injectable for Scheduler {
///   fn parameters() -> Vec<Parameter> {
///     vec![
///       Parameter::inject::<Clock>("clock"),
///       Parameter::value("workers").with_default(4_usize),
///     ]
///   }
///
///   fn construct(args: &mut Arguments) -> Result<Self> {
///     Ok(Scheduler {
///       clock: args.next()?,
///       workers: args.next_value()?,
///     })
///   }
/// }
///
/// let container = Container::new();
/// let scheduler = container.get::<Scheduler>().unwrap();
/// assert_eq!(scheduler.workers, 4);
/// ```
pub trait Injectable: Any + Send + Sync + Sized {
  /// The constructor's parameters in declaration order.
  fn parameters() -> Vec<Parameter> {
    Vec::new()
  }

  /// Builds the value from its resolved arguments.
  fn construct(args: &mut Arguments) -> Result<Self>;
}

/// One declared constructor parameter.
#[derive(Clone)]
pub struct Parameter {
  name: Cow<'static, str>,
  dependency: Option<Id>,
  default: Option<Instance>,
}

impl Parameter {
  /// A parameter whose value is the resolved `T`.
  ///
  /// `T` is resolved through the container, so bindings and instances
  /// registered for it take precedence over building it from scratch.
  pub fn inject<T: Injectable>(name: impl Into<Cow<'static, str>>) -> Self {
    Self {
      name: name.into(),
      dependency: Some(Id::constructible::<T>()),
      default: None,
    }
  }

  /// A parameter whose value is whatever `id` resolves to.
  ///
  /// Use this for trait objects and named services, which the container can
  /// only produce when something is bound to them.
  pub fn service(name: impl Into<Cow<'static, str>>, id: impl Into<Id>) -> Self {
    Self {
      name: name.into(),
      dependency: Some(id.into()),
      default: None,
    }
  }

  /// A parameter with no dependency type.
  ///
  /// Without [`with_default`](Parameter::with_default) such a parameter
  /// cannot be satisfied and resolution fails with `NoDefaultValue`.
  pub fn value(name: impl Into<Cow<'static, str>>) -> Self {
    Self {
      name: name.into(),
      dependency: None,
      default: None,
    }
  }

  /// Declares the value used when the parameter has no dependency type.
  pub fn with_default<T: Any + Send + Sync>(mut self, value: T) -> Self {
    self.default = Some(Arc::new(value));
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn dependency(&self) -> Option<&Id> {
    self.dependency.as_ref()
  }

  pub fn default_value(&self) -> Option<&Instance> {
    self.default.as_ref()
  }
}

impl fmt::Debug for Parameter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Parameter")
      .field("name", &self.name)
      .field("dependency", &self.dependency)
      .field("has_default", &self.default.is_some())
      .finish()
  }
}

type InstantiateFn = dyn Fn(&mut Arguments) -> Result<Instance> + Send + Sync;

/// The constructor of one type: its parameters and how to call it.
#[derive(Clone)]
pub struct Constructor {
  type_name: Cow<'static, str>,
  parameters: Vec<Parameter>,
  instantiate: Arc<InstantiateFn>,
}

impl Constructor {
  /// Describes an [`Injectable`] type.
  pub fn of<T: Injectable>() -> Self {
    Self {
      type_name: Cow::Borrowed(type_name::<T>()),
      parameters: T::parameters(),
      instantiate: Arc::new(|args| T::construct(args).map(|value| Arc::new(value) as Instance)),
    }
  }

  /// Describes a constructor by hand, for types that cannot implement
  /// [`Injectable`] or that are only known by name.
  pub fn new<F>(
    type_name: impl Into<Cow<'static, str>>,
    parameters: Vec<Parameter>,
    instantiate: F,
  ) -> Self
  where
    F: Fn(&mut Arguments) -> Result<Instance> + Send + Sync + 'static,
  {
    Self {
      type_name: type_name.into(),
      parameters,
      instantiate: Arc::new(instantiate),
    }
  }

  pub fn type_name(&self) -> &str {
    &self.type_name
  }

  pub fn parameters(&self) -> &[Parameter] {
    &self.parameters
  }

  pub(crate) fn instantiate(&self, values: Vec<(Cow<'static, str>, Instance)>) -> Result<Instance> {
    let mut args = Arguments {
      owner: self.type_name.clone(),
      declared: values.len(),
      values: values.into_iter(),
    };
    (self.instantiate)(&mut args)
  }
}

impl fmt::Debug for Constructor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Constructor")
      .field("type_name", &self.type_name)
      .field("parameters", &self.parameters)
      .finish_non_exhaustive()
  }
}

/// The resolved arguments handed to a constructor, in declaration order.
pub struct Arguments {
  owner: Cow<'static, str>,
  declared: usize,
  values: std::vec::IntoIter<(Cow<'static, str>, Instance)>,
}

impl Arguments {
  /// Takes the next argument without inspecting its type.
  pub fn next_instance(&mut self) -> Result<Instance> {
    self.take().map(|(_, value)| value)
  }

  /// Takes the next argument as a shared `T`.
  pub fn next<T: Any + Send + Sync>(&mut self) -> Result<Arc<T>> {
    let (name, value) = self.take()?;
    value.downcast::<T>().map_err(|_| Error::TypeMismatch {
      id: format!("{}::{}", self.owner, name),
      expected: type_name::<T>(),
    })
  }

  /// Takes the next argument and clones the value out of it.
  pub fn next_value<T: Any + Send + Sync + Clone>(&mut self) -> Result<T> {
    self.next::<T>().map(|value| T::clone(&value))
  }

  /// Takes the next argument as a trait object.
  ///
  /// The argument must have been produced as an `Arc<I>`, for instance by a
  /// factory returning `Arc::new(service) as Arc<dyn Trait>`.
  pub fn next_trait<I: ?Sized + Send + Sync + 'static>(&mut self) -> Result<Arc<I>> {
    self.next::<Arc<I>>().map(|value| Arc::clone(&*value))
  }

  pub fn remaining(&self) -> usize {
    self.values.len()
  }

  fn take(&mut self) -> Result<(Cow<'static, str>, Instance)> {
    let position = self.declared - self.values.len();
    self.values.next().ok_or_else(|| Error::MissingArgument {
      owner: self.owner.to_string(),
      position,
      declared: self.declared,
    })
  }
}

/// Answers what it takes to construct an identifier.
///
/// This is the seam where reflection would sit in a dynamic language. The
/// default implementation is [`TypeCatalog`].
pub trait TypeIntrospector: Send + Sync {
  /// The constructor of `id`, or `None` if `id` is not a constructible type.
  fn describe(&self, id: &Id) -> Option<Arc<Constructor>>;

  fn is_instantiable(&self, id: &Id) -> bool {
    self.describe(id).is_some()
  }
}

impl<T: TypeIntrospector + ?Sized> TypeIntrospector for Arc<T> {
  fn describe(&self, id: &Id) -> Option<Arc<Constructor>> {
    (**self).describe(id)
  }

  fn is_instantiable(&self, id: &Id) -> bool {
    (**self).is_instantiable(id)
  }
}

/// A concurrent registry of constructors.
///
/// Types registered here can be auto-constructed through plain
/// `Id::of::<T>()` identifiers, and [`register_named`](TypeCatalog::register_named)
/// makes them constructible by string name as well.
#[derive(Default)]
pub struct TypeCatalog {
  constructors: DashMap<Id, Arc<Constructor>>,
}

impl TypeCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers `T` under `Id::of::<T>()`.
  pub fn register<T: Injectable>(&self) -> &Self {
    self.register_constructor(Id::of::<T>(), Constructor::of::<T>())
  }

  /// Registers `T` under its type and under `name`.
  pub fn register_named<T: Injectable>(&self, name: &str) -> &Self {
    self.register::<T>();
    self.register_constructor(Id::named(name), Constructor::of::<T>())
  }

  pub fn register_constructor(&self, id: impl Into<Id>, constructor: Constructor) -> &Self {
    self.constructors.insert(id.into(), Arc::new(constructor));
    self
  }

  pub fn unregister(&self, id: &Id) -> bool {
    self.constructors.remove(id).is_some()
  }

  pub fn len(&self) -> usize {
    self.constructors.len()
  }

  pub fn is_empty(&self) -> bool {
    self.constructors.is_empty()
  }
}

impl TypeIntrospector for TypeCatalog {
  fn describe(&self, id: &Id) -> Option<Arc<Constructor>> {
    self.constructors.get(id).map(|entry| Arc::clone(entry.value()))
  }

  fn is_instantiable(&self, id: &Id) -> bool {
    self.constructors.contains_key(id)
  }
}

impl fmt::Debug for TypeCatalog {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TypeCatalog")
      .field("constructors", &self.constructors.len())
      .finish()
  }
}
