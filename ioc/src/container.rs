//! The main `Container` struct: registration, lifecycle and resolution.

use crate::config::{ContainerBuilder, ContainerConfig};
use crate::core::{Binding, Concrete, Instance, ResolutionGuard};
use crate::error::{Error, Result};
use crate::id::Id;
use crate::introspect::{Injectable, TypeCatalog, TypeIntrospector};
use crate::registry::Registry;
use parking_lot::RwLock;
use std::any::{type_name, Any};
use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace, warn};

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

/// The Inversion of Control (IoC) container.
///
/// Maps abstract identifiers to concrete producers and builds object graphs on
/// demand. Resolution consults, in order:
///
/// 1. the instance cache (values registered with [`instance`](Container::instance)
///    or built by a shared binding),
/// 2. the bindings,
/// 3. automatic construction through the type introspector.
///
/// The container is thread-safe. Registry operations are atomic with respect
/// to each other and to the lookups done by resolution, and shared bindings
/// are built at most once per cache lifetime even under contention.
pub struct Container {
  id: u64,
  config: ContainerConfig,
  introspector: Arc<dyn TypeIntrospector>,
  registry: RwLock<Registry>,
}

impl Default for Container {
  fn default() -> Self {
    Self::from_parts(ContainerConfig::default(), Arc::new(TypeCatalog::new()))
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let (bindings, instances, aliases) = self.registry.read().counts();
    f.debug_struct("Container")
      .field("id", &self.id)
      .field("config", &self.config)
      .field("bindings", &bindings)
      .field("instances", &instances)
      .field("aliases", &aliases)
      .finish()
  }
}

impl Container {
  /// Creates a new, empty `Container` with the default configuration.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn builder() -> ContainerBuilder {
    ContainerBuilder::new()
  }

  pub(crate) fn from_parts(
    config: ContainerConfig,
    introspector: Arc<dyn TypeIntrospector>,
  ) -> Self {
    Self {
      id: NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed),
      config,
      introspector,
      registry: RwLock::new(Registry::default()),
    }
  }

  pub fn config(&self) -> &ContainerConfig {
    &self.config
  }

  pub fn introspector(&self) -> &Arc<dyn TypeIntrospector> {
    &self.introspector
  }

  // --- Registration ---

  /// Binds `abstract_` to `concrete`, shared if the container is configured
  /// with `shared_by_default`.
  ///
  /// Any cached instance and any alias previously recorded for `abstract_` are
  /// dropped.
  pub fn bind(&self, abstract_: impl Into<Id>, concrete: impl Into<Concrete>) {
    self.bind_with(abstract_, concrete, self.config.shared_by_default);
  }

  /// Binds `abstract_` to `concrete` with an explicit `shared` flag.
  pub fn bind_with(&self, abstract_: impl Into<Id>, concrete: impl Into<Concrete>, shared: bool) {
    let abstract_ = abstract_.into();
    let concrete = concrete.into();
    debug!(id = %abstract_, concrete = concrete.kind(), shared, "binding");
    self.registry.write().bind(abstract_, concrete, shared);
  }

  /// Binds `abstract_` as shared: the first resolution is cached and reused.
  pub fn singleton(&self, abstract_: impl Into<Id>, concrete: impl Into<Concrete>) {
    self.bind_with(abstract_, concrete, true);
  }

  /// Binds `T` to its own constructor.
  pub fn bind_type<T: Injectable>(&self) {
    self.bind(Id::constructible::<T>(), Concrete::AutoConstruct);
  }

  /// Binds `T` to its own constructor as a shared binding.
  pub fn singleton_type<T: Injectable>(&self) {
    self.singleton(Id::constructible::<T>(), Concrete::AutoConstruct);
  }

  pub fn bind_factory<T, F>(&self, abstract_: impl Into<Id>, factory: F)
  where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
  {
    self.bind(abstract_, Concrete::factory(factory));
  }

  pub fn singleton_factory<T, F>(&self, abstract_: impl Into<Id>, factory: F)
  where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
  {
    self.singleton(abstract_, Concrete::factory(factory));
  }

  /// Registers a ready-made value. Later resolutions of `abstract_` return it
  /// verbatim until it is forgotten or `abstract_` is bound again.
  pub fn instance<T: Any + Send + Sync>(&self, abstract_: impl Into<Id>, value: T) {
    self.instance_arc(abstract_, Arc::new(value));
  }

  /// Like [`instance`](Container::instance), keeping the identity of `value`.
  pub fn instance_arc<T: Any + Send + Sync>(&self, abstract_: impl Into<Id>, value: Arc<T>) {
    let abstract_ = abstract_.into();
    debug!(id = %abstract_, "registering instance");
    self.registry.write().instance(abstract_, value);
  }

  /// Makes `alias` resolve to whatever `abstract_` resolves to.
  pub fn alias(&self, abstract_: impl Into<Id>, alias: impl Into<Id>) -> Result<()> {
    let abstract_ = abstract_.into();
    let alias = alias.into();
    debug!(id = %abstract_, alias = %alias, "aliasing");
    self.registry.write().alias(abstract_, alias)
  }

  // --- Lifecycle ---

  /// Removes every binding, cached instance and alias.
  pub fn flush(&self) {
    debug!(container = self.id, "flushing");
    self.registry.write().flush();
  }

  /// Drops the cached instance for `abstract_`, keeping its binding.
  pub fn forget_instance(&self, abstract_: impl Into<Id>) -> bool {
    let abstract_ = abstract_.into();
    debug!(id = %abstract_, "forgetting instance");
    self.registry.write().forget_instance(&abstract_)
  }

  /// Drops every cached instance, keeping bindings and aliases.
  pub fn forget_instances(&self) {
    debug!(container = self.id, "forgetting all instances");
    self.registry.write().forget_instances();
  }

  /// Drops both the binding and the cached instance for `abstract_`.
  pub fn remove(&self, abstract_: impl Into<Id>) -> bool {
    let abstract_ = abstract_.into();
    debug!(id = %abstract_, "removing");
    self.registry.write().remove(&abstract_)
  }

  // --- Queries ---

  /// Whether `id` has a binding, a cached instance or an alias.
  pub fn is_bound(&self, id: &Id) -> bool {
    self.registry.read().is_bound(id)
  }

  pub fn has_binding(&self, id: &Id) -> bool {
    self.registry.read().has_binding(id)
  }

  /// Whether a value is currently cached for `id`.
  pub fn has_instance(&self, id: &Id) -> bool {
    self.registry.read().has_instance(id)
  }

  pub fn is_alias(&self, id: &Id) -> bool {
    self.registry.read().alias_target(id).is_some()
  }

  /// The identifier `alias` points at directly, without following the chain.
  pub fn alias_target(&self, alias: &Id) -> Option<Id> {
    self.registry.read().alias_target(alias)
  }

  /// Whether resolving `id` yields a cached, shared value.
  pub fn is_shared(&self, id: &Id) -> bool {
    self.registry.read().is_shared(id)
  }

  /// Whether `id` could be built without any binding.
  pub fn is_instantiable(&self, id: &Id) -> bool {
    id.carries_constructor() || self.introspector.is_instantiable(id)
  }

  // --- Resolution ---

  /// Resolves `id` to a value.
  pub fn make(&self, id: impl Into<Id>) -> Result<Instance> {
    self.resolve(&id.into())
  }

  /// Resolves `id` and downcasts the value to `T`.
  pub fn make_as<T: Any + Send + Sync>(&self, id: impl Into<Id>) -> Result<Arc<T>> {
    let id = id.into();
    self.resolve(&id)?.downcast::<T>().map_err(|_| Error::TypeMismatch {
      id: id.to_string(),
      expected: type_name::<T>(),
    })
  }

  /// Resolves `id` to a trait object that was registered as an `Arc<I>`.
  pub fn make_trait<I: ?Sized + Send + Sync + 'static>(&self, id: impl Into<Id>) -> Result<Arc<I>> {
    self.make_as::<Arc<I>>(id).map(|value| Arc::clone(&*value))
  }

  /// Resolves `T`, building it from its constructor if nothing is registered.
  pub fn get<T: Injectable>(&self) -> Result<Arc<T>> {
    self.make_as::<T>(Id::constructible::<T>())
  }

  /// Resolves the trait object registered under `Id::of::<I>()`.
  pub fn get_trait<I: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<I>> {
    self.make_trait::<I>(Id::of::<I>())
  }

  fn resolve(&self, requested: &Id) -> Result<Instance> {
    let (abstract_, binding) = {
      let registry = self.registry.read();
      let abstract_ = registry.resolve_alias(requested)?;
      if let Some(instance) = registry.cached(&abstract_) {
        trace!(id = %abstract_, "resolved from instance cache");
        return Ok(instance);
      }
      match registry.binding(&abstract_) {
        Some((key, binding)) => (prefer_constructible(abstract_, key), Some(binding)),
        None => (abstract_, None),
      }
    };

    let _guard = ResolutionGuard::enter(self.id, &abstract_, self.config.max_depth)?;
    match binding {
      Some(binding) if binding.shared => self.build_shared(&abstract_, &binding),
      Some(binding) => self.build(&abstract_, &binding),
      None => {
        trace!(id = %abstract_, "no binding, constructing");
        self.auto_construct(&abstract_)
      }
    }
  }

  fn build_shared(&self, abstract_: &Id, binding: &Arc<Binding>) -> Result<Instance> {
    // Only builds of this same binding wait here. A repeat entry on this
    // thread was already rejected as a cycle by the resolution guard.
    let _build = binding.lock_build();
    // Another thread may have finished this build while we waited.
    if let Some(instance) = self.registry.read().cached(abstract_) {
      trace!(id = %abstract_, "shared value built concurrently");
      return Ok(instance);
    }

    let instance = self.build(abstract_, binding)?;
    if !self
      .registry
      .write()
      .cache_if_current(abstract_, binding, Arc::clone(&instance))
    {
      warn!(id = %abstract_, "binding changed during build, result not cached");
    }
    Ok(instance)
  }

  fn build(&self, abstract_: &Id, binding: &Binding) -> Result<Instance> {
    trace!(id = %abstract_, concrete = binding.concrete.kind(), "building");
    match &binding.concrete {
      Concrete::Literal(value) => Ok(Arc::clone(value)),
      Concrete::Factory(factory) => factory(self),
      Concrete::AutoConstruct => self.auto_construct(abstract_),
      Concrete::Reference(target) => self.resolve(target),
    }
  }

  fn auto_construct(&self, id: &Id) -> Result<Instance> {
    let constructor = self
      .introspector
      .describe(id)
      .or_else(|| id.constructor().map(Arc::new))
      .ok_or_else(|| Error::NotInstantiable { id: id.clone() })?;

    let mut values = Vec::with_capacity(constructor.parameters().len());
    for parameter in constructor.parameters() {
      let value = match (parameter.dependency(), parameter.default_value()) {
        (Some(dependency), _) => self.resolve(dependency)?,
        (None, Some(default)) => Arc::clone(default),
        (None, None) => {
          return Err(Error::NoDefaultValue {
            parameter: parameter.name().to_owned(),
            owner: constructor.type_name().to_owned(),
          })
        }
      };
      values.push((Cow::Owned(parameter.name().to_owned()), value));
    }

    trace!(
      id = %id,
      type_name = constructor.type_name(),
      arguments = values.len(),
      "instantiating"
    );
    constructor.instantiate(values)
  }
}

// Keys compare equal regardless of whether they carry a constructor; keep the
// one that does.
fn prefer_constructible(requested: Id, stored: Id) -> Id {
  if requested.carries_constructor() {
    requested
  } else {
    stored
  }
}
