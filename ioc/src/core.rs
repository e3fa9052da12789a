//! Core data structures shared by the registry and the resolver.

use crate::container::Container;
use crate::error::{Error, Result};
use crate::id::Id;
use parking_lot::{Mutex, MutexGuard};
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

/// A resolved value.
///
/// Values are shared: the container and every caller that resolved the same
/// shared binding hold the same allocation.
pub type Instance = Arc<dyn Any + Send + Sync>;

pub(crate) type FactoryFn = dyn Fn(&Container) -> Result<Instance> + Send + Sync;

/// What an abstract identifier is bound to.
#[derive(Clone)]
pub enum Concrete {
  /// Build the abstract itself by introspecting its constructor.
  AutoConstruct,
  /// A ready-made value.
  Literal(Instance),
  /// A function that produces the value, given the container.
  Factory(Arc<FactoryFn>),
  /// Resolve another identifier instead.
  Reference(Id),
}

impl Concrete {
  pub fn literal<T: Any + Send + Sync>(value: T) -> Self {
    Concrete::Literal(Arc::new(value))
  }

  /// A literal that keeps the identity of an existing allocation.
  pub fn shared<T: Any + Send + Sync>(value: Arc<T>) -> Self {
    Concrete::Literal(value)
  }

  pub fn factory<T, F>(factory: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
  {
    Concrete::Factory(Arc::new(move |container| {
      factory(container).map(|value| Arc::new(value) as Instance)
    }))
  }

  pub fn reference(id: impl Into<Id>) -> Self {
    Concrete::Reference(id.into())
  }

  pub(crate) fn kind(&self) -> &'static str {
    match self {
      Concrete::AutoConstruct => "auto",
      Concrete::Literal(_) => "literal",
      Concrete::Factory(_) => "factory",
      Concrete::Reference(_) => "reference",
    }
  }
}

impl From<Id> for Concrete {
  fn from(id: Id) -> Self {
    Concrete::Reference(id)
  }
}

impl From<&str> for Concrete {
  fn from(name: &str) -> Self {
    Concrete::Reference(Id::named(name))
  }
}

impl fmt::Debug for Concrete {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Concrete::AutoConstruct => write!(f, "Concrete::AutoConstruct"),
      Concrete::Literal(_) => write!(f, "Concrete::Literal(..)"),
      Concrete::Factory(_) => write!(f, "Concrete::Factory(..)"),
      Concrete::Reference(id) => write!(f, "Concrete::Reference({:?})", id),
    }
  }
}

/// A registered `abstract -> concrete` association.
#[derive(Debug)]
pub(crate) struct Binding {
  pub(crate) concrete: Concrete,
  pub(crate) shared: bool,
  // Serialises builds of this binding only. Replacing the binding gives the
  // abstract a fresh lock.
  build_lock: Mutex<()>,
}

impl Binding {
  pub(crate) fn new(concrete: Concrete, shared: bool) -> Self {
    Self {
      concrete,
      shared,
      build_lock: Mutex::new(()),
    }
  }

  pub(crate) fn lock_build(&self) -> MutexGuard<'_, ()> {
    self.build_lock.lock()
  }
}

thread_local! {
  // The identifiers currently being built on this thread, tagged with the
  // container building them. A repeat entry for the same container is a cycle.
  static RESOLVING_STACK: RefCell<Vec<(u64, Id)>> = const { RefCell::new(Vec::new()) };
}

/// An RAII guard marking an identifier as "being built".
///
/// Entering fails if the identifier is already being built by the same
/// container on this thread, or if the container's nesting would exceed
/// `max_depth`. Dropping the guard pops the entry.
pub(crate) struct ResolutionGuard {
  _private: (),
}

impl ResolutionGuard {
  pub(crate) fn enter(container: u64, id: &Id, max_depth: usize) -> Result<Self> {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      let mut depth = 0;
      let mut cycle_start = None;
      for (position, (owner, key)) in stack.iter().enumerate() {
        if *owner != container {
          continue;
        }
        depth += 1;
        if cycle_start.is_none() && key == id {
          cycle_start = Some(position);
        }
      }

      if let Some(start) = cycle_start {
        let mut path: Vec<String> = stack[start..]
          .iter()
          .filter(|(owner, _)| *owner == container)
          .map(|(_, key)| key.to_string())
          .collect();
        path.push(id.to_string());
        return Err(Error::CyclicDependency {
          path: path.join(" -> "),
        });
      }
      if depth >= max_depth {
        return Err(Error::DepthExceeded {
          id: id.clone(),
          limit: max_depth,
        });
      }

      stack.push((container, id.clone()));
      Ok(Self { _private: () })
    })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().pop();
    });
  }
}
