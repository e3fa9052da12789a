//! The global IoC container instance and access functions.

use crate::container::Container;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

// The process-wide container. Created on first access in a thread-safe
// manner; replaced only through `set_global` or `reset_global`.
static GLOBAL_CONTAINER: Lazy<RwLock<Arc<Container>>> = Lazy::new(|| {
  debug!("creating global container");
  RwLock::new(Arc::new(Container::default()))
});

/// Provides a handle to the global container instance.
///
/// Passing a container explicitly through your call graph is preferred; the
/// global container is a convenience for code that cannot do so.
///
/// # Examples
///
/// ```
/// use weft_ioc::global;
///
/// fn register_services() {
///   global().instance("greeting", String::from("Hello from global!"));
/// }
///
/// register_services();
/// let greeting = global().make_as::<String>("greeting").unwrap();
/// assert_eq!(*greeting, "Hello from global!");
/// ```
pub fn global() -> Arc<Container> {
  Arc::clone(&GLOBAL_CONTAINER.read())
}

/// Installs `container` as the global container and returns a handle to it.
///
/// Handles obtained earlier keep pointing at the previous container.
pub fn set_global(container: Container) -> Arc<Container> {
  let container = Arc::new(container);
  *GLOBAL_CONTAINER.write() = Arc::clone(&container);
  debug!("installed global container");
  container
}

/// Replaces the global container with a fresh, empty one and returns the
/// previous container.
///
/// This is the reset hook for tests. `flush` only clears one container's
/// registrations, whereas this swaps the container itself.
pub fn reset_global() -> Arc<Container> {
  let previous = std::mem::replace(&mut *GLOBAL_CONTAINER.write(), Arc::new(Container::default()));
  debug!("reset global container");
  previous
}
