use pretty_assertions::assert_eq;
use serial_test::serial;
use std::sync::Arc;
use weft_ioc::{global, reset_global, resolve, Concrete, Error, Id};

// --- Test Fixtures ---

// The trait must be Send + Sync for the container to accept it.
trait Greeter: Send + Sync {
  fn greet(&self) -> String;
}

struct EnglishGreeter;
impl Greeter for EnglishGreeter {
  fn greet(&self) -> String {
    "Hello!".to_string()
  }
}

// A simple struct for testing.
#[derive(Debug, PartialEq, Eq)]
struct SimpleService {
  id: u32,
}

// --- Basic Tests ---

#[test]
#[serial]
fn test_bind_and_resolve_literal() {
  reset_global();
  global().bind("foo", Concrete::literal("bar"));

  let value = global().make_as::<&str>("foo").unwrap();

  assert_eq!(*value, "bar");
}

#[test]
#[serial]
fn test_unknown_name_is_not_instantiable() {
  reset_global();

  let err = global().make("something").unwrap_err();

  assert!(matches!(err, Error::NotInstantiable { id } if id == Id::named("something")));
}

#[test]
#[serial]
fn test_unnamed_singleton_factory() {
  // Arrange
  reset_global();
  global().singleton_factory(Id::of::<SimpleService>(), |_| Ok(SimpleService { id: 101 }));

  // Act
  let r1 = resolve!(SimpleService);
  let r2 = resolve!(SimpleService);

  // Assert
  assert_eq!(r1.id, 101);
  // Ensure it's a singleton by checking pointer equality.
  assert!(Arc::ptr_eq(&r1, &r2));
}

#[test]
#[serial]
fn test_named_instance() {
  // Arrange
  reset_global();
  global().instance("named_instance", SimpleService { id: 202 });

  // Act
  let r1 = resolve!(SimpleService, "named_instance");
  let r2 = resolve!(SimpleService, "named_instance");

  // Assert
  assert_eq!(*r1, SimpleService { id: 202 });
  assert!(Arc::ptr_eq(&r1, &r2));
}

#[test]
#[serial]
fn test_transient_factory() {
  // Arrange
  reset_global();
  global().bind_factory(Id::of::<SimpleService>(), |_| Ok(SimpleService { id: 303 }));

  // Act
  let r1 = resolve!(SimpleService);
  let r2 = resolve!(SimpleService);

  // Assert
  assert_eq!(r1.id, 303);
  assert_eq!(r2.id, 303);
  // Ensure it's transient by checking the pointers are different.
  assert!(!Arc::ptr_eq(&r1, &r2));
}

#[test]
#[serial]
fn test_trait_resolution() {
  reset_global();
  global().singleton(
    Id::of::<dyn Greeter>(),
    Concrete::factory(|_| Ok(Arc::new(EnglishGreeter) as Arc<dyn Greeter>)),
  );

  let greeter = resolve!(trait Greeter);

  assert_eq!(greeter.greet(), "Hello!");
}

#[test]
#[serial]
fn test_named_trait_resolution() {
  struct GermanGreeter;
  impl Greeter for GermanGreeter {
    fn greet(&self) -> String {
      "Hallo!".to_string()
    }
  }

  reset_global();
  global().instance("german", Arc::new(GermanGreeter) as Arc<dyn Greeter>);

  let greeter = resolve!(trait Greeter, "german");

  assert_eq!(greeter.greet(), "Hallo!");
}

#[test]
#[serial]
fn test_wrong_type_is_a_mismatch() {
  reset_global();
  global().instance("port", 8080_u16);

  let err = global().make_as::<String>("port").unwrap_err();

  assert!(matches!(
    err,
    Error::TypeMismatch { expected, .. } if expected == std::any::type_name::<String>()
  ));
}

#[test]
#[serial]
#[should_panic(expected = "Failed to resolve required service")]
fn test_resolve_panics_on_missing_concrete_service() {
  struct MissingService;
  reset_global();
  resolve!(MissingService);
}

#[test]
#[serial]
#[should_panic(expected = "Failed to resolve required trait service")]
fn test_resolve_panics_on_missing_trait_service() {
  trait MissingTrait: Send + Sync {}
  reset_global();
  resolve!(trait MissingTrait);
}
