use std::panic;
use weft_ioc::{global, maybe_resolve, resolve, Error, Id};

struct UnregisteredService;

fn main() {
  println!("Resolving a service that was never registered with `resolve!`...");
  let result = panic::catch_unwind(|| {
    let _service = resolve!(UnregisteredService);
  });
  assert!(result.is_err(), "resolve! should have panicked");
  println!("Caught the expected panic.");

  println!("\nNow with `maybe_resolve!`...");
  assert!(maybe_resolve!(UnregisteredService).is_none());
  println!("Received `None`.");

  println!("\nAnd with the fallible `make`...");
  match global().make(Id::of::<UnregisteredService>()) {
    Err(err @ Error::NotInstantiable { .. }) => println!("Error: {}", err),
    Err(other) => panic!("unexpected error: {}", other),
    Ok(_) => panic!("should not have found the service"),
  }
}
