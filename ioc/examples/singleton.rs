use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use weft_ioc::{global, resolve};

// Gets a unique sequence number when it is built.
struct RequestTracker {
  id: usize,
}

static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn track() -> weft_ioc::Result<RequestTracker> {
  Ok(RequestTracker {
    id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
  })
}

fn main() {
  // Built once, then served from the instance cache.
  global().singleton_factory("singleton_tracker", |_| {
    println!("Building shared RequestTracker...");
    track()
  });

  // Built on every resolution.
  global().bind_factory("transient_tracker", |_| {
    println!("Building transient RequestTracker...");
    track()
  });

  println!("--- Shared ---");
  let s1 = resolve!(RequestTracker, "singleton_tracker");
  let s2 = resolve!(RequestTracker, "singleton_tracker");
  println!("Shared IDs: {} and {}", s1.id, s2.id);
  assert!(Arc::ptr_eq(&s1, &s2));

  println!("\n--- Transient ---");
  let t1 = resolve!(RequestTracker, "transient_tracker");
  let t2 = resolve!(RequestTracker, "transient_tracker");
  println!("Transient IDs: {} and {}", t1.id, t2.id);
  assert_ne!(t1.id, t2.id);

  println!("\n--- Forgetting the shared value ---");
  global().forget_instance("singleton_tracker");
  let s3 = resolve!(RequestTracker, "singleton_tracker");
  println!("Rebuilt shared ID: {}", s3.id);
  assert!(!Arc::ptr_eq(&s1, &s3));
}
