use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use weft_ioc::{injectable, Container, Id};

#[derive(Default)]
struct Settings {
  dsn: &'static str,
}

struct Database {
  settings: Arc<Settings>,
}

struct Users {
  database: Arc<Database>,
}

struct Api {
  users: Arc<Users>,
  settings: Arc<Settings>,
}

injectable!(default Settings);
injectable!(Database { settings: Settings });
injectable!(Users { database: Database });
injectable!(Api { users: Users, settings: Settings });

fn main() -> weft_ioc::Result<()> {
  // RUST_LOG=weft_ioc=trace shows every step of the build.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let container = Container::new();
  container.instance(
    Id::of::<Settings>(),
    Settings {
      dsn: "postgres://localhost/app",
    },
  );
  // Share one database handle across the graph.
  container.singleton_type::<Database>();

  let api = container.get::<Api>()?;
  let again = container.get::<Api>()?;

  println!("API connected to {}", api.users.database.settings.dsn);
  assert!(Arc::ptr_eq(&api.settings, &api.users.database.settings));
  assert!(Arc::ptr_eq(&api.users.database, &again.users.database));
  assert!(!Arc::ptr_eq(&api.users, &again.users));

  Ok(())
}
