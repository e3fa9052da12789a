use weft_ioc::{global, set_global, Container, Id};

// Takes its container explicitly, so it can run against any of them.
fn process_data(container: &Container) -> weft_ioc::Result<String> {
  let data = container.make_as::<String>("input")?;
  Ok(format!("Processed: {}", data.to_uppercase()))
}

fn main() -> weft_ioc::Result<()> {
  println!("--- Running with a local container ---");
  let local = Container::new();
  local.instance("input", "test data".to_string());

  let result = process_data(&local)?;
  println!("{}", result);
  assert_eq!(result, "Processed: TEST DATA");

  // Nothing registered locally leaks into the global container.
  assert!(!global().is_bound(&Id::named("input")));
  assert!(process_data(&global()).is_err());
  println!("The global container is untouched.");

  println!("\n--- Installing a configured global container ---");
  let installed = set_global(Container::builder().shared_by_default(true).build().map_err(|err| {
    weft_ioc::Error::construction("global container", err)
  })?);
  installed.instance("input", "live data".to_string());
  println!("{}", process_data(&global())?);

  Ok(())
}
