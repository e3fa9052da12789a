use std::sync::Arc;
use weft_ioc::{global, resolve, Arguments, Concrete, Id, Injectable, Parameter, Result};

trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[console] {}", message);
  }
}

// Depends on the abstraction only. The container decides which logger it gets.
struct ReportService {
  logger: Arc<dyn Logger>,
}

impl Injectable for ReportService {
  fn parameters() -> Vec<Parameter> {
    vec![Parameter::service("logger", Id::of::<dyn Logger>())]
  }

  fn construct(args: &mut Arguments) -> Result<Self> {
    Ok(ReportService {
      logger: args.next_trait()?,
    })
  }
}

impl ReportService {
  fn generate_report(&self) {
    self.logger.log("Starting report generation.");
    self.logger.log("Finished report generation.");
  }
}

fn main() {
  // Trait objects are stored as `Arc<dyn Trait>` values.
  global().singleton(
    Id::of::<dyn Logger>(),
    Concrete::factory(|_| Ok(Arc::new(ConsoleLogger) as Arc<dyn Logger>)),
  );

  // `ReportService` is never registered; it is built from its constructor.
  let report_service = global().get::<ReportService>().unwrap_or_else(|err| panic!("{}", err));
  report_service.generate_report();

  let logger = resolve!(trait Logger);
  assert!(Arc::ptr_eq(&logger, &report_service.logger));
}
