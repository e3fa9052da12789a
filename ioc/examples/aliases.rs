use std::sync::Arc;
use weft_ioc::{resolve_from, Concrete, Container, Error};

trait MessageSender: Send + Sync {
  fn send(&self, to: &str, message: &str) -> String;
}

struct EmailSender;
impl MessageSender for EmailSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending email to {}: '{}'", to, message)
  }
}

struct SmsSender;
impl MessageSender for SmsSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending SMS to {}: '{}'", to, message)
  }
}

fn sender(value: Arc<dyn MessageSender>) -> Concrete {
  Concrete::literal(value)
}

fn main() -> Result<(), Error> {
  let container = Container::new();
  container.singleton("sender.email", sender(Arc::new(EmailSender)));
  container.singleton("sender.sms", sender(Arc::new(SmsSender)));

  // "notifier" -> "sender.default" -> "sender.email"
  container.alias("sender.email", "sender.default")?;
  container.alias("sender.default", "notifier")?;

  let notifier = resolve_from!(&container, trait MessageSender, "notifier");
  println!("{}", notifier.send("test@example.com", "Hello!"));

  // Re-pointing one link of the chain changes what every alias resolves to.
  container.alias("sender.sms", "sender.default")?;
  let notifier = resolve_from!(&container, trait MessageSender, "notifier");
  let sent = notifier.send("+123456789", "Hello!");
  println!("{}", sent);
  assert!(sent.contains("SMS"));

  // An identifier cannot be its own alias.
  match container.alias("notifier", "notifier") {
    Err(err @ Error::InvalidAlias { .. }) => println!("Rejected: {}", err),
    other => panic!("expected InvalidAlias, got {:?}", other),
  }

  Ok(())
}
