//! Automatic construction of object graphs from constructor declarations.

use pretty_assertions::assert_eq;
use std::sync::Arc;
use weft_ioc::{
  Arguments, Concrete, Constructor, Container, Error, Id, Injectable, Instance, Parameter, Result,
  TypeCatalog,
};

// --- Test Fixtures ---

#[derive(Debug, PartialEq)]
struct ClassA {
  message: String,
}

impl Injectable for ClassA {
  fn construct(_args: &mut Arguments) -> Result<Self> {
    Ok(ClassA {
      message: "bar".to_string(),
    })
  }
}

#[derive(Debug, PartialEq)]
struct ClassB {
  class_a: Arc<ClassA>,
}

impl Injectable for ClassB {
  fn parameters() -> Vec<Parameter> {
    vec![Parameter::inject::<ClassA>("class_a")]
  }

  fn construct(args: &mut Arguments) -> Result<Self> {
    Ok(ClassB { class_a: args.next()? })
  }
}

#[derive(Debug, PartialEq)]
struct ClassC {
  class_a: Arc<ClassA>,
  class_b: Arc<ClassB>,
}

impl Injectable for ClassC {
  fn parameters() -> Vec<Parameter> {
    vec![
      Parameter::inject::<ClassA>("class_a"),
      Parameter::inject::<ClassB>("class_b"),
    ]
  }

  fn construct(args: &mut Arguments) -> Result<Self> {
    Ok(ClassC {
      class_a: args.next()?,
      class_b: args.next()?,
    })
  }
}

// Declares an untyped parameter with no default.
struct ClassD {
  _class_a: Arc<ClassA>,
  _x: i64,
}

impl Injectable for ClassD {
  fn parameters() -> Vec<Parameter> {
    vec![Parameter::inject::<ClassA>("class_a"), Parameter::value("x")]
  }

  fn construct(args: &mut Arguments) -> Result<Self> {
    Ok(ClassD {
      _class_a: args.next()?,
      _x: args.next_value()?,
    })
  }
}

struct ClassF {
  class_a: Arc<ClassA>,
  x: String,
}

impl Injectable for ClassF {
  fn parameters() -> Vec<Parameter> {
    vec![
      Parameter::inject::<ClassA>("class_a"),
      Parameter::value("x").with_default("My value".to_string()),
    ]
  }

  fn construct(args: &mut Arguments) -> Result<Self> {
    Ok(ClassF {
      class_a: args.next()?,
      x: args.next_value()?,
    })
  }
}

struct ClassG {
  x: i64,
}

impl Injectable for ClassG {
  fn parameters() -> Vec<Parameter> {
    vec![
      Parameter::inject::<ClassA>("class_a"),
      Parameter::value("x").with_default(10_i64),
    ]
  }

  fn construct(args: &mut Arguments) -> Result<Self> {
    let _class_a: Arc<ClassA> = args.next()?;
    Ok(ClassG { x: args.next_value()? })
  }
}

trait Contract1: Send + Sync {}
trait Contract2: Send + Sync {}
trait Contract3: Send + Sync {}

#[derive(Debug, PartialEq)]
struct Class1 {
  name: &'static str,
}

impl Injectable for Class1 {
  fn construct(_args: &mut Arguments) -> Result<Self> {
    Ok(Class1 { name: "class1" })
  }
}

// --- Tests ---

#[test]
fn test_builds_type_without_parameters() {
  let container = Container::new();

  let a = container.get::<ClassA>().unwrap();

  assert_eq!(a.message, "bar");
}

#[test]
fn test_builds_nested_dependencies() {
  let container = Container::new();

  let c = container.get::<ClassC>().unwrap();

  assert_eq!(c.class_b.class_a.message, "bar");
  // Left to auto-construct, each A is built independently but equal.
  assert_eq!(*c.class_a, *c.class_b.class_a);
  assert!(!Arc::ptr_eq(&c.class_a, &c.class_b.class_a));
}

#[test]
fn test_registered_instance_is_shared_across_the_graph() {
  let container = Container::new();
  let a = Arc::new(ClassA {
    message: "registered".to_string(),
  });
  container.instance_arc(Id::of::<ClassA>(), Arc::clone(&a));

  let c = container.get::<ClassC>().unwrap();

  assert!(Arc::ptr_eq(&c.class_a, &a));
  assert!(Arc::ptr_eq(&c.class_b.class_a, &a));
}

#[test]
fn test_binding_overrides_nested_dependency() {
  let container = Container::new();
  container.bind_factory(Id::of::<ClassA>(), |_| {
    Ok(ClassA {
      message: "from factory".to_string(),
    })
  });

  let b = container.get::<ClassB>().unwrap();

  assert_eq!(b.class_a.message, "from factory");
}

#[test]
fn test_singleton_type_is_cached() {
  let container = Container::new();
  container.singleton_type::<ClassB>();

  let first = container.get::<ClassB>().unwrap();
  let second = container.make_as::<ClassB>(Id::of::<ClassB>()).unwrap();

  assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_bound_type_is_transient() {
  let container = Container::new();
  container.bind_type::<ClassB>();

  let first = container.get::<ClassB>().unwrap();
  let second = container.get::<ClassB>().unwrap();

  assert_eq!(*first, *second);
  assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn test_plain_type_id_uses_constructor_from_binding() {
  // `bind_type` stores a key that knows how to build the type, so a plain
  // `Id::of` lookup can still construct it.
  let container = Container::new();
  container.bind_type::<ClassA>();

  let a = container.make_as::<ClassA>(Id::of::<ClassA>()).unwrap();

  assert_eq!(a.message, "bar");
}

#[test]
fn test_parameter_without_type_or_default_fails() {
  let container = Container::new();

  match container.get::<ClassD>() {
    Err(Error::NoDefaultValue { parameter, owner }) => {
      assert_eq!(parameter, "x");
      assert_eq!(owner, std::any::type_name::<ClassD>());
    }
    other => panic!("expected NoDefaultValue, got {:?}", other.err()),
  }
}

#[test]
fn test_default_values_fill_untyped_parameters() {
  let container = Container::new();

  let f = container.get::<ClassF>().unwrap();
  let g = container.get::<ClassG>().unwrap();

  assert_eq!(f.class_a.message, "bar");
  assert_eq!(f.x, "My value");
  assert_eq!(g.x, 10);
}

#[test]
fn test_contract_chain_resolves_to_concrete_class() {
  let container = Container::new();
  container.bind(Id::of::<dyn Contract1>(), Id::constructible::<Class1>());
  container.bind(Id::of::<dyn Contract2>(), Id::of::<dyn Contract1>());
  container.bind(Id::of::<dyn Contract3>(), Id::of::<dyn Contract2>());

  let resolved = container.make_as::<Class1>(Id::of::<dyn Contract3>()).unwrap();

  assert_eq!(*resolved, Class1 { name: "class1" });
}

#[test]
fn test_interface_chain_without_concrete_is_not_instantiable() {
  let container = Container::new();
  container.bind(Id::of::<dyn Contract2>(), Id::of::<dyn Contract1>());

  for id in [Id::of::<dyn Contract1>(), Id::of::<dyn Contract2>()] {
    match container.make(id) {
      Err(Error::NotInstantiable { id }) => assert_eq!(id, Id::of::<dyn Contract1>()),
      other => panic!("expected NotInstantiable, got {:?}", other.err()),
    }
  }
}

#[test]
fn test_named_types_from_catalog() {
  let catalog = TypeCatalog::new();
  catalog.register_named::<ClassB>("ClassB");
  let container = Container::builder().introspector(catalog).build().unwrap();

  let b = container.make_as::<ClassB>("ClassB").unwrap();

  assert_eq!(b.class_a.message, "bar");
  assert!(container.is_instantiable(&Id::named("ClassB")));
  assert!(!container.is_instantiable(&Id::named("ClassZ")));
}

#[test]
fn test_hand_written_constructor() {
  // Types known only by name can be described without implementing `Injectable`.
  let catalog = TypeCatalog::new();
  catalog.register_constructor(
    "greeting",
    Constructor::new(
      "Greeting",
      vec![
        Parameter::service("name", "user.name"),
        Parameter::value("punctuation").with_default('!'),
      ],
      |args| {
        let name = args.next::<String>()?;
        let punctuation = args.next_value::<char>()?;
        Ok(Arc::new(format!("Hello, {}{}", name, punctuation)) as Instance)
      },
    ),
  );
  let container = Container::builder().introspector(catalog).build().unwrap();
  container.instance("user.name", "Ada".to_string());

  let greeting = container.make_as::<String>("greeting").unwrap();

  assert_eq!(*greeting, "Hello, Ada!");
}

#[test]
fn test_type_dependency_cycle_is_detected() {
  struct Chicken {
    _egg: Arc<Egg>,
  }
  struct Egg {
    _chicken: Arc<Chicken>,
  }
  impl Injectable for Chicken {
    fn parameters() -> Vec<Parameter> {
      vec![Parameter::inject::<Egg>("egg")]
    }
    fn construct(args: &mut Arguments) -> Result<Self> {
      Ok(Chicken { _egg: args.next()? })
    }
  }
  impl Injectable for Egg {
    fn parameters() -> Vec<Parameter> {
      vec![Parameter::inject::<Chicken>("chicken")]
    }
    fn construct(args: &mut Arguments) -> Result<Self> {
      Ok(Egg { _chicken: args.next()? })
    }
  }

  let container = Container::new();

  assert!(matches!(container.get::<Chicken>(), Err(Error::CyclicDependency { .. })));
}

#[test]
fn test_literal_binding_is_returned_as_is() {
  let container = Container::new();
  container.bind(Id::of::<ClassA>(), Concrete::literal(ClassA { message: "literal".to_string() }));

  let a = container.get::<ClassA>().unwrap();

  assert_eq!(a.message, "literal");
}
