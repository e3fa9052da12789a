//! Public macros for ergonomic service resolution and declaration.

/// Resolves a service from the global container, panicking on failure.
///
/// This macro is the primary way to get dependencies from the global
/// container. It panics if the requested service cannot be resolved, ensuring
/// that all required dependencies are present at runtime.
///
/// # Panics
///
/// This macro will panic if the service cannot be resolved. For a
/// non-panicking version, use [`maybe_resolve!`] or `global().make_as(...)`.
///
/// # Examples
///
/// ```
/// use weft_ioc::{global, resolve};
///
/// global().instance(weft_ioc::Id::of::<String>(), String::from("hello"));
///
/// let message = resolve!(String);
/// assert_eq!(*message, "hello");
/// ```
///
/// ```
/// use weft_ioc::{global, resolve, Concrete, Id};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter { fn greet(&self) -> String { "Hello!".to_string() } }
///
/// global().singleton(
///   Id::of::<dyn Greeter>(),
///   Concrete::factory(|_| Ok(Arc::new(EnglishGreeter) as Arc<dyn Greeter>)),
/// );
///
/// let greeter = resolve!(trait Greeter);
/// assert_eq!(greeter.greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve {
    ($($args:tt)+) => {
        $crate::resolve_from!(&*$crate::global(), $($args)+)
    };
}

/// Resolves a service from the global container, returning `None` on failure.
#[macro_export]
macro_rules! maybe_resolve {
    ($($args:tt)+) => {
        $crate::maybe_resolve_from!(&*$crate::global(), $($args)+)
    };
}

/// Resolves a service from the given container, panicking on failure.
#[macro_export]
macro_rules! resolve_from {
    // Arm for resolving a trait object: resolve_from!(container, trait MyTrait)
    ($container:expr, trait $trait_ident:ident) => {
        $container
            .make_trait::<dyn $trait_ident>($crate::Id::of::<dyn $trait_ident>())
            .unwrap_or_else(|err| {
                panic!(
                    "Failed to resolve required trait service {}: {}",
                    std::any::type_name::<dyn $trait_ident>(),
                    err
                )
            })
    };

    // Arm for resolving a named trait object: resolve_from!(container, trait MyTrait, "name")
    ($container:expr, trait $trait_ident:ident, $name:expr) => {
        $container
            .make_trait::<dyn $trait_ident>($crate::Id::named($name))
            .unwrap_or_else(|err| {
                panic!(
                    "Failed to resolve required trait service '{}' as {}: {}",
                    $name,
                    std::any::type_name::<dyn $trait_ident>(),
                    err
                )
            })
    };

    // Arm for resolving a concrete type: resolve_from!(container, MyService)
    ($container:expr, $type:ty) => {
        $container
            .make_as::<$type>($crate::Id::of::<$type>())
            .unwrap_or_else(|err| {
                panic!(
                    "Failed to resolve required service {}: {}",
                    std::any::type_name::<$type>(),
                    err
                )
            })
    };

    // Arm for resolving a named service: resolve_from!(container, MyService, "name")
    ($container:expr, $type:ty, $name:expr) => {
        $container
            .make_as::<$type>($crate::Id::named($name))
            .unwrap_or_else(|err| {
                panic!(
                    "Failed to resolve required service '{}' as {}: {}",
                    $name,
                    std::any::type_name::<$type>(),
                    err
                )
            })
    };
}

/// Resolves a service from the given container, returning `None` on failure.
#[macro_export]
macro_rules! maybe_resolve_from {
    ($container:expr, trait $trait_ident:ident) => {
        $container
            .make_trait::<dyn $trait_ident>($crate::Id::of::<dyn $trait_ident>())
            .ok()
    };
    ($container:expr, trait $trait_ident:ident, $name:expr) => {
        $container
            .make_trait::<dyn $trait_ident>($crate::Id::named($name))
            .ok()
    };
    ($container:expr, $type:ty) => {
        $container.make_as::<$type>($crate::Id::of::<$type>()).ok()
    };
    ($container:expr, $type:ty, $name:expr) => {
        $container.make_as::<$type>($crate::Id::named($name)).ok()
    };
}

/// Implements [`Injectable`](crate::Injectable) for a struct whose fields are
/// all `Arc`s of other injectable types.
///
/// ```
/// use std::sync::Arc;
/// use weft_ioc::{injectable, Container};
///
/// #[derive(Default)]
/// struct Config;
/// injectable!(default Config);
///
/// struct Repository {
///   config: Arc<Config>,
/// }
/// injectable!(Repository { config: Config });
///
/// let repository = Container::new().get::<Repository>().unwrap();
/// let _config: &Config = &repository.config;
/// ```
#[macro_export]
macro_rules! injectable {
    // Arm for types built with `Default`: injectable!(default MyType)
    (default $type:ty) => {
        impl $crate::Injectable for $type {
            fn construct(_args: &mut $crate::Arguments) -> $crate::Result<Self> {
                Ok(<$type as ::std::default::Default>::default())
            }
        }
    };

    // Arm for structs of injected fields: injectable!(MyType { field: Dep, ... })
    ($type:ident { $($field:ident : $dep:ty),* $(,)? }) => {
        impl $crate::Injectable for $type {
            fn parameters() -> ::std::vec::Vec<$crate::Parameter> {
                ::std::vec![$($crate::Parameter::inject::<$dep>(stringify!($field))),*]
            }

            #[allow(unused_variables)]
            fn construct(args: &mut $crate::Arguments) -> $crate::Result<Self> {
                Ok($type {
                    $($field: args.next::<$dep>()?),*
                })
            }
        }
    };
}
