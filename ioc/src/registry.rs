//! The binding registry: bindings, cached instances and aliases.
//!
//! The registry owns every mutation rule. The container wraps it in a single
//! lock so that each operation here observes and leaves a consistent state.

use crate::alias::resolve_alias;
use crate::core::{Binding, Concrete, Instance};
use crate::error::{Error, Result};
use crate::id::Id;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
pub(crate) struct Registry {
  bindings: HashMap<Id, Arc<Binding>>,
  instances: HashMap<Id, Instance>,
  aliases: HashMap<Id, Id>,
}

impl Registry {
  // --- Mutation ---

  /// Stores a binding, dropping any cached instance and alias for `abstract_`.
  pub(crate) fn bind(&mut self, abstract_: Id, concrete: Concrete, shared: bool) {
    let concrete = match concrete {
      Concrete::Reference(target) if target == abstract_ => Concrete::AutoConstruct,
      other => other,
    };
    self.instances.remove(&abstract_);
    self.aliases.remove(&abstract_);
    // Remove first so the stored key is replaced too; a new key may carry a
    // constructor the old one lacked.
    self.bindings.remove(&abstract_);
    self
      .bindings
      .insert(abstract_, Arc::new(Binding::new(concrete, shared)));
  }

  /// Places `value` in the instance cache, dropping any alias for `abstract_`.
  pub(crate) fn instance(&mut self, abstract_: Id, value: Instance) {
    self.aliases.remove(&abstract_);
    self.instances.insert(abstract_, value);
  }

  pub(crate) fn alias(&mut self, abstract_: Id, alias: Id) -> Result<()> {
    if alias == abstract_ {
      return Err(Error::InvalidAlias { alias });
    }
    self.aliases.insert(alias, abstract_);
    Ok(())
  }

  pub(crate) fn flush(&mut self) {
    self.bindings.clear();
    self.instances.clear();
    self.aliases.clear();
  }

  pub(crate) fn forget_instance(&mut self, abstract_: &Id) -> bool {
    self.instances.remove(abstract_).is_some()
  }

  pub(crate) fn forget_instances(&mut self) {
    self.instances.clear();
  }

  /// Drops the binding and the cached instance for `abstract_`.
  pub(crate) fn remove(&mut self, abstract_: &Id) -> bool {
    let had_binding = self.bindings.remove(abstract_).is_some();
    let had_instance = self.instances.remove(abstract_).is_some();
    had_binding || had_instance
  }

  /// Caches a value built from `binding`, unless that binding has been
  /// replaced or removed in the meantime. Returns whether it was cached.
  pub(crate) fn cache_if_current(
    &mut self,
    abstract_: &Id,
    binding: &Arc<Binding>,
    value: Instance,
  ) -> bool {
    let current = self
      .bindings
      .get(abstract_)
      .is_some_and(|stored| Arc::ptr_eq(stored, binding));
    if current {
      self.instances.insert(abstract_.clone(), value);
    }
    current
  }

  // --- Lookup ---

  pub(crate) fn resolve_alias(&self, id: &Id) -> Result<Id> {
    resolve_alias(&self.aliases, id)
  }

  pub(crate) fn cached(&self, abstract_: &Id) -> Option<Instance> {
    self.instances.get(abstract_).cloned()
  }

  /// The binding for `abstract_` together with the key it was stored under.
  pub(crate) fn binding(&self, abstract_: &Id) -> Option<(Id, Arc<Binding>)> {
    self
      .bindings
      .get_key_value(abstract_)
      .map(|(key, binding)| (key.clone(), Arc::clone(binding)))
  }

  // --- Queries ---

  pub(crate) fn is_bound(&self, id: &Id) -> bool {
    self.bindings.contains_key(id)
      || self.instances.contains_key(id)
      || self.aliases.contains_key(id)
  }

  pub(crate) fn has_binding(&self, id: &Id) -> bool {
    self.bindings.contains_key(id)
  }

  pub(crate) fn has_instance(&self, id: &Id) -> bool {
    self.instances.contains_key(id)
  }

  pub(crate) fn is_shared(&self, id: &Id) -> bool {
    self.instances.contains_key(id) || self.bindings.get(id).is_some_and(|binding| binding.shared)
  }

  pub(crate) fn alias_target(&self, alias: &Id) -> Option<Id> {
    self.aliases.get(alias).cloned()
  }

  pub(crate) fn counts(&self) -> (usize, usize, usize) {
    (self.bindings.len(), self.instances.len(), self.aliases.len())
  }
}
