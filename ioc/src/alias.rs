//! Alias chain resolution.

use crate::error::{Error, Result};
use crate::id::Id;
use std::collections::HashMap;

/// Follows `id` through `aliases` to the identifier it finally names.
///
/// An identifier with no alias entry resolves to itself. A chain that
/// revisits an identifier fails with [`Error::CyclicAlias`].
pub(crate) fn resolve_alias(aliases: &HashMap<Id, Id>, id: &Id) -> Result<Id> {
  let mut chain = vec![id];
  let mut current = id;
  while let Some(target) = aliases.get(current) {
    let looped = chain.contains(&target);
    chain.push(target);
    if looped {
      return Err(Error::CyclicAlias {
        chain: chain
          .iter()
          .map(|id| id.to_string())
          .collect::<Vec<_>>()
          .join(" -> "),
      });
    }
    current = target;
  }
  Ok(current.clone())
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn aliases(pairs: &[(&str, &str)]) -> HashMap<Id, Id> {
    pairs
      .iter()
      .map(|(alias, target)| (Id::named(*alias), Id::named(*target)))
      .collect()
  }

  #[test]
  fn unaliased_id_resolves_to_itself() {
    let map = aliases(&[("db", "database")]);
    assert_eq!(resolve_alias(&map, &Id::named("cache")).unwrap(), Id::named("cache"));
  }

  #[test]
  fn follows_the_whole_chain() {
    let map = aliases(&[("c", "b"), ("b", "a")]);
    assert_eq!(resolve_alias(&map, &Id::named("c")).unwrap(), Id::named("a"));
    assert_eq!(resolve_alias(&map, &Id::named("b")).unwrap(), Id::named("a"));
  }

  #[test]
  fn reports_the_loop() {
    let map = aliases(&[("a", "b"), ("b", "c"), ("c", "b")]);
    match resolve_alias(&map, &Id::named("a")) {
      Err(Error::CyclicAlias { chain }) => assert_eq!(chain, "a -> b -> c -> b"),
      other => panic!("expected a cyclic alias, got {:?}", other),
    }
  }
}
