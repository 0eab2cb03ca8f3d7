use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::permissions::GrantTable;

/// Shared handle to the active grant table. A table is never edited in
/// place; `replace` publishes a whole new one and readers keep whatever
/// snapshot they already hold.
#[derive(Debug, Clone)]
pub struct SharedGrants {
    current: Arc<ArcSwap<GrantTable>>,
}

impl SharedGrants {
    pub fn new(table: GrantTable) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(table)),
        }
    }

    pub fn snapshot(&self) -> Arc<GrantTable> {
        self.current.load_full()
    }

    pub fn replace(&self, table: GrantTable) {
        self.current.store(Arc::new(table));
        tracing::info!("grant table replaced");
    }
}

impl Default for SharedGrants {
    fn default() -> Self {
        Self::new(GrantTable::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::Capability;
    use crate::types::Role;
    use std::collections::BTreeMap;

    #[test]
    fn replace_publishes_new_table() {
        let shared = SharedGrants::default();
        let before = shared.snapshot();
        assert!(before.has_permission(Role::Delegate, Capability::EditOwnTeam));

        let mut overrides = BTreeMap::new();
        overrides.insert("delegate".to_string(), vec!["view_teams".to_string()]);
        shared.replace(GrantTable::from_overrides(&overrides).unwrap());

        let after = shared.snapshot();
        assert!(!after.has_permission(Role::Delegate, Capability::EditOwnTeam));
        // Old snapshot is untouched.
        assert!(before.has_permission(Role::Delegate, Capability::EditOwnTeam));
    }

    #[test]
    fn clones_share_the_same_slot() {
        let shared = SharedGrants::default();
        let other = shared.clone();
        let mut overrides = BTreeMap::new();
        overrides.insert("player".to_string(), Vec::new());
        other.replace(GrantTable::from_overrides(&overrides).unwrap());
        assert!(!shared
            .snapshot()
            .has_permission(Role::Player, Capability::ViewTeams));
    }

    #[test]
    fn concurrent_readers_see_whole_tables() {
        let shared = SharedGrants::default();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let table = shared.snapshot();
                        assert!(table.has_permission(Role::Administrator, Capability::ManageRoles));
                    }
                })
            })
            .collect();
        for _ in 0..50 {
            shared.replace(GrantTable::standard());
        }
        for h in handles {
            h.join().unwrap();
        }
    }
}
