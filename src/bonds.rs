//! Bounded bond table behind the BLE security handler.
//!
//! One entry per host. A host that pairs again, under its old master ID
//! or a fresh one, replaces its own entry. A new host evicts the oldest
//! entry once the table is full.

use heapless::Vec;

struct Bond<M, K, P> {
    master_id: M,
    key: K,
    peer: P,
}

pub struct BondTable<M, K, P, const N: usize> {
    bonds: Vec<Bond<M, K, P>, N>,
}

impl<M: PartialEq, K: Copy, P, const N: usize> BondTable<M, K, P, N> {
    pub const fn new() -> Self {
        Self { bonds: Vec::new() }
    }

    /// Record a bond as the most recent entry.
    ///
    /// `same_host` identifies an existing entry's peer as the host that
    /// just bonded. Returns `true` when an entry was replaced rather than
    /// added.
    pub fn store(
        &mut self,
        master_id: M,
        key: K,
        peer: P,
        same_host: impl Fn(&P) -> bool,
    ) -> bool {
        let replaced = match self
            .bonds
            .iter()
            .position(|b| b.master_id == master_id || same_host(&b.peer))
        {
            Some(index) => {
                self.bonds.remove(index);
                true
            }
            None => {
                if self.bonds.is_full() {
                    self.bonds.remove(0);
                }
                false
            }
        };

        let _ = self.bonds.push(Bond {
            master_id,
            key,
            peer,
        });
        replaced
    }

    /// Long-term key stored for `master_id`.
    pub fn key(&self, master_id: &M) -> Option<K> {
        self.bonds
            .iter()
            .find_map(|b| (b.master_id == *master_id).then_some(b.key))
    }

    pub fn len(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }
}

impl<M: PartialEq, K: Copy, P, const N: usize> Default for BondTable<M, K, P, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Master ID, key, host address.
    type Table = BondTable<u16, u32, u8, 2>;

    fn host(addr: u8) -> impl Fn(&u8) -> bool {
        move |peer| *peer == addr
    }

    #[test]
    fn key_lookup_by_master_id() {
        let mut table = Table::new();
        assert!(!table.store(1, 0xAAAA, 10, host(10)));
        assert_eq!(table.key(&1), Some(0xAAAA));
        assert_eq!(table.key(&2), None);
    }

    #[test]
    fn same_master_id_replaces_key() {
        let mut table = Table::new();
        table.store(1, 0xAAAA, 10, host(10));
        assert!(table.store(1, 0xBBBB, 10, host(10)));
        assert_eq!(table.len(), 1);
        assert_eq!(table.key(&1), Some(0xBBBB));
    }

    #[test]
    fn host_repairing_with_new_master_id_replaces_its_own_bond() {
        let mut table = Table::new();
        table.store(1, 0xAAAA, 10, host(10));
        table.store(2, 0xBBBB, 20, host(20));

        // Host 10 forgot its keys and pairs again under master ID 3.
        assert!(table.store(3, 0xCCCC, 10, host(10)));

        assert_eq!(table.len(), 2);
        assert_eq!(table.key(&1), None);
        assert_eq!(table.key(&2), Some(0xBBBB));
        assert_eq!(table.key(&3), Some(0xCCCC));
    }

    #[test]
    fn new_host_evicts_oldest_when_full() {
        let mut table = Table::new();
        table.store(1, 0xAAAA, 10, host(10));
        table.store(2, 0xBBBB, 20, host(20));
        assert!(!table.store(3, 0xCCCC, 30, host(30)));

        assert_eq!(table.len(), 2);
        assert_eq!(table.key(&1), None);
        assert_eq!(table.key(&2), Some(0xBBBB));
        assert_eq!(table.key(&3), Some(0xCCCC));
    }

    #[test]
    fn rebond_refreshes_eviction_order() {
        let mut table = Table::new();
        table.store(1, 0xAAAA, 10, host(10));
        table.store(2, 0xBBBB, 20, host(20));
        table.store(1, 0xAAAB, 10, host(10));

        // Host 20 is now the oldest.
        table.store(3, 0xCCCC, 30, host(30));
        assert_eq!(table.key(&1), Some(0xAAAB));
        assert_eq!(table.key(&2), None);
    }
}
