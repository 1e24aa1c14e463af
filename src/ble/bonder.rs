//! "Just works" bonding for the gamepad's hosts.
//!
//! Bonds live in a [`BondTable`] in RAM and do not survive a reset; the
//! host re-pairs after power-up.

use core::cell::RefCell;

use defmt::info;
use nrf_softdevice::ble::security::{IoCapabilities, SecurityHandler};
use nrf_softdevice::ble::{Connection, EncryptionInfo, IdentityKey, MasterId, SecurityMode};
use static_cell::StaticCell;

use crate::bonds::BondTable;
use crate::config::MAX_BONDED_HOSTS;

type HostBonds = BondTable<MasterId, EncryptionInfo, IdentityKey, MAX_BONDED_HOSTS>;

pub struct Bonder {
    hosts: RefCell<HostBonds>,
}

impl SecurityHandler for Bonder {
    fn io_capabilities(&self) -> IoCapabilities {
        IoCapabilities::None
    }

    fn can_bond(&self, _conn: &Connection) -> bool {
        true
    }

    fn on_bonded(
        &self,
        conn: &Connection,
        master_id: MasterId,
        key: EncryptionInfo,
        peer_id: IdentityKey,
    ) {
        let address = conn.peer_address();
        let replaced = self
            .hosts
            .borrow_mut()
            .store(master_id, key, peer_id, |known| known.is_match(address));

        if replaced {
            info!("BLE: host re-bonded");
        } else {
            info!("BLE: new host bonded");
        }
    }

    fn get_key(&self, _conn: &Connection, master_id: MasterId) -> Option<EncryptionInfo> {
        self.hosts.borrow().key(&master_id)
    }

    fn on_security_update(&self, _conn: &Connection, mode: SecurityMode) {
        info!("BLE: security mode {}", mode);
    }
}

/// The bonder shared by every advertisement. Call once.
pub fn bonder() -> &'static Bonder {
    static BONDER: StaticCell<Bonder> = StaticCell::new();
    BONDER.init(Bonder {
        hosts: RefCell::new(BondTable::new()),
    })
}
