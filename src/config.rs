use crate::types::primitives::{Epoch, ForkVersion, Slot};
use crate::types::version::DataVersion;

/// Epoch value used for forks that are not scheduled.
pub const FAR_FUTURE_EPOCH: Epoch = u64::MAX;

/// Ethereum consensus layer chain specification
///
/// Defines the network constants the signed-data layer needs: epoch length and
/// the fork schedule used to pick fork versions for signing domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainSpec {
    /// Preset name ("mainnet" or "minimal")
    pub preset_name: &'static str,

    /// Number of slots per epoch
    /// - Mainnet: 32
    /// - Minimal: 8
    pub slots_per_epoch: u64,

    /// Genesis (phase0) fork version
    /// - Mainnet: [0x00, 0x00, 0x00, 0x00]
    /// - Minimal: [0x00, 0x00, 0x00, 0x01]
    pub genesis_fork_version: ForkVersion,

    /// Altair fork version and activation epoch
    pub altair_fork_version: ForkVersion,
    pub altair_fork_epoch: Epoch,

    /// Bellatrix fork version and activation epoch
    pub bellatrix_fork_version: ForkVersion,
    pub bellatrix_fork_epoch: Epoch,

    /// Capella fork version and activation epoch
    pub capella_fork_version: ForkVersion,
    pub capella_fork_epoch: Epoch,

    /// Deneb fork version and activation epoch
    pub deneb_fork_version: ForkVersion,
    pub deneb_fork_epoch: Epoch,
}

impl ChainSpec {
    /// Ethereum mainnet specification
    pub const fn mainnet() -> Self {
        Self {
            preset_name: "mainnet",
            slots_per_epoch: 32,
            genesis_fork_version: [0x00, 0x00, 0x00, 0x00],
            altair_fork_version: [0x01, 0x00, 0x00, 0x00],
            altair_fork_epoch: 74240,
            bellatrix_fork_version: [0x02, 0x00, 0x00, 0x00],
            bellatrix_fork_epoch: 144896,
            capella_fork_version: [0x03, 0x00, 0x00, 0x00],
            capella_fork_epoch: 194048,
            deneb_fork_version: [0x04, 0x00, 0x00, 0x00],
            deneb_fork_epoch: 269568,
        }
    }

    /// Minimal test specification
    ///
    /// Forks are unscheduled, matching the consensus-spec minimal config.
    pub const fn minimal() -> Self {
        Self {
            preset_name: "minimal",
            slots_per_epoch: 8,
            genesis_fork_version: [0x00, 0x00, 0x00, 0x01],
            altair_fork_version: [0x01, 0x00, 0x00, 0x01],
            altair_fork_epoch: FAR_FUTURE_EPOCH,
            bellatrix_fork_version: [0x02, 0x00, 0x00, 0x01],
            bellatrix_fork_epoch: FAR_FUTURE_EPOCH,
            capella_fork_version: [0x03, 0x00, 0x00, 0x01],
            capella_fork_epoch: FAR_FUTURE_EPOCH,
            deneb_fork_version: [0x04, 0x00, 0x00, 0x01],
            deneb_fork_epoch: FAR_FUTURE_EPOCH,
        }
    }

    /// Convert slot to epoch. `None` when `slots_per_epoch` is zero.
    pub const fn slot_to_epoch(&self, slot: Slot) -> Option<Epoch> {
        slot.checked_div(self.slots_per_epoch)
    }

    /// First slot of an epoch
    pub const fn epoch_start_slot(&self, epoch: Epoch) -> Slot {
        epoch.saturating_mul(self.slots_per_epoch)
    }

    /// Fork active at `epoch`.
    pub const fn data_version_at_epoch(&self, epoch: Epoch) -> DataVersion {
        if epoch >= self.deneb_fork_epoch {
            DataVersion::Deneb
        } else if epoch >= self.capella_fork_epoch {
            DataVersion::Capella
        } else if epoch >= self.bellatrix_fork_epoch {
            DataVersion::Bellatrix
        } else if epoch >= self.altair_fork_epoch {
            DataVersion::Altair
        } else {
            DataVersion::Phase0
        }
    }

    /// Fork version active at `epoch`.
    pub const fn fork_version_at_epoch(&self, epoch: Epoch) -> ForkVersion {
        match self.data_version_at_epoch(epoch) {
            DataVersion::Deneb => self.deneb_fork_version,
            DataVersion::Capella => self.capella_fork_version,
            DataVersion::Bellatrix => self.bellatrix_fork_version,
            DataVersion::Altair => self.altair_fork_version,
            DataVersion::Phase0 | DataVersion::Unknown => self.genesis_fork_version,
        }
    }
}

impl Default for ChainSpec {
    fn default() -> Self {
        Self::mainnet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_spec() {
        let spec = ChainSpec::mainnet();
        assert_eq!(spec.preset_name, "mainnet");
        assert_eq!(spec.slots_per_epoch, 32);
        assert_eq!(spec.altair_fork_version, [0x01, 0x00, 0x00, 0x00]);
        assert_eq!(spec.deneb_fork_epoch, 269568);
    }

    #[test]
    fn test_minimal_spec() {
        let spec = ChainSpec::minimal();
        assert_eq!(spec.preset_name, "minimal");
        assert_eq!(spec.slots_per_epoch, 8);
        assert_eq!(spec.genesis_fork_version, [0x00, 0x00, 0x00, 0x01]);
        assert_eq!(spec.data_version_at_epoch(1_000_000), DataVersion::Phase0);
    }

    #[test]
    fn test_slot_to_epoch() {
        let spec = ChainSpec::mainnet();
        assert_eq!(spec.slot_to_epoch(0), Some(0));
        assert_eq!(spec.slot_to_epoch(31), Some(0));
        assert_eq!(spec.slot_to_epoch(32), Some(1));
        assert_eq!(ChainSpec::minimal().slot_to_epoch(17), Some(2));
        assert_eq!(spec.epoch_start_slot(3), 96);
    }

    #[test]
    fn test_slot_to_epoch_zero_length_epoch() {
        let mut spec = ChainSpec::minimal();
        spec.slots_per_epoch = 0;
        assert_eq!(spec.slot_to_epoch(17), None);
    }

    #[test]
    fn test_fork_schedule_mainnet() {
        let spec = ChainSpec::mainnet();
        assert_eq!(spec.data_version_at_epoch(0), DataVersion::Phase0);
        assert_eq!(spec.data_version_at_epoch(74239), DataVersion::Phase0);
        assert_eq!(spec.data_version_at_epoch(74240), DataVersion::Altair);
        assert_eq!(spec.data_version_at_epoch(144896), DataVersion::Bellatrix);
        assert_eq!(spec.data_version_at_epoch(194048), DataVersion::Capella);
        assert_eq!(spec.data_version_at_epoch(300000), DataVersion::Deneb);

        assert_eq!(spec.fork_version_at_epoch(0), [0, 0, 0, 0]);
        assert_eq!(spec.fork_version_at_epoch(194048), [3, 0, 0, 0]);
    }
}
