//! Signing domains.
//!
//! Signed data only yields message roots; a signer combines each root with a
//! domain chosen by [`DomainName`] and epoch. The lookups are collaborator
//! traits so callers can back them with a beacon node. [`ForkDomains`] is a
//! self-contained implementation over a [`ChainSpec`].

use crate::config::ChainSpec;
use crate::error::{Error, Result};
use crate::merkle::{Hasher, Merkleized};
use crate::signeddata::SignedData;
use crate::types::primitives::{Domain, Epoch, ForkVersion, Root, Slot};
use crate::types::version::DataVersion;
use std::fmt;
use tree_hash::TreeHash;
use tree_hash_derive::TreeHash;

/// 4-byte domain type prefix.
pub type DomainType = [u8; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainName {
    BeaconProposer,
    BeaconAttester,
    Randao,
    Deposit,
    VoluntaryExit,
    SelectionProof,
    AggregateAndProof,
    SyncCommittee,
    SyncCommitteeSelectionProof,
    ContributionAndProof,
    /// Builder API registrations.
    ApplicationBuilder,
}

impl DomainName {
    pub fn domain_type(self) -> DomainType {
        match self {
            Self::BeaconProposer => [0, 0, 0, 0],
            Self::BeaconAttester => [1, 0, 0, 0],
            Self::Randao => [2, 0, 0, 0],
            Self::Deposit => [3, 0, 0, 0],
            Self::VoluntaryExit => [4, 0, 0, 0],
            Self::SelectionProof => [5, 0, 0, 0],
            Self::AggregateAndProof => [6, 0, 0, 0],
            Self::SyncCommittee => [7, 0, 0, 0],
            Self::SyncCommitteeSelectionProof => [8, 0, 0, 0],
            Self::ContributionAndProof => [9, 0, 0, 0],
            Self::ApplicationBuilder => [0, 0, 0, 1],
        }
    }

    /// Domains signed independently of the fork schedule and genesis.
    pub fn is_fork_agnostic(self) -> bool {
        matches!(self, Self::ApplicationBuilder | Self::Deposit)
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BeaconProposer => "beacon_proposer",
            Self::BeaconAttester => "beacon_attester",
            Self::Randao => "randao",
            Self::Deposit => "deposit",
            Self::VoluntaryExit => "voluntary_exit",
            Self::SelectionProof => "selection_proof",
            Self::AggregateAndProof => "aggregate_and_proof",
            Self::SyncCommittee => "sync_committee",
            Self::SyncCommitteeSelectionProof => "sync_committee_selection_proof",
            Self::ContributionAndProof => "contribution_and_proof",
            Self::ApplicationBuilder => "application_builder",
        };
        f.write_str(name)
    }
}

/// Resolves the domain for a name at an epoch.
pub trait SigningDomain {
    fn domain(&self, name: DomainName, epoch: Epoch) -> Result<Domain>;
}

/// Maps a slot to its epoch.
pub trait EpochLookup {
    fn epoch_from_slot(&self, slot: Slot) -> Result<Epoch>;
}

/// Kinds that sign under a domain other than the one their duty implies.
pub trait DomainNamed {
    fn domain_names(&self) -> Vec<DomainName>;
    fn epoch(&self, lookup: &dyn EpochLookup) -> Result<Epoch>;
}

impl EpochLookup for ChainSpec {
    fn epoch_from_slot(&self, slot: Slot) -> Result<Epoch> {
        self.slot_to_epoch(slot)
            .ok_or_else(|| Error::validation("zero slots per epoch"))
    }
}

struct ForkData {
    current_version: ForkVersion,
    genesis_validators_root: Root,
}

impl Merkleized for ForkData {
    fn hash_tree_root_with(&self, hh: &mut Hasher) -> Result<()> {
        let index = hh.index();
        hh.put_bytes(&self.current_version);
        hh.put_root(&self.genesis_validators_root);
        hh.merkleize(index);
        Ok(())
    }
}

#[derive(TreeHash)]
struct SigningData {
    object_root: Root,
    domain: Domain,
}

pub fn compute_fork_data_root(fork_version: ForkVersion, genesis_validators_root: Root) -> Result<Root> {
    ForkData {
        current_version: fork_version,
        genesis_validators_root,
    }
    .hash_tree_root()
}

/// `domain_type ++ fork_data_root[..28]`
pub fn compute_domain(
    domain_type: DomainType,
    fork_version: ForkVersion,
    genesis_validators_root: Root,
) -> Result<Domain> {
    let fork_data_root = compute_fork_data_root(fork_version, genesis_validators_root)?;

    let mut domain = [0u8; 32];
    domain[..4].copy_from_slice(&domain_type);
    domain[4..].copy_from_slice(&fork_data_root.as_slice()[..28]);
    Ok(Domain::from(domain))
}

pub fn compute_signing_root(object_root: Root, domain: Domain) -> Root {
    SigningData {
        object_root,
        domain,
    }
    .tree_hash_root()
}

/// Domains from a static fork schedule and a known genesis validators root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForkDomains {
    pub spec: ChainSpec,
    pub genesis_validators_root: Root,
}

impl ForkDomains {
    pub fn new(spec: ChainSpec, genesis_validators_root: Root) -> Self {
        Self {
            spec,
            genesis_validators_root,
        }
    }
}

impl ForkDomains {
    /// Fork version a domain is computed with at `epoch`. Voluntary exits
    /// stay on the capella version from deneb onwards (EIP-7044).
    fn fork_version(&self, name: DomainName, epoch: Epoch) -> ForkVersion {
        match name {
            DomainName::VoluntaryExit
                if self.spec.data_version_at_epoch(epoch) >= DataVersion::Deneb =>
            {
                self.spec.capella_fork_version
            }
            _ => self.spec.fork_version_at_epoch(epoch),
        }
    }
}

impl SigningDomain for ForkDomains {
    fn domain(&self, name: DomainName, epoch: Epoch) -> Result<Domain> {
        if name.is_fork_agnostic() {
            return compute_domain(name.domain_type(), self.spec.genesis_fork_version, Root::ZERO);
        }
        compute_domain(
            name.domain_type(),
            self.fork_version(name, epoch),
            self.genesis_validators_root,
        )
    }
}

impl EpochLookup for ForkDomains {
    fn epoch_from_slot(&self, slot: Slot) -> Result<Epoch> {
        self.spec.epoch_from_slot(slot)
    }
}

/// Signing roots of `data` under one domain, in message root order.
pub fn signing_roots<T: SignedData>(
    data: &T,
    domains: &dyn SigningDomain,
    name: DomainName,
    epoch: Epoch,
) -> Result<Vec<Root>> {
    let domain = domains.domain(name, epoch)?;
    Ok(data
        .message_roots()?
        .into_iter()
        .map(|root| compute_signing_root(root, domain))
        .collect())
}

/// Signing roots of a [`DomainNamed`] kind under each domain it declares,
/// at the epoch it reports.
pub fn named_signing_roots<T: SignedData + DomainNamed>(
    data: &T,
    domains: &dyn SigningDomain,
    lookup: &dyn EpochLookup,
) -> Result<Vec<Root>> {
    let epoch = data.epoch(lookup)?;
    let mut roots = Vec::new();
    for name in data.domain_names() {
        roots.extend(signing_roots(data, domains, name, epoch)?);
    }
    Ok(roots)
}
