//! Signed data: one capability set over every message kind a cluster co-signs.
//!
//! Each kind wraps a wire payload and exposes the roots to sign and a single
//! signature slot. `set_signatures` never touches the receiver; it returns a
//! modified deep copy, so many partial signatures can be produced from one
//! shared unsigned value.

mod any;
mod attestation;
mod block;
mod codec;
mod exit;
mod partial;
mod randao;
mod registration;
mod signature;
mod sync;

pub use any::AnySignedData;
pub use attestation::{Attestation, BeaconCommitteeSelection, SignedAggregateAndProof};
pub use block::{VersionedSignedBeaconBlock, VersionedSignedBlindedBeaconBlock};
pub use exit::SignedVoluntaryExit;
pub use partial::ParSignedData;
pub use randao::SignedRandao;
pub use registration::VersionedSignedValidatorRegistration;
pub use signature::Signature;
pub use sync::{
    SignedSyncContributionAndProof, SignedSyncMessage, SyncCommitteeSelection,
    SyncContributionAndProof,
};

use crate::error::{Error, Result};
use crate::types::primitives::Root;
use std::fmt;

/// A message with one signature slot.
///
/// `Clone` is the deep copy: wrapped payloads own all their data.
pub trait SignedData: Clone + fmt::Debug + Send + Sync {
    /// Roots the signature(s) are computed over, in signing order.
    fn message_roots(&self) -> Result<Vec<Root>>;

    /// Current signature slot(s).
    fn signatures(&self) -> Vec<Signature>;

    /// Returns a copy with the signature slot(s) replaced.
    fn set_signatures(&self, sigs: &[Signature]) -> Result<Self>;
}

/// Digest of all message roots of `data`, merkleized as one container.
pub fn hash_message_roots<T: SignedData>(data: &T) -> Result<Root> {
    let roots = data
        .message_roots()
        .map_err(|e| Error::hash("message roots", e))?;
    crate::merkle::hash_roots(&roots)
}

/// How a single-slot kind treats more signatures than it has slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Surplus {
    /// Use the first, ignore the rest.
    TakeFirst,
    /// Fail with a validation error.
    Reject,
}

pub(crate) fn single_signature<'a>(
    kind: &'static str,
    sigs: &'a [Signature],
    surplus: Surplus,
) -> Result<&'a Signature> {
    match (sigs, surplus) {
        ([], _) => Err(Error::validation("zero signatures")),
        ([sig], _) => Ok(sig),
        ([sig, ..], Surplus::TakeFirst) => {
            tracing::debug!(kind, supplied = sigs.len(), "ignoring surplus signatures");
            Ok(sig)
        }
        (_, Surplus::Reject) => Err(Error::validation("signatures exceed 1")),
    }
}

/// Validation failure for a payload missing under its declared version.
pub(crate) fn missing_payload(kind: &'static str, version: impl fmt::Display) -> Error {
    tracing::debug!(kind, %version, "rejecting payload missing for declared version");
    Error::validation(format!("no {} {}", version, kind))
}

pub(crate) fn unknown_version(kind: &'static str) -> Error {
    tracing::debug!(kind, "rejecting unknown version");
    Error::validation("unknown version")
}
