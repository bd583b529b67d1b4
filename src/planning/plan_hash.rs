use super::request::TransactionRequest;
use alloy_primitives::hex;
use serde::{Deserialize, Serialize};
use sha2::digest::Update;
use sha2::{Digest, Sha256};
use std::fmt::{Debug, Display};

/// Fingerprint of a batch of planned transactions, used to correlate a run across log lines.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct PlanHash(pub [u8; 32]);

impl PlanHash {
    /// First eight hex digits, enough to tell runs apart in a log.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl Display for PlanHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode_prefixed(self.0))
    }
}

impl Debug for PlanHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PlanHash({})", hex::encode_prefixed(self.0))
    }
}

impl From<[u8; 32]> for PlanHash {
    fn from(hash: [u8; 32]) -> Self {
        PlanHash(hash)
    }
}

impl Serialize for PlanHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&hex::encode_prefixed(self.0))
    }
}

impl<'de> Deserialize<'de> for PlanHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        let hash: [u8; 32] = bytes
            .try_into()
            .map_err(|bytes: Vec<u8>| serde::de::Error::invalid_length(bytes.len(), &"32 bytes"))?;
        Ok(PlanHash(hash))
    }
}

/// Hash every routed field of every request, in order, to a sha256 hash.
/// Reordering the batch changes the hash.
pub fn generate_plan_hash(requests: &[TransactionRequest]) -> PlanHash {
    let mut hasher = Sha256::new();

    for request in requests {
        Update::update(&mut hasher, request.chain.as_bytes());
        Update::update(&mut hasher, &[0]);
        Update::update(&mut hasher, request.kind.to_string().as_bytes());
        Update::update(&mut hasher, request.to.unwrap_or_default().as_slice());
        Update::update(&mut hasher, &request.value.to_be_bytes::<32>());
        Update::update(&mut hasher, request.data.as_ref().map_or(&[][..], |data| data.as_ref()));
        Update::update(&mut hasher, &request.gas_limit.unwrap_or_default().to_be_bytes());
    }

    let hash_slice: [u8; 32] = hasher.finalize().into();
    PlanHash(hash_slice)
}
