use crate::chain::ChainKey;
use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::value::RawValue;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

/// What a planned transaction is for.
///
/// `Hold` and `Error` are terminal: the planner uses them to report a chain it decided not to
/// touch (balance below fees, quote failure). They are never submitted to the wallet.
#[derive(Copy, Clone, Debug, Display, PartialEq, Hash, Eq, EnumString, EnumIter, Deserialize, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Transfer,
    Fee,
    Bridge,
    Hold,
    Error,
}

impl TxKind {
    pub fn is_terminal(&self) -> bool {
        match self {
            TxKind::Hold | TxKind::Error => true,
            TxKind::Transfer | TxKind::Fee | TxKind::Bridge => false,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestFormatError {
    #[error("request has neither `chain_key` nor `chain`")]
    MissingChain,
    #[error("invalid recipient address `{0}`")]
    InvalidRecipient(String),
    #[error("invalid amount `{0}`")]
    InvalidAmount(String),
}

/// One unit of work produced by the planner: a call on a single chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireRequest")]
pub struct TransactionRequest {
    #[serde(rename = "chain_key")]
    pub chain: ChainKey,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub to: Option<Address>,
    pub value: U256,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
    #[serde(rename = "gasLimit", skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,
    pub description: String,
}

impl TransactionRequest {
    pub fn new(chain: impl Into<ChainKey>, kind: TxKind, to: Option<Address>, value: U256) -> Self {
        Self { chain: chain.into(), kind, to, value, data: None, gas_limit: None, description: String::new() }
    }

    pub fn transfer(chain: impl Into<ChainKey>, to: Address, value: U256) -> Self {
        Self::new(chain, TxKind::Transfer, Some(to), value)
    }

    pub fn fee(chain: impl Into<ChainKey>, to: Address, value: U256) -> Self {
        Self::new(chain, TxKind::Fee, Some(to), value)
    }

    pub fn bridge(chain: impl Into<ChainKey>, to: Address, value: U256, data: Bytes) -> Self {
        Self::new(chain, TxKind::Bridge, Some(to), value).with_data(data)
    }

    pub fn hold(chain: impl Into<ChainKey>, description: impl Into<String>) -> Self {
        Self::new(chain, TxKind::Hold, None, U256::ZERO).with_description(description)
    }

    pub fn with_data(mut self, data: Bytes) -> Self {
        self.data = (!data.is_empty()).then_some(data);
        self
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }

    /// Description for status lines, falling back to the kind.
    pub fn label(&self) -> String {
        if self.description.is_empty() { format!("{} on {}", self.kind, self.chain) } else { self.description.clone() }
    }
}

/// Amounts arrive as decimal strings, `0x` hex strings or plain JSON numbers depending on the planner.
///
/// Numbers are kept as their literal text so wei amounts beyond `u64` parse exactly.
struct WireAmount(String);

impl<'de> Deserialize<'de> for WireAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        let literal = raw.get();
        if literal.starts_with('"') {
            serde_json::from_str::<String>(literal).map(WireAmount).map_err(de::Error::custom)
        } else {
            Ok(WireAmount(literal.to_string()))
        }
    }
}

impl WireAmount {
    fn into_u256(self) -> Result<U256, RequestFormatError> {
        let text = self.0.trim();
        if text.is_empty() {
            return Ok(U256::ZERO);
        }
        U256::from_str(text).map_err(|_| RequestFormatError::InvalidAmount(self.0.clone()))
    }

    fn into_u64(self) -> Result<u64, RequestFormatError> {
        let raw = self.0.clone();
        u64::try_from(self.into_u256()?).map_err(|_| RequestFormatError::InvalidAmount(raw))
    }
}

#[derive(Deserialize)]
struct WireRequest {
    chain_key: Option<String>,
    chain: Option<String>,
    #[serde(rename = "type")]
    kind: TxKind,
    to: Option<String>,
    value: Option<WireAmount>,
    data: Option<Bytes>,
    #[serde(alias = "gas_limit", rename = "gasLimit")]
    gas_limit: Option<WireAmount>,
    #[serde(default)]
    description: Option<String>,
}

impl TryFrom<WireRequest> for TransactionRequest {
    type Error = RequestFormatError;

    fn try_from(wire: WireRequest) -> Result<Self, Self::Error> {
        let chain = wire
            .chain_key
            .filter(|key| !key.is_empty())
            .or(wire.chain.filter(|key| !key.is_empty()))
            .ok_or(RequestFormatError::MissingChain)?;

        let to = match wire.to.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(Address::from_str(raw).map_err(|_| RequestFormatError::InvalidRecipient(raw.to_string()))?),
        };

        Ok(Self {
            chain,
            kind: wire.kind,
            to,
            value: wire.value.map(WireAmount::into_u256).transpose()?.unwrap_or_default(),
            data: wire.data.filter(|data| !data.is_empty()),
            gas_limit: wire.gas_limit.map(WireAmount::into_u64).transpose()?,
            description: wire.description.unwrap_or_default(),
        })
    }
}
