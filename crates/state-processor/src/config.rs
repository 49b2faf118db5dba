//! Chain configuration and the fork gate.
//!
//! A [`ChainConfig`] is an ordered list of [`Fork`]s. Each fork activates at a block number and
//! enables a set of [`ForkFeature`]s, each identified by a name such as
//! [`features::EIP155`] and carrying typed options. The fork gate answers "is this feature
//! active at this block, and with which options" through [`ChainConfig::feature`].
//!
//! The serialized form follows the external chain configuration format:
//!
//! ```json
//! {
//!   "forks": [
//!     {
//!       "name": "Diehard",
//!       "block": 3000000,
//!       "features": [{ "id": "eip155", "options": { "chainID": 61 } }]
//!     }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use alloy_hardforks::ForkCondition;
use alloy_primitives::{BlockNumber, ChainId};
use serde::{Deserialize, Serialize};

use crate::{constants::features, SignerScheme};

/// The chain id of Ethereum Classic mainnet.
pub const CLASSIC_MAINNET_CHAIN_ID: ChainId = 61;

/// A typed option value of a [`ForkFeature`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::From)]
#[serde(untagged)]
pub enum FeatureOption {
    /// An integer option, e.g. a chain id.
    Number(u64),
    /// A string option.
    Text(String),
}

impl FeatureOption {
    /// Returns the option as an integer, if it is one.
    pub const fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

/// A protocol rule enabled by a [`Fork`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkFeature {
    /// The feature identifier, e.g. `eip155`.
    pub id: String,
    /// Named options of the feature.
    #[serde(default)]
    pub options: BTreeMap<String, FeatureOption>,
}

impl ForkFeature {
    /// Creates a feature without options.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), options: BTreeMap::new() }
    }

    /// Adds an option to the feature.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<FeatureOption>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Returns the option with the given name.
    pub fn option(&self, key: &str) -> Option<&FeatureOption> {
        self.options.get(key)
    }

    /// Returns the integer option with the given name.
    pub fn option_u64(&self, key: &str) -> Option<u64> {
        self.option(key).and_then(FeatureOption::as_u64)
    }
}

/// A named fork activating a set of features at a block number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fork {
    /// Human readable name of the fork.
    pub name: String,
    /// The first block at which the fork is active.
    pub block: BlockNumber,
    /// Features enabled from this fork on.
    #[serde(default)]
    pub features: Vec<ForkFeature>,
}

impl Fork {
    /// Creates a fork without features.
    pub fn new(name: impl Into<String>, block: BlockNumber) -> Self {
        Self { name: name.into(), block, features: Vec::new() }
    }

    /// Adds a feature to the fork.
    pub fn with_feature(mut self, feature: ForkFeature) -> Self {
        self.features.push(feature);
        self
    }

    /// The activation condition of the fork.
    pub const fn condition(&self) -> ForkCondition {
        ForkCondition::Block(self.block)
    }

    /// Returns `true` if the fork is active at the given block number.
    pub fn is_active_at(&self, number: BlockNumber) -> bool {
        self.condition().active_at_block(number)
    }
}

/// A feature that is active at some block, together with the fork that configured it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveFeature<'a> {
    /// The fork that enabled the feature.
    pub fork: &'a Fork,
    /// The feature itself.
    pub feature: &'a ForkFeature,
}

impl ActiveFeature<'_> {
    /// Returns the required chain id of the feature, i.e. its `chainID` option.
    pub fn chain_id(&self) -> Option<ChainId> {
        self.feature.option_u64(features::CHAIN_ID_OPTION)
    }
}

/// Errors raised while loading a [`ChainConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ChainConfigError {
    /// The configuration is not valid JSON or does not match the expected layout.
    #[error("invalid chain configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// A feature is missing a mandatory option.
    #[error("feature `{feature}` of fork `{fork}` is missing the `{option}` option")]
    MissingFeatureOption {
        /// The fork that configures the feature.
        fork: String,
        /// The feature identifier.
        feature: String,
        /// The missing option.
        option: &'static str,
    },
}

/// Fork rules of a chain, keyed by block number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    forks: Vec<Fork>,
}

impl ChainConfig {
    /// Creates a configuration from a list of forks. Forks are ordered by activation block.
    pub fn new(mut forks: Vec<Fork>) -> Self {
        forks.sort_by_key(|fork| fork.block);
        Self { forks }
    }

    /// Parses and validates a configuration in the external JSON format.
    pub fn from_json(json: &str) -> Result<Self, ChainConfigError> {
        let config: Self = serde_json::from_str(json)?;
        let config = Self::new(config.forks);
        config.validate()?;
        Ok(config)
    }

    /// The Ethereum Classic mainnet fork rules relevant to block processing.
    pub fn classic_mainnet() -> Self {
        Self::new(vec![
            Fork::new("Homestead", 1_150_000).with_feature(ForkFeature::new(features::HOMESTEAD)),
            Fork::new("GasReprice", 2_500_000).with_feature(ForkFeature::new("eip150")),
            Fork::new("Diehard", 3_000_000)
                .with_feature(
                    ForkFeature::new(features::EIP155)
                        .with_option(features::CHAIN_ID_OPTION, CLASSIC_MAINNET_CHAIN_ID),
                )
                .with_feature(ForkFeature::new("eip160")),
        ])
    }

    /// Checks that every feature carries the options the processor relies on.
    pub fn validate(&self) -> Result<(), ChainConfigError> {
        for fork in &self.forks {
            for feature in fork.features.iter().filter(|f| f.id == features::EIP155) {
                if feature.option_u64(features::CHAIN_ID_OPTION).is_none() {
                    return Err(ChainConfigError::MissingFeatureOption {
                        fork: fork.name.clone(),
                        feature: feature.id.clone(),
                        option: features::CHAIN_ID_OPTION,
                    });
                }
            }
        }
        Ok(())
    }

    /// The configured forks, ordered by activation block.
    pub fn forks(&self) -> &[Fork] {
        &self.forks
    }

    /// Looks up the feature `id` at block `number`.
    ///
    /// Returns `None` if no fork active at `number` configures the feature. If several do, the
    /// most recently activated one wins.
    pub fn feature(&self, number: BlockNumber, id: &str) -> Option<ActiveFeature<'_>> {
        self.forks
            .iter()
            .filter(|fork| fork.is_active_at(number))
            .flat_map(|fork| {
                fork.features
                    .iter()
                    .filter(move |feature| feature.id == id)
                    .map(move |feature| ActiveFeature { fork, feature })
            })
            .max_by_key(|active| active.fork.block)
    }

    /// Returns `true` if the feature `id` is active at block `number`.
    pub fn is_active(&self, number: BlockNumber, id: &str) -> bool {
        self.feature(number, id).is_some()
    }

    /// The chain id required by replay protection at block `number`, if it is active.
    pub fn chain_id_at(&self, number: BlockNumber) -> Option<ChainId> {
        self.feature(number, features::EIP155).and_then(|feature| feature.chain_id())
    }

    /// The signer scheme used to recover transaction senders at block `number`.
    pub fn signer_at(&self, number: BlockNumber) -> SignerScheme {
        self.chain_id_at(number).map_or(SignerScheme::Basic, SignerScheme::ChainId)
    }
}
