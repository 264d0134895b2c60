//! # MyNFT registry contract
//!
//! Mints non-fungible tokens with integer ids and tracks the single owner
//! of each token. Transfers follow CIS-2 semantics: only the current owner
//! or one of the owner's operators may move a token. The auction market
//! takes custody of a token through a regular operator transfer, so no
//! market-specific logic lives in this contract.
#![cfg_attr(not(feature = "std"), no_std)]
use commons::*;
use concordium_cis2::*;
use concordium_std::*;

use crate::{external::*, state::*};

mod contract;
mod external;
mod state;
