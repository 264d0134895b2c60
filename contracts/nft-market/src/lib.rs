//! # NFTMarket auction contract
//!
//! Runs a single auction lifecycle for one token minted by the `MyNFT`
//! registry. The seller starts the auction, which pulls the token into the
//! contract's custody, bidders compete by attaching CCD to `bid`, and the
//! seller ends the auction to settle: token to the highest bidder, proceeds
//! to the seller.
//!
//! A displaced bid is never sent back automatically. It is credited to the
//! bidder's pending return balance and recovered through `withdraw`, so a
//! recipient that refuses transfers can not wedge the auction. All
//! bookkeeping is updated before any outbound transfer.
#![cfg_attr(not(feature = "std"), no_std)]
use commons::*;
use concordium_cis2::*;
use concordium_std::*;

use crate::{events::*, external::*, state::*};

mod contract;
mod events;
mod external;
mod nft;
mod state;
