use super::*;

/// Acceptance threshold for the opening bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, SchemaType)]
pub enum ReservePolicy {
    /// The opening bid must be at least the minimum bid.
    Inclusive,
    /// The opening bid must strictly exceed the minimum bid.
    Exclusive,
}

/// When the seller is allowed to close the auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, SchemaType)]
pub enum ClosePolicy {
    /// The auction can only be ended once the deadline has passed.
    AfterDeadline,
    /// The seller may end the auction at any time after it started.
    SellerDiscretion,
}

/// Parameters for creating a market instance.
#[derive(Debug, Clone, Serialize, SchemaType)]
pub struct InitParams {
    /// NFT registry contract that minted the token under auction.
    pub nft: ContractAddress,
    /// Id of the token under auction.
    pub token_id: ContractTokenId,
    /// Smallest acceptable opening bid.
    pub min_bid: Amount,
    /// Time from `start` until the bidding deadline.
    pub duration: Duration,
    /// Account allowed to start and end the auction. Defaults to the
    /// account creating this instance.
    pub seller: Option<AccountAddress>,
    /// Threshold rule for the opening bid.
    pub reserve_policy: ReservePolicy,
    /// Close rule for the seller.
    pub close_policy: ClosePolicy,
}

/// Read-only snapshot of the auction returned by `getAuctionInfo`.
#[derive(Debug, PartialEq, Eq, Serialize, SchemaType)]
pub struct AuctionInfo {
    pub seller: AccountAddress,
    pub token: Token,
    pub min_bid: Amount,
    pub highest_bid: Amount,
    pub highest_bidder: Option<AccountAddress>,
    pub started: bool,
    pub ended: bool,
    pub end_time: Option<Timestamp>,
}
