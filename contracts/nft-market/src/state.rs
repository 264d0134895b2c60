use super::*;

/// Auction outcome produced by `end`.
#[must_use]
pub enum AuctionResult {
    /// Token goes to the winner, proceeds to the seller.
    Winner {
        account: AccountAddress,
        price: Amount,
    },
    /// No bids were placed; the token returns to the seller.
    NoBids,
}

/// The market state: a single auction lifecycle for one token.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Account allowed to start and end the auction.
    pub seller: AccountAddress,
    /// Token under auction.
    pub token: Token,
    /// Smallest acceptable opening bid.
    pub min_bid: Amount,
    /// Time from `start` until the bidding deadline.
    pub duration: Duration,
    /// Threshold rule for the opening bid.
    pub reserve_policy: ReservePolicy,
    /// Close rule for the seller.
    pub close_policy: ClosePolicy,
    /// Set once by `start`, never reset.
    pub started: bool,
    /// Set once by `end`, never reset.
    pub ended: bool,
    /// Bidding deadline, set by `start`.
    pub end_time: Option<Timestamp>,
    /// Current leading bid.
    pub highest_bid: Amount,
    /// Current leading bidder.
    pub highest_bidder: Option<AccountAddress>,
    /// Refundable escrow per displaced bidder.
    pub pending_returns: StateMap<AccountAddress, Amount, S>,
}

impl<S: HasStateApi> State<S> {
    pub fn new(
        state_builder: &mut StateBuilder<S>,
        seller: AccountAddress,
        params: &InitParams,
    ) -> Self {
        State {
            seller,
            token: Token {
                contract: params.nft,
                id: params.token_id,
            },
            min_bid: params.min_bid,
            duration: params.duration,
            reserve_policy: params.reserve_policy,
            close_policy: params.close_policy,
            started: false,
            ended: false,
            end_time: None,
            highest_bid: Amount::zero(),
            highest_bidder: None,
            pending_returns: state_builder.new_map(),
        }
    }

    /// Move the auction to the started state and compute the deadline.
    pub fn start(&mut self, slot_time: Timestamp) -> ContractResult<Timestamp> {
        ensure!(!self.started, CustomContractError::AlreadyStarted.into());
        let end_time = slot_time
            .checked_add(self.duration)
            .ok_or_else(|| ContractError::from(CustomContractError::InvalidDuration))?;
        self.started = true;
        self.end_time = Some(end_time);
        Ok(end_time)
    }

    /// Record a bid, displacing the previous leader into `pending_returns`.
    ///
    /// The opening bid must clear `min_bid` per the reserve policy, every
    /// later bid must strictly exceed the current highest bid.
    pub fn bid(
        &mut self,
        bidder: AccountAddress,
        amount: Amount,
        slot_time: Timestamp,
    ) -> ContractResult<()> {
        ensure!(
            self.started && !self.ended,
            CustomContractError::AuctionNotActive.into()
        );
        let end_time = self
            .end_time
            .ok_or_else(|| ContractError::from(CustomContractError::AuctionNotActive))?;
        ensure!(
            slot_time < end_time,
            CustomContractError::AuctionNotActive.into()
        );

        match self.highest_bidder {
            Some(_) => ensure!(
                amount > self.highest_bid,
                CustomContractError::BidTooLow.into()
            ),
            None => {
                let cleared = match self.reserve_policy {
                    ReservePolicy::Inclusive => amount >= self.min_bid,
                    ReservePolicy::Exclusive => amount > self.min_bid,
                };
                ensure!(cleared, CustomContractError::BidTooLow.into());
            }
        }

        // The displaced leader becomes withdrawable. It is never refunded
        // inline, so a refusing recipient can not block new bids.
        if let Some(previous) = self.highest_bidder.replace(bidder) {
            let credited = self.pending_return(&previous) + self.highest_bid;
            self.pending_returns.insert(previous, credited);
        }
        self.highest_bid = amount;
        Ok(())
    }

    /// Zero the caller's escrow entry and return the amount owed.
    pub fn withdraw(&mut self, bidder: &AccountAddress) -> Amount {
        let amount = self.pending_return(bidder);
        self.pending_returns.remove(bidder);
        amount
    }

    /// Close the auction and report the outcome.
    pub fn end(&mut self, slot_time: Timestamp) -> ContractResult<AuctionResult> {
        ensure!(self.started, CustomContractError::NotStarted.into());
        ensure!(!self.ended, CustomContractError::AlreadyEnded.into());
        if let ClosePolicy::AfterDeadline = self.close_policy {
            let end_time = self
                .end_time
                .ok_or_else(|| ContractError::from(CustomContractError::NotStarted))?;
            ensure!(slot_time >= end_time, CustomContractError::TooEarly.into());
        }
        self.ended = true;
        Ok(match self.highest_bidder {
            Some(account) => AuctionResult::Winner {
                account,
                price: self.highest_bid,
            },
            None => AuctionResult::NoBids,
        })
    }

    /// Escrow currently owed to an account.
    pub fn pending_return(&self, bidder: &AccountAddress) -> Amount {
        self.pending_returns
            .get(bidder)
            .map(|amount| *amount)
            .unwrap_or_else(Amount::zero)
    }

    /// Snapshot for the `getAuctionInfo` view.
    pub fn info(&self) -> AuctionInfo {
        AuctionInfo {
            seller: self.seller,
            token: self.token,
            min_bid: self.min_bid,
            highest_bid: self.highest_bid,
            highest_bidder: self.highest_bidder,
            started: self.started,
            ended: self.ended,
            end_time: self.end_time,
        }
    }
}
