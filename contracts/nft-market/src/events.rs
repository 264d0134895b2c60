use super::*;

/// Auction start event data.
#[derive(Debug, Serial)]
pub struct StartEvent<'a> {
    /// Token under auction.
    pub token: &'a Token,
    /// Account running the auction.
    pub seller: &'a AccountAddress,
    /// Bidding deadline.
    pub end_time: Timestamp,
}

/// Bid event data.
#[derive(Debug, Serial)]
pub struct BidEvent<'a> {
    /// Bidder account address.
    pub bidder: &'a AccountAddress,
    /// Bid amount.
    pub amount: Amount,
}

/// Escrow withdrawal event data.
#[derive(Debug, Serial)]
pub struct WithdrawEvent<'a> {
    /// Account recovering a displaced bid.
    pub bidder: &'a AccountAddress,
    /// Amount paid out. Zero when nothing was owed.
    pub amount: Amount,
}

/// Settlement event data.
#[derive(Debug, Serial)]
pub struct EndEvent<'a> {
    /// Auction winner. `None` when no bids were placed.
    pub winner: Option<&'a AccountAddress>,
    /// Winning bid amount.
    pub amount: Amount,
}

/// Tagged custom event to be serialized for the event log.
#[derive(Debug)]
pub enum MarketEvent<'a> {
    Start(StartEvent<'a>),
    Bid(BidEvent<'a>),
    Withdraw(WithdrawEvent<'a>),
    End(EndEvent<'a>),
}

impl<'a> MarketEvent<'a> {
    pub fn start(token: &'a Token, seller: &'a AccountAddress, end_time: Timestamp) -> Self {
        Self::Start(StartEvent {
            token,
            seller,
            end_time,
        })
    }

    pub fn bid(bidder: &'a AccountAddress, amount: Amount) -> Self {
        Self::Bid(BidEvent { bidder, amount })
    }

    pub fn withdraw(bidder: &'a AccountAddress, amount: Amount) -> Self {
        Self::Withdraw(WithdrawEvent { bidder, amount })
    }

    pub fn end(winner: Option<&'a AccountAddress>, amount: Amount) -> Self {
        Self::End(EndEvent { winner, amount })
    }
}

impl<'a> Serial for MarketEvent<'a> {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            MarketEvent::Start(event) => {
                out.write_u8(START_TAG)?;
                event.serial(out)
            }
            MarketEvent::Bid(event) => {
                out.write_u8(BID_TAG)?;
                event.serial(out)
            }
            MarketEvent::Withdraw(event) => {
                out.write_u8(WITHDRAW_TAG)?;
                event.serial(out)
            }
            MarketEvent::End(event) => {
                out.write_u8(END_TAG)?;
                event.serial(out)
            }
        }
    }
}
