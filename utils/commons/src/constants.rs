/// Tag for the custom Start event.
pub const START_TAG: u8 = u8::MAX - 5;

/// Tag for the custom Bid event.
pub const BID_TAG: u8 = u8::MAX - 6;

/// Tag for the custom Withdraw event.
pub const WITHDRAW_TAG: u8 = u8::MAX - 7;

/// Tag for the custom End event.
pub const END_TAG: u8 = u8::MAX - 8;
