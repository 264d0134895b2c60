use super::*;

/// Initialize the market, binding the auctioned token and recording the
/// seller. Custody of the token is not taken until `start`.
#[init(contract = "NFTMarket", parameter = "InitParams")]
fn contract_init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    let params: InitParams = ctx.parameter_cursor().get()?;
    let seller = params.seller.unwrap_or_else(|| ctx.init_origin());
    Ok(State::new(state_builder, seller, &params))
}

/// Start the auction.
///
/// Logs a `Start` event and pulls the token into the market's custody.
/// The seller must have added this contract as an operator on the registry
/// beforehand.
///
/// It rejects if:
/// - The sender is not the seller.
/// - The auction was already started.
/// - The deadline does not fit a timestamp.
/// - The registry rejects the custody transfer.
#[receive(contract = "NFTMarket", name = "start", mutable, enable_logger)]
fn contract_start<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let seller = host.state().seller;
    ensure!(
        ctx.sender().matches_account(&seller),
        ContractError::Unauthorized
    );

    let end_time = host.state_mut().start(ctx.metadata().slot_time())?;

    let token = host.state().token;
    logger.log(&MarketEvent::start(&token, &seller, end_time))?;

    // Custody moves from the seller to this contract.
    nft::transfer(
        host,
        &token,
        Address::Account(seller),
        Receiver::Contract(
            ctx.self_address(),
            OwnedEntrypointName::new_unchecked("onReceivingNFT".into()),
        ),
    )
}

/// CIS-2 receive hook. The market only accepts the token it was bound to,
/// sent by the bound registry contract.
#[receive(
    contract = "NFTMarket",
    name = "onReceivingNFT",
    parameter = "OnReceivingCis2Params<ContractTokenId, ContractTokenAmount>"
)]
fn contract_on_receiving_nft<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    let params: OnReceivingCis2Params<ContractTokenId, ContractTokenAmount> =
        ctx.parameter_cursor().get()?;

    let sender = match ctx.sender() {
        Address::Contract(sender) => sender,
        Address::Account(_) => bail!(CustomContractError::ContractOnly.into()),
    };

    let token = host.state().token;
    ensure!(
        sender == token.contract && params.token_id == token.id,
        CustomContractError::UnexpectedToken.into()
    );
    Ok(())
}

/// Place a bid. The attached amount is held in escrow until displaced,
/// withdrawn or settled.
///
/// Logs a `Bid` event.
///
/// It rejects if:
/// - The sender is a contract.
/// - The auction is not live: not started, already ended or past the
///   deadline.
/// - The amount does not clear the required threshold.
#[receive(
    contract = "NFTMarket",
    name = "bid",
    payable,
    mutable,
    enable_logger
)]
fn contract_bid<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let bidder = match ctx.sender() {
        Address::Account(bidder) => bidder,
        Address::Contract(_) => bail!(CustomContractError::OnlyAccountAddress.into()),
    };

    host.state_mut()
        .bid(bidder, amount, ctx.metadata().slot_time())?;

    logger.log(&MarketEvent::bid(&bidder, amount))?;

    Ok(())
}

/// Withdraw escrow left behind by a displaced bid. Pays zero when nothing
/// is owed, so repeated calls cannot recover a balance twice.
///
/// Logs a `Withdraw` event with the amount paid.
#[receive(contract = "NFTMarket", name = "withdraw", mutable, enable_logger)]
fn contract_withdraw<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let bidder = match ctx.sender() {
        Address::Account(bidder) => bidder,
        Address::Contract(_) => bail!(CustomContractError::OnlyAccountAddress.into()),
    };

    // The escrow entry is zeroed before the transfer goes out, so a
    // re-entering recipient observes an empty balance.
    let amount = host.state_mut().withdraw(&bidder);

    logger.log(&MarketEvent::withdraw(&bidder, amount))?;

    if amount > Amount::zero() {
        host.invoke_transfer(&bidder, amount)?;
    }

    Ok(())
}

/// End the auction and settle: token to the winner and proceeds to the
/// seller, or token back to the seller when no bids were placed.
///
/// Logs an `End` event.
///
/// It rejects if:
/// - The sender is not the seller.
/// - The auction was not started or was already ended.
/// - The deadline has not passed, under `ClosePolicy::AfterDeadline`.
#[receive(contract = "NFTMarket", name = "end", mutable, enable_logger)]
fn contract_end<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let seller = host.state().seller;
    ensure!(
        ctx.sender().matches_account(&seller),
        ContractError::Unauthorized
    );

    // The lifecycle flag flips before any outbound transfer.
    let outcome = host.state_mut().end(ctx.metadata().slot_time())?;

    let token = host.state().token;
    let custodian = Address::Contract(ctx.self_address());

    match outcome {
        AuctionResult::Winner { account, price } => {
            logger.log(&MarketEvent::end(Some(&account), price))?;
            nft::transfer(host, &token, custodian, Receiver::Account(account))?;
            host.invoke_transfer(&seller, price)?;
        }
        AuctionResult::NoBids => {
            logger.log(&MarketEvent::end(None, Amount::zero()))?;
            nft::transfer(host, &token, custodian, Receiver::Account(seller))?;
        }
    }

    Ok(())
}

/// Read-only snapshot of the auction.
#[receive(
    contract = "NFTMarket",
    name = "getAuctionInfo",
    return_value = "AuctionInfo"
)]
fn contract_get_auction_info<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<AuctionInfo> {
    Ok(host.state().info())
}

/// Whether the auction has been started.
#[receive(contract = "NFTMarket", name = "started", return_value = "bool")]
fn contract_started<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<bool> {
    Ok(host.state().started)
}

/// Whether the auction has been ended.
#[receive(contract = "NFTMarket", name = "ended", return_value = "bool")]
fn contract_ended<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<bool> {
    Ok(host.state().ended)
}

/// Escrow currently owed to an account.
#[receive(
    contract = "NFTMarket",
    name = "pendingReturn",
    parameter = "AccountAddress",
    return_value = "Amount"
)]
fn contract_pending_return<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Amount> {
    let account: AccountAddress = ctx.parameter_cursor().get()?;
    Ok(host.state().pending_return(&account))
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use commons::test::{parse_and_check_mock, parse_and_ok_mock};
    use core::fmt::Debug;
    use test_infrastructure::*;

    const SELLER: AccountAddress = AccountAddress([1u8; 32]);
    const BIDDER_1: AccountAddress = AccountAddress([2u8; 32]);
    const BIDDER_2: AccountAddress = AccountAddress([3u8; 32]);
    const REGISTRY: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };
    const SELF_ADDRESS: ContractAddress = ContractAddress {
        index: 7,
        subindex: 0,
    };
    const TOKEN_1: ContractTokenId = TokenIdU32(1);
    const WEEK_MILLIS: u64 = 7 * 24 * 60 * 60 * 1000;

    fn amount(micro_ccd: u64) -> Amount {
        Amount::from_micro_ccd(micro_ccd)
    }

    fn init_params(reserve_policy: ReservePolicy, close_policy: ClosePolicy) -> InitParams {
        InitParams {
            nft: REGISTRY,
            token_id: TOKEN_1,
            min_bid: amount(1),
            duration: Duration::from_days(7),
            seller: Some(SELLER),
            reserve_policy,
            close_policy,
        }
    }

    fn new_market(
        reserve_policy: ReservePolicy,
        close_policy: ClosePolicy,
    ) -> TestHost<State<TestStateApi>> {
        let params = init_params(reserve_policy, close_policy);
        let parameter_bytes = to_bytes(&params);
        let mut ctx = TestInitContext::empty();
        ctx.set_init_origin(SELLER);
        ctx.set_parameter(&parameter_bytes);
        let mut state_builder = TestStateBuilder::new();
        let state = contract_init(&ctx, &mut state_builder).expect_report("Init failed");
        TestHost::new(state, state_builder)
    }

    fn receive_ctx<'a>(sender: AccountAddress, slot_time_millis: u64) -> TestReceiveContext<'a> {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(sender));
        ctx.set_self_address(SELF_ADDRESS);
        ctx.set_metadata_slot_time(Timestamp::from_timestamp_millis(slot_time_millis));
        ctx
    }

    /// Accept any custody transfer sent to the registry.
    fn mock_registry_transfer(host: &mut TestHost<State<TestStateApi>>) {
        host.setup_mock_entrypoint(
            REGISTRY,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            parse_and_ok_mock::<TransferParameter, _>(()),
        );
    }

    fn start_auction(host: &mut TestHost<State<TestStateApi>>, logger: &mut TestLogger) {
        mock_registry_transfer(host);
        let ctx = receive_ctx(SELLER, 0);
        let result: ContractResult<()> = contract_start(&ctx, host, logger);
        result.expect_report("Start failed");
    }

    fn place_bid(
        host: &mut TestHost<State<TestStateApi>>,
        logger: &mut TestLogger,
        bidder: AccountAddress,
        micro_ccd: u64,
        slot_time_millis: u64,
    ) -> ContractResult<()> {
        let ctx = receive_ctx(bidder, slot_time_millis);
        contract_bid(&ctx, host, amount(micro_ccd), logger)
    }

    fn expect_error<T: Debug>(result: ContractResult<T>, err: ContractError, msg: &str) {
        let actual = result.expect_err_report(msg);
        claim_eq!(actual, err);
    }

    /// Initialization records the configuration and leaves the lifecycle
    /// flags unset.
    #[concordium_test]
    fn test_init() {
        let host = new_market(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        let state = host.state();

        claim_eq!(state.seller, SELLER, "Unexpected seller");
        claim_eq!(
            state.token,
            Token {
                contract: REGISTRY,
                id: TOKEN_1
            },
            "Unexpected token binding"
        );
        claim_eq!(state.min_bid, amount(1), "Unexpected minimum bid");
        claim!(!state.started, "Auction should not be started");
        claim!(!state.ended, "Auction should not be ended");
        claim_eq!(state.end_time, None, "No deadline before start");
        claim_eq!(state.highest_bidder, None, "No bidder at initialization");
        claim_eq!(state.highest_bid, Amount::zero(), "No bid at initialization");
    }

    /// The seller defaults to the account creating the instance.
    #[concordium_test]
    fn test_init_default_seller() {
        let mut params = init_params(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        params.seller = None;
        let parameter_bytes = to_bytes(&params);
        let mut ctx = TestInitContext::empty();
        ctx.set_init_origin(BIDDER_1);
        ctx.set_parameter(&parameter_bytes);
        let mut state_builder = TestStateBuilder::new();

        let state = contract_init(&ctx, &mut state_builder).expect_report("Init failed");
        claim_eq!(state.seller, BIDDER_1, "Seller should default to the origin");
    }

    /// `start` flips the flag, computes the deadline, logs a `Start` event
    /// and pulls the token from the seller into the market's custody.
    #[concordium_test]
    fn test_start() {
        let mut host = new_market(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        host.setup_mock_entrypoint(
            REGISTRY,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            parse_and_check_mock::<TransferParameter, _>(
                |params| {
                    let TransferParams(transfers) = params;
                    if transfers.len() != 1 {
                        return false;
                    }
                    let transfer = &transfers[0];
                    transfer.token_id == TOKEN_1
                        && transfer.from == Address::Account(SELLER)
                        && matches!(
                            &transfer.to,
                            Receiver::Contract(address, hook)
                                if *address == SELF_ADDRESS
                                    && hook.as_entrypoint_name()
                                        == EntrypointName::new_unchecked("onReceivingNFT")
                        )
                },
                (),
            ),
        );
        let mut logger = TestLogger::init();

        let ctx = receive_ctx(SELLER, 0);
        let result: ContractResult<()> = contract_start(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "Results in rejection");

        claim!(host.state().started, "Auction should be started");
        claim_eq!(
            host.state().end_time,
            Some(Timestamp::from_timestamp_millis(WEEK_MILLIS)),
            "Deadline should be start time plus duration"
        );

        let token = Token {
            contract: REGISTRY,
            id: TOKEN_1,
        };
        claim!(
            logger.logs.contains(&to_bytes(&MarketEvent::start(
                &token,
                &SELLER,
                Timestamp::from_timestamp_millis(WEEK_MILLIS)
            ))),
            "Expected a Start event"
        );
    }

    /// Only the seller may start the auction.
    #[concordium_test]
    fn test_start_unauthorized() {
        let mut host = new_market(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        mock_registry_transfer(&mut host);
        let mut logger = TestLogger::init();

        let ctx = receive_ctx(BIDDER_1, 0);
        let result: ContractResult<()> = contract_start(&ctx, &mut host, &mut logger);
        expect_error(
            result,
            ContractError::Unauthorized,
            "Start by a non-seller should fail",
        );
        claim!(!host.state().started, "Auction should not be started");
    }

    /// The auction can only be started once.
    #[concordium_test]
    fn test_start_twice() {
        let mut host = new_market(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        let mut logger = TestLogger::init();
        start_auction(&mut host, &mut logger);

        let ctx = receive_ctx(SELLER, 1);
        let result: ContractResult<()> = contract_start(&ctx, &mut host, &mut logger);
        expect_error(
            result,
            CustomContractError::AlreadyStarted.into(),
            "Starting a second time should fail",
        );
    }

    /// Bids before `start` are rejected regardless of value.
    #[concordium_test]
    fn test_bid_before_start() {
        let mut host = new_market(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        let mut logger = TestLogger::init();

        let result = place_bid(&mut host, &mut logger, BIDDER_1, 15, 0);
        expect_error(
            result,
            CustomContractError::AuctionNotActive.into(),
            "Bidding before start should fail",
        );
        claim_eq!(host.state().highest_bidder, None, "No bidder should be set");
        claim_eq!(
            host.state().highest_bid,
            Amount::zero(),
            "Highest bid should be unchanged"
        );
    }

    /// Bids at or past the deadline are rejected without mutation.
    #[concordium_test]
    fn test_bid_after_deadline() {
        let mut host = new_market(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        let mut logger = TestLogger::init();
        start_auction(&mut host, &mut logger);

        let result = place_bid(&mut host, &mut logger, BIDDER_1, 15, WEEK_MILLIS);
        expect_error(
            result,
            CustomContractError::AuctionNotActive.into(),
            "Bidding past the deadline should fail",
        );
        claim_eq!(host.state().highest_bidder, None, "No bidder should be set");
    }

    /// A sequence of valid bids keeps `highest_bid` strictly increasing and
    /// credits each displaced leader's escrow.
    #[concordium_test]
    fn test_bid_sequence() {
        let mut host = new_market(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        let mut logger = TestLogger::init();
        start_auction(&mut host, &mut logger);

        place_bid(&mut host, &mut logger, BIDDER_1, 15, 1).expect_report("First bid failed");
        claim_eq!(host.state().highest_bidder, Some(BIDDER_1), "Wrong leader");
        claim_eq!(host.state().highest_bid, amount(15), "Wrong highest bid");

        place_bid(&mut host, &mut logger, BIDDER_2, 20, 2).expect_report("Second bid failed");
        claim_eq!(host.state().highest_bidder, Some(BIDDER_2), "Wrong leader");
        claim_eq!(host.state().highest_bid, amount(20), "Wrong highest bid");
        claim_eq!(
            host.state().pending_return(&BIDDER_1),
            amount(15),
            "Displaced bid should be withdrawable"
        );

        // A leader raising their own bid frees the previous one.
        place_bid(&mut host, &mut logger, BIDDER_2, 25, 3).expect_report("Raise failed");
        claim_eq!(host.state().highest_bid, amount(25), "Wrong highest bid");
        claim_eq!(
            host.state().pending_return(&BIDDER_2),
            amount(20),
            "Raised-over bid should be withdrawable"
        );

        claim!(
            logger.logs.contains(&to_bytes(&MarketEvent::bid(&BIDDER_1, amount(15)))),
            "Expected a Bid event for bidder 1"
        );
        claim!(
            logger.logs.contains(&to_bytes(&MarketEvent::bid(&BIDDER_2, amount(20)))),
            "Expected a Bid event for bidder 2"
        );
    }

    /// Under the inclusive reserve, the opening bid may equal the minimum.
    #[concordium_test]
    fn test_first_bid_inclusive_reserve() {
        let mut host = new_market(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        let mut logger = TestLogger::init();
        start_auction(&mut host, &mut logger);

        let result = place_bid(&mut host, &mut logger, BIDDER_1, 0, 1);
        expect_error(
            result,
            CustomContractError::BidTooLow.into(),
            "Bidding below the minimum should fail",
        );

        place_bid(&mut host, &mut logger, BIDDER_1, 1, 2).expect_report("Opening bid failed");
        claim_eq!(host.state().highest_bid, amount(1), "Wrong highest bid");
    }

    /// Under the exclusive reserve, the opening bid must exceed the minimum.
    #[concordium_test]
    fn test_first_bid_exclusive_reserve() {
        let mut host = new_market(ReservePolicy::Exclusive, ClosePolicy::AfterDeadline);
        let mut logger = TestLogger::init();
        start_auction(&mut host, &mut logger);

        let result = place_bid(&mut host, &mut logger, BIDDER_1, 1, 1);
        expect_error(
            result,
            CustomContractError::BidTooLow.into(),
            "Bidding exactly the minimum should fail",
        );

        place_bid(&mut host, &mut logger, BIDDER_1, 2, 2).expect_report("Opening bid failed");
        claim_eq!(host.state().highest_bid, amount(2), "Wrong highest bid");
    }

    /// Bids that do not strictly exceed the current highest are rejected
    /// and leave the state untouched.
    #[concordium_test]
    fn test_bid_not_exceeding_highest() {
        let mut host = new_market(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        let mut logger = TestLogger::init();
        start_auction(&mut host, &mut logger);
        place_bid(&mut host, &mut logger, BIDDER_1, 20, 1).expect_report("Bid failed");

        let result = place_bid(&mut host, &mut logger, BIDDER_2, 5, 2);
        expect_error(
            result,
            CustomContractError::BidTooLow.into(),
            "A lower bid should fail",
        );

        let result = place_bid(&mut host, &mut logger, BIDDER_2, 20, 3);
        expect_error(
            result,
            CustomContractError::BidTooLow.into(),
            "An equal bid should fail",
        );

        claim_eq!(host.state().highest_bidder, Some(BIDDER_1), "Wrong leader");
        claim_eq!(host.state().highest_bid, amount(20), "Wrong highest bid");
        claim_eq!(
            host.state().pending_return(&BIDDER_2),
            Amount::zero(),
            "A rejected bid must not leave escrow behind"
        );
    }

    /// Contracts cannot bid.
    #[concordium_test]
    fn test_bid_from_contract() {
        let mut host = new_market(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        let mut logger = TestLogger::init();
        start_auction(&mut host, &mut logger);

        let mut ctx = receive_ctx(BIDDER_1, 1);
        ctx.set_sender(Address::Contract(REGISTRY));
        let result: ContractResult<()> = contract_bid(&ctx, &mut host, amount(15), &mut logger);
        expect_error(
            result,
            CustomContractError::OnlyAccountAddress.into(),
            "Contract bids should fail",
        );
    }

    /// A displaced bidder recovers exactly their displaced amount exactly
    /// once; a second withdrawal pays zero.
    #[concordium_test]
    fn test_withdraw_displaced() {
        let mut host = new_market(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        let mut logger = TestLogger::init();
        start_auction(&mut host, &mut logger);
        place_bid(&mut host, &mut logger, BIDDER_1, 15, 1).expect_report("Bid failed");
        place_bid(&mut host, &mut logger, BIDDER_2, 20, 2).expect_report("Bid failed");

        host.set_self_balance(amount(35));

        let ctx = receive_ctx(BIDDER_1, 3);
        let result: ContractResult<()> = contract_withdraw(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "Results in rejection");

        claim!(
            host.get_transfers().contains(&(BIDDER_1, amount(15))),
            "Displaced amount should be paid out"
        );
        claim!(
            logger.logs.contains(&to_bytes(&MarketEvent::withdraw(&BIDDER_1, amount(15)))),
            "Expected a Withdraw event"
        );

        // A second withdrawal pays zero and transfers nothing new.
        let result: ContractResult<()> = contract_withdraw(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "Results in rejection");
        claim_eq!(
            host.get_transfers()
                .iter()
                .filter(|(account, _)| *account == BIDDER_1)
                .count(),
            1,
            "The displaced amount must be paid exactly once"
        );
        claim!(
            logger.logs.contains(&to_bytes(&MarketEvent::withdraw(
                &BIDDER_1,
                Amount::zero()
            ))),
            "Expected a zero Withdraw event"
        );
    }

    /// Withdrawing without any escrow pays zero.
    #[concordium_test]
    fn test_withdraw_without_balance() {
        let mut host = new_market(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        let mut logger = TestLogger::init();

        let ctx = receive_ctx(BIDDER_1, 0);
        let result: ContractResult<()> = contract_withdraw(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "Results in rejection");
        claim!(host.get_transfers().is_empty(), "Nothing should be paid out");
    }

    /// Full lifecycle: start, two bids, a withdrawal and settlement. The
    /// token goes to the highest bidder and the proceeds to the seller.
    #[concordium_test]
    fn test_end_settles() {
        let mut host = new_market(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        let mut logger = TestLogger::init();
        start_auction(&mut host, &mut logger);
        place_bid(&mut host, &mut logger, BIDDER_1, 15, 1).expect_report("Bid failed");
        place_bid(&mut host, &mut logger, BIDDER_2, 20, 2).expect_report("Bid failed");

        host.set_self_balance(amount(35));
        let ctx = receive_ctx(BIDDER_1, 3);
        let result: ContractResult<()> = contract_withdraw(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "Withdraw results in rejection");

        // Settlement must hand the token to the winner.
        host.setup_mock_entrypoint(
            REGISTRY,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            parse_and_check_mock::<TransferParameter, _>(
                |params| {
                    let TransferParams(transfers) = params;
                    transfers.len() == 1
                        && transfers[0].token_id == TOKEN_1
                        && transfers[0].from == Address::Contract(SELF_ADDRESS)
                        && matches!(
                            &transfers[0].to,
                            Receiver::Account(account) if *account == BIDDER_2
                        )
                },
                (),
            ),
        );

        let ctx = receive_ctx(SELLER, WEEK_MILLIS);
        let result: ContractResult<()> = contract_end(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "End results in rejection");

        claim!(host.state().ended, "Auction should be ended");
        claim!(
            host.get_transfers().contains(&(SELLER, amount(20))),
            "Proceeds should go to the seller"
        );
        claim!(
            logger.logs.contains(&to_bytes(&MarketEvent::end(
                Some(&BIDDER_2),
                amount(20)
            ))),
            "Expected an End event"
        );
    }

    /// Only the seller may end the auction.
    #[concordium_test]
    fn test_end_unauthorized() {
        let mut host = new_market(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        let mut logger = TestLogger::init();
        start_auction(&mut host, &mut logger);

        let ctx = receive_ctx(BIDDER_1, WEEK_MILLIS);
        let result: ContractResult<()> = contract_end(&ctx, &mut host, &mut logger);
        expect_error(
            result,
            ContractError::Unauthorized,
            "End by a non-seller should fail",
        );
        claim!(!host.state().ended, "Auction should not be ended");
    }

    /// Ending before starting fails.
    #[concordium_test]
    fn test_end_not_started() {
        let mut host = new_market(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        let mut logger = TestLogger::init();

        let ctx = receive_ctx(SELLER, WEEK_MILLIS);
        let result: ContractResult<()> = contract_end(&ctx, &mut host, &mut logger);
        expect_error(
            result,
            CustomContractError::NotStarted.into(),
            "Ending an unstarted auction should fail",
        );
    }

    /// Under `AfterDeadline`, the seller cannot end before the deadline.
    #[concordium_test]
    fn test_end_too_early() {
        let mut host = new_market(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        let mut logger = TestLogger::init();
        start_auction(&mut host, &mut logger);

        let ctx = receive_ctx(SELLER, WEEK_MILLIS - 1);
        let result: ContractResult<()> = contract_end(&ctx, &mut host, &mut logger);
        expect_error(
            result,
            CustomContractError::TooEarly.into(),
            "Ending before the deadline should fail",
        );
        claim!(!host.state().ended, "Auction should not be ended");
    }

    /// Under `SellerDiscretion`, the seller may end at any time after start.
    #[concordium_test]
    fn test_end_seller_discretion() {
        let mut host = new_market(ReservePolicy::Inclusive, ClosePolicy::SellerDiscretion);
        let mut logger = TestLogger::init();
        start_auction(&mut host, &mut logger);
        place_bid(&mut host, &mut logger, BIDDER_1, 15, 1).expect_report("Bid failed");

        host.set_self_balance(amount(15));
        mock_registry_transfer(&mut host);
        let ctx = receive_ctx(SELLER, 2);
        let result: ContractResult<()> = contract_end(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "End results in rejection");
        claim!(host.state().ended, "Auction should be ended");
        claim!(
            host.get_transfers().contains(&(SELLER, amount(15))),
            "Proceeds should go to the seller"
        );
    }

    /// The auction can only be ended once.
    #[concordium_test]
    fn test_end_twice() {
        let mut host = new_market(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        let mut logger = TestLogger::init();
        start_auction(&mut host, &mut logger);

        let ctx = receive_ctx(SELLER, WEEK_MILLIS);
        let result: ContractResult<()> = contract_end(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "End results in rejection");

        let result: ContractResult<()> = contract_end(&ctx, &mut host, &mut logger);
        expect_error(
            result,
            CustomContractError::AlreadyEnded.into(),
            "Ending a second time should fail",
        );
    }

    /// With no bids, the token returns to the seller and no funds move.
    #[concordium_test]
    fn test_end_no_bids() {
        let mut host = new_market(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        let mut logger = TestLogger::init();
        start_auction(&mut host, &mut logger);

        host.setup_mock_entrypoint(
            REGISTRY,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            parse_and_check_mock::<TransferParameter, _>(
                |params| {
                    let TransferParams(transfers) = params;
                    transfers.len() == 1
                        && matches!(
                            &transfers[0].to,
                            Receiver::Account(account) if *account == SELLER
                        )
                },
                (),
            ),
        );

        let ctx = receive_ctx(SELLER, WEEK_MILLIS);
        let result: ContractResult<()> = contract_end(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "End results in rejection");

        claim!(host.get_transfers().is_empty(), "No funds should move");
        claim!(
            logger.logs.contains(&to_bytes(&MarketEvent::end(None, Amount::zero()))),
            "Expected an End event without a winner"
        );
    }

    /// The receive hook accepts only the bound token from the bound
    /// registry.
    #[concordium_test]
    fn test_on_receiving_nft() {
        let host = new_market(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        let hook_params = OnReceivingCis2Params::<ContractTokenId, ContractTokenAmount> {
            token_id: TOKEN_1,
            amount: ContractTokenAmount::from(1),
            from: Address::Account(SELLER),
            data: AdditionalData::empty(),
        };
        let parameter_bytes = to_bytes(&hook_params);

        let mut ctx = receive_ctx(SELLER, 0);
        ctx.set_sender(Address::Contract(REGISTRY));
        ctx.set_parameter(&parameter_bytes);
        let result = contract_on_receiving_nft(&ctx, &host);
        claim!(result.is_ok(), "The bound token should be accepted");

        // An account sender is rejected.
        let mut ctx = receive_ctx(SELLER, 0);
        ctx.set_parameter(&parameter_bytes);
        expect_error(
            contract_on_receiving_nft(&ctx, &host),
            CustomContractError::ContractOnly.into(),
            "Accounts cannot invoke the hook",
        );

        // A foreign registry is rejected.
        let mut ctx = receive_ctx(SELLER, 0);
        ctx.set_sender(Address::Contract(SELF_ADDRESS));
        ctx.set_parameter(&parameter_bytes);
        expect_error(
            contract_on_receiving_nft(&ctx, &host),
            CustomContractError::UnexpectedToken.into(),
            "A foreign registry should be rejected",
        );

        // A foreign token id is rejected.
        let hook_params = OnReceivingCis2Params::<ContractTokenId, ContractTokenAmount> {
            token_id: TokenIdU32(2),
            amount: ContractTokenAmount::from(1),
            from: Address::Account(SELLER),
            data: AdditionalData::empty(),
        };
        let parameter_bytes = to_bytes(&hook_params);
        let mut ctx = receive_ctx(SELLER, 0);
        ctx.set_sender(Address::Contract(REGISTRY));
        ctx.set_parameter(&parameter_bytes);
        expect_error(
            contract_on_receiving_nft(&ctx, &host),
            CustomContractError::UnexpectedToken.into(),
            "A foreign token should be rejected",
        );
    }

    /// The info view mirrors the auction state.
    #[concordium_test]
    fn test_get_auction_info() {
        let mut host = new_market(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        let mut logger = TestLogger::init();

        let ctx = receive_ctx(SELLER, 0);
        let info = contract_get_auction_info(&ctx, &host).expect_report("View failed");
        claim_eq!(info.seller, SELLER, "Unexpected seller");
        claim!(!info.started && !info.ended, "Lifecycle flags should be unset");

        start_auction(&mut host, &mut logger);
        place_bid(&mut host, &mut logger, BIDDER_1, 15, 1).expect_report("Bid failed");

        let info = contract_get_auction_info(&ctx, &host).expect_report("View failed");
        claim!(info.started, "Auction should be started");
        claim_eq!(info.highest_bid, amount(15), "Unexpected highest bid");
        claim_eq!(info.highest_bidder, Some(BIDDER_1), "Unexpected leader");
        claim_eq!(
            info.end_time,
            Some(Timestamp::from_timestamp_millis(WEEK_MILLIS)),
            "Unexpected deadline"
        );
    }

    /// The boolean and escrow views report the underlying state.
    #[concordium_test]
    fn test_flag_and_escrow_views() {
        let mut host = new_market(ReservePolicy::Inclusive, ClosePolicy::SellerDiscretion);
        let mut logger = TestLogger::init();

        let ctx = receive_ctx(SELLER, 0);
        claim!(
            !contract_started(&ctx, &host).expect_report("View failed"),
            "Auction should not be started"
        );

        start_auction(&mut host, &mut logger);
        place_bid(&mut host, &mut logger, BIDDER_1, 15, 1).expect_report("Bid failed");
        place_bid(&mut host, &mut logger, BIDDER_2, 20, 2).expect_report("Bid failed");

        claim!(
            contract_started(&ctx, &host).expect_report("View failed"),
            "Auction should be started"
        );
        claim!(
            !contract_ended(&ctx, &host).expect_report("View failed"),
            "Auction should not be ended"
        );

        let parameter_bytes = to_bytes(&BIDDER_1);
        let mut query_ctx = receive_ctx(SELLER, 3);
        query_ctx.set_parameter(&parameter_bytes);
        claim_eq!(
            contract_pending_return(&query_ctx, &host).expect_report("View failed"),
            amount(15),
            "Unexpected escrow balance"
        );

        mock_registry_transfer(&mut host);
        host.set_self_balance(amount(35));
        let end_ctx = receive_ctx(SELLER, 4);
        let result: ContractResult<()> = contract_end(&end_ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "End results in rejection");
        claim!(
            contract_ended(&ctx, &host).expect_report("View failed"),
            "Auction should be ended"
        );
    }

    /// Starting fails when the deadline does not fit a timestamp.
    #[concordium_test]
    fn test_start_overflowing_deadline() {
        let mut host = new_market(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        let mut logger = TestLogger::init();

        let ctx = receive_ctx(SELLER, u64::MAX);
        let result: ContractResult<()> = contract_start(&ctx, &mut host, &mut logger);
        expect_error(
            result,
            CustomContractError::InvalidDuration.into(),
            "An overflowing deadline should fail",
        );
        claim!(!host.state().started, "Auction should not be started");
        claim_eq!(host.state().end_time, None, "No deadline should be set");
    }

    /// The escrow entry is zeroed before the payout goes out: when the
    /// transfer itself fails, the entry is already gone.
    #[concordium_test]
    fn test_withdraw_clears_escrow_before_payout() {
        let mut host = new_market(ReservePolicy::Inclusive, ClosePolicy::AfterDeadline);
        let mut logger = TestLogger::init();
        start_auction(&mut host, &mut logger);
        place_bid(&mut host, &mut logger, BIDDER_1, 15, 1).expect_report("Bid failed");
        place_bid(&mut host, &mut logger, BIDDER_2, 20, 2).expect_report("Bid failed");

        host.set_self_balance(Amount::zero());

        let ctx = receive_ctx(BIDDER_1, 3);
        let result: ContractResult<()> = contract_withdraw(&ctx, &mut host, &mut logger);
        expect_error(
            result,
            CustomContractError::InvokeTransferError.into(),
            "The payout should fail on an empty balance",
        );
        claim_eq!(
            host.state().pending_return(&BIDDER_1),
            Amount::zero(),
            "The escrow entry must be zeroed ahead of the payout"
        );
    }
}
