use super::*;

/// Initialize the registry with no tokens.
#[init(contract = "MyNFT")]
fn contract_init<S: HasStateApi>(
    _ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    Ok(State::empty(state_builder))
}

/// Mint a new token with a given address as owner.
///
/// Logs a `Mint` event.
///
/// It rejects if:
/// - The sender is not the contract instance owner.
/// - It fails to parse the parameter.
/// - The token ID already exists.
#[receive(
    contract = "MyNFT",
    name = "mint",
    parameter = "MintParams",
    mutable,
    enable_logger
)]
fn contract_mint<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: MintParams = ctx.parameter_cursor().get()?;

    // Only the instance owner may mint.
    ensure!(
        ctx.sender().matches_account(&ctx.owner()),
        ContractError::Unauthorized
    );

    host.state_mut().mint(params.token_id, params.owner)?;

    logger.log(&Cis2Event::<ContractTokenId, ContractTokenAmount>::Mint(
        MintEvent {
            token_id: params.token_id,
            amount: 1.into(),
            owner: params.owner,
        },
    ))?;

    Ok(())
}

/// Execute a list of token transfers, in the order of the list.
///
/// Logs a `Transfer` event for each transfer and invokes the receive hook
/// of every contract receiver.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the transfers fails to be executed, which could be if:
///     - The `token_id` does not exist.
///     - The sender is neither the owner nor an operator of the owner.
///     - The token is not held by `from`.
/// - It fails to log an event.
/// - A contract receiver rejects the receive hook invocation.
#[receive(
    contract = "MyNFT",
    name = "transfer",
    parameter = "TransferParameter",
    mutable,
    enable_logger
)]
fn contract_transfer<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let TransferParams(transfers): TransferParameter = ctx.parameter_cursor().get()?;
    let sender = ctx.sender();

    for Transfer {
        token_id,
        amount,
        from,
        to,
        data,
    } in transfers
    {
        let state = host.state_mut();
        // Authenticate the sender for this transfer.
        ensure!(
            from == sender || state.is_operator(&sender, &from),
            ContractError::Unauthorized
        );

        let to_address = to.address();
        state.transfer(&token_id, amount, &from, &to_address)?;

        logger.log(&Cis2Event::Transfer(TransferEvent {
            token_id,
            amount,
            from,
            to: to_address,
        }))?;

        // Contract receivers are notified through their CIS-2 receive hook.
        if let Receiver::Contract(address, function) = to {
            let parameter = OnReceivingCis2Params {
                token_id,
                amount,
                from,
                data,
            };
            host.invoke_contract(
                &address,
                &parameter,
                function.as_entrypoint_name(),
                Amount::zero(),
            )?;
        }
    }

    Ok(())
}

/// Add or remove operators of the sender.
///
/// Logs an `UpdateOperator` event for each update.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - It fails to log an event.
#[receive(
    contract = "MyNFT",
    name = "updateOperator",
    parameter = "UpdateOperatorParams",
    mutable,
    enable_logger
)]
fn contract_update_operator<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let UpdateOperatorParams(params) = ctx.parameter_cursor().get()?;
    let sender = ctx.sender();

    for param in params {
        let (state, state_builder) = host.state_and_builder();
        match param.update {
            OperatorUpdate::Add => state.add_operator(&sender, &param.operator, state_builder),
            OperatorUpdate::Remove => state.remove_operator(&sender, &param.operator),
        }

        logger.log(
            &Cis2Event::<ContractTokenId, ContractTokenAmount>::UpdateOperator(
                UpdateOperatorEvent {
                    owner: sender,
                    operator: param.operator,
                    update: param.update,
                },
            ),
        )?;
    }

    Ok(())
}

/// Return the current owner of a token. Fails with `InvalidTokenId` for
/// tokens that were never minted.
#[receive(
    contract = "MyNFT",
    name = "ownerOf",
    parameter = "ContractTokenId",
    return_value = "Address"
)]
fn contract_owner_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Address> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;
    host.state().owner_of(&token_id)
}

/// CIS-2 `balanceOf` query.
#[receive(
    contract = "MyNFT",
    name = "balanceOf",
    parameter = "ContractBalanceOfQueryParams",
    return_value = "ContractBalanceOfQueryResponse"
)]
fn contract_balance_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ContractBalanceOfQueryResponse> {
    let params: ContractBalanceOfQueryParams = ctx.parameter_cursor().get()?;
    let mut response = Vec::with_capacity(params.queries.len());
    for query in params.queries {
        let amount = host.state().balance(&query.token_id, &query.address)?;
        response.push(amount);
    }
    Ok(ContractBalanceOfQueryResponse::from(response))
}

/// CIS-2 `operatorOf` query.
#[receive(
    contract = "MyNFT",
    name = "operatorOf",
    parameter = "OperatorOfQueryParams",
    return_value = "OperatorOfQueryResponse"
)]
fn contract_operator_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<OperatorOfQueryResponse> {
    let params: OperatorOfQueryParams = ctx.parameter_cursor().get()?;
    let mut response = Vec::with_capacity(params.queries.len());
    for query in params.queries {
        response.push(host.state().is_operator(&query.address, &query.owner));
    }
    Ok(OperatorOfQueryResponse::from(response))
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use commons::test::parse_and_ok_mock;
    use test_infrastructure::*;

    const ACCOUNT_0: AccountAddress = AccountAddress([0u8; 32]);
    const ADDRESS_0: Address = Address::Account(ACCOUNT_0);
    const ACCOUNT_1: AccountAddress = AccountAddress([1u8; 32]);
    const ADDRESS_1: Address = Address::Account(ACCOUNT_1);
    const MARKET: ContractAddress = ContractAddress {
        index: 5,
        subindex: 0,
    };

    const TOKEN_1: ContractTokenId = TokenIdU32(1);
    const TOKEN_2: ContractTokenId = TokenIdU32(2);

    /// A registry holding token 1, owned by account 0.
    fn initial_state<S: HasStateApi>(state_builder: &mut StateBuilder<S>) -> State<S> {
        let mut state = State::empty(state_builder);
        state
            .mint(TOKEN_1, ADDRESS_0)
            .expect_report("Failed to mint token 1");
        state
    }

    fn mint_ctx<'a>(sender: Address) -> TestReceiveContext<'a> {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(sender);
        ctx.set_owner(ACCOUNT_0);
        ctx
    }

    /// Test initialization succeeds and the registry is empty.
    #[concordium_test]
    fn test_init() {
        let ctx = TestInitContext::empty();
        let mut builder = TestStateBuilder::new();

        let result = contract_init(&ctx, &mut builder);
        let state = result.expect_report("Contract initialization failed");

        claim_eq!(
            state.tokens.iter().count(),
            0,
            "No token should be minted at initialization"
        );
    }

    /// Test minting: the token ends up owned by the given address and a
    /// `Mint` event is logged.
    #[concordium_test]
    fn test_mint() {
        let mut ctx = mint_ctx(ADDRESS_0);
        let mint_data = MintParams {
            owner: ADDRESS_1,
            token_id: TOKEN_2,
        };
        let parameter_bytes = to_bytes(&mint_data);
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = State::empty(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result: ContractResult<()> = contract_mint(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "Results in rejection");

        let owner = host
            .state()
            .owner_of(&TOKEN_2)
            .expect_report("Token is expected to exist");
        claim_eq!(owner, ADDRESS_1, "Token should be owned by address 1");

        claim!(
            logger.logs.contains(&to_bytes(&Cis2Event::<
                ContractTokenId,
                ContractTokenAmount,
            >::Mint(MintEvent {
                owner: ADDRESS_1,
                token_id: TOKEN_2,
                amount: 1.into(),
            }))),
            "Expected an event for minting token 2"
        );
    }

    /// Minting an existing token id fails and keeps the original owner.
    #[concordium_test]
    fn test_mint_duplicate_id() {
        let mut ctx = mint_ctx(ADDRESS_0);
        let mint_data = MintParams {
            owner: ADDRESS_1,
            token_id: TOKEN_1,
        };
        let parameter_bytes = to_bytes(&mint_data);
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result: ContractResult<()> = contract_mint(&ctx, &mut host, &mut logger);
        let err = result.expect_err_report("Expected to fail");
        claim_eq!(
            err,
            CustomContractError::TokenIdAlreadyExists.into(),
            "Error is expected to be TokenIdAlreadyExists"
        );

        let owner = host
            .state()
            .owner_of(&TOKEN_1)
            .expect_report("Token is expected to exist");
        claim_eq!(owner, ADDRESS_0, "Owner should be unchanged");
    }

    /// Only the contract instance owner may mint.
    #[concordium_test]
    fn test_mint_unauthorized() {
        let mut ctx = mint_ctx(ADDRESS_1);
        let mint_data = MintParams {
            owner: ADDRESS_1,
            token_id: TOKEN_2,
        };
        let parameter_bytes = to_bytes(&mint_data);
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = State::empty(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result: ContractResult<()> = contract_mint(&ctx, &mut host, &mut logger);
        let err = result.expect_err_report("Expected to fail");
        claim_eq!(
            err,
            ContractError::Unauthorized,
            "Error is expected to be Unauthorized"
        );
    }

    /// Transfer succeeds when `from` is the sender and updates ownership.
    #[concordium_test]
    fn test_transfer_account() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_0);

        let transfer = Transfer {
            token_id: TOKEN_1,
            amount: ContractTokenAmount::from(1),
            from: ADDRESS_0,
            to: Receiver::from_account(ACCOUNT_1),
            data: AdditionalData::empty(),
        };
        let parameter = TransferParams::from(vec![transfer]);
        let parameter_bytes = to_bytes(&parameter);
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result: ContractResult<()> = contract_transfer(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "Results in rejection");

        let owner = host
            .state()
            .owner_of(&TOKEN_1)
            .expect_report("Token is expected to exist");
        claim_eq!(owner, ADDRESS_1, "Token should have moved to address 1");

        claim_eq!(logger.logs.len(), 1, "Only one event should be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(&Cis2Event::Transfer(TransferEvent {
                from: ADDRESS_0,
                to: ADDRESS_1,
                token_id: TOKEN_1,
                amount: ContractTokenAmount::from(1),
            })),
            "Incorrect event emitted"
        );
    }

    /// Transfer fails when the sender is neither the owner nor an operator.
    #[concordium_test]
    fn test_transfer_not_authorized() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_1);

        let transfer = Transfer {
            token_id: TOKEN_1,
            amount: ContractTokenAmount::from(1),
            from: ADDRESS_0,
            to: Receiver::from_account(ACCOUNT_1),
            data: AdditionalData::empty(),
        };
        let parameter = TransferParams::from(vec![transfer]);
        let parameter_bytes = to_bytes(&parameter);
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result: ContractResult<()> = contract_transfer(&ctx, &mut host, &mut logger);
        let err = result.expect_err_report("Expected to fail");
        claim_eq!(
            err,
            ContractError::Unauthorized,
            "Error is expected to be Unauthorized"
        );

        let owner = host
            .state()
            .owner_of(&TOKEN_1)
            .expect_report("Token is expected to exist");
        claim_eq!(owner, ADDRESS_0, "Owner should be unchanged");
    }

    /// Transfer succeeds when the sender is an operator of the owner.
    #[concordium_test]
    fn test_operator_transfer() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_1);

        let transfer = Transfer {
            token_id: TOKEN_1,
            amount: ContractTokenAmount::from(1),
            from: ADDRESS_0,
            to: Receiver::from_account(ACCOUNT_1),
            data: AdditionalData::empty(),
        };
        let parameter = TransferParams::from(vec![transfer]);
        let parameter_bytes = to_bytes(&parameter);
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let mut state = initial_state(&mut state_builder);
        state.add_operator(&ADDRESS_0, &ADDRESS_1, &mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result: ContractResult<()> = contract_transfer(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "Results in rejection");

        let owner = host
            .state()
            .owner_of(&TOKEN_1)
            .expect_report("Token is expected to exist");
        claim_eq!(owner, ADDRESS_1, "Token should have moved to address 1");
    }

    /// A transfer to a contract receiver invokes its receive hook.
    #[concordium_test]
    fn test_transfer_to_contract_invokes_hook() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_0);

        let transfer = Transfer {
            token_id: TOKEN_1,
            amount: ContractTokenAmount::from(1),
            from: ADDRESS_0,
            to: Receiver::Contract(
                MARKET,
                OwnedEntrypointName::new_unchecked("onReceivingNFT".into()),
            ),
            data: AdditionalData::empty(),
        };
        let parameter = TransferParams::from(vec![transfer]);
        let parameter_bytes = to_bytes(&parameter);
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);
        host.setup_mock_entrypoint(
            MARKET,
            OwnedEntrypointName::new_unchecked("onReceivingNFT".into()),
            parse_and_ok_mock::<OnReceivingCis2Params<ContractTokenId, ContractTokenAmount>, _>(()),
        );

        let result: ContractResult<()> = contract_transfer(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "Results in rejection");

        let owner = host
            .state()
            .owner_of(&TOKEN_1)
            .expect_report("Token is expected to exist");
        claim_eq!(owner, Address::Contract(MARKET), "Token should be in custody");
    }

    /// Adding and removing an operator is reflected in the state and logs.
    #[concordium_test]
    fn test_update_operator() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_0);

        let update = UpdateOperator {
            update: OperatorUpdate::Add,
            operator: ADDRESS_1,
        };
        let parameter = UpdateOperatorParams(vec![update]);
        let parameter_bytes = to_bytes(&parameter);
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = State::empty(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result: ContractResult<()> = contract_update_operator(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "Results in rejection");
        claim!(
            host.state().is_operator(&ADDRESS_1, &ADDRESS_0),
            "Address 1 should be an operator of address 0"
        );

        claim!(
            logger.logs.contains(&to_bytes(&Cis2Event::<
                ContractTokenId,
                ContractTokenAmount,
            >::UpdateOperator(
                UpdateOperatorEvent {
                    owner: ADDRESS_0,
                    operator: ADDRESS_1,
                    update: OperatorUpdate::Add,
                }
            ))),
            "Expected an operator update event"
        );

        // Removing it again.
        let update = UpdateOperator {
            update: OperatorUpdate::Remove,
            operator: ADDRESS_1,
        };
        let parameter = UpdateOperatorParams(vec![update]);
        let parameter_bytes = to_bytes(&parameter);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_0);
        ctx.set_parameter(&parameter_bytes);

        let result: ContractResult<()> = contract_update_operator(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "Results in rejection");
        claim!(
            !host.state().is_operator(&ADDRESS_1, &ADDRESS_0),
            "Address 1 should no longer be an operator of address 0"
        );
    }

    /// `ownerOf` reports the current owner and rejects unknown ids.
    #[concordium_test]
    fn test_owner_of() {
        let mut ctx = TestReceiveContext::empty();
        let parameter_bytes = to_bytes(&TOKEN_1);
        ctx.set_parameter(&parameter_bytes);

        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let host = TestHost::new(state, state_builder);

        let result = contract_owner_of(&ctx, &host);
        claim_eq!(
            result.expect_report("Query failed"),
            ADDRESS_0,
            "Token 1 should be owned by address 0"
        );

        let parameter_bytes = to_bytes(&TOKEN_2);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&parameter_bytes);
        let err = contract_owner_of(&ctx, &host).expect_err_report("Expected to fail");
        claim_eq!(
            err,
            ContractError::InvalidTokenId,
            "Error is expected to be InvalidTokenId"
        );
    }

    /// Transfer fails when `from` does not hold the token, even for an
    /// authorized operator of `from`.
    #[concordium_test]
    fn test_transfer_from_non_holder() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_0);

        // Token 1 is owned by address 0, but the transfer names address 1
        // as the holder.
        let transfer = Transfer {
            token_id: TOKEN_1,
            amount: ContractTokenAmount::from(1),
            from: ADDRESS_1,
            to: Receiver::from_account(ACCOUNT_0),
            data: AdditionalData::empty(),
        };
        let parameter = TransferParams::from(vec![transfer]);
        let parameter_bytes = to_bytes(&parameter);
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let mut state = initial_state(&mut state_builder);
        state.add_operator(&ADDRESS_1, &ADDRESS_0, &mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result: ContractResult<()> = contract_transfer(&ctx, &mut host, &mut logger);
        let err = result.expect_err_report("Expected to fail");
        claim_eq!(
            err,
            ContractError::InsufficientFunds,
            "Error is expected to be InsufficientFunds"
        );

        let owner = host
            .state()
            .owner_of(&TOKEN_1)
            .expect_report("Token is expected to exist");
        claim_eq!(owner, ADDRESS_0, "Owner should be unchanged");
    }

    /// A zero-amount transfer of an existing token succeeds without moving
    /// it, even when `from` is not the holder.
    #[concordium_test]
    fn test_transfer_zero_amount() {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(ADDRESS_1);

        let transfer = Transfer {
            token_id: TOKEN_1,
            amount: ContractTokenAmount::from(0),
            from: ADDRESS_1,
            to: Receiver::from_account(ACCOUNT_0),
            data: AdditionalData::empty(),
        };
        let parameter = TransferParams::from(vec![transfer]);
        let parameter_bytes = to_bytes(&parameter);
        ctx.set_parameter(&parameter_bytes);

        let mut logger = TestLogger::init();
        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let mut host = TestHost::new(state, state_builder);

        let result: ContractResult<()> = contract_transfer(&ctx, &mut host, &mut logger);
        claim!(result.is_ok(), "Results in rejection");

        let owner = host
            .state()
            .owner_of(&TOKEN_1)
            .expect_report("Token is expected to exist");
        claim_eq!(owner, ADDRESS_0, "Owner should be unchanged");
    }

    /// `balanceOf` reports 1 for the holder, 0 for anyone else and rejects
    /// unknown ids.
    #[concordium_test]
    fn test_balance_of() {
        let queries = vec![
            BalanceOfQuery {
                token_id: TOKEN_1,
                address: ADDRESS_0,
            },
            BalanceOfQuery {
                token_id: TOKEN_1,
                address: ADDRESS_1,
            },
        ];
        let parameter = ContractBalanceOfQueryParams { queries };
        let parameter_bytes = to_bytes(&parameter);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&parameter_bytes);

        let mut state_builder = TestStateBuilder::new();
        let state = initial_state(&mut state_builder);
        let host = TestHost::new(state, state_builder);

        let response = contract_balance_of(&ctx, &host).expect_report("Query failed");
        claim_eq!(
            response.0,
            vec![ContractTokenAmount::from(1), ContractTokenAmount::from(0)],
            "Only the holder should have balance 1"
        );

        // Unknown token ids are rejected, not reported as balance 0.
        let parameter = ContractBalanceOfQueryParams {
            queries: vec![BalanceOfQuery {
                token_id: TOKEN_2,
                address: ADDRESS_0,
            }],
        };
        let parameter_bytes = to_bytes(&parameter);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&parameter_bytes);
        let err = contract_balance_of(&ctx, &host).expect_err_report("Expected to fail");
        claim_eq!(
            err,
            ContractError::InvalidTokenId,
            "Error is expected to be InvalidTokenId"
        );
    }

    /// `operatorOf` reflects the operator set per owner.
    #[concordium_test]
    fn test_operator_of() {
        let queries = vec![
            OperatorOfQuery {
                owner: ADDRESS_0,
                address: ADDRESS_1,
            },
            OperatorOfQuery {
                owner: ADDRESS_1,
                address: ADDRESS_0,
            },
        ];
        let parameter = OperatorOfQueryParams { queries };
        let parameter_bytes = to_bytes(&parameter);
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(&parameter_bytes);

        let mut state_builder = TestStateBuilder::new();
        let mut state = State::empty(&mut state_builder);
        state.add_operator(&ADDRESS_0, &ADDRESS_1, &mut state_builder);
        let host = TestHost::new(state, state_builder);

        let response = contract_operator_of(&ctx, &host).expect_report("Query failed");
        claim_eq!(
            response.0,
            vec![true, false],
            "Only address 1 should be an operator of address 0"
        );
    }
}
