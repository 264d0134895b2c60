use super::*;

/// Invoke the registry's `transfer` entrypoint to move the auctioned token.
pub fn transfer<S: HasStateApi>(
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    token: &Token,
    from: Address,
    to: Receiver,
) -> ContractResult<()> {
    let transfer = Transfer {
        token_id: token.id,
        amount: ContractTokenAmount::from(1),
        from,
        to,
        data: AdditionalData::empty(),
    };
    let parameter = TransferParams::from(vec![transfer]);
    host.invoke_contract(
        &token.contract,
        &parameter,
        EntrypointName::new_unchecked("transfer"),
        Amount::zero(),
    )?;
    Ok(())
}
