use super::*;

/// Parameters for the `mint` entrypoint.
#[derive(Debug, Clone, Serialize, SchemaType)]
pub struct MintParams {
    /// Initial owner of the minted token.
    pub owner: Address,
    /// Id of the token to create.
    pub token_id: ContractTokenId,
}
