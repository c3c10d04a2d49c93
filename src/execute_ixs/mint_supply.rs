use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account_idempotent,
};
use tracing::info;

use crate::error::Result;
use crate::execute_ixs::send_instructions;

/// Creates the payer's associated token account if needed, then mints
/// `amount` base units into it.
pub fn build_mint_supply_instructions(
    payer: &Pubkey,
    mint: &Pubkey,
    amount: u64,
) -> Result<(Pubkey, Vec<Instruction>)> {
    let token_account = get_associated_token_address(payer, mint);
    let instructions = vec![
        create_associated_token_account_idempotent(payer, payer, mint, &spl_token::id()),
        spl_token::instruction::mint_to(
            &spl_token::id(),
            mint,
            &token_account,
            payer,
            &[],
            amount,
        )?,
    ];
    Ok((token_account, instructions))
}

pub async fn mint_initial_supply(
    rpc_client: &RpcClient,
    payer: &Keypair,
    mint: &Pubkey,
    amount: u64,
) -> Result<(Pubkey, Signature)> {
    let (token_account, instructions) =
        build_mint_supply_instructions(&payer.pubkey(), mint, amount)?;
    let signature = send_instructions(rpc_client, payer, &[], &instructions).await?;

    info!(%token_account, amount, %signature, "Initial supply minted");
    Ok((token_account, signature))
}
