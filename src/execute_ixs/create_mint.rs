use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_instruction,
};
use spl_token::{solana_program::program_pack::Pack, state::Mint};
use tracing::info;

use crate::error::Result;
use crate::execute_ixs::send_instructions;

/// System account allocation followed by mint initialization. The payer holds
/// both the mint and the freeze authority.
pub fn build_create_mint_instructions(
    payer: &Pubkey,
    mint: &Pubkey,
    rent_lamports: u64,
    decimals: u8,
) -> Result<Vec<Instruction>> {
    Ok(vec![
        system_instruction::create_account(
            payer,
            mint,
            rent_lamports,
            Mint::LEN as u64,
            &spl_token::id(),
        ),
        spl_token::instruction::initialize_mint2(
            &spl_token::id(),
            mint,
            payer,
            Some(payer),
            decimals,
        )?,
    ])
}

pub async fn create_mint(rpc_client: &RpcClient, payer: &Keypair, decimals: u8) -> Result<Pubkey> {
    let mint = Keypair::new();
    let rent_lamports = rpc_client
        .get_minimum_balance_for_rent_exemption(Mint::LEN)
        .await?;

    let instructions =
        build_create_mint_instructions(&payer.pubkey(), &mint.pubkey(), rent_lamports, decimals)?;
    let signature = send_instructions(rpc_client, payer, &[&mint], &instructions).await?;

    info!(mint = %mint.pubkey(), %signature, decimals, "Mint created");
    Ok(mint.pubkey())
}
