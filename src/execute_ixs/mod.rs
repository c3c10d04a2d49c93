pub mod create_metadata;
pub mod create_mint;
pub mod mint_supply;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    instruction::Instruction,
    message::Message,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};

use crate::error::Result;

/// Signs `instructions` with the payer plus `extra_signers`, then sends and
/// confirms at the client's commitment.
pub async fn send_instructions(
    rpc_client: &RpcClient,
    payer: &Keypair,
    extra_signers: &[&Keypair],
    instructions: &[Instruction],
) -> Result<Signature> {
    let mut signers: Vec<&Keypair> = vec![payer];
    signers.extend_from_slice(extra_signers);

    let recent_blockhash = rpc_client.get_latest_blockhash().await?;
    let message = Message::new(instructions, Some(&payer.pubkey()));
    let mut transaction = Transaction::new_unsigned(message);
    transaction.try_sign(&signers[..], recent_blockhash)?;

    Ok(rpc_client.send_and_confirm_transaction(&transaction).await?)
}
