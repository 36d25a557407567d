use anyhow::anyhow;
use epay_protocol::derive_merchant_key;

use crate::MerchantKeyParams;

/// Resolves the forwarder secret from the command line, falling back to the environment.
pub fn fwd_secret(cli_secret: Option<String>) -> anyhow::Result<String> {
    cli_secret
        .or_else(|| std::env::var("EPF_FWD_SECRET").ok())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("No forwarder secret given. Pass --secret or set EPF_FWD_SECRET."))
}

pub fn print_merchant_key(params: &MerchantKeyParams) -> anyhow::Result<()> {
    let secret = fwd_secret(params.secret.clone())?;
    let key = derive_merchant_key(params.pid, &secret);
    println!("pid: {}", params.pid);
    println!("key: {key}");
    Ok(())
}
