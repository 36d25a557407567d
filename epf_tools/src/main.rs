use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;

mod carrier;
mod checkout;
mod keys;

#[derive(Parser, Debug)]
#[command(version = "0.1.0", about = "Operator toolbox for the epay forwarder")]
pub struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Derive the signing key that is handed out to a merchant
    #[clap(name = "key")]
    MerchantKey(MerchantKeyParams),
    /// Build a signed checkout submission, and optionally submit it to a running forwarder
    #[clap(name = "checkout")]
    Checkout(CheckoutParams),
    /// Decode a pass-through carrier token, e.g. from a notification log line
    #[clap(name = "carrier")]
    Carrier { token: String },
}

#[derive(Debug, Args)]
pub struct MerchantKeyParams {
    /// The merchant id to derive a key for
    #[arg(short = 'p', long = "pid")]
    pid: u64,
    /// The forwarder secret. Falls back to EPF_FWD_SECRET
    #[arg(short = 's', long = "secret")]
    secret: Option<String>,
}

#[derive(Debug, Args)]
pub struct CheckoutParams {
    /// The merchant id to sign as
    #[arg(short = 'p', long = "pid")]
    pid: u64,
    /// The forwarder secret. Falls back to EPF_FWD_SECRET
    #[arg(short = 's', long = "secret")]
    secret: Option<String>,
    /// The merchant order id. Defaults to a timestamped one
    #[arg(short = 'o', long = "order")]
    out_trade_no: Option<String>,
    /// The product name shown on the payment page
    #[arg(short = 'n', long = "name", default_value = "Test product")]
    name: String,
    /// The amount, as a decimal string
    #[arg(short = 'a', long = "amount", default_value = "0.01")]
    money: String,
    #[arg(long = "notify-url", default_value = "https://merchant.example/notify")]
    notify_url: String,
    #[arg(long = "return-url", default_value = "https://merchant.example/return")]
    return_url: String,
    /// An opaque business parameter to round-trip through the notification
    #[arg(long = "param", default_value = "")]
    param: String,
    /// Submit the signed form to a forwarder at this base URL instead of just printing it
    #[arg(long = "submit")]
    server: Option<String>,
    /// Target the production environment tag instead of sandbox
    #[arg(long = "prod")]
    prod: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();
    let args = Arguments::parse();
    match args.command {
        Command::MerchantKey(params) => keys::print_merchant_key(&params)?,
        Command::Checkout(params) => checkout::run_checkout(params).await?,
        Command::Carrier { token } => carrier::print_carrier(&token)?,
    }
    Ok(())
}
