use epay_protocol::ParamCarrier;

pub fn print_carrier(token: &str) -> anyhow::Result<()> {
    let carrier = ParamCarrier::decode(token)?;
    println!("pid:        {}", carrier.pid);
    println!("notify_url: {}", carrier.notify_url);
    println!("param:      {}", carrier.param);
    Ok(())
}
