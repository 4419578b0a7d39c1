use anyhow::Result;
use insightsetter::api::openapi;

fn main() -> Result<()> {
    println!("{}", openapi().to_pretty_json()?);
    Ok(())
}
