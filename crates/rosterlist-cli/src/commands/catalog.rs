use super::Context;

pub fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = ctx.load_config()?.load_catalog()?;
    println!("{}", serde_json::to_string_pretty(&catalog)?);
    Ok(())
}
