use anyhow::Result;
use owo_colors::OwoColorize;

use cycledir_core::CycledirConfig;

use super::CliContext;
use crate::render::Render;

pub fn run(ctx: &CliContext) -> Result<()> {
    let config_path = CycledirConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", ctx.config.data_path().display());
    println!();
    println!("{}", "User".bold());
    println!("  {}", ctx.config.user);
    println!();
    println!("{}", "Default settings".bold());
    for line in ctx.config.default_settings.render().lines() {
        println!("  {}", line);
    }

    Ok(())
}
