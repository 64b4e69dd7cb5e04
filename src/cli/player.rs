//! Player command implementation

use anyhow::Result;

use super::AppContext;

/// Show the player name, or change it when `name` is given
pub fn player_command(ctx: &AppContext, name: Option<String>) -> Result<()> {
    let manager = ctx.manager()?;
    match name {
        Some(name) => {
            let stored = manager.profile().set_name(&name);
            println!("Playing as {}", stored);
        }
        None => println!("{}", manager.profile().name()),
    }
    Ok(())
}
