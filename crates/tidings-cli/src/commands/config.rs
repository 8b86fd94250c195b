//! `tidings config`: show the resolved configuration.

use anyhow::Result;
use tidings_config::ResolvedConfig;

use crate::theme::Theme;

pub(crate) fn show(resolved: &ResolvedConfig, paths: bool) -> Result<()> {
    if paths {
        if resolved.loaded_files.is_empty() {
            println!("{}", Theme::dimmed("(embedded defaults only)"));
        }
        for file in &resolved.loaded_files {
            println!("{file}");
        }
        return Ok(());
    }

    println!("{}", Theme::header("Resolved configuration"));
    println!("{}", Theme::separator());
    print!("{}", resolved.to_toml()?);
    Ok(())
}
