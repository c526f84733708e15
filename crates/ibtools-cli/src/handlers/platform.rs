//! `platform` command handler.
//!
//! Prints the detected platform in `key = value` format together with the
//! per-utility override variables.

use anyhow::Result;
use ibtools_core::{PlatformType, UtilityType};

pub fn execute() -> Result<()> {
    print!("{}", render(PlatformType::current()));
    Ok(())
}

fn render(platform: PlatformType) -> String {
    let extension = match platform.executable_extension() {
        "" => "(none)",
        ext => ext,
    };
    let mut out = format!(
        "platform = {platform}\nexecutable_extension = {extension}\npath_separator = {}\n",
        platform.path_separator()
    );
    for utility in UtilityType::ALL {
        out.push_str(&format!(
            "{} = {}\n",
            utility.override_env_var(),
            utility.file_name(platform)
        ));
    }
    out
}
