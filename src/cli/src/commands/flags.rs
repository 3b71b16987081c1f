//! `gvisor-ext flags` command.

use std::path::PathBuf;

use clap::Args;

use gvisor_ext_charts::serialize_config_flags;
use gvisor_ext_core::GVisorConfiguration;

use crate::output::read_input;

#[derive(Args)]
pub struct FlagsArgs {
    /// GVisorConfiguration document (`-` for stdin)
    pub provider_config: PathBuf,
}

pub fn execute(args: FlagsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_input(&args.provider_config)?;
    let config = GVisorConfiguration::decode(raw.as_bytes())?;
    print!("{}", serialize_config_flags(&config.config_flags));
    Ok(())
}
