//! `gvisor-ext values` command.

use std::path::PathBuf;

use clap::Args;

use gvisor_ext_charts::installation_values;

use crate::output::{format_values, OutputFormat};

#[derive(Args)]
pub struct ValuesArgs {
    /// ContainerRuntime manifest (`-` for stdin)
    pub runtime: PathBuf,

    /// Output format
    #[arg(
        short,
        long,
        value_enum,
        env = "GVISOR_EXT_OUTPUT",
        default_value_t = OutputFormat::Yaml
    )]
    pub output: OutputFormat,
}

pub fn execute(args: ValuesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = super::load_runtime(&args.runtime)?;
    let images = super::load_images()?;
    let values = installation_values(&images, &runtime)?;
    print!("{}", format_values(&values, args.output)?);
    Ok(())
}
