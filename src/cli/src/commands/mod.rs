//! CLI command definitions and dispatch.

mod flags;
mod render;
mod values;
mod version;

use std::path::Path;

use clap::{Parser, Subcommand};

use gvisor_ext_core::gvisor::RUNTIME_TYPE;
use gvisor_ext_core::{ContainerRuntime, ImageVector};

use crate::output::read_input;

/// Compile and render gVisor runtime installation charts.
#[derive(Parser)]
#[command(name = "gvisor-ext", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the installation chart values for a ContainerRuntime
    Values(values::ValuesArgs),
    /// Render the runtime class chart, or the installation chart for a ContainerRuntime
    Render(render::RenderArgs),
    /// Print the serialized runsc flags of a provider config
    Flags(flags::FlagsArgs),
    /// Show version information
    Version(version::VersionArgs),
}

/// Load a ContainerRuntime document from a file (`-` for stdin).
///
/// A `spec.type` other than `gvisor` is refused; an unset type is accepted.
pub(crate) fn load_runtime(path: &Path) -> Result<ContainerRuntime, Box<dyn std::error::Error>> {
    let document = read_input(path)?;
    let runtime = ContainerRuntime::from_yaml(&document)?;
    let runtime_type = runtime.spec.runtime_type.as_str();
    if !runtime_type.is_empty() && runtime_type != RUNTIME_TYPE {
        return Err(format!(
            "ContainerRuntime {} has type '{}', expected '{}'",
            runtime.metadata.name, runtime_type, RUNTIME_TYPE
        )
        .into());
    }
    Ok(runtime)
}

/// Image vector with the `IMAGEVECTOR_OVERWRITE` override applied.
pub(crate) fn load_images() -> Result<ImageVector, Box<dyn std::error::Error>> {
    Ok(ImageVector::load()?)
}

/// Dispatch a parsed CLI to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Values(args) => values::execute(args),
        Command::Render(args) => render::execute(args),
        Command::Flags(args) => flags::execute(args),
        Command::Version(args) => version::execute(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_values_command() {
        let cli =
            Cli::try_parse_from(["gvisor-ext", "values", "cr.yaml", "--output", "json"]).unwrap();
        assert!(matches!(cli.command, Command::Values(_)));
    }

    #[test]
    fn test_parse_render_without_runtime() {
        let cli =
            Cli::try_parse_from(["gvisor-ext", "render", "--chart-dir", "/charts"]).unwrap();
        assert!(matches!(cli.command, Command::Render(_)));
    }

    #[test]
    fn test_load_runtime_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cr.yaml");
        std::fs::write(
            &path,
            "spec:\n  binaryPath: /usr/bin\n  workerPool:\n    name: pool\n",
        )
        .unwrap();
        let cr = load_runtime(&path).unwrap();
        assert_eq!(cr.spec.worker_pool.name, "pool");
    }

    #[test]
    fn test_load_runtime_checks_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cr.yaml");

        std::fs::write(
            &path,
            "spec:\n  type: gvisor\n  binaryPath: /usr/bin\n  workerPool:\n    name: pool\n",
        )
        .unwrap();
        assert!(load_runtime(&path).is_ok());

        std::fs::write(
            &path,
            "metadata:\n  name: kata\nspec:\n  type: kata\n  binaryPath: /usr/bin\n  workerPool:\n    name: pool\n",
        )
        .unwrap();
        let err = load_runtime(&path).unwrap_err();
        assert!(err.to_string().contains("'kata'"));
    }

    #[test]
    fn test_output_format_from_env() {
        std::env::set_var("GVISOR_EXT_OUTPUT", "json");
        let cli = Cli::try_parse_from(["gvisor-ext", "values", "cr.yaml"]);
        std::env::remove_var("GVISOR_EXT_OUTPUT");
        match cli.unwrap().command {
            Command::Values(args) => assert_eq!(args.output, OutputFormat::Json),
            _ => panic!("expected values command"),
        }
    }
}
