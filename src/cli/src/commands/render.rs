//! `gvisor-ext render` command.

use std::path::PathBuf;

use clap::Args;

use gvisor_ext_charts::{
    render_gvisor_chart, render_gvisor_installation_chart, ChartBundle, HelmRenderer,
};

#[derive(Args)]
pub struct RenderArgs {
    /// ContainerRuntime manifest (`-` for stdin); renders the runtime class
    /// chart when omitted
    pub runtime: Option<PathBuf>,

    /// Chart bundle root containing `internal/gvisor*`
    #[arg(long, env = "GVISOR_EXT_CHART_DIR", default_value = "charts")]
    pub chart_dir: PathBuf,

    /// helm binary used for rendering
    #[arg(long, env = "HELM_BINARY", default_value = "helm")]
    pub helm: PathBuf,
}

pub fn execute(args: RenderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let renderer = HelmRenderer::new(&args.helm);
    let bundle = ChartBundle::new(&args.chart_dir);
    let images = super::load_images()?;

    let rendered = match &args.runtime {
        Some(path) => {
            let runtime = super::load_runtime(path)?;
            render_gvisor_installation_chart(&renderer, &bundle, &images, &runtime)?
        }
        None => render_gvisor_chart(&renderer, &bundle, &images)?,
    };

    print!("{}", rendered.manifest_stream());
    Ok(())
}
