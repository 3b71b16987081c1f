//! gVisor runtime extension - Chart Compiler
//!
//! Builds helm values for the `gvisor` and `gvisor-installation` charts and
//! hands them to a [`ChartRenderer`]. Values are always built completely
//! before the renderer is called; a failed build never reaches it.

pub mod flags;
pub mod helm;
pub mod renderer;
pub mod values;

use gvisor_ext_core::gvisor::{
    CHART_PATH, INSTALLATION_CHART_PATH, INSTALLATION_RELEASE_NAME, NAMESPACE_SYSTEM,
    RELEASE_NAME,
};
use gvisor_ext_core::{ContainerRuntime, ImageLookup, Result};

pub use flags::serialize_config_flags;
pub use helm::HelmRenderer;
pub use renderer::{ChartBundle, ChartRenderer, Manifest, RenderedChart};
pub use values::{base_values, installation_values, ValuesTree};

/// Template file both charts render their resources into.
pub const GVISOR_CONFIG_KEY: &str = "config.yaml";

/// Render the runtime class chart.
pub fn render_gvisor_chart(
    renderer: &dyn ChartRenderer,
    chart: &ChartBundle,
    images: &dyn ImageLookup,
) -> Result<RenderedChart> {
    let values = base_values(images)?;
    renderer.render(chart, CHART_PATH, RELEASE_NAME, NAMESPACE_SYSTEM, &values)
}

/// Render the node installation chart for a ContainerRuntime.
pub fn render_gvisor_installation_chart(
    renderer: &dyn ChartRenderer,
    chart: &ChartBundle,
    images: &dyn ImageLookup,
    runtime: &ContainerRuntime,
) -> Result<RenderedChart> {
    let values = installation_values(images, runtime)?;
    renderer.render(
        chart,
        INSTALLATION_CHART_PATH,
        INSTALLATION_RELEASE_NAME,
        NAMESPACE_SYSTEM,
        &values,
    )
}
