//! Renderer backed by the `helm` binary.
//!
//! Runs `helm template` against a chart directory of the bundle. The values
//! tree is written to a temporary values file for the duration of the call.

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use serde::Deserialize;

use gvisor_ext_core::{ExtensionError, Result};

use crate::renderer::{ChartBundle, ChartRenderer, Manifest, RenderedChart};
use crate::values::ValuesTree;

/// Prefix helm writes before each rendered document.
const SOURCE_MARKER: &str = "# Source: ";

#[derive(Debug, Deserialize)]
struct ChartMetadata {
    name: String,
}

/// Renders charts by invoking `helm template`.
#[derive(Debug, Clone)]
pub struct HelmRenderer {
    helm: PathBuf,
}

impl Default for HelmRenderer {
    fn default() -> Self {
        Self::new("helm")
    }
}

impl HelmRenderer {
    /// Create a renderer using the given helm binary.
    pub fn new(helm: impl Into<PathBuf>) -> Self {
        Self { helm: helm.into() }
    }
}

impl ChartRenderer for HelmRenderer {
    fn render(
        &self,
        chart: &ChartBundle,
        chart_path: &str,
        release_name: &str,
        namespace: &str,
        values: &ValuesTree,
    ) -> Result<RenderedChart> {
        let render_error = |message: String| ExtensionError::RenderError {
            chart: chart_path.to_string(),
            message,
        };

        let chart_dir = chart.chart_dir(chart_path);
        let chart_yaml = std::fs::read_to_string(chart_dir.join("Chart.yaml"))
            .map_err(|e| render_error(format!("cannot read Chart.yaml: {}", e)))?;
        let metadata: ChartMetadata = serde_yaml::from_str(&chart_yaml)
            .map_err(|e| render_error(format!("invalid Chart.yaml: {}", e)))?;

        let mut values_file = tempfile::Builder::new()
            .prefix("values-")
            .suffix(".yaml")
            .tempfile()?;
        values_file.write_all(serde_yaml::to_string(values)?.as_bytes())?;
        values_file.flush()?;

        let output = Command::new(&self.helm)
            .arg("template")
            .arg(release_name)
            .arg(&chart_dir)
            .args(["--namespace", namespace])
            .arg("--values")
            .arg(values_file.path())
            .output()
            .map_err(|e| {
                render_error(format!(
                    "failed to run {}: {}",
                    self.helm.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(render_error(format!(
                "helm template exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| render_error(format!("helm output is not UTF-8: {}", e)))?;
        let manifests = split_manifests(&stdout);

        tracing::info!(
            chart = %metadata.name,
            release = release_name,
            namespace,
            manifests = manifests.len(),
            "Rendered chart"
        );

        Ok(RenderedChart {
            chart_name: metadata.name,
            manifests,
        })
    }
}

/// Split `helm template` output into manifests keyed by template source.
///
/// Documents are separated by lines consisting of `---` alone. Documents
/// from the same template are joined into a single manifest. Documents
/// without a source marker or without content are dropped.
pub fn split_manifests(output: &str) -> Vec<Manifest> {
    let mut manifests: Vec<Manifest> = Vec::new();
    let mut document: Vec<&str> = Vec::new();

    for line in output.lines() {
        if line.trim_end() == "---" {
            push_document(&mut manifests, &document);
            document.clear();
        } else {
            document.push(line);
        }
    }
    push_document(&mut manifests, &document);

    manifests
}

fn push_document(manifests: &mut Vec<Manifest>, document: &[&str]) {
    let mut lines = document.iter().skip_while(|l| l.trim().is_empty());

    let Some(name) = lines
        .next()
        .and_then(|l| l.strip_prefix(SOURCE_MARKER))
        .map(|n| n.trim().to_string())
    else {
        return;
    };

    let content = lines.copied().collect::<Vec<_>>().join("\n");
    let content = content.trim_end();
    if content.trim().is_empty() {
        return;
    }

    match manifests.iter_mut().find(|m| m.name == name) {
        Some(existing) => {
            existing.content.push_str("---\n");
            existing.content.push_str(content);
            existing.content.push('\n');
        }
        None => manifests.push(Manifest {
            name,
            content: format!("{}\n", content),
        }),
    }
}
