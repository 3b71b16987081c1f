//! Chart renderer capability and rendered output types.

use std::path::{Path, PathBuf};

use gvisor_ext_core::Result;

use crate::values::ValuesTree;

/// Renders a chart from a bundle with a fully built values tree.
///
/// Implementations own any caching, process or connection state. Callers
/// make exactly one call per render and never retry.
pub trait ChartRenderer: Send + Sync {
    fn render(
        &self,
        chart: &ChartBundle,
        chart_path: &str,
        release_name: &str,
        namespace: &str,
        values: &ValuesTree,
    ) -> Result<RenderedChart>;
}

/// Directory holding the extension's charts, addressed by relative chart path
/// such as `internal/gvisor-installation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBundle {
    root: PathBuf,
}

impl ChartBundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of the chart at `chart_path` within the bundle.
    pub fn chart_dir(&self, chart_path: &str) -> PathBuf {
        self.root.join(chart_path)
    }
}

/// One rendered template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Template path, e.g. `gvisor-installation/templates/config.yaml`
    pub name: String,
    pub content: String,
}

impl Manifest {
    /// File name of the template the manifest was rendered from.
    pub fn file_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// Result of a chart render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedChart {
    pub chart_name: String,
    pub manifests: Vec<Manifest>,
}

impl RenderedChart {
    /// Find a manifest by template file name.
    pub fn file_content(&self, file_name: &str) -> Option<&str> {
        self.manifests
            .iter()
            .find(|m| m.file_name() == file_name)
            .map(|m| m.content.as_str())
    }

    /// All manifests as one multi-document YAML stream.
    pub fn manifest_stream(&self) -> String {
        let mut out = String::new();
        for manifest in &self.manifests {
            out.push_str("---\n");
            out.push_str(&format!("# Source: {}\n", manifest.name));
            out.push_str(manifest.content.trim_end());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart() -> RenderedChart {
        RenderedChart {
            chart_name: "gvisor-installation".to_string(),
            manifests: vec![
                Manifest {
                    name: "gvisor-installation/templates/config.yaml".to_string(),
                    content: "kind: ConfigMap\n".to_string(),
                },
                Manifest {
                    name: "gvisor-installation/templates/daemonset.yaml".to_string(),
                    content: "kind: DaemonSet\n".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_chart_dir() {
        let bundle = ChartBundle::new("/opt/charts");
        assert_eq!(
            bundle.chart_dir("internal/gvisor"),
            PathBuf::from("/opt/charts/internal/gvisor")
        );
        assert_eq!(bundle.root(), Path::new("/opt/charts"));
    }

    #[test]
    fn test_manifest_file_name() {
        let m = Manifest {
            name: "a/templates/config.yaml".to_string(),
            content: String::new(),
        };
        assert_eq!(m.file_name(), "config.yaml");

        let bare = Manifest {
            name: "config.yaml".to_string(),
            content: String::new(),
        };
        assert_eq!(bare.file_name(), "config.yaml");
    }

    #[test]
    fn test_file_content() {
        let chart = chart();
        assert_eq!(chart.file_content("config.yaml"), Some("kind: ConfigMap\n"));
        assert_eq!(chart.file_content("missing.yaml"), None);
    }

    #[test]
    fn test_manifest_stream() {
        let stream = chart().manifest_stream();
        assert_eq!(
            stream,
            "---\n# Source: gvisor-installation/templates/config.yaml\nkind: ConfigMap\n\
             ---\n# Source: gvisor-installation/templates/daemonset.yaml\nkind: DaemonSet\n"
        );
    }
}
