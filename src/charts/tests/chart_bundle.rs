//! Checks against the chart bundle shipped in `charts/`.
//!
//! The helm test is `#[ignore]` by default because it needs a `helm` binary
//! on PATH:
//!
//! ```bash
//! cargo test -p gvisor-ext-charts --test chart_bundle -- --ignored
//! ```

use std::path::PathBuf;

use gvisor_ext_charts::{
    render_gvisor_installation_chart, ChartBundle, HelmRenderer, GVISOR_CONFIG_KEY,
};
use gvisor_ext_core::gvisor::{
    CHART_PATH, INSTALLATION_CHART_PATH, INSTALLATION_RELEASE_NAME, RELEASE_NAME,
};
use gvisor_ext_core::{ContainerRuntime, ImageVector};

fn bundle() -> ChartBundle {
    // CARGO_MANIFEST_DIR is src/charts; the bundle lives at the workspace root.
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../charts")
        .canonicalize()
        .expect("chart bundle should exist at the workspace root");
    ChartBundle::new(root)
}

fn chart_name(chart_path: &str) -> String {
    let chart_yaml = std::fs::read_to_string(bundle().chart_dir(chart_path).join("Chart.yaml"))
        .expect("Chart.yaml should be readable");
    let value: serde_yaml::Value = serde_yaml::from_str(&chart_yaml).unwrap();
    value["name"].as_str().unwrap().to_string()
}

#[test]
fn test_bundle_chart_names_match_releases() {
    assert_eq!(chart_name(CHART_PATH), RELEASE_NAME);
    assert_eq!(chart_name(INSTALLATION_CHART_PATH), INSTALLATION_RELEASE_NAME);
}

#[test]
fn test_bundle_charts_render_config_template() {
    for chart_path in [CHART_PATH, INSTALLATION_CHART_PATH] {
        let template = bundle()
            .chart_dir(chart_path)
            .join("templates")
            .join(GVISOR_CONFIG_KEY);
        assert!(template.is_file(), "missing {}", template.display());
    }
}

#[test]
fn test_installation_chart_defaults_cover_values_keys() {
    let values_yaml = std::fs::read_to_string(
        bundle().chart_dir(INSTALLATION_CHART_PATH).join("values.yaml"),
    )
    .unwrap();
    let defaults: serde_json::Value = serde_yaml::from_str(&values_yaml).unwrap();

    for key in ["nodeSelector", "binFolder", "workergroup", "configFlags"] {
        assert!(defaults["config"].get(key).is_some(), "missing config.{}", key);
    }
    assert!(defaults["images"].get("runtime-installation-image").is_some());
}

#[test]
#[ignore]
fn test_helm_renders_installation_chart() {
    let runtime = ContainerRuntime::from_yaml(
        r#"
spec:
  binaryPath: /var/bin/containerruntimes
  workerPool:
    name: worker-gvisor
    selector:
      matchLabels:
        worker.gardener.cloud/pool: worker-gvisor
  providerConfig:
    apiVersion: gvisor.os.extensions.gardener.cloud/v1alpha1
    kind: GVisorConfiguration
    configFlags:
      debug: "true"
      net-raw: "true"
"#,
    )
    .unwrap();

    let rendered = render_gvisor_installation_chart(
        &HelmRenderer::default(),
        &bundle(),
        &ImageVector::embedded().unwrap(),
        &runtime,
    )
    .unwrap();

    assert_eq!(rendered.chart_name, "gvisor-installation");
    let config = rendered.file_content(GVISOR_CONFIG_KEY).unwrap();
    assert!(config.contains("debug-log = \"/var/log/runsc/%ID%/gvisor-%COMMAND%.log\""));
    assert!(config.contains("worker.gardener.cloud/cri-name: containerd"));
}
