//! Helm values for the gvisor charts.
//!
//! The installation chart receives:
//!
//! ```yaml
//! images:
//!   runtime-installation-image: <reference>
//! config:
//!   nodeSelector: {worker.gardener.cloud/cri-name: containerd, <pool selector>...}
//!   binFolder: <spec.binaryPath>
//!   workergroup: <spec.workerPool.name>
//!   configFlags: <serialized runsc flags>
//! ```

use serde_json::{json, Map, Value};

use gvisor_ext_core::gvisor::{
    CRI_NAME_CONTAINERD, CRI_NAME_WORKER_LABEL, RUNTIME_INSTALLATION_IMAGE_NAME,
};
use gvisor_ext_core::{ContainerRuntime, GVisorConfiguration, ImageLookup, Result};

use crate::flags::serialize_config_flags;

/// Values handed to the chart renderer. Always a JSON object.
pub type ValuesTree = Value;

/// Values of the runtime class chart.
pub fn base_values(images: &dyn ImageLookup) -> Result<ValuesTree> {
    Ok(json!({ "images": image_values(images)? }))
}

/// Values of the node installation chart for one ContainerRuntime.
///
/// The provider config is decoded before anything else, so a bad payload
/// fails the call without touching the image vector.
pub fn installation_values(
    images: &dyn ImageLookup,
    runtime: &ContainerRuntime,
) -> Result<ValuesTree> {
    let spec = &runtime.spec;

    let config_flags = match &spec.provider_config {
        Some(raw) => {
            let config = GVisorConfiguration::decode(raw.as_bytes())?;
            serialize_config_flags(&config.config_flags)
        }
        None => String::new(),
    };

    let values = json!({
        "images": image_values(images)?,
        "config": {
            "nodeSelector": node_selector(runtime),
            "binFolder": spec.binary_path,
            "workergroup": spec.worker_pool.name,
            "configFlags": config_flags,
        },
    });

    tracing::debug!(
        runtime = %runtime.metadata.name,
        worker_pool = %spec.worker_pool.name,
        "Compiled gvisor installation values"
    );

    Ok(values)
}

fn image_values(images: &dyn ImageLookup) -> Result<Value> {
    let image = images.find_image(RUNTIME_INSTALLATION_IMAGE_NAME)?;
    let mut map = Map::new();
    map.insert(
        RUNTIME_INSTALLATION_IMAGE_NAME.to_string(),
        Value::String(image),
    );
    Ok(Value::Object(map))
}

/// CRI label first, then the pool selector, so pool labels win.
fn node_selector(runtime: &ContainerRuntime) -> Value {
    let mut selector = Map::new();
    selector.insert(
        CRI_NAME_WORKER_LABEL.to_string(),
        Value::String(CRI_NAME_CONTAINERD.to_string()),
    );
    for (key, value) in &runtime.spec.worker_pool.selector.match_labels {
        selector.insert(key.clone(), Value::String(value.clone()));
    }
    Value::Object(selector)
}
