//! Names shared between the values compiler, the chart bundle and the CLI.

/// Runtime type handled by this extension.
pub const RUNTIME_TYPE: &str = "gvisor";

/// Symbolic image name of the installation image in the image vector.
pub const RUNTIME_INSTALLATION_IMAGE_NAME: &str = "runtime-installation-image";

/// Chart path of the runtime class chart inside the chart bundle.
pub const CHART_PATH: &str = "internal/gvisor";
/// Release name of the runtime class chart.
pub const RELEASE_NAME: &str = "gvisor";

/// Chart path of the node installation chart inside the chart bundle.
pub const INSTALLATION_CHART_PATH: &str = "internal/gvisor-installation";
/// Release name of the node installation chart.
pub const INSTALLATION_RELEASE_NAME: &str = "gvisor-installation";

/// Namespace both charts are rendered into.
pub const NAMESPACE_SYSTEM: &str = "kube-system";

/// Node label carrying the name of the container runtime interface.
pub const CRI_NAME_WORKER_LABEL: &str = "worker.gardener.cloud/cri-name";
/// CRI name value for containerd nodes.
pub const CRI_NAME_CONTAINERD: &str = "containerd";

/// Reserved flag that enables runsc debug logging.
pub const DEBUG_FLAG: &str = "debug";
/// Companion flag emitted after an enabled `debug` flag.
pub const DEBUG_LOG_FLAG: &str = "debug-log";
/// Per-sandbox, per-command log path used when debug logging is enabled.
pub const DEBUG_LOG_PATH: &str = "/var/log/runsc/%ID%/gvisor-%COMMAND%.log";
