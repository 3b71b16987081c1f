//! runsc flag serialization.
//!
//! Flags end up as `key = "value"` lines in the runsc section of the
//! containerd runtime handler configuration. The rendered manifest is
//! compared across reconciliations, so the output is sorted by flag name.

use std::collections::HashMap;
use std::hash::BuildHasher;

use gvisor_ext_core::gvisor::{DEBUG_FLAG, DEBUG_LOG_FLAG, DEBUG_LOG_PATH};

/// Serialize flags into sorted `key = "value"\n` lines.
///
/// An enabled `debug` flag (value exactly `"true"`) is followed by a
/// `debug-log` line pointing at the per-sandbox log directory. Values are
/// written unescaped; provider config decoding rejects values that would
/// break the line format.
pub fn serialize_config_flags<S: BuildHasher>(flags: &HashMap<String, String, S>) -> String {
    let mut entries: Vec<(&String, &String)> = flags.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let mut out = String::new();
    for (key, value) in entries {
        push_line(&mut out, key, value);
        if key == DEBUG_FLAG && value == "true" {
            push_line(&mut out, DEBUG_LOG_FLAG, DEBUG_LOG_PATH);
        }
    }
    out
}

fn push_line(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push_str(" = \"");
    out.push_str(value);
    out.push_str("\"\n");
}
