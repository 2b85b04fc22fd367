//! `[typewriter]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[typewriter]` section in folio.toml.
///
/// # Example
/// ```toml
/// [typewriter]
/// element = "typewriter"
/// interval_ms = 100
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct TypewriterConfig {
    /// Id of the element whose text is typed out.
    #[serde(default = "defaults::typewriter::element")]
    #[educe(Default = defaults::typewriter::element())]
    pub element: String,

    /// Delay between two characters, for the host's timer.
    #[serde(default = "defaults::typewriter::interval_ms")]
    #[educe(Default = defaults::typewriter::interval_ms())]
    pub interval_ms: u64,
}
