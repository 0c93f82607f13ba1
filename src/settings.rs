use std::{fs::File, io::BufReader, path::Path, str::FromStr};

use anyhow::Context as _;

use crate::foundation::core::Dimensions;
use crate::foundation::error::{BlurError, BlurResult};
use crate::source::Channel;

/// Blur parameters, loadable from a JSON file.
///
/// ```json
/// { "radius": 4, "channel": "green" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlurSettings {
    pub radius: u32,
    pub channel: Channel,
}

impl Default for BlurSettings {
    fn default() -> Self {
        Self {
            radius: 1,
            channel: Channel::Luma,
        }
    }
}

impl BlurSettings {
    pub fn from_json_str(s: &str) -> BlurResult<Self> {
        serde_json::from_str(s).map_err(|e| BlurError::config(format!("parse settings: {e}")))
    }

    pub fn from_json_path(path: &Path) -> BlurResult<Self> {
        let f = File::open(path).with_context(|| format!("open settings '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(f))
            .map_err(|e| BlurError::config(format!("parse settings '{}': {e}", path.display())))
    }

    /// Apply command-line overrides on top of file or default values.
    pub fn with_overrides(mut self, radius: Option<u32>, channel: Option<Channel>) -> Self {
        if let Some(r) = radius {
            self.radius = r;
        }
        if let Some(c) = channel {
            self.channel = c;
        }
        self
    }
}

/// Extent of a headerless raw file, written `WIDTHxHEIGHT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawSize(pub Dimensions);

impl FromStr for RawSize {
    type Err = BlurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| BlurError::config(format!("raw size '{s}' is not WIDTHxHEIGHT")))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|e| BlurError::config(format!("raw size '{s}': {e}")))
        };
        Ok(Self(Dimensions::new(parse(w)?, parse(h)?)?))
    }
}
