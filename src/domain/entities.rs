//! Domain entities: declarative item tree descriptions

use serde::{Deserialize, Serialize};

/// One entry of a manifest: a product or a nested container.
///
/// Untagged: `{ name, price }` is a leaf, `{ items = [...] }` a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemSpec {
    Leaf { name: String, price: f64 },
    Container { items: Vec<ItemSpec> },
}

/// Item tree description; the manifest itself is the outermost container.
///
/// ```toml
/// [[items]]
/// name = "Bubble gum"
/// price = 0.5
///
/// [[items]]
/// [[items.items]]
/// name = "Samsung TV 20in"
/// price = 300
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub items: Vec<ItemSpec>,
}

impl Manifest {
    /// Parse manifest content (TOML).
    pub fn parse(content: &str) -> Result<Self, ManifestParseError> {
        toml::from_str(content).map_err(|e| ManifestParseError {
            message: e.message().to_string(),
        })
    }

    /// Number of leaf entries, counted recursively.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&ItemSpec> = self.items.iter().collect();
        while let Some(spec) = stack.pop() {
            match spec {
                ItemSpec::Leaf { .. } => count += 1,
                ItemSpec::Container { items } => stack.extend(items.iter()),
            }
        }
        count
    }
}

/// Error parsing a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestParseError {
    pub message: String,
}
