//! Pricing service
//!
//! Loads manifests through the filesystem boundary and answers price
//! questions about the resulting trees.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Manifest, PriceFormat, PriceTree, PricedItem, ToTree, TreeBuilder};
use crate::infrastructure::traits::FileSystem;

/// Overview of one manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSummary {
    /// Name of the outermost container
    pub name: String,
    /// Recursive total price
    pub total: f64,
    /// Direct children of the outermost container
    pub items: usize,
    /// Leaf occurrences anywhere in the tree
    pub leaves: usize,
    /// Levels including the outermost container
    pub depth: usize,
}

/// Service for pricing item trees described by manifests.
pub struct PricingService {
    fs: Arc<dyn FileSystem>,
    format: PriceFormat,
    show_prices: bool,
}

impl PricingService {
    /// Create a new pricing service.
    pub fn new(fs: Arc<dyn FileSystem>, format: PriceFormat, show_prices: bool) -> Self {
        Self {
            fs,
            format,
            show_prices,
        }
    }

    pub fn format_price(&self, price: f64) -> String {
        self.format.format(price)
    }

    /// Read, parse and build the tree described by a manifest file.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<PriceTree> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::OperationFailed {
                context: format!("manifest not found: {}", path.display()),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "file does not exist",
                )),
            });
        }

        if !self.fs.is_file(path) {
            return Err(ApplicationError::OperationFailed {
                context: format!("manifest is not a file: {}", path.display()),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "not a regular file",
                )),
            });
        }

        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read manifest", path)?;

        let manifest = Manifest::parse(&content).map_err(|e| ApplicationError::Manifest {
            path: path.to_path_buf(),
            message: e.message,
        })?;
        debug!("load: {} leaves in manifest", manifest.leaf_count());

        Ok(TreeBuilder::new().build(&manifest)?)
    }

    pub fn total(&self, path: &Path) -> ApplicationResult<f64> {
        Ok(self.load(path)?.total()?)
    }

    /// Price several manifests in parallel; results keep the input order.
    #[instrument(level = "debug", skip(self))]
    pub fn totals(&self, paths: &[PathBuf]) -> Vec<(PathBuf, ApplicationResult<f64>)> {
        paths
            .par_iter()
            .map(|path| (path.clone(), self.total(path)))
            .collect()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn summary(&self, path: &Path) -> ApplicationResult<PriceSummary> {
        let tree = self.load(path)?;
        let root = tree.root_ref()?;
        Ok(PriceSummary {
            name: root.name(),
            total: root.price(),
            items: root.children().count(),
            leaves: tree.arena.leaves(tree.root).len(),
            depth: tree.arena.depth(tree.root),
        })
    }

    /// Leaf names and prices in traversal order.
    pub fn leaves(&self, path: &Path) -> ApplicationResult<Vec<(String, f64)>> {
        let tree = self.load(path)?;
        Ok(tree
            .arena
            .leaves(tree.root)
            .iter()
            .map(|leaf| (leaf.name(), leaf.price()))
            .collect())
    }

    /// Tree rendering using the configured price format.
    pub fn render(&self, path: &Path) -> ApplicationResult<String> {
        let tree = self.load(path)?;
        let root = tree.root_ref()?;
        Ok(root.to_tree(&self.format, self.show_prices).to_string())
    }
}
