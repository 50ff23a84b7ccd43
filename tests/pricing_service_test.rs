//! Tests for PricingService

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use pricetree::application::services::PricingService;
use pricetree::application::ApplicationError;
use pricetree::domain::{DomainError, PriceFormat};
use pricetree::infrastructure::traits::{FileSystem, RealFileSystem};

const REFERENCE: &str = r#"
[[items]]
name = "Bubble gum"
price = 0.5

[[items]]
name = "Samsung Note 20"
price = 1005

[[items]]
[[items.items]]
name = "Samsung TV 20in"
price = 300

[[items.items]]
name = "Samsung TV 50in"
price = 800
"#;

/// Helper to create temp manifests for testing
fn create_manifest(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write manifest");
    path
}

fn service() -> PricingService {
    PricingService::new(Arc::new(RealFileSystem), PriceFormat::default(), true)
}

/// Filesystem backed by a map, for tests that never touch disk.
#[derive(Default)]
struct MemoryFileSystem {
    files: HashMap<PathBuf, String>,
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "not in memory"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

#[test]
fn given_reference_manifest_when_pricing_then_returns_total() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let manifest = create_manifest(&temp, "boxes.toml", REFERENCE);

    // Act
    let total = service().total(&manifest).unwrap();

    // Assert
    assert_eq!(total, 2105.5);
}

#[test]
fn given_reference_manifest_when_summarizing_then_reports_shape() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let manifest = create_manifest(&temp, "boxes.toml", REFERENCE);

    // Act
    let summary = service().summary(&manifest).unwrap();

    // Assert
    assert_eq!(summary.name, "a container with 3 items");
    assert_eq!(summary.total, 2105.5);
    assert_eq!(summary.items, 3);
    assert_eq!(summary.leaves, 4);
    assert_eq!(summary.depth, 3);
}

#[test]
fn given_reference_manifest_when_listing_leaves_then_in_traversal_order() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let manifest = create_manifest(&temp, "boxes.toml", REFERENCE);

    // Act
    let leaves = service().leaves(&manifest).unwrap();

    // Assert
    let names: Vec<&str> = leaves.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Bubble gum",
            "Samsung Note 20",
            "Samsung TV 20in",
            "Samsung TV 50in"
        ]
    );
    assert_eq!(leaves[1].1, 1005.0);
}

#[test]
fn given_reference_manifest_when_rendering_then_shows_tree_with_prices() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let manifest = create_manifest(&temp, "boxes.toml", REFERENCE);
    let service = PricingService::new(
        Arc::new(RealFileSystem),
        PriceFormat {
            currency: "$".into(),
            precision: 1,
        },
        true,
    );

    // Act
    let rendered = service.render(&manifest).unwrap();

    // Assert
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "a container with 3 items ($2105.5)");
    assert!(lines[1].ends_with("Bubble gum ($0.5)"));
    assert!(lines[3].ends_with("a container with 2 items ($1100.0)"));
    assert!(lines[5].ends_with("Samsung TV 50in ($800.0)"));
}

#[test]
fn given_several_manifests_when_pricing_in_parallel_then_keeps_input_order() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let paths: Vec<PathBuf> = (1..=8)
        .map(|i| {
            create_manifest(
                &temp,
                &format!("m{}.toml", i),
                &format!("[[items]]\nname = \"item\"\nprice = {}\n", i),
            )
        })
        .collect();

    // Act
    let results = service().totals(&paths);

    // Assert
    assert_eq!(results.len(), 8);
    for (i, (path, total)) in results.into_iter().enumerate() {
        assert_eq!(path, paths[i]);
        assert_eq!(total.unwrap(), (i + 1) as f64);
    }
}

#[test]
fn given_missing_manifest_when_pricing_then_errors_with_path() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.toml");

    // Act
    let result = service().total(&missing);

    // Assert
    let err = result.unwrap_err();
    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(err.to_string().contains("missing.toml"));
}

#[test]
fn given_malformed_manifest_when_pricing_then_manifest_error() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let manifest = create_manifest(&temp, "bad.toml", "[[items]]\nname = 3\n");

    // Act
    let result = service().total(&manifest);

    // Assert
    assert!(matches!(result, Err(ApplicationError::Manifest { .. })));
}

#[test]
fn given_negative_price_when_pricing_then_domain_error() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let manifest = create_manifest(
        &temp,
        "negative.toml",
        "[[items]]\nname = \"credit\"\nprice = -1\n",
    );

    // Act
    let result = service().total(&manifest);

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::NegativePrice { .. }))
    ));
}

#[test]
fn given_in_memory_filesystem_when_pricing_then_reads_through_trait() {
    // Arrange
    let mut fs = MemoryFileSystem::default();
    let path = PathBuf::from("/virtual/boxes.toml");
    fs.files.insert(path.clone(), REFERENCE.to_string());
    let service = PricingService::new(Arc::new(fs), PriceFormat::default(), false);

    // Act
    let total = service.total(&path).unwrap();
    let rendered = service.render(&path).unwrap();

    // Assert
    assert_eq!(total, 2105.5);
    assert_eq!(rendered.lines().next(), Some("a container with 3 items"));
    assert_eq!(service.format_price(total), "2105.50");
}
