use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AnalyticsError, AnalyticsResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
}

impl Product {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// Read-only view over the products a business has listed.
pub trait ProductCatalog {
    fn products(&self) -> &[Product];
}

impl ProductCatalog for [Product] {
    fn products(&self) -> &[Product] {
        self
    }
}

impl ProductCatalog for Vec<Product> {
    fn products(&self) -> &[Product] {
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct JsonProductCatalog {
    path: PathBuf,
    products: Vec<Product>,
}

impl JsonProductCatalog {
    /// Loads a JSON array of products. A missing file is an empty catalog and
    /// keys other than `name` and `price` are ignored.
    pub fn load(path: impl AsRef<Path>) -> AnalyticsResult<Self> {
        let path = path.as_ref();
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "product catalog not found; using empty catalog");
                return Ok(Self {
                    path: path.to_path_buf(),
                    products: Vec::new(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        let products: Vec<Product> = serde_json::from_slice(&bytes).map_err(|error| {
            AnalyticsError::InvalidArgument(format!(
                "invalid product catalog '{}': {error}",
                path.display()
            ))
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            products,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProductCatalog for JsonProductCatalog {
    fn products(&self) -> &[Product] {
        &self.products
    }
}
