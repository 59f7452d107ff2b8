use crate::error::{AppError, Result};
use crate::models::InstanceConfig;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Instance configurations loaded from a directory of `*.json` files,
/// one instance per file.
#[derive(Debug, Clone, Default)]
pub struct InstanceStore {
    instances: BTreeMap<String, InstanceConfig>,
}

impl InstanceStore {
    /// Load every `*.json` file of `dir`, in file-name order.
    ///
    /// A missing directory yields an empty store (development setups run
    /// without instance files and rely on defaults). Malformed files and
    /// duplicate keys fail the whole load.
    pub fn load(dir: &Path) -> Result<Self> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    "Instances directory {} not found, only defaults will be used",
                    dir.display()
                );
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut instances = BTreeMap::new();
        for path in paths {
            let contents = fs::read_to_string(&path)?;
            let instance: InstanceConfig = serde_json::from_str(&contents).map_err(|e| {
                AppError::InvalidInstance(format!("{}: {}", path.display(), e))
            })?;

            if instances.contains_key(&instance.key) {
                return Err(AppError::InvalidInstance(format!(
                    "{}: duplicate instance key '{}'",
                    path.display(),
                    instance.key
                )));
            }

            tracing::debug!("Loaded instance {} from {}", instance.key, path.display());
            instances.insert(instance.key.clone(), instance);
        }

        tracing::info!("Loaded {} instance(s) from {}", instances.len(), dir.display());
        Ok(Self { instances })
    }

    pub fn from_instances<I>(instances: I) -> Self
    where
        I: IntoIterator<Item = InstanceConfig>,
    {
        Self {
            instances: instances
                .into_iter()
                .map(|instance| (instance.key.clone(), instance))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&InstanceConfig> {
        self.instances.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.instances.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
