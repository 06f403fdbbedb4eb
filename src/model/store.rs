//! Model artifact loading and process-wide caching

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::classifier::{Classifier, ProbabilisticClassifier};
use crate::features::FeatureSchema;
use crate::{ChurnError, Result};

/// On-disk artifact layout
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ArtifactFile {
    feature_names: Vec<String>,
    classifier: Classifier,
}

/// A trained classifier together with the feature order it was fit on
#[derive(Debug, Clone)]
pub struct ModelBundle {
    pub classifier: Classifier,
    pub schema: FeatureSchema,
}

impl ModelBundle {
    /// Pair a classifier with its schema, checking that they agree
    pub fn new(classifier: Classifier, schema: FeatureSchema) -> std::result::Result<Self, String> {
        if schema.is_empty() {
            return Err("feature schema is empty".to_string());
        }
        if classifier.num_features() != schema.len() {
            return Err(format!(
                "classifier expects {} features but the schema lists {}",
                classifier.num_features(),
                schema.len()
            ));
        }
        classifier.validate()?;
        Ok(ModelBundle { classifier, schema })
    }

    /// Read and validate an artifact file
    pub fn from_file(path: &Path) -> Result<Self> {
        let load_err = |message: String| ChurnError::ModelLoad {
            path: path.display().to_string(),
            message,
        };

        let content = std::fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
        let artifact: ArtifactFile =
            serde_json::from_str(&content).map_err(|e| load_err(e.to_string()))?;

        ModelBundle::new(artifact.classifier, FeatureSchema::new(artifact.feature_names))
            .map_err(load_err)
    }

    /// Write the bundle in artifact format
    pub fn save(&self, path: &Path) -> Result<()> {
        let artifact = ArtifactFile {
            feature_names: self.schema.names().to_vec(),
            classifier: self.classifier.clone(),
        };
        let json = serde_json::to_string_pretty(&artifact)
            .map_err(|e| ChurnError::Parse(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| ChurnError::file(path, e))?;
        Ok(())
    }
}

/// Lazily loads one artifact and hands out the same read-only bundle after
pub struct ModelStore {
    path: PathBuf,
    bundle: OnceLock<ModelBundle>,
}

static GLOBAL: OnceLock<ModelStore> = OnceLock::new();

impl ModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ModelStore {
            path: path.into(),
            bundle: OnceLock::new(),
        }
    }

    /// Process-wide store. The first call fixes the artifact path.
    pub fn global(path: impl Into<PathBuf>) -> &'static ModelStore {
        let path = path.into();
        let store = GLOBAL.get_or_init(|| ModelStore::new(path.clone()));
        if store.path != path {
            log::warn!(
                "Model store already bound to {}, ignoring {}",
                store.path.display(),
                path.display()
            );
        }
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.bundle.get().is_some()
    }

    /// Load the artifact on first call; later calls return the cached bundle
    pub fn load(&self) -> Result<&ModelBundle> {
        if let Some(bundle) = self.bundle.get() {
            return Ok(bundle);
        }

        let bundle = ModelBundle::from_file(&self.path)?;
        log::info!(
            "Loaded {} model with {} features from {}",
            bundle.classifier.kind(),
            bundle.schema.len(),
            self.path.display()
        );
        Ok(self.bundle.get_or_init(|| bundle))
    }
}
