// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Process-wide cache of code tables keyed by device model.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::DeviceModel;
use crate::error::TableError;

use super::CodeTable;

/// Lazily populated cache of code tables.
///
/// Tables are either registered up front with [`TableRegistry::insert`] or
/// loaded on first use from `<directory>/<model>.json`. Once cached, a table
/// is never replaced, so every controller for the same model shares one
/// immutable instance.
///
/// # Examples
///
/// ```
/// use tuya_ir_ac::config::DeviceModel;
/// use tuya_ir_ac::table::{CodeTable, TableRegistry};
///
/// let registry = TableRegistry::new();
/// let table = CodeTable::from_json(r#"{"off": "00FF"}"#).unwrap();
/// registry.insert(&DeviceModel::MszGe25va, table);
///
/// let shared = registry.get(&DeviceModel::MszGe25va).unwrap();
/// assert_eq!(shared.off_code().to_hex(), "00FF");
/// ```
#[derive(Debug, Default)]
pub struct TableRegistry {
    directory: Option<PathBuf>,
    tables: RwLock<HashMap<String, Arc<CodeTable>>>,
}

impl TableRegistry {
    /// Creates an empty registry with no table directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry that loads missing tables from a directory.
    #[must_use]
    pub fn with_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(directory.into()),
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the table directory, if one is configured.
    #[must_use]
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// Registers a table for a model.
    ///
    /// Returns the cached table, which is the existing one if the model was
    /// already registered.
    pub fn insert(&self, model: &DeviceModel, table: CodeTable) -> Arc<CodeTable> {
        let mut tables = self.tables.write();
        Arc::clone(
            tables
                .entry(model.as_str().to_string())
                .or_insert_with(|| Arc::new(table)),
        )
    }

    /// Returns the table for a model, loading it on first use.
    ///
    /// # Errors
    ///
    /// Returns `TableError::UnknownModel` if the table is not cached and no
    /// directory is configured or the model name is not a plain file name,
    /// or any error raised while loading the file.
    pub fn get(&self, model: &DeviceModel) -> Result<Arc<CodeTable>, TableError> {
        if let Some(table) = self.tables.read().get(model.as_str()) {
            return Ok(Arc::clone(table));
        }

        let directory = self
            .directory
            .as_ref()
            .filter(|_| model.has_valid_name())
            .ok_or_else(|| TableError::UnknownModel(model.to_string()))?;
        let path = directory.join(format!("{}.json", model.as_str()));

        if !path.is_file() {
            return Err(TableError::UnknownModel(model.to_string()));
        }

        // Loading happens outside the lock; a concurrent loader may win the
        // insert, in which case its table is returned.
        let table = CodeTable::load(&path)?;
        tracing::info!(
            model = %model,
            path = %path.display(),
            codes = table.len(),
            "Loaded infrared code table"
        );

        Ok(self.insert(model, table))
    }

    /// Returns `true` if a table for the model is already cached.
    #[must_use]
    pub fn is_cached(&self, model: &DeviceModel) -> bool {
        self.tables.read().contains_key(model.as_str())
    }

    /// Returns the number of cached tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.read().len()
    }

    /// Returns `true` if no table is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tuya_ir_ac-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn unknown_model_without_directory() {
        let registry = TableRegistry::new();
        let err = registry.get(&DeviceModel::MscGe35vb).unwrap_err();
        assert!(matches!(err, TableError::UnknownModel(m) if m == "MSC-GE35VB"));
    }

    #[test]
    fn insert_keeps_first_table() {
        let registry = TableRegistry::new();
        let model = DeviceModel::MszGe25va;

        registry.insert(&model, CodeTable::from_json(r#"{"off": "01"}"#).unwrap());
        let kept = registry.insert(&model, CodeTable::from_json(r#"{"off": "02"}"#).unwrap());

        assert_eq!(kept.off_code().to_hex(), "01");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn lazy_load_from_directory() {
        let dir = temp_dir();
        std::fs::write(
            dir.join("MSC-GE35VB.json"),
            r#"{"off": "0A0B", "cool": {"low": {"20": "0C0D"}}}"#,
        )
        .unwrap();

        let registry = TableRegistry::with_directory(&dir);
        let model = DeviceModel::MscGe35vb;
        assert!(!registry.is_cached(&model));

        let first = registry.get(&model).unwrap();
        assert!(registry.is_cached(&model));
        assert_eq!(first.len(), 1);

        // Second lookup is served from the cache even if the file goes away.
        std::fs::remove_file(dir.join("MSC-GE35VB.json")).unwrap();
        let second = registry.get(&model).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_file_is_unknown_model() {
        let dir = temp_dir();
        let registry = TableRegistry::with_directory(&dir);

        let err = registry.get(&DeviceModel::custom("FOO-1")).unwrap_err();
        assert!(matches!(err, TableError::UnknownModel(_)));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn model_name_cannot_escape_directory() {
        let root = temp_dir();
        let dir = root.join("codes");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(root.join("OUTSIDE.json"), r#"{"off": "00"}"#).unwrap();

        let registry = TableRegistry::with_directory(&dir);
        let err = registry.get(&DeviceModel::custom("../OUTSIDE")).unwrap_err();
        assert!(matches!(err, TableError::UnknownModel(m) if m == "../OUTSIDE"));
        assert!(registry.is_empty());

        std::fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn malformed_file_is_not_cached() {
        let dir = temp_dir();
        std::fs::write(dir.join("BROKEN.json"), "{").unwrap();

        let registry = TableRegistry::with_directory(&dir);
        let model = DeviceModel::custom("BROKEN");
        assert!(matches!(registry.get(&model), Err(TableError::Json(_))));
        assert!(registry.is_empty());

        std::fs::remove_dir_all(dir).unwrap();
    }
}
