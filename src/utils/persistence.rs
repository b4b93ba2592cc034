use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::{domain::FormSchema, errors::FormError};

const TMP_SUFFIX: &str = "tmp";

/// Writes the provided schema to disk atomically by staging to a temporary file.
pub fn save_schema_to_file(schema: &FormSchema, path: &Path) -> Result<(), FormError> {
    write_json_atomic(schema, path)
}

/// Loads a schema from disk, returning structured errors on failure.
pub fn load_schema_from_file(path: &Path) -> Result<FormSchema, FormError> {
    read_json(path)
}

pub(crate) fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> Result<(), FormError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(value)?;
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(json.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, FormError> {
    if !path.exists() {
        return Err(FormError::NotFound(path.display().to_string()));
    }
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Field, FieldType};

    #[test]
    fn schema_survives_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("intake.json");
        let schema = FormSchema::new("Intake")
            .with_fields(vec![Field::new("name", FieldType::Text).required()]);

        save_schema_to_file(&schema, &path).unwrap();
        let loaded = load_schema_from_file(&path).unwrap();

        assert_eq!(loaded, schema);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn missing_file_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_schema_from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, FormError::NotFound(_)));
    }
}
