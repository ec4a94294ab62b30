//! Bundled JSON Schema for descriptor manifests.
//!
//! The schema ships inside the binary so discovery never depends on files
//! outside the scanned packages. Compilation happens once per loader; the
//! `schema_version` const declared by the schema is the only manifest version
//! accepted.

use anyhow::{Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::path::Path;

const MANIFEST_SCHEMA: &str = include_str!("../schema/application_manifest.schema.json");

/// Compiled manifest schema plus the version marker it pins.
pub(crate) struct ManifestSchema {
    compiled: JSONSchema,
    schema_version: String,
}

impl ManifestSchema {
    pub(crate) fn bundled() -> Result<Self> {
        let raw: Value = serde_json::from_str(MANIFEST_SCHEMA)
            .map_err(|err| anyhow!("parsing bundled manifest schema: {err}"))?;
        let schema_version =
            extract_schema_version(&raw, "/properties/schema_version/const")
                .ok_or_else(|| anyhow!("manifest schema missing schema_version const"))?;
        let compiled = JSONSchema::compile(&raw)
            .map_err(|err| anyhow!("compiling bundled manifest schema: {err}"))?;
        Ok(Self {
            compiled,
            schema_version,
        })
    }

    pub(crate) fn schema_version(&self) -> &str {
        &self.schema_version
    }

    /// Validate a manifest document, collecting every violation into one error.
    pub(crate) fn validate(&self, manifest: &Value, path: &Path) -> Result<()> {
        let declared = manifest
            .get("schema_version")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if declared != self.schema_version {
            bail!(
                "manifest {} declares schema_version '{}', expected {}",
                path.display(),
                declared,
                self.schema_version
            );
        }

        if let Err(errors) = self.compiled.validate(manifest) {
            let details = errors
                .map(|err| err.to_string())
                .collect::<Vec<_>>()
                .join("\n");
            bail!("manifest {} failed validation:\n{}", path.display(), details);
        }
        Ok(())
    }
}

fn extract_schema_version(schema: &Value, pointer: &str) -> Option<String> {
    let version = schema.pointer(pointer).and_then(Value::as_str)?;
    if version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}
