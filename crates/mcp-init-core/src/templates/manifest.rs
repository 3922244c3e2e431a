//! Typed `package.json` loading and writing
//!
//! Only the fields the scaffolder touches are modelled. Everything else in the
//! file is kept verbatim, in its original position, so a load/save cycle never
//! drops user data.

use crate::error::ManifestError;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// File name of the manifest inside a project or template
pub const MANIFEST_FILE: &str = "package.json";

/// Version given to every freshly generated project
pub const INITIAL_VERSION: &str = "0.1.0";

/// Known fields, in the order they are written when not already present
const KNOWN_FIELDS: &[&str] = &[
    "name",
    "version",
    "private",
    "bin",
    "scripts",
    "dependencies",
    "devDependencies",
];

/// An ordered `name -> string` mapping (`scripts`, `dependencies`, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringMap(Vec<(String, String)>);

impl StringMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace, keeping the position of an existing key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn from_value(value: &Value) -> Result<Self, String> {
        let obj = value
            .as_object()
            .ok_or_else(|| "must be an object".to_string())?;
        let mut map = StringMap::new();
        for (key, v) in obj {
            match v.as_str() {
                Some(s) => map.insert(key.clone(), s),
                None => return Err(format!("has a non-string value for '{}'", key)),
            }
        }
        Ok(map)
    }

    fn to_value(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StringMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = StringMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for StringMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// A project or package manifest
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageManifest {
    pub name: Option<String>,
    pub version: Option<String>,
    pub private: Option<bool>,
    /// `bin` may be a string or an object; carried through untouched
    pub bin: Option<Value>,
    pub scripts: Option<StringMap>,
    pub dependencies: Option<StringMap>,
    pub dev_dependencies: Option<StringMap>,
    /// The object as loaded; supplies order and every unmodelled field
    raw: Map<String, Value>,
}

impl PackageManifest {
    /// Load and validate a manifest from disk
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::Missing(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    /// Parse manifest text; `path` is only used for error messages
    pub fn parse(path: &Path, content: &str) -> Result<Self, ManifestError> {
        let value: Value =
            serde_json::from_str(content).map_err(|source| ManifestError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_value(path, value)
    }

    fn from_value(path: &Path, value: Value) -> Result<Self, ManifestError> {
        let shape = |field: &str, reason: String| ManifestError::Shape {
            path: path.to_path_buf(),
            field: field.to_string(),
            reason,
        };

        let Value::Object(raw) = value else {
            return Err(shape("<root>", "must be a JSON object".to_string()));
        };

        let string_field = |field: &str| -> Result<Option<String>, ManifestError> {
            match raw.get(field) {
                None | Some(Value::Null) => Ok(None),
                Some(Value::String(s)) => Ok(Some(s.clone())),
                Some(_) => Err(shape(field, "must be a string".to_string())),
            }
        };
        let map_field = |field: &str| -> Result<Option<StringMap>, ManifestError> {
            match raw.get(field) {
                None | Some(Value::Null) => Ok(None),
                Some(v) => StringMap::from_value(v)
                    .map(Some)
                    .map_err(|reason| shape(field, reason)),
            }
        };

        let private = match raw.get("private") {
            None | Some(Value::Null) => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(_) => return Err(shape("private", "must be a boolean".to_string())),
        };

        Ok(Self {
            name: string_field("name")?,
            version: string_field("version")?,
            private,
            bin: raw.get("bin").filter(|v| !v.is_null()).cloned(),
            scripts: map_field("scripts")?,
            dependencies: map_field("dependencies")?,
            dev_dependencies: map_field("devDependencies")?,
            raw,
        })
    }

    /// Fresh project manifest: new identity, behavior inherited from `template`
    ///
    /// Only `bin`, `scripts`, `dependencies` and `devDependencies` survive from
    /// the template; every other template field is dropped.
    pub fn for_new_project(project_name: &str, template: &PackageManifest) -> Self {
        Self {
            name: Some(project_name.to_string()),
            version: Some(INITIAL_VERSION.to_string()),
            private: Some(true),
            bin: template.bin.clone(),
            scripts: template.scripts.clone(),
            dependencies: template.dependencies.clone(),
            dev_dependencies: template.dev_dependencies.clone(),
            raw: Map::new(),
        }
    }

    /// Throwaway manifest used to pull a template package from the registry
    pub fn installer_stub(package: &str) -> Self {
        Self {
            dependencies: Some(StringMap::from_iter([(package, "latest")])),
            ..Self::default()
        }
    }

    pub fn script(&self, name: &str) -> Option<&str> {
        self.scripts.as_ref().and_then(|s| s.get(name))
    }

    /// Look a package up in `dependencies`, then `devDependencies`
    pub fn dependency_version(&self, package: &str) -> Option<&str> {
        self.dependencies
            .as_ref()
            .and_then(|d| d.get(package))
            .or_else(|| self.dev_dependencies.as_ref().and_then(|d| d.get(package)))
    }

    /// Get a field not modelled by this type
    pub fn extra(&self, field: &str) -> Option<&Value> {
        if KNOWN_FIELDS.contains(&field) {
            return None;
        }
        self.raw.get(field)
    }

    fn known_value(&self, field: &str) -> Option<Value> {
        match field {
            "name" => self.name.clone().map(Value::String),
            "version" => self.version.clone().map(Value::String),
            "private" => self.private.map(Value::Bool),
            "bin" => self.bin.clone(),
            "scripts" => self.scripts.as_ref().map(StringMap::to_value),
            "dependencies" => self.dependencies.as_ref().map(StringMap::to_value),
            "devDependencies" => self.dev_dependencies.as_ref().map(StringMap::to_value),
            _ => None,
        }
    }

    /// Rebuild the JSON object, keeping the loaded key order
    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        for (key, value) in &self.raw {
            if KNOWN_FIELDS.contains(&key.as_str()) {
                if let Some(v) = self.known_value(key) {
                    out.insert(key.clone(), v);
                }
            } else {
                out.insert(key.clone(), value.clone());
            }
        }
        for field in KNOWN_FIELDS {
            if !out.contains_key(*field) {
                if let Some(v) = self.known_value(field) {
                    out.insert(field.to_string(), v);
                }
            }
        }
        Value::Object(out)
    }

    /// Pretty-printed JSON with two-space indent and a trailing newline
    pub fn to_pretty_string(&self) -> String {
        // Serializing a Value built from strings and maps cannot fail.
        let mut text = serde_json::to_string_pretty(&self.to_value()).unwrap_or_default();
        text.push('\n');
        text
    }

    /// Write the manifest in place
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        std::fs::write(path, self.to_pretty_string()).map_err(|source| ManifestError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Path of the manifest inside `dir`
pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<PackageManifest, ManifestError> {
        PackageManifest::parse(Path::new("package.json"), text)
    }

    #[test]
    fn test_unknown_fields_round_trip_in_place() {
        let text = r#"{
  "name": "demo",
  "description": "keep me",
  "scripts": {
    "build": "mcp-scripts build"
  },
  "engines": {
    "node": ">=18"
  }
}
"#;
        let manifest = parse(text).unwrap();
        assert_eq!(manifest.to_pretty_string(), text);
        assert_eq!(
            manifest.extra("description"),
            Some(&Value::String("keep me".into()))
        );
    }

    #[test]
    fn test_removed_field_disappears_and_new_field_is_appended() {
        let mut manifest = parse(r#"{"name":"demo","dependencies":{"a":"1"}}"#).unwrap();
        manifest.dependencies = None;
        manifest.dev_dependencies = Some(StringMap::from_iter([("tsup", "^8.0.0")]));
        let value = manifest.to_value();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["name", "devDependencies"]);
    }

    #[test]
    fn test_script_values_must_be_strings() {
        let err = parse(r#"{"scripts":{"build":42}}"#).unwrap_err();
        match err {
            ManifestError::Shape { field, .. } => assert_eq!(field, "scripts"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_root_must_be_object() {
        assert!(matches!(
            parse("[1, 2]"),
            Err(ManifestError::Shape { .. })
        ));
        assert!(matches!(parse("{"), Err(ManifestError::Parse { .. })));
    }

    #[test]
    fn test_new_project_keeps_behavior_and_resets_identity() {
        let template = parse(
            r#"{"name":"mcpi-template-default","version":"3.2.1","license":"MIT",
                "scripts":{"dev":"mcp-scripts dev"},
                "dependencies":{"mcp-scripts":"^1.0.0"}}"#,
        )
        .unwrap();
        let manifest = PackageManifest::for_new_project("my-server", &template);
        assert_eq!(manifest.name.as_deref(), Some("my-server"));
        assert_eq!(manifest.version.as_deref(), Some("0.1.0"));
        assert_eq!(manifest.private, Some(true));
        assert_eq!(manifest.scripts, template.scripts);
        assert_eq!(manifest.dependencies, template.dependencies);
        assert_eq!(manifest.dev_dependencies, None);
        assert!(manifest.extra("license").is_none());

        let keys: Vec<_> = manifest
            .to_value()
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(
            keys,
            vec!["name", "version", "private", "scripts", "dependencies"]
        );
    }

    #[test]
    fn test_dependency_version_checks_dev_dependencies_second() {
        let manifest = parse(
            r#"{"dependencies":{"zod":"^3"},"devDependencies":{"tsup":"^8.4.0","zod":"^2"}}"#,
        )
        .unwrap();
        assert_eq!(manifest.dependency_version("zod"), Some("^3"));
        assert_eq!(manifest.dependency_version("tsup"), Some("^8.4.0"));
        assert_eq!(manifest.dependency_version("missing"), None);
    }

    #[test]
    fn test_installer_stub_pins_latest() {
        let stub = PackageManifest::installer_stub("mcpi-template-default");
        assert_eq!(
            stub.to_pretty_string(),
            "{\n  \"dependencies\": {\n    \"mcpi-template-default\": \"latest\"\n  }\n}\n"
        );
    }
}
