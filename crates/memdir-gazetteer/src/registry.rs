#![deny(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use memdir_model::{AddressTables, AddressValue, District, Province, Subdistrict};

use crate::error::GazetteerError;
use crate::hash::sha256_hex;
use crate::manifest::{Manifest, ManifestFile};

pub const PROVINCES_FILE: &str = "th_provinces.json";
pub const DISTRICTS_FILE: &str = "th_amphures.json";
pub const SUBDISTRICTS_FILE: &str = "th_tambons.json";

const REQUIRED_ROLES: &[&str] = &["provinces", "districts", "subdistricts"];
const MANIFEST_SCHEMA: &str = "memdir.gazetteer-manifest";

/// An [`AddressValue`] resolved into display names.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ResolvedAddress {
    pub province: Option<String>,
    pub district: Option<String>,
    pub subdistrict: Option<String>,
    pub zip_code: Option<String>,
}

/// The three gazetteer tables, loaded once and indexed for lookup.
///
/// Tables are read-only after load; there is no refresh path.
#[derive(Debug, Clone)]
pub struct GazetteerRegistry {
    provinces: Vec<Province>,
    districts: Vec<District>,
    subdistricts: Vec<Subdistrict>,
    districts_by_province: BTreeMap<i64, Vec<usize>>,
    subdistricts_by_district: BTreeMap<i64, Vec<usize>>,
    manifest: Option<Manifest>,
}

impl GazetteerRegistry {
    /// Load the gazetteer from `data_dir`.
    ///
    /// When a `manifest.toml` is present it is validated and every
    /// pinned file's sha256 is verified before any table is parsed.
    pub fn load(data_dir: &Path) -> Result<Self, GazetteerError> {
        let manifest_path = data_dir.join("manifest.toml");
        let manifest = if manifest_path.is_file() {
            let manifest = load_manifest(&manifest_path)?;
            validate_manifest(&manifest)?;
            for file in &manifest.files {
                verify_file(data_dir, file)?;
            }
            info!(files = manifest.files.len(), "gazetteer manifest verified");
            Some(manifest)
        } else {
            debug!(path = %manifest_path.display(), "no gazetteer manifest; loading unpinned");
            None
        };

        let provinces: Vec<Province> =
            load_json_table(&role_path(data_dir, manifest.as_ref(), "provinces", PROVINCES_FILE))?;
        let districts: Vec<District> =
            load_json_table(&role_path(data_dir, manifest.as_ref(), "districts", DISTRICTS_FILE))?;
        let subdistricts: Vec<Subdistrict> = load_json_table(&role_path(
            data_dir,
            manifest.as_ref(),
            "subdistricts",
            SUBDISTRICTS_FILE,
        ))?;

        info!(
            provinces = provinces.len(),
            districts = districts.len(),
            subdistricts = subdistricts.len(),
            "gazetteer loaded"
        );

        Ok(Self::from_tables(provinces, districts, subdistricts, manifest))
    }

    /// Build a registry from already-materialized tables (tests, fixtures).
    pub fn from_rows(
        provinces: Vec<Province>,
        districts: Vec<District>,
        subdistricts: Vec<Subdistrict>,
    ) -> Self {
        Self::from_tables(provinces, districts, subdistricts, None)
    }

    fn from_tables(
        provinces: Vec<Province>,
        districts: Vec<District>,
        subdistricts: Vec<Subdistrict>,
        manifest: Option<Manifest>,
    ) -> Self {
        let mut districts_by_province: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        for (index, district) in districts.iter().enumerate() {
            districts_by_province
                .entry(district.province_id)
                .or_default()
                .push(index);
        }
        let mut subdistricts_by_district: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        for (index, subdistrict) in subdistricts.iter().enumerate() {
            subdistricts_by_district
                .entry(subdistrict.district_id)
                .or_default()
                .push(index);
        }
        let mut registry = Self {
            provinces,
            districts,
            subdistricts,
            districts_by_province,
            subdistricts_by_district,
            manifest,
        };
        // Stable display ordering: byte-wise (name_th, id). Locale
        // collation is deliberately not attempted.
        sort_children(&mut registry);
        registry
    }

    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    pub fn province(&self, id: i64) -> Option<&Province> {
        self.provinces.iter().find(|p| p.id == id)
    }

    pub fn district(&self, id: i64) -> Option<&District> {
        self.districts.iter().find(|d| d.id == id)
    }

    pub fn subdistrict(&self, id: i64) -> Option<&Subdistrict> {
        self.subdistricts.iter().find(|s| s.id == id)
    }

    /// Districts under a province, in `(name_th, id)` order.
    pub fn districts_of(&self, province_id: i64) -> Vec<&District> {
        self.districts_by_province
            .get(&province_id)
            .map(|indexes| indexes.iter().map(|&i| &self.districts[i]).collect())
            .unwrap_or_default()
    }

    /// Subdistricts under a district, in `(name_th, id)` order.
    pub fn subdistricts_of(&self, district_id: i64) -> Vec<&Subdistrict> {
        self.subdistricts_by_district
            .get(&district_id)
            .map(|indexes| indexes.iter().map(|&i| &self.subdistricts[i]).collect())
            .unwrap_or_default()
    }

    /// Postal code of a subdistrict.
    pub fn zip_of(&self, subdistrict_id: i64) -> Option<&str> {
        self.subdistrict(subdistrict_id)
            .map(|s| s.zip_code.as_str())
    }

    /// Resolve the ids in an [`AddressValue`] into display names.
    /// Unresolvable ids leave their field `None`.
    pub fn resolve(&self, value: &AddressValue) -> ResolvedAddress {
        ResolvedAddress {
            province: value
                .province_id
                .and_then(|id| self.province(id))
                .map(|p| p.name_th.clone()),
            district: value
                .district_id
                .and_then(|id| self.district(id))
                .map(|d| d.name_th.clone()),
            subdistrict: value
                .subdistrict_id
                .and_then(|id| self.subdistrict(id))
                .map(|s| s.name_th.clone()),
            zip_code: value
                .subdistrict_id
                .and_then(|id| self.zip_of(id))
                .map(str::to_owned),
        }
    }
}

impl AddressTables for GazetteerRegistry {
    fn provinces(&self) -> &[Province] {
        &self.provinces
    }

    fn districts(&self) -> &[District] {
        &self.districts
    }

    fn subdistricts(&self) -> &[Subdistrict] {
        &self.subdistricts
    }
}

fn sort_children(registry: &mut GazetteerRegistry) {
    let districts = &registry.districts;
    for indexes in registry.districts_by_province.values_mut() {
        indexes.sort_by(|&a, &b| {
            districts[a]
                .name_th
                .cmp(&districts[b].name_th)
                .then_with(|| districts[a].id.cmp(&districts[b].id))
        });
    }
    let subdistricts = &registry.subdistricts;
    for indexes in registry.subdistricts_by_district.values_mut() {
        indexes.sort_by(|&a, &b| {
            subdistricts[a]
                .name_th
                .cmp(&subdistricts[b].name_th)
                .then_with(|| subdistricts[a].id.cmp(&subdistricts[b].id))
        });
    }
    registry
        .provinces
        .sort_by(|a, b| a.name_th.cmp(&b.name_th).then_with(|| a.id.cmp(&b.id)));
}

fn load_manifest(path: &Path) -> Result<Manifest, GazetteerError> {
    let contents = std::fs::read_to_string(path).map_err(|e| GazetteerError::io(path, e))?;
    toml::from_str(&contents).map_err(|e| GazetteerError::Toml {
        path: path.to_path_buf(),
        source: e,
    })
}

fn validate_manifest(manifest: &Manifest) -> Result<(), GazetteerError> {
    if manifest.manifest.schema != MANIFEST_SCHEMA {
        return Err(GazetteerError::InvalidManifest {
            message: format!("unsupported schema: {}", manifest.manifest.schema),
        });
    }
    if manifest.manifest.schema_version != 1 {
        return Err(GazetteerError::InvalidManifest {
            message: format!(
                "unsupported schema_version: {}",
                manifest.manifest.schema_version
            ),
        });
    }

    let mut roles: BTreeSet<&str> = BTreeSet::new();
    for file in &manifest.files {
        if roles.contains(file.role.as_str()) {
            return Err(GazetteerError::DuplicateRole {
                role: file.role.clone(),
            });
        }
        roles.insert(file.role.as_str());
        validate_sha(&file.sha256, &file.path)?;
        validate_path(&file.path)?;
    }

    for role in REQUIRED_ROLES {
        if !roles.contains(role) {
            return Err(GazetteerError::MissingRole {
                role: (*role).to_string(),
            });
        }
    }

    Ok(())
}

fn verify_file(data_dir: &Path, file: &ManifestFile) -> Result<(), GazetteerError> {
    let full_path = data_dir.join(&file.path);
    let bytes = std::fs::read(&full_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            GazetteerError::MissingFile {
                path: full_path.clone(),
            }
        } else {
            GazetteerError::io(full_path.clone(), e)
        }
    })?;

    let actual = sha256_hex(&bytes);
    let expected = file.sha256.to_ascii_lowercase();
    if actual != expected {
        return Err(GazetteerError::Sha256Mismatch {
            path: full_path,
            expected,
            actual,
        });
    }
    Ok(())
}

fn role_path(data_dir: &Path, manifest: Option<&Manifest>, role: &str, default: &str) -> PathBuf {
    let relative = manifest
        .and_then(|m| m.files.iter().find(|f| f.role == role))
        .map_or(default, |f| f.path.as_str());
    data_dir.join(relative)
}

fn load_json_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, GazetteerError> {
    let contents = std::fs::read_to_string(path).map_err(|e| GazetteerError::io(path, e))?;
    serde_json::from_str(&contents).map_err(|e| GazetteerError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

fn validate_sha(sha: &str, path: &str) -> Result<(), GazetteerError> {
    if sha.len() != 64 || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(GazetteerError::InvalidSha256 {
            path: PathBuf::from(path),
            message: "sha256 must be 64 hex characters".to_string(),
        });
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<(), GazetteerError> {
    if path.contains('\\') {
        return Err(GazetteerError::InvalidPath {
            path: PathBuf::from(path),
            message: "manifest path must use '/' separators".to_string(),
        });
    }

    let p = PathBuf::from(path);
    if p.is_absolute() {
        return Err(GazetteerError::InvalidPath {
            path: p,
            message: "manifest path must be relative".to_string(),
        });
    }

    for c in p.components() {
        if matches!(c, Component::ParentDir) {
            return Err(GazetteerError::InvalidPath {
                path: PathBuf::from(path),
                message: "manifest path must not traverse out of the data directory".to_string(),
            });
        }
    }

    Ok(())
}
