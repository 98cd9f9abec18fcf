//! Package records and per-branch package collections

use std::cmp::Ordering;
use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::version::rpm;

/// A binary package as exported for one branch
///
/// The serialized form uses the export API field names, so the same type is
/// used for reading exports and writing reports. Missing fields take their
/// default value and unknown fields (e.g. `disttag`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Package {
    pub name: String,
    pub epoch: u64,
    pub version: String,
    pub release: String,
    pub arch: String,
    #[serde(rename = "buildtime")]
    pub build_time: i64,
    #[serde(rename = "source")]
    pub source_name: String,
}

impl Package {
    /// Compare `(epoch, version, release)` of two packages
    pub fn cmp_evr(&self, other: &Package) -> Ordering {
        rpm::compare(
            self.epoch,
            &self.version,
            &self.release,
            other.epoch,
            &other.version,
            &other.release,
        )
    }

    /// Returns `name-[epoch:]version-release.arch`
    pub fn nevra(&self) -> String {
        if self.epoch == 0 {
            format!("{}-{}-{}.{}", self.name, self.version, self.release, self.arch)
        } else {
            format!(
                "{}-{}:{}-{}.{}",
                self.name, self.epoch, self.version, self.release, self.arch
            )
        }
    }
}

/// Response body of the branch export endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchExport {
    #[serde(default)]
    pub request_args: serde_json::Value,
    #[serde(default)]
    pub length: Option<usize>,
    pub packages: Vec<Package>,
}

/// Packages of one branch keyed by architecture, then by name
///
/// Iteration follows the order in which architectures and names were first
/// seen. A later record with the same `(arch, name)` replaces the earlier one
/// in place.
#[derive(Debug, Clone, Default)]
pub struct PackageCollection {
    branch: String,
    packages: IndexMap<String, IndexMap<String, Package>>,
    names: IndexMap<String, HashSet<String>>,
}

impl PackageCollection {
    pub fn from_packages(
        branch: impl Into<String>,
        packages: impl IntoIterator<Item = Package>,
    ) -> Self {
        let mut collection = Self {
            branch: branch.into(),
            ..Self::default()
        };

        for package in packages {
            collection
                .names
                .entry(package.arch.clone())
                .or_default()
                .insert(package.name.clone());
            collection
                .packages
                .entry(package.arch.clone())
                .or_default()
                .insert(package.name.clone(), package);
        }

        collection
    }

    pub fn from_export(branch: impl Into<String>, export: BranchExport) -> Self {
        Self::from_packages(branch, export.packages)
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn architectures(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    /// Iterate `(arch, name -> package)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexMap<String, Package>)> {
        self.packages
            .iter()
            .map(|(arch, packages)| (arch.as_str(), packages))
    }

    /// Packages of one architecture, empty for an unknown one
    pub fn packages(&self, arch: &str) -> impl Iterator<Item = &Package> {
        self.packages
            .get(arch)
            .into_iter()
            .flat_map(|packages| packages.values())
    }

    pub fn get(&self, arch: &str, name: &str) -> Option<&Package> {
        self.packages.get(arch)?.get(name)
    }

    /// Name-set membership test. An unknown architecture has no names.
    pub fn contains(&self, arch: &str, name: &str) -> bool {
        self.names
            .get(arch)
            .is_some_and(|names| names.contains(name))
    }

    /// Total number of packages across all architectures
    pub fn len(&self) -> usize {
        self.packages.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
