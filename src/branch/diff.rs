//! Set differences and version upgrades between two branches
//!
//! All operations compare packages of the same architecture only and return
//! references into the input collections, ordered by architecture and then by
//! name as the collections were built.

use std::cmp::Ordering;

use tracing::debug;

use crate::branch::types::{Package, PackageCollection};

/// Kind of report computed between a left and a right branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    /// Packages of the left branch missing from the right one
    LeftOnly,
    /// Packages of the right branch missing from the left one
    RightOnly,
    /// Packages of the left branch with a newer version than in the right one
    Upgraded,
}

impl DiffKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffKind::LeftOnly => "left_only",
            DiffKind::RightOnly => "right_only",
            DiffKind::Upgraded => "upgraded",
        }
    }

    pub fn run<'a>(
        &self,
        left: &'a PackageCollection,
        right: &'a PackageCollection,
    ) -> Vec<&'a Package> {
        match self {
            DiffKind::LeftOnly => left_only(left, right),
            DiffKind::RightOnly => right_only(left, right),
            DiffKind::Upgraded => upgraded(left, right),
        }
    }
}

/// Packages of `left` whose name is absent from `right` for the same architecture
pub fn left_only<'a>(left: &'a PackageCollection, right: &PackageCollection) -> Vec<&'a Package> {
    let result: Vec<&Package> = left
        .iter()
        .flat_map(|(arch, packages)| {
            packages.values().filter(move |package| {
                let missing = !right.contains(arch, &package.name);
                if missing {
                    debug!("{} is missing from {}", package.nevra(), right.branch());
                }
                missing
            })
        })
        .collect();

    debug!(
        "{} packages of {} are missing from {}",
        result.len(),
        left.branch(),
        right.branch()
    );

    result
}

/// Packages of `right` whose name is absent from `left` for the same architecture
pub fn right_only<'a>(left: &PackageCollection, right: &'a PackageCollection) -> Vec<&'a Package> {
    left_only(right, left)
}

/// Packages of `left` that exist in `right` with a strictly lower version
pub fn upgraded<'a>(left: &'a PackageCollection, right: &PackageCollection) -> Vec<&'a Package> {
    let result: Vec<&Package> = left
        .iter()
        .flat_map(|(arch, packages)| {
            packages.values().filter(move |package| {
                if !right.contains(arch, &package.name) {
                    return false;
                }
                // A name without a package entry cannot be compared
                let Some(other) = right.get(arch, &package.name) else {
                    return false;
                };
                if package.cmp_evr(other) != Ordering::Greater {
                    return false;
                }
                debug!("{} is newer than {}", package.nevra(), other.nevra());
                true
            })
        })
        .collect();

    debug!(
        "{} packages of {} are newer than in {}",
        result.len(),
        left.branch(),
        right.branch()
    );

    result
}
