// Copyright (C) 2026 by GiGa infosystems

//! The parsed in-memory model: package references & the per-project groupings that form the
//! universe of one analysis run

use crate::TargetFramework;
use serde::Serialize;
use std::fmt;

/// A single declared package reference inside a project's `packages.config`
///
/// Equality is structural over all three fields. Versions are opaque strings, there is no semver
/// interpretation anywhere in this crate. This type is deliberately not [`Hash`]: grouping by
/// value happens via the individual string fields, never by hashing the whole reference.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct PackageReference {
    pub name: String,
    pub version: String,
    pub target_framework: TargetFramework,
}

impl fmt::Debug for PackageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PackageReference({self})")
    }
}

impl fmt::Display for PackageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{} {} ({})\"",
            self.name, self.version, self.target_framework.0
        )
    }
}

/// A project's name & its package references, in declaration order
///
/// The collection of all [`ProjectPackages`] handed to an analysis is "the universe": exactly one
/// instance per project name. The declaration order of `packages` is preserved through all
/// outputs.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct ProjectPackages {
    pub project_name: String,
    pub packages: Vec<PackageReference>,
}

impl ProjectPackages {
    /// Returns whether this project declares a package reference with the given name
    pub fn references(&self, name: &str) -> bool {
        self.packages.iter().any(|package| package.name == name)
    }

    /// The projects in `universe` this project directly depends on
    ///
    /// An edge exists iff one of this project's package references is named like the other
    /// project. The universe's order is preserved.
    pub fn immediate_dependencies<'a>(
        &'a self,
        universe: &'a [ProjectPackages],
    ) -> impl Iterator<Item = &'a ProjectPackages> {
        universe
            .iter()
            .filter(|project| self.references(&project.project_name))
    }

    /// The projects in `universe` that directly depend on this project, in universe order
    pub fn immediate_dependents<'a>(
        &'a self,
        universe: &'a [ProjectPackages],
    ) -> impl Iterator<Item = &'a ProjectPackages> {
        universe
            .iter()
            .filter(|project| project.references(&self.project_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(name: &str, dependencies: &[&str]) -> ProjectPackages {
        ProjectPackages {
            project_name: name.to_owned(),
            packages: dependencies
                .iter()
                .map(|dependency| PackageReference {
                    name: (*dependency).to_owned(),
                    version: "1.0.0".to_owned(),
                    target_framework: TargetFramework("net46".to_owned()),
                })
                .collect(),
        }
    }

    #[test]
    fn package_reference_equality_is_structural() {
        let reference = PackageReference {
            name: "Nuget1".to_owned(),
            version: "1.0.0".to_owned(),
            target_framework: TargetFramework("net46".to_owned()),
        };

        assert_eq!(reference, reference.clone());
        assert_ne!(
            reference,
            PackageReference {
                version: "1.1.1".to_owned(),
                ..reference.clone()
            }
        );
    }

    #[test]
    fn graph_relations_follow_reference_names() {
        let universe = vec![
            project("a", &["b", "External.Package"]),
            project("b", &[]),
            project("c", &["b"]),
        ];

        let dependencies = universe[0]
            .immediate_dependencies(&universe)
            .map(|project| project.project_name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(dependencies, ["b"]);

        let dependents = universe[1]
            .immediate_dependents(&universe)
            .map(|project| project.project_name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(dependents, ["a", "c"]);
    }
}
