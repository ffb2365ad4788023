// Copyright (C) 2026 by GiGa infosystems

//! Find packages that are referenced divergently across projects, see [`compare`].

use crate::TargetFramework;
use crate::project::{PackageReference, ProjectPackages};
use serde::Serialize;

/// Group items by a key, keeping both the groups and the items within each group in first-seen
/// order.
///
/// Keys are compared structurally, nothing is hashed. This is quadratic in the number of distinct
/// keys, which is fine for the handful of packages and projects a repository has.
pub(crate) fn group_first_seen<K: PartialEq, V>(
    items: impl IntoIterator<Item = V>,
    mut key: impl FnMut(&V) -> K,
) -> Vec<(K, Vec<V>)> {
    let mut groups: Vec<(K, Vec<V>)> = Vec::new();

    for item in items {
        let item_key = key(&item);
        match groups.iter_mut().find(|(existing, _)| *existing == item_key) {
            Some((_, group)) => group.push(item),
            None => groups.push((item_key, vec![item])),
        }
    }

    groups
}

/// A target framework a package is referenced with, and the projects referencing it that way
///
/// `project_names` is a duplicate-free list in first-seen order.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct FrameworkDivergence<'a> {
    pub target_framework: &'a TargetFramework,
    pub project_names: Vec<&'a str>,
}

/// A version a package is referenced at, and the projects referencing it that way
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct VersionDivergence<'a> {
    pub version: &'a str,
    pub project_names: Vec<&'a str>,
}

/// The divergent target frameworks & versions of a single package
///
/// A dimension's list is empty when all referencing projects agree on that dimension; reports
/// with both dimensions empty are never emitted by [`compare`].
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct PackageDivergences<'a> {
    pub package_name: &'a str,
    pub framework_divergences: Vec<FrameworkDivergence<'a>>,
    pub version_divergences: Vec<VersionDivergence<'a>>,
}

/// One (project, reference) pair of the flattened universe
type Usage<'a> = (&'a str, &'a PackageReference);

/// Group the usages of one package by a dimension of the reference.
///
/// Returns one group per distinct value with the duplicate-free project names in first-seen
/// order, or nothing at all if the dimension doesn't diverge (fewer than two distinct values).
fn divergent_groups<'a, K: PartialEq>(
    usages: &[Usage<'a>],
    dimension: impl FnMut(&Usage<'a>) -> K,
) -> Vec<(K, Vec<&'a str>)> {
    let groups = group_first_seen(usages.iter().copied(), dimension);

    if groups.len() < 2 {
        return Vec::new();
    }

    groups
        .into_iter()
        .map(|(value, usages)| {
            let mut project_names = Vec::new();
            for (project_name, _) in usages {
                if !project_names.contains(&project_name) {
                    project_names.push(project_name);
                }
            }
            (value, project_names)
        })
        .collect()
}

/// Returns one [`PackageDivergences`] report for every package that is referenced at more than
/// one version or with more than one target framework across `projects`.
///
/// Reports, the divergent values within a report and the project names within a value all appear
/// in first-seen order of the input, so the output is deterministic for a deterministic universe.
/// Packages referenced by fewer than two projects never diverge and are skipped outright.
pub fn compare<'a>(projects: &'a [ProjectPackages]) -> Vec<PackageDivergences<'a>> {
    let usages = projects.iter().flat_map(|project| {
        project
            .packages
            .iter()
            .map(move |package| (project.project_name.as_str(), package))
    });

    group_first_seen(usages, |(_, package): &Usage<'a>| package.name.as_str())
        .into_iter()
        .filter(|(_, usages)| usages.len() > 1)
        .filter_map(|(package_name, usages)| {
            let framework_divergences =
                divergent_groups(&usages, |(_, package)| &package.target_framework)
                    .into_iter()
                    .map(|(target_framework, project_names)| FrameworkDivergence {
                        target_framework,
                        project_names,
                    })
                    .collect::<Vec<_>>();

            let version_divergences =
                divergent_groups(&usages, |(_, package)| package.version.as_str())
                    .into_iter()
                    .map(|(version, project_names)| VersionDivergence {
                        version,
                        project_names,
                    })
                    .collect::<Vec<_>>();

            if framework_divergences.is_empty() && version_divergences.is_empty() {
                return None;
            }

            Some(PackageDivergences {
                package_name,
                framework_divergences,
                version_divergences,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(name: &str, version: &str, framework: &str) -> PackageReference {
        PackageReference {
            name: name.to_owned(),
            version: version.to_owned(),
            target_framework: TargetFramework(framework.to_owned()),
        }
    }

    fn project(name: &str, packages: Vec<PackageReference>) -> ProjectPackages {
        ProjectPackages {
            project_name: name.to_owned(),
            packages,
        }
    }

    #[test]
    fn returns_empty_results_for_empty_input() {
        assert!(compare(&[]).is_empty());
    }

    #[test]
    fn returns_empty_results_for_single_project_input() {
        let projects = [project(
            "SampleProject",
            vec![reference("Nuget", "1", "net46")],
        )];

        assert!(compare(&projects).is_empty());
    }

    #[test]
    fn returns_empty_results_if_projects_have_no_differences() {
        let projects = [
            project("SampleProject1", vec![reference("Nuget1", "1.0.0", "net46")]),
            project("SampleProject2", vec![reference("Nuget2", "1.1.1", "net46")]),
        ];

        assert!(compare(&projects).is_empty());
    }

    #[test]
    fn identical_references_across_projects_are_suppressed() {
        let projects = [
            project("SampleProject1", vec![reference("Nuget1", "1.0.0", "net46")]),
            project("SampleProject2", vec![reference("Nuget1", "1.0.0", "net46")]),
        ];

        assert!(compare(&projects).is_empty());
    }

    #[test]
    fn returns_version_differences() {
        let projects = [
            project("SampleProject1", vec![reference("Nuget1", "1.0.0", "net46")]),
            project("SampleProject2", vec![reference("Nuget1", "1.1.1", "net46")]),
        ];

        let actual = compare(&projects);

        assert_eq!(
            actual,
            [PackageDivergences {
                package_name: "Nuget1",
                framework_divergences: vec![],
                version_divergences: vec![
                    VersionDivergence {
                        version: "1.0.0",
                        project_names: vec!["SampleProject1"],
                    },
                    VersionDivergence {
                        version: "1.1.1",
                        project_names: vec!["SampleProject2"],
                    },
                ],
            }]
        );
    }

    #[test]
    fn returns_target_framework_differences() {
        let projects = [
            project("SampleProject1", vec![reference("Nuget1", "1.0.0", "net46")]),
            project("SampleProject2", vec![reference("Nuget1", "1.0.0", "net45")]),
        ];

        let actual = compare(&projects);

        assert_eq!(
            actual,
            [PackageDivergences {
                package_name: "Nuget1",
                framework_divergences: vec![
                    FrameworkDivergence {
                        target_framework: &TargetFramework("net46".to_owned()),
                        project_names: vec!["SampleProject1"],
                    },
                    FrameworkDivergence {
                        target_framework: &TargetFramework("net45".to_owned()),
                        project_names: vec!["SampleProject2"],
                    },
                ],
                version_divergences: vec![],
            }]
        );
    }

    #[test]
    fn divergent_values_and_projects_keep_first_seen_order() {
        let projects = [
            project("P1", vec![reference("Nuget1", "2.0.0", "net46")]),
            project("P2", vec![reference("Nuget1", "1.0.0", "net46")]),
            project("P3", vec![reference("Nuget1", "2.0.0", "net46")]),
        ];

        let actual = compare(&projects);

        assert_eq!(actual.len(), 1);
        assert_eq!(
            actual[0].version_divergences,
            [
                VersionDivergence {
                    version: "2.0.0",
                    project_names: vec!["P1", "P3"],
                },
                VersionDivergence {
                    version: "1.0.0",
                    project_names: vec!["P2"],
                },
            ]
        );
    }

    #[test]
    fn reports_both_dimensions_independently() {
        let projects = [
            project("P1", vec![reference("Nuget1", "1.0.0", "net46")]),
            project("P2", vec![reference("Nuget1", "1.1.1", "net45")]),
        ];

        let actual = compare(&projects);

        assert_eq!(actual.len(), 1);
        assert_eq!(actual[0].framework_divergences.len(), 2);
        assert_eq!(actual[0].version_divergences.len(), 2);
    }

    #[test]
    fn reports_appear_in_first_seen_package_order() {
        let projects = [
            project(
                "P1",
                vec![
                    reference("NugetB", "1.0.0", "net46"),
                    reference("NugetA", "1.0.0", "net46"),
                ],
            ),
            project(
                "P2",
                vec![
                    reference("NugetA", "2.0.0", "net46"),
                    reference("NugetB", "2.0.0", "net46"),
                ],
            ),
        ];

        let names = compare(&projects)
            .iter()
            .map(|divergences| divergences.package_name)
            .collect::<Vec<_>>();

        assert_eq!(names, ["NugetB", "NugetA"]);
    }
}
