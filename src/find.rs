// Copyright (C) 2026 by GiGa infosystems

//! Locate the project files below a directory & the `packages.config` next to each of them, see
//! [`find_project_files`].

use crate::compare::group_first_seen;
use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::{Result, eyre::bail};
use itertools::Itertools;
use tracing::warn;
use walkdir::WalkDir;

/// A discovered project & the path to the `packages.config` sitting next to its project file
///
/// `packages_config` is [`None`] if the project's directory has no `packages.config`; such a
/// project participates in the analyses with zero package references.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ProjectFile {
    /// The name of the project (the file stem of its `.csproj`)
    pub project_name: String,
    pub packages_config: Option<Utf8PathBuf>,
}

/// Recursively find one project per directory below `root`.
///
/// Directories containing more than one `.csproj` are skipped with a warning, as there is no way
/// to tell which project a `packages.config` in such a directory belongs to. The walk is sorted
/// by file name, so the returned order (and with it the universe order of the analyses) is
/// deterministic.
pub fn find_project_files(root: &Utf8Path) -> Result<Vec<ProjectFile>> {
    if !root.is_dir() {
        bail!("{root} does not exist or is not a directory");
    }

    let mut project_files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(path) = Utf8Path::from_path(entry.path()) else {
            warn!("Skipping {:?} because it is not valid UTF-8", entry.path());
            continue;
        };

        if path.extension() == Some("csproj") {
            project_files.push(path.to_owned());
        }
    }

    let by_directory = group_first_seen(project_files, |path| {
        path.parent().expect("a found file has a parent").to_owned()
    });

    let mut projects = Vec::new();
    for (directory, files) in by_directory {
        match files.into_iter().exactly_one() {
            Ok(project_file) => projects.push(project_for_file(&project_file)),
            Err(_) => {
                warn!("Skipping {directory} because it contains multiple project files");
            }
        }
    }

    Ok(projects)
}

fn project_for_file(project_file: &Utf8Path) -> ProjectFile {
    let project_name = project_file
        .file_stem()
        .expect("only files with a `.csproj` extension get collected")
        .to_owned();

    let packages_config = project_file
        .parent()
        .expect("a found file has a parent")
        .join("packages.config");

    ProjectFile {
        project_name,
        packages_config: packages_config.is_file().then_some(packages_config),
    }
}
