// Copyright (C) 2026 by GiGa infosystems

//! Parse `packages.config` files into [`ProjectPackages`], see [`parse_packages_config`].
//!
//! Parsing never fails: a missing, empty, unreadable or malformed `packages.config` degrades to
//! a project with zero package references (with a warning), so the analyses only ever see
//! well-formed projects.

use crate::TargetFramework;
use crate::find::ProjectFile;
use crate::project::{PackageReference, ProjectPackages};
use std::fs;
use tracing::warn;

/// Parse the `packages.config` of a discovered project
pub fn parse_packages_config(project_file: &ProjectFile) -> ProjectPackages {
    let Some(ref path) = project_file.packages_config else {
        return empty(&project_file.project_name);
    };

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            warn!("Config file located at {path} could not be read - {err}");
            return empty(&project_file.project_name);
        }
    };

    parse_packages_contents(&project_file.project_name, path.as_str(), &contents)
}

/// Parse `packages.config` contents for a project.
///
/// The expected shape is `<packages><package id="…" version="…" targetFramework="…"/>…</packages>`;
/// `package` elements are collected anywhere below the root, in document order. A `package`
/// element missing one of the three attributes discards the whole file, matching the
/// all-or-nothing handling of the other malformed cases.
pub fn parse_packages_contents(project_name: &str, path: &str, contents: &str) -> ProjectPackages {
    if contents.is_empty() {
        warn!("Config file located at {path} is empty");
        return empty(project_name);
    }

    let document = match roxmltree::Document::parse(contents) {
        Ok(document) => document,
        Err(err) => {
            warn!("Config file located at {path} contains invalid XML - {err}");
            return empty(project_name);
        }
    };

    let mut packages = Vec::new();
    for node in document
        .descendants()
        .filter(|node| node.has_tag_name("package"))
    {
        let (Some(id), Some(version), Some(target_framework)) = (
            node.attribute("id"),
            node.attribute("version"),
            node.attribute("targetFramework"),
        ) else {
            warn!(
                "Config file located at {path} contains package elements with missing id, \
                 version, or targetFramework attributes"
            );
            return empty(project_name);
        };

        packages.push(PackageReference {
            name: id.to_owned(),
            version: version.to_owned(),
            target_framework: TargetFramework(target_framework.to_owned()),
        });
    }

    ProjectPackages {
        project_name: project_name.to_owned(),
        packages,
    }
}

fn empty(project_name: &str) -> ProjectPackages {
    ProjectPackages {
        project_name: project_name.to_owned(),
        packages: Vec::new(),
    }
}
