// Copyright (C) 2026 by GiGa infosystems

//! `nuget-depcheck` is an application that inventories the NuGet `packages.config` references
//! declared by the projects of a repository and runs analyses over them.
//!
//! The order of operations is:
//! * Locate one project (and its `packages.config`, if any) per directory with
//!   [`find::find_project_files`]
//! * Parse each `packages.config` into a [`project::ProjectPackages`] with
//!   [`parse::parse_packages_config`]
//! * Either report divergent package usage across projects with [`compare::compare`], or
//! * Plan the order in which projects depending on a target project should be upgraded with
//!   [`upgrade::plan_upgrade_order`]
//!
//! Package references whose name matches another project's name are interpreted as
//! intra-repository dependency edges; everything else is treated as an external package. Version
//! strings are opaque here, no semver semantics are applied.

use serde::Serialize;

/// A target framework moniker (such as `net46`)
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize)]
#[serde(transparent)]
pub struct TargetFramework(pub String);

pub mod compare;
pub mod find;
pub mod parse;
pub mod project;
pub mod upgrade;
