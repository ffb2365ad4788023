// Copyright (C) 2026 by GiGa infosystems

use std::path::PathBuf;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::bail};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use nuget_depcheck::compare::compare;
use nuget_depcheck::find::find_project_files;
use nuget_depcheck::parse::parse_packages_config;
use nuget_depcheck::project::ProjectPackages;
use nuget_depcheck::upgrade::plan_upgrade_order;

enum TemplateContext {
    Minijinja {
        path: PathBuf,
        jinja: Box<minijinja::Environment<'static>>,
    },
    OnlyDefaults,
}

impl TemplateContext {
    fn init(path: Option<PathBuf>) -> Result<Self> {
        match path {
            None => Ok(TemplateContext::OnlyDefaults),
            Some(path) => {
                if !path.is_dir() {
                    bail!("Template directory doesn't exist");
                }

                let mut jinja = minijinja::Environment::new();
                jinja.set_loader(minijinja::path_loader(&path));

                Ok(TemplateContext::Minijinja {
                    path,
                    jinja: Box::new(jinja),
                })
            }
        }
    }

    fn render(&self, name: &str, ctx: &impl Serialize) -> Result<Option<String>> {
        match self {
            TemplateContext::Minijinja { path, jinja } if path.join(name).is_file() => {
                Ok(Some(jinja.get_template(name)?.render(ctx)?))
            }
            TemplateContext::Minijinja { .. } | TemplateContext::OnlyDefaults => Ok(None),
        }
    }

    fn render_output(&self, name: &str, ctx: &impl Serialize) -> Result<String> {
        match self.render(name, ctx)? {
            Some(out) => Ok(out),
            None => Ok(serde_json::to_string_pretty(ctx)?),
        }
    }
}

struct OutputConfig {
    templated_output: bool,
    template_ctx: TemplateContext,
}

impl OutputConfig {
    const DIFFERENCES: &str = "differences.jinja";
    const UPGRADE_ORDER: &str = "upgrade_order.jinja";

    fn output(&self, name: &str, ctx: &impl Serialize) -> Result<()> {
        if self.templated_output {
            println!("{}", self.template_ctx.render_output(name, ctx)?);
            Ok(())
        } else {
            output_json(ctx)
        }
    }
}

fn output_json(value: &impl Serialize) -> Result<()> {
    use std::io::{self, IsTerminal};

    if io::stdout().is_terminal() {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", serde_json::to_string(value)?);
    }

    Ok(())
}

/// This program analyses the NuGet `packages.config` references of all projects found below a
/// directory: it either reports packages that are referenced divergently (different versions or
/// target frameworks) across projects, or plans the order in which the projects that transitively
/// depend on a target project should be upgraded.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
    /// Produce templated output (or prettified JSON for missing templates)
    #[arg(short, long, requires("template_path"))]
    templated: bool,
    /// The path to a directory containing minijinja templates
    ///
    /// The template names are:
    /// * `differences.jinja`, receiving `differences` (the list of divergence reports)
    /// * `upgrade_order.jinja`, receiving `target_project` & `upgrade_order` (a list of project names)
    ///
    /// The default for a missing template is a prettified JSON dump of the same context the
    /// template would get.
    #[arg(short = 'T', long, verbatim_doc_comment)]
    template_path: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report packages referenced at different versions or with different target frameworks
    /// across projects
    Differences {
        /// The directory to analyse
        directory: Utf8PathBuf,
    },
    /// Plan the order in which the projects transitively depending on a target project should be
    /// upgraded
    UpgradeOrder {
        /// The directory to analyse
        directory: Utf8PathBuf,
        /// The name of the project the upgrade starts from
        target_project: String,
    },
}

/// Find & parse all projects below `directory` into the universe for the analyses
fn load_universe(directory: &Utf8Path) -> Result<Vec<ProjectPackages>> {
    let project_files = find_project_files(directory)?;
    Ok(project_files.iter().map(parse_packages_config).collect())
}

#[derive(Serialize)]
struct UpgradeOrderOutput<'a> {
    target_project: &'a str,
    upgrade_order: Vec<&'a str>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let output = OutputConfig {
        templated_output: args.templated,
        template_ctx: TemplateContext::init(args.template_path)?,
    };

    match args.command {
        Command::Differences { directory } => {
            let universe = load_universe(&directory)?;
            let differences = compare(&universe);

            let ctx = minijinja::context! {
                differences => minijinja::Value::from_serialize(&differences),
            };
            output.output(OutputConfig::DIFFERENCES, &ctx)?;
        }
        Command::UpgradeOrder {
            directory,
            target_project,
        } => {
            let universe = load_universe(&directory)?;

            let Some(order) = plan_upgrade_order(&universe, &target_project) else {
                tracing::error!("{target_project} not found");
                std::process::exit(1);
            };

            let ctx = UpgradeOrderOutput {
                target_project: &target_project,
                upgrade_order: order
                    .iter()
                    .map(|project| project.project_name.as_str())
                    .collect(),
            };
            output.output(OutputConfig::UPGRADE_ORDER, &ctx)?;
        }
    }

    Ok(())
}
