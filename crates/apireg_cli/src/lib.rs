// apireg_cli - apiregister-gen command line (library interface for testing)
pub mod config;
pub mod emit;
pub mod header;
pub mod logging;
pub mod registration;
pub mod universe;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use apireg_gen::{
    load_or_fallback, GeneratorArgs, MarkerClassifier, PackagePlan, PackagePlanner, ParsedType,
    VersionOrdering,
};
use clap::{Args, Parser, Subcommand};

use crate::config::{ConfigLayer, Settings};
use crate::header::FileBoilerplate;
use crate::registration::RegistrationStubs;

#[derive(Parser)]
#[command(name = "apiregister-gen")]
#[command(about = "Generates API registration packages from annotated Go types")]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write one registration file per planned package
    Generate(PlanArgs),
    /// Print the planned packages without writing anything
    Plan {
        #[command(flatten)]
        args: PlanArgs,
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlanArgs {
    /// Type universe (JSON) produced by the Go type parser
    #[arg(short, long)]
    pub input_file: PathBuf,
    /// Config file (defaults to ./apireg.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Directory generated package paths are written under
    #[arg(short, long)]
    pub output_base: Option<PathBuf>,
    /// File name, without extension, of each generated file
    #[arg(long)]
    pub output_file_base_name: Option<String>,
    /// License header prepended to generated files
    #[arg(long)]
    pub go_header_file: Option<PathBuf>,
    /// Comment marker that flags a type as an API resource
    #[arg(long)]
    pub resource_marker: Option<String>,
    /// Version precedence policy: kube or lexical
    #[arg(long)]
    pub version_order: Option<VersionOrdering>,
}

impl PlanArgs {
    fn layer(&self) -> ConfigLayer {
        ConfigLayer {
            output_base: self.output_base.clone(),
            output_file_base_name: self.output_file_base_name.clone(),
            go_header_file: self.go_header_file.clone(),
            resource_marker: self.resource_marker.clone(),
            version_ordering: self.version_order,
        }
    }

    /// Defaults, then the config file, then flags. Relative paths are
    /// resolved against `cwd`.
    pub fn settings(&self, cwd: &Path) -> Result<Settings> {
        let config = self.config.as_ref().map(|path| cwd.join(path));
        let file = ConfigLayer::discover(config.as_deref(), cwd)?;
        let mut settings = Settings::resolve(file.merge(self.layer()))?;
        settings.output_base = cwd.join(&settings.output_base);
        settings.go_header_file = settings.go_header_file.map(|path| cwd.join(path));
        Ok(settings)
    }
}

pub fn build_planner(settings: &Settings) -> PackagePlanner {
    PackagePlanner::new(Box::new(RegistrationStubs))
        .with_classifier(Box::new(MarkerClassifier::new(settings.resource_marker.clone())))
        .with_version_order(Box::new(settings.version_ordering))
        .with_args(GeneratorArgs {
            output_file_base_name: settings.output_file_base_name.clone(),
            output_base: settings.output_base.display().to_string(),
        })
}

/// Load the universe and header, then plan. A topology error stops here,
/// before any generator runs.
pub fn plan_from_settings(
    settings: &Settings,
    input_file: &Path,
) -> Result<(Vec<ParsedType>, PackagePlan)> {
    let universe = universe::load_universe(input_file)?;
    let header = load_or_fallback(&FileBoilerplate::new(settings.go_header_file.clone()));
    let plan = build_planner(settings)
        .plan(&universe, header)
        .context("cannot lay out API packages")?;
    Ok((universe, plan))
}

#[derive(Debug)]
pub struct GenerateReport {
    pub output_base: PathBuf,
    pub files: Vec<PathBuf>,
}

pub fn run_generate(args: &PlanArgs, cwd: &Path) -> Result<GenerateReport> {
    let settings = args.settings(cwd)?;
    let (universe, plan) = plan_from_settings(&settings, &cwd.join(&args.input_file))?;
    let files = emit::emit(&plan, &universe, &settings.output_base)?;
    Ok(GenerateReport {
        output_base: settings.output_base,
        files,
    })
}

pub fn run_plan(args: &PlanArgs, json: bool, cwd: &Path) -> Result<String> {
    let settings = args.settings(cwd)?;
    let (universe, plan) = plan_from_settings(&settings, &cwd.join(&args.input_file))?;
    let entries = emit::plan_entries(&plan, &universe);
    if json {
        let mut rendered = serde_json::to_string_pretty(&entries)?;
        rendered.push('\n');
        Ok(rendered)
    } else {
        Ok(emit::render_plan_table(&entries))
    }
}
