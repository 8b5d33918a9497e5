// apiregister-gen entry point
use anyhow::Result;
use clap::Parser;

use apireg_cli::{logging, run_generate, run_plan, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Generate(args) => {
            let report = run_generate(&args, &cwd)?;
            if report.files.is_empty() {
                println!("No API resources found; nothing generated");
            } else {
                println!(
                    "Generated {} file(s) under {}",
                    report.files.len(),
                    report.output_base.display()
                );
            }
        }
        Commands::Plan { args, json } => {
            print!("{}", run_plan(&args, json, &cwd)?);
        }
    }

    Ok(())
}
