//! Kiln - CLI

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use kiln::build::{Pipeline, Unit};
use kiln::project::Workspace;
use kiln::util::logger::{self, LogLevel};
use kiln::{load_session, load_tree, optimize_file, NAME, VERSION};

/// Peephole optimizer and build permutation engine
#[derive(Parser, Debug)]
#[command(name = "kiln")]
#[command(author = "Kiln Team")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the permutations of a project
    Permutations {
        /// Project directory
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,
    },

    /// Print the runtime export of a project's fields
    Export {
        /// Project directory
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,
    },

    /// Optimize a JSON syntax tree
    Optimize {
        /// Tree file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Maximum number of passes
        #[arg(short, long, default_value_t = 1)]
        passes: usize,

        /// Print the optimized tree as JSON instead of source
        #[arg(long)]
        json: bool,
    },

    /// Optimize units once per permutation
    Build {
        /// Project directory
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,

        /// JSON syntax tree of a compilation unit
        #[arg(short, long = "unit", value_name = "FILE", required = true)]
        units: Vec<PathBuf>,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_with_level(args.log_level.or_verbose(args.verbose));

    match args.command {
        Commands::Permutations { dir } => {
            let session = load_session(&dir)?;
            let permutations = session.permutations();
            if permutations.is_empty() {
                println!("no variant fields");
            }
            for permutation in &permutations {
                println!("{}  {}", permutation.hash(), permutation);
            }
        }
        Commands::Export { dir } => {
            let session = load_session(&dir)?;
            match session.export_fields() {
                Some(table) => println!("{}", table),
                None => println!("no exportable fields"),
            }
        }
        Commands::Optimize { file, passes, json } => {
            let tree = optimize_file(&file, passes)?;
            if json {
                println!("{}", tree.to_json().context("Failed to serialize tree")?);
            } else {
                println!("{}", tree.to_source());
            }
        }
        Commands::Build { dir, units } => {
            let workspace = Workspace::load(&dir)
                .with_context(|| format!("Failed to load project: {}", dir.display()))?;
            let pipeline = Pipeline::from_workspace(&workspace)
                .with_context(|| format!("Invalid build configuration in {}", dir.display()))?;

            let units = units
                .iter()
                .map(|path| Ok(Unit::new(path.display().to_string(), load_tree(path)?)))
                .collect::<Result<Vec<_>>>()?;

            let mut failed = 0;
            for artifact in pipeline.run(&units) {
                println!("{}  {}", artifact.name, artifact.permutation);
                for unit in &artifact.units {
                    match &unit.result {
                        Ok(output) => println!("  ok    {} ({} pass(es))", unit.name, output.passes),
                        Err(err) => println!("  fail  {}: {}", unit.name, err),
                    }
                }
                if let Err(err) = artifact.ensure_success() {
                    eprintln!("{}", err);
                    failed += 1;
                }
            }
            if failed > 0 {
                bail!("{} artifact(s) had failing units", failed);
            }
        }
        Commands::Version => {
            println!("{} {}", NAME, VERSION);
        }
    }

    Ok(())
}
