use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use resbuild::config::{DEFAULT_CONFIG_TEMPLATE, load_settings};
use resbuild::{BuildConfig, ConfigBuilder, SystemRunner, Toolchain, ToolPaths, resolve_tools, run};
use resbuild_cli::{CliOverrides, ReportFormat, logging, render_json, render_text};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Options shared by commands that read the configuration.
#[derive(clap::Args, Debug, Clone)]
struct ConfigArgs {
    /// Configuration file (TOML or XML app settings). Defaults to resbuild.toml or App.config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the SDK directory holding ResGen.exe and al.exe
    #[arg(long)]
    sdk_path: Option<PathBuf>,

    /// Path to the resource compiler
    #[arg(long)]
    resgen_path: Option<PathBuf>,

    /// Path to the class compiler
    #[arg(long)]
    csc_path: Option<PathBuf>,

    /// Path to the assembly linker
    #[arg(long)]
    al_path: Option<PathBuf>,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the default resource library and every culture satellite.
    Build {
        #[command(flatten)]
        settings: ConfigArgs,

        /// Root namespace of the default library
        #[arg(short, long)]
        namespace: Option<String>,

        /// Output root for compiled libraries
        #[arg(short = 'o', long)]
        resource_path: Option<PathBuf>,

        /// Root of the raw resource sources (defaults to the output root)
        #[arg(short, long)]
        source_path: Option<PathBuf>,

        /// Place the default library next to the output root (true) or inside it (false)
        #[arg(long)]
        main_at_root: Option<bool>,

        /// Do not fail when the default culture has no raw resources
        #[arg(long)]
        ignore_empty_default: bool,

        /// Summary format
        #[arg(long, value_enum, default_value = "text")]
        report: ReportFormat,
    },

    /// Check that the external tools can be found.
    Check {
        #[command(flatten)]
        settings: ConfigArgs,
    },

    /// Write a default resbuild.toml.
    Init {
        /// Where to write the file
        #[arg(default_value = "resbuild.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose, args.quiet);

    let result = match args.commands {
        Commands::Build {
            settings,
            namespace,
            resource_path,
            source_path,
            main_at_root,
            ignore_empty_default,
            report,
        } => {
            let overrides = CliOverrides {
                namespace,
                resource_path,
                source_path,
                main_at_root,
                ignore_empty_default,
                ..tool_overrides(&settings)
            };
            run_build(&settings, overrides, report)
        }
        Commands::Check { settings } => run_check(&settings),
        Commands::Init { path, force } => run_init(&path, force),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Args::command(), "resbuild", &mut io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn tool_overrides(config: &ConfigArgs) -> CliOverrides {
    CliOverrides {
        sdk_path: config.sdk_path.clone(),
        resgen_path: config.resgen_path.clone(),
        csc_path: config.csc_path.clone(),
        al_path: config.al_path.clone(),
        ..CliOverrides::default()
    }
}

fn load_config(args: &ConfigArgs, overrides: &CliOverrides) -> Result<BuildConfig, resbuild::Error> {
    let cwd = std::env::current_dir()?;
    let file_settings = load_settings(args.config.as_deref(), &cwd)?;
    let config = ConfigBuilder::new()
        .apply(&file_settings)
        .apply(&overrides.to_settings())
        .build();
    debug!(?config, "loaded configuration");
    Ok(config)
}

fn run_build(
    args: &ConfigArgs,
    overrides: CliOverrides,
    report: ReportFormat,
) -> Result<(), String> {
    let config = load_config(args, &overrides).map_err(|e| e.to_string())?;
    let tools = resolve_tools(&config.tools).map_err(|e| e.to_string())?;

    let runner = SystemRunner::new();
    let summary = run(&config, Toolchain::new(&tools, &runner)).map_err(|e| e.to_string())?;

    match report {
        ReportFormat::Text => print!("{}", render_text(&summary)),
        ReportFormat::Json => {
            let json = render_json(&summary).map_err(|e| e.to_string())?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn run_check(args: &ConfigArgs) -> Result<(), String> {
    let config = load_config(args, &tool_overrides(args)).map_err(|e| e.to_string())?;
    let ToolPaths {
        sdk_dir,
        resgen,
        csc,
        al,
    } = resolve_tools(&config.tools).map_err(|e| e.to_string())?;
    println!("✅ SDK:               {}", sdk_dir.display());
    println!("✅ Resource compiler: {}", resgen.display());
    println!("✅ Class compiler:    {}", csc.display());
    println!("✅ Assembly linker:   {}", al.display());
    Ok(())
}

fn run_init(path: &Path, force: bool) -> Result<(), String> {
    if path.exists() && !force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE)
        .map_err(|e| format!("Error writing {}: {}", path.display(), e))?;
    println!("✅ Wrote default configuration to {}", path.display());
    Ok(())
}
