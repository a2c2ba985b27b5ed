//! nativecall - load a native shared library and call its exports
//!
//! Main CLI entry point. With no subcommand it runs the demo sequence
//! against `build/mylib` using the platform's naming convention.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nativecall::config::NativecallConfig;
use nativecall::demo;
use nativecall::exports::{self, MyLib};
use nativecall::ffi::{LibraryLoader, Platform};
use nativecall::logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nativecall")]
#[command(version)]
#[command(about = "Call functions in a native shared library", long_about = None)]
struct Cli {
    /// Config file (default: nearest nativecall.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the declared export table
    Exports {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the path the library resolves to
    Resolve {
        /// Platform identifier (win32, linux, darwin); defaults to this host
        #[arg(long)]
        platform: Option<String>,

        #[command(flatten)]
        library: LibraryArgs,
    },

    /// Load the library and call every export (default)
    Run {
        #[command(flatten)]
        library: LibraryArgs,

        /// Seed for the sample array
        #[arg(long)]
        seed: Option<u64>,

        /// Number of floats passed to test_array
        #[arg(long)]
        array_len: Option<usize>,

        /// Print a JSON report after the native output
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args, Default)]
struct LibraryArgs {
    /// Directory holding the shared library
    #[arg(long)]
    lib_dir: Option<PathBuf>,

    /// Library name without prefix or extension
    #[arg(long)]
    lib_name: Option<String>,
}

impl LibraryArgs {
    fn apply(self, config: &mut NativecallConfig) {
        if let Some(dir) = self.lib_dir {
            config.library.dir = dir;
        }
        if let Some(name) = self.lib_name {
            config.library.name = name;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Some(Commands::Exports { json }) => cmd_exports(json),
        Some(Commands::Resolve { platform, library }) => {
            cmd_resolve(config, platform.as_deref(), library)
        }
        Some(Commands::Run {
            library,
            seed,
            array_len,
            json,
        }) => cmd_run(config, library, seed, array_len, json),
        None => cmd_run(config, LibraryArgs::default(), None, None, false),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<NativecallConfig> {
    match path {
        Some(path) => NativecallConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => NativecallConfig::load_from_cwd().context("Failed to load nativecall.toml"),
    }
}

fn cmd_exports(json: bool) -> Result<()> {
    let table = exports::export_table()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        for sig in &table {
            println!("{}", sig);
        }
    }
    Ok(())
}

fn cmd_resolve(
    mut config: NativecallConfig,
    platform: Option<&str>,
    library: LibraryArgs,
) -> Result<()> {
    library.apply(&mut config);
    let platform = match platform {
        Some(id) => Platform::from_identifier(id)?,
        None => Platform::current()?,
    };
    let loader = LibraryLoader::for_platform(&config.library.dir, &config.library.name, platform);
    println!("{}", loader.resolve().display());
    Ok(())
}

fn cmd_run(
    mut config: NativecallConfig,
    library: LibraryArgs,
    seed: Option<u64>,
    array_len: Option<usize>,
    json: bool,
) -> Result<()> {
    library.apply(&mut config);
    if seed.is_some() {
        config.demo.seed = seed;
    }
    if let Some(len) = array_len {
        config.demo.array_len = len;
    }

    let loader = LibraryLoader::new(&config.library.dir, &config.library.name)?;
    let native = loader.load()?;
    let lib = MyLib::bind(&native)?;

    let report = demo::run(&lib, &config.demo)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    drop(lib);
    native.close()?;
    Ok(())
}
