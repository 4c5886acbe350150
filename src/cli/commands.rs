use crate::catalog::{load_catalog, ConstraintRegistry};
use crate::compiler::RouteTableCompiler;
use crate::config::CompilerConfig;
use crate::table::{RouteEntry, RouteTable};
use anyhow::Context;
use clap::{Parser, Subcommand};
use http::Method;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Command-line interface for waymark
#[derive(Parser, Debug)]
#[command(name = "waymark", version)]
#[command(about = "Compile handler catalogs into route tables", long_about = None)]
pub struct Cli {
    /// Compiler config file (TOML); WAYMARK_* variables override it
    #[arg(long, global = true, env = "WAYMARK_CONFIG")]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a catalog and print the resulting route table
    Compile {
        /// Path to the catalog file (YAML or JSON)
        #[arg(short, long)]
        catalog: PathBuf,

        /// Compile only this owner scope
        #[arg(short, long)]
        owner: Option<String>,

        /// Print the table as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Compile a catalog and show which route a request matches
    Route {
        /// Path to the catalog file (YAML or JSON)
        #[arg(short, long)]
        catalog: PathBuf,

        /// Request method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request path, e.g. /test/basic
        #[arg(short, long)]
        path: String,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<CompilerConfig> {
    let mut config = match path {
        Some(path) => CompilerConfig::from_toml_file(path)?,
        None => CompilerConfig::default(),
    };
    config.apply_env();
    Ok(config)
}

fn compile(
    catalog_path: &Path,
    owner: Option<&str>,
    config: CompilerConfig,
) -> anyhow::Result<(RouteTable, Vec<Arc<RouteEntry>>)> {
    // File catalogs can only name matchers the binary registers; it registers none.
    let catalog = load_catalog(catalog_path, &ConstraintRegistry::new())?;
    let compiler = RouteTableCompiler::with_config(catalog, config);
    let mut table = RouteTable::new();
    let added = match owner {
        Some(owner) => compiler.compile_owner(owner, &mut table),
        None => compiler.compile_all(&mut table),
    }
    .with_context(|| format!("failed to compile {}", catalog_path.display()))?;
    table.log_summary();
    Ok((table, added))
}

fn write_entry(out: &mut dyn Write, entry: &RouteEntry) -> anyhow::Result<()> {
    writeln!(out, "{}  {}", entry.name, entry.url)?;
    writeln!(out, "    defaults:    {}", serde_json::to_string(&entry.defaults)?)?;
    writeln!(out, "    constraints: {}", serde_json::to_string(&entry.constraints)?)?;
    Ok(())
}

/// Run a parsed command, writing its report to `out`.
pub fn run_cli(cli: Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Compile {
            catalog,
            owner,
            json,
        } => {
            let (_table, added) = compile(&catalog, owner.as_deref(), config)?;
            if json {
                let entries: Vec<&RouteEntry> = added.iter().map(|e| &**e).collect();
                serde_json::to_writer_pretty(&mut *out, &entries)?;
                writeln!(out)?;
            } else {
                for entry in &added {
                    write_entry(out, entry)?;
                }
                writeln!(out, "{} routes", added.len())?;
            }
            Ok(())
        }
        Commands::Route {
            catalog,
            method,
            path,
        } => {
            let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                .with_context(|| format!("invalid method '{method}'"))?;
            let (table, _added) = compile(&catalog, None, config)?;
            match table.route(&method, &path) {
                Some(matched) => {
                    write_entry(out, &matched.entry)?;
                    writeln!(out, "    values:      {}", serde_json::to_string(&matched.values)?)?;
                }
                None => writeln!(out, "no route matches {method} {path}")?,
            }
            Ok(())
        }
    }
}
