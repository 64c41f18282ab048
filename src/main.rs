use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use summark::{config, generate, index, output};

#[derive(Parser)]
#[command(name = "summark")]
#[command(about = "Static wiki generator driven by a summary table of contents")]
#[command(long_about = "\
Static wiki generator driven by a summary table of contents

Your filesystem is the data source. Each section is a directory with a
summary.md whose links define the pages and their reading order.

Content structure:

  wiki/
  ├── wiki.toml                    # Wiki config (optional)
  ├── summary.md                   # Default section: its links are the TOC
  ├── getting-started.md
  ├── user-manual/                 # Named section (declared in wiki.toml)
  │   ├── summary.md
  │   ├── installation.md
  │   └── advanced/
  │       └── queries.md
  └── developer-guide/
      └── summary.md

Pages are chained in summary order: each gets a 1-based ordinal and
previous/next navigation. Links to files that don't exist yet produce
empty stand-in pages (with a warning), so the wiki's structure can lead
its content.

Run 'summark gen-config' to generate a documented wiki.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "wiki", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for the intermediate manifest
    #[arg(long, default_value = ".summark-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Index the content directory into a manifest
    Index,
    /// Produce the final HTML site from an existing manifest
    Generate,
    /// Run the full pipeline: index → generate
    Build,
    /// Validate the content directory without building
    Check,
    /// Print a stock wiki.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Index => {
            let manifest = index::index(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_index_output(&manifest);
        }
        Command::Generate => {
            let manifest = generate::load_manifest(&cli.temp_dir.join("manifest.json"))?;
            generate::generate(&manifest, &cli.output)?;
            output::print_generate_output(&manifest);
        }
        Command::Build => {
            println!("==> Stage 1: Indexing {}", cli.source.display());
            let manifest = index::index(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_index_output(&manifest);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            generate::generate(&manifest, &cli.output)?;
            output::print_generate_output(&manifest);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = index::index(&cli.source)?;
            output::print_index_output(&manifest);
            if manifest.warnings.is_empty() {
                println!("==> Wiki is complete");
            } else {
                println!(
                    "==> Wiki indexed with {} warning{}",
                    manifest.warnings.len(),
                    if manifest.warnings.len() == 1 { "" } else { "s" }
                );
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn write_manifest(
    manifest: &index::Manifest,
    temp_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(temp_dir.join("manifest.json"), json)?;
    Ok(())
}
