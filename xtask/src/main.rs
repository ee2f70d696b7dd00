//! Build automation tasks for TaxoTree
//!
//! Currently generates the CLI reference from the clap definitions.

use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for TaxoTree", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate the CLI reference as Markdown
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn generate_cli_docs(output_dir: &str) -> anyhow::Result<()> {
    println!("Generating CLI documentation...");

    let markdown = clap_markdown::help_markdown::<taxo_cli::Cli>();

    let content = format!(
        r#"# taxo CLI Reference

Generated from the CLI source code on {}.

## Quick Start

```bash
# Build the resource directory from an NCBI taxdump archive
taxo build taxdump.tar.gz --output ~/.local/share/taxo

# Scientific name and rank
taxo name 9606
taxo rank 9606

# Path to the root and lowest common ancestor
taxo path 9606
taxo lca 9606 10090

# Canonical lineage
taxo lineage 9606 --canonical

# Parent table covering a list of taxids
taxo subset taxids.txt subset.tsv
```

## Commands

{}

## Environment Variables

- `TAXO_RESOURCE_DIR` - Resource directory (default: platform data dir + `/taxo`)
- `TAXO_VERIFY_CHECKSUMS` - Verify artifact checksums on load (`true`/`false`)
- `LOG_LEVEL`, `LOG_OUTPUT`, `LOG_FORMAT`, `LOG_DIR`, `LOG_FILTER` - Logging overrides

---

*To update, run `cargo xtask generate-cli-docs`.*
"#,
        chrono::Utc::now().format("%Y-%m-%d"),
        markdown
    );

    let output_path = PathBuf::from(output_dir);
    fs::create_dir_all(&output_path)?;

    let file_path = output_path.join("cli.md");
    fs::write(&file_path, content)?;

    println!("✅ Generated CLI documentation at: {}", file_path.display());

    Ok(())
}
