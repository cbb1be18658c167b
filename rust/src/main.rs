use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dotenv::dotenv;
use mangashelf::config::ServeConfig;
use mangashelf::{build_index, logging, Index, Repository};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mangashelf", version, about = "Browse a directory of manga over HTTP")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Index the root directory and serve it over HTTP
    Serve(ServeConfig),
    /// Index the root directory and report what was found
    Index {
        /// Directory whose sub-directories hold the manga collections
        #[arg(long, value_name = "dir", env = "MANGASHELF_ROOT", default_value = ".")]
        root: PathBuf,

        /// Print the full index as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    logging::init().context("Failed to initialise logging")?;

    match cli.command {
        Commands::Serve(config) => {
            let index = build_index(&config.root)
                .with_context(|| format!("Failed to index {}", config.root.display()))?;
            mangashelf::server::run(&config, Repository::from(index)).await?;
        }
        Commands::Index { root, json } => {
            let index = build_index(&root)
                .with_context(|| format!("Failed to index {}", root.display()))?;
            if json {
                let mut out = io::stdout().lock();
                serde_json::to_writer_pretty(&mut out, &index)?;
                writeln!(out)?;
            } else {
                print_summary(&index);
            }
        }
    }
    Ok(())
}

fn print_summary(index: &Index) {
    for manga in &index.mangas {
        println!("{} {}", format!("[{}]", manga.id).dimmed(), manga.name.bold());
        for chapter in manga
            .chapter_ids
            .iter()
            .filter_map(|id| index.chapters.get(id.index()))
        {
            println!("    {} ({} pages)", chapter.name, chapter.page_ids.len());
        }
    }
    for skipped in &index.skipped {
        println!(
            "{}",
            format!("  ⚠️  Skipped {}: {}", skipped.dir.display(), skipped.reason).yellow()
        );
    }
    println!(
        "{}",
        format!(
            "Mangas: {}, Chapters: {}, Pages: {}, Skipped: {}",
            index.mangas.len(),
            index.chapters.len(),
            index.pages.len(),
            index.skipped.len()
        )
        .green()
    );
}
