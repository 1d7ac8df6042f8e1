use anyhow::{Context, Result};
use clap::Parser;
use flowdoc_keywords::extract::extract_file;
use flowdoc_keywords::output::{write_json, Encoding};
use flowdoc_keywords::report::{render_section_stats, render_status, summarize_by_section};
use flowdoc_keywords::section::{default_sections, load_sections, SectionMatcher};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod path_guard;

use cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}

fn run(args: Cli) -> Result<()> {
    path_guard::ensure_output_not_input(&args.output, &args.input)?;

    let sections = match &args.sections_file {
        Some(path) => load_sections(path)?,
        None => default_sections(),
    };
    let matcher = SectionMatcher::new(&sections)?;
    debug!(sections = sections.len(), "compiled section patterns");

    let extraction = extract_file(&args.input, &matcher, |issue| println!("{issue}"))
        .with_context(|| format!("failed to extract keywords from {}", args.input.display()))?;

    let encoding = if args.utf8 {
        Encoding::Utf8
    } else {
        Encoding::Ascii
    };
    write_json(&extraction.records, &args.output, encoding)
        .with_context(|| format!("failed to write output JSON {}", args.output.display()))?;

    if args.quiet {
        return Ok(());
    }

    println!("{}", render_status(&extraction, &args.output));
    if args.summary {
        let rows = summarize_by_section(&extraction.records, matcher.section_names());
        println!();
        println!("{}", render_section_stats(&rows));
    }

    Ok(())
}
