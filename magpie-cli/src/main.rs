//! Magpie CLI
//!
//! Reads a stylesheet, mines it for duplicated declarations and prints the
//! groups worth refactoring, either for a terminal or as JSON.

use std::fs;

use anyhow::Context;
use clap::Parser;
use magpie_common::warning::take_warnings;
use magpie_css::parse_stylesheet;
use magpie_mining::report::{ItemSetReport, ListReport};
use magpie_mining::{Algorithm, MiningConfig, Report, find_duplicates_with};
use owo_colors::OwoColorize;

/// Magpie: find declarations that several CSS selectors repeat
#[derive(Parser, Debug)]
#[command(name = "magpie")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Mine a stylesheet
    magpie ./site.css

    # Only report groups shared by at least 4 selectors
    magpie --min-support 4 ./site.css

    # Keep groups that a larger group already explains
    magpie --keep-subsets ./site.css

    # Mine inline CSS with Apriori
    magpie --algorithm apriori --css '.a { color: red } .b { color: #f00 }'

    # Machine-readable output
    magpie --json ./site.css
"#)]
struct Cli {
    /// Path to the CSS file to mine
    #[arg(value_name = "FILE", conflicts_with = "css")]
    path: Option<String>,

    /// Mine a CSS string directly instead of a file
    #[arg(long, value_name = "TEXT")]
    css: Option<String>,

    /// Minimum number of selectors a group must appear in
    #[arg(long, default_value = "2")]
    min_support: usize,

    /// Also report groups that a larger group with the same selectors explains
    #[arg(long)]
    keep_subsets: bool,

    /// Mining algorithm (fp-growth or apriori)
    #[arg(long, default_value = "fp-growth")]
    algorithm: Algorithm,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Maximum number of groups printed per group size (human output only)
    #[arg(long, value_name = "N")]
    limit: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let css = load_css(&cli)?;
    let sheet = parse_stylesheet(&css);

    let config = MiningConfig::new(cli.min_support)?.with_subsumed_subsets(!cli.keep_subsets);
    let results = find_duplicates_with(&sheet, &config, cli.algorithm)?;
    let report = Report::new(&results, &sheet).with_warnings(take_warnings());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, cli.limit);
    }

    Ok(())
}

/// Load stylesheet text from CLI arguments
fn load_css(cli: &Cli) -> anyhow::Result<String> {
    if let Some(ref css) = cli.css {
        Ok(css.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
    } else {
        anyhow::bail!("a CSS file path or --css is required")
    }
}

/// Print the report for a terminal
fn print_report(report: &Report, limit: Option<usize>) {
    println!(
        "{} {} selectors, {} declarations, {} distinct",
        "===".bold(),
        report.selectors,
        report.declarations,
        report.items,
    );
    println!(
        "    min support {}, {}{}",
        report.min_support,
        report.algorithm,
        if report.remove_subsumed_subsets {
            ""
        } else {
            ", keeping subsets"
        },
    );

    if report.lists.is_empty() {
        println!("\n{}", "No duplicated declarations found.".green());
        return;
    }

    for list in &report.lists {
        print_list(list, limit);
    }

    println!(
        "\n{} groups of duplicated declarations",
        report.itemset_count().bold()
    );
}

fn print_list(list: &ListReport, limit: Option<usize>) {
    let noun = if list.cardinality == 1 {
        "declaration"
    } else {
        "declarations"
    };
    println!(
        "\n{} {} {} (max support {})",
        "===".bold(),
        list.cardinality.bold(),
        noun.bold(),
        list.max_support,
    );

    let shown = limit.unwrap_or(list.itemsets.len());
    for itemset in list.itemsets.iter().take(shown) {
        print_itemset(itemset);
    }

    let hidden = list.itemsets.len().saturating_sub(shown);
    if hidden > 0 {
        println!("  {}", format!("... {hidden} more").dimmed());
    }
}

fn print_itemset(itemset: &ItemSetReport) {
    println!("\n  {} selectors", itemset.support.yellow().bold());
    for declaration in &itemset.declarations {
        println!(
            "    {}  {}",
            declaration.declaration.cyan(),
            declaration.location.dimmed()
        );
    }
    for selector in &itemset.selectors {
        match selector.media {
            Some(ref media) => println!(
                "      {} {} {}",
                selector.selector,
                media.magenta(),
                selector.location.dimmed()
            ),
            None => println!(
                "      {} {}",
                selector.selector,
                selector.location.dimmed()
            ),
        }
    }
}
