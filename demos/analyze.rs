use clap::Parser;

use sort_dtree::algorithms::Algorithm;
use sort_dtree::analyzer::{Analyzer, AnalyzerConfig};
use sort_dtree::metrics::{factorial, lower_bound, percent_change};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Sorting routine to analyze (selection, bubble, insertion, shell, cocktail-shaker).
    #[arg(value_name = "ALGORITHM", default_value = "bubble")]
    algorithm: Algorithm,

    /// Number of items to sort.
    #[clap(long, value_name = "INT", default_value = "3")]
    size: usize,

    /// Abort runs making more than this many comparisons.
    #[clap(long, value_name = "INT")]
    max_depth: Option<usize>,

    /// Also analyze this routine and compare the results.
    #[clap(long, value_name = "ALGORITHM")]
    baseline: Option<Algorithm>,

    /// Write the tree in DOT format to this file.
    #[clap(long, value_name = "FILE")]
    dot: Option<String>,

    /// Print the whole tree.
    #[clap(long)]
    print: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let analyzer = Analyzer::with_config(AnalyzerConfig {
        size: args.size,
        max_depth: args.max_depth,
    });

    println!("Analyzing {} sort on {} items...", args.algorithm, args.size);
    let tree = analyzer.analyze(|items| args.algorithm.run(items))?;
    let stats = tree.stats();
    println!("stats = {:?}", stats);
    println!(
        "{} leaves for {} orderings, worst case {} vs lower bound {}",
        stats.result_nodes,
        factorial(args.size),
        stats.max_depth,
        lower_bound(args.size)
    );
    println!("average number of comparisons: {:.3}", stats.average_depth);

    if args.print {
        print!("{}", tree);
    }

    if let Some(baseline) = args.baseline {
        println!("Comparing {} against baseline {} sort...", args.algorithm, baseline);
        let base = analyzer.analyze(|items| baseline.run(items))?.stats();
        println!("baseline stats = {:?}", base);
        let fmt_change = |value: f64, baseline: f64| match percent_change(value, baseline) {
            Some(p) => format!("{:+.1}%", p),
            None => "n/a".to_string(),
        };
        println!(
            "average comparisons: {:.3} vs {:.3} ({})",
            stats.average_depth,
            base.average_depth,
            fmt_change(stats.average_depth, base.average_depth)
        );
        println!(
            "pruned branches: {} vs {} ({})",
            stats.pruned_branches,
            base.pruned_branches,
            fmt_change(stats.pruned_branches as f64, base.pruned_branches as f64)
        );
    }

    if let Some(path) = &args.dot {
        let dot = tree.to_dot()?;
        std::fs::write(path, dot)?;
        println!("Tree written to '{}'", path);
    }

    let time_total = time_total.elapsed();
    println!("Done in {:.1}s", time_total.as_secs_f64());

    Ok(())
}
