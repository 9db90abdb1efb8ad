use clap::Parser;
use frame_stats::logging::{init_logging, level_from_flags};
use frame_stats::{run_analysis, AnalysisOptions};

fn main() {
    let options = AnalysisOptions::parse();
    init_logging(level_from_flags(options.verbose, options.quiet));

    if let Err(e) = run_analysis(&options) {
        eprintln!("Fatal error: {}", e);
        std::process::exit(1);
    }
}
