mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tafel",
    version,
    about = "Extract tables from fixed-layout PDF reports into xlsx workbooks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the tables of a PDF report into an xlsx workbook
    Extract {
        /// Path to the PDF report
        input_file: PathBuf,

        /// Pages: "N", "N-M" or "N,M,..." (default: pages 3-20)
        #[arg(short, long, default_value = "")]
        pages: String,

        /// Output file without extension (default: PDF name next to the PDF)
        #[arg(short, long, value_name = "BASE")]
        output: Option<String>,

        /// JSON extraction config (regions, row tolerances)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Overwrite an existing output file without asking
        #[arg(short, long)]
        yes: bool,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        format: String,
    },
    /// Show which pages would be extracted and with which settings
    Pages {
        /// Page specification (default: pages 3-20)
        #[arg(default_value = "")]
        spec: String,

        /// JSON extraction config
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        format: String,
    },
    /// Print the default extraction config as JSON
    Config,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input_file,
            pages,
            output,
            config,
            yes,
            format,
        } => commands::extract::run(input_file, pages, output, config, yes, &format),
        Commands::Pages {
            spec,
            config,
            format,
        } => commands::pages::run(&spec, config, &format),
        Commands::Config => commands::config::print_default(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
