mod cli;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Import { file } => cli::import::run(&file),
        Commands::List {
            search,
            from,
            to,
            min,
            max,
            sort,
        } => cli::list::run(search, from, to, min, max, &sort),
        Commands::Summary => cli::summary::run(),
        Commands::Validate => cli::validate::run(),
        Commands::Export { output } => cli::export::run(output.as_deref()),
        Commands::Clear => cli::clear::run(),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
