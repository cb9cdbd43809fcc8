use clap::Parser as ClapParser;
use jsonpp::cli::{self, CheckOptions, CheckResult, CliError};
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

#[derive(ClapParser)]
#[command(name = "jsonpp")]
#[command(about = "jsonpp - compile JSON with inline arithmetic down to plain JSON")]
#[command(version)]
struct Cli {
    /// The JSON++ document (reads --file or stdin if not provided)
    source: Option<String>,

    /// Read the document from a file
    #[arg(short, long, conflicts_with = "source")]
    file: Option<PathBuf>,

    /// Pretty-print the output
    #[arg(short, long)]
    pretty: bool,

    /// Only validate syntax, don't evaluate
    #[arg(long)]
    syntax_only: bool,

    /// Maximum nesting depth of the document
    #[arg(long, default_value_t = jsonpp::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let source = match (cli.source, cli.file) {
        (Some(s), _) => Some(s),
        (None, Some(path)) => Some(fs::read_to_string(path)?),
        (None, None) if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        (None, None) => None,
    };

    let options = CheckOptions {
        source,
        pretty: cli.pretty,
        syntax_only: cli.syntax_only,
        max_depth: cli.max_depth,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Success(json) => println!("{}", json),
    }
    Ok(())
}
