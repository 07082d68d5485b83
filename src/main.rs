extern crate clap;

use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
    time::Instant,
};

use bfglyph::{
    interpreter::{Interpreter, MAX_SLOTS},
    lexer::lexer::Lexer,
    parser::parser::Parser as ProgramParser,
    roundtrip, Generator,
};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{fmt, EnvFilter};

/// Encode text as Brainf**k and run it back
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Number of addressable memory cells
    #[arg(short, long, global = true, default_value_t = MAX_SLOTS)]
    memory_size: usize,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a program that outputs the text
    Generate {
        /// Text to encode, read from stdin if missing
        text: Option<String>,
    },
    /// Run a program file, `,` reads from stdin
    Run {
        /// The file to operate on
        file: String,

        /// Output the lexer
        #[arg(long)]
        tokens: bool,

        /// Output the ast
        #[arg(long)]
        ast: bool,
    },
    /// Generate a program for the text, run it and compare
    Roundtrip {
        /// Text to encode, prompts for it if missing
        text: Option<String>,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Reads one line from stdin without its line ending
fn read_text(prompt: Option<&str>) -> io::Result<String> {
    if let Some(prompt) = prompt {
        print!("{}", prompt);
        io::stdout().flush()?;
    }
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(line)
}

fn run(args: Args) -> Result<bool, Box<dyn std::error::Error>> {
    match args.command {
        Commands::Generate { text } => {
            let text = match text {
                Some(text) => text,
                None => read_text(None)?,
            };
            println!("{}", Generator::new().text_to_program(&text)?);
            Ok(true)
        }
        Commands::Run { file, tokens, ast } => {
            eprintln!("Running {}", file);
            let (text, lexed) = Lexer::lex_file(&file)?;

            if tokens {
                Lexer::print_tokens(&Lexer::new(&text).collect());
            }
            if ast {
                println!("{:#?}", ProgramParser::new().parse_program(&lexed)?);
            }

            eprintln!("{}", "Starting interpreter".blue());
            let now = Instant::now();
            let output = Interpreter::with_stdin(args.memory_size).execute(&text)?;
            print!("{}", output);
            io::stdout().flush()?;
            eprintln!();
            eprintln!("{} {:.2?}", "Finished interpreter in".green(), now.elapsed());
            Ok(true)
        }
        Commands::Roundtrip { text } => {
            let text = match text {
                Some(text) => text,
                None => read_text(Some("Set text>"))?,
            };

            let now = Instant::now();
            let mut interpreter = Interpreter::with_stdin(args.memory_size);
            let result = roundtrip::run(&text, &mut interpreter)?;
            println!("Brainfuck source:\n{}", result.source);
            println!("number of commands:\n{}", result.command_count());
            println!("Brainfuck output:\n{}", result.output);
            eprintln!("{} {:.2?}", "Finished round trip in".green(), now.elapsed());

            if result.succeeded() {
                println!("{}", "SUCCESS!".green());
            } else {
                println!("{}", "FAILURE!".red());
            }
            Ok(result.succeeded())
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{0:}: {1:}", "Error".red(), e);
            ExitCode::FAILURE
        }
    }
}
