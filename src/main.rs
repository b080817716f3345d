use clap::Parser;
use log::error;
use triangle_lang::{formatter::format_program, lexer::Lexer, parser};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long)]
    file: std::path::PathBuf,

    /// Print the syntax tree as JSON.
    #[arg(short, long)]
    json: bool,

    /// Re-emit the program in canonical form.
    #[arg(long)]
    format: bool,
}

fn main() {
    simple_logger::init_with_level(log::Level::Warn).unwrap();
    let args = Cli::parse();

    let file_content = std::fs::read_to_string(&args.file).expect(&format!(
        "Could not read file: '{}'",
        args.file.to_string_lossy()
    ));

    let tokens = match Lexer::new(&file_content).lex() {
        Ok(tokens) => tokens,
        Err(lex_error) => {
            error!("{lex_error}");
            std::process::exit(-1);
        }
    };

    let program = match parser::parse(tokens) {
        Ok(program) => program,
        Err(parse_error) => {
            error!("\n{}", parse_error.pretty(&file_content));
            std::process::exit(-1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&program) {
            Ok(json) => println!("{json}"),
            Err(json_error) => {
                error!("{json_error}");
                std::process::exit(-1);
            }
        }
    } else if args.format {
        println!("{}", format_program(&program));
    } else {
        println!("{program:#?}");
    }
}
