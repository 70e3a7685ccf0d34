// scrawl: lex, parse and inspect scripts

use std::fs;
use std::io;
use std::path::Path;
use std::process;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use scrawl::config::Config;
use scrawl::parser::ast::AstNode;
use scrawl::parser::Parser;
use scrawl::printer::render;
use scrawl::ui::panes::outline;
use scrawl::ui::{App, Inspection};

/// Command-line options
struct Options {
    path: String,
    tui: bool,
    config: Config,
}

fn usage(program_name: &str) {
    eprintln!("Usage: {} [options] <file>", program_name);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --tui           Browse source, tokens and syntax tree interactively");
    eprintln!("  --lex-debug     Print every token to stderr (same as LEXDEBUG=1)");
    eprintln!("  --parse-debug   Print the syntax tree to stderr (same as PARSEDEBUG=1)");
    eprintln!("  --strict        Reject unterminated strings and bare identifier statements");
}

fn parse_args(args: &[String], mut config: Config) -> Result<Options, String> {
    let mut path = None;
    let mut tui = false;

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--tui" => tui = true,
            "--lex-debug" => config.lex_debug = true,
            "--parse-debug" => config.parse_debug = true,
            "--strict" => config = config.strict(),
            flag if flag.starts_with("--") => return Err(format!("Unknown option '{}'", flag)),
            file => {
                if path.replace(file.to_string()).is_some() {
                    return Err("Only one input file is supported".to_string());
                }
            }
        }
    }

    let path = path.ok_or_else(|| "No input file provided".to_string())?;
    Ok(Options { path, tui, config })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("scrawl");

    let options = match parse_args(&args, Config::from_env()) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            usage(program_name);
            process::exit(1);
        }
    };

    if !Path::new(&options.path).exists() {
        eprintln!("Error: File '{}' not found", options.path);
        process::exit(1);
    }

    let source = fs::read_to_string(&options.path)?;

    if options.tui {
        return run_tui(Inspection::run(&source, &options.config));
    }

    eprintln!("Parsing {}...", options.path);
    let tree = match Parser::with_config(&source, &options.config).and_then(|mut p| p.parse_program())
    {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    eprintln!(
        "Parsed successfully. Found {} top-level statements.",
        tree.statements().len()
    );
    if options.config.parse_debug {
        eprint!("{}", outline_text(&tree));
    }
    println!("{}", render(&tree));

    Ok(())
}

/// Indented node outline with positions, one line per node
fn outline_text(tree: &AstNode) -> String {
    outline(tree)
        .iter()
        .map(|row| {
            let mut line = format!(
                "{}{:?} {}:{}",
                "  ".repeat(row.depth),
                row.kind,
                row.location.line,
                row.location.column
            );
            if !row.detail.is_empty() {
                line.push(' ');
                line.push_str(&row.detail);
            }
            line.push('\n');
            line
        })
        .collect()
}

fn run_tui(inspection: Inspection) -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(inspection);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("scrawl")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args_flags() {
        let options = parse_args(&args(&["--strict", "--lex-debug", "prog.scr"]), Config::default()).unwrap();
        assert_eq!(options.path, "prog.scr");
        assert!(!options.tui);
        assert!(options.config.lex_debug);
        assert!(options.config.strict_strings);
    }

    #[test]
    fn test_outline_text() {
        let tree = scrawl::parser::parse("var x = 1;\nprint x;").unwrap();
        assert_eq!(
            outline_text(&tree),
            concat!(
                "Block 1:1 2 statement(s)\n",
                "  DeclarationStatement 1:1 x\n",
                "    NumberLiteral 1:9 1\n",
                "  PrintStatement 2:1\n",
                "    Identifier 2:7 x\n",
            )
        );
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&[]), Config::default()).is_err());
        assert!(parse_args(&args(&["--bogus", "a"]), Config::default()).is_err());
        assert!(parse_args(&args(&["a", "b"]), Config::default()).is_err());
    }
}
