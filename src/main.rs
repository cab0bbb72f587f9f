use std::io::{self, BufRead, Write};

use clap::Parser;
use cll::{Interpreter, Kind, VERSION, Value};
use tracing_subscriber::EnvFilter;

/// cll runs scripts of the CLL language, or reads them line by line in an
/// interactive session.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The script to run. Without one, cll starts an interactive session.
    script: Option<String>,

    /// Arguments handed to the script in `argv`, after the script path.
    args: Vec<String>,

    /// Traces every statement's tokens before and after evaluation.
    #[arg(short, long)]
    debug: bool,

    /// Prints script errors to standard output as they happen.
    #[arg(short, long)]
    log: bool,

    /// Runs SOURCE instead of a script file.
    #[arg(short, long, value_name = "SOURCE", conflicts_with = "script")]
    eval: Option<String>,
}

fn install_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter)
                                     .with_writer(io::stderr)
                                     .try_init();
}

/// Reads a command-line argument as the literal it spells, or as a string.
fn argument(text: &str) -> Value {
    let value = Value::new(text);
    match value.kind() {
        Kind::Int | Kind::Float | Kind::Double | Kind::Char | Kind::String | Kind::Array => value,
        _ => Value::string(text),
    }
}

fn report(cll: &Interpreter) {
    let location = cll.filename()
                      .map(|file| format!("Error in file '{file}' on line {}:\n", cll.line()))
                      .unwrap_or_default();
    eprintln!("ERROR: {location}{}", cll.error_message());
}

fn repl(cll: &mut Interpreter) {
    println!("CLL Interpreter [{VERSION}]");
    cll.enable_logging();
    cll.enable_output();

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {},
        }

        let ok = cll.read_line(line.trim_end_matches(['\r', '\n']));
        for value in cll.output() {
            println!("{value} {}", value.kind());
        }
        cll.clear_output();

        if !ok {
            if cll.error().is_none() {
                break;
            }
            cll.clear_error();
        }
    }
}

fn main() {
    install_tracing();
    let args = Args::parse();

    let mut cll = Interpreter::new();
    cll.enable_io();
    if args.debug {
        cll.enable_debug();
    }
    if args.log {
        cll.enable_logging();
    }

    let ok = if let Some(source) = &args.eval {
        let lines: Vec<&str> = source.lines().collect();
        cll.read_vector(&lines)
    } else if let Some(script) = &args.script {
        let argv: Vec<Value> = std::iter::once(Value::string(script))
            .chain(args.args.iter().map(String::as_str).map(argument))
            .collect();
        cll.set_var("argv", Value::array(&argv));
        cll.read_file(script)
    } else {
        repl(&mut cll);
        return;
    };

    if !ok && cll.error().is_some() {
        if !args.log {
            report(&cll);
        }
        std::process::exit(1);
    }
}
