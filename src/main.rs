use anyhow::{anyhow, Result};
use env_logger::Env;
use log::{error, info};
use roombook::{version, BookingCommand, Config, Interpreter};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::collections::HashMap;

/// Command line arguments structure
#[derive(Debug)]
struct CommandArgs {
    words: Vec<String>,
    flags: HashMap<String, Option<String>>,
}

/// Flags that consume the following word as their value
const VALUE_FLAGS: &[&str] = &["--request"];

impl CommandArgs {
    fn from_parts(parts: Vec<String>) -> Self {
        let mut words = Vec::new();
        let mut flags = HashMap::new();
        let mut i = 0;

        while i < parts.len() {
            if parts[i].starts_with("--") {
                let flag = parts[i].clone();
                if VALUE_FLAGS.contains(&flag.as_str()) && i + 1 < parts.len() {
                    flags.insert(flag, Some(parts[i + 1].clone()));
                    i += 1;
                } else {
                    flags.insert(flag, None);
                }
            } else {
                words.push(parts[i].clone());
            }
            i += 1;
        }

        CommandArgs { words, flags }
    }

    /// Split a REPL line, keeping quoted sections together
    fn parse_line(input: &str) -> Self {
        let mut parts = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;

        for c in input.chars() {
            match c {
                '\'' if in_quotes || current.is_empty() => {
                    in_quotes = !in_quotes;
                    if !in_quotes && !current.is_empty() {
                        parts.push(current.clone());
                        current.clear();
                    }
                }
                ' ' if !in_quotes => {
                    if !current.is_empty() {
                        parts.push(current.clone());
                        current.clear();
                    }
                }
                _ => current.push(c),
            }
        }
        if !current.is_empty() {
            parts.push(current);
        }

        Self::from_parts(parts)
    }

    fn has(&self, flag: &str) -> bool {
        self.flags.contains_key(flag)
    }

    fn utterance(&self) -> String {
        self.words.join(" ")
    }
}

/// Flags answered without interpreting anything
#[derive(Debug, PartialEq)]
enum MetaCommand {
    Help,
    Version,
}

impl MetaCommand {
    fn from_args(args: &CommandArgs) -> Option<Self> {
        if args.has("--help") {
            Some(MetaCommand::Help)
        } else if args.has("--version") {
            Some(MetaCommand::Version)
        } else {
            None
        }
    }

    fn run(&self) {
        match self {
            MetaCommand::Help => print_usage(),
            MetaCommand::Version => println!("{}", version::get_display_version()),
        }
    }
}

/// Rendering options resolved from config and flags
struct OutputOptions {
    pretty: bool,
    include_normalized_date: bool,
    compile: bool,
}

impl OutputOptions {
    fn resolve(config: &Config, args: &CommandArgs) -> Self {
        let pretty = if args.has("--compact") {
            false
        } else {
            args.has("--pretty") || config.output.pretty
        };
        Self {
            pretty,
            include_normalized_date: args.has("--normalized") || config.output.include_normalized_date,
            compile: args.has("--compile"),
        }
    }

    fn render(&self, command: &BookingCommand) -> Result<String> {
        if self.compile {
            return self.to_json(&command.compile());
        }
        self.to_json(&command.to_wire(self.include_normalized_date))
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(rendered)
    }
}

fn print_usage() {
    println!("Usage: roombook [OPTIONS] [TEXT...]");
    println!();
    println!("Interprets a room-booking request and prints it as JSON.");
    println!("With no TEXT an interactive prompt is started.");
    println!();
    println!("Options:");
    println!("  --request <json>  Interpret a {{\"text\": \"...\"}} request payload");
    println!("  --normalized      Include normalized_date in the output");
    println!("  --compile         Print the booking template call instead");
    println!("  --pretty          Pretty-print JSON");
    println!("  --compact         Print JSON on a single line");
    println!("  --version         Show version");
    println!("  --help            Show this help");
}

fn main() -> Result<()> {
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load config, using defaults: {:#}", err);
            Config::default()
        }
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_level()))
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();

    let args = CommandArgs::from_parts(std::env::args().skip(1).collect());

    if let Some(meta) = MetaCommand::from_args(&args) {
        meta.run();
        return Ok(());
    }

    let interpreter = Interpreter::default();
    let options = OutputOptions::resolve(&config, &args);

    if let Some(request) = args.flags.get("--request") {
        let request = request.as_deref().ok_or_else(|| anyhow!("--request needs a JSON payload"))?;
        if !handle_request(&interpreter, &options, request)? {
            std::process::exit(1);
        }
        return Ok(());
    }

    if !args.words.is_empty() {
        let command = interpreter.interpret(&args.utterance());
        println!("{}", options.render(&command)?);
        return Ok(());
    }

    run_repl(&interpreter, &config)
}

/// Interpret a JSON request, printing either the command or an error payload
///
/// Returns whether the request was accepted.
fn handle_request(interpreter: &Interpreter, options: &OutputOptions, request: &str) -> Result<bool> {
    let payload: serde_json::Value = match serde_json::from_str(request) {
        Ok(payload) => payload,
        Err(err) => {
            error!("Request is not valid JSON: {}", err);
            println!("{}", serde_json::json!({ "error": format!("Invalid request JSON: {}", err) }));
            return Ok(false);
        }
    };

    match interpreter.interpret_request(&payload) {
        Ok(command) => {
            println!("{}", options.render(&command)?);
            Ok(true)
        }
        Err(err) => {
            error!("Rejected request: {}", err);
            println!("{}", err.to_payload());
            Ok(false)
        }
    }
}

fn run_repl(interpreter: &Interpreter, config: &Config) -> Result<()> {
    info!("Starting RoomBook interactive prompt");

    let mut rl = DefaultEditor::new()?;
    println!("Welcome to RoomBook! Type a booking request, 'help' for options, or 'exit' to quit.");

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);
                match line {
                    "exit" | "quit" => break,
                    "help" => print_usage(),
                    _ => {
                        if let Err(err) = process_line(interpreter, config, line) {
                            error!("Failed to process input: {:?}", err);
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

fn process_line(interpreter: &Interpreter, config: &Config, line: &str) -> Result<()> {
    let args = CommandArgs::parse_line(line);
    if let Some(meta) = MetaCommand::from_args(&args) {
        meta.run();
        return Ok(());
    }
    let options = OutputOptions::resolve(config, &args);

    if let Some(request) = args.flags.get("--request") {
        let request = request.as_deref().ok_or_else(|| anyhow!("--request needs a JSON payload"))?;
        handle_request(interpreter, &options, request)?;
        return Ok(());
    }

    let command = interpreter.interpret(&args.utterance());
    info!("Interpreted intent '{}'", command.intent);
    println!("{}", options.render(&command)?);
    Ok(())
}
