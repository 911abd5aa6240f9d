mod error;

use clap::{Parser, ValueEnum};
use error::Error;
use log::debug;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, io::{self, IsTerminal, Read}, path::PathBuf, process::ExitCode};
use stepcalc_compute::{
    fmt::{FormatOptionsBuilder, NumberFormat},
    reduce::DEFAULT_MAX_STEPS,
    step_collector::FnCollector,
    Deterministic,
    ReduceOptions,
    ReduceOptionsBuilder,
    Reducer,
    Resolution,
};

/// How non-integer results are written.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Notation {
    /// Scientific notation for very small or very large magnitudes only.
    #[default]
    Auto,

    /// Always decimal notation.
    Decimal,

    /// Always scientific notation.
    Scientific,
}

impl From<Notation> for NumberFormat {
    fn from(notation: Notation) -> Self {
        match notation {
            Notation::Auto => Self::Auto,
            Notation::Decimal => Self::Decimal,
            Notation::Scientific => Self::Scientific,
        }
    }
}

/// Reduce arithmetic expressions one operation at a time, showing every step
#[derive(Parser, Debug)]
#[command(name = "stepcalc", version, about, long_about = None)]
struct Args {
    /// Expression to reduce (if not provided, reads from `--file`, piped stdin, or interactively)
    expression: Option<String>,

    /// Read expressions from this file, one per line
    #[arg(short, long, conflicts_with = "expression")]
    file: Option<PathBuf>,

    /// Maximum number of steps per expression
    #[arg(long, env = "STEPCALC_MAX_STEPS", default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Ignore parentheses when choosing the next operation
    #[arg(long, env = "STEPCALC_FLAT")]
    flat: bool,

    /// Reject expressions containing characters that are not part of an expression
    #[arg(long, env = "STEPCALC_STRICT")]
    strict: bool,

    /// Round non-integer results to this many significant digits
    #[arg(long, env = "STEPCALC_PRECISION")]
    precision: Option<usize>,

    /// How non-integer results are written
    #[arg(long, value_enum, default_value_t, env = "STEPCALC_NOTATION")]
    notation: Notation,

    /// Print a JSON summary of each run instead of its steps
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Builds the reduction options selected by the arguments.
    fn options(&self) -> ReduceOptions {
        let format = FormatOptionsBuilder::new()
            .number(self.notation.into())
            .precision(self.precision)
            .build();
        ReduceOptionsBuilder::new()
            .max_steps(self.max_steps)
            .strict(self.strict)
            .format(format)
            .build()
    }

    /// Builds the reducer selected by the arguments.
    fn reducer(&self) -> Reducer {
        let resolution = if self.flat { Resolution::Flat } else { Resolution::Nested };
        Reducer::new(self.options(), Deterministic::new(resolution))
    }
}

/// Reduces the given input, printing every step followed by the result or the error report.
/// Returns true if the input was reduced to a single number.
fn reduce(reducer: &mut Reducer, input: &str, json: bool) -> Result<bool, Error> {
    let reduction = if json {
        reducer.run(input)
    } else {
        let mut index = 0;
        reducer.run_with(input, &mut FnCollector(|snapshot: String| {
            if index == 0 {
                println!("{}", snapshot);
            } else {
                println!("= {}", snapshot);
            }
            index += 1;
        }))
    };

    if json {
        println!("{}", serde_json::to_string(&reduction.summary())?);
    } else {
        reduction.write_report("input", io::stderr())?;
    }

    Ok(reduction.is_success())
}

/// Reduces each non-empty line of the input in turn. Returns true if every line was reduced.
fn reduce_lines(reducer: &mut Reducer, input: &str, json: bool) -> Result<bool, Error> {
    let lines = input.lines().filter(|line| !line.trim().is_empty()).collect::<Vec<_>>();
    debug!("read {} expressions", lines.len());

    let mut all_reduced = true;
    for (i, line) in lines.into_iter().enumerate() {
        if i > 0 && !json {
            println!();
        }
        all_reduced &= reduce(reducer, line, json)?;
    }
    Ok(all_reduced)
}

/// Runs the interactive mode until the user exits.
fn repl(reducer: &mut Reducer, json: bool) -> Result<(), Error> {
    let mut rl = DefaultEditor::new()?;

    fn process_line(rl: &mut DefaultEditor, reducer: &mut Reducer, json: bool) -> Result<(), Error> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        reduce(reducer, &input, json)?;
        Ok(())
    }

    loop {
        match process_line(&mut rl, reducer, json) {
            Ok(()) => (),
            Err(Error::Readline(ReadlineError::Eof | ReadlineError::Interrupted)) => return Ok(()),
            Err(err) => return Err(err),
        }
    }
}

/// Runs the mode selected by the arguments. Returns true if every expression was reduced.
fn run(args: &Args) -> Result<bool, Error> {
    let mut reducer = args.reducer();

    if let Some(expression) = &args.expression {
        reduce(&mut reducer, expression, args.json)
    } else if let Some(path) = &args.file {
        let input = fs::read_to_string(path)?;
        reduce_lines(&mut reducer, &input, args.json)
    } else if !io::stdin().is_terminal() {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        reduce_lines(&mut reducer, &input, args.json)
    } else {
        repl(&mut reducer, args.json)?;
        Ok(true)
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        },
    }
}
