use clap::{App, Arg};
use clausesearch::formula::dimacs::{parse, parse_file, Problem};
use clausesearch::*;
use log::debug;
use std::process::exit;

fn main() {
    env_logger::init();

    let matches = App::new("clausesearch")
        .about("Memoized clause-by-clause search over DIMACS CNF")
        .arg(Arg::with_name("INPUT").help("input file (in CNF)").index(1))
        .arg(
            Arg::with_name("strict")
                .long("strict")
                .help("key memo entries on the current assignment as well"),
        )
        .arg(
            Arg::with_name("step-limit")
                .long("step-limit")
                .help("give up after this many combination trials")
                .takes_value(true),
        )
        .get_matches();

    let mut opts = SearchOpts::default();
    opts.strict_memo = matches.is_present("strict");
    if let Some(limit) = matches.value_of("step-limit") {
        match limit.parse() {
            Ok(limit) => opts.step_limit = Some(limit),
            Err(_) => {
                eprintln!("invalid step limit '{}'", limit);
                exit(1);
            }
        }
    }
    if !opts.check() {
        eprintln!("invalid option value");
        exit(1);
    }

    let problem = if let Some(path) = matches.value_of("INPUT") {
        debug!("reading {}", path);
        parse_file(path)
    } else {
        parse(std::io::stdin())
    };

    match problem {
        Ok(problem) => exit(solve(&problem, opts)),
        Err(e) => {
            eprintln!("parse error: {}", e);
            exit(1);
        }
    }
}

fn solve(problem: &Problem, opts: SearchOpts) -> i32 {
    let mut engine = Engine::new(&problem.formula, problem.universe.len(), opts);
    let outcome = engine.run();
    let stats = engine.stats();

    println!("c trials       {}", stats.trials);
    println!("c memo hits    {}", stats.memo_hits);
    println!("c memo entries {}", stats.memo_entries);

    match outcome {
        SearchOutcome::Satisfiable(model) => {
            println!("s SATISFIABLE");
            println!("{}", model.dimacs_model(&problem.universe));
            10
        }
        SearchOutcome::Unsatisfiable => {
            println!("s UNSATISFIABLE");
            20
        }
        SearchOutcome::Aborted { steps } => {
            println!("c aborted after {} steps", steps);
            println!("s INDETERMINATE");
            0
        }
    }
}
