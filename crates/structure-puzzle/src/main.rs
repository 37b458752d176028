//! CLI entry point for the structure puzzle engine.
//!
//! Usage:
//!   structure-puzzle levels <STRUCTURE>
//!   structure-puzzle play <STRUCTURE> <ID> <moves.json>
//!   structure-puzzle play <STRUCTURE> <ID> --stdin
//!   structure-puzzle solve <STRUCTURE> <ID> [options]
//!   structure-puzzle verify [options]
//!
//! Global options:
//!   --levels <FILE>   Use a custom level pack instead of the built-in one
//!   --debug           Enable debug messages
//!
//! Move files are JSON arrays of `{"op": "push", "args": ["A"]}` objects.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};

use structure_puzzle::{
    find_solution, Catalog, Difficulty, Element, Game, MoveRequest, OperationKind,
    OperationResult, ScoringRules, SessionStatus, Snapshot, SolverConfig, SolverResult,
    StructureKind,
};

#[derive(Parser)]
#[command(name = "structure-puzzle")]
#[command(about = "Play, solve and verify data-structure puzzle levels")]
#[command(version)]
struct Cli {
    /// Level pack JSON file (defaults to the built-in levels)
    #[arg(long = "levels", global = true, value_name = "FILE")]
    level_pack: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the levels of one structure type
    Levels {
        /// stack, queue, linkedlist, tree or graph
        structure: StructureKind,
    },

    /// Replay a list of moves against a level and report the outcome
    Play {
        structure: StructureKind,

        /// Level id, starting at 1
        id: u32,

        /// Path to moves JSON file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read moves from stdin instead of file
        #[arg(long)]
        stdin: bool,

        /// Score awarded for any win
        #[arg(long, default_value = "50")]
        base_score: i64,

        /// Seconds under which the time bonus applies
        #[arg(long, default_value = "30")]
        par_time: i64,
    },

    /// Print a shortest winning move list for a level
    Solve {
        structure: StructureKind,

        /// Level id, starting at 1
        id: u32,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Check that every level can be won within its move budget
    Verify {
        #[command(flatten)]
        search: SearchArgs,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Maximum search time per level in seconds
    #[arg(long, default_value = "5")]
    timeout: u64,

    /// Maximum states to expand per level
    #[arg(long, default_value = "200000")]
    max_states: usize,
}

impl SearchArgs {
    fn config(&self) -> SolverConfig {
        SolverConfig {
            timeout: Duration::from_secs(self.timeout),
            max_states: self.max_states,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LevelOutput<'a> {
    id: u32,
    name: &'a str,
    difficulty: Difficulty,
    initial: &'a [Element],
    target: &'a [Element],
    operations: &'a [OperationKind],
    max_moves: u32,
}

/// One entry of a move script. The name is checked per move, so an unknown
/// operation rejects that move rather than the whole script.
#[derive(Debug, Deserialize)]
struct ScriptMove {
    op: String,
    #[serde(default)]
    args: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveOutput {
    index: usize,
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<OperationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayOutput {
    status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<u32>,
    moves: Vec<MoveOutput>,
    snapshot: Snapshot,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    solved: bool,
    search_exhausted: bool,
    states_explored: usize,
    time_elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<Vec<MoveRequest>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyEntry {
    structure: StructureKind,
    id: u32,
    name: String,
    max_moves: u32,
    /// `solvable`, `unsolvable` or `undecided` when a search limit was hit
    verdict: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<usize>,
    states_explored: usize,
    time_elapsed_ms: u64,
}

fn main() {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.debug {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let catalog = load_catalog(cli.level_pack.as_ref());

    match cli.command {
        Commands::Levels { structure } => {
            let levels: Vec<LevelOutput> = catalog
                .levels(structure)
                .iter()
                .map(|level| LevelOutput {
                    id: level.id,
                    name: &level.name,
                    difficulty: level.difficulty,
                    initial: &level.initial,
                    target: &level.target,
                    operations: &level.operations,
                    max_moves: level.max_moves,
                })
                .collect();
            print_json(&levels);
        }

        Commands::Play {
            structure,
            id,
            file,
            stdin,
            base_score,
            par_time,
        } => {
            let json_content = read_input(file, stdin);
            let script: Vec<ScriptMove> = match serde_json::from_str(&json_content) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Error parsing moves JSON: {}", e);
                    process::exit(1);
                }
            };

            let rules = ScoringRules {
                base: base_score,
                par_time_secs: par_time,
                ..ScoringRules::default()
            };
            let mut game = Game::new(&catalog).with_rules(rules);
            if let Err(e) = game.select_level(structure, id) {
                eprintln!("Error: {}", e);
                process::exit(1);
            }

            let mut moves = Vec::with_capacity(script.len());
            for (index, step) in script.iter().enumerate() {
                let inputs: Vec<Option<&str>> =
                    step.args.iter().map(|a| Some(a.as_str())).collect();
                let output = match game.apply_named(&step.op, &inputs) {
                    Ok(report) => MoveOutput {
                        index,
                        accepted: report.accepted,
                        result: Some(report.result),
                        error: None,
                    },
                    Err(e) => MoveOutput {
                        index,
                        accepted: false,
                        result: None,
                        error: Some(e.to_string()),
                    },
                };
                moves.push(output);
            }

            let snapshot = match game.snapshot() {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            };
            let output = PlayOutput {
                status: snapshot.status,
                score: game.session().and_then(|s| s.score()),
                moves,
                snapshot,
            };
            print_json(&output);

            if output.status == SessionStatus::Won {
                process::exit(0);
            } else {
                process::exit(1);
            }
        }

        Commands::Solve {
            structure,
            id,
            search,
        } => {
            let Some(level) = catalog.level(structure, id) else {
                eprintln!("Error: no {} level with id {}", structure, id);
                process::exit(1);
            };

            let result = find_solution(level, &search.config());
            print_json(&format_solve(&result));

            if result.solution.is_some() {
                process::exit(0);
            } else {
                process::exit(1);
            }
        }

        Commands::Verify { search } => {
            let config = search.config();
            let mut failures = 0;
            let mut entries = Vec::new();

            for level in catalog.iter() {
                let result = find_solution(level, &config);
                let verdict = match (&result.solution, result.search_exhausted) {
                    (Some(_), _) => "solvable",
                    (None, true) => "unsolvable",
                    (None, false) => "undecided",
                };
                if result.solution.is_none() {
                    failures += 1;
                }
                entries.push(VerifyEntry {
                    structure: level.structure,
                    id: level.id,
                    name: level.name.clone(),
                    max_moves: level.max_moves,
                    verdict,
                    moves: result.moves(),
                    states_explored: result.states_explored,
                    time_elapsed_ms: result.time_elapsed_ms,
                });
            }

            info!("{} of {} levels failed verification", failures, entries.len());
            print_json(&entries);

            if failures == 0 {
                process::exit(0);
            } else {
                process::exit(1);
            }
        }
    }
}

fn load_catalog(path: Option<&PathBuf>) -> Catalog {
    match path {
        None => Catalog::builtin().clone(),
        Some(path) => match Catalog::from_path(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                eprintln!("Error loading {:?}: {}", path, e);
                process::exit(1);
            }
        },
    }
}

fn read_input(file: Option<PathBuf>, stdin: bool) -> String {
    if stdin {
        let mut buffer = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buffer) {
            eprintln!("Error reading from stdin: {}", e);
            process::exit(1);
        }
        buffer
    } else if let Some(path) = file {
        match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading {:?}: {}", path, e);
                process::exit(1);
            }
        }
    } else {
        eprintln!("Error: Must provide either a file path or --stdin");
        process::exit(1);
    }
}

fn format_solve(result: &SolverResult) -> SolveOutput {
    SolveOutput {
        solved: result.solution.is_some(),
        search_exhausted: result.search_exhausted,
        states_explored: result.states_explored,
        time_elapsed_ms: result.time_elapsed_ms,
        solution: result
            .solution
            .as_ref()
            .map(|moves| moves.iter().map(|op| op.to_request()).collect()),
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error encoding output: {}", e);
            process::exit(1);
        }
    }
}
