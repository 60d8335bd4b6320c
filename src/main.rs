//! Reads one pattern per line from stdin and builds its DFA.
//!
//! Prints `DFA constructed` for every pattern that parses. A rejected
//! pattern, or a line that is not UTF-8, is reported on stderr and the next
//! line is processed. Set `RUST_LOG=debug` for automaton sizes,
//! `RUST_LOG=trace` for every DFA state.

use std::io::{self, BufRead, Write};

use log::info;

/// Patterns built and lines rejected.
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    built: usize,
    rejected: usize,
}

/// Build every line of `input`, reporting on `out` and `err`. Only I/O
/// failures stop the run.
fn run(input: impl BufRead, mut out: impl Write, mut err: impl Write) -> io::Result<Summary> {
    let mut summary = Summary::default();
    for (number, line) in input.split(b'\n').enumerate() {
        let line = line?;
        let number = number + 1;

        let pattern = match std::str::from_utf8(&line) {
            Ok(pattern) => pattern,
            Err(e) => {
                writeln!(err, "line {}: invalid UTF-8: {}", number, e)?;
                summary.rejected += 1;
                continue;
            }
        };

        match lexfa::build_nfa(pattern) {
            Ok(nfa) => {
                let dfa = lexfa::build_dfa(&nfa);
                info!(
                    "line {}: {} NFA nodes, {} DFA states, {} transitions",
                    number,
                    nfa.len(),
                    dfa.len(),
                    dfa.transition_count()
                );
                writeln!(out, "DFA constructed")?;
                summary.built += 1;
            }
            Err(e) => {
                writeln!(err, "line {}: {}", number, e)?;
                summary.rejected += 1;
            }
        }
    }
    Ok(summary)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let summary = run(io::stdin().lock(), io::stdout().lock(), io::stderr().lock())?;
    info!(
        "{} patterns built, {} rejected",
        summary.built, summary.rejected
    );
    Ok(())
}
