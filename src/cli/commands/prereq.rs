//! Prereq command handler

use degree_navigator::config::Config;
use degree_navigator::core::prereq::{
    count_sequences, generate_sequences, tokenize, PrereqNode, PrereqParser,
};
use degree_navigator::{error, warn};
use serde::Serialize;

#[derive(Serialize)]
struct PrereqOutput<'a> {
    expression: &'a str,
    tree: &'a PrereqNode,
    sequence_count: usize,
    sequences: Vec<Vec<String>>,
}

/// Parse `expression` and print its tree and sequences.
pub fn run(expression: &str, as_json: bool, config: &Config) {
    let parser = PrereqParser::with_max_depth(tokenize(expression), config.prereq.max_depth);
    let tree = match parser.parse() {
        Ok(tree) => tree,
        Err(e) => {
            error!("Failed to parse requisites {expression:?}: {e}");
            eprintln!("✗ Invalid requisite expression: {e}");
            return;
        }
    };

    let count = count_sequences(&tree);
    let limit = config.prereq.max_sequences;
    let sequences = if limit > 0 && count > limit {
        warn!("Expression expands to {count} sequences (limit {limit}); not enumerating");
        Vec::new()
    } else {
        generate_sequences(&tree)
    };

    if as_json {
        let output = PrereqOutput {
            expression,
            tree: &tree,
            sequence_count: count,
            sequences,
        };
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("✗ Failed to serialize result: {e}"),
        }
        return;
    }

    println!("Tree: {tree}");
    println!("Depth: {}  Sequences: {count}", tree.depth());
    for (idx, sequence) in sequences.iter().enumerate() {
        println!("  Option {}: {}", idx + 1, sequence.join(" -> "));
    }
    if sequences.is_empty() && count > 0 {
        println!("  (too many sequences to list; raise `max_sequences` to enumerate)");
    }
}
