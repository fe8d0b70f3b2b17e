//! Debug script to see what the analysis derives from a data model.

use std::path::PathBuf;

use serde_json::json;
use zodgen_compiler::analysis::Analysis;
use zodgen_compiler::frontend::load_datamodel;

fn main() {
    let Some(path) = std::env::args().nth(1).map(PathBuf::from) else {
        eprintln!("usage: debug_facts <dmmf.json>");
        std::process::exit(2);
    };

    let model = match load_datamodel(&path) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            std::process::exit(1);
        }
    };

    let analysis = Analysis::run(&model);
    let edges: Vec<_> = analysis
        .relations
        .edges()
        .into_iter()
        .map(|(id, reverse)| json!({ "entity": id.entity, "field": id.field, "reverse": reverse }))
        .collect();

    let report = json!({
        "facts": analysis.facts,
        "edges": edges,
    });
    match serde_json::to_string_pretty(&report) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Error: {}", e),
    }
}
