use crate::support::{Context, load_service_or_exit, print_json_or_exit};
use std::process;
use uxlearn_ux::CheckRequest;

pub struct Args {
    pub id: String,
    pub step: usize,
    pub placements: Vec<(String, String)>,
    pub json: bool,
}

pub fn run(ctx: &Context, args: Args) {
    let service = load_service_or_exit(ctx);
    let request = CheckRequest {
        lesson_id: args.id,
        step: args.step,
        placements: args.placements,
    };
    let view = service.check(&request).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(1);
    });

    if args.json {
        print_json_or_exit(&view);
    } else {
        println!("uxlearn check {} step {}", view.lesson_id, view.step);
        println!(
            "  result: {}",
            if view.correct { "correct" } else { "incorrect" }
        );
        println!("  feedback: {}", view.feedback);
        for mismatch in &view.mismatches {
            println!("  mismatch in {}:", mismatch.category);
            if !mismatch.missing.is_empty() {
                println!("    missing: {}", mismatch.missing.join(", "));
            }
            if !mismatch.unexpected.is_empty() {
                println!("    unexpected: {}", mismatch.unexpected.join(", "));
            }
        }
    }

    if !view.correct {
        process::exit(1);
    }
}
