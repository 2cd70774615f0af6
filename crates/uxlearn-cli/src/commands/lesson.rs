use crate::support::{Context, describe_step, load_service_or_exit, print_json_or_exit};
use std::process;

pub fn run(ctx: &Context, id: String, json: bool) {
    let service = load_service_or_exit(ctx);
    let view = service.lesson(&id).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(1);
    });

    if json {
        print_json_or_exit(&view);
        return;
    }

    println!("uxlearn lesson {}", view.lesson.id);
    println!("  title: {}", view.lesson.title);
    println!("  category: {} (module {})", view.category, view.module_number);
    println!("  steps: {}", view.lesson.examples.len());
    for (index, example) in view.lesson.examples.iter().enumerate() {
        println!("    {index} {}: {}", example.kind(), describe_step(example));
    }
}
