use crate::support::{Context, load_service_or_exit, print_json_or_exit};
use std::collections::BTreeSet;

pub fn run(ctx: &Context, completed: Vec<String>, json: bool) {
    let service = load_service_or_exit(ctx);
    let completed: BTreeSet<String> = completed
        .into_iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();
    let cards = service.modules(&completed);

    if json {
        print_json_or_exit(&cards);
        return;
    }

    println!("uxlearn modules");
    println!("  catalog: {}", ctx.catalog_label());
    for card in &cards {
        println!(
            "  {} {} ({}): {}/{} lessons, {}%",
            card.number, card.title, card.key, card.completed, card.lesson_count, card.progress_percent
        );
        for lesson in &card.lessons {
            let mark = if lesson.completed { "x" } else { " " };
            println!("    [{mark}] {} {}", lesson.id, lesson.title);
        }
    }
}
