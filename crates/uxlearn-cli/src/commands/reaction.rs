use crate::support::{Context, print_json_or_exit, yes_no};
use std::process;
use uxlearn_ux::{ReactionTrial, TargetSize};

/// Replay recorded click intervals through a trial, small target first.
pub fn run(ctx: &Context, small: Vec<u64>, large: Vec<u64>, json: bool) {
    let clicks = ctx.config.reaction.clicks_per_target;
    let mut trial = ReactionTrial::new(ctx.config.reaction.clone());
    let mut now: i64 = 0;

    for (target, intervals) in [(TargetSize::Small, small), (TargetSize::Large, large)] {
        if trial.target() != Some(target) || intervals.len() != clicks {
            eprintln!(
                "error: exactly {clicks} clicks per target are required, got {} for the {} target",
                intervals.len(),
                target_name(target)
            );
            process::exit(1);
        }
        if let Err(e) = trial.start(now) {
            eprintln!("error: {e}");
            process::exit(1);
        }
        for interval in intervals {
            now = now.saturating_add(i64::try_from(interval).unwrap_or(i64::MAX));
            if let Err(e) = trial.click(now) {
                eprintln!("error: {e}");
                process::exit(1);
            }
        }
    }

    let summary = trial.summary();

    if json {
        print_json_or_exit(&summary);
        return;
    }

    let avg = |ms: Option<u64>| ms.map_or_else(|| "-".to_string(), |ms| format!("{ms} ms"));
    println!("uxlearn reaction");
    println!(
        "  small target ({} px): {}",
        summary.small_target_px,
        avg(summary.small_average_ms)
    );
    println!(
        "  large target ({} px): {}",
        summary.large_target_px,
        avg(summary.large_average_ms)
    );
    println!(
        "  large target faster: {}",
        yes_no(summary.large_faster.unwrap_or(false))
    );
}

fn target_name(target: TargetSize) -> &'static str {
    match target {
        TargetSize::Small => "small",
        TargetSize::Large => "large",
    }
}
