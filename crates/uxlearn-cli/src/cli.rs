use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "uxlearn",
    about = "uxlearn: browse UX lessons and check drag-and-drop exercises",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (TOML); `uxlearn.toml` is read when present
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Lesson catalog JSON; the bundled lessons are used when absent
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    /// Log filter, e.g. `debug` or `uxlearn_kernel=trace` (overrides UXLEARN_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List modules with per-module progress
    Modules {
        /// Comma-separated ids of lessons already completed
        #[arg(long, value_delimiter = ',')]
        completed: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one lesson and its steps
    Lesson {
        /// Lesson id, e.g. `3-1`
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a placement for one interactive step
    Check {
        /// Lesson id, e.g. `3-1`
        id: String,

        /// Zero-based step index within the lesson
        #[arg(long)]
        step: usize,

        /// Placement as `item=category`; repeat for each item
        #[arg(long = "place", value_name = "ITEM=CATEGORY", value_parser = parse_placement)]
        placements: Vec<(String, String)>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate lesson content and report well-formedness findings
    CatalogCheck {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay a reaction-time trial from click intervals
    Reaction {
        /// Milliseconds per click on the small target, one per [reaction] clicks_per_target
        #[arg(long, value_delimiter = ',', required = true)]
        small: Vec<u64>,

        /// Milliseconds per click on the large target, one per [reaction] clicks_per_target
        #[arg(long, value_delimiter = ',', required = true)]
        large: Vec<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the lesson query API over HTTP
    Serve {
        /// Bind address (host:port); overrides [server] bind
        #[arg(long)]
        bind: Option<String>,
    },
}

fn parse_placement(raw: &str) -> Result<(String, String), String> {
    // Categories never contain '='; item labels might.
    let (item, category) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected ITEM=CATEGORY, got `{raw}`"))?;
    if item.is_empty() || category.is_empty() {
        return Err(format!("expected ITEM=CATEGORY, got `{raw}`"));
    }
    Ok((item.to_string(), category.to_string()))
}
