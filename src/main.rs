use algo_stepper::algorithms::{HeapOrder, PivotStrategy};
use algo_stepper::utils::serialization::{export_json, load_trace, save_trace, trace_to_json};
use algo_stepper::{
    Params, Phase, RecordedTrace, Session, StepperConfig, StepperError, Topic, Visualizer,
    WebVisualizer,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(author, version, about = "Step-by-step algorithm visualizer", long_about = None)]
struct Cli {
    /// TOML file with speed, collection size, seed, web port and log filter
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Steps per second, 1 to 10
    #[arg(long, global = true)]
    speed: Option<u32>,
    /// Size of randomly generated collections
    #[arg(long, global = true)]
    size: Option<usize>,
    /// Seed for randomly generated collections
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every topic with its complexity
    Topics,
    /// Generate the full trace for a topic and print or store it
    Trace {
        #[command(flatten)]
        topic: TopicArgs,
        /// Print the trace as JSON instead of one line per step
        #[arg(long)]
        json: bool,
        /// Write the recorded trace (bincode, or JSON with --json) to a file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Play a topic at the configured speed, printing each step (Ctrl-C stops)
    Run {
        #[command(flatten)]
        topic: TopicArgs,
    },
    /// Summarize a trace recorded with `trace --output`
    Replay {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
    /// Interactive terminal visualizer
    Visualize {
        #[command(flatten)]
        topic: TopicArgs,
    },
    /// Web visualizer hosted on localhost
    VisualizeWeb {
        #[command(flatten)]
        topic: TopicArgs,
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Args)]
struct TopicArgs {
    /// Topic name, see `topics`
    #[arg(short, long)]
    topic: Topic,
    /// Comma-separated collection, e.g. 5,3,8,1
    #[arg(short, long)]
    input: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    target: Option<i64>,
    #[arg(long)]
    pivot: Option<PivotStrategy>,
    #[arg(long)]
    board_size: Option<usize>,
    #[arg(long)]
    heap_order: Option<HeapOrder>,
    /// Value inserted by heap-insert
    #[arg(long, allow_hyphen_values = true)]
    value: Option<i64>,
    /// Query word for the trie topics, lookup key for hash-search and hash-delete
    #[arg(long)]
    word: Option<String>,
    /// Comma-separated key=value pairs for the hash map topics
    #[arg(long)]
    entries: Option<String>,
    /// Comma-separated trie dictionary
    #[arg(long)]
    dictionary: Option<String>,
    /// Fibonacci argument
    #[arg(short, long)]
    n: Option<usize>,
    /// Comma-separated coin denominations
    #[arg(long)]
    coins: Option<String>,
    #[arg(long)]
    amount: Option<usize>,
    /// Start node for graph traversals
    #[arg(long)]
    start: Option<usize>,
}

impl TopicArgs {
    fn params(&self) -> CliResult<Params> {
        let mut params = Params::for_topic(self.topic);
        if let Some(target) = self.target {
            params.target = target;
        }
        if let Some(pivot) = self.pivot {
            params.pivot = pivot;
        }
        if let Some(board_size) = self.board_size {
            params.board_size = board_size;
        }
        if let Some(order) = self.heap_order {
            params.heap_order = order;
        }
        if let Some(value) = self.value {
            params.value = value;
        }
        if let Some(word) = &self.word {
            params.word = word.clone();
        }
        if let Some(dictionary) = &self.dictionary {
            params.dictionary = dictionary.split(',').map(|w| w.trim().to_string()).collect();
        }
        if let Some(entries) = &self.entries {
            params.entries = parse_entries(entries)?;
        }
        if let Some(n) = self.n {
            params.n = n;
        }
        if let Some(coins) = &self.coins {
            params.coins = parse_values(coins)?;
        }
        if let Some(amount) = self.amount {
            params.amount = amount;
        }
        if let Some(start) = self.start {
            params.start = start;
        }
        Ok(params.clamped(self.topic))
    }

    fn collection(&self) -> CliResult<Option<Vec<i64>>> {
        let Some(input) = &self.input else {
            return Ok(None);
        };
        let values = parse_values(input)?;
        self.topic.spec().check_input(&values)?;
        Ok(Some(values))
    }

    fn session(&self, config: &StepperConfig) -> CliResult<Session> {
        let params = self.params()?;
        Ok(match self.collection()? {
            Some(collection) => Session::with_collection(self.topic, params, config, collection),
            None => Session::new(self.topic, params, config),
        })
    }
}

fn parse_values(raw: &str) -> Result<Vec<i64>, StepperError> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<i64>()
                .map_err(|err| StepperError::InvalidInput(format!("'{item}': {err}")))
        })
        .collect()
}

fn parse_entries(raw: &str) -> Result<Vec<(String, String)>, StepperError> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.split_once('=')
                .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
                .ok_or_else(|| StepperError::InvalidInput(format!("'{item}': expected key=value")))
        })
        .collect()
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let mut config = StepperConfig::load_or_default(cli.config.as_ref())?;
    if let Some(speed) = cli.speed {
        config.speed = speed;
    }
    if let Some(size) = cli.size {
        config.collection_size = size;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    let config = config.normalized();

    let interactive = matches!(cli.command, Commands::Visualize { .. });
    init_logging(&config, interactive);

    match cli.command {
        Commands::Topics => run_topics(),
        Commands::Trace {
            topic,
            json,
            output,
        } => run_trace(&topic, &config, json, output)?,
        Commands::Run { topic } => run_paced(&topic, &config)?,
        Commands::Replay { input } => run_replay(input)?,
        Commands::Visualize { topic } => run_visualize(&topic, &config)?,
        Commands::VisualizeWeb { topic, port } => {
            run_visualize_web(&topic, &config, port.unwrap_or(config.web_port))?
        }
    }
    Ok(())
}

/// The terminal UI owns the screen, so it only logs when RUST_LOG asks for it.
fn init_logging(config: &StepperConfig, interactive: bool) {
    let fallback = if interactive { "off" } else { config.log_filter.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_topics() {
    for topic in Topic::ALL {
        let spec = topic.spec();
        println!(
            "{:<18} {:<32} time {:<18} space {}",
            spec.name, spec.title, spec.time, spec.space
        );
    }
}

fn run_trace(
    args: &TopicArgs,
    config: &StepperConfig,
    json: bool,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let session = args.session(config)?;
    let recorded = RecordedTrace::record(
        args.topic,
        session.params().clone(),
        session.snapshot().collection,
    );

    match (output, json) {
        (Some(path), true) => {
            export_json(&path, &recorded)?;
            println!("Trace with {} steps written to {}", recorded.trace.len(), path.display());
        }
        (Some(path), false) => {
            save_trace(&path, &recorded)?;
            println!("Trace with {} steps written to {}", recorded.trace.len(), path.display());
        }
        (None, true) => println!("{}", trace_to_json(&recorded)?),
        (None, false) => print_trace(&recorded),
    }
    Ok(())
}

fn print_trace(recorded: &RecordedTrace) {
    let spec = recorded.topic.spec();
    println!("{} ({})", spec.title, recorded.params.describe(recorded.topic));
    println!("collection: {:?}", recorded.collection);
    for (idx, step) in recorded.trace.iter().enumerate() {
        println!("{:>4}  {:<10} {}", idx + 1, step.kind.label(), step.note);
    }
    print_summary(recorded);
}

fn print_summary(recorded: &RecordedTrace) {
    let trace = &recorded.trace;
    println!(
        "steps: {}, comparisons: {}, accesses: {}",
        trace.len(),
        trace.comparisons(),
        trace.accesses()
    );
    println!("final collection: {:?}", recorded.final_collection());
    match trace.outcome() {
        Some(outcome) => println!("outcome: {}", outcome.banner()),
        None if recorded.topic.spec().search => println!("outcome: not found"),
        None => println!("outcome: nothing to do"),
    }
}

fn run_paced(args: &TopicArgs, config: &StepperConfig) -> CliResult<()> {
    let runtime = Runtime::new()?;
    let mut session = args.session(config)?;
    let report = runtime.block_on(async {
        let spec = session.topic().spec();
        println!("{} ({})", spec.title, session.params().describe(session.topic()));
        println!("collection: {:?}", session.snapshot().collection);
        session.start();

        let mut printed = 0;
        let mut ticker = tokio::time::interval(Duration::from_millis(20));
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        loop {
            tokio::select! {
                _ = &mut ctrl_c, if session.control().is_running() => session.stop(),
                _ = ticker.tick() => {}
            }
            let state = session.snapshot();
            if state.step_index > printed {
                printed = state.step_index;
                println!("{:>4}/{}  {}", state.step_index, state.steps_total, state.narration);
            }
            if session.phase() == Phase::Idle {
                break;
            }
        }
        session.wait().await
    })?;

    let state = session.snapshot();
    if let Some(report) = report {
        println!("{:?} after {}/{} steps", report.status, report.applied, report.total);
    }
    println!("collection: {:?}", state.collection);
    if let Some(banner) = state.banner {
        println!("outcome: {banner}");
    }
    Ok(())
}

fn run_replay(input: PathBuf) -> CliResult<()> {
    let recorded = load_trace(&input)?;
    println!(
        "{} ({})",
        recorded.topic.spec().title,
        recorded.params.describe(recorded.topic)
    );
    println!("collection: {:?}", recorded.collection);
    print_summary(&recorded);
    Ok(())
}

fn run_visualize(args: &TopicArgs, config: &StepperConfig) -> CliResult<()> {
    let runtime = Runtime::new()?;
    let session = args.session(config)?;
    let mut viz = Visualizer::for_session(session, runtime.handle().clone())?;
    viz.run()?;
    Ok(())
}

fn run_visualize_web(args: &TopicArgs, config: &StepperConfig, port: u16) -> CliResult<()> {
    let session = args.session(config)?;
    let mut viz = WebVisualizer::for_session(session, port)?;
    viz.wait_for_exit()?;
    Ok(())
}
