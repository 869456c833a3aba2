use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

use dakora_client::config::{load_config, ClientConfig};
use dakora_client::observability::logging;
use dakora_client::prompts::JsonMap;
use dakora_client::{Dakora, DakoraBuilder, NewPrompt, PromptUpdate, TraceFilter};

#[derive(Parser)]
#[command(name = "dakora")]
#[command(about = "Command line client for the Dakora prompt API", long_about = None)]
struct Cli {
    /// API base URL (defaults to DAKORA_BASE_URL, then https://api.dakora.io)
    #[arg(short, long, global = true)]
    url: Option<String>,

    /// API key (defaults to DAKORA_API_KEY)
    #[arg(short, long, global = true)]
    key: Option<String>,

    /// Project id (resolved from the API key when omitted)
    #[arg(short, long, global = true)]
    project: Option<String>,

    /// TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the authenticated user and default project
    Context,
    /// Manage prompt templates
    #[command(subcommand)]
    Prompts(PromptCommands),
    /// Inspect execution traces
    #[command(subcommand)]
    Traces(TraceCommands),
}

#[derive(Subcommand)]
enum PromptCommands {
    /// List prompt ids
    List,
    /// Show a prompt
    Get { id: String },
    /// Create a prompt
    Create {
        id: String,
        #[command(flatten)]
        source: TemplateSource,
        #[arg(long, default_value = NewPrompt::DEFAULT_VERSION)]
        version: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Update a prompt
    Update {
        id: String,
        #[arg(long)]
        template: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        version: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a prompt
    Delete { id: String },
    /// Render a prompt with key=value inputs
    Render {
        id: String,
        /// Input as key=value; values are parsed as JSON when possible
        #[arg(short, long = "input", value_parser = parse_input)]
        inputs: Vec<(String, Value)>,
        #[arg(long)]
        version: Option<String>,
        /// Print only the rendered text
        #[arg(long)]
        text: bool,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct TemplateSource {
    /// Template text
    #[arg(long)]
    template: Option<String>,
    /// Read the template text from a file
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum TraceCommands {
    /// List traces
    List {
        #[arg(long)]
        session: Option<String>,
        #[arg(long)]
        prompt: Option<String>,
        #[arg(long)]
        agent: Option<String>,
        #[arg(long, default_value_t = TraceFilter::DEFAULT_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Show a trace
    Get { trace_id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::from_env(),
    };
    logging::init(cli.log_level.as_deref().unwrap_or(&config.observability.log_level));

    let client = build_client(&cli, config)?;

    match cli.command {
        Commands::Context => print_json(&client.context().await?)?,
        Commands::Prompts(cmd) => run_prompts(&client, cmd).await?,
        Commands::Traces(cmd) => run_traces(&client, cmd).await?,
    }

    Ok(())
}

fn build_client(cli: &Cli, config: ClientConfig) -> Result<Dakora, Box<dyn std::error::Error>> {
    let mut builder = DakoraBuilder::from_config(config);
    if let Some(url) = &cli.url {
        builder = builder.base_url(url.as_str());
    }
    if let Some(key) = &cli.key {
        builder = builder.api_key(key.as_str());
    }
    if let Some(project) = &cli.project {
        builder = builder.project_id(project.as_str());
    }
    Ok(builder.build()?)
}

async fn run_prompts(client: &Dakora, cmd: PromptCommands) -> Result<(), Box<dyn std::error::Error>> {
    let prompts = client.prompts();
    match cmd {
        PromptCommands::List => print_json(&prompts.list().await?)?,
        PromptCommands::Get { id } => print_json(&prompts.get(&id).await?)?,
        PromptCommands::Create {
            id,
            source,
            version,
            description,
        } => {
            let template = read_template(source.template, source.file)?.unwrap_or_default();
            let mut prompt = NewPrompt::new(id, template).version(version);
            if let Some(description) = description {
                prompt = prompt.description(description);
            }
            print_json(&prompts.create(&prompt).await?)?;
        }
        PromptCommands::Update {
            id,
            template,
            file,
            version,
            description,
        } => {
            let update = PromptUpdate {
                template: read_template(template, file)?,
                version,
                description,
                ..Default::default()
            };
            if update.is_empty() {
                return Err("nothing to update: pass --template, --file, --version or --description".into());
            }
            print_json(&prompts.update(&id, &update).await?)?;
        }
        PromptCommands::Delete { id } => {
            prompts.delete(&id).await?;
            eprintln!("Deleted prompt '{}'", id);
        }
        PromptCommands::Render {
            id,
            inputs,
            version,
            text,
        } => {
            let inputs: JsonMap = inputs.into_iter().collect();
            let result = prompts.render(&id, &inputs, version.as_deref()).await?;
            if text {
                println!("{}", result.text);
            } else {
                print_json(&result)?;
            }
        }
    }
    Ok(())
}

async fn run_traces(client: &Dakora, cmd: TraceCommands) -> Result<(), Box<dyn std::error::Error>> {
    let traces = client.traces();
    match cmd {
        TraceCommands::List {
            session,
            prompt,
            agent,
            limit,
            offset,
        } => {
            let filter = TraceFilter {
                session_id: session,
                prompt_id: prompt,
                agent_id: agent,
                limit,
                offset,
                ..Default::default()
            };
            print_json(&traces.list_page(&filter).await?)?;
        }
        TraceCommands::Get { trace_id } => print_json(&traces.get(&trace_id).await?)?,
    }
    Ok(())
}

fn read_template(inline: Option<String>, file: Option<PathBuf>) -> std::io::Result<Option<String>> {
    match (inline, file) {
        (Some(text), _) => Ok(Some(text)),
        (None, Some(path)) => std::fs::read_to_string(path).map(Some),
        (None, None) => Ok(None),
    }
}

fn parse_input(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    if key.is_empty() {
        return Err(format!("empty input name in '{}'", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
