use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use crossterm::style::Stylize;
use hal::capability::{CapabilityCreate, CapabilityCreateOptions};
use hal::cluster::{ClusterClient, SecretClient};
use hal::component::{ComponentCreate, ComponentCreateOptions, DEFAULT_PORT};
use hal::config::Config;
use hal::link::{LinkCreate, LinkCreateOptions};
use hal::operation::{CreateOperation, DeleteOperation, GenericOperation, OperationDelegate};
use hal::resource::{
    known_resource_types, DeleteOptions, HalkyonEntity, PropagationPolicy, ResourceClient,
    ResourceType,
};
use hal::ui::TerminalPrompter;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Create and link Halkyon components, capabilities and links
#[derive(Parser, Debug)]
#[command(name = "hal", version, about, long_about = None, after_help = kinds_help())]
struct Args {
    /// Cluster API server URL
    #[arg(long, global = true)]
    server: Option<String>,

    /// Namespace to act in
    #[arg(short, long, global = true)]
    namespace: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage components
    Component {
        #[command(subcommand)]
        action: ComponentAction,
    },
    /// Manage capabilities
    Capability {
        #[command(subcommand)]
        action: CapabilityAction,
    },
    /// Manage links between components and their targets
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },
    /// Show or persist connection settings (--server, --namespace)
    Config(ConfigArgs),
}

#[derive(Subcommand, Debug)]
enum ComponentAction {
    /// Create the named component
    Create(ComponentCreateArgs),
    /// Delete the named component
    Delete(DeleteArgs),
}

#[derive(Subcommand, Debug)]
enum CapabilityAction {
    /// Create the named capability
    Create(CapabilityCreateArgs),
    /// Delete the named capability
    Delete(DeleteArgs),
}

#[derive(Subcommand, Debug)]
enum LinkAction {
    /// Link the current (or target) component to the specified capability or component
    #[command(after_help = "Example:\n  # links the client-sb to the backend-sb component\n  hal link create client-to-backend -t backend-sb")]
    Create(LinkCreateArgs),
    /// Delete the named link
    Delete(DeleteArgs),
}

#[derive(ClapArgs, Debug)]
struct DeleteArgs {
    /// Name of the resource to delete (prompted when omitted)
    name: Option<String>,

    /// How dependent objects are cleaned up
    #[arg(long, value_enum, default_value = "foreground")]
    cascade: Cascade,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Cascade {
    Foreground,
    Background,
    Orphan,
}

impl DeleteArgs {
    fn options(&self) -> DeleteOptions {
        let propagation_policy = match self.cascade {
            Cascade::Foreground => PropagationPolicy::Foreground,
            Cascade::Background => PropagationPolicy::Background,
            Cascade::Orphan => PropagationPolicy::Orphan,
        };
        DeleteOptions { propagation_policy }
    }
}

#[derive(ClapArgs, Debug)]
struct ComponentCreateArgs {
    /// Name of the component (generated from the runtime when omitted)
    name: Option<String>,

    /// Runtime to use
    #[arg(short, long, default_value = "")]
    runtime: String,

    /// Runtime version (defaults to the runtime's default)
    #[arg(long = "runtime-version", default_value = "")]
    runtime_version: String,

    /// Port the component listens on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Expose the component outside the cluster
    #[arg(short = 'x', long)]
    expose: bool,

    /// Deploy from a built image instead of pushed sources
    #[arg(long)]
    build_mode: bool,

    /// Additional environment variables as 'name=value' pairs
    #[arg(short, long = "env")]
    env: Vec<String>,

    /// Print the manifest instead of creating it
    #[arg(long)]
    dry_run: bool,
}

#[derive(ClapArgs, Debug)]
struct CapabilityCreateArgs {
    /// Name of the capability (generated from the type when omitted)
    name: Option<String>,

    /// Capability category
    #[arg(short, long, default_value = "")]
    category: String,

    /// Capability type within the category
    #[arg(short = 't', long = "type", default_value = "")]
    kind: String,

    /// Version of the capability type
    #[arg(long = "capability-version", default_value = "")]
    capability_version: String,

    /// Parameters as 'name=value' pairs
    #[arg(short, long = "param")]
    param: Vec<String>,

    /// Print the manifest instead of creating it
    #[arg(long)]
    dry_run: bool,
}

#[derive(ClapArgs, Debug)]
struct LinkCreateArgs {
    /// Name of the link (generated from the target when omitted)
    name: Option<String>,

    /// Name of the component or capability to link to
    #[arg(short, long, default_value = "")]
    target: String,

    /// Secret name to reference if using Secret type
    #[arg(short, long, default_value = "")]
    secret: String,

    /// Environment variables as 'name=value' pairs
    #[arg(short, long = "env")]
    env: Vec<String>,

    /// Print the manifest instead of creating it
    #[arg(long)]
    dry_run: bool,
}

#[derive(ClapArgs, Debug)]
struct ConfigArgs {
    /// Bearer token to send to the API server
    #[arg(long)]
    token: Option<String>,

    /// Accept self-signed server certificates
    #[arg(long)]
    insecure: Option<bool>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

/// Help footer listing the resource kinds hal manages
fn kinds_help() -> String {
    let kinds: Vec<&str> = known_resource_types().iter().map(|t| t.as_str()).collect();
    format!("Resource kinds: {}", kinds.join(", "))
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {:?}: {}", log_path, e);
            return None;
        },
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("hal started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("hal").join("hal.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".hal").join("hal.log");
    }
    PathBuf::from("hal.log")
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let log_guard = setup_logging(args.log_level);

    let result = run(args).await;

    if let Err(err) = result {
        tracing::error!("{:#}", err);
        drop(log_guard);
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::load();

    if let Command::Config(config_args) = &args.command {
        return configure(&mut config, &args, config_args);
    }

    let server = config.effective_server(args.server.as_deref());
    let namespace = config.effective_namespace(args.namespace.as_deref());
    tracing::info!("Using server: {}, namespace: {}", server, namespace);

    let cluster = ClusterClient::new(
        &server,
        &namespace,
        config.effective_token(),
        config.insecure_skip_tls_verify,
    )
    .context("Failed to initialize cluster client")?;
    let prompt = TerminalPrompter::new();

    match args.command {
        Command::Component { action } => {
            let client = ResourceClient::new(ResourceType::Component, &cluster);
            match action {
                ComponentAction::Create(a) => {
                    let options = ComponentCreateOptions {
                        runtime: a.runtime,
                        version: a.runtime_version,
                        port: a.port,
                        expose: a.expose,
                        build_mode: a.build_mode,
                        env_pairs: a.env,
                    };
                    let delegate =
                        CreateOperation::new(ComponentCreate::new(&prompt, options)).dry_run(a.dry_run);
                    execute("create", &client, a.name, Box::new(delegate), a.dry_run).await
                },
                ComponentAction::Delete(a) => {
                    let delegate = DeleteOperation::new(&client, &prompt).with_options(a.options());
                    execute("delete", &client, a.name, Box::new(delegate), false).await
                },
            }
        },
        Command::Capability { action } => {
            let client = ResourceClient::new(ResourceType::Capability, &cluster);
            match action {
                CapabilityAction::Create(a) => {
                    let options = CapabilityCreateOptions {
                        category: a.category,
                        kind: a.kind,
                        version: a.capability_version,
                        params: a.param,
                    };
                    let delegate = CreateOperation::new(CapabilityCreate::new(&prompt, options))
                        .dry_run(a.dry_run);
                    execute("create", &client, a.name, Box::new(delegate), a.dry_run).await
                },
                CapabilityAction::Delete(a) => {
                    let delegate = DeleteOperation::new(&client, &prompt).with_options(a.options());
                    execute("delete", &client, a.name, Box::new(delegate), false).await
                },
            }
        },
        Command::Link { action } => {
            let client = ResourceClient::new(ResourceType::Link, &cluster);
            match action {
                LinkAction::Create(a) => {
                    let capabilities = ResourceClient::new(ResourceType::Capability, &cluster);
                    let components = ResourceClient::new(ResourceType::Component, &cluster);
                    let secrets = SecretClient::new(&cluster);
                    let options = LinkCreateOptions {
                        target_name: a.target,
                        secret: a.secret,
                        env_pairs: a.env,
                    };
                    let link = LinkCreate::new(&capabilities, &components, &secrets, &prompt, options);
                    let delegate = CreateOperation::new(link).dry_run(a.dry_run);
                    execute("create", &client, a.name, Box::new(delegate), a.dry_run).await
                },
                LinkAction::Delete(a) => {
                    let delegate = DeleteOperation::new(&client, &prompt).with_options(a.options());
                    execute("delete", &client, a.name, Box::new(delegate), false).await
                },
            }
        },
        Command::Config(_) => Ok(()),
    }
}

async fn execute<'a>(
    operation_name: &'static str,
    client: &'a dyn HalkyonEntity,
    name: Option<String>,
    delegate: Box<dyn OperationDelegate + 'a>,
    quiet: bool,
) -> Result<()> {
    let mut operation = GenericOperation::new(operation_name, client, name, delegate);
    operation
        .execute()
        .await
        .with_context(|| format!("Failed to {} {}", operation_name, operation.resource_type))?;

    if !quiet {
        println!(
            "{} {}d {} '{}' in namespace '{}'",
            "\u{2714}".green(),
            operation.operation_name(),
            operation.resource_type,
            operation.name,
            client.namespace()
        );
    }
    Ok(())
}

fn configure(config: &mut Config, args: &Args, config_args: &ConfigArgs) -> Result<()> {
    let mut changed = false;

    if let Some(server) = &args.server {
        url::Url::parse(server).with_context(|| format!("Invalid server URL '{}'", server))?;
        config.server = Some(server.clone());
        changed = true;
    }
    if let Some(namespace) = &args.namespace {
        config.namespace = Some(namespace.clone());
        changed = true;
    }
    if let Some(token) = &config_args.token {
        config.token = Some(token.clone()).filter(|t| !t.is_empty());
        changed = true;
    }
    if let Some(insecure) = config_args.insecure {
        config.insecure_skip_tls_verify = insecure;
        changed = true;
    }

    if changed {
        config.save().context("Failed to save configuration")?;
        tracing::info!("Configuration saved");
    }

    println!("server:    {}", config.effective_server(None));
    println!("namespace: {}", config.effective_namespace(None));
    println!(
        "token:     {}",
        if config.effective_token().is_some() { "set" } else { "not set" }
    );
    if let Some(path) = Config::config_path() {
        println!("file:      {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_help_lists_resource_kinds() {
        let help = Args::command().render_help().to_string();
        assert!(help.contains("Resource kinds: capability, component, link"), "{}", help);
    }

    #[test]
    fn test_delete_cascade_maps_to_policy() {
        let args = Args::try_parse_from(["hal", "link", "delete", "old", "--cascade", "orphan"]).unwrap();
        let Command::Link {
            action: LinkAction::Delete(delete),
        } = args.command
        else {
            panic!("expected link delete");
        };
        assert_eq!(delete.name.as_deref(), Some("old"));
        assert_eq!(delete.options().propagation_policy, PropagationPolicy::Orphan);
    }
}
