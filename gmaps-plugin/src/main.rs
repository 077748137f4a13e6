use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use gmaps_plugin_rs::types::type_declarations;
use gmaps_plugin_rs::{
    BuildContext, BuildMode, GoogleMapsPlugin, PluginOptions, PluginPipeline, VIRTUAL_MODULE_ID,
};
use log::info;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// gmaps-plugin: Wire Google Maps into a React entry file and generate the `@google-maps/map` module
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(flatten)]
    plugin: PluginArgs,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct PluginArgs {
    /// Path to a JSON file with the plugin options (apiKey, libraries, debug, mapDefaults)
    #[clap(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Google Maps API key. Overrides the config file
    #[clap(long, global = true)]
    pub api_key: Option<String>,

    /// Google Maps library to load. Repeat to load several; replaces the configured list
    #[clap(long = "library", global = true)]
    pub libraries: Vec<String>,

    /// Mount the devtools panel next to every map
    #[clap(long, global = true)]
    pub debug: bool,

    /// Map default as KEY=VALUE. VALUE is parsed as JSON, falling back to a plain string
    #[clap(long = "map-default", global = true)]
    pub map_defaults: Vec<String>,

    /// Build mode, one of development or production. Defaults to NODE_ENV
    #[clap(long, global = true)]
    pub mode: Option<String>,

    /// Project root used to look for installed packages. Defaults to the current directory
    #[clap(long, global = true)]
    pub root: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Wrap the render call of an entry file (main.tsx / main.jsx) in APIProvider
    Transform {
        /// Path to the entry file
        input: PathBuf,

        /// Path to write the result to. Defaults to stdout
        #[clap(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the generated `@google-maps/map` module
    VirtualModule {
        /// Path to write the module to. Defaults to stdout
        #[clap(short, long)]
        output: Option<PathBuf>,
    },

    /// Print TypeScript declarations for the `@google-maps/map` module
    Types {
        /// Path to write the declarations to. Defaults to stdout
        #[clap(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate the configuration for the selected build mode
    Check,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Types { output } => write_output(output.as_deref(), &type_declarations()),
        Command::Check => {
            let ctx = build_context(&cli.plugin)?;
            let plugin = GoogleMapsPlugin::new(plugin_options(&cli.plugin)?, &ctx)?;
            let options = plugin.options();
            println!(
                "OK ({} build): apiKey {}, libraries [{}], debug {}",
                ctx.mode,
                if options.usable_api_key().is_some() {
                    "set"
                } else {
                    "missing"
                },
                options.libraries.join(", "),
                options.debug
            );
            Ok(())
        }
        Command::VirtualModule { output } => {
            let pipeline = pipeline(&cli.plugin)?;
            let code = pipeline
                .import(VIRTUAL_MODULE_ID)
                .ok_or_else(|| anyhow!("No plugin resolved {}", VIRTUAL_MODULE_ID))?;
            write_output(output.as_deref(), &code)
        }
        Command::Transform { input, output } => {
            let pipeline = pipeline(&cli.plugin)?;
            let code = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read input file: {}", input.display()))?;
            // Hosts hand plugins absolute module ids
            let id = std::fs::canonicalize(&input)
                .unwrap_or_else(|_| input.clone())
                .display()
                .to_string();

            let result = match pipeline.transform(&code, &id) {
                Some(out) => out.code,
                None => {
                    info!("{} was not modified", id);
                    code
                }
            };
            write_output(output.as_deref(), &result)
        }
    }
}

fn pipeline(args: &PluginArgs) -> anyhow::Result<PluginPipeline> {
    let ctx = build_context(args)?;
    let plugin = GoogleMapsPlugin::new(plugin_options(args)?, &ctx)?;
    Ok(PluginPipeline::new().with_plugin(plugin))
}

fn build_context(args: &PluginArgs) -> anyhow::Result<BuildContext> {
    let mode = match &args.mode {
        Some(mode) => mode.parse::<BuildMode>()?,
        None => BuildMode::from_env(),
    };
    let root = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };
    Ok(BuildContext::new(mode, root))
}

fn plugin_options(args: &PluginArgs) -> anyhow::Result<PluginOptions> {
    let mut options = match &args.config {
        Some(path) => PluginOptions::from_path(path)?,
        None => PluginOptions::default(),
    };

    if let Some(api_key) = &args.api_key {
        options.api_key = Some(api_key.clone());
    }
    if !args.libraries.is_empty() {
        options.libraries = args.libraries.clone();
    }
    if args.debug {
        options.debug = true;
    }
    if !args.map_defaults.is_empty() {
        let overrides = parse_map_defaults(&args.map_defaults)?;
        options.map_defaults = options.map_defaults.merged(&overrides)?;
    }
    Ok(options)
}

fn parse_map_defaults(pairs: &[String]) -> anyhow::Result<Map<String, Value>> {
    let mut overrides = Map::new();
    for pair in pairs {
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid --map-default `{}`, expected KEY=VALUE", pair))?;
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        overrides.insert(key.trim().to_string(), value);
    }
    Ok(overrides)
}

fn write_output(output: Option<&Path>, contents: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => std::fs::write(path, contents)
            .with_context(|| format!("Failed to write output to {}", path.display())),
        None => {
            print!("{}", contents);
            Ok(())
        }
    }
}
