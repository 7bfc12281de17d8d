use clap::{Parser, Subcommand};
use cricket::config::{Environment, Environments};
use cricket::loader::{self, RenderState, Source};
use cricket::render::Page;
use cricket::sportskeeda;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "cricket")]
#[command(about = "Render and refresh the IPL points table")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the points table and fill the table body of a page
    Render(RenderArgs),
    /// Pull the live points table and store it as a flat snapshot
    Update {
        #[arg(long, default_value = sportskeeda::DEFAULT_OUTPUT)]
        output: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct RenderArgs {
    /// Host the page is served from, decides development or production
    #[arg(long, env = "CRICKET_HOST", default_value = "localhost")]
    host: String,
    #[arg(long, env = "CRICKET_DEV_API_BASE_URL")]
    dev_api_base_url: Option<String>,
    #[arg(long, env = "CRICKET_DEV_STATIC_BASE_URL")]
    dev_static_base_url: Option<String>,
    #[arg(long, env = "CRICKET_PROD_API_BASE_URL")]
    prod_api_base_url: Option<String>,
    #[arg(long, env = "CRICKET_PROD_STATIC_BASE_URL")]
    prod_static_base_url: Option<String>,
    /// Url or file to load. Defaults to the resource below the api base url.
    #[arg(long)]
    source: Option<String>,
    #[arg(long, default_value = loader::DEFAULT_RESOURCE)]
    resource: String,
    /// Page holding the table body. Without it only the <tbody> is printed.
    #[arg(long)]
    page: Option<PathBuf>,
    #[arg(long)]
    output: Option<PathBuf>,
}

impl RenderArgs {
    fn environments(&self) -> Environments {
        let mut environments = Environments::default();
        let overrides = [
            (Environment::Development, &self.dev_api_base_url, &self.dev_static_base_url),
            (Environment::Production, &self.prod_api_base_url, &self.prod_static_base_url),
        ];
        for (environment, api, statics) in overrides {
            let record = environments.get_mut(environment);
            if let Some(api) = api {
                record.api_base_url = api.clone();
            }
            if let Some(statics) = statics {
                record.static_base_url = statics.clone();
            }
        }
        environments
    }
}

#[tokio::main]
async fn main() {
    // Run with RUST_LOG=debug for the details
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let result = match args.command {
        Command::Render(render) => run_render(render).await,
        Command::Update { output } => sportskeeda::update(&output).await.map(|_| ()),
    };
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run_render(args: RenderArgs) -> cricket::Result<()> {
    let config = args.environments().resolve(&args.host);
    let source = match &args.source {
        Some(location) => Source::parse(location),
        None => Source::resolve(&config.api_base_url, &args.resource)?,
    };

    let (state, html) = match &args.page {
        Some(path) => {
            let template = read(path).await?;
            loader::run(&source, &Page::new(template)).await?
        }
        None => cricket::render_table(&source).await,
    };

    match &args.output {
        Some(path) => tokio::fs::write(path, html)
            .await
            .map_err(|source| cricket::Error::Io {
                path: path.clone(),
                source,
            })?,
        None => println!("{}", html),
    }
    if let RenderState::Failed(reason) = state {
        log::warn!("Rendered an error row instead of the table: {}", reason);
    }
    Ok(())
}

async fn read(path: &Path) -> cricket::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| cricket::Error::Io {
            path: path.to_path_buf(),
            source,
        })
}
