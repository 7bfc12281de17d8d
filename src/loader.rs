//! One fetch, one render. Acquire the points table document, normalize it, fill the table body.

use crate::error::{Error, Result};
use crate::generic_structs::Standings;
use crate::render::{Page, TableBody};
use crate::standings;
use log::{debug, info, warn};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_RESOURCE: &str = "Backend/points_table.json";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the points table document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(url::Url),
    File(PathBuf),
}

impl Source {
    /// Anything that parses as an http(s) url is fetched, everything else is read from disk.
    /// `file://` urls are read from disk too.
    pub fn parse(location: &str) -> Self {
        match url::Url::parse(location) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Source::Url(url),
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => Source::File(path),
                Err(()) => Source::File(PathBuf::from(location)),
            },
            _ => Source::File(PathBuf::from(location)),
        }
    }

    /// Join `resource` onto a base location. Windows style separators in the resource are
    /// turned into forward slashes first.
    pub fn resolve(base: &str, resource: &str) -> Result<Self> {
        let resource = normalize_resource(resource);
        match Source::parse(base) {
            Source::Url(mut url) => {
                if !url.path().ends_with('/') {
                    let path = format!("{}/", url.path());
                    url.set_path(&path);
                }
                Ok(Source::Url(url.join(&resource)?))
            }
            Source::File(dir) => Ok(Source::File(dir.join(resource))),
        }
    }

    pub async fn fetch(&self) -> Result<String> {
        match self {
            Source::Url(url) => fetch_url(url).await,
            Source::File(path) => read_file(path).await,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{}", url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn normalize_resource(resource: &str) -> String {
    if resource.contains('\\') {
        warn!(
            "Resource path {:?} uses backslashes, treating them as path separators",
            resource
        );
        resource.replace('\\', "/")
    } else {
        resource.to_string()
    }
}

async fn fetch_url(url: &url::Url) -> Result<String> {
    debug!("Fetching data from {}", url);
    let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    let resp = client.get(url.as_str()).send().await?;
    let status = resp.status();
    if !status.is_success() {
        warn!("Request was not successful, status: {}", status);
        return Err(Error::Status {
            url: url.to_string(),
            status,
        });
    }
    Ok(resp.text().await?)
}

async fn read_file(path: &Path) -> Result<String> {
    debug!("Reading data from {}", path.display());
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Fetch and normalize, without touching any table.
pub async fn load(source: &Source) -> Result<Standings> {
    let content = source.fetch().await?;
    standings::normalize(&content)
}

/// Where a render cycle ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderState {
    Awaiting,
    Rendered(usize),
    Failed(String),
}

/// A table body together with what happened to it last.
#[derive(Debug, Clone)]
pub struct Renderer {
    body: TableBody,
    state: RenderState,
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new(TableBody::default())
    }
}

impl Renderer {
    pub fn new(body: TableBody) -> Self {
        Renderer {
            body,
            state: RenderState::Awaiting,
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn body(&self) -> &TableBody {
        &self.body
    }

    /// Moves out of [RenderState::Awaiting] according to the outcome of a load.
    pub fn apply(&mut self, outcome: Result<Standings>) -> &RenderState {
        match outcome {
            Ok(standings) => {
                self.body.replace_rows(&standings);
                info!("Rendered {} teams into #{}", standings.len(), self.body.id());
                self.state = RenderState::Rendered(standings.len());
            }
            Err(e) => {
                warn!("Failed to load points table: {}", e);
                self.body
                    .show_error(&format!("Unable to load the points table: {}", e));
                self.state = RenderState::Failed(e.to_string());
            }
        }
        &self.state
    }

    pub async fn run(&mut self, source: &Source) -> &RenderState {
        info!("Loading points table from {}", source);
        self.state = RenderState::Awaiting;
        let outcome = load(source).await;
        self.apply(outcome)
    }
}

/// Full cycle against a page template. The page must contain the table body before anything is
/// fetched, otherwise there is nowhere to put the result.
pub async fn run(source: &Source, page: &Page) -> Result<(RenderState, String)> {
    let mut renderer = Renderer::default();
    if !page.has_element(renderer.body().id()) {
        return Err(Error::MissingElement(renderer.body().id().to_owned()));
    }
    let state = renderer.run(source).await.clone();
    let html = page.inject(renderer.body())?;
    Ok((state, html))
}
