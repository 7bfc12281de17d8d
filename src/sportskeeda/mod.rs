//! <https://www.sportskeeda.com/cricket/ipl-points-table>
//!
//! Pulls the live points table and stores it in the flat `{"points": [...]}` form the renderer
//! reads. The api does not always let us in directly, in which case we go through a cors proxy.

use crate::error::{Error, Result};
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

pub const API_URL: &str = "https://cf-gotham.sportskeeda.com/cricket/ipl/points-table";
pub const PROXY_PREFIX: &str = "https://corsproxy.io/?";
pub const DEFAULT_OUTPUT: &str = "points_table.json";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Snapshot as written to disk. Readers only care about `points`.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub points: Vec<Value>,
}

/// Tries the api itself first, then the proxy.
pub async fn fetch_points_table() -> Result<Snapshot> {
    fetch_points_table_from(API_URL, PROXY_PREFIX).await
}

/// Same as [fetch_points_table], against any api url and proxy. The proxy gets the api url
/// appended as is.
pub async fn fetch_points_table_from(api_url: &str, proxy_prefix: &str) -> Result<Snapshot> {
    let client = create_client()?;
    let data = match fetch_json(&client, api_url).await {
        Ok(data) => data,
        Err(e) => {
            warn!("Direct API access failed ({}), trying with CORS proxy", e);
            let proxy_url = format!("{}{}", proxy_prefix, api_url);
            fetch_json(&client, &proxy_url).await?
        }
    };
    let points = flatten(&data).ok_or(Error::UnrecognizedShape)?;
    info!("API data fetched successfully: {} teams", points.len());
    Ok(Snapshot { points })
}

/// Fetch and write to `output`. Leaves any previous snapshot alone on failure.
pub async fn update(output: &Path) -> Result<usize> {
    info!("Fetching points table data from {}", API_URL);
    let snapshot = match fetch_points_table().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("Error fetching points table data: {}", e);
            warn!("Unable to update points table data. The table may show outdated information.");
            return Err(e);
        }
    };
    save(&snapshot, output).await?;
    Ok(snapshot.points.len())
}

pub async fn save(snapshot: &Snapshot, output: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(snapshot)?;
    tokio::fs::write(output, content)
        .await
        .map_err(|source| Error::Io {
            path: output.to_path_buf(),
            source,
        })?;
    info!(
        "Points table data saved to {} at {}",
        output.display(),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(())
}

/// The api nests teams as `table[0].table[*]`, where an entry is either a `group` of teams or a
/// team on its own. Some responses instead carry a plain `teams` or `standings` list. Returns
/// `None` when there is none of these.
pub fn flatten(data: &Value) -> Option<Vec<Value>> {
    if let Some(entries) = nested_entries(data) {
        let mut points = vec![];
        for entry in entries {
            match entry.get("group").and_then(Value::as_array) {
                Some(group) => points.extend(group.iter().cloned()),
                None => points.push(entry.clone()),
            }
        }
        return Some(points);
    }
    ["teams", "standings"]
        .iter()
        .find_map(|key| data.get(*key).and_then(Value::as_array))
        .cloned()
}

fn nested_entries(data: &Value) -> Option<&Vec<Value>> {
    data.get("table")?
        .as_array()?
        .first()?
        .get("table")?
        .as_array()
}

async fn fetch_json(client: &reqwest::Client, url: &str) -> Result<Value> {
    debug!("Fetching data from {}", url);
    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::Status {
            url: url.to_string(),
            status,
        });
    }
    let content = resp.text().await?;
    Ok(serde_json::from_str(&content)?)
}

/// The api refuses anything that does not look like a browser coming from the main site.
fn create_client() -> Result<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/json"),
    );
    headers.insert(
        reqwest::header::REFERER,
        reqwest::header::HeaderValue::from_static("https://www.sportskeeda.com/"),
    );
    let client = reqwest::ClientBuilder::new()
        .user_agent(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
        )
        .cookie_store(true)
        .timeout(REQUEST_TIMEOUT)
        .default_headers(headers)
        .build()?;
    Ok(client)
}
