pub mod config;
pub mod error;
mod generic_structs;
pub mod loader;
pub mod render;
pub mod sportskeeda;
pub mod standings;
#[cfg(test)]
mod test_server;

pub use config::{Config, Environment, Environments};
pub use error::{Error, Result};
pub use generic_structs::*;

/// Load the points table from `source` and give back its rows as a `<tbody>`.
pub async fn render_table(source: &loader::Source) -> (loader::RenderState, String) {
    let mut renderer = loader::Renderer::default();
    let state = renderer.run(source).await.clone();
    (state, renderer.body().to_html())
}
