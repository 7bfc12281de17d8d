//! Renders a points table file from disk and prints the table body.

use cricket::loader::Source;

#[tokio::main]
async fn main() {
    // Run with RUST_LOG=debug cargo run --example render_local -- path/to/points_table.json
    env_logger::init();

    let location = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("src/standings/flat.json"));
    let (state, html) = cricket::render_table(&Source::parse(&location)).await;
    println!("{:?}", state);
    println!("{}", html);
}
