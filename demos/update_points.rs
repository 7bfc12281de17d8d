//! Example of fetching the live table and showing the result.

use cricket::standings::Payload;

#[tokio::main]
async fn main() {
    // Run with RUST_LOG=debug cargo run --example update_points
    env_logger::init();

    let snapshot = cricket::sportskeeda::fetch_points_table().await.unwrap();
    let payload = serde_json::json!({ "points": snapshot.points });
    let standings = Payload::from_value(payload).unwrap().into_standings();
    println!("{}", standings);
}
