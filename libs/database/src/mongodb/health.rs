use mongodb::{Client, bson::doc};
use std::time::{Duration, Instant};

/// Round-trip a `ping` to the server, returning the latency.
pub async fn ping(client: &Client) -> Result<Duration, mongodb::error::Error> {
    let started = Instant::now();
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await?;
    Ok(started.elapsed())
}
