//! Headless route planning
//!
//! This example demonstrates a full from/to session without a map widget:
//! - Building a controller around a recording map
//! - Fetching and picking suggestions
//! - Submitting a query and reading the distance
//! - Swapping the endpoints

use anyhow::Context;
use mapmark::{
    MapController, RecordingMap, SessionConfigBuilder, SlotId, SuggestOutcome,
    providers::{Coordinate, StaticLocation, StaticPermissions},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mapmark::init_logging(tracing::Level::INFO)?;

    let controller = MapController::builder()
        .config(SessionConfigBuilder::route().suggestion_limit(3)?.build())
        .location(StaticLocation::new(Coordinate::new(48.8566, 2.3522)))
        .permissions(StaticPermissions::grant_when_asked())
        .build(RecordingMap::new());

    controller.on_map_ready().await;

    println!("Typing 'Lond' in the from box:");
    if let SuggestOutcome::Updated(suggestions) =
        controller.on_query_text_change(SlotId::From, "Lond").await?
    {
        for (i, candidate) in suggestions.iter().enumerate() {
            println!("  {}. {} {}", i + 1, candidate.label, candidate.coordinate);
        }
    }

    let from = controller
        .on_suggestion_click(SlotId::From, 0)
        .await?
        .context("no suggestion to pick")?;
    println!("\nFrom: {}", from.label);

    let to = controller
        .on_query_submit(SlotId::To, "Berlin")
        .await?
        .context("Berlin not found")?;
    println!("To:   {}", to.label);
    println!("{}", controller.distance().await);

    let summary = controller.on_swap_click().await?;
    println!("\nAfter swap, camera on {:?}", summary.camera_target);

    controller
        .with_map(|map| {
            println!("\nMap has {} markers:", map.markers().len());
            for (_, marker) in map.markers() {
                println!("  {} at {} ({:?})", marker.title, marker.position, marker.hue);
            }
        })
        .await;

    Ok(())
}
