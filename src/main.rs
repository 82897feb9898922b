//! Headless demo: seed a workspace, open a canvas session, and drive the
//! pointer/wheel sequences a renderer would send. Uses Postgres when
//! `DATABASE_URL` is set, the in-memory store otherwise.

use std::error::Error;
use std::sync::Arc;

use tracing::{info, warn};

use draftboard::artifact::ArtifactKind;
use draftboard::input::{DragTarget, PointerPos, WheelDelta};
use draftboard::session::CanvasSession;
use draftboard::store::{ArtifactStore, MemoryStore, PgStore};
use draftboard::team::TeamRole;
use draftboard::viewport::Point;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let store: Arc<dyn ArtifactStore> = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            info!("using postgres store");
            Arc::new(PgStore::connect(&url).await?)
        }
        Err(_) => {
            info!("using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    // Seed a minimal workspace.
    let team = store.create_team("Product", Some("demo team")).await?;
    store
        .add_team_member(team.id, "Ana", "ana@example.com", TeamRole::Owner)
        .await?;
    let project = store
        .create_project(team.id, "Canvas Demo", None, Some("Ship the demo canvas"))
        .await?;
    info!(team = team.id, project = project.id, "workspace seeded");

    let (mut session, snapshot_rx, mut outcomes) =
        CanvasSession::open(Arc::clone(&store), project.id).await?;

    let brief = session.generate_artifact(ArtifactKind::ProjectBrief).await?;
    let prd = session.generate_artifact(ArtifactKind::Prd).await?;

    // Pan the canvas background.
    session.pointer_down(DragTarget::Canvas, PointerPos::new(100, 100));
    session.pointer_move(PointerPos::new(130, 80));
    session.pointer_move(PointerPos::new(90, 110));
    session.pointer_up();
    let viewport = session.viewport();
    info!(offset_x = viewport.offset_x, offset_y = viewport.offset_y, "panned");

    // Drag the brief card; releasing fires its position save.
    session.pointer_down(DragTarget::Artifact(brief.id), PointerPos::new(10, 10));
    session.pointer_move(PointerPos::new(20, 15));
    session.pointer_move(PointerPos::new(40, 25));
    session.pointer_up();

    // Two wheel notches out, one back in, then map a pointer to canvas
    // space under the new transform.
    session.wheel(WheelDelta { dx: 0.0, dy: 1.0 }, PointerPos::new(400, 300));
    session.wheel(WheelDelta { dx: 0.0, dy: 1.0 }, PointerPos::new(400, 300));
    session.wheel(WheelDelta { dx: 0.0, dy: -1.0 }, PointerPos::new(400, 300));
    let pointer = Point::new(400.0, 300.0);
    let on_canvas = session.viewport().screen_to_canvas(pointer);
    info!(
        zoom = session.viewport().zoom,
        canvas_x = on_canvas.x,
        canvas_y = on_canvas.y,
        "zoomed, pointer mapped to canvas space"
    );
    session.reset_view();

    // Move the second card too; the two saves go out independently.
    session.pointer_down(DragTarget::Artifact(prd.id), PointerPos::new(0, 0));
    session.pointer_move(PointerPos::new(25, 40));
    session.pointer_up();

    let placements = snapshot_rx.borrow().clone();
    for artifact in &placements {
        info!(
            artifact = artifact.id,
            title = %artifact.title,
            x = artifact.x,
            y = artifact.y,
            "local placement"
        );
    }

    // Dropping the session closes the outcome channel once the in-flight
    // saves finish, so the drain below terminates on its own.
    drop(session);
    while let Some(outcome) = outcomes.recv().await {
        match outcome.result {
            Ok(()) => info!(
                request = %outcome.request_id,
                artifact = outcome.artifact_id,
                x = outcome.x,
                y = outcome.y,
                "save confirmed"
            ),
            Err(error) => warn!(
                request = %outcome.request_id,
                artifact = outcome.artifact_id,
                %error,
                "save failed, local placement is ahead of the store"
            ),
        }
    }

    for artifact in store.project_artifacts(project.id).await? {
        info!(
            artifact = artifact.id,
            x = artifact.x,
            y = artifact.y,
            "stored placement"
        );
    }
    Ok(())
}
