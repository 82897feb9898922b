//! Shared numeric constants for canvas placement and zoom.

// ── Zoom ────────────────────────────────────────────────────────

/// Lowest zoom factor the wheel can reach.
pub const MIN_ZOOM: f64 = 0.25;

/// Highest zoom factor the wheel can reach.
pub const MAX_ZOOM: f64 = 2.0;

/// Zoom change applied per discrete wheel notch.
pub const ZOOM_STEP: f64 = 0.1;

// ── Artifact cards ──────────────────────────────────────────────

/// Width assigned to a freshly generated artifact card, in canvas pixels.
pub const DEFAULT_CARD_WIDTH: i32 = 400;

/// Height assigned to a freshly generated artifact card, in canvas pixels.
pub const DEFAULT_CARD_HEIGHT: i32 = 300;

/// Narrowest a renderer may draw a card. Stored width may be smaller.
pub const MIN_CARD_WIDTH: i32 = 250;

/// Shortest a renderer may draw a card. Stored height may be smaller.
pub const MIN_CARD_HEIGHT: i32 = 150;

/// Exclusive upper bound of the random square new cards spawn in.
pub const SPAWN_RANGE: i32 = 400;
