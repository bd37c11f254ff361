/*!
 * Limits and Constants
 *
 * Centralized location for the engine's fixed sizes and report constants.
 */

/// Bucket count for the address-keyed block index.
/// Prime, sized for typical interpreter workloads; collisions degrade the
/// chain walk, never correctness.
pub const BUCKET_COUNT: usize = 23;

/// Flat overhead folded into the report's memory-budget estimate (MB),
/// covering the tracker's own bookkeeping.
pub const BASE_OVERHEAD_MB: f32 = 0.1;

/// Additional budget (MB) a visualized run consumes; added to the estimate
/// when the finished run had visualization off, so the suggestion fits a
/// future visualized run.
pub const VIEW_OVERHEAD_MB: f32 = 0.4;

/// Usage hints at or below this many MB get the collaborator's default
/// canvas sizing; larger hints scale the canvas and per-pixel granularity.
pub const DEFAULT_CANVAS_MB: f32 = 1.0;
