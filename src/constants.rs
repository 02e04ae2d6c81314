/// Tendril tuning constants used as [`crate::TendrilSettings`] defaults.
///
/// Distances are world units, angles are radians, and every rate is per
/// simulation frame. Hosts override these through settings rather than
/// editing the constants.
pub const DEFAULT_SPEED: f32 = 4.0;
pub const DEFAULT_TURN_RATE: f32 = 0.2;
/// Extra steering allowance granted for every frame the tendril has been
/// growing. Guarantees the lead eventually turns straight at the sink.
pub const DEFAULT_TURN_ACCELERATION: f32 = 0.02;
/// Inclusive distance between lead and sink counted as contact.
pub const DEFAULT_CONTACT_RADIUS: f32 = 0.5;
pub const DEFAULT_THICKNESS: f32 = 3.0;
/// Frames a detached node remains on screen while it fades out.
pub const DEFAULT_FADE_FRAMES: u32 = 12;
/// Depth at which tendril nodes are drawn, behind balls at `z = 0`.
pub const TENDRIL_Z: f32 = -1.0;
