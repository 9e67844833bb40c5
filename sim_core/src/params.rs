/// Tuning parameters for the falling boxes
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Population
    pub const CAPACITY: usize = 10;

    // Physics
    pub const GRAVITY: f32 = 9.8; // units per second squared
    pub const RESTITUTION: f32 = 0.5; // Fraction of speed kept after a bounce
    pub const REST_VELOCITY_THRESHOLD: f32 = 1.0; // units per second

    // Box appearance
    pub const BOX_SIZE_MIN: f32 = 1.0;
    pub const BOX_SIZE_MAX: f32 = 3.0;
    pub const BOX_COLOR_MAX: u32 = 0xff_ffff;

    // Camera
    pub const CAMERA_FOV_DEGREES: f32 = 75.0;
    pub const CAMERA_NEAR: f32 = 0.1;
    pub const CAMERA_FAR: f32 = 1000.0;
    pub const CAMERA_DISTANCE: f32 = 10.0;
}
