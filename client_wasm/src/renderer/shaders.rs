pub const BOX_SHADER: &str = include_str!("../../shaders/boxes.wgsl");
pub const SHADOW_SHADER: &str = include_str!("../../shaders/shadow.wgsl");
