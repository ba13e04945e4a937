pub mod animate;
pub mod camera;
pub mod chat;
pub mod clock;
pub mod constants;
pub mod field;
pub mod gpu;
#[cfg(feature = "render")]
pub mod render;
pub mod scene;
pub mod scroll;
pub mod sky;
pub mod tower;

pub use animate::*;
pub use camera::*;
pub use clock::*;
pub use constants::*;
pub use field::*;
pub use scene::*;
pub use scroll::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");
