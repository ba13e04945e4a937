// Page wiring and post-processing tuning for the web front-end

// DOM element ids expected in index.html
pub const CANVAS_ID: &str = "app-canvas";
pub const CHAT_TOGGLE_ID: &str = "chat-toggle";
pub const CHAT_PANEL_ID: &str = "chat-panel";
pub const CHAT_CLOSE_ID: &str = "chat-close";
pub const CHAT_LOG_ID: &str = "chat-log";
pub const CHAT_INPUT_ID: &str = "chat-input";
pub const CHAT_SEND_ID: &str = "chat-send";

// Class toggled on the chat panel while it is hidden
pub const HIDDEN_CLASS: &str = "hidden";

// Per-role classes applied to transcript rows
pub const USER_ROW_CLASS: &str = "msg msg-user";
pub const MODEL_ROW_CLASS: &str = "msg msg-model";
pub const LOADING_ROW_CLASS: &str = "msg msg-loading";
pub const LOADING_TEXT: &str = "Analyzing...";

// Bloom post chain
pub const BLOOM_STRENGTH: f32 = 1.5;
pub const BLOOM_THRESHOLD: f32 = 0.1;
pub const BLOOM_RADIUS: f32 = 0.5;

// Scene clear color before fog and sky are drawn (linear, near #020210)
pub const CLEAR_RGB: [f64; 3] = [0.0006, 0.0006, 0.005];

// Instance buffer starts with room for this many cubes and doubles on demand
pub const INITIAL_INSTANCE_CAPACITY: usize = 1024;
