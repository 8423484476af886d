//! JSON-RPC 2.0 bridge to the page hosting the engine.
//!
//! On wasm32 the engine runs inside an iframe and exchanges messages with
//! its parent through `postMessage`; native builds keep the same handlers
//! with a no-op transport.
//!
//! ```text
//! Host page (parent)  <──postMessage──>  Bevy (iframe)
//!        │                                     │
//!        ├─ Request (with ID) ───────────────> │
//!        │ <──────────────── Response (with ID)┤
//!        ├─ Notification (no ID) ────────────> │  executed, no reply
//!        │ <──────────── Notification (no ID) ─┤
//! ```
//!
//! Every incoming message is executed; only messages carrying an ID are
//! answered. Error codes follow JSON-RPC 2.0: `-32601` unknown method,
//! `-32602` invalid params.
//!
//! ## Incoming methods
//!
//! ### Fall and scene
//! - `trigger_fall`: request a fall; `accepted` is false while one is running
//! - `trigger_wave`: emit a gravity wave
//! - `set_intensity` `{ intensity }`, `set_time_scale` `{ time_scale }`
//! - `apply_preset` `{ preset: "cinematic" | "default" | "frenzy" }`
//! - `get_fall_state`: `{ active, phase, progress, total_duration }`
//!
//! ### Gesture tracking
//! - `set_gesture_enabled` `{ enabled }`, `toggle_camera`
//! - `capture_started`, `capture_failed` `{ name, message }`: results of a `request_capture`
//! - `hand_landmarks` `{ landmarks: [{ x, y }] | null, timestamp? }`: one tracker frame
//!
//! ### Diagnostics
//! - `get_fps`
//!
//! ## Outgoing notifications
//! `fall_progress`, `fall_complete`, `gravity_wave`, `gesture_state`,
//! `gesture_error`, `request_capture`, `fps_update`.

/// JSON-RPC 2.0 message types, the postMessage transport and method handlers.
pub mod web_rpc;
