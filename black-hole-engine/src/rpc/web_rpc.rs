use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::engine::camera::fall_controller::{
    FallCompletedEvent, FallController, FallProgressEvent,
};
use crate::engine::render::post_processing::PostProcessState;
use crate::engine::systems::scene_controls::{
    CommandSource, GravityWaveEvent, SceneCommand, SceneCommandEvent, ScenePreset,
};
use crate::gesture::landmarks::Landmark;
use crate::gesture::{GestureCommandEvent, LandmarkFrameEvent};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the host page and Bevy.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to host page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to host page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages).chain(),
            )
            .add_systems(
                PostUpdate,
                (forward_scene_notifications, send_outgoing_messages).chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            // Only queue messages that look like JSON-RPC.
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Resources and event channels the RPC methods act on.
#[derive(SystemParam)]
struct RpcContext<'w> {
    diagnostics: Option<Res<'w, DiagnosticsStore>>,
    controller: Option<Res<'w, FallController>>,
    post_processing: Option<Res<'w, PostProcessState>>,
    scene_commands: EventWriter<'w, SceneCommandEvent>,
    gesture_commands: EventWriter<'w, GestureCommandEvent>,
    landmark_frames: EventWriter<'w, LandmarkFrameEvent>,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut context: RpcContext,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                if request.method != "hand_landmarks" {
                    debug!("Processing RPC method: {}", request.method);
                }

                if let Some(response) = handle_rpc_request(&request, &mut context) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Failed to parse RPC message: {}", parse_error);
                rpc_interface.send_notification(
                    "debug_message",
                    json!({
                        "message": format!("Parse error: {}", parse_error)
                    }),
                );
            }
        }
    }
}

/// Run the requested method. Notifications (no ID) are executed too but
/// produce no response.
fn handle_rpc_request(request: &RpcRequest, context: &mut RpcContext) -> Option<RpcResponse> {
    let result = dispatch_method(&request.method, &request.params, context);
    let id = request.id.clone()?;

    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

fn dispatch_method(
    method: &str,
    params: &Value,
    context: &mut RpcContext,
) -> Result<Value, RpcError> {
    match method {
        "trigger_fall" => Ok(handle_trigger_fall(context)),
        "trigger_wave" => Ok(send_scene_command(context, SceneCommand::TriggerWave)),
        "set_intensity" => {
            #[derive(Deserialize)]
            struct IntensityParams {
                intensity: f32,
            }
            let parsed = parse_params::<IntensityParams>(params, "Expected 'intensity' number")?;
            Ok(send_scene_command(
                context,
                SceneCommand::SetIntensity(parsed.intensity),
            ))
        }
        "set_time_scale" => {
            #[derive(Deserialize)]
            struct TimeScaleParams {
                time_scale: f32,
            }
            let parsed = parse_params::<TimeScaleParams>(params, "Expected 'time_scale' number")?;
            Ok(send_scene_command(
                context,
                SceneCommand::SetTimeScale(parsed.time_scale),
            ))
        }
        "apply_preset" => {
            #[derive(Deserialize)]
            struct PresetParams {
                preset: ScenePreset,
            }
            let parsed = parse_params::<PresetParams>(
                params,
                "Expected 'preset' of cinematic, default or frenzy",
            )?;
            Ok(send_scene_command(
                context,
                SceneCommand::ApplyPreset(parsed.preset),
            ))
        }
        "set_gesture_enabled" => {
            #[derive(Deserialize)]
            struct EnabledParams {
                enabled: bool,
            }
            let parsed = parse_params::<EnabledParams>(params, "Expected 'enabled' boolean")?;
            context
                .gesture_commands
                .write(GestureCommandEvent::SetEnabled(parsed.enabled));
            Ok(json!({ "success": true, "enabled": parsed.enabled }))
        }
        "toggle_camera" => {
            context
                .gesture_commands
                .write(GestureCommandEvent::ToggleCamera);
            Ok(json!({ "success": true }))
        }
        "capture_started" => {
            context
                .gesture_commands
                .write(GestureCommandEvent::CaptureStarted);
            Ok(json!({ "success": true }))
        }
        "capture_failed" => {
            #[derive(Deserialize)]
            struct CaptureFailedParams {
                name: String,
                #[serde(default)]
                message: String,
            }
            let parsed =
                parse_params::<CaptureFailedParams>(params, "Expected 'name' and 'message'")?;
            context
                .gesture_commands
                .write(GestureCommandEvent::CaptureFailed {
                    name: parsed.name,
                    message: parsed.message,
                });
            Ok(json!({ "success": true }))
        }
        "hand_landmarks" => {
            #[derive(Deserialize)]
            struct LandmarkParams {
                landmarks: Option<Vec<Landmark>>,
                timestamp: Option<u64>,
            }
            let parsed = parse_params::<LandmarkParams>(
                params,
                "Expected 'landmarks' array of {x, y} or null",
            )?;
            context.landmark_frames.write(LandmarkFrameEvent {
                landmarks: parsed.landmarks,
                timestamp_ms: parsed.timestamp,
            });
            Ok(json!({ "success": true }))
        }
        "get_fall_state" => Ok(handle_get_fall_state(context)),
        "get_fps" => Ok(handle_get_fps(context.diagnostics.as_deref())),
        _ => {
            warn!("Unknown RPC method: {}", method);
            Err(RpcError::method_not_found(method))
        }
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(
    params: &Value,
    expected: &str,
) -> Result<T, RpcError> {
    serde_json::from_value::<T>(params.clone()).map_err(|_| RpcError::invalid_params(expected))
}

fn send_scene_command(context: &mut RpcContext, command: SceneCommand) -> Value {
    context.scene_commands.write(SceneCommandEvent {
        command,
        source: CommandSource::Rpc,
    });
    json!({ "success": true })
}

/// Requests while a fall is running are still forwarded; the controller drops them.
fn handle_trigger_fall(context: &mut RpcContext) -> Value {
    let accepted = !context
        .controller
        .as_ref()
        .is_some_and(|controller| controller.is_active());
    send_scene_command(context, SceneCommand::TriggerFall);
    json!({ "success": true, "accepted": accepted })
}

fn handle_get_fall_state(context: &RpcContext) -> Value {
    let post_processing = context
        .post_processing
        .as_deref()
        .copied()
        .unwrap_or_default()
        .0;
    match context.controller.as_deref() {
        Some(controller) => {
            let status = controller.status();
            json!({
                "active": status.active,
                "phase": status.phase,
                "progress": status.progress,
                "total_duration": controller.timeline().total(),
                "post_processing": post_processing,
            })
        }
        None => json!({
            "active": false,
            "phase": "idle",
            "progress": 0.0,
            "post_processing": post_processing,
        }),
    }
}

/// Handle FPS retrieval with diagnostic system integration.
fn handle_get_fps(diagnostics: Option<&DiagnosticsStore>) -> Value {
    let fps = diagnostics
        .and_then(|store| store.get(&FrameTimeDiagnosticsPlugin::FPS))
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32;

    json!({ "fps": fps })
}

/// Push fall and wave events to the frontend.
fn forward_scene_notifications(
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut progress_events: EventReader<FallProgressEvent>,
    mut completed_events: EventReader<FallCompletedEvent>,
    mut wave_events: EventReader<GravityWaveEvent>,
) {
    for event in progress_events.read() {
        rpc_interface.send_notification(
            "fall_progress",
            json!({ "progress": event.progress, "phase": event.phase }),
        );
    }
    for _ in completed_events.read() {
        rpc_interface.send_notification("fall_complete", json!({}));
    }
    for event in wave_events.read() {
        rpc_interface.send_notification(
            "gravity_wave",
            json!({ "source": format!("{:?}", event.source).to_lowercase() }),
        );
    }
}

/// Send queued notifications and responses to host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to parent window (host page).
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(json!({ "method": method })),
        }
    }
}
