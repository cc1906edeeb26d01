// Wire message types for the runtime

use serde::{Deserialize, Serialize};

// Motion request from a planner/teleop node -> runtime
// Default is all-zero so the vehicle stays at rest until the first command
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct GroundMotionRequest {
    pub vx: f32,
    pub yaw_rate: f32,
}

// Operating state from the supervisory node -> runtime
// state == 1 suppresses actuation output; anything else is active.
// Default is 0 (active) so the runtime emits before any state message arrives.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct SwitchStateRequest {
    pub state: i32,
}

// Actuation output runtime -> per-side motor proxy, position in [-1.0, 1.0)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PedalPositionRequest {
    pub position: f32,
}

/// Bus framing: every payload carries the logical source identity and a
/// send timestamp alongside the message itself. Both outbound pedal
/// requests of one tick share a single timestamp.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub sender_stamp: u32,
    pub sent_at_micros: i64,
    pub message: T,
}

impl<T> Envelope<T> {
    pub fn new(sender_stamp: u32, sent_at_micros: i64, message: T) -> Self {
        Self {
            sender_stamp,
            sent_at_micros,
            message,
        }
    }
}
