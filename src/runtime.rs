// Fixed-frequency actuation loop fed by two asynchronous subscriptions
//
// The bus delivers motion and switch-state requests on their own tasks;
// the tick loop only ever sees the latest value of each through two
// independent Latest cells. The cells are never locked together, so
// there is no ordering concern between the input paths.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::config::{Config, SENDER_STAMP_STATE, STATE_SUPPRESSED};
use crate::kinematics::{pedal_position, wheel_speeds};
use crate::messages::{Envelope, GroundMotionRequest, PedalPositionRequest, SwitchStateRequest};
use crate::store::Latest;

pub struct Runtime {
    config: Config,
    motion: Latest<GroundMotionRequest>,
    state: Latest<SwitchStateRequest>,
}

impl Runtime {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            // Zero velocity and active state until the bus says otherwise
            motion: Latest::default(),
            state: Latest::default(),
        }
    }

    /// Inbound motion request. Envelopes from any sender other than the
    /// configured input stamp are dropped without effect.
    pub fn on_ground_motion(&self, envelope: Envelope<GroundMotionRequest>) {
        if envelope.sender_stamp != self.config.id_input {
            return;
        }
        let msg = envelope.message;
        debug!("Got motion request, vx={} yaw_rate={}", msg.vx, msg.yaw_rate);
        self.motion.set(msg);
    }

    /// Inbound switch state request. Only the reserved supervisory sender
    /// stamp is accepted.
    pub fn on_switch_state(&self, envelope: Envelope<SwitchStateRequest>) {
        if envelope.sender_stamp != SENDER_STAMP_STATE {
            return;
        }
        debug!("Got switch state, state={}", envelope.message.state);
        self.state.set(envelope.message);
    }

    /// One tick's worth of control arithmetic: gate, transform, saturate.
    /// Returns None while output is suppressed by the switch state.
    pub fn pedal_positions(&self) -> Option<(f32, f32)> {
        if self.state.snapshot().state == STATE_SUPPRESSED {
            return None;
        }

        let cmd = self.motion.snapshot();
        let (left_speed, right_speed) =
            wheel_speeds(cmd.vx, cmd.yaw_rate, self.config.track_width_half);

        let left = pedal_position(left_speed, self.config.speed_max);
        let right = pedal_position(right_speed, self.config.speed_max);

        debug!(
            "Pedal positions left={} right={} (wants to go left_speed={} right_speed={})",
            left, right, left_speed, right_speed
        );
        Some((left, right))
    }
}

/// Microseconds since the Unix epoch, captured once per tick so both
/// pedal envelopes share one timestamp.
fn now_micros() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as i64)
        .unwrap_or(0)
}

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;

    info!("Setting up publishers and subscribers...");
    let motion_sub = session.declare_subscriber(config.motion_topic()).await?;
    let state_sub = session.declare_subscriber(config.state_topic()).await?;
    let pedal_pub = session.declare_publisher(config.pedal_topic()).await?;

    info!("Subscribed to: {}, {}", config.motion_topic(), config.state_topic());
    info!("Publishing to: {}", config.pedal_topic());

    let period = Duration::from_secs_f64(1.0 / config.freq);
    let (id_left, id_right) = (config.id_left, config.id_right);
    let runtime = Arc::new(Runtime::new(config));

    // Motion requests arrive on their own task and only touch the motion cell
    let rt = runtime.clone();
    tokio::spawn(async move {
        while let Ok(sample) = motion_sub.recv_async().await {
            let payload = sample.payload().to_bytes();
            match serde_json::from_slice::<Envelope<GroundMotionRequest>>(&payload) {
                Ok(envelope) => rt.on_ground_motion(envelope),
                Err(e) => warn!("Failed to parse motion request: {}", e),
            }
        }
    });

    // Same for switch state, independent of the motion path
    let rt = runtime.clone();
    tokio::spawn(async move {
        while let Ok(sample) = state_sub.recv_async().await {
            let payload = sample.payload().to_bytes();
            match serde_json::from_slice::<Envelope<SwitchStateRequest>>(&payload) {
                Ok(envelope) => rt.on_switch_state(envelope),
                Err(e) => warn!("Failed to parse switch state request: {}", e),
            }
        }
    });

    let mut tick = interval(period);
    info!("Runtime started: {:?} tick period", period);

    loop {
        tick.tick().await;

        let Some((left, right)) = runtime.pedal_positions() else {
            debug!("In state '1', suppressing output");
            continue;
        };

        let ts = now_micros();
        let left_env = Envelope::new(id_left, ts, PedalPositionRequest { position: left });
        let right_env = Envelope::new(id_right, ts, PedalPositionRequest { position: right });

        pedal_pub.put(serde_json::to_string(&left_env)?).await?;
        pedal_pub.put(serde_json::to_string(&right_env)?).await?;
    }
}
