// Keyboard teleop: W/S forward-back, A/D yaw, R/F speed, Q quit
// Publishes GroundMotionRequest envelopes the runtime listens for.
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use serde_json::json;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::info;

const SPEEDS: [f32; 3] = [0.2, 0.6, 1.5]; // m/s
const YAW_RATES: [f32; 3] = [0.3, 0.8, 1.6]; // rad/s
const INPUT_TIMEOUT_MS: u64 = 100; // Reset velocities after this much time with no input

#[derive(Parser, Debug)]
#[command(about = "Publishes keyboard-driven ground motion requests")]
struct Args {
    /// Session identifier of the runtime to drive
    #[arg(long)]
    cid: u16,

    /// Sender stamp to publish with (must match the runtime's --id-input)
    #[arg(long = "id-input", default_value_t = 0)]
    id_input: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;
    let topic = format!("diffdrive/{}/ground-motion-request", args.cid);
    let publisher = session.declare_publisher(topic).await?;

    info!("Controls: W/S=forward-back, A/D=yaw, R/F=speed, Q=quit");
    info!("Speed: LOW");

    enable_raw_mode()?;
    let result = run_teleop(&publisher, args.id_input).await;
    disable_raw_mode()?;

    result
}

async fn run_teleop(
    publisher: &zenoh::pubsub::Publisher<'_>,
    sender_stamp: u32,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut speed_idx: usize = 0;

    // Persistent velocity state
    let mut vx = 0.0f32;
    let mut yaw_rate = 0.0f32;
    let mut last_movement_input = Instant::now();

    loop {
        // Poll for key with 20ms timeout (50Hz effective rate)
        if event::poll(Duration::from_millis(20))? {
            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                let pressed = kind == KeyEventKind::Press || kind == KeyEventKind::Repeat;

                match code {
                    KeyCode::Char('w') if pressed => {
                        vx = SPEEDS[speed_idx];
                        last_movement_input = Instant::now();
                    }
                    KeyCode::Char('s') if pressed => {
                        vx = -SPEEDS[speed_idx];
                        last_movement_input = Instant::now();
                    }
                    KeyCode::Char('a') if pressed => {
                        yaw_rate = YAW_RATES[speed_idx];
                        last_movement_input = Instant::now();
                    }
                    KeyCode::Char('d') if pressed => {
                        yaw_rate = -YAW_RATES[speed_idx];
                        last_movement_input = Instant::now();
                    }

                    // Speed control
                    KeyCode::Char('r') if pressed => {
                        speed_idx = (speed_idx + 1).min(2);
                        print_speed(speed_idx);
                    }
                    KeyCode::Char('f') if pressed => {
                        speed_idx = speed_idx.saturating_sub(1);
                        print_speed(speed_idx);
                    }

                    KeyCode::Char('q') | KeyCode::Esc if pressed => break,

                    _ => {}
                }
            }
        }

        // Reset velocities if no movement input for INPUT_TIMEOUT_MS
        if last_movement_input.elapsed() > Duration::from_millis(INPUT_TIMEOUT_MS) {
            vx = 0.0;
            yaw_rate = 0.0;
        }

        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as i64)
            .unwrap_or(0);

        // Always publish at ~50Hz
        let envelope = json!({
            "sender_stamp": sender_stamp,
            "sent_at_micros": ts,
            "message": { "vx": vx, "yaw_rate": yaw_rate }
        });
        publisher.put(envelope.to_string()).await?;
    }

    Ok(())
}

fn print_speed(idx: usize) {
    let label = ["LOW", "MED", "HIGH"][idx];
    info!("Speed: {}", label);
}
