//! Macroplay CLI
//!
//! Drives a step sequence against a headless surface from the command line:
//!
//!   macroplay "key:Ctrl+a" "key:x" "wait:250" "mouse:left"
//!   macroplay --loop --text "draft" "key:right" "key:!"    # Ctrl-C cancels
//!
//! Progress statuses are printed as they stream out of the player; the
//! focused demo text area's final buffer is printed when the run ends.

use anyhow::Result;
use clap::Parser;
use futures::StreamExt;
use macroplay::{HeadlessSurface, PlaybackError, SequencePlayer, Step};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "macroplay",
    about = "Replay a sequence of simulated input steps against a headless surface"
)]
struct Args {
    /// Steps to queue, in order: `key:<shortcut>`, `mouse:<left|right|middle>`
    /// or `wait:<ms>`
    #[arg(required = true)]
    steps: Vec<String>,

    /// Repeat the sequence until cancelled with Ctrl-C
    #[arg(long = "loop")]
    loop_enabled: bool,

    /// Seed text for the demo text area the steps run against
    #[arg(long, default_value = "")]
    text: String,
}

/// Parse one `kind:value` step spec.
///
/// Validation happens here, before a step is ever queued: blank shortcuts,
/// unknown mouse buttons and non-numeric wait durations never reach the
/// player.
fn parse_step_spec(spec: &str) -> Result<Step, PlaybackError> {
    let (kind, value) = spec.split_once(':').ok_or_else(|| {
        PlaybackError::InvalidArgument(format!("step `{spec}` is missing a `kind:value` separator"))
    })?;

    match kind {
        "key" => {
            let step = Step::key(value);
            step.validate()?;
            Ok(step)
        }
        "mouse" => Ok(Step::mouse(value.parse()?)),
        "wait" => {
            let duration_ms: u64 = value.trim().parse().map_err(|_| {
                PlaybackError::InvalidArgument(format!(
                    "wait duration `{value}` is not a non-negative integer"
                ))
            })?;
            Ok(Step::wait_ms(duration_ms))
        }
        other => Err(PlaybackError::InvalidArgument(format!(
            "unknown step kind `{other}`"
        ))),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    tracing::info!(steps = args.steps.len(), loop_enabled = args.loop_enabled, "queueing steps");

    let surface = HeadlessSurface::new();
    let editor = surface.add_text_area("editor", &args.text);
    surface.focus(&editor);

    let player = Arc::new(SequencePlayer::new(Arc::new(surface.clone())));
    for spec in &args.steps {
        player.push_step(parse_step_spec(spec)?)?;
    }
    player.set_loop_enabled(args.loop_enabled);

    for (index, step) in player.steps().iter().enumerate() {
        println!("{:>3}. {}", index + 1, step.describe());
    }

    let mut statuses = player.status_stream();
    tokio::spawn(async move {
        while let Some(status) = statuses.next().await {
            println!("{status}");
        }
    });

    {
        let player = player.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                player.request_cancel();
            }
        });
    }

    player.run().await?;
    println!("editor buffer: {:?}", editor.text());
    Ok(())
}
