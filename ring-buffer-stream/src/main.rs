//! Ring Buffer Streaming Demo
//!
//! Feeds a zero-initialized `[window, channels]` buffer with chunks of
//! consecutive numbers along the time axis and prints the window after each
//! step.
//!
//! ## Usage
//!
//! ```bash
//! # Default: window of 8, chunks of 3, 4 steps
//! cargo run --bin ring-buffer-stream
//!
//! # Cross-check every step against the element-by-element host evaluation
//! cargo run --bin ring-buffer-stream -- --window 6 --chunk 2 --steps 5 --verify
//!
//! # Show one debug line per update
//! RUST_LOG=debug cargo run --bin ring-buffer-stream
//! ```

mod backend;

use anyhow::{Context, Result};
use backend::{create_device, get_backend_name, SelectedBackend};
use burn::{prelude::*, tensor::ElementConversion};
use burn_ring_buffer::{ring_buffer_host, RingBufferStream};
use clap::Parser;

/// Time axis of the `[window, channels]` buffer.
const TIME_AXIS: usize = 0;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Window length along the time axis
    #[arg(short, long, default_value = "8")]
    window: usize,

    /// Number of channels per time step
    #[arg(long, default_value = "2")]
    channels: usize,

    /// Chunk length pushed at each step
    #[arg(short, long, default_value = "3")]
    chunk: usize,

    /// Number of chunks to stream
    #[arg(short, long, default_value = "4")]
    steps: usize,

    /// Compare every step against the host evaluation
    #[arg(long)]
    verify: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    anyhow::ensure!(args.channels > 0, "--channels must be at least 1");
    let device = create_device();

    tracing::info!(
        backend = get_backend_name(),
        window = args.window,
        channels = args.channels,
        chunk = args.chunk,
        "starting stream"
    );

    let mut stream = RingBufferStream::<SelectedBackend, 2>::zeros(
        [args.window, args.channels],
        TIME_AXIS,
        &device,
    )
    .context("Failed to create the initial window")?;

    let chunk_len = (args.chunk * args.channels) as i64;
    let mut next = 1_i64;
    for step in 1..=args.steps {
        let chunk = Tensor::<SelectedBackend, 1, Int>::arange(next..next + chunk_len, &device)
            .float()
            .reshape([args.chunk, args.channels]);
        next += chunk_len;

        let previous = stream.window().clone();
        let window = stream
            .push(chunk.clone())
            .with_context(|| format!("Step {step} rejected its chunk"))?
            .clone();

        if args.verify {
            let host = ring_buffer_host(previous, chunk, TIME_AXIS)
                .with_context(|| format!("Host evaluation failed at step {step}"))?;
            let diff = (host - window.clone())
                .abs()
                .max()
                .into_scalar()
                .elem::<f64>();
            if diff != 0.0 {
                anyhow::bail!("Host evaluation diverged at step {step}: max difference {diff}");
            }
        }

        println!("step {step}:");
        print_window(window, args.channels)?;
    }

    tracing::info!(steps = stream.steps(), "stream finished");
    Ok(())
}

/// Prints one line per time step.
fn print_window(window: Tensor<SelectedBackend, 2>, channels: usize) -> Result<()> {
    let values = window
        .into_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .map_err(|e| anyhow::anyhow!("Failed to convert window to f32: {:#?}", e))?;

    for row in values.chunks(channels.max(1)) {
        let row: Vec<String> = row.iter().map(|v| format!("{v:>6.1}")).collect();
        println!("  [{}]", row.join(", "));
    }
    Ok(())
}
