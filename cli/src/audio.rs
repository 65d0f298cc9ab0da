//! Default-device audio capture and playback.
//!
//! Thin cpal wrappers; all decoding happens on the caller's thread. The
//! capture callback hands each block of mono samples over a channel, so
//! the audio thread never touches demodulator state.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::Sender;
use std::time::Duration;

type BoxError = Box<dyn std::error::Error>;

/// Play a sample buffer on the default output device, blocking until the
/// whole buffer has been queued and had time to drain.
pub fn play(sample_rate: u32, samples: Vec<f32>) -> Result<(), BoxError> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or("no default output device")?;
    let channels = device.default_output_config()?.channels();
    let config = cpal::StreamConfig {
        channels,
        sample_rate: cpal::SampleRate(sample_rate),
        buffer_size: cpal::BufferSize::Default,
    };

    let total = samples.len();
    let mut pos = 0usize;
    let (done_tx, done_rx) = crossbeam_channel::bounded::<()>(1);

    let stream = device.build_output_stream(
        &config,
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            for frame in data.chunks_mut(channels as usize) {
                let sample = if pos < total {
                    let s = samples[pos];
                    pos += 1;
                    s
                } else {
                    0.0
                };
                for out in frame.iter_mut() {
                    *out = sample;
                }
            }
            if pos >= total {
                let _ = done_tx.try_send(());
            }
        },
        |err| eprintln!("playback stream error: {err}"),
        None,
    )?;
    stream.play()?;

    let duration = Duration::from_secs_f64(total as f64 / sample_rate as f64);
    let _ = done_rx.recv_timeout(duration + Duration::from_secs(2));
    // let the device buffer drain past the final sample
    std::thread::sleep(Duration::from_millis(200));
    Ok(())
}

/// Start capturing mono samples from the default input device.
///
/// Each callback's samples are downmixed to channel 0 and sent as one
/// block; the receiver side owns them outright. Dropping the returned
/// stream stops the capture.
pub fn capture(sample_rate: u32, tx: Sender<Vec<f32>>) -> Result<cpal::Stream, BoxError> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or("no default input device")?;
    let channels = device.default_input_config()?.channels() as usize;
    let config = cpal::StreamConfig {
        channels: channels as u16,
        sample_rate: cpal::SampleRate(sample_rate),
        buffer_size: cpal::BufferSize::Default,
    };

    let stream = device.build_input_stream(
        &config,
        move |data: &[f32], _: &cpal::InputCallbackInfo| {
            let mono: Vec<f32> = data.iter().step_by(channels).copied().collect();
            // never block inside the audio callback; if the decode loop
            // fell behind, losing the block is the lesser evil
            let _ = tx.try_send(mono);
        },
        |err| eprintln!("capture stream error: {err}"),
        None,
    )?;
    stream.play()?;
    Ok(stream)
}
