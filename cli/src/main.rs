use clap::{Parser, Subcommand};
use hound::WavSpec;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use whispernet_core::{Demodulator, Encoder, ModemConfig};

mod audio;

#[derive(Parser)]
#[command(name = "whispernet")]
#[command(about = "Acoustic BFSK modem for short text messages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a text message as an audio tone sequence
    Send {
        /// Text message to send
        message: String,

        /// Symbol rate in baud
        #[arg(long, default_value = "400")]
        rate: u32,

        /// Tone frequency for bit 0, Hz
        #[arg(long, default_value = "3200")]
        f0: f32,

        /// Tone frequency for bit 1, Hz
        #[arg(long, default_value = "4200")]
        f1: f32,

        /// Sample rate, Hz
        #[arg(long, default_value = "48000")]
        sr: u32,

        /// Output amplitude, 0.0 to 1.0
        #[arg(long, default_value = "0.6")]
        volume: f32,

        /// Write a WAV file instead of playing on the default device
        #[arg(long, value_name = "OUTPUT.WAV")]
        output: Option<PathBuf>,
    },

    /// Listen for messages and print them as they arrive
    Listen {
        /// Symbol rate in baud
        #[arg(long, default_value = "400")]
        rate: u32,

        /// Tone frequency for bit 0, Hz
        #[arg(long, default_value = "3200")]
        f0: f32,

        /// Tone frequency for bit 1, Hz
        #[arg(long, default_value = "4200")]
        f1: f32,

        /// Sample rate, Hz
        #[arg(long, default_value = "48000")]
        sr: u32,

        /// Decode a WAV file instead of capturing from the microphone
        #[arg(long, value_name = "INPUT.WAV")]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Send {
            message,
            rate,
            f0,
            f1,
            sr,
            volume,
            output,
        } => {
            let config = ModemConfig::new(sr, f0, f1, rate, volume)?;
            send_command(&config, &message, output.as_deref())
        }
        Commands::Listen {
            rate,
            f0,
            f1,
            sr,
            input,
        } => {
            let config = ModemConfig::new(sr, f0, f1, rate, ModemConfig::default().volume)?;
            match input {
                Some(path) => decode_wav_command(&config, &path),
                None => listen_command(&config),
            }
        }
    }
}

fn send_command(
    config: &ModemConfig,
    message: &str,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let payload = message.as_bytes();
    let encoder = Encoder::new(*config);
    let samples = encoder.encode(payload)?;
    println!(
        "Transmitting {} bytes at {} Bd, f0={}Hz f1={}Hz ({} samples)",
        payload.len(),
        config.symbol_rate,
        config.f0,
        config.f1,
        samples.len()
    );

    match output {
        Some(path) => {
            write_wav(path, config.sample_rate, &samples)?;
            println!("Wrote {}", path.display());
        }
        None => audio::play(config.sample_rate, samples)?,
    }
    Ok(())
}

fn decode_wav_command(
    config: &ModemConfig,
    input: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let samples = read_wav(input)?;
    println!("Read {} samples from {}", samples.len(), input.display());

    let sps = config.samples_per_symbol();
    let usable = (samples.len() / sps) * sps;
    let mut demod = Demodulator::new(*config);
    let messages = demod.process(&samples[..usable]);

    if messages.is_empty() {
        println!("No messages recovered");
    }
    for payload in messages {
        println!("[RX] {}", String::from_utf8_lossy(&payload));
    }
    Ok(())
}

fn listen_command(config: &ModemConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "Listening at {} Hz, {} Bd, f0={} f1={} (Ctrl-C to stop)",
        config.sample_rate, config.symbol_rate, config.f0, config.f1
    );

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))?;
    }

    let (tx, rx) = crossbeam_channel::bounded::<Vec<f32>>(64);
    let stream = audio::capture(config.sample_rate, tx)?;

    let sps = config.samples_per_symbol();
    let mut demod = Demodulator::new(*config);
    let mut buffer: Vec<f32> = Vec::new();

    while running.load(Ordering::SeqCst) {
        let block = match rx.recv_timeout(Duration::from_millis(200)) {
            Ok(block) => block,
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => continue,
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => break,
        };
        buffer.extend_from_slice(&block);

        // hand whole symbols to the demodulator, keep the leftovers
        let usable = (buffer.len() / sps) * sps;
        if usable == 0 {
            continue;
        }
        let rest = buffer.split_off(usable);
        let whole = std::mem::replace(&mut buffer, rest);
        for payload in demod.process(&whole) {
            println!("[RX] {}", String::from_utf8_lossy(&payload));
        }
    }

    drop(stream);
    println!("Stopped");
    Ok(())
}

/// Write samples as 16-bit PCM mono.
fn write_wav(path: &Path, sample_rate: u32, samples: &[f32]) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let file = File::create(path)?;
    let mut writer = hound::WavWriter::new(file, spec)?;
    for &sample in samples {
        let clamped = sample.clamp(-1.0, 1.0);
        writer.write_sample((clamped * 32767.0) as i16)?;
    }
    writer.finalize()
}

/// Read a mono WAV file, accepting 16-bit integer or 32-bit float samples.
fn read_wav(path: &Path) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let mut reader = hound::WavReader::new(file)?;
    let spec = reader.spec();
    log::debug!(
        "wav: {} Hz, {} channels, {} bits",
        spec.sample_rate,
        spec.channels,
        spec.bits_per_sample
    );

    let samples = match spec.bits_per_sample {
        16 => {
            let int_samples: Result<Vec<i16>, _> = reader.samples::<i16>().collect();
            int_samples?
                .into_iter()
                .map(|s| s as f32 / 32768.0)
                .collect()
        }
        32 => {
            let float_samples: Result<Vec<f32>, _> = reader.samples::<f32>().collect();
            float_samples?
        }
        _ => {
            return Err(format!("Unsupported bit depth: {}", spec.bits_per_sample).into());
        }
    };
    Ok(samples)
}
