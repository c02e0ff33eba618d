//! Default output device sink (cpal).
//!
//! The worker writes 80 kHz i8 samples into a `RingSink`; the cpal callback
//! drains the ring through a `SampleHold` converter at whatever rate and
//! sample format the device runs, duplicating mono to every channel. When the
//! ring runs dry the callback emits silence.

use std::sync::atomic::Ordering;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use tracing::{debug, error};

use super::ring::{RingSink, SinkTap};
use super::sink::{AudioSink, SinkError, SinkFormat, SinkOpener};
use crate::dsp::resample::SampleHold;

/// Opens a fresh stream on the host's default output device per worker.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeviceOpener;

impl DeviceOpener {
    pub fn new() -> Self {
        Self
    }
}

impl SinkOpener for DeviceOpener {
    fn open(&self, format: &SinkFormat) -> Result<Box<dyn AudioSink>, SinkError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(SinkError::NoDevice)?;
        let config = device.default_output_config()?;

        let device_rate = config.sample_rate().0;
        let channels = config.channels() as usize;
        let sample_format = config.sample_format();

        let (ring, tap) = RingSink::new(format);
        let hold = SampleHold::new(format.sample_rate, device_rate);

        let stream_config: cpal::StreamConfig = config.into();
        let stream = match sample_format {
            cpal::SampleFormat::F32 => {
                build_stream::<f32>(&device, &stream_config, channels, tap, hold)?
            }
            cpal::SampleFormat::I16 => {
                build_stream::<i16>(&device, &stream_config, channels, tap, hold)?
            }
            cpal::SampleFormat::U16 => {
                build_stream::<u16>(&device, &stream_config, channels, tap, hold)?
            }
            other => return Err(SinkError::UnsupportedFormat(other)),
        };
        stream.play()?;

        debug!(
            device_rate,
            channels,
            ?sample_format,
            "audio output stream started"
        );

        Ok(Box::new(DeviceSink {
            ring,
            stream: Some(stream),
        }))
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    mut tap: SinkTap,
    mut hold: SampleHold,
) -> Result<cpal::Stream, SinkError>
where
    T: SizedSample + FromSample<f32>,
{
    let fault = tap.fault_flag();
    let channels = channels.max(1);

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            for frame in data.chunks_mut(channels) {
                let value = T::from_sample(hold.next_frame(|| tap.pop()));
                frame.fill(value);
            }
        },
        move |err| {
            error!("Audio stream error: {}", err);
            fault.store(true, Ordering::Release);
        },
        None,
    )?;
    Ok(stream)
}

/// Ring sink kept alive together with the stream that drains it
struct DeviceSink {
    ring: RingSink,
    stream: Option<cpal::Stream>,
}

impl AudioSink for DeviceSink {
    fn write(&mut self, sample: i8) -> Result<(), SinkError> {
        self.ring.write(sample)
    }

    fn stop(&mut self) {
        self.ring.stop();
    }

    fn resume(&mut self) {
        self.ring.resume();
    }

    fn drain(&mut self) {
        self.ring.drain();
    }

    fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(err) = stream.pause() {
                debug!("could not pause output stream on close: {}", err);
            }
        }
        self.ring.close();
    }
}

impl Drop for DeviceSink {
    fn drop(&mut self) {
        self.close();
    }
}
