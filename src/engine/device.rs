use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    SampleFormat, SampleRate, StreamConfig,
};
use tracing::{debug, error, info};

use crate::{
    engine::{write_interleaved, AudioBackend, BackendError, EngineConfig},
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Plays the graph on the host's default output device.
///
/// The graph is moved into the cpal data callback on `start` and dropped with
/// the stream on `stop`.
pub struct CpalBackend {
    device: cpal::Device,
    config: StreamConfig,
    block_frames: usize,
    stream: Option<cpal::Stream>,
}

impl CpalBackend {
    pub fn new(config: &EngineConfig) -> Result<Self, BackendError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(BackendError::NoDevice)?;
        let stream_config = preferred_config(&device, config)?;

        info!(
            device = %device.name().unwrap_or_default(),
            sample_rate = stream_config.sample_rate.0,
            channels = stream_config.channels,
            "output device ready"
        );

        Ok(Self {
            device,
            config: stream_config,
            block_frames: config.block_frames(),
            stream: None,
        })
    }

    pub fn channels(&self) -> u16 {
        self.config.channels
    }
}

// Use the requested rate and channel count when the device offers them as
// f32, otherwise the device default.
fn preferred_config(
    device: &cpal::Device,
    config: &EngineConfig,
) -> Result<StreamConfig, BackendError> {
    let wanted = SampleRate(config.sample_rate.round() as u32);

    if let Ok(mut ranges) = device.supported_output_configs() {
        let matching = ranges.find(|range| {
            range.sample_format() == SampleFormat::F32
                && range.channels() == config.channels
                && range.min_sample_rate() <= wanted
                && wanted <= range.max_sample_rate()
        });
        if let Some(range) = matching {
            return Ok(range.with_sample_rate(wanted).config());
        }
    }

    let default = device
        .default_output_config()
        .map_err(|err| BackendError::device("failed to fetch default output config", err))?;
    if default.sample_format() != SampleFormat::F32 {
        return Err(BackendError::UnsupportedFormat(
            default.sample_format().to_string(),
        ));
    }
    debug!(
        requested = wanted.0,
        using = default.sample_rate().0,
        "requested output config unavailable, using device default"
    );
    Ok(default.config())
}

impl AudioBackend for CpalBackend {
    fn start(&mut self, mut graph: Box<dyn GraphNode>) -> Result<(), BackendError> {
        if self.stream.is_some() {
            return Err(BackendError::Busy);
        }

        let channels = self.config.channels.max(1) as usize;
        let block_frames = self.block_frames;
        let mut ctx = RenderCtx::new(self.sample_rate());
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = self
            .device
            .build_output_stream(
                &self.config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;

                    while frames_written < total_frames {
                        let frames = (total_frames - frames_written).min(block_frames);
                        let block = &mut render_buf[..frames];
                        graph.render_block(block, &ctx);
                        ctx.advance(frames);

                        let out_off = frames_written * channels;
                        write_interleaved(
                            block,
                            &mut data[out_off..out_off + frames * channels],
                            channels,
                        );
                        frames_written += frames;
                    }
                },
                |err| error!(%err, "audio stream error"),
                None,
            )
            .map_err(|err| BackendError::device("failed to build output stream", err))?;

        stream
            .play()
            .map_err(|err| BackendError::device("failed to start output stream", err))?;
        self.stream = Some(stream);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(err) = stream.pause() {
                debug!(%err, "pausing stream before drop failed");
            }
        }
    }

    fn sample_rate(&self) -> f32 {
        self.config.sample_rate.0 as f32
    }
}
