use crate::types::{cleanup_guard::CleanupGuard, consts::PROGRESS_INTERVAL};
use anyhow::{Context, Result, anyhow};
use ffmpeg::{
    Rational,
    codec::encoder,
    format::{self, Pixel},
    software::scaling,
    util::error::EAGAIN,
};
use ffmpeg_next as ffmpeg;
use image::imageops::FilterType;
use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use tracing::{debug, info};

/// Turns an ordered list of image paths into a video file.
pub trait VideoWriter {
    fn write_video(&mut self, frames: &[PathBuf], fps: u32, output: &Path) -> Result<()>;
}

/// Encodes with FFmpeg, one output frame per entry in `frames`.
pub struct FfmpegWriter {
    codec: Option<String>,
    cancelled: Arc<AtomicBool>,
}

impl FfmpegWriter {
    pub fn new(codec: Option<String>, cancelled: Arc<AtomicBool>) -> Self {
        Self { codec, cancelled }
    }

    fn find_codec(&self, octx: &format::context::Output, output: &Path) -> Result<ffmpeg::Codec> {
        match &self.codec {
            Some(name) => encoder::find_by_name(name)
                .ok_or_else(|| anyhow!("Unknown video encoder: {name}")),
            None => {
                let id = octx.format().codec(output, ffmpeg::media::Type::Video);
                encoder::find(id)
                    .ok_or_else(|| anyhow!("No video encoder available for {output:?} ({id:?})"))
            }
        }
    }
}

impl VideoWriter for FfmpegWriter {
    fn write_video(&mut self, frames: &[PathBuf], fps: u32, output: &Path) -> Result<()> {
        let first = frames
            .first()
            .ok_or_else(|| anyhow!("No frames to encode"))?;
        let rate = i32::try_from(fps).context("Frame rate too large")?;

        ffmpeg::init().context("Failed to initialize FFmpeg")?;

        let (width, height) = frame_size(first)?;
        debug!("Encoding {} frames at {width}x{height}, {fps} fps", frames.len());

        let mut octx = format::output(output)
            .with_context(|| format!("Failed to create output file: {output:?}"))?;
        // Armed only once FFmpeg owns the file, so a rejected path is never removed.
        let mut cleanup_guard = CleanupGuard::new(output.to_path_buf());
        let codec = self.find_codec(&octx, output)?;
        info!("Using video encoder {}", codec.name());
        let global_header = octx
            .format()
            .flags()
            .contains(format::Flags::GLOBAL_HEADER);

        let mut video = ffmpeg::codec::context::Context::new_with_codec(codec)
            .encoder()
            .video()
            .with_context(|| format!("Encoder {} does not produce video", codec.name()))?;
        video.set_width(width);
        video.set_height(height);
        video.set_format(Pixel::YUV420P);
        video.set_time_base(Rational::new(1, rate));
        video.set_frame_rate(Some(Rational::new(rate, 1)));
        if global_header {
            video.set_flags(ffmpeg::codec::Flags::GLOBAL_HEADER);
        }
        let mut video_encoder = video
            .open_as(codec)
            .with_context(|| format!("Failed to open encoder {}", codec.name()))?;

        let stream_index = {
            let mut ost = octx.add_stream(codec)?;
            ost.set_parameters(&video_encoder);
            ost.set_time_base(Rational::new(1, rate));
            ost.index()
        };

        octx.write_header()
            .with_context(|| format!("Failed to write header to {output:?}"))?;

        let encoder_time_base = Rational::new(1, rate);
        let stream_time_base = octx
            .stream(stream_index)
            .ok_or_else(|| anyhow!("Output stream disappeared after writing header"))?
            .time_base();

        let mut scaler = scaling::Context::get(
            Pixel::RGB24,
            width,
            height,
            Pixel::YUV420P,
            width,
            height,
            scaling::Flags::BILINEAR,
        )?;

        let mut current: Option<(&Path, ffmpeg::frame::Video)> = None;
        for (index, path) in frames.iter().enumerate() {
            if self.cancelled.load(Ordering::SeqCst) {
                return Err(anyhow!("Encoding interrupted after {index} frames"));
            }

            let reuse = matches!(&current, Some((last, _)) if *last == path.as_path());
            if !reuse {
                let rgb_frame = load_rgb_frame(path, width, height)?;
                let mut yuv_frame = ffmpeg::frame::Video::empty();
                scaler
                    .run(&rgb_frame, &mut yuv_frame)
                    .with_context(|| format!("Failed to convert pixels of {path:?}"))?;
                current = Some((path.as_path(), yuv_frame));
            }

            let Some((_, yuv_frame)) = current.as_mut() else {
                continue;
            };
            yuv_frame.set_pts(Some(index as i64));
            video_encoder
                .send_frame(yuv_frame)
                .with_context(|| format!("Failed to encode frame {index}"))?;
            write_packets(
                &mut video_encoder,
                &mut octx,
                stream_index,
                encoder_time_base,
                stream_time_base,
            )?;

            let encoded = index + 1;
            if encoded % PROGRESS_INTERVAL == 0 || encoded == frames.len() {
                print!("\rEncoded frames: {encoded}/{}", frames.len());
                std::io::stdout().flush().unwrap_or_default();
            }
        }
        println!();

        video_encoder
            .send_eof()
            .context("Failed to flush video encoder")?;
        write_packets(
            &mut video_encoder,
            &mut octx,
            stream_index,
            encoder_time_base,
            stream_time_base,
        )?;
        octx.write_trailer()
            .with_context(|| format!("Failed to finish {output:?}"))?;

        cleanup_guard.disarm();
        Ok(())
    }
}

fn write_packets(
    video_encoder: &mut encoder::video::Encoder,
    octx: &mut format::context::Output,
    stream_index: usize,
    encoder_time_base: Rational,
    stream_time_base: Rational,
) -> Result<()> {
    let mut packet = ffmpeg::Packet::empty();
    loop {
        match video_encoder.receive_packet(&mut packet) {
            Ok(()) => {
                packet.set_stream(stream_index);
                packet.rescale_ts(encoder_time_base, stream_time_base);
                packet
                    .write_interleaved(octx)
                    .context("Failed to write packet")?;
            }
            Err(ffmpeg::Error::Eof) => break,
            Err(ffmpeg::Error::Other { errno }) if errno == EAGAIN => break,
            Err(e) => return Err(anyhow!("Failed to receive packet from encoder: {}", e)),
        }
    }
    Ok(())
}

/// Size of the first image rounded down to even dimensions, as YUV420P requires.
fn frame_size(path: &Path) -> Result<(u32, u32)> {
    let (width, height) = image::image_dimensions(path)
        .with_context(|| format!("Failed to read image dimensions: {path:?}"))?;
    even_dimensions(width, height)
        .ok_or_else(|| anyhow!("Image too small to encode ({width}x{height}): {path:?}"))
}

fn even_dimensions(width: u32, height: u32) -> Option<(u32, u32)> {
    let (width, height) = (width & !1, height & !1);
    (width > 0 && height > 0).then_some((width, height))
}

fn load_rgb_frame(path: &Path, width: u32, height: u32) -> Result<ffmpeg::frame::Video> {
    let img = image::open(path).with_context(|| format!("Failed to open image: {path:?}"))?;
    let img = if img.width() != width || img.height() != height {
        img.resize_exact(width, height, FilterType::Triangle)
    } else {
        img
    };
    let rgb = img.to_rgb8();

    let mut frame = ffmpeg::frame::Video::new(Pixel::RGB24, width, height);
    let stride = frame.stride(0);
    let row_len = width as usize * 3;
    let data = frame.data_mut(0);
    for (y, row) in rgb.as_raw().chunks_exact(row_len).enumerate() {
        let offset = y * stride;
        data[offset..offset + row_len].copy_from_slice(row);
    }
    Ok(frame)
}
