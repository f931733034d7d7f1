//! Symphonia Probe - 基于 symphonia 的样本时长探测

use async_trait::async_trait;
use std::fs::File;
use std::path::{Path, PathBuf};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::AudioProbePort;
use crate::domain::profile::SampleDuration;

/// 时长探测器
///
/// 优先使用容器头里的帧数；缺失时（如无 Xing 头的 MP3）累加包时长
#[derive(Debug, Clone, Default)]
pub struct SymphoniaProbe;

impl SymphoniaProbe {
    pub fn new() -> Self {
        Self
    }

    fn probe_secs(path: &Path) -> Result<f64, String> {
        let file = File::open(path).map_err(|e| format!("Open failed: {}", e))?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| format!("Probe failed: {}", e))?;

        let mut format = probed.format;
        let track = format
            .default_track()
            .ok_or_else(|| "No audio track found".to_string())?;

        let sample_rate = track
            .codec_params
            .sample_rate
            .filter(|r| *r > 0)
            .ok_or_else(|| "Unknown sample rate".to_string())?;

        if let Some(frames) = track.codec_params.n_frames {
            return Ok(frames as f64 / sample_rate as f64);
        }

        let track_id = track.id;
        let time_base = track.codec_params.time_base;
        let mut total_ts: u64 = 0;

        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(symphonia::core::errors::Error::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => return Err(format!("Packet read error: {}", e)),
            };
            if packet.track_id() == track_id {
                total_ts += packet.dur();
            }
        }

        Ok(match time_base {
            Some(tb) => {
                let time = tb.calc_time(total_ts);
                time.seconds as f64 + time.frac
            }
            None => total_ts as f64 / sample_rate as f64,
        })
    }
}

#[async_trait]
impl AudioProbePort for SymphoniaProbe {
    async fn duration(&self, path: &Path) -> SampleDuration {
        let owned: PathBuf = path.to_path_buf();
        let result = tokio::task::spawn_blocking(move || Self::probe_secs(&owned)).await;

        match result {
            Ok(Ok(secs)) => SampleDuration::from_secs(secs),
            Ok(Err(e)) => {
                tracing::debug!(path = %path.display(), error = %e, "Could not measure sample duration");
                SampleDuration::UNKNOWN
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Duration probe task failed");
                SampleDuration::UNKNOWN
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 生成静音 WAV：16 位 PCM
    fn create_test_wav(sample_rate: u32, num_channels: u16, secs: f32) -> Vec<u8> {
        let bits_per_sample: u16 = 16;
        let num_frames = (sample_rate as f32 * secs) as usize;
        let data_size = num_frames * (bits_per_sample as usize / 8) * num_channels as usize;

        let mut wav = Vec::with_capacity(44 + data_size);
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&((36 + data_size) as u32).to_le_bytes());
        wav.extend_from_slice(b"WAVE");
        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
        wav.extend_from_slice(&num_channels.to_le_bytes());
        wav.extend_from_slice(&sample_rate.to_le_bytes());
        let byte_rate = sample_rate * num_channels as u32 * (bits_per_sample / 8) as u32;
        wav.extend_from_slice(&byte_rate.to_le_bytes());
        let block_align = num_channels * (bits_per_sample / 8);
        wav.extend_from_slice(&block_align.to_le_bytes());
        wav.extend_from_slice(&bits_per_sample.to_le_bytes());
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&(data_size as u32).to_le_bytes());
        wav.resize(44 + data_size, 0);
        wav
    }

    #[tokio::test]
    async fn test_two_second_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("two.wav");
        std::fs::write(&path, create_test_wav(16000, 1, 2.0)).unwrap();

        let duration = SymphoniaProbe::new().duration(&path).await;
        assert!((duration.as_secs() - 2.0).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_stereo_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        std::fs::write(&path, create_test_wav(22050, 2, 1.5)).unwrap();

        let duration = SymphoniaProbe::new().duration(&path).await;
        assert!((duration.as_secs() - 1.5).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_garbage_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.wav");
        std::fs::write(&path, b"definitely not audio").unwrap();

        let duration = SymphoniaProbe::new().duration(&path).await;
        assert!(!duration.is_known());
    }

    #[tokio::test]
    async fn test_missing_file_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let duration = SymphoniaProbe::new()
            .duration(&dir.path().join("absent.wav"))
            .await;
        assert_eq!(duration, SampleDuration::UNKNOWN);
    }
}
