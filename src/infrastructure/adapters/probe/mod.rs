//! Probe Adapter - 音频时长探测

mod symphonia_probe;

pub use symphonia_probe::SymphoniaProbe;
