//! Voice Commands

/// 上传音色样本命令
#[derive(Debug, Clone)]
pub struct UploadVoice {
    pub sample: Vec<u8>,
}
