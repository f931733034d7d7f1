//! Callout 文本

use super::CalloutError;

/// 未提供消息时使用的默认请假播报
pub const DEFAULT_CALLOUT_MESSAGE: &str = "Hi, this is calling to let you know I'm not feeling well today and won't be able to come in to work. I'll keep you updated. Thanks for understanding.";

/// 单次合成允许的最大字符数
pub const MAX_CALLOUT_CHARS: usize = 5000;

/// 待合成的播报文本
///
/// 不变量: 非空，且不超过 MAX_CALLOUT_CHARS 个字符
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalloutText(String);

impl CalloutText {
    /// 解析客户端消息；缺省、空串或纯空白回退到默认文本
    pub fn resolve(message: Option<&str>) -> Result<Self, CalloutError> {
        let message = match message {
            Some(m) if !m.trim().is_empty() => m,
            _ => return Ok(Self::default_message()),
        };

        let chars = message.chars().count();
        if chars > MAX_CALLOUT_CHARS {
            return Err(CalloutError::MessageTooLong {
                len: chars,
                max: MAX_CALLOUT_CHARS,
            });
        }

        Ok(Self(message.to_string()))
    }

    pub fn default_message() -> Self {
        Self(DEFAULT_CALLOUT_MESSAGE.to_string())
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_CALLOUT_MESSAGE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CalloutText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
