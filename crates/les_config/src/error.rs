// crates/les_config/src/error.rs

//! 配置层错误类型

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 无效值
    #[error("无效值 '{key}': {value} - {reason}")]
    InvalidValue {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 原因
        reason: String,
    },

    /// 未知的运行时选择类型
    #[error("未知的 {key} 类型 '{name}'，可选: {}", valid.join(", "))]
    UnknownType {
        /// 配置键
        key: String,
        /// 给出的类型名
        name: String,
        /// 可选类型名
        valid: Vec<String>,
    },
}

impl ConfigError {
    /// 无效值
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// 未知类型
    pub fn unknown_type(key: impl Into<String>, name: impl Into<String>, valid: &[&str]) -> Self {
        Self::UnknownType {
            key: key.into(),
            name: name.into(),
            valid: valid.iter().map(|s| s.to_string()).collect(),
        }
    }
}
