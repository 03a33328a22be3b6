// crates/les_physics/src/turbulence/error.rs

//! 湍流模型错误

use les_config::ConfigError;
use les_foundation::LesError;

/// 模型构建、修正与重读错误
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// 场或网格不一致
    #[error("场运算失败: {0}")]
    Field(#[from] LesError),

    /// 系数配置无效
    #[error("模型配置无效: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        let err: ModelError = LesError::size_mismatch("internal", 8, 4).into();
        assert!(matches!(err, ModelError::Field(_)));
        assert!(err.to_string().contains("internal"));

        let err: ModelError = ConfigError::unknown_type("filter", "box", &["simple"]).into();
        assert!(matches!(err, ModelError::Config(_)));
    }
}
