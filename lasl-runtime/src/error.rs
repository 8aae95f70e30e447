//! # Error 模块
//!
//! 定义 lasl-runtime 中使用的错误类型。
//!
//! 灯光调度与 Morse 编码本身不会失败：找不到适配器、超出零件上限、
//! 无法识别的符号都会降级为确定的空操作。只有配置与载具描述的加载会返回错误。

use thiserror::Error;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置文件读写失败
    #[error("配置 IO 错误: {path} - {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON 解析或序列化失败
    #[error("配置序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 配置值不合法
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}

/// lasl-runtime 统一错误类型
#[derive(Error, Debug)]
pub enum LaslError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 载具描述文件读取失败
    #[error("读取载具描述失败: {path} - {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 载具描述格式错误
    #[error("载具描述格式错误: {0}")]
    VesselDescription(#[source] serde_json::Error),
}

/// Result 类型别名
pub type LaslResult<T> = Result<T, LaslError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let err: LaslError = ConfigError::ValidationFailed("max_parts_to_use".to_string()).into();
        assert!(matches!(err, LaslError::Config(ConfigError::ValidationFailed(_))));
        assert!(err.to_string().contains("max_parts_to_use"));
    }
}
