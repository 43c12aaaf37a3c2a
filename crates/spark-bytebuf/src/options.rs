//! 缓冲编解码配置。
//!
//! 协议实现通常在配置文件里声明“该链路使用小端 + 字内交换”等约定，
//! [`BufferOptions`] 把这组设置打包为可序列化的值，便于从 JSON/TOML 载入后一次性应用到缓冲。

use serde::{Deserialize, Serialize};

use crate::endian::Endian;

/// 每个缓冲实例的编解码设置。
///
/// # 契约说明（What）
/// - 缺省字段按 [`Default`] 补齐：大端序、关闭高低交换；
/// - 未知字段会被拒绝，避免拼写错误被静默忽略；
/// - 设置只影响此后的编码/解码，不会改写已有字节。
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BufferOptions {
    /// 多字节数值的字节序。
    pub endian: Endian,
    /// 是否对 32/64 位数值启用高低字节交换。
    pub hlswap: bool,
}

impl BufferOptions {
    /// 以指定字节序构造，交换关闭。
    pub const fn new(endian: Endian) -> Self {
        Self {
            endian,
            hlswap: false,
        }
    }

    /// 设置高低交换开关。
    pub const fn with_hlswap(mut self, hlswap: bool) -> Self {
        self.hlswap = hlswap;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let opts: BufferOptions = serde_json::from_str(r#"{"hlswap": true}"#).unwrap();
        assert_eq!(opts, BufferOptions::default().with_hlswap(true));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed = serde_json::from_str::<BufferOptions>(r#"{"endain": "little"}"#);
        assert!(parsed.is_err(), "拼写错误的字段应当报错");
    }

    #[test]
    fn loads_from_toml() {
        let opts: BufferOptions = toml::from_str("endian = \"little\"\nhlswap = true\n").unwrap();
        assert_eq!(opts, BufferOptions::new(Endian::Little).with_hlswap(true));
    }
}
