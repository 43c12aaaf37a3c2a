//! 字节序设置。
//!
//! 每个缓冲实例携带独立的 [`Endian`]，决定 16/32/64 位数值在存储中的字节排列；
//! 与 [`hlswap`](crate::hl_swap32) 正交，两者组合覆盖常见协议与工业设备的字序约定。

use serde::{Deserialize, Serialize};

/// 多字节整数的字节序。
///
/// # 契约说明（What）
/// - 默认值为 [`Endian::Big`]，与网络字节序保持一致；
/// - 序列化形式为小写字符串 `"big"` / `"little"`，便于在配置文件中书写；
/// - 仅影响 16/32/64 位数值，8 位读写不受字节序影响。
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endian {
    /// 高位字节在前。
    #[default]
    Big,
    /// 低位字节在前。
    Little,
}

impl Endian {
    /// 当前编译目标的本机字节序。
    #[cfg(target_endian = "big")]
    pub const NATIVE: Endian = Endian::Big;
    /// 当前编译目标的本机字节序。
    #[cfg(target_endian = "little")]
    pub const NATIVE: Endian = Endian::Little;

    /// 是否为大端序。
    pub const fn is_big(self) -> bool {
        matches!(self, Endian::Big)
    }
}
