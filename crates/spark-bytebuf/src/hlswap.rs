//! 高低字节交换（high-low swap）。
//!
//! 部分工业协议（典型如 Modbus 寄存器）以 16 位字为单位传输数据，且字内字节序与整体字节序不一致。
//! 本模块提供的变换在每个 16 位字内部交换高低字节：
//! `0x11223344 -> 0x22114433`。变换是自反的，编码与解码共用同一函数。
//!
//! 写入路径为 `值 -> 交换 -> 字节序编码`，读取路径为 `字节序解码 -> 交换`，
//! 8/16 位数值不参与交换。

/// 在 `u32` 的每个 16 位字内交换高低字节。
///
/// ```
/// assert_eq!(spark_bytebuf::hl_swap32(0x1122_3344), 0x2211_4433);
/// ```
pub const fn hl_swap32(v: u32) -> u32 {
    ((v & 0xFF00_FF00) >> 8) | ((v & 0x00FF_00FF) << 8)
}

/// 在 `u64` 的每个 16 位字内交换高低字节。
///
/// ```
/// assert_eq!(
///     spark_bytebuf::hl_swap64(0x1122_3344_5566_7788),
///     0x2211_4433_6655_8877
/// );
/// ```
pub const fn hl_swap64(v: u64) -> u64 {
    ((v & 0xFF00_FF00_FF00_FF00) >> 8) | ((v & 0x00FF_00FF_00FF_00FF) << 8)
}
