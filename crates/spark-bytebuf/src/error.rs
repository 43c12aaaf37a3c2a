//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 缓冲原语的所有失败都汇聚到 [`BufferError`]，调用方无需区分来源模块；
//! - 错误被划分为两类：**契约违例**（调用方的编程错误，例如越界读取）与**可恢复状态**
//!   （例如读到末尾、定长缓冲的短写），对应 [`ErrorClass`]。
//!
//! ## 设计要求（What）
//! - 契约类错误在具名接口（`take_u32` 等）中直接 panic，仅在 `try_*` 接口中以 `Err` 返回，
//!   且不应被普通控制流吞掉，只能通过修正上游逻辑消除；
//! - 可恢复类错误总是以 `Err` 或部分计数返回，调用方应当检查并处理；
//! - 每个变体都携带稳定错误码（[`BufferError::code`]），便于日志与指标聚合。

use thiserror::Error;

/// 错误类别，区分“修代码”与“处理即可”两种失败。
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorClass {
    /// 调用方违反了前置条件，属于编程错误。
    Contract,
    /// 正常运行过程中预期会出现的状态，例如读取到数据末尾。
    Recoverable,
}

/// 缓冲操作的统一错误域。
///
/// # 教案式说明
/// - **意图 (Why)**：把越界、容量不足、短写、读尽等情况集中建模，
///   让 `try_*` 接口的调用方可以用 `?` 直接传播，也能据 [`class`](Self::class) 决定是否重试。
/// - **契约 (What)**：
///   - 所有变体均为 `Clone + Eq`，可直接在测试中比较；
///   - 返回错误时缓冲状态保持不变，唯一例外是 [`ShortWrite`](Self::ShortWrite)：
///     已写入部分的位置与长度已经推进；
/// - **设计权衡 (Trade-offs)**：字段全部为 `usize`/`isize`，不做堆分配，`no_std` 下同样可用。
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BufferError {
    /// 顺序读取所需字节超出可读区域。
    #[error("read of {requested} bytes exceeds readable {readable}")]
    InsufficientReadable { requested: usize, readable: usize },

    /// 基于当前位置的随机读取越界，或换算后的绝对位置为负。
    #[error("peek of {width} bytes at pos {pos} + offset {offset} exceeds count {len}")]
    PeekOutOfBounds {
        pos: usize,
        offset: isize,
        width: usize,
        len: usize,
    },

    /// 绝对偏移覆写越过有效数据末尾。
    #[error("overwrite of {width} bytes at offset {offset} exceeds count {len}")]
    OverwriteOutOfBounds {
        offset: usize,
        width: usize,
        len: usize,
    },

    /// 定长缓冲无法容纳本次写入。
    #[error("write requires {required} bytes but capacity is {capacity}")]
    CapacityExceeded { required: usize, capacity: usize },

    /// 子视图区间非法：`start > end` 或越过容量末尾。
    #[error("invalid view range [{start}, {end}) over capacity {capacity}")]
    InvalidRange {
        start: usize,
        end: usize,
        capacity: usize,
    },

    /// 尺寸计算溢出 `usize`。
    #[error("size arithmetic overflowed usize")]
    LengthOverflow,

    /// `seek`/`reseek` 的目标位置不在 `[0, len]` 内。
    #[error("seek offset {offset} out of bounds [0, {len}]")]
    SeekOutOfRange { offset: usize, len: usize },

    /// 定长缓冲的批量写入被截断。
    #[error("short write: {written} of {requested} bytes written")]
    ShortWrite { written: usize, requested: usize },

    /// 没有可读数据。
    #[error("end of data")]
    EndOfData,

    /// 以外部存储构造缓冲时给出的有效长度超过容量。
    #[error("valid length {len} exceeds storage capacity {capacity}")]
    InvalidLength { len: usize, capacity: usize },
}

impl BufferError {
    /// 返回错误类别。
    pub const fn class(&self) -> ErrorClass {
        match self {
            BufferError::InsufficientReadable { .. }
            | BufferError::PeekOutOfBounds { .. }
            | BufferError::OverwriteOutOfBounds { .. }
            | BufferError::CapacityExceeded { .. }
            | BufferError::InvalidRange { .. }
            | BufferError::LengthOverflow => ErrorClass::Contract,
            BufferError::SeekOutOfRange { .. }
            | BufferError::ShortWrite { .. }
            | BufferError::EndOfData
            | BufferError::InvalidLength { .. } => ErrorClass::Recoverable,
        }
    }

    /// 是否属于可恢复类错误。
    pub const fn is_recoverable(&self) -> bool {
        matches!(self.class(), ErrorClass::Recoverable)
    }

    /// 稳定错误码，格式为 `bytebuf.<域>.<原因>`。
    pub const fn code(&self) -> &'static str {
        match self {
            BufferError::InsufficientReadable { .. } => "bytebuf.read.insufficient",
            BufferError::PeekOutOfBounds { .. } => "bytebuf.peek.out_of_bounds",
            BufferError::OverwriteOutOfBounds { .. } => "bytebuf.overwrite.out_of_bounds",
            BufferError::CapacityExceeded { .. } => "bytebuf.write.capacity_exceeded",
            BufferError::InvalidRange { .. } => "bytebuf.view.invalid_range",
            BufferError::LengthOverflow => "bytebuf.size.overflow",
            BufferError::SeekOutOfRange { .. } => "bytebuf.seek.out_of_range",
            BufferError::ShortWrite { .. } => "bytebuf.write.short",
            BufferError::EndOfData => "bytebuf.read.eof",
            BufferError::InvalidLength { .. } => "bytebuf.storage.invalid_length",
        }
    }
}

/// 将 `try_*` 的结果转换为具名接口的 panic 语义。
///
/// 仅用于契约类错误：`op` 为触发 panic 的公开方法名，出现在 panic 信息中便于定位调用点。
#[track_caller]
pub(crate) fn contract<T>(op: &'static str, result: Result<T, BufferError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("spark_bytebuf::Buffer::{op}: {err} [{}]", err.code()),
    }
}

#[cfg(feature = "std")]
impl From<BufferError> for std::io::Error {
    /// 映射到最接近的 `io::ErrorKind`，错误本身作为 `source` 保留。
    fn from(err: BufferError) -> Self {
        use std::io::ErrorKind;

        let kind = match err {
            BufferError::EndOfData | BufferError::InsufficientReadable { .. } => {
                ErrorKind::UnexpectedEof
            }
            BufferError::ShortWrite { .. } | BufferError::CapacityExceeded { .. } => {
                ErrorKind::WriteZero
            }
            _ => ErrorKind::InvalidInput,
        };
        std::io::Error::new(kind, err)
    }
}
