//! 容量策略：定长（[`Fixed`]）与可增长（[`Growable`]）。
//!
//! # 模块定位（Why）
//! - 两种缓冲的读写逻辑完全一致，差别只在“写入超出容量时怎么办”；
//! - 把这一决策抽象为 [`CapacityPolicy`]，由 [`Buffer`](crate::Buffer) 以类型参数携带，
//!   编译期单态化，不引入动态分发。
//!
//! # 设计概要（How）
//! - **严格路径** [`CapacityPolicy::ensure_writable`]：标量/数组 Put 使用。定长策略在容量不足时返回
//!   [`BufferError::CapacityExceeded`]；可增长策略按“翻倍或所需，取大者”重新分配，首次分配下限为
//!   [`MIN_GROWTH`] 字节。
//! - **批量路径** [`CapacityPolicy::admit`]：`write`/`fill` 使用。定长策略把写入截断到可写区域，
//!   可增长策略扩容后全部接纳。
//!
//! # 契约说明（What）
//! - 容量单调不减；扩容保留 `[0, capacity)` 的全部字节，新增区域以 0 填充；
//! - 扩容会使此前借出的切片失效，借用检查器保证调用方必须重新获取。

use alloc::vec::Vec;

use bytes::BytesMut;

use crate::error::BufferError;

/// 可作为缓冲底层存储的连续字节区域，整段长度即缓冲容量。
pub trait Storage: AsRef<[u8]> + AsMut<[u8]> {}

impl<T: AsRef<[u8]> + AsMut<[u8]>> Storage for T {}

/// 可以原地扩展长度的存储。
pub trait GrowableStorage: Storage {
    /// 将存储扩展到 `new_capacity` 字节，新增部分以 0 填充，已有内容不变。
    fn grow_to(&mut self, new_capacity: usize);
}

impl GrowableStorage for Vec<u8> {
    fn grow_to(&mut self, new_capacity: usize) {
        self.resize(new_capacity, 0);
    }
}

impl GrowableStorage for BytesMut {
    fn grow_to(&mut self, new_capacity: usize) {
        self.resize(new_capacity, 0);
    }
}

/// 从零容量扩容时的最小分配。
pub const MIN_GROWTH: usize = 64;

/// 写入超出容量时的处理策略。
///
/// # 教案式说明
/// - **意图 (Why)**：让 Put/Write/Fill 共享同一套实现，只把“扩容还是失败”的决策交给策略。
/// - **契约 (What)**：
///   - `ensure_writable(storage, required)` 成功返回后，`storage` 长度不小于 `required`；
///   - `admit(storage, pos, end)` 返回实际可写入的结束位置 `granted`，满足
///     `pos <= granted <= end`，且 `storage` 长度不小于 `granted`；
///   - `remaining_mut(capacity, pos)` 为 `bytes::BufMut` 报告的剩余可写量。
/// - **前置条件**：调用方保证 `pos <= storage.len()` 且 `pos <= end`。
pub trait CapacityPolicy<S: Storage> {
    /// 策略名称，用于调试输出。
    const NAME: &'static str;

    /// 严格写入：保证 `[0, required)` 可写，否则返回契约错误。
    fn ensure_writable(storage: &mut S, required: usize) -> Result<(), BufferError>;

    /// 批量写入：尽可能接纳 `[pos, end)`，返回实际结束位置。
    fn admit(storage: &mut S, pos: usize, end: usize) -> usize;

    /// `bytes::BufMut::remaining_mut` 的取值。
    fn remaining_mut(capacity: usize, pos: usize) -> usize;
}

/// 定长策略：容量在构造时确定，永不重新分配。
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Fixed;

impl<S: Storage> CapacityPolicy<S> for Fixed {
    const NAME: &'static str = "fixed";

    fn ensure_writable(storage: &mut S, required: usize) -> Result<(), BufferError> {
        let capacity = storage.as_ref().len();
        if required > capacity {
            return Err(BufferError::CapacityExceeded { required, capacity });
        }
        Ok(())
    }

    fn admit(storage: &mut S, pos: usize, end: usize) -> usize {
        let capacity = storage.as_ref().len();
        let granted = end.min(capacity);
        if granted < end {
            tracing::debug!(
                requested = end - pos,
                written = granted - pos,
                capacity,
                "fixed buffer truncated bulk write"
            );
        }
        granted
    }

    fn remaining_mut(capacity: usize, pos: usize) -> usize {
        capacity - pos
    }
}

/// 可增长策略：写入越界时按翻倍策略透明扩容。
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Growable;

impl<S: GrowableStorage> CapacityPolicy<S> for Growable {
    const NAME: &'static str = "growable";

    fn ensure_writable(storage: &mut S, required: usize) -> Result<(), BufferError> {
        grow(storage, required);
        Ok(())
    }

    fn admit(storage: &mut S, _pos: usize, end: usize) -> usize {
        grow(storage, end);
        end
    }

    fn remaining_mut(_capacity: usize, pos: usize) -> usize {
        isize::MAX as usize - pos
    }
}

/// 计算满足 `required` 的下一档容量。
pub(crate) const fn next_capacity(current: usize, required: usize) -> usize {
    let candidate = if current == 0 {
        MIN_GROWTH
    } else {
        current.saturating_mul(2)
    };
    if candidate < required {
        required
    } else {
        candidate
    }
}

/// 若容量不足 `required` 则扩容；已足够时为空操作。
pub(crate) fn grow<S: GrowableStorage>(storage: &mut S, required: usize) {
    let current = storage.as_ref().len();
    if required <= current {
        return;
    }
    let next = next_capacity(current, required);
    tracing::trace!(from = current, to = next, required, "growable buffer reallocated");
    storage.grow_to(next);
}
