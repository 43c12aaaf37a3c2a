//! 随机访问：Peek（相对游标读取）与 Overwrite（绝对偏移覆写），两者都不移动游标。
//!
//! # 契约说明（What）
//! - Peek 的 `offset` 为有符号值，相对当前游标，可向前窥视已处理区域；换算后的绝对位置为负或
//!   `绝对位置 + 宽度 > len` 时返回 [`BufferError::PeekOutOfBounds`]；
//! - Overwrite 的 `offset` 为绝对偏移，只能改写已有的有效数据 `[0, len)`，不会扩展长度，
//!   典型用法是回填先占位、后计算的长度字段；
//! - 数组形式整体成功或整体失败。

use crate::{
    buffer::Buffer,
    error::{BufferError, contract},
    policy::{CapacityPolicy, Storage},
    word::{Word, byte_len, decode_slice, encode_slice},
};

impl<S: Storage, P: CapacityPolicy<S>> Buffer<S, P> {
    fn peek_start(&self, offset: isize, n: usize) -> Result<usize, BufferError> {
        let out_of_bounds = || BufferError::PeekOutOfBounds {
            pos: self.pos,
            offset,
            width: n,
            len: self.len,
        };
        let start = self
            .pos
            .checked_add_signed(offset)
            .ok_or_else(out_of_bounds)?;
        match start.checked_add(n) {
            Some(end) if end <= self.len => Ok(start),
            _ => Err(out_of_bounds()),
        }
    }

    fn overwrite_start(&self, offset: usize, n: usize) -> Result<usize, BufferError> {
        match offset.checked_add(n) {
            Some(end) if end <= self.len => Ok(offset),
            _ => Err(BufferError::OverwriteOutOfBounds {
                offset,
                width: n,
                len: self.len,
            }),
        }
    }

    /// 读取 `pos + offset` 处的定宽整数，不移动游标。
    pub fn try_peek<T: Word>(&self, offset: isize) -> Result<T, BufferError> {
        let start = self.peek_start(offset, T::WIDTH)?;
        Ok(T::decode(
            self.endian,
            self.hlswap,
            &self.storage.as_ref()[start..start + T::WIDTH],
        ))
    }

    /// 从 `pos + offset` 起按 `dst` 长度连续读取，不移动游标。
    pub fn try_peek_into<T: Word>(&self, offset: isize, dst: &mut [T]) -> Result<(), BufferError> {
        let n = byte_len::<T>(dst.len()).ok_or(BufferError::LengthOverflow)?;
        let start = self.peek_start(offset, n)?;
        decode_slice(
            &self.storage.as_ref()[start..start + n],
            self.endian,
            self.hlswap,
            dst,
        );
        Ok(())
    }

    /// 在绝对偏移 `offset` 处覆写定宽整数。
    pub fn try_overwrite<T: Word>(&mut self, offset: usize, value: T) -> Result<(), BufferError> {
        let start = self.overwrite_start(offset, T::WIDTH)?;
        let (endian, hlswap) = (self.endian, self.hlswap);
        value.encode(
            endian,
            hlswap,
            &mut self.storage.as_mut()[start..start + T::WIDTH],
        );
        Ok(())
    }

    /// 从绝对偏移 `offset` 起覆写 `src`。
    pub fn try_overwrite_slice<T: Word>(
        &mut self,
        offset: usize,
        src: &[T],
    ) -> Result<(), BufferError> {
        let n = byte_len::<T>(src.len()).ok_or(BufferError::LengthOverflow)?;
        let start = self.overwrite_start(offset, n)?;
        let (endian, hlswap) = (self.endian, self.hlswap);
        encode_slice(
            src,
            endian,
            hlswap,
            &mut self.storage.as_mut()[start..start + n],
        );
        Ok(())
    }
}

macro_rules! random_accessors {
    ($($ty:ty => $peek:ident, $peek_into:ident, $overwrite:ident, $overwrite_slice:ident;)*) => {
        impl<S: Storage, P: CapacityPolicy<S>> Buffer<S, P> {
            $(
                #[doc = concat!("读取 `pos + offset` 处的 `", stringify!($ty), "`，不移动游标；越界时 panic。")]
                #[track_caller]
                pub fn $peek(&self, offset: isize) -> $ty {
                    contract(stringify!($peek), self.try_peek::<$ty>(offset))
                }

                #[doc = concat!("从 `pos + offset` 起读取 `", stringify!($ty), "` 数组，不移动游标；越界时 panic。")]
                #[track_caller]
                pub fn $peek_into(&self, offset: isize, dst: &mut [$ty]) {
                    contract(stringify!($peek_into), self.try_peek_into(offset, dst))
                }

                #[doc = concat!("在绝对偏移处覆写 `", stringify!($ty), "`；越过有效数据时 panic。")]
                #[track_caller]
                pub fn $overwrite(&mut self, offset: usize, value: $ty) {
                    contract(stringify!($overwrite), self.try_overwrite(offset, value))
                }

                #[doc = concat!("从绝对偏移起覆写 `", stringify!($ty), "` 数组；越过有效数据时 panic。")]
                #[track_caller]
                pub fn $overwrite_slice(&mut self, offset: usize, src: &[$ty]) {
                    contract(stringify!($overwrite_slice), self.try_overwrite_slice(offset, src))
                }
            )*
        }
    };
}

random_accessors! {
    u8 => peek_u8, peek_u8_into, overwrite_u8, overwrite_u8_slice;
    u16 => peek_u16, peek_u16_into, overwrite_u16, overwrite_u16_slice;
    u32 => peek_u32, peek_u32_into, overwrite_u32, overwrite_u32_slice;
    u64 => peek_u64, peek_u64_into, overwrite_u64, overwrite_u64_slice;
}
