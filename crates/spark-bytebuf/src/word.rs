//! 定宽整数的编解码契约。
//!
//! # 设计背景（Why）
//! - 四个操作族（Take/Put/Peek/Overwrite）各自都有 8/16/32/64 位标量与数组形式，
//!   若逐一手写将产生数十个几乎相同的函数体；
//! - 通过 [`Word`] 把“宽度 + 字节序 + 高低交换”收敛到一处，操作族只负责边界检查与指针推进。
//!
//! # 契约说明（What）
//! - `Word` 为封闭 Trait，仅由 `u8`/`u16`/`u32`/`u64` 实现；
//! - `encode`/`decode` 的切片长度必须至少为 [`Word::WIDTH`]，调用方（缓冲内部）负责事先完成边界检查；
//! - 对任意字节序与交换设置，`decode(encode(v)) == v`。

use crate::{
    endian::Endian,
    hlswap::{hl_swap32, hl_swap64},
};

mod sealed {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// 可被缓冲读写的定宽无符号整数。
pub trait Word: Copy + Default + sealed::Sealed {
    /// 编码后的字节宽度。
    const WIDTH: usize;

    /// 按 `endian` 与 `hlswap` 将值写入 `dst[..WIDTH]`。
    fn encode(self, endian: Endian, hlswap: bool, dst: &mut [u8]);

    /// 从 `src[..WIDTH]` 按 `endian` 与 `hlswap` 还原值。
    fn decode(endian: Endian, hlswap: bool, src: &[u8]) -> Self;
}

impl Word for u8 {
    const WIDTH: usize = 1;

    #[inline]
    fn encode(self, _endian: Endian, _hlswap: bool, dst: &mut [u8]) {
        dst[0] = self;
    }

    #[inline]
    fn decode(_endian: Endian, _hlswap: bool, src: &[u8]) -> Self {
        src[0]
    }
}

impl Word for u16 {
    const WIDTH: usize = 2;

    // 16 位数值只有一个字，交换不适用。
    #[inline]
    fn encode(self, endian: Endian, _hlswap: bool, dst: &mut [u8]) {
        let raw = match endian {
            Endian::Big => self.to_be_bytes(),
            Endian::Little => self.to_le_bytes(),
        };
        dst[..2].copy_from_slice(&raw);
    }

    #[inline]
    fn decode(endian: Endian, _hlswap: bool, src: &[u8]) -> Self {
        let mut raw = [0u8; 2];
        raw.copy_from_slice(&src[..2]);
        match endian {
            Endian::Big => u16::from_be_bytes(raw),
            Endian::Little => u16::from_le_bytes(raw),
        }
    }
}

macro_rules! swapped_word {
    ($ty:ty, $width:expr, $swap:ident) => {
        impl Word for $ty {
            const WIDTH: usize = $width;

            #[inline]
            fn encode(self, endian: Endian, hlswap: bool, dst: &mut [u8]) {
                let value = if hlswap { $swap(self) } else { self };
                let raw = match endian {
                    Endian::Big => value.to_be_bytes(),
                    Endian::Little => value.to_le_bytes(),
                };
                dst[..$width].copy_from_slice(&raw);
            }

            #[inline]
            fn decode(endian: Endian, hlswap: bool, src: &[u8]) -> Self {
                let mut raw = [0u8; $width];
                raw.copy_from_slice(&src[..$width]);
                let value = match endian {
                    Endian::Big => <$ty>::from_be_bytes(raw),
                    Endian::Little => <$ty>::from_le_bytes(raw),
                };
                if hlswap { $swap(value) } else { value }
            }
        }
    };
}

swapped_word!(u32, 4, hl_swap32);
swapped_word!(u64, 8, hl_swap64);

/// 数组的总字节数；溢出时返回 `None`。
#[inline]
pub(crate) fn byte_len<T: Word>(count: usize) -> Option<usize> {
    count.checked_mul(T::WIDTH)
}

/// 将 `src` 中的元素连续编码到 `dst`。
#[inline]
pub(crate) fn encode_slice<T: Word>(src: &[T], endian: Endian, hlswap: bool, dst: &mut [u8]) {
    for (value, chunk) in src.iter().zip(dst.chunks_exact_mut(T::WIDTH)) {
        value.encode(endian, hlswap, chunk);
    }
}

/// 从 `src` 连续解码到 `dst`。
#[inline]
pub(crate) fn decode_slice<T: Word>(src: &[u8], endian: Endian, hlswap: bool, dst: &mut [T]) {
    for (slot, chunk) in dst.iter_mut().zip(src.chunks_exact(T::WIDTH)) {
        *slot = T::decode(endian, hlswap, chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded<T: Word>(v: T, endian: Endian, hlswap: bool) -> [u8; 8] {
        let mut out = [0u8; 8];
        v.encode(endian, hlswap, &mut out);
        out
    }

    #[test]
    fn u32_layouts_follow_endian_then_swap() {
        assert_eq!(encoded(0x1234_5678u32, Endian::Big, false)[..4], [0x12, 0x34, 0x56, 0x78]);
        assert_eq!(encoded(0x1234_5678u32, Endian::Little, false)[..4], [0x78, 0x56, 0x34, 0x12]);
        assert_eq!(encoded(0xAABB_CCDDu32, Endian::Big, true)[..4], [0xBB, 0xAA, 0xDD, 0xCC]);
        assert_eq!(encoded(0xAABB_CCDDu32, Endian::Little, true)[..4], [0xCC, 0xDD, 0xAA, 0xBB]);
    }

    #[test]
    fn u16_ignores_swap() {
        assert_eq!(encoded(0x1234u16, Endian::Big, true)[..2], [0x12, 0x34]);
        assert_eq!(encoded(0x1234u16, Endian::Little, true)[..2], [0x34, 0x12]);
    }

    #[test]
    fn u64_swaps_all_four_words() {
        assert_eq!(
            encoded(0x1122_3344_5566_7788u64, Endian::Big, true),
            [0x22, 0x11, 0x44, 0x33, 0x66, 0x55, 0x88, 0x77]
        );
    }

    #[test]
    fn slices_round_trip() {
        let src = [0x0102_0304u32, 0xA0B0_C0D0, 0xFFFF_0000];
        for endian in [Endian::Big, Endian::Little] {
            for hlswap in [false, true] {
                let mut raw = [0u8; 12];
                encode_slice(&src, endian, hlswap, &mut raw);
                let mut back = [0u32; 3];
                decode_slice(&raw, endian, hlswap, &mut back);
                assert_eq!(back, src, "endian={endian:?} hlswap={hlswap}");
            }
        }
    }

    #[test]
    fn byte_len_detects_overflow() {
        assert_eq!(byte_len::<u64>(3), Some(24));
        assert_eq!(byte_len::<u64>(usize::MAX), None);
    }
}
