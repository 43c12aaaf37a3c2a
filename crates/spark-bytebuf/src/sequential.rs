//! 顺序读写：Take（读取并推进）与 Put（写入并推进）。
//!
//! # 契约说明（What）
//! - Take 要求 `n <= readable`，否则为契约违例（[`BufferError::InsufficientReadable`]）；
//! - Put 把容量决策交给策略：定长缓冲越界即失败（[`BufferError::CapacityExceeded`]），
//!   可增长缓冲扩容后写入；成功后有效长度扩展到 `max(len, pos)`；
//! - 数组形式整体成功或整体失败，失败时不会触碰任何字节。

use crate::{
    buffer::Buffer,
    error::{BufferError, contract},
    policy::{CapacityPolicy, Storage},
    word::{Word, byte_len, decode_slice, encode_slice},
};

impl<S: Storage, P: CapacityPolicy<S>> Buffer<S, P> {
    /// 读取一个定宽整数并推进游标。
    pub fn try_take<T: Word>(&mut self) -> Result<T, BufferError> {
        let end = self.prepare_read(T::WIDTH)?;
        let value = T::decode(self.endian, self.hlswap, &self.storage.as_ref()[self.pos..end]);
        self.pos = end;
        Ok(value)
    }

    /// 按 `dst` 的长度连续读取并推进游标。
    pub fn try_take_into<T: Word>(&mut self, dst: &mut [T]) -> Result<(), BufferError> {
        let n = byte_len::<T>(dst.len()).ok_or(BufferError::LengthOverflow)?;
        let end = self.prepare_read(n)?;
        decode_slice(
            &self.storage.as_ref()[self.pos..end],
            self.endian,
            self.hlswap,
            dst,
        );
        self.pos = end;
        Ok(())
    }

    /// 在游标处写入一个定宽整数并推进游标。
    pub fn try_put<T: Word>(&mut self, value: T) -> Result<(), BufferError> {
        let end = self.prepare_write(T::WIDTH)?;
        let (endian, hlswap, pos) = (self.endian, self.hlswap, self.pos);
        value.encode(endian, hlswap, &mut self.storage.as_mut()[pos..end]);
        self.finish_write(end);
        Ok(())
    }

    /// 在游标处连续写入 `src` 并推进游标。
    pub fn try_put_slice<T: Word>(&mut self, src: &[T]) -> Result<(), BufferError> {
        let n = byte_len::<T>(src.len()).ok_or(BufferError::LengthOverflow)?;
        let end = self.prepare_write(n)?;
        let (endian, hlswap, pos) = (self.endian, self.hlswap, self.pos);
        encode_slice(src, endian, hlswap, &mut self.storage.as_mut()[pos..end]);
        self.finish_write(end);
        Ok(())
    }
}

macro_rules! sequential_accessors {
    ($($ty:ty => $take:ident, $take_into:ident, $put:ident, $put_slice:ident;)*) => {
        impl<S: Storage, P: CapacityPolicy<S>> Buffer<S, P> {
            $(
                #[doc = concat!("读取一个 `", stringify!($ty), "` 并推进游标；可读字节不足时 panic。")]
                #[track_caller]
                pub fn $take(&mut self) -> $ty {
                    contract(stringify!($take), self.try_take::<$ty>())
                }

                #[doc = concat!("按 `dst` 长度读取 `", stringify!($ty), "` 数组并推进游标；可读字节不足时 panic。")]
                #[track_caller]
                pub fn $take_into(&mut self, dst: &mut [$ty]) {
                    contract(stringify!($take_into), self.try_take_into(dst))
                }

                #[doc = concat!("写入一个 `", stringify!($ty), "` 并推进游标；定长缓冲容量不足时 panic。")]
                #[track_caller]
                pub fn $put(&mut self, value: $ty) {
                    contract(stringify!($put), self.try_put(value))
                }

                #[doc = concat!("写入 `", stringify!($ty), "` 数组并推进游标；定长缓冲容量不足时 panic。")]
                #[track_caller]
                pub fn $put_slice(&mut self, src: &[$ty]) {
                    contract(stringify!($put_slice), self.try_put_slice(src))
                }
            )*
        }
    };
}

sequential_accessors! {
    u8 => take_u8, take_u8_into, put_u8, put_u8_slice;
    u16 => take_u16, take_u16_into, put_u16, put_u16_slice;
    u32 => take_u32, take_u32_into, put_u32, put_u32_slice;
    u64 => take_u64, take_u64_into, put_u64, put_u64_slice;
}

#[cfg(test)]
mod tests {
    use crate::{BufferError, Endian, FixedBuffer, GrowableBuffer};

    #[test]
    fn put_then_take_each_width() {
        let mut buf = FixedBuffer::with_capacity(15);
        buf.put_u8(0x12);
        buf.put_u16(0x3456);
        buf.put_u32(0x789A_BCDE);
        buf.put_u64(0x0123_4567_89AB_CDEF);
        assert_eq!((buf.pos(), buf.len()), (15, 15));
        assert!(buf.is_full());

        buf.rewind();
        assert_eq!(buf.take_u8(), 0x12);
        assert_eq!(buf.take_u16(), 0x3456);
        assert_eq!(buf.take_u32(), 0x789A_BCDE);
        assert_eq!(buf.take_u64(), 0x0123_4567_89AB_CDEF);
        assert_eq!(buf.readable(), 0);
    }

    #[test]
    fn parses_existing_big_endian_bytes() {
        let mut buf = FixedBuffer::from_vec(vec![0x12, 0x34, 0x56, 0x78, 0xAB, 0xCD, 0xEF, 0x01]);
        assert_eq!(buf.take_u16(), 0x1234);
        assert_eq!(buf.take_u32(), 0x5678_ABCD);
        assert_eq!(buf.readable(), 2);
    }

    #[test]
    fn little_endian_arrays() {
        let mut buf = FixedBuffer::with_capacity(32);
        buf.set_endian(Endian::Little);
        buf.put_u16_slice(&[0x0102, 0x0304]);
        buf.put_u32_slice(&[0x0506_0708]);
        buf.put_u64_slice(&[0x090A_0B0C_0D0E_0F10]);
        assert_eq!(
            buf.as_bytes(),
            &[
                0x02, 0x01, 0x04, 0x03, 0x08, 0x07, 0x06, 0x05, 0x10, 0x0F, 0x0E, 0x0D, 0x0C, 0x0B,
                0x0A, 0x09
            ]
        );

        buf.rewind();
        let mut words = [0u16; 2];
        let mut dwords = [0u32; 1];
        let mut qwords = [0u64; 1];
        buf.take_u16_into(&mut words);
        buf.take_u32_into(&mut dwords);
        buf.take_u64_into(&mut qwords);
        assert_eq!(words, [0x0102, 0x0304]);
        assert_eq!(dwords, [0x0506_0708]);
        assert_eq!(qwords, [0x090A_0B0C_0D0E_0F10]);
    }

    #[test]
    fn byte_arrays_copy_verbatim() {
        let mut buf = GrowableBuffer::new();
        buf.put_u8_slice(b"spark");
        buf.rewind();
        let mut out = [0u8; 5];
        buf.take_u8_into(&mut out);
        assert_eq!(&out, b"spark");
    }

    #[test]
    fn short_take_fails_without_moving() {
        let mut buf = FixedBuffer::from_vec(vec![1, 2, 3]);
        buf.skip(1);
        assert_eq!(
            buf.try_take::<u32>(),
            Err(BufferError::InsufficientReadable {
                requested: 4,
                readable: 2
            })
        );
        let mut dst = [0u8; 3];
        assert!(buf.try_take_into(&mut dst).is_err());
        assert_eq!(dst, [0, 0, 0], "失败的数组读取不应写入目标");
        assert_eq!(buf.pos(), 1);
    }

    #[test]
    #[should_panic(expected = "take_u16")]
    fn take_panics_on_short_read() {
        let mut buf = FixedBuffer::from_vec(vec![1]);
        buf.take_u16();
    }

    #[test]
    fn fixed_put_overflow_leaves_state_untouched() {
        let mut buf = FixedBuffer::with_capacity(6);
        buf.put_u32(0xDEAD_BEEF);
        assert_eq!(
            buf.try_put_slice(&[1u16, 2]),
            Err(BufferError::CapacityExceeded {
                required: 8,
                capacity: 6
            })
        );
        assert_eq!((buf.pos(), buf.len()), (4, 4));
        assert_eq!(buf.data()[4..], [0, 0], "失败的数组写入不得部分落盘");
    }

    #[test]
    fn put_behind_len_does_not_shrink() {
        let mut buf = FixedBuffer::with_capacity(8);
        buf.put_u64(u64::MAX);
        buf.rewind();
        buf.put_u16(0);
        assert_eq!((buf.pos(), buf.len()), (2, 8));
        assert_eq!(buf.as_bytes(), &[0, 0, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn growable_put_from_zero_capacity() {
        let mut buf = GrowableBuffer::with_capacity(0);
        buf.put_u8(0xFF);
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.capacity(), 64);
        buf.put_u8_slice(&[0u8; 100]);
        assert_eq!(buf.len(), 101);
        assert_eq!(buf.capacity(), 128);
    }

    #[test]
    fn empty_arrays_are_noops() {
        let mut buf = FixedBuffer::with_capacity(0);
        buf.put_u32_slice(&[]);
        buf.take_u64_into(&mut []);
        assert_eq!((buf.pos(), buf.len()), (0, 0));
    }
}
