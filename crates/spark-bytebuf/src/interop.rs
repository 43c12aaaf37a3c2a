//! 与 `bytes` 生态的互操作。
//!
//! # 设计背景（Why）
//! - 上层编解码器普遍以 `bytes::Buf`/`bytes::BufMut` 作为输入输出抽象；
//!   让 [`Buffer`] 直接实现这两个 trait，即可把它交给现有的帧解析或序列化代码而无需拷贝。
//!
//! # 契约说明（What）
//! - `Buf` 视角：`remaining` 为可读字节，`chunk` 为 `[pos, len)`，`advance` 越过可读区域时 panic；
//! - `BufMut` 视角：`chunk_mut` 为 `[pos, capacity)`，可增长缓冲在可写区域为空时先扩容；
//!   `advance_mut` 与 [`Buffer::commit`] 语义一致，越过可写区域时 panic；
//! - 注意 `Buf::get_u32` 等方法固定按大端解析，不读取缓冲自身的字节序设置。

use alloc::vec::Vec;

use bytes::{Buf, BufMut, Bytes, buf::UninitSlice};

use crate::{
    buffer::Buffer,
    error::{BufferError, contract},
    policy::{CapacityPolicy, Storage},
};

impl<S: Storage, P: CapacityPolicy<S>> Buf for Buffer<S, P> {
    fn remaining(&self) -> usize {
        self.readable()
    }

    fn chunk(&self) -> &[u8] {
        self.readable_bytes()
    }

    #[track_caller]
    fn advance(&mut self, cnt: usize) {
        let end = contract("advance", self.prepare_read(cnt));
        self.pos = end;
    }
}

// SAFETY: `chunk_mut` 返回的区域来自已初始化的存储 `[pos, capacity)`；
// `advance_mut` 拒绝超过该区域长度的推进，因此不会把未写入的内存暴露为有效数据。
#[allow(unsafe_code)]
unsafe impl<S: Storage, P: CapacityPolicy<S>> BufMut for Buffer<S, P> {
    fn remaining_mut(&self) -> usize {
        P::remaining_mut(self.capacity(), self.pos)
    }

    #[track_caller]
    unsafe fn advance_mut(&mut self, cnt: usize) {
        let writable = self.writable();
        if cnt > writable {
            contract::<()>(
                "advance_mut",
                Err(BufferError::CapacityExceeded {
                    required: self.pos.saturating_add(cnt),
                    capacity: self.capacity(),
                }),
            );
        }
        self.commit(cnt);
    }

    fn chunk_mut(&mut self) -> &mut UninitSlice {
        if self.writable() == 0 {
            match P::ensure_writable(&mut self.storage, self.pos.saturating_add(1)) {
                Ok(()) => {}
                // 定长缓冲已满：返回空切片，与 remaining_mut() == 0 一致。
                Err(_) => return UninitSlice::new(&mut []),
            }
        }
        UninitSlice::new(self.writable_bytes_mut())
    }
}

impl<P: CapacityPolicy<Vec<u8>>> From<Buffer<Vec<u8>, P>> for Bytes {
    /// 冻结有效数据 `[0, len)`，不拷贝。
    fn from(buffer: Buffer<Vec<u8>, P>) -> Self {
        Bytes::from(buffer.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use bytes::{Buf, BufMut, Bytes};

    use crate::{Endian, FixedBuffer, GrowableBuffer};

    #[test]
    fn buf_reads_follow_cursor() {
        let mut buf = FixedBuffer::from_vec(vec![0x00, 0x01, 0xAA, 0xBB, 0xCC]);
        assert_eq!(Buf::remaining(&buf), 5);
        assert_eq!(buf.get_u16(), 1);
        assert_eq!(buf.pos(), 2);
        assert_eq!(buf.chunk(), &[0xAA, 0xBB, 0xCC]);
        Buf::advance(&mut buf, 3);
        assert!(!buf.has_remaining());
    }

    #[test]
    #[should_panic(expected = "advance")]
    fn buf_advance_past_readable_panics() {
        let mut buf = FixedBuffer::from_vec(vec![1, 2]);
        Buf::advance(&mut buf, 3);
    }

    #[test]
    fn buf_mut_writes_extend_length() {
        let mut buf = FixedBuffer::with_capacity(6);
        BufMut::put_slice(&mut buf, b"abc");
        buf.put_bytes(b'-', 2);
        assert_eq!(buf.as_bytes(), b"abc--");
        assert_eq!(buf.remaining_mut(), 1);
    }

    #[test]
    fn growable_buf_mut_grows_on_demand() {
        let mut buf = GrowableBuffer::new();
        assert_eq!(buf.capacity(), 0);
        BufMut::put_slice(&mut buf, &[7u8; 100]);
        assert_eq!(buf.len(), 100);
        assert!(buf.capacity() >= 100);
    }

    #[test]
    fn fixed_chunk_mut_is_empty_when_full() {
        let mut buf = FixedBuffer::with_capacity(2);
        buf.put_u16(0xFFFF);
        assert_eq!(buf.remaining_mut(), 0);
        assert_eq!(buf.chunk_mut().len(), 0);
        assert_eq!(buf.capacity(), 2, "定长缓冲不因 chunk_mut 扩容");
    }

    #[test]
    fn growable_chunk_mut_grows_when_full() {
        let mut buf = GrowableBuffer::with_capacity(2);
        buf.put_u16(0xFFFF);
        assert_eq!(buf.chunk_mut().len(), 2, "翻倍到 4 字节后暴露新增的 2 字节");
        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn inherent_put_uses_configured_endian() {
        let mut buf = GrowableBuffer::new();
        buf.set_endian(Endian::Little);
        buf.put_u16(0x0102);
        BufMut::put_u16(&mut buf, 0x0102);
        assert_eq!(buf.as_bytes(), &[0x02, 0x01, 0x01, 0x02], "BufMut 的 put_u16 固定为大端");
    }

    #[test]
    fn freeze_into_bytes() {
        let mut buf = GrowableBuffer::with_capacity(16);
        buf.put_u32(0xDEAD_BEEF);
        let frozen = Bytes::from(buf);
        assert_eq!(&frozen[..], &[0xDE, 0xAD, 0xBE, 0xEF]);
    }
}
