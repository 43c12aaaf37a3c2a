//! 字节流适配：`read`/`write`/`fill`/`peek_into` 以及 `std::io` 互操作。
//!
//! # 设计背景（Why）
//! - 上层常把缓冲当作字节流的源或汇（例如把 socket 读到的数据灌入缓冲，或把编码结果写给下游）；
//! - 与标量 Put 不同，批量写入在定长缓冲上采用“尽量写、如实报告”的流语义：
//!   `write` 截断并返回 [`BufferError::ShortWrite`]，`fill` 静默截断并返回实际写入量，
//!   而 `put_*` 在同样情况下属于契约违例。两种语义刻意保持不一致。
//!
//! # 契约说明（What）
//! - `read`：复制 `min(dst.len(), readable)` 字节并推进游标；无可读数据且 `dst` 非空时返回
//!   [`BufferError::EndOfData`]（可恢复）；
//! - `write`：定长缓冲复制可写部分，推进游标并扩展有效长度；可增长缓冲总是完整写入；
//! - `fill`：在游标处写入 `count` 个相同字节，定长缓冲截断到可写区域；
//! - `std::io::Read` 以 `Ok(0)` 表示读尽，`std::io::Write` 以 `Ok(n)` 报告短写，
//!   `std::io::Seek` 越界（含负位置）时返回 `InvalidInput` 且不移动游标。

use crate::{
    buffer::Buffer,
    error::{BufferError, contract},
    policy::{CapacityPolicy, Storage},
};

impl<S: Storage, P: CapacityPolicy<S>> Buffer<S, P> {
    /// 从游标处读取到 `dst`，返回实际字节数。
    pub fn read(&mut self, dst: &mut [u8]) -> Result<usize, BufferError> {
        if dst.is_empty() {
            return Ok(0);
        }
        if self.readable() == 0 {
            return Err(BufferError::EndOfData);
        }
        Ok(self.read_available(dst))
    }

    /// 把可读数据复制到 `dst` 但不推进游标，返回复制的字节数。
    pub fn peek_into(&self, dst: &mut [u8]) -> usize {
        let n = dst.len().min(self.readable());
        dst[..n].copy_from_slice(&self.storage.as_ref()[self.pos..self.pos + n]);
        n
    }

    /// 在游标处写入 `src`。
    ///
    /// 定长缓冲空间不足时写入能容纳的前缀，并返回 [`BufferError::ShortWrite`]，
    /// 此时游标与有效长度已经反映这部分写入。
    pub fn write(&mut self, src: &[u8]) -> Result<usize, BufferError> {
        let written = self.write_admitted(src)?;
        if written < src.len() {
            return Err(BufferError::ShortWrite {
                written,
                requested: src.len(),
            });
        }
        Ok(written)
    }

    /// 在游标处写入 `count` 个 `byte`，返回实际写入量。
    ///
    /// 定长缓冲截断到可写区域，不报错；可增长缓冲按需扩容。
    #[track_caller]
    pub fn fill(&mut self, byte: u8, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        let end = contract(
            "fill",
            self.pos.checked_add(count).ok_or(BufferError::LengthOverflow),
        );
        let pos = self.pos;
        let granted = P::admit(&mut self.storage, pos, end);
        self.storage.as_mut()[pos..granted].fill(byte);
        self.finish_write(granted);
        granted - pos
    }

    fn read_available(&mut self, dst: &mut [u8]) -> usize {
        let n = self.peek_into(dst);
        self.pos += n;
        n
    }

    fn write_admitted(&mut self, src: &[u8]) -> Result<usize, BufferError> {
        if src.is_empty() {
            return Ok(0);
        }
        let pos = self.pos;
        let end = pos
            .checked_add(src.len())
            .ok_or(BufferError::LengthOverflow)?;
        let granted = P::admit(&mut self.storage, pos, end);
        let n = granted - pos;
        self.storage.as_mut()[pos..granted].copy_from_slice(&src[..n]);
        self.finish_write(granted);
        Ok(n)
    }
}

#[cfg(feature = "std")]
mod io_impls {
    use std::io::{self, BufRead, Read, Seek, SeekFrom, Write};

    use super::*;

    impl<S: Storage, P: CapacityPolicy<S>> Read for Buffer<S, P> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            Ok(self.read_available(buf))
        }
    }

    impl<S: Storage, P: CapacityPolicy<S>> BufRead for Buffer<S, P> {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            Ok(self.readable_bytes())
        }

        fn consume(&mut self, amt: usize) {
            self.skip(amt);
        }
    }

    impl<S: Storage, P: CapacityPolicy<S>> Write for Buffer<S, P> {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.write_admitted(buf).map_err(io::Error::from)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<S: Storage, P: CapacityPolicy<S>> Seek for Buffer<S, P> {
        fn seek(&mut self, target: SeekFrom) -> io::Result<u64> {
            let (base, delta) = match target {
                SeekFrom::Start(offset) => (0, offset_to_isize(offset)?),
                SeekFrom::End(delta) => (self.len, delta_to_isize(delta)?),
                SeekFrom::Current(delta) => (self.pos, delta_to_isize(delta)?),
            };
            let offset = base.checked_add_signed(delta).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "seek to a negative or overflowing position",
                )
            })?;
            if offset > self.len {
                tracing::debug!(offset, len = self.len, "io seek rejected");
                return Err(BufferError::SeekOutOfRange {
                    offset,
                    len: self.len,
                }
                .into());
            }
            self.pos = offset;
            Ok(offset as u64)
        }

        fn stream_position(&mut self) -> io::Result<u64> {
            Ok(self.pos as u64)
        }
    }

    fn offset_to_isize(offset: u64) -> io::Result<isize> {
        isize::try_from(offset)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "seek offset overflows isize"))
    }

    fn delta_to_isize(delta: i64) -> io::Result<isize> {
        isize::try_from(delta)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "seek delta overflows isize"))
    }
}
