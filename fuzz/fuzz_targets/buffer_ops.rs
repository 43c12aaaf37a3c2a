#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use spark_bytebuf::{Buffer, BufferError, CapacityPolicy, Endian, FixedBuffer, GrowableBuffer};

/// Fuzz 输入：初始容量与一段任意操作序列。
///
/// - **Why**：游标、有效长度与容量三者之间的约束散布在所有操作族中，单元测试难以穷举交错顺序；
/// - **How**：同一组指令分别作用于定长与可增长缓冲，每步之后校验 `pos <= len <= capacity`，
///   并检查失败的 `try_*` 调用不改变缓冲状态；
/// - **What**：任何 panic 或断言失败都代表缓冲原语存在缺陷。
#[derive(Debug, Arbitrary)]
struct BufferCase {
    capacity: u8,
    ops: Vec<BufferOp>,
}

/// 定宽整数的宽度选择。
#[derive(Debug, Arbitrary, Clone, Copy)]
enum Width {
    W8,
    W16,
    W32,
    W64,
}

/// 单步缓冲操作。
#[derive(Debug, Arbitrary)]
enum BufferOp {
    /// `try_put` 定宽整数；成功时立即以 `try_peek` 回读校验。
    Put { width: Width, value: u64 },
    /// `try_take` 定宽整数；失败时状态不变。
    Take { width: Width },
    /// 相对游标窥视，永不移动游标。
    Peek { width: Width, offset: i16 },
    /// 绝对偏移覆写，永不改变游标与长度。
    Overwrite { width: Width, offset: u16, value: u64 },
    /// 批量写入；定长缓冲只可能短写。
    Write { data: Vec<u8> },
    /// 读取至多 `len` 字节。
    Read { len: u8 },
    /// 填充 `count` 个相同字节。
    Fill { byte: u8, count: u8 },
    /// 前进，前进量截断到可读区域。
    Skip { n: u16 },
    /// 提交原始写入，前进量截断到可写区域。
    Commit { n: u16 },
    /// 从起点定位游标。
    Seek { offset: u16 },
    /// 从末尾定位游标。
    Reseek { offset: u16 },
    /// 把可读区域搬移到起点。
    Compact,
    /// 游标归零。
    Rewind,
    /// 游标与长度归零。
    Clear,
    /// 创建子视图并经视图写入，父缓冲的游标与长度不变。
    Since { start: u16, end: u16 },
    /// 切换字节序。
    SetEndian { little: bool },
    /// 开关高低交换。
    SetHlswap { enable: bool },
}

fuzz_target!(|case: BufferCase| {
    let mut fixed = FixedBuffer::with_capacity(usize::from(case.capacity));
    let mut growable = GrowableBuffer::with_capacity(usize::from(case.capacity));
    for op in &case.ops {
        apply(&mut fixed, op);
        apply(&mut growable, op);
    }
});

fn apply<P: CapacityPolicy<Vec<u8>>>(buf: &mut Buffer<Vec<u8>, P>, op: &BufferOp) {
    let before = (buf.pos(), buf.len(), buf.capacity());
    match *op {
        BufferOp::Put { width, value } => {
            let result = match width {
                Width::W8 => buf.try_put(value as u8),
                Width::W16 => buf.try_put(value as u16),
                Width::W32 => buf.try_put(value as u32),
                Width::W64 => buf.try_put(value),
            };
            match result {
                Ok(()) => {
                    let back = match width {
                        Width::W8 => buf.try_peek::<u8>(-1).map(u64::from),
                        Width::W16 => buf.try_peek::<u16>(-2).map(u64::from),
                        Width::W32 => buf.try_peek::<u32>(-4).map(u64::from),
                        Width::W64 => buf.try_peek::<u64>(-8),
                    };
                    let mask = match width {
                        Width::W8 => 0xFF,
                        Width::W16 => 0xFFFF,
                        Width::W32 => 0xFFFF_FFFF,
                        Width::W64 => u64::MAX,
                    };
                    assert_eq!(back, Ok(value & mask));
                }
                Err(err) => {
                    assert!(matches!(err, BufferError::CapacityExceeded { .. }));
                    assert_unchanged(buf, before);
                }
            }
        }
        BufferOp::Take { width } => {
            let result = match width {
                Width::W8 => buf.try_take::<u8>().map(drop),
                Width::W16 => buf.try_take::<u16>().map(drop),
                Width::W32 => buf.try_take::<u32>().map(drop),
                Width::W64 => buf.try_take::<u64>().map(drop),
            };
            if result.is_err() {
                assert_unchanged(buf, before);
            }
        }
        BufferOp::Peek { width, offset } => {
            let offset = isize::from(offset);
            let _ = match width {
                Width::W8 => buf.try_peek::<u8>(offset).map(u64::from),
                Width::W16 => buf.try_peek::<u16>(offset).map(u64::from),
                Width::W32 => buf.try_peek::<u32>(offset).map(u64::from),
                Width::W64 => buf.try_peek::<u64>(offset),
            };
            assert_unchanged(buf, before);
        }
        BufferOp::Overwrite { width, offset, value } => {
            let offset = usize::from(offset);
            let _ = match width {
                Width::W8 => buf.try_overwrite(offset, value as u8),
                Width::W16 => buf.try_overwrite(offset, value as u16),
                Width::W32 => buf.try_overwrite(offset, value as u32),
                Width::W64 => buf.try_overwrite(offset, value),
            };
            assert_unchanged(buf, before);
        }
        BufferOp::Write { ref data } => match buf.write(data) {
            Ok(n) => assert_eq!(n, data.len()),
            Err(BufferError::ShortWrite { written, requested }) => {
                assert!(written < requested);
                assert_eq!(buf.pos(), buf.capacity());
            }
            Err(err) => panic!("unexpected write error: {err}"),
        },
        BufferOp::Read { len } => {
            let mut dst = vec![0u8; usize::from(len)];
            let _ = buf.read(&mut dst);
        }
        BufferOp::Fill { byte, count } => {
            let written = buf.fill(byte, usize::from(count));
            assert!(written <= usize::from(count));
        }
        BufferOp::Skip { n } => {
            let readable = buf.readable();
            assert_eq!(buf.skip(usize::from(n)), readable.min(usize::from(n)));
        }
        BufferOp::Commit { n } => {
            let writable = buf.writable();
            assert_eq!(buf.commit(usize::from(n)), writable.min(usize::from(n)));
        }
        BufferOp::Seek { offset } => {
            if buf.seek(usize::from(offset)).is_err() {
                assert_unchanged(buf, before);
            }
        }
        BufferOp::Reseek { offset } => {
            if buf.reseek(usize::from(offset)).is_err() {
                assert_unchanged(buf, before);
            }
        }
        BufferOp::Compact => {
            let readable = buf.readable_bytes().to_vec();
            buf.compact();
            assert_eq!(buf.pos(), 0);
            assert_eq!(buf.as_bytes(), &readable[..]);
        }
        BufferOp::Rewind => buf.rewind(),
        BufferOp::Clear => buf.clear(),
        BufferOp::Since { start, end } => {
            if let Ok(mut view) = buf.try_since(Some(usize::from(start)), Some(usize::from(end))) {
                assert_eq!(view.capacity(), view.len());
                let _ = view.try_put(0u16);
            }
            assert_unchanged(buf, before);
        }
        BufferOp::SetEndian { little } => {
            buf.set_endian(if little { Endian::Little } else { Endian::Big });
        }
        BufferOp::SetHlswap { enable } => buf.set_hlswap(enable),
    }

    assert!(buf.pos() <= buf.len(), "pos 越过 len: {buf:?}");
    assert!(buf.len() <= buf.capacity(), "len 越过 capacity: {buf:?}");
    assert!(buf.capacity() >= before.2, "容量不得缩小");
}

fn assert_unchanged<P: CapacityPolicy<Vec<u8>>>(
    buf: &Buffer<Vec<u8>, P>,
    before: (usize, usize, usize),
) {
    assert_eq!((buf.pos(), buf.len(), buf.capacity()), before);
}
