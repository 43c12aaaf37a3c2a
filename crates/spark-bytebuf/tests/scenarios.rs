//! `scenarios` 集成测试：以典型协议场景验收缓冲的公开行为。
//!
//! # 测试总览（Why）
//! - 覆盖字节序、高低交换、定长/可增长策略差异、零拷贝子视图与游标越界等端到端路径；
//! - 每个用例只依赖公开 API，等价于下游协议实现的调用方式。

use std::io::{Seek, SeekFrom};

use spark_bytebuf::{BufferError, Endian, FixedBuffer, GrowableBuffer};

/// 同一数值在大端与小端下的编码结果互为逆序。
#[test]
fn put_u32_honours_endianness() {
    let mut big = FixedBuffer::with_capacity(10);
    big.put_u32(0x1234_5678);
    assert_eq!(big.as_bytes(), &[0x12, 0x34, 0x56, 0x78]);

    let mut little = FixedBuffer::with_capacity(10);
    little.set_endian(Endian::Little);
    little.put_u32(0x1234_5678);
    assert_eq!(little.as_bytes(), &[0x78, 0x56, 0x34, 0x12]);
}

/// 高低交换先作用于数值，再按字节序落盘；读取时逆向还原。
#[test]
fn hlswap_encodes_and_restores() {
    let mut buf = FixedBuffer::with_capacity(10);
    buf.set_hlswap(true);
    buf.put_u32(0xAABB_CCDD);
    assert_eq!(buf.as_bytes(), &[0xBB, 0xAA, 0xDD, 0xCC]);
    buf.rewind();
    assert_eq!(buf.take_u32(), 0xAABB_CCDD);
}

/// 定长缓冲在游标 9 处写入 `u16` 是契约违例，可增长缓冲则透明扩容。
#[test]
fn fixed_fails_where_growable_grows() {
    let mut fixed = FixedBuffer::from_vec(vec![0; 10]);
    fixed.seek(9).expect("9 位于有效范围内");
    assert_eq!(
        fixed.try_put(0xBEEFu16),
        Err(BufferError::CapacityExceeded {
            required: 11,
            capacity: 10
        })
    );
    assert_eq!((fixed.pos(), fixed.len()), (9, 10));

    let mut growable = GrowableBuffer::from_vec(vec![0; 10]);
    growable.seek(9).expect("9 位于有效范围内");
    growable.put_u16(0xBEEF);
    assert!(growable.capacity() >= 11);
    assert_eq!(growable.len(), 11);
    assert_eq!(&growable.as_bytes()[9..], &[0xBE, 0xEF]);
}

#[test]
#[should_panic(expected = "put_u16")]
fn fixed_put_past_capacity_panics() {
    let mut fixed = FixedBuffer::from_vec(vec![0; 10]);
    fixed.seek(9).expect("9 位于有效范围内");
    fixed.put_u16(0xBEEF);
}

/// 子视图与父缓冲共享存储，经视图的写入对父缓冲可见。
#[test]
fn since_view_shares_storage() {
    let mut parent = FixedBuffer::from_vec((0..10).collect());
    {
        let mut view = parent.since(Some(2), Some(6));
        assert_eq!(view.as_bytes(), &[2, 3, 4, 5]);
        view.put_u8(0xFF);
        assert_eq!(
            view.try_put_slice(&[0u8; 4]),
            Err(BufferError::CapacityExceeded {
                required: 5,
                capacity: 4
            }),
            "视图不能越过区间末尾"
        );
    }
    assert_eq!(parent.as_bytes()[2], 0xFF);
    assert_eq!(parent.len(), 10);
}

/// 越界 seek 返回可恢复错误且游标不动。
#[test]
fn seek_out_of_range_is_recoverable() {
    let mut buf = FixedBuffer::from_vec(vec![0; 4]);
    buf.seek(2).expect("2 位于有效范围内");

    let err = buf.seek(5).unwrap_err();
    assert!(err.is_recoverable());
    assert_eq!(buf.pos(), 2);

    let err = Seek::seek(&mut buf, SeekFrom::Start(0))
        .and_then(|_| Seek::seek(&mut buf, SeekFrom::Current(-1)))
        .unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    assert_eq!(buf.pos(), 0, "负位置被拒绝，游标停留在先前位置");
}

/// 构建带长度前缀的报文，再以解析模式读回。
#[test]
fn length_prefixed_frame_round_trip() {
    let mut frame = GrowableBuffer::new();
    frame.put_u8(0x01);
    frame.put_u16(0);
    frame.put_u32_slice(&[10, 20, 30]);
    let body = (frame.len() - 3) as u16;
    frame.overwrite_u16(1, body);

    let mut parser = FixedBuffer::from_vec(frame.into_vec());
    assert_eq!(parser.take_u8(), 0x01);
    let body = usize::from(parser.take_u16());
    assert_eq!(body, 12);
    let mut view = parser.since(None, Some(3 + body));
    let mut values = [0u32; 3];
    view.take_u32_into(&mut values);
    assert_eq!(values, [10, 20, 30]);
}
