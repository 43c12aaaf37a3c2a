#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

//! `spark-bytebuf` 提供面向二进制协议编解码的字节缓冲原语。
//!
//! # 模块定位（Why）
//! - 协议栈的帧解析与报文构建都需要“按位置读写定宽整数”的能力：顺序读取报文头、
//!   回填长度字段、在不推进游标的前提下窥视后续字节；
//! - 工业与遗留协议常见非标准字序（32/64 位数值的高低半字交换），需要与字节序正交地配置。
//!
//! # 设计概要（How）
//! - [`Buffer`] 以类型参数携带存储与容量策略：[`Fixed`] 越界写入即失败，[`Growable`] 按翻倍策略扩容；
//! - 读写族按功能拆分：`sequential`（Take/Put）、`random`（Peek/Overwrite）、`stream`（Read/Write/Fill）；
//! - 启用 `std` 时实现 `std::io::{Read, BufRead, Write, Seek}`，并始终实现 `bytes::{Buf, BufMut}`。
//!
//! # 快速上手
//!
//! ```
//! use spark_bytebuf::{Endian, FixedBuffer, GrowableBuffer};
//!
//! let mut frame = GrowableBuffer::new();
//! frame.put_u16(0);
//! frame.put_u8_slice(b"hello");
//! let body = (frame.len() - 2) as u16;
//! frame.overwrite_u16(0, body);
//! assert_eq!(frame.as_bytes(), b"\x00\x05hello");
//!
//! let mut parser = FixedBuffer::from_vec(frame.into_vec());
//! parser.set_endian(Endian::Big);
//! assert_eq!(parser.take_u16(), 5);
//! assert_eq!(parser.readable(), 5);
//! ```

// 缓冲始终依赖堆分配：`no_std` 下同样要求目标提供全局分配器。
extern crate alloc;

mod buffer;
mod endian;
mod error;
mod hlswap;
mod interop;
mod options;
mod policy;
mod random;
mod sequential;
mod stream;
mod word;

pub use buffer::{Buffer, BufferView, FixedBuffer, GrowableBuffer};
pub use endian::Endian;
pub use error::{BufferError, ErrorClass};
pub use hlswap::{hl_swap32, hl_swap64};
pub use options::BufferOptions;
pub use policy::{CapacityPolicy, Fixed, Growable, GrowableStorage, MIN_GROWTH, Storage};
pub use word::Word;
