//! 缓冲的区域模型、游标控制与零拷贝子视图。
//!
//! # 区域划分（What）
//!
//! ```text
//!  0                 pos                  len                 capacity
//!  |---- 已处理 ------|------ 可读 --------|------ 可追加 -------|
//!                    |<------------------ 可写 ---------------->|
//! ```
//!
//! - `readable = len - pos`：顺序读取（Take）可消费的字节；
//! - `writable = capacity - pos`：从游标起可直接写入的字节；
//! - `appendable = capacity - len`：有效数据之后的预留空间；
//! - 每个公开方法返回后都满足 `0 <= pos <= len <= capacity`。
//!
//! # 设计要点（How）
//! - 存储 `S` 的整段长度即容量，超出 `len` 的部分始终已初始化（分配时以 0 填充），
//!   因此原始句柄 [`Buffer::writable_bytes_mut`] 是普通的 `&mut [u8]`；
//! - [`Buffer::since`] 产出的 [`BufferView`] 独占借用父缓冲，父子共享同一段存储，
//!   视图存活期间父缓冲不可访问，从而在编译期排除别名写入。

use alloc::{vec, vec::Vec};
use core::{fmt, marker::PhantomData};

use crate::{
    endian::Endian,
    error::{BufferError, contract},
    options::BufferOptions,
    policy::{self, CapacityPolicy, Fixed, Growable, GrowableStorage, Storage},
};

/// 面向二进制协议编解码的字节缓冲。
///
/// # 教案式说明
/// - **意图 (Why)**：协议实现需要精确控制每个字节的布局：按位置顺序读写定宽整数、回填长度字段、
///   在不推进游标的前提下窥视报文头，同时还要在“定长报文槽”与“自动扩容构建器”之间切换。
/// - **结构 (How)**：
///   - `S`：底层存储，整段长度即容量；`Vec<u8>`/`BytesMut` 可扩容，`&mut [u8]` 为借用的定长区域；
///   - `P`：容量策略，[`Fixed`] 在越界写入时失败，[`Growable`] 透明扩容；
///   - `endian`/`hlswap`：每个实例独立的编解码设置，随时可改，只影响之后的操作。
/// - **契约 (What)**：
///   - 具名读写接口（`take_u32`、`put_u16` 等）在契约违例时 panic，对应的 `try_*` 接口返回
///     [`BufferError`]，失败时缓冲状态不变；
///   - 非线程安全；跨线程共享需外部同步。
pub struct Buffer<S = Vec<u8>, P = Growable> {
    pub(crate) storage: S,
    pub(crate) len: usize,
    pub(crate) pos: usize,
    pub(crate) endian: Endian,
    pub(crate) hlswap: bool,
    policy: PhantomData<P>,
}

/// 自有存储、容量固定的缓冲。
pub type FixedBuffer = Buffer<Vec<u8>, Fixed>;

/// 自有存储、按需翻倍扩容的缓冲。
pub type GrowableBuffer = Buffer<Vec<u8>, Growable>;

/// 借用父缓冲一段区间的零拷贝视图，容量固定为区间长度。
pub type BufferView<'a> = Buffer<&'a mut [u8], Fixed>;

impl Buffer {
    /// 创建零容量的可增长缓冲，首次写入时分配。
    pub fn new() -> Self {
        Self::with_capacity(0)
    }
}

impl<P: CapacityPolicy<Vec<u8>>> Default for Buffer<Vec<u8>, P> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<P: CapacityPolicy<Vec<u8>>> Buffer<Vec<u8>, P> {
    /// 构建模式：分配 `capacity` 字节，有效长度为 0。
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_raw(vec![0; capacity], 0)
    }

    /// 解析模式：接管 `data`，保留其长度与容量，游标归零。
    ///
    /// `data.len()` 成为有效长度，`data.capacity()` 成为缓冲容量。
    pub fn from_vec(mut data: Vec<u8>) -> Self {
        let len = data.len();
        let capacity = data.capacity();
        data.resize(capacity, 0);
        Self::from_raw(data, len)
    }

    /// 取回有效数据 `[0, len)`。
    pub fn into_vec(self) -> Vec<u8> {
        let mut data = self.storage;
        data.truncate(self.len);
        data
    }
}

impl<S: Storage, P: CapacityPolicy<S>> Buffer<S, P> {
    /// 解析模式：整段存储都视为有效数据，游标归零。
    ///
    /// 以 `&mut [u8]` 构造时，经由缓冲的修改在借用结束后对原切片可见。
    pub fn from_storage(storage: S) -> Self {
        let len = storage.as_ref().len();
        Self::from_raw(storage, len)
    }

    /// 以显式有效长度包装存储；`len` 超过容量时返回 [`BufferError::InvalidLength`]。
    pub fn from_parts(storage: S, len: usize) -> Result<Self, BufferError> {
        let capacity = storage.as_ref().len();
        if len > capacity {
            return Err(BufferError::InvalidLength { len, capacity });
        }
        Ok(Self::from_raw(storage, len))
    }

    pub(crate) fn from_raw(storage: S, len: usize) -> Self {
        Self {
            storage,
            len,
            pos: 0,
            endian: Endian::Big,
            hlswap: false,
            policy: PhantomData,
        }
    }

    /// 以构建器风格应用编解码设置。
    pub fn with_options(mut self, options: BufferOptions) -> Self {
        self.apply_options(options);
        self
    }

    /// 消耗缓冲并返回底层存储（完整容量）。
    pub fn into_inner(self) -> S {
        self.storage
    }

    /// 总容量。
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.as_ref().len()
    }

    /// 有效数据长度。
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// 当前游标。
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// `len - pos`。
    #[inline]
    pub fn readable(&self) -> usize {
        self.len - self.pos
    }

    /// `capacity - pos`。
    #[inline]
    pub fn writable(&self) -> usize {
        self.capacity() - self.pos
    }

    /// `capacity - len`。
    #[inline]
    pub fn appendable(&self) -> usize {
        self.capacity() - self.len
    }

    /// 有效数据为空。
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 有效数据占满容量。
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// 整段存储 `[0, capacity)`。
    pub fn data(&self) -> &[u8] {
        self.storage.as_ref()
    }

    /// 有效数据 `[0, len)`。
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage.as_ref()[..self.len]
    }

    /// 有效数据 `[0, len)` 的可变视图。
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        let len = self.len;
        &mut self.storage.as_mut()[..len]
    }

    /// 可读数据 `[pos, len)`。
    pub fn readable_bytes(&self) -> &[u8] {
        &self.storage.as_ref()[self.pos..self.len]
    }

    /// 可写区域 `[pos, capacity)` 的原始句柄。
    ///
    /// 写入后需调用 [`commit`](Self::commit) 推进游标并使字节可见；
    /// 任何可能扩容的操作之后都必须重新获取该句柄。
    pub fn writable_bytes_mut(&mut self) -> &mut [u8] {
        let pos = self.pos;
        &mut self.storage.as_mut()[pos..]
    }

    /// 设置字节序，对之后的编解码生效。
    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    /// 当前字节序。
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// 开关 32/64 位数值的高低字节交换。
    pub fn set_hlswap(&mut self, enable: bool) {
        self.hlswap = enable;
    }

    /// 高低交换是否开启。
    pub fn hlswap(&self) -> bool {
        self.hlswap
    }

    /// 当前编解码设置。
    pub fn options(&self) -> BufferOptions {
        BufferOptions {
            endian: self.endian,
            hlswap: self.hlswap,
        }
    }

    /// 一次性应用编解码设置。
    pub fn apply_options(&mut self, options: BufferOptions) {
        self.endian = options.endian;
        self.hlswap = options.hlswap;
    }

    /// 游标归零。
    pub fn rewind(&mut self) {
        self.pos = 0;
    }

    /// 游标与有效长度归零，容量保留。
    pub fn clear(&mut self) {
        self.pos = 0;
        self.len = 0;
    }

    /// 将游标移动到距起点 `offset` 处。
    ///
    /// `offset` 不在 `[0, len]` 内时返回 [`BufferError::SeekOutOfRange`]，游标保持不变。
    pub fn seek(&mut self, offset: usize) -> Result<(), BufferError> {
        if offset > self.len {
            tracing::debug!(offset, len = self.len, "seek rejected");
            return Err(BufferError::SeekOutOfRange {
                offset,
                len: self.len,
            });
        }
        self.pos = offset;
        Ok(())
    }

    /// 将游标移动到距末尾（`len`）`offset` 处，边界约束同 [`seek`](Self::seek)。
    pub fn reseek(&mut self, offset: usize) -> Result<(), BufferError> {
        if offset > self.len {
            tracing::debug!(offset, len = self.len, "reseek rejected");
            return Err(BufferError::SeekOutOfRange {
                offset,
                len: self.len,
            });
        }
        self.pos = self.len - offset;
        Ok(())
    }

    /// 前进至多 `n` 字节，截断到可读区域，返回实际前进量。不改变有效长度。
    pub fn skip(&mut self, n: usize) -> usize {
        let n = n.min(self.readable());
        self.pos += n;
        n
    }

    /// 前进至多 `n` 字节，截断到可写区域，并把有效长度扩展到新游标。
    ///
    /// 与 [`writable_bytes_mut`](Self::writable_bytes_mut) 配合，用于先写入预留空间、再宣告可见的场景。
    /// 从不扩容，返回实际前进量。
    pub fn commit(&mut self, n: usize) -> usize {
        let n = n.min(self.writable());
        self.pos += n;
        if self.pos > self.len {
            self.len = self.pos;
        }
        n
    }

    /// 把可读区域 `[pos, len)` 搬移到起点，游标归零，有效长度变为原可读长度。
    pub fn compact(&mut self) {
        if self.pos == 0 {
            return;
        }
        if self.pos == self.len {
            self.clear();
            return;
        }
        let readable = self.readable();
        self.storage.as_mut().copy_within(self.pos..self.len, 0);
        self.len = readable;
        self.pos = 0;
    }

    /// 创建覆盖 `[start, end)` 的零拷贝视图。
    ///
    /// - `start` 为 `None` 时取当前游标，`end` 为 `None` 时取有效长度；
    /// - 视图游标从 0 开始，有效长度与容量均为 `end - start`；
    /// - `end` 可以越过有效长度进入预留空间（该区域已以 0 初始化），视图内的写入不会改变父缓冲的 `len`；
    /// - 视图继承父缓冲的编解码设置，之后两者的设置互不影响；
    /// - 要求 `start <= end <= capacity`，否则返回 [`BufferError::InvalidRange`]。
    pub fn try_since(
        &mut self,
        start: Option<usize>,
        end: Option<usize>,
    ) -> Result<BufferView<'_>, BufferError> {
        let start = start.unwrap_or(self.pos);
        let end = end.unwrap_or(self.len);
        if start > end || end > self.capacity() {
            return Err(BufferError::InvalidRange {
                start,
                end,
                capacity: self.capacity(),
            });
        }
        let endian = self.endian;
        let hlswap = self.hlswap;
        Ok(Buffer {
            storage: &mut self.storage.as_mut()[start..end],
            len: end - start,
            pos: 0,
            endian,
            hlswap,
            policy: PhantomData,
        })
    }

    /// [`try_since`](Self::try_since) 的 panic 形式。
    #[track_caller]
    pub fn since(&mut self, start: Option<usize>, end: Option<usize>) -> BufferView<'_> {
        contract("since", self.try_since(start, end))
    }

    /// 覆盖当前可读区域的视图，等价于 `since(None, None)`。
    pub fn readable_since(&mut self) -> BufferView<'_> {
        self.since(None, None)
    }

    /// 覆盖 `[pos, len)` 的视图，用于原地改写尚未处理的已有数据。
    ///
    /// 与 [`readable_since`](Self::readable_since) 区间相同；预留空间不在其中，
    /// 需要写入预留空间时显式调用 `since(None, Some(capacity))`。
    pub fn writable_since(&mut self) -> BufferView<'_> {
        let (pos, len) = (self.pos, self.len);
        self.since(Some(pos), Some(len))
    }

    /// 严格写入前的准备：检查溢出并交由策略保证容量，返回写入结束位置。
    pub(crate) fn prepare_write(&mut self, n: usize) -> Result<usize, BufferError> {
        let end = self.pos.checked_add(n).ok_or(BufferError::LengthOverflow)?;
        P::ensure_writable(&mut self.storage, end)?;
        Ok(end)
    }

    /// 写入完成：推进游标并扩展有效长度。
    pub(crate) fn finish_write(&mut self, end: usize) {
        self.pos = end;
        if end > self.len {
            self.len = end;
        }
    }

    /// 顺序读取前的检查：返回读取结束位置。
    pub(crate) fn prepare_read(&self, n: usize) -> Result<usize, BufferError> {
        let readable = self.readable();
        if n > readable {
            return Err(BufferError::InsufficientReadable {
                requested: n,
                readable,
            });
        }
        Ok(self.pos + n)
    }
}

impl<S: GrowableStorage> Buffer<S, Growable> {
    /// 预留空间，保证在有效长度之后至少还能写入 `additional` 字节而无需再次分配。
    #[track_caller]
    pub fn grow(&mut self, additional: usize) {
        let required = contract(
            "grow",
            self.len
                .checked_add(additional)
                .ok_or(BufferError::LengthOverflow),
        );
        policy::grow(&mut self.storage, required);
    }

    /// 保证总容量不小于 `capacity`；已满足时为空操作。
    pub fn reserve(&mut self, capacity: usize) {
        policy::grow(&mut self.storage, capacity);
    }
}

impl<S: Clone, P> Clone for Buffer<S, P> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            len: self.len,
            pos: self.pos,
            endian: self.endian,
            hlswap: self.hlswap,
            policy: PhantomData,
        }
    }
}

impl<S: Storage, P: CapacityPolicy<S>> fmt::Debug for Buffer<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("policy", &P::NAME)
            .field("pos", &self.pos)
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("endian", &self.endian)
            .field("hlswap", &self.hlswap)
            .finish()
    }
}
