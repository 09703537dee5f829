//! 内核托管任务的静态内存提供者
//!
//! 静态分配模式下内核不使用堆，空闲任务和定时器/守护任务的控制块与栈
//! 都由应用以静态存储期提供：初始化时一次性移交给内核，之后应用不再访问。

use core::cell::UnsafeCell;
use core::ptr::NonNull;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::config::{IDLE_TASK_STACK_DEPTH, TCB_SIZE, TIMER_TASK_STACK_DEPTH};

/// 内核栈字类型（对应 StackType_t）
pub type StackWord = u32;

/// 内核任务控制块的不透明存储（对应 StaticTask_t）
///
/// 大小由 `TCB_SIZE` 给定，内容只有内核会解释。
#[repr(C)]
#[repr(align(8))]
pub struct TcbStorage {
    bytes: [u8; TCB_SIZE],
}

impl TcbStorage {
    const fn new() -> Self {
        Self {
            bytes: [0; TCB_SIZE],
        }
    }
}

/// 一对静态分配的任务内存：控制块 + 栈
///
/// 缓冲区只在声明时写入一次，`grant` 之后归内核独占，
/// 应用侧只保留移交标记用于观测。
pub struct TaskMemory<const DEPTH: usize> {
    tcb: UnsafeCell<TcbStorage>,
    stack: UnsafeCell<[StackWord; DEPTH]>,
    handed_off: AtomicBool,
}

// SAFETY: grant 之后缓冲区归内核独占，应用侧不再通过 UnsafeCell 读写内容
unsafe impl<const DEPTH: usize> Sync for TaskMemory<DEPTH> {}

/// 移交给内核的内存三元组
///
/// 指针由 `NonNull` 保证非空，`stack_depth` 恒等于对应的配置常量。
#[derive(Debug, Clone, Copy)]
pub struct TaskMemoryGrant {
    pub tcb: NonNull<TcbStorage>,
    pub stack: NonNull<StackWord>,
    pub stack_depth: u32,
}

impl<const DEPTH: usize> TaskMemory<DEPTH> {
    pub const fn new() -> Self {
        Self {
            tcb: UnsafeCell::new(TcbStorage::new()),
            stack: UnsafeCell::new([0; DEPTH]),
            handed_off: AtomicBool::new(false),
        }
    }

    /// 移交控制块和栈
    ///
    /// 内核 ABI 没有失败通道，这里必须不失败。
    /// 重复调用返回同一组指针：缓冲区永不重新分配。
    pub fn grant(&'static self) -> TaskMemoryGrant {
        self.handed_off.store(true, Ordering::Release);
        // SAFETY: UnsafeCell 指向静态存储，裸指针一定非空
        let tcb = unsafe { NonNull::new_unchecked(self.tcb.get()) };
        let stack = unsafe { NonNull::new_unchecked(self.stack.get().cast::<StackWord>()) };
        TaskMemoryGrant {
            tcb,
            stack,
            stack_depth: DEPTH as u32,
        }
    }

    /// 是否已经移交给内核
    pub fn is_handed_off(&self) -> bool {
        self.handed_off.load(Ordering::Acquire)
    }
}

static IDLE_TASK_MEMORY: TaskMemory<IDLE_TASK_STACK_DEPTH> = TaskMemory::new();
static TIMER_TASK_MEMORY: TaskMemory<TIMER_TASK_STACK_DEPTH> = TaskMemory::new();

/// 空闲任务的静态内存，内核初始化期间调用一次
pub fn idle_task_memory() -> TaskMemoryGrant {
    IDLE_TASK_MEMORY.grant()
}

/// 定时器/守护任务的静态内存，内核初始化期间调用一次
pub fn timer_task_memory() -> TaskMemoryGrant {
    TIMER_TASK_MEMORY.grant()
}
