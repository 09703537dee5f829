//! 生命周期钩子集
//!
//! 内核在固定的生命周期时刻回调应用：tick 中断、空闲、守护任务启动、
//! 以及静态分配模式下的空闲/定时器任务内存申请。
//! 这里用显式注册代替按符号名的隐式匹配：实现一次 [`KernelHooks`]，
//! 通过 [`register`] 交给分发层，ABI 入口只做转发。

pub mod memory;

use spin::{Once, RwLock};

use crate::error::{AppError, Result};
use self::memory::TaskMemoryGrant;

/// 内核要求应用提供的钩子集合
///
/// tick/idle 钩子在中断或空闲上下文被调用，必须快速返回且不得阻塞。
/// 内存提供钩子没有失败通道，返回的指针必须指向有效的静态存储。
/// 各钩子相互独立：任何一个钩子的执行不会触发其他钩子。
pub trait KernelHooks: Sync {
    /// 每次内核定时器中断调用一次
    fn on_tick(&self) {}

    /// 没有任务就绪时调用
    fn on_idle(&self) {}

    /// 内核守护任务启动时调用一次，预留的扩展点
    fn on_daemon_startup(&self) {}

    /// 空闲任务的静态内存
    fn idle_task_memory(&self) -> TaskMemoryGrant {
        memory::idle_task_memory()
    }

    /// 定时器/守护任务的静态内存
    fn timer_task_memory(&self) -> TaskMemoryGrant {
        memory::timer_task_memory()
    }
}

static HOOKS: Once<RwLock<Option<&'static dyn KernelHooks>>> = Once::new();

fn hooks_cell() -> &'static RwLock<Option<&'static dyn KernelHooks>> {
    HOOKS.call_once(|| RwLock::new(None))
}

/// 注册钩子实现
///
/// 只允许注册一次，重复注册返回 [`AppError::HooksAlreadyRegistered`]。
pub fn register(hooks: &'static dyn KernelHooks) -> Result<()> {
    let mut cell = hooks_cell().write();
    if cell.is_some() {
        return Err(AppError::HooksAlreadyRegistered);
    }
    *cell = Some(hooks);
    Ok(())
}

#[cfg(test)]
pub(crate) fn reset() {
    *hooks_cell().write() = None;
}

/// 分发层
///
/// ABI 入口从这里转发到注册的钩子实现。
pub struct Dispatch;

impl Dispatch {
    /// tick 钩子分发；未注册时为空操作
    pub fn tick() {
        if let Some(hooks) = *hooks_cell().read() {
            hooks.on_tick();
        }
    }

    /// idle 钩子分发；未注册时为空操作
    pub fn idle() {
        if let Some(hooks) = *hooks_cell().read() {
            hooks.on_idle();
        }
    }

    /// 守护任务启动钩子分发；未注册时为空操作
    pub fn daemon_startup() {
        if let Some(hooks) = *hooks_cell().read() {
            hooks.on_daemon_startup();
        }
    }

    /// 空闲任务内存分发
    ///
    /// 内核在应用入口运行之前就会申请这块内存，
    /// 所以未注册时直接走默认的静态提供者。
    pub fn idle_task_memory() -> TaskMemoryGrant {
        match *hooks_cell().read() {
            Some(hooks) => hooks.idle_task_memory(),
            None => memory::idle_task_memory(),
        }
    }

    /// 定时器/守护任务内存分发，同空闲任务
    pub fn timer_task_memory() -> TaskMemoryGrant {
        match *hooks_cell().read() {
            Some(hooks) => hooks.timer_task_memory(),
            None => memory::timer_task_memory(),
        }
    }
}

/// 生产实现：tick/idle 原样转发给外部提供的处理函数，不加任何逻辑
pub struct ForwardingHooks {
    tick: fn(),
    idle: fn(),
}

impl ForwardingHooks {
    pub const fn new(tick: fn(), idle: fn()) -> Self {
        Self { tick, idle }
    }
}

impl KernelHooks for ForwardingHooks {
    fn on_tick(&self) {
        (self.tick)();
    }

    fn on_idle(&self) {
        (self.idle)();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use serial_test::serial;

    struct CountingHooks {
        tick: AtomicUsize,
        idle: AtomicUsize,
        daemon: AtomicUsize,
    }

    impl KernelHooks for CountingHooks {
        fn on_tick(&self) {
            self.tick.fetch_add(1, Ordering::SeqCst);
        }

        fn on_idle(&self) {
            self.idle.fetch_add(1, Ordering::SeqCst);
        }

        fn on_daemon_startup(&self) {
            self.daemon.fetch_add(1, Ordering::SeqCst);
        }
    }

    static COUNTING: CountingHooks = CountingHooks {
        tick: AtomicUsize::new(0),
        idle: AtomicUsize::new(0),
        daemon: AtomicUsize::new(0),
    };

    fn snapshot() -> (usize, usize, usize) {
        (
            COUNTING.tick.load(Ordering::SeqCst),
            COUNTING.idle.load(Ordering::SeqCst),
            COUNTING.daemon.load(Ordering::SeqCst),
        )
    }

    #[test]
    #[serial]
    fn test_register_once() {
        reset();
        assert!(register(&COUNTING).is_ok());
        assert_eq!(register(&COUNTING), Err(AppError::HooksAlreadyRegistered));
    }

    #[test]
    #[serial]
    fn test_dispatch_without_registration_is_noop() {
        reset();
        let before = snapshot();
        Dispatch::tick();
        Dispatch::idle();
        Dispatch::daemon_startup();
        assert_eq!(snapshot(), before);
    }

    #[test]
    #[serial]
    fn test_memory_dispatch_works_before_registration() {
        // 内核先于应用入口申请内存，分发层必须在未注册时也能供给
        reset();
        let idle = Dispatch::idle_task_memory();
        let timer = Dispatch::timer_task_memory();
        assert_eq!(idle.tcb, memory::idle_task_memory().tcb);
        assert_eq!(timer.tcb, memory::timer_task_memory().tcb);
    }

    #[test]
    #[serial]
    fn test_each_hook_dispatches_independently() {
        reset();
        register(&COUNTING).unwrap();

        let (tick, idle, daemon) = snapshot();
        Dispatch::tick();
        assert_eq!(snapshot(), (tick + 1, idle, daemon));

        Dispatch::idle();
        assert_eq!(snapshot(), (tick + 1, idle + 1, daemon));

        Dispatch::daemon_startup();
        assert_eq!(snapshot(), (tick + 1, idle + 1, daemon + 1));
    }

    #[test]
    #[serial]
    fn test_default_memory_methods_use_static_providers() {
        reset();
        register(&COUNTING).unwrap();
        let via_dispatch = Dispatch::idle_task_memory();
        let direct = memory::idle_task_memory();
        assert_eq!(via_dispatch.tcb, direct.tcb);
        assert_eq!(via_dispatch.stack, direct.stack);
        assert_eq!(via_dispatch.stack_depth, direct.stack_depth);
    }

    #[test]
    #[serial]
    fn test_forwarding_hooks() {
        static TICKS: AtomicUsize = AtomicUsize::new(0);
        static IDLES: AtomicUsize = AtomicUsize::new(0);

        fn tick_delegate() {
            TICKS.fetch_add(1, Ordering::SeqCst);
        }
        fn idle_delegate() {
            IDLES.fetch_add(1, Ordering::SeqCst);
        }

        let hooks = ForwardingHooks::new(tick_delegate, idle_delegate);
        hooks.on_tick();
        hooks.on_tick();
        hooks.on_idle();
        assert_eq!(TICKS.load(Ordering::SeqCst), 2);
        assert_eq!(IDLES.load(Ordering::SeqCst), 1);

        // 守护任务启动钩子默认是空操作
        hooks.on_daemon_startup();
        assert_eq!(TICKS.load(Ordering::SeqCst), 2);
        assert_eq!(IDLES.load(Ordering::SeqCst), 1);
    }
}
