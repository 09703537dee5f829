//! hello 任务入口
//!
//! 内核把 [`HelloTask::run`] 作为一个任务体调度：
//! 每轮先等待固定周期再输出一行，永不返回，迭代之间不携带状态。

use core::fmt::Write;

use crate::config::{HELLO_MESSAGE, HELLO_PERIOD_MS};

/// 等待/让出原语的接口
///
/// 目标上由内核的 tick 延时实现（让出 CPU 而不是空转），
/// 测试里用立即返回的桩替代。
pub trait Delay {
    /// 阻塞当前任务至少 `ms` 毫秒
    fn delay_ms(&self, ms: u32);
}

/// 周期输出任务
pub struct HelloTask<W: Write, D: Delay> {
    sink: W,
    delay: D,
}

impl<W: Write, D: Delay> HelloTask<W, D> {
    pub const fn new(sink: W, delay: D) -> Self {
        Self { sink, delay }
    }

    /// 执行一轮：等待一个周期，然后输出一行
    ///
    /// 输出失败不检查也不处理，输出端不可用时任务照常继续。
    pub fn step(&mut self) {
        self.delay.delay_ms(HELLO_PERIOD_MS);
        let _ = writeln!(self.sink, "{}", HELLO_MESSAGE);
    }

    /// 任务主循环，永不返回
    pub fn run(mut self) -> ! {
        loop {
            self.step();
        }
    }
}
