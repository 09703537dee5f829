// 静态分配模式下的应用配置
// 栈深度以栈字（StackWord）为单位，必须与内核侧配置常量一致
pub const TCB_SIZE: usize = 352; // 内核 StaticTask_t 的字节大小
pub const IDLE_TASK_STACK_DEPTH: usize = 1024; // 对应 configMINIMAL_STACK_SIZE
pub const TIMER_TASK_STACK_DEPTH: usize = 2048; // 对应 configTIMER_TASK_STACK_DEPTH

// hello 任务参数
pub const HELLO_TASK_NAME: &core::ffi::CStr = c"HelloWorld";
pub const HELLO_TASK_STACK_DEPTH: usize = 1024;
pub const HELLO_TASK_PRIORITY: u32 = 2;
pub const HELLO_MESSAGE: &str = "HelloWorld!";
pub const HELLO_PERIOD_MS: u32 = 1000;

/// 内核 tick 频率（Hz）
pub const TICK_RATE_HZ: u32 = 100;

/// 毫秒转 tick 数（对应 pdMS_TO_TICKS）
pub const fn ms_to_ticks(ms: u32) -> u32 {
    (ms as u64 * TICK_RATE_HZ as u64 / 1000) as u32
}
