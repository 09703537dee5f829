//! 内核回调 ABI
//!
//! 内核按固定的符号名直接发现并调用这些入口，名称和签名必须与
//! 内核契约完全一致，否则镜像无法被内核加载。入口本身不含逻辑，
//! 只转发到 [`crate::hooks`] 的分发层。

// 符号名由内核契约决定
#![allow(non_snake_case)]

use core::ffi::{c_char, c_void};

use crate::config;
use crate::error::AppError;
use crate::hello::{Delay, HelloTask};
use crate::hooks::memory::{StackWord, TcbStorage};
use crate::hooks::{self, Dispatch, ForwardingHooks};

unsafe extern "C" {
    // tick/idle 的外部转发目标，实现不在本模块范围内
    fn esp_vApplicationTickHook();
    fn esp_vApplicationIdleHook();

    // 内核服务
    fn xTaskCreate(
        task_code: extern "C" fn(*mut c_void),
        name: *const c_char,
        stack_depth: u32,
        parameters: *mut c_void,
        priority: u32,
        created_task: *mut *mut c_void,
    ) -> i32;
    fn vTaskDelay(ticks_to_delay: u32);
    fn putchar(c: i32) -> i32;
}

/// pdPASS
const TASK_CREATE_OK: i32 = 1;

/// 经内核控制台逐字节输出
pub(crate) fn console_write(s: &str) {
    for byte in s.bytes() {
        unsafe {
            putchar(byte as i32);
        }
    }
}

fn forward_tick() {
    unsafe { esp_vApplicationTickHook() }
}

fn forward_idle() {
    unsafe { esp_vApplicationIdleHook() }
}

/// 生产钩子实现：tick/idle 原样转发，内存走默认静态提供者
static APP_HOOKS: ForwardingHooks = ForwardingHooks::new(forward_tick, forward_idle);

struct KernelConsole;

impl core::fmt::Write for KernelConsole {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        console_write(s);
        Ok(())
    }
}

struct TickDelay;

impl Delay for TickDelay {
    fn delay_ms(&self, ms: u32) {
        unsafe { vTaskDelay(config::ms_to_ticks(ms)) }
    }
}

extern "C" fn hello_task_entry(_params: *mut c_void) {
    HelloTask::new(KernelConsole, TickDelay).run();
}

/// 应用入口：注册钩子并创建 hello 任务
///
/// 两个失败路径都只记录日志：演示场景下没有可恢复的动作。
#[unsafe(no_mangle)]
pub extern "C" fn app_main() {
    if let Err(e) = hooks::register(&APP_HOOKS) {
        crate::error!("{}", e);
    }

    let created = unsafe {
        xTaskCreate(
            hello_task_entry,
            config::HELLO_TASK_NAME.as_ptr(),
            config::HELLO_TASK_STACK_DEPTH as u32,
            core::ptr::null_mut(),
            config::HELLO_TASK_PRIORITY,
            core::ptr::null_mut(),
        )
    };
    if created != TASK_CREATE_OK {
        crate::error!("{}", AppError::TaskCreateFailed);
    }
}

/// 每个内核定时器中断调用一次，必须快速返回
#[unsafe(no_mangle)]
pub extern "C" fn vApplicationTickHook() {
    Dispatch::tick();
}

/// 没有任务就绪时由空闲任务调用
#[unsafe(no_mangle)]
pub extern "C" fn vApplicationIdleHook() {
    Dispatch::idle();
}

/// 内核守护任务启动时调用一次
#[unsafe(no_mangle)]
pub extern "C" fn vApplicationDaemonTaskStartupHook() {
    Dispatch::daemon_startup();
}

/// 空闲任务内存提供钩子
///
/// 内核初始化期间调用一次，三个出参都必须填上，没有失败通道。
#[unsafe(no_mangle)]
pub extern "C" fn vApplicationGetIdleTaskMemory(
    tcb_buffer: *mut *mut TcbStorage,
    stack_buffer: *mut *mut StackWord,
    stack_depth: *mut u32,
) {
    let grant = Dispatch::idle_task_memory();
    unsafe {
        *tcb_buffer = grant.tcb.as_ptr();
        *stack_buffer = grant.stack.as_ptr();
        *stack_depth = grant.stack_depth;
    }
}

/// 定时器/守护任务内存提供钩子，契约同上
#[unsafe(no_mangle)]
pub extern "C" fn vApplicationGetTimerTaskMemory(
    tcb_buffer: *mut *mut TcbStorage,
    stack_buffer: *mut *mut StackWord,
    stack_depth: *mut u32,
) {
    let grant = Dispatch::timer_task_memory();
    unsafe {
        *tcb_buffer = grant.tcb.as_ptr();
        *stack_buffer = grant.stack.as_ptr();
        *stack_depth = grant.stack_depth;
    }
}

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    crate::error!("{}", info);
    loop {}
}
