#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppError {
    // 钩子相关
    HooksAlreadyRegistered,

    // 任务相关
    TaskCreateFailed,
}

impl core::fmt::Display for AppError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AppError::HooksAlreadyRegistered => write!(f, "Hooks already registered"),
            AppError::TaskCreateFailed => write!(f, "Task creation failed"),
        }
    }
}

pub type Result<T> = core::result::Result<T, AppError>;
