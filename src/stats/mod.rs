pub mod frame_log;
pub mod frame_statistics;

pub use frame_log::FrameLog;
pub use frame_statistics::FrameStatistics;
