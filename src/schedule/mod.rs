pub mod error;
pub mod session;
pub mod source;
pub mod status;
pub mod window;

pub use error::ScheduleError;
pub use session::{
    ingest, next_class, ClassScheduleRecord, ClassSession, IngestReport, RejectedRecord,
    ScheduleStatus,
};
pub use source::{refresh_schedule, JsonFileSource, ScheduleSource};
pub use status::{can_join, classify, classify_raw, ClassStatus};
pub use window::{combine, live_window, TimeWindow, LIVE_WINDOW_MINUTES};
