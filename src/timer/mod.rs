pub mod controller;
pub mod state;
pub mod ticker;

pub use controller::{CountdownController, CountdownSnapshot};
pub use state::{CountdownState, CountdownStatus, Remaining};
pub use ticker::{start_countdown, CountdownHandle, DEFAULT_TICK_INTERVAL};
