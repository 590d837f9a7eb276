mod controller;
pub use controller::{LessonSession, SessionState};

mod error;
pub use error::{Precondition, SessionError, SessionResult};

pub mod notes;
pub mod quiz;

mod store;
pub use store::{SessionId, SessionStore};

pub mod transport;
