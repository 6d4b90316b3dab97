pub mod date;
pub mod id;
pub mod lenient;
pub mod note;
pub mod project;
pub mod status;
pub mod subtask;
pub mod timeline;

pub use date::{CalendarDate, Lenient, Timestamp};
pub use id::{generate_id, IdKind};
pub use note::Note;
pub use project::{Project, ProjectUpdate};
pub use status::{DisplayStatus, Labelled, Priority, Status, Stored};
pub use subtask::Subtask;
pub use timeline::{TimelineScale, TimelineViewport};
