pub mod charts;
pub mod deadlines;
pub mod filter;
pub mod gantt;
pub mod metrics;

pub use deadlines::{upcoming_deadlines, Deadline, Urgency};
pub use filter::{owner_label, owners, ProjectFilter};
pub use gantt::{gantt_rows, GanttRow};
pub use metrics::{format_currency, Metrics, ProgressBand};
