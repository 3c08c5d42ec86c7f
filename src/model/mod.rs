pub mod board;
pub mod drag;
pub mod filter;
pub mod project;
pub mod query;
pub mod rows;
pub mod sync;
pub mod task;
pub mod timeline;

pub use drag::{BarTarget, DateCommit, DragController, DragKind};
pub use filter::{ChipSet, FeaturedMember, FilterChip, FilterGroup, ViewOptions, ViewType};
pub use project::{Priority, Project, ProjectStatus};
pub use query::{QueryParams, ViewState};
pub use rows::{DateEditPolicy, EditDraft, ExpandState};
pub use sync::{Router, ViewStateSync};
pub use task::{Task, TaskStatus};
pub use timeline::{TimelineWindow, ViewMode};
