pub mod board;
pub mod employee;
pub mod entry;
pub mod grid;
pub mod interval;
pub mod segment;
pub mod week;

pub use board::{Board, BoardCell, BoardView};
pub use employee::Employee;
pub use entry::{MarkingEntry, MarkingKind, ScheduleEntry, WorkedTimeEntry};
pub use grid::GridGeometry;
pub use interval::TimeInterval;
pub use segment::{Segment, SegmentKind};
pub use week::{ScheduleSource, WeekDataset, DAYS_PER_WEEK};
