//! Text parsers for diagnostic utility output
//!
//! Each parser is a total, pure function: arbitrary text in, typed record
//! out. A missing pattern yields a `None` field, never an error. The
//! formats are undocumented and vary across OS versions, so everything
//! here parses defensively.

pub mod airport;
pub mod ping;
pub mod system_profiler;
