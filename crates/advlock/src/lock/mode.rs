use std::fmt;

/// Advisory lock mode.
///
/// - `Exclusive`: a single holder, conflicting with every other holder.
/// - `Shared`: any number of shared holders, conflicting with an exclusive one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockMode {
    /// Write lock; excludes every other holder
    Exclusive,
    /// Read lock; coexists with other shared holders
    Shared,
}

impl fmt::Display for LockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockMode::Exclusive => write!(f, "exclusive"),
            LockMode::Shared => write!(f, "shared"),
        }
    }
}
