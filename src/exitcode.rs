//! Process exit codes, following BSD sysexits.h

/// Command finished
pub const OK: i32 = 0;

/// A file could not be parsed or a record failed validation
pub const DATAERR: i32 = 65;

/// The named file or mod does not exist
pub const NOINPUT: i32 = 66;

/// Reading, writing or transcoding a file failed
pub const IOERR: i32 = 74;

/// A config file or PDXTREE_* variable is malformed
pub const CONFIG: i32 = 78;
