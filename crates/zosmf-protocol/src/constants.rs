//! Resource paths, query parameter names, and the address-space default table.
//!
//! The paths and parameter names must match the z/OSMF service byte-for-byte;
//! they are part of the wire contract, not implementation detail.

/// Base resource for TSO address-space operations.
pub const TSO_RESOURCE: &str = "/zosmf/tsoApp/tso";

/// Resource for pinging a running address space.
pub const TSO_PING_RESOURCE: &str = "/zosmf/tsoApp/tso/ping";

/// Base resource for app-to-app address-space communication.
pub const TSO_APP_RESOURCE: &str = "/zosmf/tsoApp/app";

/// Query suffix telling the service not to read a reply on send.
pub const DONT_READ_REPLY: &str = "?readReply=false";

/// Query parameter: account number.
pub const PARM_ACCT: &str = "acct";
/// Query parameter: logon procedure.
pub const PARM_PROC: &str = "proc";
/// Query parameter: character set.
pub const PARM_CHSET: &str = "chset";
/// Query parameter: code page.
pub const PARM_CPAGE: &str = "cpage";
/// Query parameter: screen rows.
pub const PARM_ROWS: &str = "rows";
/// Query parameter: screen columns.
pub const PARM_COLS: &str = "cols";
/// Query parameter: region size.
pub const PARM_RSIZE: &str = "rsize";

/// Default logon procedure.
pub const DEFAULT_PROC: &str = "IZUFPROC";
/// Default character set.
pub const DEFAULT_CHSET: &str = "697";
/// Default code page.
pub const DEFAULT_CPAGE: &str = "1047";
/// Default screen rows.
pub const DEFAULT_ROWS: &str = "24";
/// Default screen columns.
pub const DEFAULT_COLS: &str = "80";
/// Default region size.
pub const DEFAULT_RSIZE: &str = "4096";

/// Protocol version string sent in the `TSO RESPONSE` send envelope.
pub const SEND_VERSION: &str = "0100";

/// Literal keyword that terminates the app-communication receive loop.
///
/// Compared against trimmed message text. This is a separate termination
/// heuristic from the structural `TSO PROMPT` tagging used by the plain
/// command-collection loop.
pub const READY_KEYWORD: &str = "READY";

/// CSRF header required by z/OSMF on every request.
pub const CSRF_HEADER: &str = "X-CSRF-ZOSMF-HEADER";
