//! What gets sent back for a request.
//!
//! A request URI is resolved to a [`resolve::Target`] under the document
//! root, checked against its [`metadata::FileMeta`], and then answered by
//! one of three responders: the file itself, the output of a CGI program,
//! or an HTML error page.

pub mod cgi;
pub mod error_page;
pub mod metadata;
pub mod resolve;
pub mod static_file;

pub use cgi::CgiProgram;
pub use error_page::{send_error, ClientError};
pub use metadata::FileMeta;
pub use resolve::{Target, TargetKind, UriResolver};
pub use static_file::StaticFile;
