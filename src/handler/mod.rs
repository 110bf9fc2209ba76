//! Request handler module
//!
//! Method/path dispatch plus the two endpoints a process can serve.

pub mod calculator;
pub mod echo;
pub mod query;
pub mod router;

pub use router::handle_request;

use query::QueryParams;

/// Endpoint served on `/` by a process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Calculator,
    Echo,
}

impl Endpoint {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Calculator => "Calculator",
            Self::Echo => "Echo",
        }
    }

    pub const fn example(self) -> &'static str {
        match self {
            Self::Calculator => "/?op=sumar&a=10&b=5",
            Self::Echo => "/?a=hola&b=mundo",
        }
    }

    /// Whether the body is HTML (calculator) or plain text (echo)
    pub const fn is_html(self) -> bool {
        matches!(self, Self::Calculator)
    }

    pub fn respond(self, params: &QueryParams) -> String {
        match self {
            Self::Calculator => calculator::respond(params),
            Self::Echo => echo::respond(params),
        }
    }
}
