//! Echo endpoint
//!
//! `GET /?a=<text>&b=<text>` reflects both values untouched. Served as
//! plain text, so nothing needs escaping.

use super::query::QueryParams;

pub const USAGE: &str =
    "Servidor funcionando. Por favor, provee 'a' y 'b'. Ejemplo: /?a=hola&b=mundo";

pub fn respond(params: &QueryParams) -> String {
    match (params.get_non_empty("a"), params.get_non_empty("b")) {
        (Some(a), Some(b)) => format!("a = {a}, b = {b}"),
        _ => USAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo() {
        let params = QueryParams::parse(Some("a=hola&b=12.50"));
        assert_eq!(respond(&params), "a = hola, b = 12.50");
    }

    #[test]
    fn test_raw_values_not_parsed() {
        let params = QueryParams::parse(Some("b=%3Cb%3E&a=1e3"));
        assert_eq!(respond(&params), "a = 1e3, b = <b>");
    }

    #[test]
    fn test_missing() {
        assert_eq!(respond(&QueryParams::parse(None)), USAGE);
        assert_eq!(respond(&QueryParams::parse(Some("a=1"))), USAGE);
        assert_eq!(respond(&QueryParams::parse(Some("a=1&b="))), USAGE);
    }
}
