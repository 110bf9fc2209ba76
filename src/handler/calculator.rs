//! Calculator endpoint
//!
//! `GET /?op=<operation>&a=<number>&b=<number>`. Every outcome, including
//! bad input, is a 200 with an explanatory HTML body.

use super::query::{escape_html, QueryParams};
use crate::arithmetic::{format_number, parse_number, Operation};

pub const USAGE: &str =
    "Servidor funcionando. Por favor, provee 'op', 'a' y 'b'. Ejemplo: /?op=sumar&a=10&b=5";

/// Build the response body for one calculator request
pub fn respond(params: &QueryParams) -> String {
    let (Some(op), Some(raw_a), Some(raw_b)) = (
        params.get_non_empty("op"),
        params.get_non_empty("a"),
        params.get_non_empty("b"),
    ) else {
        return USAGE.to_string();
    };

    let (Some(a), Some(b)) = (parse_number(raw_a), parse_number(raw_b)) else {
        return format!(
            "Error: 'a' ('{}') y 'b' ('{}') deben ser números.",
            escape_html(raw_a),
            escape_html(raw_b)
        );
    };

    let Ok(operation) = op.parse::<Operation>() else {
        return format!(
            "Error: Operación '{}' no reconocida. Usa 'sumar', 'restar', 'multiplicar' o 'dividir'.",
            escape_html(op)
        );
    };

    format!(
        "La operación fue: {operation}<br>a = {}<br>b = {}<br><b>Resultado = {}</b>",
        format_number(a),
        format_number(b),
        operation.apply(a, b)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(query: &str) -> String {
        respond(&QueryParams::parse(Some(query)))
    }

    fn result_of(query: &str) -> String {
        let body = run(query);
        let start = body.find("Resultado = ").expect("no result in body") + "Resultado = ".len();
        let end = body.rfind("</b>").expect("no closing tag");
        body[start..end].to_string()
    }

    #[test]
    fn test_operations() {
        assert_eq!(result_of("op=sumar&a=2&b=3"), "5.0");
        assert_eq!(result_of("op=restar&a=10&b=5"), "5.0");
        assert_eq!(result_of("op=multiplicar&a=3&b=4"), "12.0");
        assert_eq!(result_of("op=dividir&a=10&b=2"), "5.0");
        assert_eq!(result_of("op=dividir&a=5&b=2"), "2.5");
    }

    #[test]
    fn test_large_and_small_results() {
        assert_eq!(result_of("op=multiplicar&a=1e10&b=1e10"), "1e+20");
        assert_eq!(result_of("op=dividir&a=1&b=100000"), "1e-05");
        assert_eq!(result_of("op=dividir&a=1&b=10000"), "0.0001");
    }

    #[test]
    fn test_digit_separators() {
        assert_eq!(result_of("op=sumar&a=1_000&b=1"), "1001.0");
        assert!(run("op=sumar&a=1__000&b=1").contains("deben ser números"));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(result_of("op=dividir&a=5&b=0"), "Error: División por cero");
    }

    #[test]
    fn test_full_body() {
        assert_eq!(
            run("op=sumar&a=2&b=3"),
            "La operación fue: sumar<br>a = 2.0<br>b = 3.0<br><b>Resultado = 5.0</b>"
        );
    }

    #[test]
    fn test_missing_params() {
        assert_eq!(respond(&QueryParams::parse(None)), USAGE);
        assert_eq!(run("a=1&b=2"), USAGE);
        assert_eq!(run("op=sumar&b=2"), USAGE);
        assert_eq!(run("op=sumar&a=1"), USAGE);
        assert_eq!(run("op=sumar&a=&b=2"), USAGE);
    }

    #[test]
    fn test_non_numeric() {
        assert_eq!(
            run("op=sumar&a=dos&b=3"),
            "Error: 'a' ('dos') y 'b' ('3') deben ser números."
        );
        // Parsing is checked before the operation name
        assert!(run("op=foo&a=x&b=1").contains("deben ser números"));
    }

    #[test]
    fn test_unknown_operation() {
        let body = run("op=foo&a=1&b=2");
        assert!(body.contains("'foo' no reconocida"));
        assert!(body.contains("'sumar', 'restar', 'multiplicar' o 'dividir'"));
    }

    #[test]
    fn test_reflected_input_is_escaped() {
        let body = run("op=%3Cscript%3E&a=1&b=2");
        assert!(body.contains("'&lt;script&gt;' no reconocida"));
        assert!(!body.contains("<script>"));
    }
}
