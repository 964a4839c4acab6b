//! Print-style concatenation and printf-style interpolation
//!
//! `sprintf` understands `%` directives with optional flags (`-+# 0`), width
//! and precision (digits or `*`). It never fails: a directive that cannot be
//! satisfied is replaced by an inline marker and rendering continues.
//!
//! | Problem                  | Marker                          |
//! |--------------------------|---------------------------------|
//! | wrong argument type      | `%!d(string=abc)`               |
//! | null argument            | `%!d(<nil>)`                    |
//! | missing argument         | `%!d(MISSING)`                  |
//! | unknown verb             | `%!z(int=5)`                    |
//! | template ends after `%`  | `%!(NOVERB)`                    |
//! | unused arguments         | `%!(EXTRA int=1, string=a)`     |
//! | bad `*` width/precision  | `%!(BADWIDTH)` / `%!(BADPREC)`  |

use super::field_value::FieldValue;
use std::fmt::Write;
use std::iter::Peekable;
use std::str::Chars;

/// Concatenate values; a space separates two operands when neither is a string
///
/// Each value renders as `%v` would.
pub fn sprint(values: &[FieldValue]) -> String {
    let plain = Spec::default();
    let mut out = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 && !value.is_string() && !values[i - 1].is_string() {
            out.push(' ');
        }
        out.push_str(&render_value(value, &plain));
    }
    out
}

/// Interpolate `args` into `template`
pub fn sprintf(template: &str, args: &[FieldValue]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut chars = template.chars().peekable();
    let mut next_arg = 0usize;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut spec = Spec::parse_flags(&mut chars);

        if chars.peek() == Some(&'*') {
            chars.next();
            match take_count(args, &mut next_arg) {
                Some(width) if width < 0 => {
                    spec.minus = true;
                    spec.width = Some(width.unsigned_abs() as usize);
                }
                Some(width) => spec.width = Some(width as usize),
                None => out.push_str("%!(BADWIDTH)"),
            }
        } else {
            spec.width = parse_number(&mut chars).filter(|w| *w <= MAX_COUNT);
        }

        if chars.peek() == Some(&'.') {
            chars.next();
            if chars.peek() == Some(&'*') {
                chars.next();
                match take_count(args, &mut next_arg) {
                    Some(prec) if prec >= 0 => spec.precision = Some(prec as usize),
                    _ => out.push_str("%!(BADPREC)"),
                }
            } else {
                // a bare `.` means zero; an oversized precision is ignored
                spec.precision = match parse_number(&mut chars) {
                    None => Some(0),
                    Some(p) if p <= MAX_COUNT => Some(p),
                    Some(_) => None,
                };
            }
        }

        let Some(verb) = chars.next() else {
            out.push_str("%!(NOVERB)");
            break;
        };

        if verb == '%' {
            out.push('%');
            continue;
        }

        let Some(arg) = args.get(next_arg) else {
            let _ = write!(out, "%!{}(MISSING)", verb);
            continue;
        };
        next_arg += 1;

        match render(verb, arg, &spec) {
            Some(body) => out.push_str(&spec.pad(body, is_numeric_verb(verb))),
            None => push_bad_verb(&mut out, verb, arg),
        }
    }

    if next_arg < args.len() {
        out.push_str("%!(EXTRA ");
        for (i, arg) in args[next_arg..].iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            push_typed(&mut out, arg);
        }
        out.push(')');
    }

    out
}

#[derive(Debug, Default)]
struct Spec {
    minus: bool,
    plus: bool,
    sharp: bool,
    zero: bool,
    space: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

impl Spec {
    fn parse_flags(chars: &mut Peekable<Chars<'_>>) -> Self {
        let mut spec = Spec::default();
        while let Some(&c) = chars.peek() {
            match c {
                '-' => spec.minus = true,
                '+' => spec.plus = true,
                '#' => spec.sharp = true,
                '0' => spec.zero = true,
                ' ' => spec.space = true,
                _ => break,
            }
            chars.next();
        }
        spec
    }

    /// Sign prefix for a non-negative number
    fn sign(&self) -> &'static str {
        if self.plus {
            "+"
        } else if self.space {
            " "
        } else {
            ""
        }
    }

    fn pad(&self, body: String, numeric: bool) -> String {
        let len = body.chars().count();
        let Some(width) = self.width.filter(|w| *w > len) else {
            return body;
        };
        let fill = width - len;

        if self.minus {
            return format!("{}{}", body, " ".repeat(fill));
        }
        if self.zero && numeric {
            // zeros go after any sign and radix prefix
            let split = leading_prefix_len(&body);
            let (head, tail) = body.split_at(split);
            return format!("{}{}{}", head, "0".repeat(fill), tail);
        }
        format!("{}{}", " ".repeat(fill), body)
    }
}

fn leading_prefix_len(body: &str) -> usize {
    let mut split = 0;
    if body.starts_with(['+', '-', ' ']) {
        split = 1;
    }
    let rest = &body[split..];
    if ["0x", "0X", "0b", "0o"].iter().any(|p| rest.starts_with(p)) {
        split += 2;
    }
    split
}

/// Widths and precisions above this are ignored
const MAX_COUNT: usize = 1_000_000;

fn parse_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(digit as usize));
    }
    value
}

/// Consume an integer argument for a `*` width or precision
fn take_count(args: &[FieldValue], next_arg: &mut usize) -> Option<i64> {
    let arg = args.get(*next_arg)?;
    *next_arg += 1;
    let count = match arg {
        FieldValue::Int(i) => *i,
        FieldValue::UInt(u) => i64::try_from(*u).ok()?,
        _ => return None,
    };
    (count.unsigned_abs() <= MAX_COUNT as u64).then_some(count)
}

fn is_numeric_verb(verb: char) -> bool {
    matches!(
        verb,
        'd' | 'b' | 'o' | 'x' | 'X' | 'e' | 'E' | 'f' | 'F' | 'g' | 'G'
    )
}

fn push_typed(out: &mut String, arg: &FieldValue) {
    match arg {
        FieldValue::Null => out.push_str("<nil>"),
        other => {
            let _ = write!(out, "{}={}", other.type_name(), other);
        }
    }
}

fn push_bad_verb(out: &mut String, verb: char, arg: &FieldValue) {
    let _ = write!(out, "%!{}(", verb);
    push_typed(out, arg);
    out.push(')');
}

/// Render one argument, or `None` when the verb does not apply to it
fn render(verb: char, arg: &FieldValue, spec: &Spec) -> Option<String> {
    match verb {
        'v' => Some(render_value(arg, spec)),
        'T' => Some(arg.type_name().to_string()),
        's' => arg.as_str().map(|s| truncate(s, spec.precision)),
        'q' => match arg {
            FieldValue::String(s) => Some(format!("{:?}", truncate(s, spec.precision))),
            FieldValue::Int(_) | FieldValue::UInt(_) => {
                as_char(arg).map(|c| format!("'{}'", c.escape_default()))
            }
            _ => None,
        },
        't' => match arg {
            FieldValue::Bool(b) => Some(b.to_string()),
            _ => None,
        },
        'c' => as_char(arg).map(String::from),
        'U' => as_char(arg).map(|c| format!("U+{:04X}", c as u32)),
        'd' | 'b' | 'o' | 'x' | 'X' => match arg {
            FieldValue::Int(i) => Some(render_integer(*i < 0, i.unsigned_abs(), verb, spec)),
            FieldValue::UInt(u) => Some(render_integer(false, *u, verb, spec)),
            FieldValue::String(s) if verb == 'x' || verb == 'X' => {
                Some(render_hex_bytes(s.as_bytes(), verb == 'X'))
            }
            _ => None,
        },
        'e' | 'E' | 'f' | 'F' | 'g' | 'G' => match arg {
            FieldValue::Float(f) => Some(render_float(*f, verb, spec)),
            _ => None,
        },
        _ => None,
    }
}

fn render_value(arg: &FieldValue, spec: &Spec) -> String {
    match arg {
        FieldValue::Float(f) => render_float(*f, 'g', spec),
        FieldValue::Int(i) => render_integer(*i < 0, i.unsigned_abs(), 'd', spec),
        FieldValue::UInt(u) => render_integer(false, *u, 'd', spec),
        FieldValue::String(s) => truncate(s, spec.precision),
        other => other.to_string(),
    }
}

fn truncate(s: &str, precision: Option<usize>) -> String {
    match precision {
        Some(p) => s.chars().take(p).collect(),
        None => s.to_string(),
    }
}

fn as_char(arg: &FieldValue) -> Option<char> {
    let code = match arg {
        FieldValue::Int(i) => u32::try_from(*i).ok(),
        FieldValue::UInt(u) => u32::try_from(*u).ok(),
        _ => return None,
    };
    Some(code.and_then(char::from_u32).unwrap_or(char::REPLACEMENT_CHARACTER))
}

fn render_integer(negative: bool, magnitude: u64, verb: char, spec: &Spec) -> String {
    let (digits, prefix) = match verb {
        'b' => (format!("{:b}", magnitude), "0b"),
        'o' => (format!("{:o}", magnitude), "0o"),
        'x' => (format!("{:x}", magnitude), "0x"),
        'X' => (format!("{:X}", magnitude), "0X"),
        _ => (magnitude.to_string(), ""),
    };

    let digits = match spec.precision {
        Some(p) if digits.len() < p => format!("{}{}", "0".repeat(p - digits.len()), digits),
        _ => digits,
    };

    let sign = if negative { "-" } else { spec.sign() };
    let prefix = if spec.sharp { prefix } else { "" };
    format!("{}{}{}", sign, prefix, digits)
}

fn render_hex_bytes(bytes: &[u8], upper: bool) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut acc, b| {
        let _ = if upper {
            write!(acc, "{:02X}", b)
        } else {
            write!(acc, "{:02x}", b)
        };
        acc
    })
}

fn render_float(value: f64, verb: char, spec: &Spec) -> String {
    let upper = verb.is_ascii_uppercase();

    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value > 0.0 {
            format!("{}Inf", spec.sign())
        } else {
            "-Inf".to_string()
        };
    }

    let body = match verb.to_ascii_lowercase() {
        'e' => exponent_form(value.abs(), spec.precision.unwrap_or(6)),
        'f' => format!("{:.*}", spec.precision.unwrap_or(6), value.abs()),
        _ => general_form(value.abs(), spec.precision, spec.sharp),
    };
    let body = if upper { body.to_uppercase() } else { body };

    let sign = if value.is_sign_negative() && value != 0.0 {
        "-"
    } else {
        spec.sign()
    };
    format!("{}{}", sign, body)
}

/// `1.234560e+03` style with at least two exponent digits
fn exponent_form(value: f64, precision: usize) -> String {
    let raw = format!("{:.*e}", precision, value);
    split_exponent(&raw)
        .map(|(mantissa, exp)| format!("{}e{}", mantissa, format_exponent(exp)))
        .unwrap_or(raw)
}

fn split_exponent(raw: &str) -> Option<(&str, i32)> {
    let (mantissa, exp) = raw.split_once('e')?;
    Some((mantissa, exp.parse().ok()?))
}

fn format_exponent(exp: i32) -> String {
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{}{:02}", sign, exp.unsigned_abs())
}

/// Shortest representation, switching to exponent form for large or tiny values
fn general_form(value: f64, precision: Option<usize>, keep_zeros: bool) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let significant = precision.map(|p| p.max(1));
    let raw = match significant {
        Some(p) => format!("{:.*e}", p - 1, value),
        None => format!("{:e}", value),
    };
    let Some((mantissa, exp)) = split_exponent(&raw) else {
        return raw;
    };

    let digits = mantissa.chars().filter(char::is_ascii_digit).count();
    let limit = significant.map_or(6, |p| p as i32);

    if exp < -4 || exp >= limit {
        let mantissa = if keep_zeros {
            mantissa.to_string()
        } else {
            trim_fraction(mantissa)
        };
        return format!("{}e{}", mantissa, format_exponent(exp));
    }

    let decimals = (digits as i32 - 1 - exp).max(0) as usize;
    let fixed = format!("{:.*}", decimals, value);
    if keep_zeros || significant.is_none() {
        fixed
    } else {
        trim_fraction(&fixed)
    }
}

fn trim_fraction(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v<T: Into<FieldValue>>(value: T) -> FieldValue {
        value.into()
    }

    #[test]
    fn test_sprint_spacing() {
        assert_eq!(sprint(&[v("a"), v("b")]), "ab");
        assert_eq!(sprint(&[v(1), v(2)]), "1 2");
        assert_eq!(sprint(&[v("count:"), v(3), v(4), v("!")]), "count:3 4!");
        assert_eq!(sprint(&[]), "");
    }

    #[test]
    fn test_sprint_renders_like_v() {
        assert_eq!(sprint(&[FieldValue::Null]), "<nil>");
        assert_eq!(sprint(&[v("took "), v(1e6)]), "took 1e+06");
        assert_eq!(sprint(&[v(2.5), v(100000.0)]), "2.5 100000");
    }

    #[test]
    fn test_shortest_float_switches_to_exponent() {
        assert_eq!(
            sprintf("%v|%g|%g|%v", &[v(1e6), v(1234567.0), v(1e20), FieldValue::Null]),
            "1e+06|1.234567e+06|1e+20|<nil>"
        );
        assert_eq!(sprintf("%v|%g", &[v(123456.0), v(0.0001)]), "123456|0.0001");
    }

    #[test]
    fn test_basic_directives() {
        assert_eq!(sprintf("count=%d items", &[v(5)]), "count=5 items");
        assert_eq!(sprintf("%s is %v", &[v("x"), v(true)]), "x is true");
        assert_eq!(sprintf("100%%", &[]), "100%");
        assert_eq!(sprintf("%q", &[v("a\"b")]), "\"a\\\"b\"");
        assert_eq!(sprintf("%T %T", &[v(1.5), v("s")]), "float64 string");
    }

    #[test]
    fn test_integer_forms() {
        assert_eq!(sprintf("%x %X %o %b", &[v(255), v(255), v(8), v(5)]), "ff FF 10 101");
        assert_eq!(sprintf("%#x", &[v(255)]), "0xff");
        assert_eq!(sprintf("%+d %d", &[v(3), v(-3)]), "+3 -3");
        assert_eq!(sprintf("%05d|%-4d|%4d", &[v(-42), v(7), v(7)]), "-0042|7   |   7");
        assert_eq!(sprintf("%.3d", &[v(7)]), "007");
        assert_eq!(sprintf("%c%c", &[v(72), v(105)]), "Hi");
        assert_eq!(sprintf("%x", &[v("hi")]), "6869");
    }

    #[test]
    fn test_float_forms() {
        assert_eq!(sprintf("%f", &[v(3.5)]), "3.500000");
        assert_eq!(sprintf("%.2f", &[v(3.14159)]), "3.14");
        assert_eq!(sprintf("%e", &[v(1234.5678)]), "1.234568e+03");
        assert_eq!(sprintf("%g", &[v(0.5)]), "0.5");
        assert_eq!(sprintf("%g", &[v(1e21)]), "1e+21");
        assert_eq!(sprintf("%g", &[v(0.00001)]), "1e-05");
        assert_eq!(sprintf("%.3g", &[v(3.14159)]), "3.14");
        assert_eq!(sprintf("%v", &[v(2.0)]), "2");
        assert_eq!(sprintf("%8.3f|", &[v(-1.5)]), "  -1.500|");
    }

    #[test]
    fn test_width_from_argument() {
        assert_eq!(sprintf("%*d|", &[v(4), v(7)]), "   7|");
        assert_eq!(sprintf("%-*d|", &[v(3), v(7)]), "7  |");
        assert_eq!(sprintf("%.*f", &[v(1), v(2.26)]), "2.3");
        assert_eq!(sprintf("%*d", &[v("x"), v(7)]), "%!(BADWIDTH)7");
    }

    #[test]
    fn test_wrong_type_marker() {
        assert_eq!(
            sprintf("count=%d", &[v("notanumber")]),
            "count=%!d(string=notanumber)"
        );
        assert_eq!(sprintf("%t", &[v(1)]), "%!t(int=1)");
        assert_eq!(sprintf("%d", &[FieldValue::Null]), "%!d(<nil>)");
    }

    #[test]
    fn test_missing_and_extra() {
        assert_eq!(sprintf("%d and %s", &[v(1)]), "1 and %!s(MISSING)");
        assert_eq!(sprintf("hi", &[v("a"), v(1)]), "hi%!(EXTRA string=a, int=1)");
    }

    #[test]
    fn test_unknown_verb_and_noverb() {
        assert_eq!(sprintf("%z", &[v(5)]), "%!z(int=5)");
        assert_eq!(sprintf("tail %", &[]), "tail %!(NOVERB)");
    }

    #[test]
    fn test_rest_of_template_survives_errors() {
        assert_eq!(
            sprintf("a=%d b=%s c=%d", &[v("x"), v("y"), v(3)]),
            "a=%!d(string=x) b=y c=3"
        );
    }

    #[test]
    fn test_string_precision_and_padding() {
        assert_eq!(sprintf("%.3s", &[v("abcdef")]), "abc");
        assert_eq!(sprintf("%6s|%-6s|", &[v("ab"), v("cd")]), "    ab|cd    |");
    }

    #[test]
    fn test_oversized_counts_are_ignored() {
        assert_eq!(sprintf("%.9999999s", &[v("abc")]), "abc");
        assert_eq!(sprintf("%.9999999f", &[v(1.5)]), "1.500000");
        assert_eq!(sprintf("%9999999d", &[v(7)]), "7");
        assert_eq!(sprintf("%.s|", &[v("abc")]), "|");
    }
}
