//! Message rendering for handlers
//!
//! Two modes mirror the record's two shapes: `sprint` for bare positional
//! arguments and `sprintf` for a printf-style template. Neither fails; operand
//! mismatches are rendered as inline `%!` markers.

use super::value::Value;
use std::fmt::Write;

/// Join arguments, inserting a space between two operands when neither is a string
pub fn sprint(args: &[Value]) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 && !arg.is_string() && !args[i - 1].is_string() {
            out.push(' ');
        }
        let _ = write!(out, "{}", arg);
    }
    out
}

#[derive(Debug, Default)]
struct Spec {
    minus: bool,
    plus: bool,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

/// Expand a printf-style template
///
/// Supported verbs: `%v %s %d %f %F %t %q %x %X %%`, with the `-`, `+` and
/// `0` flags, width and precision.
pub fn sprintf(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut chars = template.chars().peekable();
    let mut next_arg = 0;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut spec = Spec::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => spec.minus = true,
                '+' => spec.plus = true,
                '0' => spec.zero = true,
                ' ' | '#' => {}
                _ => break,
            }
            chars.next();
        }
        spec.width = read_number(&mut chars);
        if chars.peek() == Some(&'.') {
            chars.next();
            spec.precision = Some(read_number(&mut chars).unwrap_or(0));
        }

        let verb = match chars.next() {
            Some(verb) => verb,
            None => {
                out.push_str("%!(NOVERB)");
                break;
            }
        };
        if verb == '%' {
            out.push('%');
            continue;
        }

        match args.get(next_arg) {
            Some(arg) => {
                next_arg += 1;
                let text = format_operand(verb, &spec, arg);
                out.push_str(&pad(text, &spec, is_numeric(arg)));
            }
            None => {
                let _ = write!(out, "%!{}(MISSING)", verb);
            }
        }
    }

    if next_arg < args.len() {
        let extra: Vec<String> = args[next_arg..].iter().map(describe).collect();
        let _ = write!(out, "%!(EXTRA {})", extra.join(", "));
    }

    out
}

fn read_number<I: Iterator<Item = char>>(chars: &mut std::iter::Peekable<I>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(digit as usize));
        chars.next();
    }
    value
}

fn is_numeric(value: &Value) -> bool {
    matches!(value, Value::Int(_) | Value::Uint(_) | Value::Float(_))
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "<nil>".to_string(),
        other => format!("{}={}", other.type_name(), other),
    }
}

fn bad_verb(verb: char, value: &Value) -> String {
    format!("%!{}({})", verb, describe(value))
}

fn signed(text: String, negative: bool, spec: &Spec) -> String {
    if spec.plus && !negative {
        format!("+{}", text)
    } else {
        text
    }
}

fn format_operand(verb: char, spec: &Spec, value: &Value) -> String {
    match (verb, value) {
        ('v', Value::Float(f)) | ('f' | 'F', Value::Float(f)) => {
            let text = match (verb, spec.precision) {
                ('v', None) => f.to_string(),
                (_, precision) => format!("{:.*}", precision.unwrap_or(6), f),
            };
            signed(text, f.is_sign_negative(), spec)
        }
        ('v' | 'd', Value::Int(i)) => signed(i.to_string(), *i < 0, spec),
        ('v' | 'd', Value::Uint(u)) => signed(u.to_string(), false, spec),
        ('v' | 's', Value::String(s)) => match spec.precision {
            Some(precision) => s.chars().take(precision).collect(),
            None => s.clone(),
        },
        ('v' | 't', Value::Bool(b)) => b.to_string(),
        ('v', Value::Null) => "<nil>".to_string(),
        ('q', Value::String(s)) => format!("{:?}", s),
        ('x', Value::Int(i)) if *i < 0 => format!("-{:x}", i.unsigned_abs()),
        ('X', Value::Int(i)) if *i < 0 => format!("-{:X}", i.unsigned_abs()),
        ('x', Value::Int(i)) => format!("{:x}", i),
        ('X', Value::Int(i)) => format!("{:X}", i),
        ('x', Value::Uint(u)) => format!("{:x}", u),
        ('X', Value::Uint(u)) => format!("{:X}", u),
        ('x', Value::String(s)) => s.bytes().map(|b| format!("{:02x}", b)).collect(),
        ('X', Value::String(s)) => s.bytes().map(|b| format!("{:02X}", b)).collect(),
        _ => bad_verb(verb, value),
    }
}

fn pad(text: String, spec: &Spec, numeric: bool) -> String {
    let width = match spec.width {
        Some(width) => width,
        None => return text,
    };
    let len = text.chars().count();
    if len >= width {
        return text;
    }
    let fill = width - len;
    if spec.minus {
        format!("{}{}", text, " ".repeat(fill))
    } else if spec.zero && numeric {
        match text.strip_prefix(&['-', '+'][..]) {
            Some(digits) => format!("{}{}{}", &text[..1], "0".repeat(fill), digits),
            None => format!("{}{}", "0".repeat(fill), text),
        }
    } else {
        format!("{}{}", " ".repeat(fill), text)
    }
}
