use std::cmp::Ordering;

/// Numeric-aware ordering of version labels such as `14.5`, `android-33` or `8.0.1`.
///
/// Only the first whitespace-delimited token is compared, so annotations like
/// `17.0 (21A329)` or a trailing size are ignored. Each token is split into
/// runs of digits and non-digits; digit runs compare by value, everything else
/// compares lexically, and a strict prefix sorts first.
pub fn compare(a: &str, b: &str) -> Ordering {
    let left = runs(leading_token(a));
    let right = runs(leading_token(b));

    for (x, y) in left.iter().zip(right.iter()) {
        let ord = match (x, y) {
            (Run::Digits(x), Run::Digits(y)) => compare_numeric(x, y),
            _ => x.text().cmp(y.text()),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    left.len().cmp(&right.len())
}

fn leading_token(label: &str) -> &str {
    label.split_whitespace().next().unwrap_or("")
}

#[derive(Debug, PartialEq)]
enum Run<'a> {
    Digits(&'a str),
    Text(&'a str),
}

impl<'a> Run<'a> {
    fn text(&self) -> &'a str {
        match self {
            Run::Digits(s) | Run::Text(s) => *s,
        }
    }
}

fn runs(token: &str) -> Vec<Run<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits = None;

    for (i, c) in token.char_indices() {
        let digit = c.is_ascii_digit();
        match in_digits {
            Some(prev) if prev != digit => {
                out.push(make_run(&token[start..i], prev));
                start = i;
            },
            _ => {},
        }
        in_digits = Some(digit);
    }
    if let Some(digit) = in_digits {
        out.push(make_run(&token[start..], digit));
    }
    out
}

fn make_run(s: &str, digits: bool) -> Run<'_> {
    if digits { Run::Digits(s) } else { Run::Text(s) }
}

// Compares by value without parsing, so arbitrarily long runs never overflow.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
