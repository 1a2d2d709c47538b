//! Input normalizers applied as the user types.
//!
//! Every function here is idempotent: feeding its output back in returns
//! the same string, so a form can reapply it on every keystroke.

/// Lowercase connectives kept lowercase inside names.
const NAME_PARTICLES: [&str; 6] = ["de", "da", "do", "dos", "das", "e"];

/// Maximum digits in a Brazilian phone number (2 area + 9 local).
const PHONE_MAX_DIGITS: usize = 11;

/// Maximum digits in a CPF.
const CPF_DIGITS: usize = 11;

/// Letters accepted in names: ASCII plus Latin-1 accented letters.
fn is_name_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || (('\u{C0}'..='\u{FF}').contains(&c) && c != '\u{D7}' && c != '\u{F7}')
}

/// Uppercase `c` only when the result stays a single name letter.
fn upper_letter(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) if is_name_letter(u) => u,
        _ => c,
    }
}

fn lower_letter(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) if is_name_letter(l) => l,
        _ => c,
    }
}

/// Keep only name letters and single spaces, dropping leading whitespace.
fn clean_letters(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_space = false;
    for c in value.chars() {
        if c.is_whitespace() {
            pending_space = true;
        } else if is_name_letter(c) {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        }
    }
    if pending_space && !out.is_empty() {
        out.push(' ');
    }
    out
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => std::iter::once(upper_letter(first))
            .chain(chars.map(lower_letter))
            .collect(),
        None => String::new(),
    }
}

/// Title-case a person's name, keeping Portuguese particles lowercase.
///
/// While the value ends in a space the user is still typing the next word,
/// so casing is left alone.
pub fn capitalize_name(value: &str) -> String {
    let name = clean_letters(value);
    if name.is_empty() || name.ends_with(' ') {
        return name;
    }

    name.split(' ')
        .enumerate()
        .map(|(i, word)| {
            let lower: String = word.chars().map(lower_letter).collect();
            if i > 0 && NAME_PARTICLES.contains(&lower.as_str()) {
                lower
            } else {
                capitalize_word(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Title-case a dental specialty, trimming surrounding whitespace.
pub fn format_specialty(value: &str) -> String {
    clean_letters(value)
        .trim_end()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => std::iter::once(upper_letter(first)).chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Extract the ASCII digits of `value`.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format a Brazilian phone number progressively: `(11) 2222-3333` for
/// landlines and `(11) 98765-4321` for mobiles. Extra digits are dropped.
pub fn format_phone(value: &str) -> String {
    let digits: String = digits_only(value).chars().take(PHONE_MAX_DIGITS).collect();
    if digits.len() <= 2 {
        return digits;
    }

    let (area, local) = digits.split_at(2);
    let split = if digits.len() <= 10 { 4 } else { 5 };
    if local.len() > split {
        format!("({}) {}-{}", area, &local[..split], &local[split..])
    } else {
        format!("({}) {}", area, local)
    }
}

/// Format a CPF progressively as `000.000.000-00`.
pub fn format_cpf(value: &str) -> String {
    let digits: String = digits_only(value).chars().take(CPF_DIGITS).collect();
    let mut out = String::with_capacity(14);
    for (i, c) in digits.chars().enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(c);
    }
    out
}

/// Format a dentist's CRO as two uppercase letters, a hyphen and five digits.
pub fn format_cro(value: &str) -> String {
    let letters: String = value
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(2)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let numbers: String = digits_only(value).chars().take(5).collect();

    if numbers.is_empty() {
        letters
    } else {
        format!("{}-{}", letters, numbers)
    }
}

/// Lowercase an email address and strip all whitespace.
pub fn format_email(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_idempotent(f: fn(&str) -> String, inputs: &[&str]) {
        for input in inputs {
            let once = f(input);
            assert_eq!(f(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_capitalize_name() {
        assert_eq!(capitalize_name("maria DA silva"), "Maria da Silva");
        assert_eq!(capitalize_name("  joão   dos santos"), "João dos Santos");
        assert_eq!(capitalize_name("ana2 ×lima"), "Ana Lima");
        assert_eq!(capitalize_name("De souza"), "De Souza");
    }

    #[test]
    fn test_capitalize_name_leaves_trailing_space() {
        assert_eq!(capitalize_name("maria "), "maria ");
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("1122223333"), "(11) 2222-3333");
        assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
        assert_eq!(format_phone("11 98765 4321 99"), "(11) 98765-4321");
        assert_eq!(format_phone("11"), "11");
        assert_eq!(format_phone("112"), "(11) 2");
        assert_eq!(format_phone("1122223"), "(11) 2222-3");
        assert_eq!(format_phone("112222"), "(11) 2222");
        assert_eq!(format_phone("11222233"), "(11) 2222-33");
    }

    #[test]
    fn test_format_cpf() {
        assert_eq!(format_cpf("12345678901"), "123.456.789-01");
        assert_eq!(format_cpf("1234"), "123.4");
        assert_eq!(format_cpf("123.456.789-0123"), "123.456.789-01");
    }

    #[test]
    fn test_format_cro() {
        assert_eq!(format_cro("sp12345"), "SP-12345");
        assert_eq!(format_cro("s"), "S");
        assert_eq!(format_cro("rj-1234567"), "RJ-12345");
    }

    #[test]
    fn test_format_specialty_and_email() {
        assert_eq!(format_specialty("  clínico   geral "), "Clínico Geral");
        assert_eq!(format_email(" Ana.Silva @Example.com "), "ana.silva@example.com");
    }

    #[test]
    fn test_normalizers_are_idempotent() {
        assert_idempotent(capitalize_name, &["maria da silva", "ÿvonne", "a ", "JOSÉ E MARIA", ""]);
        assert_idempotent(format_phone, &["1", "112", "11222233", "1122223333", "119876543210"]);
        assert_idempotent(format_cpf, &["1", "1234", "1234567", "123456789012"]);
        assert_idempotent(format_cro, &["s", "sp", "sp1", "sp-12345678"]);
        assert_idempotent(format_specialty, &["orto dontia", " a  b "]);
        assert_idempotent(format_email, &[" A@B.C "]);
    }
}
