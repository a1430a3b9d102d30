/// Percent-encodes everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`,
/// matching the browser's `encodeURIComponent`.
pub fn encode_component(input: &str) -> String {
    // urlencoding also escapes the sub-delims `encodeURIComponent` keeps
    [("%21", "!"), ("%2A", "*"), ("%27", "'"), ("%28", "("), ("%29", ")")]
        .iter()
        .fold(urlencoding::encode(input).into_owned(), |out, (escaped, raw)| {
            out.replace(escaped, raw)
        })
}

pub fn whatsapp_url(number: &str, message: &str) -> String {
    format!("https://wa.me/{number}?text={}", encode_component(message))
}

pub fn mailto_url(email: &str) -> String {
    format!("mailto:{email}")
}

pub fn tel_url(phone: &str) -> String {
    let digits: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    format!("tel:{digits}")
}
