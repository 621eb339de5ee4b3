/// Prefilled WhatsApp message asking a provider for availability
pub fn booking_message(name: &str) -> String {
    format!(
        "Hi {}, I'm interested in booking a massage session. Could you please share your availability?",
        name
    )
}

/// Build a `wa.me` deep link for a phone number with a prefilled message
///
/// Everything but digits is stripped from the number. Returns `None` when
/// no digits remain.
pub fn whatsapp_url(phone: &str, message: &str) -> Option<String> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    Some(format!(
        "https://wa.me/{}?text={}",
        digits,
        urlencoding::encode(message)
    ))
}
