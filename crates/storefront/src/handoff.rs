//! WhatsApp deep links for handing orders off to the shop.

/// Base of WhatsApp's click-to-chat links.
const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Build a click-to-chat link that opens a chat with `recipient` and
/// pre-fills `text`.
///
/// `recipient` is an international number without `+`. The text is
/// percent-encoded; only RFC 3986 unreserved characters are left as-is.
///
/// ```rust
/// # use ether_craft_storefront::handoff::whatsapp_url;
/// assert_eq!(
///     whatsapp_url("6281234567890", "Halo, saya ingin memesan"),
///     "https://wa.me/6281234567890?text=Halo%2C%20saya%20ingin%20memesan"
/// );
/// ```
#[must_use]
pub fn whatsapp_url(recipient: &str, text: &str) -> String {
    format!(
        "{WHATSAPP_BASE_URL}/{recipient}?text={}",
        urlencoding::encode(text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodes_newlines_and_markup() {
        let url = whatsapp_url("6281234567890", "*Produk:* Switch X\n*Jumlah:* 3");
        assert_eq!(
            url,
            "https://wa.me/6281234567890?text=%2AProduk%3A%2A%20Switch%20X%0A%2AJumlah%3A%2A%203"
        );
    }

    #[test]
    fn test_round_trips_through_decoding() {
        let text = "Total Harga: Rp\u{a0}45.000 & ongkir?";
        let url = whatsapp_url("628111", text);
        let (_, encoded) = url.split_once("?text=").unwrap();
        assert_eq!(urlencoding::decode(encoded).unwrap(), text);
    }
}
