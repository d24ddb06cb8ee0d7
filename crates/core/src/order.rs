//! Order drafts and the order message handed off to the shop's chat.

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, Quantity};

/// Message sent when a visitor asks about the custom build service.
pub const GENERAL_INQUIRY_MESSAGE: &str =
    "Hello! I am interested in your custom keyboard build service.";

/// Placeholder used in the message when the customer leaves no notes.
const EMPTY_NOTES: &str = "-";

/// Recipient details entered in the order form.
///
/// Fields are embedded in the order message verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub notes: String,
}

/// A product selected in the order modal, with the chosen quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub product: Product,
    pub quantity: Quantity,
}

impl OrderDraft {
    /// Start a draft for one unit of `product`.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: Quantity::ONE,
        }
    }

    /// Replace the quantity with coerced form input.
    #[must_use]
    pub fn with_quantity_input(self, input: &str) -> Self {
        Self {
            quantity: Quantity::coerce(input),
            ..self
        }
    }

    /// Price × quantity.
    #[must_use]
    pub fn total(&self) -> Price {
        self.product.price.times(self.quantity)
    }

    /// Format the order message for this draft.
    #[must_use]
    pub fn message(&self, contact: &ContactDetails) -> String {
        build_order_message(&self.product, self.quantity, contact)
    }
}

/// Build the order message sent to the shop.
///
/// ```rust
/// # use ether_craft_core::{ContactDetails, Quantity, build_order_message};
/// # fn product() -> ether_craft_core::Product {
/// #     serde_json::from_str(r#"{"id":"1","name":"Switch X","category":"switches",
/// #         "price":15000,"stock":9,"created_at":"2024-01-01T00:00:00Z"}"#).unwrap()
/// # }
/// let contact = ContactDetails {
///     name: "Budi".into(),
///     email: "budi@example.com".into(),
///     phone: "0812".into(),
///     address: "Jl. Merdeka 1".into(),
///     notes: String::new(),
/// };
/// let message = build_order_message(&product(), Quantity::coerce("3"), &contact);
///
/// assert!(message.contains("*Total Harga:* Rp\u{a0}45.000"));
/// assert!(message.contains("*Catatan:* -"));
/// ```
#[must_use]
pub fn build_order_message(product: &Product, quantity: Quantity, contact: &ContactDetails) -> String {
    let total = product.price.times(quantity);
    let notes = if contact.notes.trim().is_empty() {
        EMPTY_NOTES
    } else {
        contact.notes.as_str()
    };

    format!(
        "Halo Ether Craft, saya ingin memesan:\n\n\
         *Produk:* {product}\n\
         *Jumlah:* {quantity}\n\
         *Total Harga:* {total}\n\n\
         *Detail Penerima:*\n\
         Nama: {name}\n\
         Email: {email}\n\
         Telepon: {phone}\n\
         Alamat: {address}\n\n\
         *Catatan:* {notes}\n\n\
         Mohon diproses, terima kasih!",
        product = product.name,
        total = total.display(),
        name = contact.name,
        email = contact.email,
        phone = contact.phone,
        address = contact.address,
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::types::{Category, ProductId};

    fn switch_x() -> Product {
        Product {
            id: ProductId::from("sw-x"),
            name: "Switch X".to_string(),
            description: "Linear, 45g".to_string(),
            category: Category::Switches,
            price: Price::new(15_000),
            stock: 120,
            image_url: String::new(),
            created_at: Utc::now(),
        }
    }

    fn contact() -> ContactDetails {
        ContactDetails {
            name: "Siti Rahma".to_string(),
            email: "siti@example.com".to_string(),
            phone: "+62 812-3456-7890".to_string(),
            address: "Jl. Sudirman No. 5, Jakarta".to_string(),
            notes: "Please pack with bubble wrap".to_string(),
        }
    }

    #[test]
    fn test_message_contains_total_and_contact_fields() {
        let contact = contact();
        let message = build_order_message(&switch_x(), Quantity::coerce("3"), &contact);

        assert!(message.contains("Rp\u{a0}45.000"));
        assert!(message.contains("*Produk:* Switch X\n"));
        assert!(message.contains("*Jumlah:* 3\n"));
        for field in [
            &contact.name,
            &contact.email,
            &contact.phone,
            &contact.address,
            &contact.notes,
        ] {
            assert!(message.contains(field.as_str()), "missing {field}");
        }
    }

    #[test]
    fn test_message_layout() {
        let message = build_order_message(&switch_x(), Quantity::ONE, &contact());
        let lines: Vec<_> = message.lines().collect();
        assert_eq!(lines.first(), Some(&"Halo Ether Craft, saya ingin memesan:"));
        assert_eq!(lines.get(1), Some(&""));
        assert_eq!(lines.get(5), Some(&""));
        assert_eq!(lines.get(6), Some(&"*Detail Penerima:*"));
        assert_eq!(lines.last(), Some(&"Mohon diproses, terima kasih!"));
    }

    #[test]
    fn test_blank_notes_use_placeholder() {
        let mut contact = contact();
        contact.notes = "   ".to_string();
        let message = build_order_message(&switch_x(), Quantity::ONE, &contact);
        assert!(message.contains("*Catatan:* -\n"));
    }

    #[test]
    fn test_draft_quantity_coercion() {
        let draft = OrderDraft::new(switch_x());
        assert_eq!(draft.total(), Price::new(15_000));

        let draft = draft.with_quantity_input("4");
        assert_eq!(draft.total(), Price::new(60_000));

        let draft = draft.with_quantity_input("many");
        assert_eq!(draft.quantity, Quantity::ONE);
        assert_eq!(draft.total(), Price::new(15_000));
    }

    #[test]
    fn test_draft_message_matches_free_function() {
        let draft = OrderDraft::new(switch_x()).with_quantity_input("2");
        assert_eq!(
            draft.message(&contact()),
            build_order_message(&switch_x(), Quantity::coerce("2"), &contact())
        );
    }
}
