//! Customer contact details captured at checkout.

use serde::{Deserialize, Serialize};

/// Who the order is for and where it ships.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerInfo {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Shipping address, free text.
    pub address: String,
}

impl CustomerInfo {
    /// Create contact details, trimming surrounding whitespace.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            address: address.into().trim().to_string(),
        }
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        [&self.name, &self.email, &self.address]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_fields() {
        let customer = CustomerInfo::new(" Asha ", "asha@example.com ", " 12 MG Road");
        assert_eq!(customer.name, "Asha");
        assert_eq!(customer.one_line(), "Asha, asha@example.com, 12 MG Road");
    }

    #[test]
    fn test_one_line_skips_blank_fields() {
        let customer = CustomerInfo::new("Asha", "", "Pune");
        assert_eq!(customer.one_line(), "Asha, Pune");
    }
}
