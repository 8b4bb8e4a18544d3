//! Navigation targets requested by search interactions.

use std::fmt;

use crate::search::Suggestion;

/// A storefront route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Product detail page.
    Product(u32),
    /// Shop listing for a category or brand id.
    Shop(String),
    /// Search results page for a query.
    Search(String),
}

impl Route {
    /// Route for a clicked suggestion.
    #[must_use]
    pub fn for_suggestion(suggestion: &Suggestion) -> Self {
        match suggestion {
            Suggestion::Product { id, .. } => Self::Product(*id),
            Suggestion::Category { id, .. } | Suggestion::Brand { id, .. } => Self::Shop(id.clone()),
        }
    }

    /// Results page for a submitted or recent query.
    #[must_use]
    pub fn search(query: &str) -> Self {
        Self::Search(query.to_string())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Product(id) => write!(f, "/product/{id}"),
            Self::Shop(id) => write!(f, "/shop/{id}"),
            Self::Search(query) => write!(f, "/search?q={}", encode_component(query)),
        }
    }
}

/// Percent-encode a query component, leaving only unreserved characters.
fn encode_component(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(char::from(byte)),
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_routes() {
        let product = Suggestion::Product {
            id: 3,
            name: "Elegant Crossbody".to_string(),
            image: String::new(),
            price: 1650.0,
        };
        let brand = Suggestion::Brand {
            id: "riad-couture".to_string(),
            name: "Riad Couture".to_string(),
        };
        assert_eq!(Route::for_suggestion(&product).to_string(), "/product/3");
        assert_eq!(Route::for_suggestion(&brand).to_string(), "/shop/riad-couture");
    }

    #[test]
    fn search_route_encodes_query() {
        assert_eq!(
            Route::search("tote & belt").to_string(),
            "/search?q=tote%20%26%20belt"
        );
        assert_eq!(Route::search("café").to_string(), "/search?q=caf%C3%A9");
    }
}
