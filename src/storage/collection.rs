use std::fmt;

/// Logical collections, one per record type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    Quotes,
    ContactMessages,
    Testimonials,
    Faq,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Quotes,
        Collection::ContactMessages,
        Collection::Testimonials,
        Collection::Faq,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Quotes => "quotes",
            Collection::ContactMessages => "contact_messages",
            Collection::Testimonials => "testimonials",
            Collection::Faq => "faq",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
