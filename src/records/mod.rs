mod contact_message;
mod faq;
pub mod identity;
mod quote_request;
mod testimonial;
pub mod validation;

pub use contact_message::{ContactMessage, NewContactMessage};
pub use faq::{Faq, NewFaq};
pub use identity::{IdentityGenerator, RandomIdentity};
pub use quote_request::{NewQuoteRequest, QuoteRequest};
pub use testimonial::{NewTestimonial, Testimonial};
pub use validation::{FieldViolation, ValidationError};
