//! Subscriptions module - domain models, wire parsing and the source trait.

mod subscriptions_model;
mod subscriptions_traits;

pub use subscriptions_model::{
    format_minor_units, parse_subscription_listing, BusinessUnitFilter, BusinessUnitRef,
    Money, PriceWithInterval, SubscriptionPayload, SubscriptionRecord,
};
pub use subscriptions_traits::SubscriptionSource;
