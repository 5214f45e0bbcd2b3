mod blog_post;
mod new_subscriber;
mod subscriber_email;
mod subscriber_name;
mod subscription_outcome;

pub use blog_post::{categories, BlogPost, PostFilter, ALL_CATEGORIES};
pub use new_subscriber::{NewSubscriber, SubscriptionRequest};
pub use subscriber_email::SubscriberEmail;
pub use subscriber_name::SubscriberName;
pub use subscription_outcome::{
    SubscriptionOutcome, SubscriptionResponse, ALREADY_SUBSCRIBED, SUBSCRIPTION_FAILED,
};
