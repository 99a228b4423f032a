//! Recipient (To/Cc) inference from maintainer script output.

pub mod builder;
pub mod render;

pub use builder::{
    KERNEL_LIST, LIST_DOMAIN, NETDEV_LIST, NETDEV_MAINTAINER, RecipientListBuilder, RecipientSet,
    lookup_recipients,
};
pub use render::{render_recipients, strip_display_names};
