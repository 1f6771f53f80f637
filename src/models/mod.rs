pub mod blog;
pub mod booking_inquiry;
pub mod brand;
pub mod car;
pub mod contact_message;
pub mod location;
pub mod outcome;
pub mod testimonial;

pub use blog::*;
pub use booking_inquiry::*;
pub use brand::*;
pub use car::*;
pub use contact_message::*;
pub use location::*;
pub use outcome::*;
pub use testimonial::*;
